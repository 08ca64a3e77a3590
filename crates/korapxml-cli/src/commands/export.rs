//! Export command
//!
//! Usage: korapxml export <SEED>... --out <DIR> [--config <FILE>] [--foundry <MAPPING>]... [--log <dev|prod>]

use std::path::{Path, PathBuf};

use clap::Args;
use korapxml_core::logging_facility::{init, Profile};
use korapxml_core::{Document, DocumentReport, ExportConfig, Exporter, FoundryMapping};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Seed files (YAML or JSON) or directories of seed files
    #[arg(required = true)]
    pub seeds: Vec<PathBuf>,

    /// Corpus output root
    #[arg(short, long)]
    pub out: PathBuf,

    /// Export configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Extra `layer->Foundry` assignments, appended to the configured mapping
    #[arg(short, long = "foundry")]
    pub foundry: Vec<String>,

    /// Log to stderr: `dev` (human readable) or `prod` (JSON)
    #[arg(long, value_parser = ["dev", "prod"])]
    pub log: Option<String>,
}

/// Execute export command
pub fn execute(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(profile) = args.log.as_deref().and_then(Profile::from_name) {
        init(profile);
    }

    let mut config = match &args.config {
        Some(path) => korapxml_store::load_config(path)?,
        None => ExportConfig::default(),
    };
    for raw in &args.foundry {
        config.foundry_mapping.extend(FoundryMapping::parse(raw));
    }

    let mut failures = 0;
    let mut documents = Vec::new();
    for seed_file in collect_seed_files(&args.seeds)? {
        match load(&seed_file, &args.out) {
            Ok(entry) => documents.push(entry),
            Err(e) => {
                failures += 1;
                eprintln!("✗ {}: {}", seed_file.display(), e);
            }
        }
    }

    let exporter = Exporter::new(config);
    for ((doc, _), result) in documents.iter().zip(exporter.export_corpus(&documents)) {
        match result {
            Ok(report) => print_summary(&report),
            Err(e) => {
                failures += 1;
                eprintln!("✗ {}: {}", doc.path, e);
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} document(s) failed", failures).into());
    }
    Ok(())
}

/// Expand directories into their seed files (sorted for determinism)
fn collect_seed_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut seed_files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(path)?
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.extension()
                        .map(|ext| ext == "yaml" || ext == "yml" || ext == "json")
                        .unwrap_or(false)
                })
                .collect();
            entries.sort();
            seed_files.extend(entries);
        } else {
            seed_files.push(path.clone());
        }
    }
    Ok(seed_files)
}

fn load(seed_file: &Path, out: &Path) -> Result<(Document, PathBuf), Box<dyn std::error::Error>> {
    let doc = korapxml_store::load_document(seed_file)?;
    let dir = korapxml_store::document_dir(out, &doc.path)?;
    Ok((doc, dir))
}

fn print_summary(report: &DocumentReport) {
    let marker = if report.is_partial() { "~" } else { "✓" };
    println!(
        "{} {}: {} text(s), {} file(s) in {}",
        marker,
        report.path,
        report.texts.len(),
        report.file_count(),
        report.dir.display()
    );
    for text in &report.texts {
        if text.skipped_nodes() > 0 {
            println!("  {}: {} node(s) skipped", text.doc_id, text.skipped_nodes());
        }
        for layer in &text.missing_layers {
            println!("  {}: layer '{}' not found", text.doc_id, layer);
        }
        for file in text.failed_files() {
            println!("  {}: {} not written", text.doc_id, file.file.display());
        }
    }
}

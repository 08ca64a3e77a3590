//! Export orchestration: one directory per text, one file per layer
//!
//! For every text of a document the exporter creates
//! `<doc_dir>/<sanitized text name>/`, writes `data.xml` and
//! `base/token.xml`, then runs each configured foundry against its layer.
//! Texts are exported in parallel; foundries within a text run in order.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::config::ExportConfig;
use crate::errors::{directory_error, KorapError, Result};
use crate::foundry::registry::{FoundryRegistry, ResolvedAssignment};
use crate::foundry::{Base, FileReport, FileStatus, Foundry, Generic, TextContext};
use crate::ids::{document_id, sanitize};
use crate::model::{CorpusPath, Document, NodeId, TextId};
use crate::render::{token_file, write_text, write_tokens};
use crate::types::format::{BASE_FOUNDRY, DATA_FILE};
use crate::{log_op_end, log_op_error, log_op_start};

/// Name reported for the `data.xml` writer
pub const TEXT_WRITER: &str = "text";

/// Progress callbacks of an export run
///
/// Callbacks may be invoked from worker threads.
pub trait ExportListener: Send + Sync {
    fn on_text_completed(&self, _path: &CorpusPath, _report: &TextReport) {}

    fn on_document_completed(&self, _report: &DocumentReport) {}

    fn on_document_failed(&self, _path: &CorpusPath, _err: &KorapError) {}
}

/// Listener that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl ExportListener for NoopListener {}

/// What happened to one text of a document
#[derive(Debug, Clone, PartialEq)]
pub struct TextReport {
    pub text: String,
    pub doc_id: String,
    pub dir: PathBuf,
    /// Spans written to `base/token.xml`
    pub tokens: usize,
    pub files: Vec<FileReport>,
    /// Configured layers that do not exist in the graph
    pub missing_layers: Vec<String>,
    /// Files written more than once; the last writer won
    pub overwritten: Vec<PathBuf>,
}

impl TextReport {
    /// Relative paths of all files present after the export
    pub fn written_files(&self) -> Vec<&Path> {
        let mut seen = HashSet::new();
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Written { .. }))
            .map(|f| f.file.as_path())
            .filter(|f| seen.insert(*f))
            .collect()
    }

    /// Nodes skipped because their range could not be resolved
    pub fn skipped_nodes(&self) -> usize {
        self.files
            .iter()
            .map(|f| match f.status {
                FileStatus::Written { skipped, .. } => skipped,
                _ => 0,
            })
            .sum()
    }

    pub fn failed_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.status, FileStatus::Failed(_)))
    }
}

/// What happened to one document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    pub path: CorpusPath,
    pub dir: PathBuf,
    pub texts: Vec<TextReport>,
}

impl DocumentReport {
    /// Whether anything was skipped, abandoned or overwritten
    pub fn is_partial(&self) -> bool {
        self.texts.iter().any(|t| {
            t.skipped_nodes() > 0
                || t.failed_files().next().is_some()
                || !t.missing_layers.is_empty()
                || !t.overwritten.is_empty()
        })
    }

    pub fn file_count(&self) -> usize {
        self.texts.iter().map(|t| t.written_files().len()).sum()
    }
}

/// Exports documents with a fixed configuration and foundry assignment
pub struct Exporter {
    config: ExportConfig,
    assignments: Vec<ResolvedAssignment>,
    listener: Arc<dyn ExportListener>,
}

impl Exporter {
    /// Exporter using the built-in foundries
    pub fn new(config: ExportConfig) -> Self {
        Self::with_registry(config, &FoundryRegistry::builtin())
    }

    /// Exporter resolving the configured foundry mapping against `registry`
    ///
    /// Unknown foundry names are logged and their layers skipped.
    pub fn with_registry(config: ExportConfig, registry: &FoundryRegistry) -> Self {
        let assignments = registry.resolve(&config.foundry_mapping);
        Self {
            config,
            assignments,
            listener: Arc::new(NoopListener),
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn ExportListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn assignments(&self) -> &[ResolvedAssignment] {
        &self.assignments
    }

    /// Export every text of `doc` below `doc_dir`
    ///
    /// # Errors
    ///
    /// Returns `TextDirectoryCollision` before anything is written if two
    /// texts sanitize to the same directory. Otherwise returns the first
    /// fatal error of any text: `InvalidCorpusPath` if no document ID can be
    /// derived, `DirectoryCreation` if a text directory cannot be created.
    /// All other failures are logged and reported.
    pub fn export_document(&self, doc: &Document, doc_dir: &Path) -> Result<DocumentReport> {
        let start = Instant::now();
        let path = doc.path.to_string();
        log_op_start!("export_document", path = path.as_str());

        let text_ids: Vec<TextId> = doc.graph.text_ids().collect();
        if text_ids.is_empty() {
            tracing::warn!(path = path.as_str(), "Document has no texts, nothing to export");
        }

        let result = check_text_dirs(doc, doc_dir, &text_ids).and_then(|()| {
            text_ids
                .par_iter()
                .map(|&text| self.export_text(doc, doc_dir, text))
                .collect::<Result<Vec<TextReport>>>()
        });

        match result {
            Ok(texts) => {
                let report = DocumentReport {
                    path: doc.path.clone(),
                    dir: doc_dir.to_path_buf(),
                    texts,
                };
                log_op_end!(
                    "export_document",
                    duration_ms = start.elapsed().as_millis() as u64,
                    path = path.as_str(),
                    text_count = report.texts.len(),
                    file_count = report.file_count()
                );
                self.listener.on_document_completed(&report);
                Ok(report)
            }
            Err(err) => {
                log_op_error!(
                    "export_document",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    path = path.as_str()
                );
                self.listener.on_document_failed(&doc.path, &err);
                Err(err)
            }
        }
    }

    /// Export many documents; a fatal error only affects its own document
    pub fn export_corpus(&self, documents: &[(Document, PathBuf)]) -> Vec<Result<DocumentReport>> {
        let start = Instant::now();
        log_op_start!("export_corpus", document_count = documents.len());

        let results: Vec<Result<DocumentReport>> = documents
            .iter()
            .map(|(doc, dir)| self.export_document(doc, dir))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        log_op_end!(
            "export_corpus",
            duration_ms = start.elapsed().as_millis() as u64,
            document_count = documents.len(),
            failed = failed
        );
        results
    }

    fn export_text(&self, doc: &Document, doc_dir: &Path, text: TextId) -> Result<TextReport> {
        let graph = &doc.graph;
        let text_name = &graph.text(text).name;

        let doc_id = document_id(&doc.path, text_name)?;
        let text_dir = doc_dir.join(sanitize(text_name));
        fs::create_dir_all(&text_dir).map_err(|e| directory_error(&text_dir, e))?;

        let mut report = TextReport {
            text: text_name.clone(),
            doc_id: doc_id.clone(),
            dir: text_dir.clone(),
            tokens: 0,
            files: Vec::new(),
            missing_layers: Vec::new(),
            overwritten: Vec::new(),
        };

        report.files.push(match write_text(&text_dir, &doc_id, graph, text) {
            Ok(_) => FileReport {
                foundry: TEXT_WRITER.to_string(),
                file: PathBuf::from(DATA_FILE),
                status: FileStatus::Written {
                    spans: 0,
                    skipped: 0,
                },
            },
            Err(err) => file_failed(TEXT_WRITER, PathBuf::from(DATA_FILE), &doc_id, err),
        });

        report.files.push(match write_tokens(&text_dir, &doc_id, graph, text) {
            Ok((_, count)) => {
                report.tokens = count;
                FileReport {
                    foundry: BASE_FOUNDRY.to_string(),
                    file: token_file(),
                    status: FileStatus::Written {
                        spans: count,
                        skipped: 0,
                    },
                }
            }
            Err(err) => file_failed(BASE_FOUNDRY, token_file(), &doc_id, err),
        });

        let ctx = TextContext {
            graph,
            text,
            doc_id: &doc_id,
            text_dir: &text_dir,
            config: &self.config,
        };

        if self.assignments.is_empty() {
            // No mapping configured: base layers plus one file per span annotation
            let all_nodes: Vec<NodeId> = graph.node_ids().collect();
            report.files.extend(Base.map(&ctx, &all_nodes));
            report.files.extend(Generic.map(&ctx, &all_nodes));
        } else {
            for assignment in &self.assignments {
                match graph.layer(&assignment.layer) {
                    Some(layer) => report
                        .files
                        .extend(assignment.foundry.map(&ctx, &layer.nodes)),
                    None => {
                        tracing::warn!(
                            doc_id = doc_id.as_str(),
                            layer = assignment.layer.as_str(),
                            foundry = assignment.foundry.name(),
                            "Layer not found in document graph, skipping"
                        );
                        report.missing_layers.push(assignment.layer.clone());
                    }
                }
            }
        }

        report.overwritten = find_overwritten(&report.files, &doc_id);
        self.listener.on_text_completed(&doc.path, &report);
        Ok(report)
    }
}

/// Every text needs a directory of its own; texts are written in parallel
fn check_text_dirs(doc: &Document, doc_dir: &Path, texts: &[TextId]) -> Result<()> {
    let mut claimed: HashMap<String, &str> = HashMap::new();
    for &text in texts {
        let name = doc.graph.text(text).name.as_str();
        let dir_name = sanitize(name);
        if let Some(first) = claimed.insert(dir_name.clone(), name) {
            return Err(KorapError::TextDirectoryCollision {
                first: first.to_string(),
                second: name.to_string(),
                dir: doc_dir.join(dir_name).display().to_string(),
            });
        }
    }
    Ok(())
}

fn file_failed(writer: &str, file: PathBuf, doc_id: &str, err: KorapError) -> FileReport {
    log_op_error!(
        "write_file",
        err.clone(),
        duration_ms = 0u64,
        doc_id = doc_id,
        file = %file.display()
    );
    FileReport {
        foundry: writer.to_string(),
        file,
        status: FileStatus::Failed(err),
    }
}

/// Files written more than once within one text, in order of detection
fn find_overwritten(files: &[FileReport], doc_id: &str) -> Vec<PathBuf> {
    let mut claimed: HashSet<&Path> = HashSet::new();
    let mut overwritten = Vec::new();

    for report in files {
        if !matches!(report.status, FileStatus::Written { .. }) {
            continue;
        }
        if !claimed.insert(report.file.as_path()) {
            tracing::warn!(
                doc_id = doc_id,
                foundry = report.foundry.as_str(),
                file = %report.file.display(),
                "Output file written more than once, last writer wins"
            );
            overwritten.push(report.file.clone());
        }
    }
    overwritten
}

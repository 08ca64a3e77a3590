//! KorAP-XML CLI
//!
//! Command-line interface for exporting document seeds to KorAP-XML

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "korapxml")]
#[command(about = "KorAP-XML - Export annotated documents to the KorAP-XML corpus format", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Export document seeds into a KorAP-XML corpus directory
    Export(commands::export::ExportArgs),
    /// List the registered foundries
    Foundries,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Export(args) => commands::export::execute(args),
        Commands::Foundries => commands::foundries::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

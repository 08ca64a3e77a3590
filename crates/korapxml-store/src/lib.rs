//! KorAP-XML Store - document seeds, configuration files and output layout
//!
//! Provides:
//! - Document seed format v0 (YAML or JSON) with validation
//! - Hydration of seeds into core `Document`s
//! - Export configuration loading
//! - Corpus directory layout below an output root

pub mod config;
pub mod errors;
pub mod layout;
pub mod seed;

// Re-export key types
pub use config::load_config;
pub use errors::Result;
pub use layout::{document_dir, document_path};
pub use seed::{load_document, parse_seed_file, parse_seed_str, SeedV0};

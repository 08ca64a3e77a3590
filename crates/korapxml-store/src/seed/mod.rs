//! Document seed system
//!
//! Provides:
//! - Seed Format v0 schema
//! - YAML/JSON parser with validation
//! - Hydration into core documents

pub mod format_v0;
pub mod importer;
pub mod parser;

pub use format_v0::SeedV0;
pub use importer::{hydrate, load_document};
pub use parser::{parse_seed_file, parse_seed_str};

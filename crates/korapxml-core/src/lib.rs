//! KorAP-XML Core - export engine for annotated document graphs
//!
//! This crate turns an in-memory document graph (primary texts, tokens
//! anchored to character ranges, layered spans and constituency trees)
//! into the multi-file KorAP-XML directory format:
//! - Arena-backed document graph model with typed node, text and relation IDs
//! - Offset resolution from any structural node down to its token range
//! - Document and element identifiers
//! - Streaming XML writers for raw text, tokens and annotation layers
//! - Pluggable foundries (Base, TreeTagger, CoreNLP, Generic) and their registry
//! - Export orchestration with per-document reports and progress callbacks

pub mod config;
pub mod errors;
pub mod export;
pub mod foundry;
pub mod ids;
pub mod logging_facility;
pub mod model;
pub mod render;
pub mod traversal;

pub use korapxml_core_types as types;

// Re-export commonly used types
pub use config::{ExportConfig, FoundryAssignment, FoundryMapping};
pub use errors::{ExError, ExErrorKind, KorapError, Result};
pub use export::{DocumentReport, ExportListener, Exporter, NoopListener, TextReport};
pub use foundry::{Foundry, FoundryRegistry};
pub use ids::{document_id, sanitize};
pub use model::{CorpusPath, Document, DocumentGraph};

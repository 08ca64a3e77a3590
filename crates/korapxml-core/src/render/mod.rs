//! XML serialization of text, token and annotation layer files

pub mod features;
pub mod layer_writer;
pub mod sink;
pub mod text_writer;
pub mod xml;

pub use features::{group_by_namespace, AnnotationShape};
pub use layer_writer::{write_layer, LayerOutcome};
pub use sink::AtomicFile;
pub use text_writer::{token_file, write_text, write_tokens};

pub mod annotation;
pub mod document;
pub mod graph;

pub use annotation::Annotation;
pub use document::{CorpusPath, Document};
pub use graph::{
    DocumentGraph, Layer, Node, NodeId, NodeKind, Relation, RelationId, RelationKind, TextId,
    TextualDs, TextualRelation,
};

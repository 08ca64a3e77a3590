//! Document and element identifiers

use crate::errors::{KorapError, Result};
use crate::model::{CorpusPath, DocumentGraph, NodeId};

/// Strip the characters KorAP reserves as ID separators (`.` and `_`)
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|c| *c != '.' && *c != '_').collect()
}

/// Derive the KorAP document ID `<corpus>_<document>.<text>`
///
/// # Errors
///
/// Returns `InvalidCorpusPath` if the path has fewer than two segments.
pub fn document_id(path: &CorpusPath, text_name: &str) -> Result<String> {
    match (path.root(), path.leaf()) {
        (Some(root), Some(leaf)) if path.len() >= 2 => Ok(format!(
            "{}_{}.{}",
            sanitize(root),
            sanitize(leaf),
            sanitize(text_name)
        )),
        _ => Err(KorapError::InvalidCorpusPath {
            path: path.to_string(),
            segments: path.len(),
        }),
    }
}

/// Element ID of a node inside a layer file: its graph-local name
pub fn node_fragment_id(graph: &DocumentGraph, node: NodeId) -> &str {
    &graph.node(node).name
}

use super::{nodes_in_text, Foundry, LayerFile, Selection};
use crate::config::ExportConfig;
use crate::model::{DocumentGraph, NodeId, NodeKind, TextId};
use crate::render::AnnotationShape;

/// Feature structure type wrapping every TreeTagger annotation group
pub const LEX_TYPE: &str = "lex";

/// Token-level lemma and part of speech (`tree_tagger/morpho`)
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeTagger;

impl Foundry for TreeTagger {
    fn name(&self) -> &str {
        "TreeTagger"
    }

    fn select_nodes(
        &self,
        graph: &DocumentGraph,
        candidates: &[NodeId],
        text: TextId,
        config: &ExportConfig,
    ) -> Vec<Selection> {
        let lemma = &config.tree_tagger.lemma;
        let pos = &config.tree_tagger.pos;
        let tokens = nodes_in_text(graph, candidates, text, self.traversal(), |node| {
            node.kind == NodeKind::Token
                && (node.annotation(lemma).is_some() || node.annotation(pos).is_some())
        });

        vec![Selection {
            file: LayerFile::new("tree_tagger", "morpho"),
            nodes: tokens,
        }]
    }

    fn annotation_shape(&self) -> AnnotationShape {
        AnnotationShape::Wrapped(LEX_TYPE.to_string())
    }
}

use super::{nodes_in_text, Foundry, LayerFile, Selection};
use crate::config::ExportConfig;
use crate::model::{DocumentGraph, NodeId, NodeKind, TextId};
use crate::types::format::BASE_FOUNDRY;

pub const SENTENCES_LAYER: &str = "sentences";
pub const PARAGRAPH_LAYER: &str = "paragraph";

/// Sentence and paragraph boundaries (`base/sentences`, `base/paragraph`)
#[derive(Debug, Default, Clone, Copy)]
pub struct Base;

impl Foundry for Base {
    fn name(&self) -> &str {
        "Base"
    }

    fn select_nodes(
        &self,
        graph: &DocumentGraph,
        candidates: &[NodeId],
        text: TextId,
        config: &ExportConfig,
    ) -> Vec<Selection> {
        let spans = nodes_in_text(graph, candidates, text, self.traversal(), |node| {
            node.kind == NodeKind::Span
        });

        let mut sentences = Vec::new();
        let mut paragraphs = Vec::new();
        for id in spans {
            let node = graph.node(id);
            if node.annotation(&config.base.sentence).is_some() {
                sentences.push(id);
            }
            if node.annotation(&config.base.paragraph).is_some() {
                paragraphs.push(id);
            }
        }

        vec![
            Selection {
                file: LayerFile::new(BASE_FOUNDRY, SENTENCES_LAYER),
                nodes: sentences,
            },
            Selection {
                file: LayerFile::new(BASE_FOUNDRY, PARAGRAPH_LAYER),
                nodes: paragraphs,
            },
        ]
    }
}

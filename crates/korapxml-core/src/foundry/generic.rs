use super::{nodes_in_text, Foundry, LayerFile, Selection};
use crate::config::ExportConfig;
use crate::model::{DocumentGraph, NodeId, NodeKind, TextId};
use crate::types::QName;

/// Folder used for annotations without a namespace
pub const DEFAULT_NAMESPACE_DIR: &str = "default";

/// One layer file per annotation name found on spans
///
/// Each span is written to `<namespace>/<name>.xml` for every annotation it
/// carries. Sentence and paragraph annotations are left to [`super::Base`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Generic;

impl Foundry for Generic {
    fn name(&self) -> &str {
        "Generic"
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

        let mut groups: Vec<(QName, Vec<NodeId>)> = Vec::new();
        for id in spans {
            for anno in &graph.node(id).annotations {
                if anno.has_qname(&config.base.sentence) || anno.has_qname(&config.base.paragraph) {
                    continue;
                }
                let qname = anno.qname();
                match groups.iter_mut().find(|(key, _)| *key == qname) {
                    Some((_, nodes)) => {
                        if nodes.last() != Some(&id) {
                            nodes.push(id);
                        }
                    }
                    None => groups.push((qname, vec![id])),
                }
            }
        }

        groups
            .into_iter()
            .map(|(qname, nodes)| Selection {
                file: LayerFile::new(
                    qname.namespace().unwrap_or(DEFAULT_NAMESPACE_DIR),
                    qname.name(),
                ),
                nodes,
            })
            .collect()
    }
}

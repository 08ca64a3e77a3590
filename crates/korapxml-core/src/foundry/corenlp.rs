use super::{nodes_in_text, Foundry, LayerFile, RelationRef, Selection};
use crate::config::ExportConfig;
use crate::ids::node_fragment_id;
use crate::model::{DocumentGraph, NodeId, NodeKind, RelationKind, TextId};

/// Label of every dominance reference
pub const DOMINATES_LABEL: &str = "dominates";

/// Constituency trees (`corenlp/constituency`)
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreNlp;

impl Foundry for CoreNlp {
    fn name(&self) -> &str {
        "CoreNLP"
    }

    fn select_nodes(
        &self,
        graph: &DocumentGraph,
        candidates: &[NodeId],
        text: TextId,
        _config: &ExportConfig,
    ) -> Vec<Selection> {
        let structures = nodes_in_text(graph, candidates, text, self.traversal(), |node| {
            node.kind == NodeKind::Structure
        });

        vec![Selection {
            file: LayerFile::new("corenlp", "constituency"),
            nodes: structures,
        }]
    }

    /// One `dominates` reference per outgoing dominance relation
    ///
    /// Tokens are written to another file, so token targets carry the
    /// configured token file as prefix.
    fn relations_for(
        &self,
        graph: &DocumentGraph,
        node: NodeId,
        config: &ExportConfig,
    ) -> Vec<RelationRef> {
        graph
            .out_relations(node)
            .filter(|(_, rel)| rel.kind == RelationKind::Dominance)
            .map(|(_, rel)| {
                let target = node_fragment_id(graph, rel.target);
                let target = if graph.node(rel.target).is_token() {
                    format!("{}#{}", config.corenlp.token_file, target)
                } else {
                    target.to_string()
                };
                RelationRef {
                    label: DOMINATES_LABEL.to_string(),
                    target,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominance_references() {
        let mut graph = DocumentGraph::new();
        let text = graph.add_text("t", "Is this").unwrap();
        let is = graph.add_token("cnIs", text, 0, 2).unwrap();
        let this = graph.add_token("cnThis", text, 3, 7).unwrap();
        let root = graph.add_node("cnRoot", NodeKind::Structure).unwrap();
        let np = graph.add_node("cnNp", NodeKind::Structure).unwrap();
        graph.add_relation(RelationKind::Dominance, root, is).unwrap();
        graph.add_relation(RelationKind::Dominance, root, np).unwrap();
        graph.add_relation(RelationKind::Pointing, root, this).unwrap();
        graph.add_relation(RelationKind::Dominance, np, this).unwrap();

        let config = ExportConfig::default();
        let refs = CoreNlp.relations_for(&graph, root, &config);
        assert_eq!(
            refs,
            vec![
                RelationRef {
                    label: "dominates".to_string(),
                    target: "morpho#cnIs".to_string()
                },
                RelationRef {
                    label: "dominates".to_string(),
                    target: "cnNp".to_string()
                },
            ]
        );

        let selections = CoreNlp.select_nodes(&graph, &[is, np, root], text, &config);
        assert_eq!(selections[0].nodes, vec![np, root]);
    }

    #[test]
    fn test_token_file_hint_is_configurable() {
        let mut graph = DocumentGraph::new();
        let text = graph.add_text("t", "a").unwrap();
        let tok = graph.add_token("cnTok", text, 0, 1).unwrap();
        let root = graph.add_node("cnTop", NodeKind::Structure).unwrap();
        graph.add_relation(RelationKind::Dominance, root, tok).unwrap();

        let mut config = ExportConfig::default();
        config.corenlp.token_file = "tokens".to_string();
        let refs = CoreNlp.relations_for(&graph, root, &config);
        assert_eq!(refs[0].target, "tokens#cnTok");
    }
}

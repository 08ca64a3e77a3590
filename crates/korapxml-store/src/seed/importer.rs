//! Seed hydration
//!
//! Builds a core `Document` from a validated seed. Nodes are created in
//! seed order (tokens, spans, structures) so that layer and relation order
//! is reproducible.

use std::path::Path;
use std::time::Instant;

use korapxml_core::model::{Annotation, DocumentGraph, NodeId, NodeKind, RelationKind};
use korapxml_core::types::QName;
use korapxml_core::{log_op_end, log_op_error, log_op_start, CorpusPath, Document};

use crate::errors::Result;
use crate::seed::format_v0::{SeedAnnotation, SeedRelationKind, SeedV0};
use crate::seed::parse_seed_file;

/// Load a seed file and hydrate it into a document
///
/// This is the main entry point for reading documents. It:
/// 1. Parses and validates the seed (YAML or JSON)
/// 2. Builds the document graph
///
/// # Errors
///
/// Returns the validation error of an invalid seed, or the graph error of
/// a seed the graph rejects.
pub fn load_document(path: &Path) -> Result<Document> {
    let start = Instant::now();
    let file = path.display().to_string();
    log_op_start!("load_document", file = file.as_str());

    let result = parse_seed_file(path).and_then(|seed| hydrate(&seed));
    match &result {
        Ok(doc) => {
            log_op_end!(
                "load_document",
                duration_ms = start.elapsed().as_millis() as u64,
                file = file.as_str(),
                path = %doc.path,
                node_count = doc.graph.node_count()
            );
        }
        Err(err) => log_op_error!(
            "load_document",
            err.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            file = file.as_str()
        ),
    }
    result
}

/// Build a document from an already validated seed
///
/// # Errors
///
/// Returns the converted graph error if the graph rejects an element.
pub fn hydrate(seed: &SeedV0) -> Result<Document> {
    let mut graph = DocumentGraph::new();

    for text in &seed.texts {
        graph.add_text(text.name.clone(), text.content.clone())?;
    }

    for token in &seed.tokens {
        let text = graph.text_by_name(&token.text)?;
        let id = graph.add_token(token.id.clone(), text, token.start, token.end)?;
        annotate(&mut graph, id, &token.annotations)?;
    }

    for span in &seed.spans {
        let id = graph.add_node(span.id.clone(), NodeKind::Span)?;
        for tok in &span.tokens {
            let target = graph.node_by_name(tok)?;
            graph.add_relation(RelationKind::Spanning, id, target)?;
        }
        annotate(&mut graph, id, &span.annotations)?;
    }

    for structure in &seed.structures {
        let id = graph.add_node(structure.id.clone(), NodeKind::Structure)?;
        annotate(&mut graph, id, &structure.annotations)?;
    }

    for relation in &seed.relations {
        let kind = match relation.kind {
            SeedRelationKind::Dominance => RelationKind::Dominance,
            SeedRelationKind::Pointing => RelationKind::Pointing,
        };
        let source = graph.node_by_name(&relation.source)?;
        let target = graph.node_by_name(&relation.target)?;
        let id = graph.add_relation(kind, source, target)?;
        if let Some(rel_type) = &relation.rel_type {
            graph.set_relation_type(id, rel_type.clone())?;
        }
    }

    for layer in &seed.layers {
        for node in &layer.nodes {
            let id = graph.node_by_name(node)?;
            graph.add_to_layer(&layer.name, id)?;
        }
    }

    Ok(Document::new(CorpusPath::parse(&seed.path), graph))
}

fn annotate(graph: &mut DocumentGraph, node: NodeId, annotations: &[SeedAnnotation]) -> Result<()> {
    for anno in annotations {
        let qname = QName::parse(&anno.qname);
        graph.annotate(node, Annotation::from_qname(&qname, anno.value.clone()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::parse_seed_str;

    #[test]
    fn test_hydrate_builds_graph_in_seed_order() {
        let yaml = r#"
schema_version: 0
path: salt:/corpus/sub/doc1
texts:
  - { name: t1, content: "Hallo Welt" }
tokens:
  - { id: tok1, text: t1, start: 0, end: 5, annotations: ["tt::pos=ITJ"] }
  - { id: tok2, text: t1, start: 6, end: 10 }
spans:
  - { id: s1, tokens: [tok1, tok2], annotations: ["salt::SENTENCE=s"] }
structures:
  - { id: root, annotations: ["cat=S"] }
relations:
  - { kind: dominance, source: root, target: tok1, type: edge }
  - { kind: dominance, source: root, target: tok2 }
layers:
  - { name: syntax, nodes: [root] }
  - { name: base, nodes: [s1] }
"#;
        let doc = hydrate(&parse_seed_str(yaml).unwrap()).unwrap();

        assert_eq!(doc.path.segments(), ["corpus", "sub", "doc1"]);
        let graph = &doc.graph;
        assert_eq!(graph.node_count(), 4);

        let tok1 = graph.node_by_name("tok1").unwrap();
        let pos = &graph.node(tok1).annotations[0];
        assert_eq!(pos.namespace.as_deref(), Some("tt"));
        assert_eq!(pos.value, "ITJ");

        let root = graph.node_by_name("root").unwrap();
        assert_eq!(graph.node(root).annotations[0].namespace, None);
        let edges: Vec<_> = graph.out_relations(root).map(|(_, r)| r.rel_type.clone()).collect();
        assert_eq!(edges, vec![Some("edge".to_string()), None]);

        let layers: Vec<&str> = graph.layers().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(layers, ["syntax", "base"]);
    }
}

use std::fs;
use std::path::Path;

use korapxml_core::model::{Annotation, DocumentGraph, NodeId, NodeKind, RelationKind, TextId};
use korapxml_core::{CorpusPath, Document, ExportConfig, FoundryMapping};

pub const SAMPLE_TEXT: &str = "Is this example more complicated than it appears to be?";

const SAMPLE_TOKENS: [(usize, usize, &str, &str); 11] = [
    (0, 2, "VBZ", "be"),
    (3, 7, "DT", "this"),
    (8, 15, "NN", "example"),
    (16, 20, "RBR", "more"),
    (21, 32, "JJ", "complicated"),
    (33, 37, "IN", "than"),
    (38, 40, "PRP", "it"),
    (41, 48, "VBZ", "appear"),
    (49, 51, "TO", "to"),
    (52, 54, "VB", "be"),
    (54, 55, ".", "?"),
];

/// Build the sample graph: one text, eleven tokens (`sTok1`..`sTok11`)
///
/// Layers:
/// - `morphology`: every token, with `salt::POS` and `salt::LEMMA`
/// - `base`: one sentence span and one paragraph span over the whole text
/// - `infstruct`: two `salt::Inf-Struct` spans
/// - `syntax`: a small constituency tree with `tiger::cat`
#[allow(dead_code)]
pub fn sample_graph() -> DocumentGraph {
    let mut graph = DocumentGraph::new();
    let text = graph.add_text("sText1", SAMPLE_TEXT).unwrap();
    let tokens = add_sample_tokens(&mut graph, text, "sTok");

    let sentence = add_span(&mut graph, "sSentence", &tokens, "salt", "SENTENCE", "s");
    let paragraph = add_span(&mut graph, "sParagraph", &tokens, "salt", "paragraph", "p");
    graph.add_to_layer("base", sentence).unwrap();
    graph.add_to_layer("base", paragraph).unwrap();

    let focus = add_span(&mut graph, "sSpan1", &tokens[0..3], "salt", "Inf-Struct", "contrast-focus");
    let topic = add_span(&mut graph, "sSpan2", &tokens[3..], "salt", "Inf-Struct", "topic");
    graph.add_to_layer("infstruct", focus).unwrap();
    graph.add_to_layer("infstruct", topic).unwrap();

    let root = add_structure(&mut graph, "structRoot", "ROOT");
    let sq = add_structure(&mut graph, "structSq", "SQ");
    let np = add_structure(&mut graph, "structNp", "NP");
    let adjp = add_structure(&mut graph, "structAdjp", "ADJP");
    let sbar = add_structure(&mut graph, "structSbar", "SBAR");
    dominate(&mut graph, root, &[sq]);
    dominate(&mut graph, sq, &[tokens[0], np, adjp]);
    dominate(&mut graph, np, &[tokens[1], tokens[2]]);
    dominate(&mut graph, adjp, &[tokens[3], tokens[4], sbar]);
    dominate(&mut graph, sbar, &tokens[5..]);
    for id in [root, sq, np, adjp, sbar] {
        graph.add_to_layer("syntax", id).unwrap();
    }

    graph
}

/// `rootCorpus/subCorpus1/doc1` with the sample graph
#[allow(dead_code)]
pub fn sample_document() -> Document {
    Document::new(
        CorpusPath::parse("salt:/rootCorpus/subCorpus1/doc1"),
        sample_graph(),
    )
}

/// Configuration mapping every sample layer to a foundry
#[allow(dead_code)]
pub fn mapped_config() -> ExportConfig {
    ExportConfig {
        foundry_mapping: FoundryMapping::parse(
            "morphology->TreeTagger, syntax->CoreNLP, base->Base, infstruct->Generic",
        ),
        ..ExportConfig::default()
    }
}

/// Add the eleven sample tokens with POS and lemma, named `<prefix>1`..
#[allow(dead_code)]
pub fn add_sample_tokens(graph: &mut DocumentGraph, text: TextId, prefix: &str) -> Vec<NodeId> {
    let mut tokens = Vec::new();
    for (i, (start, end, pos, lemma)) in SAMPLE_TOKENS.iter().enumerate() {
        let tok = graph
            .add_token(format!("{}{}", prefix, i + 1), text, *start, *end)
            .unwrap();
        graph.annotate(tok, Annotation::new(Some("salt"), "POS", *pos)).unwrap();
        graph.annotate(tok, Annotation::new(Some("salt"), "LEMMA", *lemma)).unwrap();
        graph.add_to_layer("morphology", tok).unwrap();
        tokens.push(tok);
    }
    tokens
}

/// Add a span over `tokens` carrying one annotation
#[allow(dead_code)]
pub fn add_span(
    graph: &mut DocumentGraph,
    name: &str,
    tokens: &[NodeId],
    ns: &str,
    anno: &str,
    value: &str,
) -> NodeId {
    let span = graph.add_node(name, NodeKind::Span).unwrap();
    for tok in tokens {
        graph.add_relation(RelationKind::Spanning, span, *tok).unwrap();
    }
    graph.annotate(span, Annotation::new(Some(ns), anno, value)).unwrap();
    span
}

#[allow(dead_code)]
pub fn add_structure(graph: &mut DocumentGraph, name: &str, cat: &str) -> NodeId {
    let id = graph.add_node(name, NodeKind::Structure).unwrap();
    graph.annotate(id, Annotation::new(Some("tiger"), "cat", cat)).unwrap();
    id
}

#[allow(dead_code)]
pub fn dominate(graph: &mut DocumentGraph, parent: NodeId, children: &[NodeId]) {
    for child in children {
        graph.add_relation(RelationKind::Dominance, parent, *child).unwrap();
    }
}

// ===== XML readers =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRow {
    pub id: String,
    pub from: usize,
    pub to: usize,
}

/// All `span` elements of a layer file
#[allow(dead_code)]
pub fn read_spans(path: &Path) -> Vec<SpanRow> {
    let xml = fs::read_to_string(path).unwrap();
    let doc = roxmltree::Document::parse(&xml).unwrap();
    doc.descendants()
        .filter(|n| n.has_tag_name("span"))
        .map(|n| SpanRow {
            id: n.attribute("id").unwrap().to_string(),
            from: n.attribute("from").unwrap().parse().unwrap(),
            to: n.attribute("to").unwrap().parse().unwrap(),
        })
        .collect()
}

/// `(label, target)` of every `rel` under the span with the given ID
#[allow(dead_code)]
pub fn read_relations(path: &Path, span_id: &str) -> Vec<(String, String)> {
    let xml = fs::read_to_string(path).unwrap();
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let span = doc
        .descendants()
        .find(|n| n.has_tag_name("span") && n.attribute("id") == Some(span_id))
        .unwrap();
    span.children()
        .filter(|n| n.has_tag_name("rel"))
        .map(|n| {
            (
                n.attribute("label").unwrap().to_string(),
                n.attribute("target").unwrap().to_string(),
            )
        })
        .collect()
}

/// `(namespace, name, value)` of every leaf feature under the given span
///
/// A leaf feature is an `f` without element children; its namespace is the
/// `type` of the enclosing `fs`.
#[allow(dead_code)]
pub fn read_features(path: &Path, span_id: &str) -> Vec<(String, String, String)> {
    let xml = fs::read_to_string(path).unwrap();
    let doc = roxmltree::Document::parse(&xml).unwrap();
    let span = doc
        .descendants()
        .find(|n| n.has_tag_name("span") && n.attribute("id") == Some(span_id))
        .unwrap();
    span.descendants()
        .filter(|n| n.has_tag_name("f") && !n.children().any(|c| c.is_element()))
        .map(|f| {
            let fs = f.parent_element().unwrap();
            (
                fs.attribute("type").unwrap().to_string(),
                f.attribute("name").unwrap().to_string(),
                f.text().unwrap_or("").to_string(),
            )
        })
        .collect()
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{add_sample_tokens, add_structure, dominate, mapped_config, sample_graph, SAMPLE_TEXT};
use korapxml_core::errors::KorapError;
use korapxml_core::logging_facility::test_capture::init_test_capture;
use korapxml_core::model::DocumentGraph;
use korapxml_core::types::schema::{EVENT_END, EVENT_END_ERROR, EVENT_SKIP, EVENT_START};
use korapxml_core::{
    log_op_end, log_op_error, log_op_start, log_skip, CorpusPath, Document, ExportConfig,
    Exporter, FoundryMapping,
};
use tempfile::TempDir;

// ===== Macros =====

#[test]
fn test_op_boundaries_carry_fields() {
    let capture = init_test_capture();
    let doc_id = "macroCorpus_macroDoc.t1";

    log_op_start!("write_layer", doc_id = doc_id, layer = "morphology");
    log_op_end!("write_layer", duration_ms = 42, doc_id = doc_id, span_count = 11usize);

    let events = capture.op_events("write_layer", doc_id);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event(), Some(EVENT_START));
    assert_eq!(events[0].field("layer"), Some("morphology"));
    assert_eq!(events[1].event(), Some(EVENT_END));
    assert_eq!(events[1].field("duration_ms"), Some("42"));
    assert_eq!(events[1].field("span_count"), Some("11"));
}

#[test]
fn test_log_op_error_records_code() {
    let capture = init_test_capture();
    let doc_id = "macroCorpus_macroDoc.t2";

    let err = KorapError::FileWrite {
        path: "base/token.xml".to_string(),
        message: "disk full".to_string(),
    };
    log_op_error!("write_file", err, duration_ms = 0u64, doc_id = doc_id);

    let events = capture.op_events("write_file", doc_id);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event(), Some(EVENT_END_ERROR));
    assert_eq!(events[0].level, tracing::Level::ERROR);
    assert_eq!(events[0].field("err.code"), Some("ERR_IO"));
}

#[test]
fn test_log_skip_records_node_and_code() {
    let capture = init_test_capture();

    let err = KorapError::AmbiguousSpan {
        node_id: "macroSkipSpan".to_string(),
        sequences: 2,
    };
    log_skip!("write_layer", err, node_id = "macroSkipSpan", layer = "syntax");

    let skips = capture.skips_for_node("macroSkipSpan");
    assert_eq!(skips.len(), 1);
    assert_eq!(skips[0].op(), Some("write_layer"));
    assert_eq!(skips[0].event(), Some(EVENT_SKIP));
    assert_eq!(skips[0].level, tracing::Level::WARN);
    assert_eq!(skips[0].field("err.code"), Some("ERR_AMBIGUOUS_SPAN"));
    assert_eq!(skips[0].field("layer"), Some("syntax"));
}

// ===== Events emitted by an export =====

#[test]
fn test_export_logs_one_start_and_end_per_layer_file() {
    let capture = init_test_capture();
    let temp_dir = TempDir::new().unwrap();
    let doc = Document::new(CorpusPath::parse("logCorpus/logDoc1"), sample_graph());

    Exporter::new(mapped_config())
        .export_document(&doc, temp_dir.path())
        .unwrap();

    let events = capture.op_events("write_layer", "logCorpus_logDoc1.sText1");
    let starts = events.iter().filter(|e| e.event() == Some(EVENT_START)).count();
    let ends: Vec<_> = events.iter().filter(|e| e.event() == Some(EVENT_END)).collect();
    assert_eq!(starts, 5);
    assert_eq!(ends.len(), 5);

    let morpho = ends
        .iter()
        .find(|e| e.field("file") == Some("tree_tagger/morpho.xml"))
        .expect("morpho layer end event");
    assert_eq!(morpho.field("span_count"), Some("11"));
    assert_eq!(morpho.field("skipped"), Some("0"));
}

#[test]
fn test_dominance_cycle_is_logged_as_skip() {
    let capture = init_test_capture();
    let mut graph = DocumentGraph::new();
    let text = graph.add_text("sText1", SAMPLE_TEXT).unwrap();
    let tokens = add_sample_tokens(&mut graph, text, "logCycTok");
    let a = add_structure(&mut graph, "logCycA", "NP");
    let b = add_structure(&mut graph, "logCycB", "VP");
    dominate(&mut graph, a, &[tokens[0], b]);
    dominate(&mut graph, b, &[a]);
    graph.add_to_layer("syntax", a).unwrap();
    graph.add_to_layer("syntax", b).unwrap();

    let config = ExportConfig {
        foundry_mapping: FoundryMapping::parse("syntax->CoreNLP"),
        ..ExportConfig::default()
    };
    let temp_dir = TempDir::new().unwrap();
    let doc = Document::new(CorpusPath::parse("logCorpus/logCycle"), graph);
    let report = Exporter::new(config)
        .export_document(&doc, temp_dir.path())
        .unwrap();

    assert_eq!(report.texts[0].skipped_nodes(), 2);
    for node in ["logCycA", "logCycB"] {
        let skips = capture.skips_for_node(node);
        assert_eq!(skips.len(), 1, "skip events for {}", node);
        assert_eq!(skips[0].field("err.code"), Some("ERR_CYCLE_DETECTED"));
        assert_eq!(skips[0].field("doc_id"), Some("logCorpus_logCycle.sText1"));
    }
}

#[test]
fn test_fatal_document_error_is_logged() {
    let capture = init_test_capture();
    let temp_dir = TempDir::new().unwrap();
    let doc = Document::new(CorpusPath::parse("logLonelyDoc"), sample_graph());

    Exporter::new(ExportConfig::default())
        .export_document(&doc, temp_dir.path())
        .unwrap_err();

    let failures: Vec<_> = capture
        .with_error_code("ERR_INVALID_CORPUS_PATH")
        .into_iter()
        .filter(|e| e.field("path") == Some("logLonelyDoc"))
        .collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].op(), Some("export_document"));
    assert_eq!(failures[0].event(), Some(EVENT_END_ERROR));
}

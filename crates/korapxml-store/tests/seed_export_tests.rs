#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{fixtures_dir, span_ids};
use korapxml_core::{ExErrorKind, Exporter, KorapError};
use korapxml_store::{document_dir, load_config, load_document, parse_seed_file};
use tempfile::TempDir;

#[test]
fn test_load_sample_document() {
    let doc = load_document(&fixtures_dir().join("sample_doc.yaml")).unwrap();

    assert_eq!(doc.path.to_string(), "rootCorpus/subCorpus1/doc1");
    assert_eq!(doc.graph.text_ids().count(), 1);
    assert_eq!(doc.graph.node_count(), 11 + 3 + 3);
    let layers: Vec<&str> = doc.graph.layers().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(layers, ["morphology", "base", "infstruct", "syntax"]);
}

#[test]
fn test_reject_invalid_schema_version() {
    let err = parse_seed_file(&fixtures_dir().join("seed_invalid_schema_version.yaml")).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(err.to_string().contains("schema_version"));
}

#[test]
fn test_reject_missing_seed_file() {
    let err = load_document(&fixtures_dir().join("does_not_exist.yaml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read seed file"));
}

#[test]
fn test_seed_to_corpus_directory() {
    let out = TempDir::new().unwrap();
    let doc = load_document(&fixtures_dir().join("sample_doc.yaml")).unwrap();
    let config = load_config(&fixtures_dir().join("export.yaml")).unwrap();

    let dir = document_dir(out.path(), &doc.path).unwrap();
    let report = Exporter::new(config).export_document(&doc, &dir).unwrap();

    let text_dir = out.path().join("rootCorpus/subCorpus1/doc1/sText1");
    assert_eq!(report.texts[0].dir, text_dir);
    assert_eq!(report.texts[0].doc_id, "rootCorpus_doc1.sText1");

    for file in [
        "data.xml",
        "base/token.xml",
        "base/sentences.xml",
        "tree_tagger/morpho.xml",
        "corenlp/constituency.xml",
        "salt/Inf-Struct.xml",
    ] {
        assert!(text_dir.join(file).is_file(), "missing {}", file);
    }
    assert!(!text_dir.join("base/paragraph.xml").exists());

    assert_eq!(
        span_ids(&text_dir.join("corenlp/constituency.xml")),
        ["structRoot", "structSq", "structNp"]
    );
    assert_eq!(
        span_ids(&text_dir.join("salt/Inf-Struct.xml")),
        ["sSpan1", "sSpan2"]
    );
    assert_eq!(span_ids(&text_dir.join("base/token.xml")).len(), 11);
}

#[test]
fn test_short_corpus_path_is_fatal_for_document() {
    let out = TempDir::new().unwrap();
    let doc = load_document(&fixtures_dir().join("short_path.json")).unwrap();

    let dir = document_dir(out.path(), &doc.path).unwrap();
    let err = Exporter::new(Default::default())
        .export_document(&doc, &dir)
        .unwrap_err();

    assert!(matches!(err, KorapError::InvalidCorpusPath { segments: 1, .. }));
    assert!(!dir.join("t1").exists());
}

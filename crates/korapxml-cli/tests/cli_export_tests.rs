//! CLI export integration tests
//!
//! These tests run the `korapxml` binary against seed files written into a
//! temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SEED: &str = r#"
schema_version: 0
path: salt:/corpus/news/doc_1
texts:
  - { name: text1, content: "Hallo Welt" }
tokens:
  - { id: tok1, text: text1, start: 0, end: 5, annotations: ["salt::POS=ITJ", "salt::LEMMA=hallo"] }
  - { id: tok2, text: text1, start: 6, end: 10, annotations: ["salt::POS=NN", "salt::LEMMA=Welt"] }
spans:
  - { id: s1, tokens: [tok1, tok2], annotations: ["salt::SENTENCE=s"] }
layers:
  - { name: morphology, nodes: [tok1, tok2] }
  - { name: base, nodes: [s1] }
"#;

fn write_seed(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_korapxml");
    Command::new(cli_bin)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_cli_export_writes_corpus_tree() {
    let temp_dir = TempDir::new().unwrap();
    let seed = write_seed(temp_dir.path(), "doc1.yaml", SEED);
    let out = temp_dir.path().join("out");

    let output = run(&[
        "export",
        seed.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--foundry",
        "morphology->TreeTagger, base->Base",
    ]);

    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let text_dir = out.join("corpus/news/doc1/text1");
    assert!(text_dir.join("data.xml").is_file());
    assert!(text_dir.join("base/token.xml").is_file());
    assert!(text_dir.join("base/sentences.xml").is_file());
    assert!(text_dir.join("tree_tagger/morpho.xml").is_file());

    let data = fs::read_to_string(text_dir.join("data.xml")).unwrap();
    assert!(data.contains(r#"docid="corpus_doc1.text1""#));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("corpus/news/doc_1"), "stdout: {}", stdout);
}

#[test]
fn test_cli_export_with_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let seed = write_seed(temp_dir.path(), "doc1.yaml", SEED);
    let config = write_seed(
        temp_dir.path(),
        "export.yaml",
        "foundry_mapping:\n  - { layer: morphology, foundry: TreeTagger }\n",
    );
    let out = temp_dir.path().join("out");

    let output = run(&[
        "export",
        seed.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let text_dir = out.join("corpus/news/doc1/text1");
    assert!(text_dir.join("tree_tagger/morpho.xml").is_file());
    assert!(!text_dir.join("base/sentences.xml").exists());
}

#[test]
fn test_cli_export_reads_seed_directory() {
    let temp_dir = TempDir::new().unwrap();
    let seeds = temp_dir.path().join("seeds");
    fs::create_dir_all(&seeds).unwrap();
    write_seed(&seeds, "a.yaml", SEED);
    write_seed(
        &seeds,
        "b.yaml",
        &SEED.replace("doc_1", "doc2").replace("text1", "text2"),
    );
    write_seed(&seeds, "notes.txt", "ignored");
    let out = temp_dir.path().join("out");

    let output = run(&[
        "export",
        seeds.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert!(out.join("corpus/news/doc1/text1/data.xml").is_file());
    assert!(out.join("corpus/news/doc2/text2/data.xml").is_file());
}

#[test]
fn test_cli_export_fails_on_short_corpus_path() {
    let temp_dir = TempDir::new().unwrap();
    let good = write_seed(temp_dir.path(), "good.yaml", SEED);
    let bad = write_seed(
        temp_dir.path(),
        "bad.yaml",
        &SEED.replace("salt:/corpus/news/doc_1", "salt:/lonely"),
    );
    let out = temp_dir.path().join("out");

    let output = run(&[
        "export",
        bad.to_str().unwrap(),
        good.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Can't generate a valid document ID"), "stderr: {}", stderr);
    assert!(stderr.contains("1 document(s) failed"));

    // The other document is still exported
    assert!(out.join("corpus/news/doc1/text1/data.xml").is_file());
}

#[test]
fn test_cli_export_rejects_invalid_seed() {
    let temp_dir = TempDir::new().unwrap();
    let seed = write_seed(temp_dir.path(), "doc1.yaml", "schema_version: 0\npath: c/d\n");

    let output = run(&[
        "export",
        seed.to_str().unwrap(),
        "--out",
        temp_dir.path().join("out").to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("YAML parse error"));
}

#[test]
fn test_cli_foundries_lists_builtins() {
    let output = run(&["foundries"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(names, ["Base", "TreeTagger", "CoreNLP", "Generic"]);
}

//! Output directory layout
//!
//! Every segment of a document's corpus path becomes one nested folder
//! below the output root. Corpus folders keep their names; the document
//! folder is sanitized like document IDs:
//! `rootCorpus/sub_Corpus/doc.1` lands in `<root>/rootCorpus/sub_Corpus/doc1`.

use std::fs;
use std::path::{Path, PathBuf};

use korapxml_core::errors::{directory_error, ExError};
use korapxml_core::{sanitize, CorpusPath};

use crate::errors::Result;

/// Directory of a document below `root`, without touching the filesystem
///
/// A document name that sanitizes to nothing adds no folder, and `.`/`..`
/// corpus names are ignored so the result stays below `root`.
pub fn document_path(root: &Path, path: &CorpusPath) -> PathBuf {
    let Some((document, corpora)) = path.segments().split_last() else {
        return root.to_path_buf();
    };
    let dir = corpora
        .iter()
        .filter(|corpus| !matches!(corpus.as_str(), "." | ".."))
        .fold(root.to_path_buf(), |dir, corpus| dir.join(corpus));
    match sanitize(document) {
        leaf if leaf.is_empty() => dir,
        leaf => dir.join(leaf),
    }
}

/// Mirror `path` below `root`, creating missing folders
///
/// # Errors
///
/// Returns a `DirectoryCreation` error if a folder cannot be created.
pub fn document_dir(root: &Path, path: &CorpusPath) -> Result<PathBuf> {
    let dir = document_path(root, path);
    fs::create_dir_all(&dir).map_err(|e| ExError::from(directory_error(&dir, e)))?;
    Ok(dir)
}

//! Foundries: annotation sources that decide which nodes end up in which
//! layer file, and in what shape
//!
//! A foundry selects nodes from a layer, names the output file
//! (`<foundry>/<layer>.xml`), picks an annotation shape and optionally
//! turns relations into `rel` references. The provided [`Foundry::map`]
//! drives selection and the layer writer.

pub mod base;
pub mod corenlp;
pub mod generic;
pub mod registry;
pub mod tree_tagger;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use crate::config::ExportConfig;
use crate::errors::KorapError;
use crate::model::{DocumentGraph, Node, NodeId, RelationKind, TextId};
use crate::render::{write_layer, AnnotationShape};
use crate::traversal::{reaches_text, DEFAULT_TRAVERSAL};
use crate::types::format::XML_EXTENSION;
use crate::{log_op_end, log_op_error, log_op_start};

pub use base::Base;
pub use corenlp::CoreNlp;
pub use generic::Generic;
pub use registry::FoundryRegistry;
pub use tree_tagger::TreeTagger;

/// Output file of a foundry, relative to the text directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerFile {
    pub foundry: String,
    pub layer: String,
}

impl LayerFile {
    pub fn new(foundry: impl Into<String>, layer: impl Into<String>) -> Self {
        Self {
            foundry: foundry.into(),
            layer: layer.into(),
        }
    }

    /// `<foundry>/<layer>.xml`
    pub fn relative_path(&self) -> PathBuf {
        Path::new(&self.foundry).join(format!("{}.{}", self.layer, XML_EXTENSION))
    }
}

impl fmt::Display for LayerFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.foundry, self.layer)
    }
}

/// Nodes a foundry writes into one file
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub file: LayerFile,
    pub nodes: Vec<NodeId>,
}

/// A `rel` element under a span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRef {
    pub label: String,
    /// Fragment ID of the destination, prefixed `<file>#` when it lives in
    /// another file
    pub target: String,
}

/// Everything a foundry needs to export one text
pub struct TextContext<'a> {
    pub graph: &'a DocumentGraph,
    pub text: TextId,
    pub doc_id: &'a str,
    pub text_dir: &'a Path,
    pub config: &'a ExportConfig,
}

/// Outcome of one layer file
#[derive(Debug, Clone, PartialEq)]
pub enum FileStatus {
    Written { spans: usize, skipped: usize },
    /// Nothing selected; no file was created
    Empty,
    /// The file was abandoned
    Failed(KorapError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub foundry: String,
    /// Path relative to the text directory
    pub file: PathBuf,
    pub status: FileStatus,
}

/// An annotation source mapped onto KorAP-XML layer files
pub trait Foundry: Send + Sync {
    /// Registry name, e.g. `TreeTagger`
    fn name(&self) -> &str;

    /// Partition candidate nodes into output files
    fn select_nodes(
        &self,
        graph: &DocumentGraph,
        candidates: &[NodeId],
        text: TextId,
        config: &ExportConfig,
    ) -> Vec<Selection>;

    fn annotation_shape(&self) -> AnnotationShape {
        AnnotationShape::Flat
    }

    /// Relations of `node` written as `rel` elements
    fn relations_for(
        &self,
        _graph: &DocumentGraph,
        _node: NodeId,
        _config: &ExportConfig,
    ) -> Vec<RelationRef> {
        Vec::new()
    }

    /// Relation kinds followed when resolving a node's range
    fn traversal(&self) -> &[RelationKind] {
        DEFAULT_TRAVERSAL
    }

    /// Select nodes and write one layer file per selection
    ///
    /// Empty selections and failed files are logged and reported; they
    /// never stop the remaining selections.
    fn map(&self, ctx: &TextContext<'_>, candidates: &[NodeId]) -> Vec<FileReport> {
        let mut reports = Vec::new();

        for selection in self.select_nodes(ctx.graph, candidates, ctx.text, ctx.config) {
            let file = selection.file.relative_path();

            if selection.nodes.is_empty() {
                tracing::warn!(
                    doc_id = ctx.doc_id,
                    foundry = self.name(),
                    layer = %selection.file,
                    "Nothing to map for span layer \"{}\"",
                    selection.file
                );
                reports.push(FileReport {
                    foundry: self.name().to_string(),
                    file,
                    status: FileStatus::Empty,
                });
                continue;
            }

            let start = Instant::now();
            log_op_start!("write_layer", doc_id = ctx.doc_id, file = %file.display());
            let status = match write_layer(&ctx.text_dir.join(&file), ctx, &selection.nodes, self) {
                Ok(outcome) => {
                    log_op_end!(
                        "write_layer",
                        duration_ms = start.elapsed().as_millis() as u64,
                        doc_id = ctx.doc_id,
                        file = %file.display(),
                        span_count = outcome.written,
                        skipped = outcome.skipped
                    );
                    FileStatus::Written {
                        spans: outcome.written,
                        skipped: outcome.skipped,
                    }
                }
                Err(err) => {
                    log_op_error!(
                        "write_layer",
                        err.clone(),
                        duration_ms = start.elapsed().as_millis() as u64,
                        doc_id = ctx.doc_id,
                        file = %file.display()
                    );
                    FileStatus::Failed(err)
                }
            };

            reports.push(FileReport {
                foundry: self.name().to_string(),
                file,
                status,
            });
        }

        reports
    }
}

/// Candidates passing `keep` whose range reaches a token of `text`
///
/// Filtering runs in parallel; the result keeps candidate order.
pub fn nodes_in_text<P>(
    graph: &DocumentGraph,
    candidates: &[NodeId],
    text: TextId,
    traversal: &[RelationKind],
    keep: P,
) -> Vec<NodeId>
where
    P: Fn(&Node) -> bool + Sync,
{
    candidates
        .par_iter()
        .copied()
        .filter(|&id| keep(graph.node(id)) && reaches_text(graph, id, text, traversal))
        .collect()
}

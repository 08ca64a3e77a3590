//! Annotation layer files (`<foundry>/<layer>.xml`)

use std::io::Write;
use std::path::{Path, PathBuf};

use quick_xml::Writer;

use super::features::{write_feature_structures, AnnotationShape};
use super::sink::AtomicFile;
use super::xml::{self, INDENT_CHAR};
use crate::errors::{file_error, Result};
use crate::foundry::{Foundry, RelationRef, TextContext};
use crate::ids::node_fragment_id;
use crate::log_skip;
use crate::model::NodeId;
use crate::traversal::{resolve_range, TextRange};
use crate::types::format::KORAP_VERSION;

/// Result of writing one layer file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerOutcome {
    pub path: PathBuf,
    pub written: usize,
    pub skipped: usize,
}

/// Stream one layer file for `nodes`
///
/// Every node is resolved against the exported text first. Nodes that do
/// not resolve to exactly one range in that text are logged and skipped;
/// the rest of the file is still written.
///
/// # Errors
///
/// Returns `FileWrite` if the file cannot be created, written or committed.
/// Nothing is left at `path` in that case.
pub fn write_layer<F: Foundry + ?Sized>(
    path: &Path,
    ctx: &TextContext<'_>,
    nodes: &[NodeId],
    foundry: &F,
) -> Result<LayerOutcome> {
    let to_file_err = |e: quick_xml::Error| file_error(path, e);
    let shape = foundry.annotation_shape();

    let mut out = Writer::new_with_indent(AtomicFile::create(path)?, INDENT_CHAR, 1);
    xml::declaration(&mut out).map_err(to_file_err)?;
    xml::start_root(
        &mut out,
        "layer",
        &[("docid", ctx.doc_id), ("version", KORAP_VERSION)],
    )
    .map_err(to_file_err)?;
    xml::start(&mut out, "spanList", &[]).map_err(to_file_err)?;

    let mut written = 0;
    let mut skipped = 0;
    for &node in nodes {
        let range = match resolve_range(ctx.graph, node, ctx.text, foundry.traversal()) {
            Ok(range) => range,
            Err(err) => {
                log_skip!(
                    "write_layer",
                    err,
                    doc_id = ctx.doc_id,
                    node_id = node_fragment_id(ctx.graph, node),
                    foundry = foundry.name(),
                    file = %path.display()
                );
                skipped += 1;
                continue;
            }
        };

        let relations = foundry.relations_for(ctx.graph, node, ctx.config);
        write_span(&mut out, ctx, node, range, &shape, &relations).map_err(to_file_err)?;
        written += 1;
    }

    xml::end(&mut out, "spanList").map_err(to_file_err)?;
    xml::end(&mut out, "layer").map_err(to_file_err)?;

    let path = out.into_inner().commit()?;
    Ok(LayerOutcome {
        path,
        written,
        skipped,
    })
}

fn write_span<W: Write>(
    out: &mut Writer<W>,
    ctx: &TextContext<'_>,
    node: NodeId,
    range: TextRange,
    shape: &AnnotationShape,
    relations: &[RelationRef],
) -> quick_xml::Result<()> {
    let annotations = &ctx.graph.node(node).annotations;
    let from = range.start.to_string();
    let to = range.end.to_string();
    let attributes = [
        ("id", node_fragment_id(ctx.graph, node)),
        ("from", from.as_str()),
        ("to", to.as_str()),
    ];

    if annotations.is_empty() && relations.is_empty() {
        return xml::empty(out, "span", &attributes);
    }

    xml::start(out, "span", &attributes)?;
    write_feature_structures(out, annotations, shape)?;
    for rel in relations {
        xml::empty(
            out,
            "rel",
            &[("label", rel.label.as_str()), ("target", rel.target.as_str())],
        )?;
    }
    xml::end(out, "span")
}

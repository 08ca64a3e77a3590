//! `data.xml` and `base/token.xml`

use std::path::{Path, PathBuf};

use quick_xml::Writer;

use super::sink::AtomicFile;
use super::xml::{self, INDENT_CHAR};
use crate::errors::{file_error, Result};
use crate::ids::node_fragment_id;
use crate::model::{DocumentGraph, TextId};
use crate::types::format::{BASE_FOUNDRY, DATA_FILE, KORAP_VERSION, TOKEN_LAYER, XML_EXTENSION};

/// Relative location of the token file inside a text directory
pub fn token_file() -> PathBuf {
    Path::new(BASE_FOUNDRY).join(format!("{}.{}", TOKEN_LAYER, XML_EXTENSION))
}

/// Write the raw text of `text` to `<dir>/data.xml`
///
/// The content is written without indentation so that it parses back to
/// exactly the original characters.
pub fn write_text(dir: &Path, doc_id: &str, graph: &DocumentGraph, text: TextId) -> Result<PathBuf> {
    let path = dir.join(DATA_FILE);
    let to_file_err = |e: quick_xml::Error| file_error(&path, e);

    let mut out = Writer::new(AtomicFile::create(&path)?);
    xml::declaration(&mut out).map_err(to_file_err)?;
    xml::start_root(&mut out, "raw_text", &[("docid", doc_id)]).map_err(to_file_err)?;
    xml::start(&mut out, "text", &[]).map_err(to_file_err)?;
    xml::text(&mut out, &graph.text(text).content).map_err(to_file_err)?;
    xml::end(&mut out, "text").map_err(to_file_err)?;
    xml::end(&mut out, "raw_text").map_err(to_file_err)?;

    out.into_inner().commit()
}

/// Write one span per token anchored in `text` to `<dir>/base/token.xml`
///
/// Spans follow anchoring order and carry no annotations. Returns the path
/// and the number of spans written.
pub fn write_tokens(
    dir: &Path,
    doc_id: &str,
    graph: &DocumentGraph,
    text: TextId,
) -> Result<(PathBuf, usize)> {
    let path = dir.join(token_file());
    let to_file_err = |e: quick_xml::Error| file_error(&path, e);

    let mut out = Writer::new_with_indent(AtomicFile::create(&path)?, INDENT_CHAR, 1);
    xml::declaration(&mut out).map_err(to_file_err)?;
    xml::start_root(
        &mut out,
        "layer",
        &[("docid", doc_id), ("version", KORAP_VERSION)],
    )
    .map_err(to_file_err)?;
    xml::start(&mut out, "spanList", &[]).map_err(to_file_err)?;

    let mut count = 0;
    for rel in graph.tokens_of(text) {
        let from = rel.start.to_string();
        let to = rel.end.to_string();
        xml::empty(
            &mut out,
            "span",
            &[
                ("id", node_fragment_id(graph, rel.token)),
                ("from", from.as_str()),
                ("to", to.as_str()),
            ],
        )
        .map_err(to_file_err)?;
        count += 1;
    }

    xml::end(&mut out, "spanList").map_err(to_file_err)?;
    xml::end(&mut out, "layer").map_err(to_file_err)?;

    let path = out.into_inner().commit()?;
    Ok((path, count))
}

//! Feature structure blocks (`fs` / `f`) for node annotations

use std::io::Write;

use quick_xml::Writer;

use super::xml;
use crate::model::Annotation;

/// How a foundry lays out the annotations of one node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnnotationShape {
    /// `fs[type=ns] > f[name]*`
    #[default]
    Flat,
    /// `fs[type=T] > f[name=T] > fs[type=ns] > f[name]*`
    Wrapped(String),
}

/// Partition annotations by namespace
///
/// Namespaces appear in first-seen order, as do the annotations within
/// each group. A missing namespace groups under `""`.
pub fn group_by_namespace(annotations: &[Annotation]) -> Vec<(&str, Vec<&Annotation>)> {
    let mut groups: Vec<(&str, Vec<&Annotation>)> = Vec::new();
    for anno in annotations {
        let ns = anno.namespace_or_empty();
        match groups.iter_mut().find(|(key, _)| *key == ns) {
            Some((_, members)) => members.push(anno),
            None => groups.push((ns, vec![anno])),
        }
    }
    groups
}

/// Write one feature structure per namespace in the given shape
///
/// Nothing is written for an empty annotation list.
pub fn write_feature_structures<W: Write>(
    out: &mut Writer<W>,
    annotations: &[Annotation],
    shape: &AnnotationShape,
) -> quick_xml::Result<()> {
    for (ns, members) in group_by_namespace(annotations) {
        match shape {
            AnnotationShape::Flat => write_fs(out, ns, &members)?,
            AnnotationShape::Wrapped(wrapper) => {
                xml::start(out, "fs", &[("type", wrapper.as_str())])?;
                xml::start(out, "f", &[("name", wrapper.as_str())])?;
                write_fs(out, ns, &members)?;
                xml::end(out, "f")?;
                xml::end(out, "fs")?;
            }
        }
    }
    Ok(())
}

fn write_fs<W: Write>(out: &mut Writer<W>, ns: &str, members: &[&Annotation]) -> quick_xml::Result<()> {
    xml::start(out, "fs", &[("type", ns)])?;
    for anno in members {
        xml::start(out, "f", &[("name", anno.name.as_str())])?;
        xml::text(out, &anno.value)?;
        xml::end(out, "f")?;
    }
    xml::end(out, "fs")
}

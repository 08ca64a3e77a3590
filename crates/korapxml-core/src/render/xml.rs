//! Thin helpers over the quick-xml event writer

use std::borrow::Cow;
use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::types::format::NS_URI;

/// Indentation of layer files: one tab per nesting level
pub const INDENT_CHAR: u8 = b'\t';

pub fn declaration<W: Write>(xml: &mut Writer<W>) -> quick_xml::Result<()> {
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
}

/// Open the root element, declaring the KorAP default namespace
pub fn start_root<W: Write>(
    xml: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
) -> quick_xml::Result<()> {
    let element = BytesStart::new(name)
        .with_attributes([("xmlns", NS_URI)])
        .with_attributes(attributes.iter().copied());
    xml.write_event(Event::Start(element))
}

pub fn start<W: Write>(
    xml: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
) -> quick_xml::Result<()> {
    let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
    xml.write_event(Event::Start(element))
}

pub fn empty<W: Write>(
    xml: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
) -> quick_xml::Result<()> {
    let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
    xml.write_event(Event::Empty(element))
}

pub fn end<W: Write>(xml: &mut Writer<W>, name: &str) -> quick_xml::Result<()> {
    xml.write_event(Event::End(BytesEnd::new(name)))
}

/// Write character data so that it parses back to exactly `content`
pub fn text<W: Write>(xml: &mut Writer<W>, content: &str) -> quick_xml::Result<()> {
    if content.is_empty() {
        return Ok(());
    }
    xml.write_event(Event::Text(BytesText::from_escaped(escape_text(content))))
}

/// Escape markup characters and carriage returns
///
/// XML parsers normalise a literal `\r` to `\n`, so it is written as a
/// character reference.
pub fn escape_text(content: &str) -> Cow<'_, str> {
    let escaped = quick_xml::escape::escape(content);
    if escaped.contains('\r') {
        Cow::Owned(escaped.replace('\r', "&#13;"))
    } else {
        escaped
    }
}

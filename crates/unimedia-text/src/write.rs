//! Small wrappers over `quick-xml`'s event writer.

use std::io::Write;

use quick_xml::{
  Writer,
  events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::{Result, xml_err};

/// A writer that indents nested elements by two spaces.
pub(crate) fn indented<W: Write>(inner: W) -> Writer<W> {
  Writer::new_with_indent(inner, b' ', 2)
}

pub(crate) fn decl<W: Write>(
  w: &mut Writer<W>,
  standalone: Option<&str>,
) -> Result<()> {
  w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), standalone)))
    .map_err(xml_err)
}

fn element<'a>(tag: &'a str, attrs: &[(&str, &str)]) -> BytesStart<'a> {
  let mut el = BytesStart::new(tag);
  for (k, v) in attrs {
    el.push_attribute((*k, *v));
  }
  el
}

pub(crate) fn start<W: Write>(
  w: &mut Writer<W>,
  tag: &str,
  attrs: &[(&str, &str)],
) -> Result<()> {
  w.write_event(Event::Start(element(tag, attrs)))
    .map_err(xml_err)
}

pub(crate) fn end<W: Write>(w: &mut Writer<W>, tag: &str) -> Result<()> {
  w.write_event(Event::End(BytesEnd::new(tag))).map_err(xml_err)
}

pub(crate) fn empty<W: Write>(
  w: &mut Writer<W>,
  tag: &str,
  attrs: &[(&str, &str)],
) -> Result<()> {
  w.write_event(Event::Empty(element(tag, attrs)))
    .map_err(xml_err)
}

/// `<tag>text</tag>`, with `text` escaped.
pub(crate) fn text_elem<W: Write>(
  w: &mut Writer<W>,
  tag: &str,
  text: &str,
) -> Result<()> {
  start(w, tag, &[])?;
  w.write_event(Event::Text(BytesText::new(text)))
    .map_err(xml_err)?;
  end(w, tag)
}

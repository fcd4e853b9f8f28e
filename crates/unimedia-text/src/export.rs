//! Write-only media listings.
//!
//! These exports are for people and spreadsheets; nothing reads them back.

use std::{
  fs::File,
  io::{BufWriter, Write},
  path::Path,
};

use unimedia_core::media::Media;

use crate::{error::Result, write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
  Xml,
  Csv,
}

pub fn export_media<W: Write>(
  format: ExportFormat,
  media: &[Media],
  out: W,
) -> Result<()> {
  match format {
    ExportFormat::Xml => write_xml(media, out),
    ExportFormat::Csv => write_csv(media, out),
  }
}

pub fn export_media_to_path(
  format: ExportFormat,
  media: &[Media],
  path: impl AsRef<Path>,
) -> Result<()> {
  let path = path.as_ref();
  let mut out = BufWriter::new(File::create(path)?);
  export_media(format, media, &mut out)?;
  out.flush()?;
  tracing::info!(path = %path.display(), count = media.len(), ?format, "media exported");
  Ok(())
}

// ─── XML ─────────────────────────────────────────────────────────────────────

fn write_xml<W: Write>(media: &[Media], out: W) -> Result<()> {
  let mut w = write::indented(out);
  write::decl(&mut w, None)?;
  write::start(&mut w, "mediaLibrary", &[])?;

  for m in media {
    write::start(&mut w, "media", &[
      ("id", m.id.as_str()),
      ("type", m.type_label()),
    ])?;
    write::text_elem(&mut w, "title", &m.title)?;
    write::text_elem(&mut w, "author", &m.author)?;
    write::text_elem(&mut w, "year", &m.publication_year.to_string())?;
    write::text_elem(&mut w, "description", &m.description)?;
    write::text_elem(&mut w, "accessCount", &m.access_count().to_string())?;
    if m.subjects.is_empty() {
      write::empty(&mut w, "subjects", &[])?;
    } else {
      write::start(&mut w, "subjects", &[])?;
      for code in &m.subjects {
        write::text_elem(&mut w, "subject", code)?;
      }
      write::end(&mut w, "subjects")?;
    }
    write::end(&mut w, "media")?;
  }

  write::end(&mut w, "mediaLibrary")?;
  w.into_inner().write_all(b"\n")?;
  Ok(())
}

// ─── CSV ─────────────────────────────────────────────────────────────────────

const CSV_HEADER: &str = "ID,Type,Title,Author,Year,Description,AccessCount,Subjects";

/// Quote a field, doubling embedded quotes.
fn quote(field: &str) -> String { format!("\"{}\"", field.replace('"', "\"\"")) }

fn write_csv<W: Write>(media: &[Media], mut out: W) -> Result<()> {
  writeln!(out, "{CSV_HEADER}")?;
  for m in media {
    let subjects = m
      .subjects
      .iter()
      .map(String::as_str)
      .collect::<Vec<_>>()
      .join(";");
    writeln!(
      out,
      "{},{},{},{},{},{},{},{}",
      quote(&m.id),
      quote(m.type_label()),
      quote(&m.title),
      quote(&m.author),
      m.publication_year,
      quote(&m.description),
      m.access_count(),
      quote(&subjects),
    )?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use unimedia_core::media::MediaKind;

  use super::*;

  fn sample() -> Vec<Media> {
    vec![
      Media::new(
        "DOC001",
        "Java \"Pro\" Programming",
        "John Doe",
        2023,
        "Intro, basics & more",
        MediaKind::Document { page_count: 350 },
      )
      .with_subject("NFA035")
      .with_subject("NFA032"),
      Media::new("VID001", "Data", "Jane", 2022, "", MediaKind::VideoSession {
        duration_minutes: 120,
      }),
    ]
  }

  #[test]
  fn csv_quotes_text_fields() {
    let mut out = Vec::new();
    export_media(ExportFormat::Csv, &sample(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(
      lines[1],
      "\"DOC001\",\"Document\",\"Java \"\"Pro\"\" Programming\",\"John \
       Doe\",2023,\"Intro, basics & more\",0,\"NFA032;NFA035\""
    );
    assert_eq!(
      lines[2],
      "\"VID001\",\"Video Session\",\"Data\",\"Jane\",2022,\"\",0,\"\""
    );
    assert_eq!(lines.len(), 3);
  }

  #[test]
  fn xml_lists_every_field() {
    let mut out = Vec::new();
    export_media(ExportFormat::Xml, &sample(), &mut out).unwrap();
    let xml = String::from_utf8(out).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<media id=\"DOC001\" type=\"Document\">"));
    assert!(xml.contains("Programming</title>"));
    assert!(xml.contains("<description>Intro, basics &amp; more</description>"));
    assert!(xml.contains("<year>2023</year>"));
    assert!(xml.contains("<accessCount>0</accessCount>"));
    assert!(xml.contains("<subject>NFA032</subject>"));
    assert!(xml.contains("<media id=\"VID001\" type=\"Video Session\">"));
    assert!(xml.contains("<subjects/>"));
  }
}

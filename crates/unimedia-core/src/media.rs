//! The catalogued items of the library.
//!
//! Every item shares a common header (id, title, author, year, description,
//! access count, subject codes). The variant-specific part lives in
//! [`MediaKind`].

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

// ─── Variants ────────────────────────────────────────────────────────────────

/// The variant-specific payload of a [`Media`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
  feature = "rkyv",
  derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaKind {
  Document {
    page_count: u32,
  },
  VideoSession {
    duration_minutes: u32,
  },
  OnlineQuiz {
    /// Estimated completion time in minutes.
    estimated_duration: u32,
    difficulty_level:   String,
  },
}

impl MediaKind {
  /// Human-readable type label, as shown in listings and exports.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Document { .. } => "Document",
      Self::VideoSession { .. } => "Video Session",
      Self::OnlineQuiz { .. } => "Online Quiz",
    }
  }

  /// One-line summary of the variant-specific fields.
  pub fn details(&self) -> String {
    match self {
      Self::Document { page_count } => format!("Pages: {page_count}"),
      Self::VideoSession { duration_minutes } => {
        format!("Duration: {duration_minutes} minutes")
      }
      Self::OnlineQuiz {
        estimated_duration,
        difficulty_level,
      } => format!(
        "Duration: {estimated_duration} minutes, Difficulty: {difficulty_level}"
      ),
    }
  }
}

// ─── Media ───────────────────────────────────────────────────────────────────

/// A catalogued item, identified by `id`.
///
/// `access_count` starts at zero and only ever grows; it is bumped by
/// [`crate::Library::get_media`] and has no public setter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
  feature = "rkyv",
  derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct Media {
  pub id:               String,
  pub title:            String,
  pub author:           String,
  pub publication_year: i32,
  pub description:      String,
  access_count:         u32,
  /// Codes of the subjects this item is filed under.
  pub subjects:         BTreeSet<String>,
  pub kind:             MediaKind,
}

impl Media {
  pub fn new(
    id: impl Into<String>,
    title: impl Into<String>,
    author: impl Into<String>,
    publication_year: i32,
    description: impl Into<String>,
    kind: MediaKind,
  ) -> Self {
    Self {
      id: id.into(),
      title: title.into(),
      author: author.into(),
      publication_year,
      description: description.into(),
      access_count: 0,
      subjects: BTreeSet::new(),
      kind,
    }
  }

  /// Builder-style helper that files the item under `code`.
  pub fn with_subject(mut self, code: impl Into<String>) -> Self {
    self.subjects.insert(code.into());
    self
  }

  pub fn access_count(&self) -> u32 { self.access_count }

  pub fn type_label(&self) -> &'static str { self.kind.label() }

  pub fn details(&self) -> String { self.kind.details() }

  pub fn add_subject(&mut self, code: impl Into<String>) {
    self.subjects.insert(code.into());
  }

  pub fn remove_subject(&mut self, code: &str) -> bool {
    self.subjects.remove(code)
  }

  pub fn has_subject(&self, code: &str) -> bool { self.subjects.contains(code) }

  pub(crate) fn record_access(&mut self) {
    self.access_count = self.access_count.saturating_add(1);
  }
}

impl fmt::Display for Media {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} [{}] {} by {} ({})",
      self.id,
      self.type_label(),
      self.title,
      self.author,
      self.publication_year
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_media_starts_unaccessed() {
    let m = Media::new(
      "DOC001",
      "Java Programming",
      "John Doe",
      2023,
      "Intro",
      MediaKind::Document { page_count: 350 },
    );
    assert_eq!(m.access_count(), 0);
    assert!(m.subjects.is_empty());
  }

  #[test]
  fn labels_and_details() {
    let quiz = MediaKind::OnlineQuiz {
      estimated_duration: 30,
      difficulty_level:   "Intermediate".into(),
    };
    assert_eq!(quiz.label(), "Online Quiz");
    assert_eq!(
      quiz.details(),
      "Duration: 30 minutes, Difficulty: Intermediate"
    );

    let video = MediaKind::VideoSession {
      duration_minutes: 90,
    };
    assert_eq!(video.label(), "Video Session");
    assert_eq!(video.details(), "Duration: 90 minutes");

    let doc = MediaKind::Document { page_count: 12 };
    assert_eq!(doc.details(), "Pages: 12");
  }

  #[test]
  fn subjects_are_a_set() {
    let mut m = Media::new("V1", "t", "a", 2020, "", MediaKind::VideoSession {
      duration_minutes: 5,
    })
    .with_subject("NFA032");
    m.add_subject("NFA032");
    m.add_subject("NFP121");
    assert_eq!(m.subjects.len(), 2);
    assert!(m.remove_subject("NFA032"));
    assert!(!m.has_subject("NFA032"));
  }

  #[test]
  fn kind_serializes_with_type_tag() {
    let v = serde_json::to_value(MediaKind::Document { page_count: 3 }).unwrap();
    assert_eq!(v["type"], "document");
    assert_eq!(v["page_count"], 3);
  }
}

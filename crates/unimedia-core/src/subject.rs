//! Subjects (course codes) and the specialties that group them.
//!
//! Links between entities are stored as natural keys: a subject names its
//! specialty, a specialty holds subject codes. Neither owns the other.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// A course, identified by `code` (e.g. `NFA032`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
  feature = "rkyv",
  derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct Subject {
  pub code:      String,
  pub name:      String,
  /// Name of the specialty this subject was defined under, if any.
  pub specialty: Option<String>,
  /// Ids of the media filed under this subject. Informational only.
  pub media:     BTreeSet<String>,
}

impl Subject {
  pub fn new(
    code: impl Into<String>,
    name: impl Into<String>,
    specialty: Option<String>,
  ) -> Self {
    Self {
      code: code.into(),
      name: name.into(),
      specialty,
      media: BTreeSet::new(),
    }
  }
}

impl fmt::Display for Subject {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} - {}", self.code, self.name)
  }
}

/// A study track, identified by `name`.
///
/// A specialty may list subjects it did not define itself: subjects found
/// while reading student enrolments are attached to the student's specialty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
  feature = "rkyv",
  derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct Specialty {
  pub name:     String,
  pub subjects: BTreeSet<String>,
}

impl Specialty {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:     name.into(),
      subjects: BTreeSet::new(),
    }
  }

  pub fn add_subject(&mut self, code: impl Into<String>) {
    self.subjects.insert(code.into());
  }

  pub fn remove_subject(&mut self, code: &str) -> bool {
    self.subjects.remove(code)
  }

  pub fn contains_subject(&self, code: &str) -> bool {
    self.subjects.contains(code)
  }
}

impl fmt::Display for Specialty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}

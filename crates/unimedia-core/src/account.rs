//! Accounts: students and administrators.
//!
//! Passwords are stored and compared as plain strings. Authentication is an
//! exact match and callers cannot tell an unknown user from a wrong password.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::media::Media;

// ─── Student ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
  feature = "rkyv",
  derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct Student {
  /// Conventionally an e-mail address.
  pub username:          String,
  #[serde(skip)]
  pub password:          String,
  pub family_name:       String,
  pub given_name:        String,
  /// Name of the student's specialty.
  pub specialty:         String,
  /// Codes of the subjects the student is enrolled in.
  pub enrolled_subjects: BTreeSet<String>,
}

impl Student {
  pub fn new(
    username: impl Into<String>,
    password: impl Into<String>,
    family_name: impl Into<String>,
    given_name: impl Into<String>,
    specialty: impl Into<String>,
  ) -> Self {
    Self {
      username:          username.into(),
      password:          password.into(),
      family_name:       family_name.into(),
      given_name:        given_name.into(),
      specialty:         specialty.into(),
      enrolled_subjects: BTreeSet::new(),
    }
  }

  pub fn enroll(&mut self, code: impl Into<String>) {
    self.enrolled_subjects.insert(code.into());
  }

  pub fn password_matches(&self, candidate: &str) -> bool {
    self.password == candidate
  }

  /// True if `media` is filed under at least one subject the student takes.
  pub fn is_interested_in(&self, media: &Media) -> bool {
    self
      .enrolled_subjects
      .iter()
      .any(|code| media.has_subject(code))
  }
}

impl fmt::Display for Student {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {} ({}) - {}",
      self.family_name, self.given_name, self.username, self.specialty
    )
  }
}

// ─── Administrator ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
  feature = "rkyv",
  derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct Administrator {
  pub username:    String,
  #[serde(skip)]
  pub password:    String,
  pub family_name: String,
  pub given_name:  String,
  pub email:       String,
}

impl Administrator {
  pub fn new(
    username: impl Into<String>,
    password: impl Into<String>,
    family_name: impl Into<String>,
    given_name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      username:    username.into(),
      password:    password.into(),
      family_name: family_name.into(),
      given_name:  given_name.into(),
      email:       email.into(),
    }
  }

  pub fn password_matches(&self, candidate: &str) -> bool {
    self.password == candidate
  }
}

impl fmt::Display for Administrator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {} ({}) - {}",
      self.family_name, self.given_name, self.username, self.email
    )
  }
}

// ─── Name derivation ─────────────────────────────────────────────────────────

/// Derive `(family_name, given_name)` from an e-mail shaped username.
///
/// The local part (before `@`) is split on its first `.`: the left side is
/// the given name, the right side the family name. Without a dot, the whole
/// local part is the family name and `placeholder` becomes the given name.
/// Both halves are capitalised.
pub fn names_from_username(username: &str, placeholder: &str) -> (String, String) {
  let local = username.split('@').next().unwrap_or_default();
  match local.split_once('.') {
    Some((given, family)) => (capitalize(family), capitalize(given)),
    None => (capitalize(local), placeholder.to_owned()),
  }
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    None => String::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn names_split_on_first_dot() {
    assert_eq!(
      names_from_username("jean.dupont@isae.edu.lb", "Unknown"),
      ("Dupont".to_string(), "Jean".to_string())
    );
    assert_eq!(
      names_from_username("MARIE.de.la.tour@x.edu", "Unknown"),
      ("De.la.tour".to_string(), "Marie".to_string())
    );
  }

  #[test]
  fn names_without_dot_use_placeholder() {
    assert_eq!(
      names_from_username("admin", "Admin"),
      ("Admin".to_string(), "Admin".to_string())
    );
    assert_eq!(
      names_from_username("zed@x.edu", "Unknown"),
      ("Zed".to_string(), "Unknown".to_string())
    );
  }

  #[test]
  fn capitalize_handles_empty_and_unicode() {
    assert_eq!(capitalize(""), "");
    assert_eq!(capitalize("éLODIE"), "Élodie");
  }

  #[test]
  fn password_is_exact_match() {
    let s = Student::new("a@b.c", "Secret", "B", "A", "Info");
    assert!(s.password_matches("Secret"));
    assert!(!s.password_matches("secret"));
    assert!(!s.password_matches("Secret "));
  }

  #[test]
  fn json_omits_passwords_and_reads_back() {
    let mut s = Student::new("a.b@c.d", "pw", "B", "A", "Informatique");
    s.enroll("NFA032");
    let json = serde_json::to_string(&s).unwrap();
    assert!(!json.contains("pw"));
    let back: Student = serde_json::from_str(&json).unwrap();
    assert_eq!(back.username, s.username);
    assert_eq!(back.enrolled_subjects, s.enrolled_subjects);
    assert!(back.password.is_empty());

    let admin = Administrator::new("root", "toor", "R", "O", "r@x");
    let json = serde_json::to_string(&admin).unwrap();
    assert!(!json.contains("toor"));
    let back: Administrator = serde_json::from_str(&json).unwrap();
    assert_eq!(back.email, "r@x");
  }

  #[test]
  fn student_display() {
    let s = Student::new("a.b@c.d", "pw", "B", "A", "Informatique");
    assert_eq!(s.to_string(), "B A (a.b@c.d) - Informatique");
  }
}

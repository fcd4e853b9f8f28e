//! The roster document: administrators, specialties, students, enrolments.
//!
//! ```text
//! <issae>
//!   <administrateurs>
//!     <administrateur username="admin" password="admin"/>
//!   </administrateurs>
//!   <specialite nom="Informatique">
//!     <etudiant username="jean.dupont@isae.edu.lb" password="...">
//!       <valeur>NFA032</valeur>
//!     </etudiant>
//!   </specialite>
//! </issae>
//! ```
//!
//! The document is read into a [`Roster`] in full before the library is
//! touched, so a malformed file leaves the library as it was. Media are not
//! part of this format: saving and reloading drops them.

use std::{
  collections::BTreeMap,
  fs,
  path::{Path, PathBuf},
};

use quick_xml::events::{BytesStart, Event};
use unimedia_core::{
  Library,
  account::{Administrator, Student, names_from_username},
  subject::{Specialty, Subject},
};

use crate::{
  error::{Error, Result, xml_err},
  write,
};

const ROOT: &str = "issae";
const ADMINS: &str = "administrateurs";
const ADMIN: &str = "administrateur";
const SPECIALTY: &str = "specialite";
const STUDENT: &str = "etudiant";
const VALUE: &str = "valeur";

const ADMIN_PLACEHOLDER: &str = "Admin";
const STUDENT_PLACEHOLDER: &str = "Unknown";

const DEFAULT_SPECIALTIES: [&str; 3] = ["Informatique", "Mathematiques", "Physique"];

// ─── Intermediate form ───────────────────────────────────────────────────────

/// A `username` / `password` pair as stored in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEntry {
  pub username: String,
  pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentEntry {
  pub account:  AccountEntry,
  /// Enrolled subject codes, in document order.
  pub subjects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialtyEntry {
  pub name:     String,
  pub students: Vec<StudentEntry>,
}

/// The parsed contents of a roster document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
  pub administrators: Vec<AccountEntry>,
  pub specialties:    Vec<SpecialtyEntry>,
}

/// What [`Roster::merge_into`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
  pub administrators:      usize,
  pub specialties_created: usize,
  pub students_added:      usize,
  pub students_skipped:    usize,
  pub subjects_created:    usize,
}

impl Roster {
  /// The document written when none exists yet: one `admin`/`admin`
  /// account and three empty specialties.
  pub fn default_document() -> Self {
    Self {
      administrators: vec![AccountEntry {
        username: "admin".into(),
        password: "admin".into(),
      }],
      specialties:    DEFAULT_SPECIALTIES
        .iter()
        .map(|name| SpecialtyEntry {
          name:     (*name).to_owned(),
          students: Vec::new(),
        })
        .collect(),
    }
  }

  /// Capture the roster view of `library`.
  ///
  /// Every registered specialty gets a block, plus any specialty that is
  /// only known through a student's reference. Blocks, students and subject
  /// codes are in ascending order. Media are ignored.
  pub fn from_library(library: &Library) -> Self {
    let administrators = library
      .all_administrators()
      .into_iter()
      .map(|a| AccountEntry {
        username: a.username,
        password: a.password,
      })
      .collect();

    let mut groups: BTreeMap<String, Vec<StudentEntry>> = library
      .all_specialties()
      .into_iter()
      .map(|s| (s.name, Vec::new()))
      .collect();
    for student in library.all_students() {
      groups.entry(student.specialty).or_default().push(StudentEntry {
        account:  AccountEntry {
          username: student.username,
          password: student.password,
        },
        subjects: student.enrolled_subjects.into_iter().collect(),
      });
    }

    Self {
      administrators,
      specialties: groups
        .into_iter()
        .map(|(name, students)| SpecialtyEntry { name, students })
        .collect(),
    }
  }

  // ── Reading ─────────────────────────────────────────────────────────────

  pub fn parse(xml: &[u8]) -> Result<Self> {
    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut roster = Roster::default();
    let mut root = RootState::Before;
    let mut specialty: Option<SpecialtyEntry> = None;
    let mut student: Option<StudentEntry> = None;
    let mut value: Option<String> = None;
    let mut buf = Vec::new();

    loop {
      match reader.read_event_into(&mut buf) {
        Ok(Event::Start(ref e)) if root.enter(e, false)? => {}
        Ok(Event::Start(ref e)) => match e.name().as_ref() {
          b"administrateur" => roster.administrators.push(account(e)?),
          b"specialite" => {
            if specialty.is_some() {
              return Err(Error::Malformed("nested <specialite>".into()));
            }
            specialty = Some(SpecialtyEntry {
              name:     required_attr(e, "nom")?,
              students: Vec::new(),
            });
          }
          b"etudiant" => {
            if specialty.is_none() || student.is_some() {
              return Err(Error::Malformed(
                "<etudiant> must sit directly inside <specialite>".into(),
              ));
            }
            student = Some(StudentEntry {
              account:  account(e)?,
              subjects: Vec::new(),
            });
          }
          b"valeur" => {
            if student.is_none() {
              return Err(Error::Malformed(
                "<valeur> outside of <etudiant>".into(),
              ));
            }
            value = Some(String::new());
          }
          _ => {}
        },
        Ok(Event::Empty(ref e)) if root.enter(e, true)? => {}
        Ok(Event::Empty(ref e)) => match e.name().as_ref() {
          b"administrateur" => roster.administrators.push(account(e)?),
          b"specialite" => {
            if specialty.is_some() {
              return Err(Error::Malformed("nested <specialite>".into()));
            }
            roster.specialties.push(SpecialtyEntry {
              name:     required_attr(e, "nom")?,
              students: Vec::new(),
            });
          }
          b"etudiant" => {
            let Some(current) = specialty.as_mut() else {
              return Err(Error::Malformed(
                "<etudiant> outside of <specialite>".into(),
              ));
            };
            current.students.push(StudentEntry {
              account:  account(e)?,
              subjects: Vec::new(),
            });
          }
          _ => {}
        },
        Ok(Event::Text(ref t)) => {
          if let Some(v) = value.as_mut() {
            v.push_str(&t.unescape().map_err(xml_err)?);
          }
        }
        Ok(Event::End(ref e)) => match e.name().as_ref() {
          b"valeur" => {
            let code = value.take().unwrap_or_default();
            let code = code.trim();
            if let (Some(current), false) = (student.as_mut(), code.is_empty()) {
              current.subjects.push(code.to_owned());
            }
          }
          b"etudiant" => {
            if let (Some(current), Some(done)) = (specialty.as_mut(), student.take())
            {
              current.students.push(done);
            }
          }
          b"specialite" => {
            if let Some(done) = specialty.take() {
              roster.specialties.push(done);
            }
          }
          b"issae" if specialty.is_none() => root = RootState::Closed,
          _ => {}
        },
        Ok(Event::Eof) => break,
        Err(e) => return Err(xml_err(e)),
        _ => {}
      }
      buf.clear();
    }

    match root {
      RootState::Before => {
        Err(Error::Malformed(format!("no <{ROOT}> root element")))
      }
      RootState::Open => Err(Error::Malformed(format!("unterminated <{ROOT}>"))),
      RootState::Closed if specialty.is_some() || student.is_some() => {
        Err(Error::Malformed("unterminated element".into()))
      }
      RootState::Closed => Ok(roster),
    }
  }

  // ── Writing ─────────────────────────────────────────────────────────────

  pub fn to_xml(&self) -> Result<Vec<u8>> {
    let mut w = write::indented(Vec::new());
    write::decl(&mut w, Some("yes"))?;
    write::start(&mut w, ROOT, &[])?;

    if self.administrators.is_empty() {
      write::empty(&mut w, ADMINS, &[])?;
    } else {
      write::start(&mut w, ADMINS, &[])?;
      for admin in &self.administrators {
        write::empty(&mut w, ADMIN, &account_attrs(admin))?;
      }
      write::end(&mut w, ADMINS)?;
    }

    for specialty in &self.specialties {
      let attrs = [("nom", specialty.name.as_str())];
      if specialty.students.is_empty() {
        write::empty(&mut w, SPECIALTY, &attrs)?;
        continue;
      }
      write::start(&mut w, SPECIALTY, &attrs)?;
      for student in &specialty.students {
        let attrs = account_attrs(&student.account);
        if student.subjects.is_empty() {
          write::empty(&mut w, STUDENT, &attrs)?;
          continue;
        }
        write::start(&mut w, STUDENT, &attrs)?;
        for code in &student.subjects {
          write::text_elem(&mut w, VALUE, code)?;
        }
        write::end(&mut w, STUDENT)?;
      }
      write::end(&mut w, SPECIALTY)?;
    }

    write::end(&mut w, ROOT)?;
    let mut out = w.into_inner();
    out.push(b'\n');
    Ok(out)
  }

  // ── Applying ────────────────────────────────────────────────────────────

  /// Merge into `library`.
  ///
  /// Administrators are (re)added unconditionally. Missing specialties are
  /// created. Students whose username is already known are skipped, so
  /// loading the same document twice changes nothing. New students get
  /// their names from the username; each enrolled code is created as a
  /// subject if needed and attached to the student's specialty.
  pub fn merge_into(self, library: &mut Library) -> LoadSummary {
    let mut summary = LoadSummary::default();

    for admin in self.administrators {
      let (family, given) = names_from_username(&admin.username, ADMIN_PLACEHOLDER);
      let email = admin.username.clone();
      library.add_administrator(Administrator::new(
        admin.username,
        admin.password,
        family,
        given,
        email,
      ));
      summary.administrators += 1;
    }

    for entry in self.specialties {
      if library.get_specialty(&entry.name).is_none() {
        library.add_specialty(Specialty::new(entry.name.as_str()));
        summary.specialties_created += 1;
      }

      for student_entry in entry.students {
        let AccountEntry { username, password } = student_entry.account;
        if library.contains_student(&username) {
          tracing::debug!(%username, "student already known, skipping");
          summary.students_skipped += 1;
          continue;
        }

        let (family, given) = names_from_username(&username, STUDENT_PLACEHOLDER);
        let mut student =
          Student::new(username, password, family, given, entry.name.as_str());
        for code in student_entry.subjects {
          if library.get_subject(&code).is_none() {
            library.add_subject(Subject::new(
              code.as_str(),
              code.as_str(),
              Some(entry.name.clone()),
            ));
            summary.subjects_created += 1;
          }
          library.link_subject(&entry.name, &code);
          student.enroll(code);
        }
        library.add_student(student);
        summary.students_added += 1;
      }
    }

    summary
  }
}

/// Where the reader stands relative to the `<issae>` root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootState {
  Before,
  Open,
  Closed,
}

impl RootState {
  /// Account for an opening (or self-closing) element. Returns `true` when
  /// `e` is the root itself.
  fn enter(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<bool> {
    let is_root = e.name().as_ref() == ROOT.as_bytes();
    match (*self, is_root) {
      (Self::Before, true) => {
        *self = if empty { Self::Closed } else { Self::Open };
        Ok(true)
      }
      (Self::Before, false) => Err(Error::Malformed(format!(
        "expected <{ROOT}> root, found <{}>",
        String::from_utf8_lossy(e.name().as_ref())
      ))),
      (Self::Open, true) => Err(Error::Malformed(format!("nested <{ROOT}>"))),
      (Self::Open, false) => Ok(false),
      (Self::Closed, _) => {
        Err(Error::Malformed(format!("content after </{ROOT}>")))
      }
    }
  }
}

fn required_attr(e: &BytesStart<'_>, name: &str) -> Result<String> {
  let attr = e.try_get_attribute(name).map_err(xml_err)?.ok_or_else(|| {
    Error::Malformed(format!(
      "<{}> is missing the {name:?} attribute",
      String::from_utf8_lossy(e.name().as_ref())
    ))
  })?;
  Ok(attr.unescape_value().map_err(xml_err)?.into_owned())
}

fn account(e: &BytesStart<'_>) -> Result<AccountEntry> {
  Ok(AccountEntry {
    username: required_attr(e, "username")?,
    password: required_attr(e, "password")?,
  })
}

fn account_attrs(account: &AccountEntry) -> [(&str, &str); 2] {
  [
    ("username", account.username.as_str()),
    ("password", account.password.as_str()),
  ]
}

// ─── File adapter ────────────────────────────────────────────────────────────

/// A roster document on disk.
#[derive(Debug, Clone)]
pub struct RosterDocument {
  path: PathBuf,
}

impl RosterDocument {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  /// Read the document and merge it into `library`.
  ///
  /// When the file does not exist, [`Roster::default_document`] is written
  /// to it first.
  pub fn load_into(&self, library: &mut Library) -> Result<LoadSummary> {
    if !self.path.exists() {
      tracing::info!(path = %self.path.display(), "roster not found, writing default");
      fs::write(&self.path, Roster::default_document().to_xml()?)?;
    }

    let bytes = fs::read(&self.path)?;
    let summary = Roster::parse(&bytes)?.merge_into(library);
    tracing::info!(
      path = %self.path.display(),
      administrators = summary.administrators,
      students_added = summary.students_added,
      students_skipped = summary.students_skipped,
      "roster loaded"
    );
    Ok(summary)
  }

  /// Write the roster view of `library`. Media are not saved.
  pub fn save(&self, library: &Library) -> Result<()> {
    let bytes = Roster::from_library(library).to_xml()?;
    fs::write(&self.path, bytes)?;
    tracing::info!(path = %self.path.display(), "roster saved");
    Ok(())
  }
}

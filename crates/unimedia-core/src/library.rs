//! [`Library`], the in-memory owner of every entity collection.
//!
//! All five collections are keyed by their natural key (media id, student and
//! administrator username, specialty name, subject code). Adding an entity
//! whose key is already present replaces the previous entry. Iteration order
//! is ascending by key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
  account::{Administrator, Student},
  filter::{FilterCriteria, TitleFilter},
  media::Media,
  notify::{LogSink, MediaObserver, Notice, NotificationSink, Subscriber},
  subject::{Specialty, Subject},
};

// ─── Snapshot payload ────────────────────────────────────────────────────────

/// Every collection of a [`Library`], as plain lists.
///
/// Produced by [`Library::snapshot`] and consumed by [`Library::restore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
  feature = "rkyv",
  derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct LibraryData {
  pub media:          Vec<Media>,
  pub students:       Vec<Student>,
  pub specialties:    Vec<Specialty>,
  pub subjects:       Vec<Subject>,
  pub administrators: Vec<Administrator>,
}

// ─── Library ─────────────────────────────────────────────────────────────────

pub struct Library {
  media:          BTreeMap<String, Media>,
  students:       BTreeMap<String, Student>,
  specialties:    BTreeMap<String, Specialty>,
  subjects:       BTreeMap<String, Subject>,
  administrators: BTreeMap<String, Administrator>,
  subscribers:    Vec<Subscriber>,
  sink:           Box<dyn NotificationSink>,
}

impl Default for Library {
  fn default() -> Self { Self::new() }
}

impl Library {
  /// An empty library that logs student notices through `tracing`.
  pub fn new() -> Self { Self::with_sink(LogSink) }

  pub fn with_sink(sink: impl NotificationSink + 'static) -> Self {
    Self {
      media:          BTreeMap::new(),
      students:       BTreeMap::new(),
      specialties:    BTreeMap::new(),
      subjects:       BTreeMap::new(),
      administrators: BTreeMap::new(),
      subscribers:    Vec::new(),
      sink:           Box::new(sink),
    }
  }

  pub fn set_sink(&mut self, sink: impl NotificationSink + 'static) {
    self.sink = Box::new(sink);
  }

  // ── Media ───────────────────────────────────────────────────────────────

  /// Insert or replace `media` and notify subscribers.
  pub fn add_media(&mut self, media: Media) {
    let id = media.id.clone();
    if self.media.contains_key(&id) {
      self.unlink_media(&id);
    }
    for code in &media.subjects {
      if let Some(subject) = self.subjects.get_mut(code) {
        subject.media.insert(id.clone());
      }
    }
    tracing::debug!(media_id = %id, kind = media.type_label(), "media added");
    self.media.insert(id.clone(), media);

    if let Some(media) = self.media.get(&id) {
      self.notify(media);
    }
  }

  /// Look up a media item and count the access.
  pub fn get_media(&mut self, id: &str) -> Option<&Media> {
    let media = self.media.get_mut(id)?;
    media.record_access();
    Some(&*media)
  }

  /// Mutable access for editing descriptive fields. Does not count as an
  /// access.
  pub fn get_media_mut(&mut self, id: &str) -> Option<&mut Media> {
    self.media.get_mut(id)
  }

  pub fn remove_media(&mut self, id: &str) -> bool {
    if self.media.remove(id).is_none() {
      return false;
    }
    self.unlink_media(id);
    tracing::debug!(media_id = %id, "media removed");
    true
  }

  /// A copy of every media item.
  pub fn all_media(&self) -> Vec<Media> { self.media.values().cloned().collect() }

  pub fn media_count(&self) -> usize { self.media.len() }

  pub fn search_media<C>(&self, criteria: &C) -> Vec<Media>
  where
    C: FilterCriteria + ?Sized,
  {
    self
      .media
      .values()
      .filter(|m| criteria.matches(m))
      .cloned()
      .collect()
  }

  pub fn search_by_title(&self, title: &str) -> Vec<Media> {
    self.search_media(&TitleFilter::new(title))
  }

  fn unlink_media(&mut self, id: &str) {
    for subject in self.subjects.values_mut() {
      subject.media.remove(id);
    }
  }

  fn notify(&self, media: &Media) {
    for subscriber in &self.subscribers {
      let outcome = match subscriber {
        Subscriber::Student(username) => match self.students.get(username) {
          Some(student) if student.is_interested_in(media) => {
            self.sink.deliver(&Notice::new(username, media))
          }
          _ => Ok(()),
        },
        Subscriber::Observer(observer) => observer.media_added(media),
      };
      if let Err(e) = outcome {
        tracing::warn!(media_id = %media.id, error = %e, "media observer failed");
      }
    }
  }

  // ── Observers ───────────────────────────────────────────────────────────

  /// Register an extra observer of new media.
  pub fn subscribe(&mut self, observer: impl MediaObserver + 'static) {
    self.subscribers.push(Subscriber::Observer(Box::new(observer)));
  }

  pub fn unsubscribe_student(&mut self, username: &str) -> bool {
    let before = self.subscribers.len();
    self
      .subscribers
      .retain(|s| !matches!(s, Subscriber::Student(u) if u == username));
    before != self.subscribers.len()
  }

  fn subscribe_student(&mut self, username: &str) {
    let known = self
      .subscribers
      .iter()
      .any(|s| matches!(s, Subscriber::Student(u) if u == username));
    if !known {
      self
        .subscribers
        .push(Subscriber::Student(username.to_owned()));
    }
  }

  // ── Students ────────────────────────────────────────────────────────────

  /// Insert or replace `student` and subscribe them to new media.
  pub fn add_student(&mut self, student: Student) {
    let username = student.username.clone();
    self.students.insert(username.clone(), student);
    self.subscribe_student(&username);
  }

  pub fn get_student(&self, username: &str) -> Option<&Student> {
    self.students.get(username)
  }

  pub fn contains_student(&self, username: &str) -> bool {
    self.students.contains_key(username)
  }

  /// True when `username` belongs to a student or an administrator.
  pub fn username_taken(&self, username: &str) -> bool {
    self.students.contains_key(username)
      || self.administrators.contains_key(username)
  }

  pub fn all_students(&self) -> Vec<Student> {
    self.students.values().cloned().collect()
  }

  /// Returns the student only if `password` matches exactly.
  pub fn authenticate_student(
    &self,
    username: &str,
    password: &str,
  ) -> Option<&Student> {
    self
      .students
      .get(username)
      .filter(|s| s.password_matches(password))
  }

  /// Enroll a registered student in `code`. Returns `false` for an unknown
  /// student.
  pub fn enroll(&mut self, username: &str, code: &str) -> bool {
    match self.students.get_mut(username) {
      Some(student) => {
        student.enroll(code);
        true
      }
      None => false,
    }
  }

  // ── Administrators ──────────────────────────────────────────────────────

  pub fn add_administrator(&mut self, admin: Administrator) {
    self.administrators.insert(admin.username.clone(), admin);
  }

  pub fn get_administrator(&self, username: &str) -> Option<&Administrator> {
    self.administrators.get(username)
  }

  pub fn all_administrators(&self) -> Vec<Administrator> {
    self.administrators.values().cloned().collect()
  }

  /// Returns the administrator only if `password` matches exactly.
  pub fn authenticate_administrator(
    &self,
    username: &str,
    password: &str,
  ) -> Option<&Administrator> {
    self
      .administrators
      .get(username)
      .filter(|a| a.password_matches(password))
  }

  // ── Specialties & subjects ──────────────────────────────────────────────

  pub fn add_specialty(&mut self, specialty: Specialty) {
    self.specialties.insert(specialty.name.clone(), specialty);
  }

  pub fn get_specialty(&self, name: &str) -> Option<&Specialty> {
    self.specialties.get(name)
  }

  pub fn all_specialties(&self) -> Vec<Specialty> {
    self.specialties.values().cloned().collect()
  }

  /// Attach `code` to a registered specialty. Returns `false` when the
  /// specialty is unknown.
  pub fn link_subject(&mut self, specialty: &str, code: &str) -> bool {
    match self.specialties.get_mut(specialty) {
      Some(s) => {
        s.add_subject(code);
        true
      }
      None => false,
    }
  }

  /// Insert or replace `subject`. Its `media` set is rebuilt from the media
  /// already filed under its code.
  pub fn add_subject(&mut self, mut subject: Subject) {
    subject.media = self
      .media
      .values()
      .filter(|m| m.has_subject(&subject.code))
      .map(|m| m.id.clone())
      .collect();
    self.subjects.insert(subject.code.clone(), subject);
  }

  /// Drop `code` from the subject table and from every specialty listing
  /// it. Students stay enrolled and media keep the code.
  pub fn remove_subject(&mut self, code: &str) -> bool {
    if self.subjects.remove(code).is_none() {
      return false;
    }
    for specialty in self.specialties.values_mut() {
      specialty.remove_subject(code);
    }
    true
  }

  pub fn get_subject(&self, code: &str) -> Option<&Subject> {
    self.subjects.get(code)
  }

  pub fn all_subjects(&self) -> Vec<Subject> {
    self.subjects.values().cloned().collect()
  }

  // ── Statistics ──────────────────────────────────────────────────────────

  /// Up to `limit` media, most accessed first. Ties keep key order.
  pub fn most_accessed_media(&self, limit: usize) -> Vec<Media> {
    rank(self.media.values(), limit)
  }

  /// Like [`Self::most_accessed_media`], restricted to media filed under at
  /// least one subject of `specialty`. Unknown specialty → empty.
  pub fn most_accessed_by_specialty(
    &self,
    specialty: &str,
    limit: usize,
  ) -> Vec<Media> {
    let Some(specialty) = self.specialties.get(specialty) else {
      return Vec::new();
    };
    rank(
      self
        .media
        .values()
        .filter(|m| m.subjects.iter().any(|c| specialty.contains_subject(c))),
      limit,
    )
  }

  /// Like [`Self::most_accessed_media`], restricted to media filed under
  /// `code`.
  pub fn most_accessed_by_subject(&self, code: &str, limit: usize) -> Vec<Media> {
    rank(self.media.values().filter(|m| m.has_subject(code)), limit)
  }

  // ── Snapshot ────────────────────────────────────────────────────────────

  pub fn snapshot(&self) -> LibraryData {
    LibraryData {
      media:          self.all_media(),
      students:       self.all_students(),
      specialties:    self.all_specialties(),
      subjects:       self.all_subjects(),
      administrators: self.all_administrators(),
    }
  }

  /// Replace every collection with the contents of `data`.
  ///
  /// Student subscriptions are rebuilt from the restored students; observers
  /// registered with [`Self::subscribe`] are kept. No notifications fire.
  pub fn restore(&mut self, data: LibraryData) {
    self.media = keyed(data.media, |m| &m.id);
    self.specialties = keyed(data.specialties, |s| &s.name);
    self.subjects = keyed(data.subjects, |s| &s.code);
    self.administrators = keyed(data.administrators, |a| &a.username);

    self
      .subscribers
      .retain(|s| matches!(s, Subscriber::Observer(_)));
    self.students.clear();
    for student in data.students {
      self.add_student(student);
    }

    tracing::debug!(
      media = self.media.len(),
      students = self.students.len(),
      specialties = self.specialties.len(),
      subjects = self.subjects.len(),
      administrators = self.administrators.len(),
      "library restored"
    );
  }
}

impl std::fmt::Debug for Library {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Library")
      .field("media", &self.media.len())
      .field("students", &self.students.len())
      .field("specialties", &self.specialties.len())
      .field("subjects", &self.subjects.len())
      .field("administrators", &self.administrators.len())
      .field("subscribers", &self.subscribers.len())
      .finish()
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn rank<'a>(media: impl Iterator<Item = &'a Media>, limit: usize) -> Vec<Media> {
  let mut ranked: Vec<&Media> = media.collect();
  // Stable, so equal counts keep iteration order.
  ranked.sort_by(|a, b| b.access_count().cmp(&a.access_count()));
  ranked.into_iter().take(limit).cloned().collect()
}

fn keyed<T>(items: Vec<T>, key: impl Fn(&T) -> &String) -> BTreeMap<String, T> {
  items
    .into_iter()
    .map(|item| (key(&item).clone(), item))
    .collect()
}

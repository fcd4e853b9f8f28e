//! Snapshot round-trip tests against temporary files.

use std::fs;

use tempfile::TempDir;
use unimedia_core::{
  Library,
  account::{Administrator, Student},
  media::{Media, MediaKind},
  notify::MemorySink,
  subject::{Specialty, Subject},
};

use crate::{Error, FORMAT_VERSION, MAGIC, SnapshotFile, decode, encode};

fn tmp() -> (TempDir, SnapshotFile) {
  let dir = tempfile::tempdir().expect("temp dir");
  let file = SnapshotFile::new(dir.path().join("library.bin"));
  (dir, file)
}

fn populated() -> Library {
  let mut lib = Library::new();
  lib.add_administrator(Administrator::new(
    "admin",
    "admin",
    "Admin",
    "System",
    "admin@isae.edu.lb",
  ));

  let mut info = Specialty::new("Informatique");
  info.add_subject("NFA032");
  lib.add_specialty(info);
  lib.add_subject(Subject::new(
    "NFA032",
    "Programming Basics",
    Some("Informatique".into()),
  ));

  let mut jean = Student::new(
    "jean.dupont@isae.edu.lb",
    "pw",
    "Dupont",
    "Jean",
    "Informatique",
  );
  jean.enroll("NFA032");
  lib.add_student(jean);

  lib.add_media(
    Media::new(
      "DOC001",
      "Java Programming",
      "John Doe",
      2023,
      "Intro",
      MediaKind::Document { page_count: 350 },
    )
    .with_subject("NFA032"),
  );
  lib.add_media(Media::new(
    "QUIZ001",
    "Java Quiz",
    "Prof",
    2023,
    "",
    MediaKind::OnlineQuiz {
      estimated_duration: 30,
      difficulty_level:   "Medium".into(),
    },
  ));
  for _ in 0..3 {
    lib.get_media("DOC001").unwrap();
  }
  lib.get_media("QUIZ001").unwrap();
  lib
}

// ─── Round trip ──────────────────────────────────────────────────────────────

#[test]
fn round_trip_keeps_every_collection() {
  let (_dir, file) = tmp();
  let original = populated();
  file.save(&original).unwrap();
  assert!(file.exists());

  let mut restored = Library::new();
  file.load(&mut restored).unwrap();

  assert_eq!(restored.snapshot(), original.snapshot());
  let doc = restored
    .all_media()
    .into_iter()
    .find(|m| m.id == "DOC001")
    .unwrap();
  assert_eq!(doc.access_count(), 3);
  assert!(doc.has_subject("NFA032"));
  assert_eq!(
    restored.get_subject("NFA032").unwrap().media.iter().collect::<Vec<_>>(),
    vec!["DOC001"]
  );
  assert!(restored
    .authenticate_student("jean.dupont@isae.edu.lb", "pw")
    .is_some());
}

#[test]
fn load_replaces_existing_contents() {
  let (_dir, file) = tmp();
  file.save(&populated()).unwrap();

  let mut lib = Library::new();
  lib.add_media(Media::new("OTHER", "t", "a", 2000, "", MediaKind::Document {
    page_count: 1,
  }));
  lib.add_student(Student::new("ghost@x", "p", "G", "H", "Nowhere"));
  file.load(&mut lib).unwrap();

  assert!(lib.get_media_mut("OTHER").is_none());
  assert!(!lib.contains_student("ghost@x"));
  assert_eq!(lib.media_count(), 2);
}

#[test]
fn restored_students_still_get_notices() {
  let (_dir, file) = tmp();
  file.save(&populated()).unwrap();

  let sink = MemorySink::new();
  let mut lib = Library::with_sink(sink.clone());
  file.load(&mut lib).unwrap();
  assert!(sink.take().is_empty());

  lib.add_media(
    Media::new("VID009", "New Lecture", "Prof", 2024, "", MediaKind::VideoSession {
      duration_minutes: 90,
    })
    .with_subject("NFA032"),
  );
  let notices = sink.take();
  assert_eq!(notices.len(), 1);
  assert_eq!(notices[0].recipient, "jean.dupont@isae.edu.lb");
  assert_eq!(notices[0].media_id, "VID009");
}

// ─── Failures ────────────────────────────────────────────────────────────────

#[test]
fn missing_file_is_an_io_error() {
  let (_dir, file) = tmp();
  let mut lib = populated();
  assert!(matches!(file.load(&mut lib), Err(Error::Io(_))));
  assert_eq!(lib.media_count(), 2);
}

#[test]
fn foreign_file_leaves_library_untouched() {
  let (_dir, file) = tmp();
  fs::write(file.path(), b"<issae></issae>").unwrap();

  let mut lib = populated();
  let before = lib.snapshot();
  assert!(matches!(file.load(&mut lib), Err(Error::BadMagic)));
  assert_eq!(lib.snapshot(), before);
}

#[test]
fn newer_versions_are_rejected() {
  let mut bytes = encode(&populated().snapshot()).unwrap();
  bytes[MAGIC.len()] = FORMAT_VERSION + 1;
  assert!(matches!(
    decode(&bytes),
    Err(Error::UnsupportedVersion(v)) if v == FORMAT_VERSION + 1
  ));
}

#[test]
fn truncated_archive_fails_to_decode() {
  let bytes = encode(&populated().snapshot()).unwrap();
  assert!(bytes.starts_with(MAGIC));

  assert!(matches!(decode(&bytes[..MAGIC.len()]), Err(Error::Decode(_))));

  let cut = MAGIC.len() + 1 + 4;
  let (_dir, file) = tmp();
  fs::write(file.path(), &bytes[..cut]).unwrap();
  let mut lib = Library::new();
  assert!(matches!(file.load(&mut lib), Err(Error::Decode(_))));
  assert_eq!(lib.media_count(), 0);
}

//! Media factory registry.
//!
//! Maps a lowercase type name (`"document"`, `"video"`, `"quiz"`) to a
//! [`MediaFactory`] that validates the variant-specific positional
//! parameters. The registry is an ordinary value: build it once at startup
//! and pass it to whoever constructs media.

use std::collections::BTreeMap;

use crate::{
  Error, Result,
  media::{Media, MediaKind},
};

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// A positional, variant-specific construction parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
  Int(i64),
  Text(String),
}

impl Param {
  /// Interpret a raw command-line token: integers become [`Param::Int`],
  /// anything else [`Param::Text`].
  pub fn parse(raw: &str) -> Self {
    raw
      .trim()
      .parse::<i64>()
      .map(Self::Int)
      .unwrap_or_else(|_| Self::Text(raw.to_owned()))
  }
}

impl From<i64> for Param {
  fn from(v: i64) -> Self { Self::Int(v) }
}

impl From<&str> for Param {
  fn from(v: &str) -> Self { Self::Text(v.to_owned()) }
}

/// The fields shared by every media variant.
#[derive(Debug, Clone, Default)]
pub struct MediaHeader {
  pub id:               String,
  pub title:            String,
  pub author:           String,
  pub publication_year: i32,
  pub description:      String,
}

impl MediaHeader {
  fn into_media(self, kind: MediaKind) -> Media {
    Media::new(
      self.id,
      self.title,
      self.author,
      self.publication_year,
      self.description,
      kind,
    )
  }
}

// ─── Strategy ────────────────────────────────────────────────────────────────

/// Builds one media variant from a header and positional parameters.
pub trait MediaFactory: Send + Sync {
  fn create(&self, header: MediaHeader, params: &[Param]) -> Result<Media>;
}

fn invalid(media_type: &str, reason: impl Into<String>) -> Error {
  Error::InvalidArguments {
    media_type: media_type.to_owned(),
    reason:     reason.into(),
  }
}

fn expect_count(media_type: &str, params: &[Param], n: usize) -> Result<()> {
  if params.len() != n {
    return Err(invalid(
      media_type,
      format!("expected {n} parameter(s), got {}", params.len()),
    ));
  }
  Ok(())
}

fn expect_u32(media_type: &str, param: &Param, what: &str) -> Result<u32> {
  match param {
    Param::Int(v) => u32::try_from(*v)
      .map_err(|_| invalid(media_type, format!("{what} out of range: {v}"))),
    Param::Text(t) => {
      Err(invalid(media_type, format!("{what} must be an integer, got {t:?}")))
    }
  }
}

/// A free-text label. Numeric tokens are kept as their decimal text, so a
/// difficulty of `3` is the label `"3"`.
fn expect_label(param: &Param) -> String {
  match param {
    Param::Int(v) => v.to_string(),
    Param::Text(t) => t.clone(),
  }
}

/// `document`: one integer, the page count.
#[derive(Debug, Default)]
pub struct DocumentFactory;

impl MediaFactory for DocumentFactory {
  fn create(&self, header: MediaHeader, params: &[Param]) -> Result<Media> {
    expect_count("document", params, 1)?;
    let page_count = expect_u32("document", &params[0], "page count")?;
    Ok(header.into_media(MediaKind::Document { page_count }))
  }
}

/// `video`: one integer, the duration in minutes.
#[derive(Debug, Default)]
pub struct VideoFactory;

impl MediaFactory for VideoFactory {
  fn create(&self, header: MediaHeader, params: &[Param]) -> Result<Media> {
    expect_count("video", params, 1)?;
    let duration_minutes = expect_u32("video", &params[0], "duration")?;
    Ok(header.into_media(MediaKind::VideoSession { duration_minutes }))
  }
}

/// `quiz`: an integer duration followed by a difficulty label.
#[derive(Debug, Default)]
pub struct QuizFactory;

impl MediaFactory for QuizFactory {
  fn create(&self, header: MediaHeader, params: &[Param]) -> Result<Media> {
    expect_count("quiz", params, 2)?;
    let estimated_duration = expect_u32("quiz", &params[0], "duration")?;
    let difficulty_level = expect_label(&params[1]);
    Ok(header.into_media(MediaKind::OnlineQuiz {
      estimated_duration,
      difficulty_level,
    }))
  }
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// Lookup from type name to factory. Names are case-insensitive.
pub struct MediaFactoryRegistry {
  factories: BTreeMap<String, Box<dyn MediaFactory>>,
}

impl Default for MediaFactoryRegistry {
  fn default() -> Self { Self::with_builtin() }
}

impl MediaFactoryRegistry {
  /// An empty registry.
  pub fn new() -> Self {
    Self {
      factories: BTreeMap::new(),
    }
  }

  /// A registry with `document`, `video` and `quiz` registered.
  pub fn with_builtin() -> Self {
    let mut registry = Self::new();
    registry.register("document", DocumentFactory);
    registry.register("video", VideoFactory);
    registry.register("quiz", QuizFactory);
    registry
  }

  /// Register (or replace) the factory for `type_name`.
  pub fn register(
    &mut self,
    type_name: &str,
    factory: impl MediaFactory + 'static,
  ) {
    self
      .factories
      .insert(type_name.to_lowercase(), Box::new(factory));
  }

  pub fn get(&self, type_name: &str) -> Result<&dyn MediaFactory> {
    self
      .factories
      .get(&type_name.to_lowercase())
      .map(|f| f.as_ref())
      .ok_or_else(|| Error::UnknownMediaType(type_name.to_owned()))
  }

  pub fn create(
    &self,
    type_name: &str,
    header: MediaHeader,
    params: &[Param],
  ) -> Result<Media> {
    self.get(type_name)?.create(header, params)
  }

  /// Registered type names, ascending.
  pub fn type_names(&self) -> impl Iterator<Item = &str> {
    self.factories.keys().map(String::as_str)
  }
}

impl std::fmt::Debug for MediaFactoryRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_list().entries(self.factories.keys()).finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn header(id: &str) -> MediaHeader {
    MediaHeader {
      id:               id.into(),
      title:            "Title".into(),
      author:           "Author".into(),
      publication_year: 2023,
      description:      "Desc".into(),
    }
  }

  #[test]
  fn builtin_types_construct() {
    let r = MediaFactoryRegistry::with_builtin();

    let doc = r.create("document", header("D"), &[Param::Int(350)]).unwrap();
    assert_eq!(doc.kind, MediaKind::Document { page_count: 350 });
    assert_eq!(doc.access_count(), 0);

    let vid = r.create("VIDEO", header("V"), &[Param::Int(120)]).unwrap();
    assert_eq!(vid.kind, MediaKind::VideoSession {
      duration_minutes: 120,
    });

    let quiz = r
      .create("quiz", header("Q"), &[Param::Int(30), "Intermediate".into()])
      .unwrap();
    assert_eq!(quiz.kind, MediaKind::OnlineQuiz {
      estimated_duration: 30,
      difficulty_level:   "Intermediate".into(),
    });
  }

  #[test]
  fn unknown_type() {
    let r = MediaFactoryRegistry::with_builtin();
    let err = r.create("podcast", header("P"), &[]).unwrap_err();
    assert_eq!(err, Error::UnknownMediaType("podcast".into()));
  }

  #[test]
  fn wrong_parameter_count() {
    let r = MediaFactoryRegistry::with_builtin();
    for (ty, params) in [
      ("document", vec![]),
      ("document", vec![Param::Int(1), Param::Int(2)]),
      ("video", vec![]),
      ("quiz", vec![Param::Int(30)]),
    ] {
      let err = r.create(ty, header("X"), &params).unwrap_err();
      assert!(
        matches!(err, Error::InvalidArguments { .. }),
        "{ty} with {params:?} should be rejected"
      );
    }
  }

  #[test]
  fn wrong_parameter_type() {
    let r = MediaFactoryRegistry::with_builtin();
    assert!(matches!(
      r.create("document", header("X"), &["many".into()]),
      Err(Error::InvalidArguments { .. })
    ));
    assert!(matches!(
      r.create("video", header("X"), &[Param::Int(-5)]),
      Err(Error::InvalidArguments { .. })
    ));
    assert!(matches!(
      r.create("quiz", header("X"), &["long".into(), "Hard".into()]),
      Err(Error::InvalidArguments { .. })
    ));
  }

  #[test]
  fn numeric_quiz_difficulty_is_a_label() {
    let r = MediaFactoryRegistry::with_builtin();
    let params: Vec<Param> = ["30", "3"].into_iter().map(Param::parse).collect();
    let quiz = r.create("quiz", header("Q"), &params).unwrap();
    assert_eq!(quiz.kind, MediaKind::OnlineQuiz {
      estimated_duration: 30,
      difficulty_level:   "3".into(),
    });
  }

  #[test]
  fn registration_is_open() {
    struct Slides;
    impl MediaFactory for Slides {
      fn create(&self, header: MediaHeader, params: &[Param]) -> Result<Media> {
        DocumentFactory.create(header, params)
      }
    }

    let mut r = MediaFactoryRegistry::new();
    assert!(r.get("slides").is_err());
    r.register("Slides", Slides);
    assert!(r.create("slides", header("S"), &[Param::Int(10)]).is_ok());
    assert_eq!(r.type_names().collect::<Vec<_>>(), vec!["slides"]);
  }

  #[test]
  fn param_parse() {
    assert_eq!(Param::parse("42"), Param::Int(42));
    assert_eq!(Param::parse("Hard"), Param::Text("Hard".into()));
  }
}

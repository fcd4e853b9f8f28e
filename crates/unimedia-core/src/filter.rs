//! Media filter criteria.
//!
//! A [`FilterCriteria`] is a predicate over a [`Media`]. Leaf criteria match
//! on title, author or subject; [`CompositeFilter`] combines any criteria
//! with AND / OR. New leaf criteria only need to implement the trait (plain
//! closures already do).

use crate::media::Media;

/// A predicate over a media item.
pub trait FilterCriteria {
  fn matches(&self, media: &Media) -> bool;
}

impl<F> FilterCriteria for F
where
  F: Fn(&Media) -> bool,
{
  fn matches(&self, media: &Media) -> bool { self(media) }
}

// ─── Leaf criteria ───────────────────────────────────────────────────────────

/// Case-insensitive substring match on the title.
#[derive(Debug, Clone)]
pub struct TitleFilter {
  needle: String,
}

impl TitleFilter {
  pub fn new(title: &str) -> Self {
    Self {
      needle: title.to_lowercase(),
    }
  }
}

impl FilterCriteria for TitleFilter {
  fn matches(&self, media: &Media) -> bool {
    media.title.to_lowercase().contains(&self.needle)
  }
}

/// Case-insensitive substring match on the author.
#[derive(Debug, Clone)]
pub struct AuthorFilter {
  needle: String,
}

impl AuthorFilter {
  pub fn new(author: &str) -> Self {
    Self {
      needle: author.to_lowercase(),
    }
  }
}

impl FilterCriteria for AuthorFilter {
  fn matches(&self, media: &Media) -> bool {
    media.author.to_lowercase().contains(&self.needle)
  }
}

/// Exact subject-code membership.
#[derive(Debug, Clone)]
pub struct SubjectFilter {
  code: String,
}

impl SubjectFilter {
  pub fn new(code: impl Into<String>) -> Self { Self { code: code.into() } }
}

impl FilterCriteria for SubjectFilter {
  fn matches(&self, media: &Media) -> bool { media.has_subject(&self.code) }
}

// ─── Composite ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
  And,
  Or,
}

/// Combines child criteria with a single [`Operator`].
///
/// Evaluation short-circuits. With no children, AND matches every item and
/// OR matches none.
pub struct CompositeFilter {
  operator: Operator,
  criteria: Vec<Box<dyn FilterCriteria>>,
}

impl CompositeFilter {
  pub fn new(operator: Operator) -> Self {
    Self {
      operator,
      criteria: Vec::new(),
    }
  }

  pub fn and() -> Self { Self::new(Operator::And) }

  pub fn or() -> Self { Self::new(Operator::Or) }

  pub fn operator(&self) -> Operator { self.operator }

  pub fn push(&mut self, criterion: impl FilterCriteria + 'static) {
    self.criteria.push(Box::new(criterion));
  }

  /// Builder-style [`Self::push`].
  pub fn with(mut self, criterion: impl FilterCriteria + 'static) -> Self {
    self.push(criterion);
    self
  }

  pub fn len(&self) -> usize { self.criteria.len() }

  pub fn is_empty(&self) -> bool { self.criteria.is_empty() }
}

impl FilterCriteria for CompositeFilter {
  fn matches(&self, media: &Media) -> bool {
    match self.operator {
      Operator::And => self.criteria.iter().all(|c| c.matches(media)),
      Operator::Or => self.criteria.iter().any(|c| c.matches(media)),
    }
  }
}

impl std::fmt::Debug for CompositeFilter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CompositeFilter")
      .field("operator", &self.operator)
      .field("criteria", &self.criteria.len())
      .finish()
  }
}

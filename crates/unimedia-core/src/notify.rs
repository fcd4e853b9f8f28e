//! New-media notifications.
//!
//! When media is added, the [`crate::Library`] walks its subscribers in
//! registration order. Student subscribers turn into a [`Notice`] handed to
//! the library's [`NotificationSink`] when the media touches one of their
//! subjects; other subscribers implement [`MediaObserver`] directly.
//! Delivery errors are logged and never abort the walk.

use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::media::Media;

#[derive(Debug, Error)]
pub enum NotifyError {
  #[error("notification delivery failed: {0}")]
  Delivery(String),
}

/// A "new media available" message for one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub recipient:   String,
  pub media_id:    String,
  pub media_title: String,
}

impl Notice {
  pub fn new(recipient: &str, media: &Media) -> Self {
    Self {
      recipient:   recipient.to_owned(),
      media_id:    media.id.clone(),
      media_title: media.title.clone(),
    }
  }
}

/// Where student notices end up.
pub trait NotificationSink: Send + Sync {
  fn deliver(&self, notice: &Notice) -> Result<(), NotifyError>;
}

/// Any other party interested in newly added media.
pub trait MediaObserver: Send + Sync {
  fn media_added(&self, media: &Media) -> Result<(), NotifyError>;
}

// ─── Sinks ───────────────────────────────────────────────────────────────────

/// Writes each notice as a `tracing` event.
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
  fn deliver(&self, notice: &Notice) -> Result<(), NotifyError> {
    tracing::info!(
      recipient = %notice.recipient,
      media_id = %notice.media_id,
      "EMAIL to {}: New media '{}' available",
      notice.recipient,
      notice.media_title
    );
    Ok(())
  }
}

/// Drops every notice.
#[derive(Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
  fn deliver(&self, _notice: &Notice) -> Result<(), NotifyError> { Ok(()) }
}

/// Keeps notices in memory; handy for tests and for callers that render
/// notices themselves. Clones share one buffer, so keep a clone to read back
/// what a library delivered.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
  notices: Arc<Mutex<Vec<Notice>>>,
}

impl MemorySink {
  pub fn new() -> Self { Self::default() }

  /// Remove and return everything delivered so far.
  pub fn take(&self) -> Vec<Notice> {
    match self.notices.lock() {
      Ok(mut guard) => std::mem::take(&mut *guard),
      Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
    }
  }
}

impl NotificationSink for MemorySink {
  fn deliver(&self, notice: &Notice) -> Result<(), NotifyError> {
    self
      .notices
      .lock()
      .map_err(|e| NotifyError::Delivery(e.to_string()))?
      .push(notice.clone());
    Ok(())
  }
}

// ─── Subscriber list ─────────────────────────────────────────────────────────

/// One entry in the library's subscriber list.
pub(crate) enum Subscriber {
  /// A registered student, by username.
  Student(String),
  Observer(Box<dyn MediaObserver>),
}

//! Error types for `unimedia-core`.
//!
//! Lookups never fail: an absent key is reported as `None`, an empty list or
//! `false`. The only errors raised here come from media construction.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("unknown media type: {0:?}")]
  UnknownMediaType(String),

  #[error("invalid arguments for {media_type}: {reason}")]
  InvalidArguments {
    media_type: String,
    reason:     String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Error types for `unimedia-text`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("xml error: {0}")]
  Xml(String),

  #[error("malformed roster document: {0}")]
  Malformed(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn xml_err(e: impl std::fmt::Display) -> Error { Error::Xml(e.to_string()) }

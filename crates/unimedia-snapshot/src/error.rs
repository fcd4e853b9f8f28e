//! Error type for `unimedia-snapshot`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),

  #[error("could not encode snapshot: {0}")]
  Encode(String),

  #[error("could not decode snapshot: {0}")]
  Decode(String),

  /// The file does not start with the snapshot magic.
  #[error("not a snapshot file")]
  BadMagic,

  #[error("unsupported snapshot version {0}")]
  UnsupportedVersion(u8),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

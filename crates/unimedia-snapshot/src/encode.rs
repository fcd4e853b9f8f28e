//! Framing and `rkyv` (de)serialisation of [`LibraryData`].

use rkyv::{rancor::Error as RkyvError, util::AlignedVec};
use unimedia_core::LibraryData;

use crate::{Error, Result};

pub const MAGIC: &[u8; 8] = b"UNIMEDIA";
pub const FORMAT_VERSION: u8 = 1;

const HEADER_LEN: usize = MAGIC.len() + 1;

pub fn encode(data: &LibraryData) -> Result<Vec<u8>> {
  let archive = rkyv::to_bytes::<RkyvError>(data)
    .map_err(|e| Error::Encode(e.to_string()))?;

  let mut out = Vec::with_capacity(HEADER_LEN + archive.len());
  out.extend_from_slice(MAGIC);
  out.push(FORMAT_VERSION);
  out.extend_from_slice(archive.as_slice());
  Ok(out)
}

/// Check the header and decode the archive that follows it.
///
/// The archive is validated before anything is deserialised.
pub fn decode(bytes: &[u8]) -> Result<LibraryData> {
  let Some(body) = bytes.strip_prefix(MAGIC.as_slice()) else {
    return Err(Error::BadMagic);
  };
  let Some((&version, archive)) = body.split_first() else {
    return Err(Error::Decode("missing format version".into()));
  };
  if version != FORMAT_VERSION {
    return Err(Error::UnsupportedVersion(version));
  }

  // rkyv needs the archive suitably aligned; a file buffer is not.
  let mut aligned: AlignedVec = AlignedVec::with_capacity(archive.len());
  aligned.extend_from_slice(archive);

  rkyv::from_bytes::<LibraryData, RkyvError>(&aligned)
    .map_err(|e| Error::Decode(e.to_string()))
}

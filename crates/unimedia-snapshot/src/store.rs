use std::{
  fs,
  path::{Path, PathBuf},
};

use unimedia_core::Library;

use crate::{Result, encode};

/// A snapshot file on disk.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
  path: PathBuf,
}

impl SnapshotFile {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  pub fn exists(&self) -> bool { self.path.exists() }

  /// Write every collection of `library`, replacing the file.
  pub fn save(&self, library: &Library) -> Result<()> {
    let data = library.snapshot();
    let bytes = encode::encode(&data)?;
    fs::write(&self.path, &bytes)?;
    tracing::info!(
      path = %self.path.display(),
      media = data.media.len(),
      students = data.students.len(),
      bytes = bytes.len(),
      "snapshot saved"
    );
    Ok(())
  }

  /// Replace the contents of `library` with the file's.
  ///
  /// The file is read and decoded in full first; on any error `library` is
  /// left as it was.
  pub fn load(&self, library: &mut Library) -> Result<()> {
    let bytes = fs::read(&self.path)?;
    let data = encode::decode(&bytes)?;
    let media = data.media.len();
    library.restore(data);
    tracing::info!(path = %self.path.display(), media, "snapshot loaded");
    Ok(())
  }
}

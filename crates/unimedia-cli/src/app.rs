//! The on-disk workspace: one library backed by a snapshot and a roster.

use anyhow::Context as _;
use unimedia_core::{
  Library,
  factory::MediaFactoryRegistry,
  notify::{LogSink, NullSink},
};
use unimedia_snapshot::SnapshotFile;
use unimedia_text::RosterDocument;

use crate::Settings;

pub struct Workspace {
  pub library:   Library,
  pub factories: MediaFactoryRegistry,
  snapshot:      SnapshotFile,
  roster:        RosterDocument,
}

impl Workspace {
  /// Load the snapshot, if there is one, then merge the roster document on
  /// top of it. A missing roster document is created with default content.
  pub fn open(settings: &Settings) -> anyhow::Result<Self> {
    let mut library = if settings.notify_students {
      Library::with_sink(LogSink)
    } else {
      Library::with_sink(NullSink)
    };

    let snapshot = SnapshotFile::new(&settings.snapshot_path);
    if snapshot.exists() {
      snapshot.load(&mut library).with_context(|| {
        format!("failed to load snapshot {}", snapshot.path().display())
      })?;
    } else {
      tracing::debug!(path = %snapshot.path().display(), "no snapshot yet");
    }

    let roster = RosterDocument::new(&settings.document_path);
    roster.load_into(&mut library).with_context(|| {
      format!("failed to load roster {}", roster.path().display())
    })?;

    Ok(Self {
      library,
      factories: MediaFactoryRegistry::with_builtin(),
      snapshot,
      roster,
    })
  }

  /// Write both the snapshot and the roster document.
  pub fn save(&self) -> anyhow::Result<()> {
    self.snapshot.save(&self.library).with_context(|| {
      format!("failed to save snapshot {}", self.snapshot.path().display())
    })?;
    self.roster.save(&self.library).with_context(|| {
      format!("failed to save roster {}", self.roster.path().display())
    })?;
    Ok(())
  }
}

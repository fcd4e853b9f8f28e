//! Text-format adapters for the media catalogue.
//!
//! - [`roster`]: the `universite.xml` document holding administrators,
//!   specialties, students and their enrolments. It never carries media.
//! - [`export`]: write-only media listings in XML and CSV.
//!
//! Uses `quick-xml`'s event reader and writer; no DOM is built.

pub mod error;
pub mod export;
pub mod roster;
mod write;

pub use error::{Error, Result};
pub use export::{ExportFormat, export_media, export_media_to_path};
pub use roster::{LoadSummary, Roster, RosterDocument};

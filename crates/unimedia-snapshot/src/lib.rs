//! Binary snapshots of a whole [`unimedia_core::Library`].
//!
//! A snapshot file is the 8-byte magic `UNIMEDIA`, one format-version byte,
//! then an `rkyv` archive of [`unimedia_core::LibraryData`]. Unlike the
//! roster document it carries everything, media and access counts included.

mod encode;
mod store;

pub mod error;

pub use encode::{FORMAT_VERSION, MAGIC, decode, encode};
pub use error::{Error, Result};
pub use store::SnapshotFile;

#[cfg(test)]
mod tests;

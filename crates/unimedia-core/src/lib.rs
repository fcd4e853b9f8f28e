//! Core types and operations for the university media catalogue.
//!
//! This crate owns the entity model, the media filter language, the media
//! factory registry and the in-memory [`Library`]. It performs no file I/O;
//! persistence lives in `unimedia-text` and `unimedia-snapshot`.

pub mod account;
pub mod error;
pub mod factory;
pub mod filter;
pub mod library;
pub mod media;
pub mod notify;
pub mod report;
pub mod subject;

pub use error::{Error, Result};
pub use library::{Library, LibraryData};

//! Tracked image manifest
//!
//! - [`types`]: Image records as declared in the manifest file
//! - [`loader`]: Reading and parsing the manifest from disk

pub mod loader;
pub mod types;

pub use loader::{ManifestError, load_manifest};
pub use types::{ImageRecord, Manifest};

//! Shared test utilities for the plugsync workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`archive`]: zip fixtures built in memory
//! - [`root`]: [`TestRoot`] sandbox with a plugin root and a source area

pub mod archive;
pub mod root;

pub use archive::write_zip;
pub use root::{TestRoot, file_url};

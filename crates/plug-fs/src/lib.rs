//! Filesystem layer for plugsync
//!
//! Provides plugin root resolution, the forced removal / tree copy / rename
//! primitives used by the install transaction, and format-agnostic config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use layout::{PluginRoot, default_root_dir};
pub use path::{enclosed_relative, validate_path_identifier};

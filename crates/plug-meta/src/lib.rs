//! Configuration schema for plugsync.
//!
//! A [`RunConfig`] lists the plugins to install and the fetchers able to
//! retrieve them. Fetch modes are resolved once, while deserializing.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod plugin;

pub use config::{DEFAULT_NEW_SUFFIX, DEFAULT_OLD_SUFFIX, RunConfig, load_config};
pub use error::{Error, Result};
pub use fetcher::{FetchMode, FetcherSpec};
pub use plugin::{PluginFlags, PluginSpec};

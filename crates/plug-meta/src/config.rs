//! Run configuration loading
//!
//! A run configuration is a single file (TOML by default):
//!
//! ```toml
//! new_dir_pfx = "-new"
//! old_dir_pfx = "-old"
//!
//! [[gets]]
//! type = "git"
//! run = "git clone --depth 1 {0} {1}"
//! remove_dir = ".git"
//!
//! [[plugins]]
//! name = "nerdtree"
//! dest = "bundle"
//! get_type = "git"
//! url = "https://github.com/preservim/nerdtree.git"
//! ```

use std::path::{Path, PathBuf};

use plug_fs::{ConfigStore, enclosed_relative, validate_path_identifier};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::fetcher::FetcherSpec;
use crate::plugin::PluginSpec;

pub const DEFAULT_NEW_SUFFIX: &str = "-new";
pub const DEFAULT_OLD_SUFFIX: &str = "-old";

fn default_new_suffix() -> String {
    DEFAULT_NEW_SUFFIX.to_string()
}

fn default_old_suffix() -> String {
    DEFAULT_OLD_SUFFIX.to_string()
}

/// Everything a run needs. Loaded once, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Overrides the platform plugin home
    #[serde(default)]
    pub plugin_root: Option<PathBuf>,
    /// Suffix of staging directories
    #[serde(rename = "new_dir_pfx", default = "default_new_suffix")]
    pub new_suffix: String,
    /// Suffix of retired directories
    #[serde(rename = "old_dir_pfx", default = "default_old_suffix")]
    pub old_suffix: String,
    /// Keep retired directories after a swap instead of removing them
    #[serde(default)]
    pub keep_old: bool,
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,
    #[serde(rename = "gets", alias = "fetchers", default)]
    pub fetchers: Vec<FetcherSpec>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            plugin_root: None,
            new_suffix: default_new_suffix(),
            old_suffix: default_old_suffix(),
            keep_old: false,
            plugins: Vec::new(),
            fetchers: Vec::new(),
        }
    }
}

impl RunConfig {
    /// Check the structural invariants that do not depend on the filesystem.
    ///
    /// Fetcher resolution is left to the run plan so that an unknown type is
    /// reported with its own error.
    pub fn validate(&self) -> Result<()> {
        if self.new_suffix.is_empty() || self.old_suffix.is_empty() {
            return Err(Error::invalid("new_dir_pfx and old_dir_pfx must not be empty"));
        }
        if self.new_suffix == self.old_suffix {
            return Err(Error::invalid(format!(
                "new_dir_pfx and old_dir_pfx must differ (both are '{}')",
                self.new_suffix
            )));
        }
        for suffix in [&self.new_suffix, &self.old_suffix] {
            if suffix.contains('/') || suffix.contains('\\') {
                return Err(Error::invalid(format!(
                    "Directory suffix '{suffix}' must not contain path separators"
                )));
            }
        }

        for plugin in &self.plugins {
            if plugin.name.is_empty() {
                return Err(Error::invalid("Plugin name must not be empty"));
            }
            validate_destination(&plugin.destination).map_err(|msg| {
                Error::invalid(format!("Plugin '{}': {}", plugin.name, msg))
            })?;
            // The name becomes a file or directory name inside the staging dir.
            validate_path_identifier(&plugin.name, "Plugin name").map_err(Error::invalid)?;
            for (field, value) in [
                ("extract", plugin.extract.as_deref()),
                ("remove_dir", plugin.remove_dir.as_deref()),
                ("type", plugin.kind.as_deref()),
            ] {
                if let Some(value) = value
                    && enclosed_relative(value).is_none()
                {
                    return Err(Error::invalid(format!(
                        "Plugin '{}': {} '{}' must stay inside the plugin directory",
                        plugin.name, field, value
                    )));
                }
            }
        }

        for fetcher in &self.fetchers {
            if let Some(dir) = fetcher.remove_dir.as_deref()
                && enclosed_relative(dir).is_none()
            {
                return Err(Error::invalid(format!(
                    "Fetcher '{}': remove_dir '{}' must stay inside the working directory",
                    fetcher.fetch_type, dir
                )));
            }
        }
        Ok(())
    }
}

/// A destination is a relative slot under the plugin root, possibly nested
/// (`after/plugin`), that never leaves it.
fn validate_destination(destination: &str) -> std::result::Result<(), String> {
    let enclosed = enclosed_relative(destination);
    if enclosed.as_ref().is_none_or(|p| p.as_os_str().is_empty()) {
        return Err(format!(
            "Destination '{destination}' must be a relative path inside the plugin root"
        ));
    }
    if destination.ends_with('/') || destination.ends_with('\\') {
        return Err(format!("Destination '{destination}' must not end with a separator"));
    }
    Ok(())
}

/// Load and validate the run configuration at `path`.
pub fn load_config(path: &Path) -> Result<RunConfig> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let config: RunConfig = ConfigStore::new().load(path)?;
    config.validate()?;
    debug!(
        "Loaded {} plugins and {} fetchers from {}",
        config.plugins.len(),
        config.fetchers.len(),
        path.display()
    );
    Ok(config)
}

//! Plugin root layout
//!
//! Every logical destination `D` lives at `root/D`. During a run it gets a
//! staging sibling `root/D{new_suffix}` and, briefly, a retired sibling
//! `root/D{old_suffix}`.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Directory name of the plugin home on Windows.
pub const WINDOWS_HOME_DIR: &str = "vimfiles";

/// Directory name of the plugin home everywhere else.
pub const UNIX_HOME_DIR: &str = ".vim";

/// Destination that receives local plugins.
pub const LOCAL_BUNDLE_DEST: &str = "bundle";

/// Platform-specific plugin home: `~/vimfiles` on Windows, `~/.vim` otherwise.
pub fn default_root_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(Error::HomeDirNotFound)?;
    Ok(home.join(home_dir_name(cfg!(windows))))
}

/// Name of the plugin home directory for the given platform.
pub fn home_dir_name(windows: bool) -> &'static str {
    if windows { WINDOWS_HOME_DIR } else { UNIX_HOME_DIR }
}

/// Resolved plugin root with the path computations of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRoot {
    root: PathBuf,
}

impl PluginRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Use `explicit` when given, the platform default otherwise.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Ok(Self::new(path)),
            None => default_root_dir().map(Self::new),
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// `root/destination`
    pub fn live_dir(&self, destination: &str) -> PathBuf {
        self.root.join(destination)
    }

    /// `root/(destination + new_suffix)`
    pub fn staging_dir(&self, destination: &str, new_suffix: &str) -> PathBuf {
        self.root.join(format!("{destination}{new_suffix}"))
    }

    /// `root/(destination + old_suffix)`
    pub fn backup_dir(&self, destination: &str, old_suffix: &str) -> PathBuf {
        self.root.join(format!("{destination}{old_suffix}"))
    }

    /// Staging directory that receives local plugins.
    pub fn local_bundle_dir(&self, new_suffix: &str) -> PathBuf {
        self.staging_dir(LOCAL_BUNDLE_DEST, new_suffix)
    }
}

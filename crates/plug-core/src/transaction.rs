//! Per-destination install transaction
//!
//! A transaction owns the three sibling directories of one destination:
//! the live directory, its `-new` staging directory and its `-old` backup.

use std::path::{Path, PathBuf};

use plug_fs::{PluginRoot, io as fsio};
use tracing::{debug, info};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTransaction {
    destination: String,
    live: PathBuf,
    staging: PathBuf,
    backup: PathBuf,
}

impl InstallTransaction {
    /// Paths of `destination` under `root`, without touching the filesystem.
    pub fn new(root: &PluginRoot, destination: &str, new_suffix: &str, old_suffix: &str) -> Self {
        Self {
            destination: destination.to_string(),
            live: root.live_dir(destination),
            staging: root.staging_dir(destination, new_suffix),
            backup: root.backup_dir(destination, old_suffix),
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn live_dir(&self) -> &Path {
        &self.live
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup
    }

    /// Fail if a staging directory survived an earlier run.
    pub fn check_conflict(&self) -> Result<()> {
        if self.staging.exists() {
            return Err(Error::StagingConflict {
                path: self.staging.clone(),
            });
        }
        Ok(())
    }

    /// Check for a conflict, then create the staging directory.
    pub fn begin(&self) -> Result<()> {
        self.check_conflict()?;
        debug!("Staging {} in {}", self.destination, self.staging.display());
        fsio::create_dir_all(&self.staging)?;
        Ok(())
    }

    /// Promote the staging directory to the live path.
    ///
    /// A stale backup is removed, the live directory is retired to the backup
    /// path and the staging directory renamed into its place. The backup is
    /// then removed unless `keep_old` is set.
    ///
    /// Returns whether a staging directory was promoted.
    pub fn commit(&self, keep_old: bool) -> Result<bool> {
        if self.backup.exists() {
            fsio::remove_dir_all_forced(&self.backup)?;
        }
        if self.live.exists() {
            fsio::rename(&self.live, &self.backup)?;
        }
        let promoted = self.staging.exists();
        if promoted {
            fsio::rename(&self.staging, &self.live)?;
            info!("Installed {}", self.live.display());
        }
        if !keep_old && self.backup.exists() {
            fsio::remove_dir_all_forced(&self.backup)?;
        }
        Ok(promoted)
    }
}

//! Local plugin import
//!
//! Plugins kept next to the program in a `local` directory are copied into
//! the bundle staging directory on every run.

use std::fs;
use std::path::{Path, PathBuf};

use plug_fs::io as fsio;
use tracing::{debug, info};

use crate::Result;

/// Name of the directory holding local plugins.
pub const LOCAL_DIR_NAME: &str = "local";

/// Directory whose sub-directories are imported as plugins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSource {
    dir: PathBuf,
}

impl LocalSource {
    /// Use `dir` as the local plugin directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `local` next to the program when `program` names an existing path,
    /// `./local` otherwise.
    pub fn from_program_path(program: &Path) -> Self {
        let base = if program.exists() {
            match program.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            }
        } else {
            PathBuf::from(".")
        };
        Self::new(base.join(LOCAL_DIR_NAME))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Directories directly under the local directory, sorted by name.
    ///
    /// A missing local directory has no entries.
    pub fn entries(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            debug!("No local plugins at {}", self.dir.display());
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(|e| plug_fs::Error::io(&self.dir, e))? {
            let path = entry.map_err(|e| plug_fs::Error::io(&self.dir, e))?.path();
            if path.is_dir() {
                entries.push(path);
            }
        }
        entries.sort();
        Ok(entries)
    }

    /// Copy every local plugin into `bundles_dir/<name>`.
    ///
    /// Copying onto an existing plugin directory fails. Returns the names of
    /// the imported plugins.
    pub fn import(&self, bundles_dir: &Path) -> Result<Vec<String>> {
        let mut imported = Vec::new();
        for from in self.entries()? {
            let Some(name) = from.file_name() else {
                continue;
            };
            let to = bundles_dir.join(name);
            info!("Copying local files from {} to {}", from.display(), to.display());
            fsio::copy_tree(&from, &to)?;
            imported.push(name.to_string_lossy().into_owned());
        }
        Ok(imported)
    }
}

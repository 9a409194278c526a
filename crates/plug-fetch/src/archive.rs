//! Zip archive staging
//!
//! Archives are recognised by content, not by extension. Extraction keeps
//! every entry's internal path but refuses archives whose entries would land
//! outside the target directory.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use plug_fs::{enclosed_relative, io as fsio};
use tracing::info;
use zip::ZipArchive;

use crate::{Error, Result};

/// Whether `file` is a readable zip archive.
pub fn is_archive(file: &Path) -> bool {
    File::open(file)
        .ok()
        .and_then(|f| ZipArchive::new(f).ok())
        .is_some()
}

/// Extract every entry of `archive_file` into `target_dir`.
///
/// Creates `target_dir` and intermediate directories as needed. Entry paths
/// are validated up front, so a rejected archive writes nothing.
/// Returns the number of files written.
pub fn extract(archive_file: &Path, target_dir: &Path) -> Result<usize> {
    let file = File::open(archive_file).map_err(|e| plug_fs::Error::io(archive_file, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| invalid(archive_file, e))?;

    let mut entries: Vec<(usize, PathBuf, bool)> = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index(index).map_err(|e| invalid(archive_file, e))?;
        let raw = entry.name().to_string();
        let relative = enclosed_relative(&raw)
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| Error::UnsafeArchiveEntry {
                path: archive_file.to_path_buf(),
                entry: raw.clone(),
            })?;
        entries.push((index, relative, entry.is_dir()));
    }

    fsio::create_dir_all(target_dir)?;
    let mut written = 0;
    for (index, relative, is_dir) in entries {
        let out = target_dir.join(&relative);
        if is_dir {
            fsio::create_dir_all(&out)?;
            continue;
        }
        if let Some(parent) = out.parent() {
            fsio::create_dir_all(parent)?;
        }
        info!("Extracting {} to {}", relative.display(), target_dir.display());
        let mut entry = archive.by_index(index).map_err(|e| invalid(archive_file, e))?;
        let mut out_file = File::create(&out).map_err(|e| plug_fs::Error::io(&out, e))?;
        io::copy(&mut entry, &mut out_file).map_err(|e| plug_fs::Error::io(&out, e))?;
        written += 1;
    }
    Ok(written)
}

fn invalid(path: &Path, err: zip::result::ZipError) -> Error {
    Error::InvalidArchive {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

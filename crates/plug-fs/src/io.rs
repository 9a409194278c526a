//! Directory operations used by the install transaction

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{Error, Result};

/// Create `path` and all missing parents.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Rename `from` to `to`. Both must live on the same filesystem.
pub fn rename(from: &Path, to: &Path) -> Result<()> {
    debug!("Renaming {} to {}", from.display(), to.display());
    fs::rename(from, to).map_err(|e| Error::io(from, e))
}

/// Recursively remove `path`, clearing read-only attributes first.
///
/// Unpacked plugin content (git object stores in particular) frequently
/// carries read-only files that would otherwise block the removal on Windows.
pub fn remove_dir_all_forced(path: &Path) -> Result<()> {
    debug!("Removing {}", path.display());
    make_tree_writable(path)?;
    fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
}

fn make_tree_writable(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| Error::io(path, e))?;
    if metadata.file_type().is_symlink() {
        return Ok(());
    }
    make_writable(path, metadata.permissions())?;
    if metadata.is_dir() {
        for entry in fs::read_dir(path).map_err(|e| Error::io(path, e))? {
            let entry = entry.map_err(|e| Error::io(path, e))?;
            make_tree_writable(&entry.path())?;
        }
    }
    Ok(())
}

fn make_writable(path: &Path, mut perms: fs::Permissions) -> Result<()> {
    if !perms.readonly() {
        return Ok(());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        perms.set_mode(perms.mode() | 0o200);
    }
    #[cfg(not(unix))]
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    fs::set_permissions(path, perms).map_err(|e| Error::io(path, e))
}

/// Recursively copy the directory `from` to `to`.
///
/// `to` must not exist yet; copying into an existing tree is refused with
/// [`Error::CopyTargetExists`].
pub fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(Error::CopyTargetExists {
            path: to.to_path_buf(),
        });
    }
    create_dir_all(to)?;
    for entry in fs::read_dir(from).map_err(|e| Error::io(from, e))? {
        let entry = entry.map_err(|e| Error::io(from, e))?;
        let source = entry.path();
        let target = to.join(entry.file_name());
        if source.is_dir() {
            copy_tree(&source, &target)?;
        } else {
            fs::copy(&source, &target).map_err(|e| Error::io(&source, e))?;
        }
    }
    Ok(())
}

/// Move every entry of `sub_dir` into `parent`, then remove `sub_dir`.
///
/// Files already present in `parent` are overwritten; a directory collision
/// fails with [`Error::MoveTargetExists`]. Missing `sub_dir` is a no-op.
/// Returns the number of moved entries.
pub fn move_contents_up(sub_dir: &Path, parent: &Path) -> Result<usize> {
    if !sub_dir.is_dir() {
        return Ok(0);
    }
    let mut moved = 0;
    for entry in fs::read_dir(sub_dir).map_err(|e| Error::io(sub_dir, e))? {
        let entry = entry.map_err(|e| Error::io(sub_dir, e))?;
        let target = parent.join(entry.file_name());
        if target.is_dir() {
            return Err(Error::MoveTargetExists { path: target });
        }
        if target.exists() {
            fs::remove_file(&target).map_err(|e| Error::io(&target, e))?;
        }
        rename(&entry.path(), &target)?;
        moved += 1;
    }
    remove_dir_all_forced(sub_dir)?;
    Ok(moved)
}

//! Validation of config-supplied path fragments

use std::path::{Component, Path, PathBuf};

/// Validate that `value` is safe to use as a single directory component.
///
/// `kind` names the value in the returned message (e.g. "Destination").
pub fn validate_path_identifier(value: &str, kind: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} must not be empty"));
    }
    if value == "." || value == ".." {
        return Err(format!("{kind} '{value}' is not a valid directory name"));
    }
    if value.contains('/') || value.contains('\\') {
        return Err(format!("{kind} '{value}' must not contain path separators"));
    }
    if value.contains('\0') {
        return Err(format!("{kind} '{value}' must not contain NUL bytes"));
    }
    Ok(())
}

/// Normalize a relative path, refusing anything that would leave its base.
///
/// Returns `None` for absolute paths, prefixes and any `..` component.
/// `.` components are dropped; an empty result is returned as an empty path.
pub fn enclosed_relative(path: impl AsRef<Path>) -> Option<PathBuf> {
    let raw = path.as_ref().to_string_lossy().replace('\\', "/");
    let mut cleaned = PathBuf::new();
    for component in Path::new(&raw).components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::ParentDir => return None,
            Component::CurDir => {}
            Component::Normal(part) => cleaned.push(part),
        }
    }
    Some(cleaned)
}

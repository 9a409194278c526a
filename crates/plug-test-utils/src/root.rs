//! [`TestRoot`] sandbox for plugsync test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary sandbox split into a plugin root (`vim/`) and a source area
/// (`src/`) holding configs, archives and local plugins.
///
/// # Example
///
/// ```rust,no_run
/// use plug_test_utils::TestRoot;
///
/// let sandbox = TestRoot::new();
/// sandbox.write_source("local/mine/plugin/mine.vim", "\" mine");
/// sandbox.assert_not_exists("bundle");
/// ```
pub struct TestRoot {
    temp_dir: TempDir,
}

impl Default for TestRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRoot {
    /// Create the sandbox with empty `vim/` and `src/` directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("vim")).unwrap();
        fs::create_dir_all(temp_dir.path().join("src")).unwrap();
        Self { temp_dir }
    }

    /// The plugin root installs land in.
    pub fn plugin_root(&self) -> PathBuf {
        self.temp_dir.path().join("vim")
    }

    /// The source area.
    pub fn sources(&self) -> PathBuf {
        self.temp_dir.path().join("src")
    }

    /// Path of `relative` under the plugin root.
    pub fn installed(&self, relative: &str) -> PathBuf {
        self.plugin_root().join(relative)
    }

    /// Write `content` to `relative` under the source area, creating parents.
    pub fn write_source(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.sources().join(relative);
        write_with_parents(&path, content);
        path
    }

    /// Write `content` to `relative` under the plugin root, creating parents.
    pub fn write_installed(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.installed(relative);
        write_with_parents(&path, content);
        path
    }

    /// Write a zip under the source area and return its `file://` URL.
    pub fn zip_source(&self, relative: &str, entries: &[(&str, &str)]) -> String {
        let path = self.sources().join(relative);
        crate::archive::write_zip(&path, entries);
        file_url(&path)
    }

    /// Write `plugins.toml` into the source area.
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write_source("plugins.toml", content)
    }

    /// Assert that `relative` exists under the plugin root.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, relative: &str) {
        let full_path = self.installed(relative);
        assert!(
            full_path.exists(),
            "Expected path to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist under the plugin root.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_not_exists(&self, relative: &str) {
        let full_path = self.installed(relative);
        assert!(
            !full_path.exists(),
            "Expected path NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `relative` under the plugin root contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let full_path = self.installed(relative);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }

    /// Assert that no entry of the plugin root ends in `-new` or `-old`.
    ///
    /// # Panics
    /// Panics naming the first leftover transaction directory.
    pub fn assert_no_transaction_dirs(&self) {
        for entry in fs::read_dir(self.plugin_root()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().into_owned();
            assert!(
                !name.ends_with("-new") && !name.ends_with("-old"),
                "Leftover transaction directory: {name}"
            );
        }
    }

    /// Sorted names directly under the plugin root.
    pub fn root_entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.plugin_root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// `file://` URL for an absolute local path.
pub fn file_url(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    if raw.starts_with('/') {
        format!("file://{raw}")
    } else {
        format!("file:///{raw}")
    }
}

fn write_with_parents(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

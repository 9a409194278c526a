//! Plugin definitions

use serde::{Deserialize, Serialize};

/// One plugin entry, as configured under `[[plugins]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub name: String,
    /// Sub-folder inside the plugin directory receiving downloads (e.g. "plugin")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Extension of the downloaded file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    /// Logical install slot, shared between plugins
    #[serde(rename = "dest")]
    pub destination: String,
    /// Key of the fetcher to use
    #[serde(rename = "get_type")]
    pub fetch_type: String,
    /// URL or command argument
    #[serde(rename = "url")]
    pub source: String,
    /// Present when the download must be unpacked; value is the sub-path
    /// to extract into (empty for none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extract: Option<String>,
    #[serde(default)]
    pub no_sub_dirs: bool,
    /// Directory removed after a command run; overrides the fetcher's
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_dir: Option<String>,
}

/// Boolean view of a plugin's install flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PluginFlags {
    pub no_sub_dirs: bool,
    pub extract_archive: bool,
    pub remove_sub_dir_after_unpack: bool,
}

impl PluginSpec {
    pub fn new(
        name: impl Into<String>,
        destination: impl Into<String>,
        fetch_type: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: None,
            ext: None,
            destination: destination.into(),
            fetch_type: fetch_type.into(),
            source: source.into(),
            extract: None,
            no_sub_dirs: false,
            remove_dir: None,
        }
    }

    pub fn flags(&self) -> PluginFlags {
        PluginFlags {
            no_sub_dirs: self.no_sub_dirs,
            extract_archive: self.extract.is_some(),
            remove_sub_dir_after_unpack: self.no_sub_dirs,
        }
    }

    /// Sub-path to extract into, if one was given.
    pub fn archive_subpath(&self) -> Option<&str> {
        self.extract.as_deref().filter(|s| !s.is_empty())
    }

    /// File name for a download: `name.ext`, or `name` without an extension.
    pub fn download_file_name(&self) -> String {
        match self.ext.as_deref() {
            Some(ext) if !ext.is_empty() => format!("{}.{}", self.name, ext),
            _ => self.name.clone(),
        }
    }
}

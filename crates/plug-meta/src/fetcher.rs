//! Fetcher definitions

use serde::Deserialize;

/// How a fetcher turns a plugin's source into files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchMode {
    /// Download `url_template` (placeholder `{0}` = plugin source).
    Download { url_template: String },

    /// Run `command_template` (`{0}` = plugin source, `{1}` = working directory).
    ///
    /// The template is split into an argument vector unless `shell` is set,
    /// in which case it is handed to the system shell as a single string.
    ExternalCommand {
        command_template: String,
        shell: bool,
    },

    /// Neither a download nor a command template was configured.
    Unsupported,
}

impl FetchMode {
    pub fn label(&self) -> &'static str {
        match self {
            FetchMode::Download { .. } => "download",
            FetchMode::ExternalCommand { .. } => "command",
            FetchMode::Unsupported => "unsupported",
        }
    }
}

/// A named fetch strategy, as configured under `[[gets]]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawFetcherSpec")]
pub struct FetcherSpec {
    /// Key matched against `PluginSpec::fetch_type`
    pub fetch_type: String,
    pub mode: FetchMode,
    /// Directory removed from the working directory after a command run
    pub remove_dir: Option<String>,
}

impl FetcherSpec {
    pub fn download(fetch_type: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            fetch_type: fetch_type.into(),
            mode: FetchMode::Download {
                url_template: url_template.into(),
            },
            remove_dir: None,
        }
    }

    pub fn command(fetch_type: impl Into<String>, command_template: impl Into<String>) -> Self {
        Self {
            fetch_type: fetch_type.into(),
            mode: FetchMode::ExternalCommand {
                command_template: command_template.into(),
                shell: false,
            },
            remove_dir: None,
        }
    }

    pub fn with_remove_dir(mut self, dir: impl Into<String>) -> Self {
        self.remove_dir = Some(dir.into());
        self
    }
}

/// On-disk shape of a fetcher entry.
#[derive(Debug, Clone, Deserialize)]
struct RawFetcherSpec {
    #[serde(rename = "type")]
    fetch_type: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    run: Option<String>,
    #[serde(default)]
    shell: bool,
    #[serde(default)]
    remove_dir: Option<String>,
}

impl From<RawFetcherSpec> for FetcherSpec {
    fn from(raw: RawFetcherSpec) -> Self {
        // A download template wins when both are present.
        let mode = match (raw.url, raw.run) {
            (Some(url_template), _) => FetchMode::Download { url_template },
            (None, Some(command_template)) => FetchMode::ExternalCommand {
                command_template,
                shell: raw.shell,
            },
            (None, None) => FetchMode::Unsupported,
        };
        Self {
            fetch_type: raw.fetch_type,
            mode,
            remove_dir: raw.remove_dir,
        }
    }
}

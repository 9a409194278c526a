//! Error types for plug-fetch

use std::path::PathBuf;

/// Result type for plug-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching a plugin
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] plug_fs::Error),

    #[error("No fetcher of type '{fetch_type}' for plugin '{plugin}'")]
    NoMatchingFetcher { plugin: String, fetch_type: String },

    #[error("{source_locator} parsing name error")]
    UnparseableName { source_locator: String },

    #[error("Download of {url} failed: {message}")]
    Download { url: String, message: String },

    #[error("{path} is not a valid zip file: {message}")]
    InvalidArchive { path: PathBuf, message: String },

    #[error("Archive {path} contains an entry escaping the target directory: {entry}")]
    UnsafeArchiveEntry { path: PathBuf, entry: String },

    #[error("Command template is empty: '{template}'")]
    EmptyCommand { template: String },

    #[error("Failed to start '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' failed with {}", describe_exit(.exit_code))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl Error {
    /// Problems that skip the rest of a plugin's steps without aborting the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidArchive { .. } | Error::UnsafeArchiveEntry { .. }
        )
    }
}

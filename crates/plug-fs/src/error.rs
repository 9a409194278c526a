//! Error types for plug-fs

use std::path::PathBuf;

/// Result type for plug-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in plug-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Could not determine the home directory")]
    HomeDirNotFound,

    #[error("Copy target already exists: {path}")]
    CopyTargetExists { path: PathBuf },

    #[error("Move target already exists: {path}")]
    MoveTargetExists { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

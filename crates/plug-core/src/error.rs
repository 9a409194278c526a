//! Error types for plug-core

use std::path::PathBuf;

/// Result type for plug-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A staging directory was left behind by an earlier run
    #[error("{path} already exists, remove it first!")]
    StagingConflict { path: PathBuf },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from plug-fs
    #[error(transparent)]
    Fs(#[from] plug_fs::Error),

    /// Configuration error from plug-meta
    #[error(transparent)]
    Meta(#[from] plug_meta::Error),

    /// Fetch error from plug-fetch
    #[error(transparent)]
    Fetch(#[from] plug_fetch::Error),
}

impl Error {
    /// Process exit code for this failure.
    ///
    /// | code | meaning |
    /// |------|---------|
    /// | 1 | configuration, I/O or local import failure |
    /// | 2 | staging directory conflict |
    /// | 3 | no fetcher matches a plugin's type |
    /// | 4 | no working name derivable from a command source |
    /// | 5 | download or command failure |
    pub fn exit_code(&self) -> i32 {
        use plug_fetch::Error as Fetch;

        match self {
            Error::StagingConflict { .. } => 2,
            Error::Fetch(Fetch::NoMatchingFetcher { .. }) => 3,
            Error::Fetch(Fetch::UnparseableName { .. }) => 4,
            Error::Fetch(Fetch::Fs(_)) => 1,
            Error::Fetch(_) => 5,
            Error::Fs(_) | Error::Meta(_) => 1,
        }
    }
}

//! Fetch strategies for plugsync
//!
//! - [`archive`]: zip sniffing and extraction
//! - [`transport`]: byte transfer for `http(s)://` and `file://` URLs
//! - [`download`] / [`command`]: the two fetch strategies
//! - [`dispatcher`]: resolves a plugin's fetcher and runs the matching strategy

pub mod archive;
pub mod command;
pub mod dispatcher;
pub mod download;
pub mod error;
pub mod template;
pub mod transport;

pub use command::{CommandFetcher, derive_work_name};
pub use dispatcher::{Dispatcher, FetchOutcome, Fetcher, find_fetcher};
pub use download::DownloadFetcher;
pub use error::{Error, Result};
pub use transport::{HttpTransport, Transport};

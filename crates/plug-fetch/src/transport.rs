//! Byte transfer from a URL to a local file

use std::fs::{self, File};
use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use tracing::debug;

use crate::{Error, Result};

/// Fetches the bytes behind a URL into a file.
pub trait Transport {
    /// Write the content of `url` to `dest`, returning the number of bytes.
    fn download(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Blocking HTTP(S) transport; `file://` URLs are copied from disk.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport. `timeout` of `None` keeps the client default.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("plugsync/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| Error::Download {
            url: String::new(),
            message: format!("Failed to create HTTP client: {e}"),
        })?;
        Ok(Self { client })
    }

    fn copy_local(&self, url: &Url, dest: &Path) -> Result<u64> {
        let source = url.to_file_path().map_err(|_| Error::Download {
            url: url.to_string(),
            message: "not a local file path".into(),
        })?;
        fs::copy(&source, dest).map_err(|e| Error::Download {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn fetch_remote(&self, url: &Url, dest: &Path) -> Result<u64> {
        let download_err = |message: String| Error::Download {
            url: url.to_string(),
            message,
        };

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| download_err(e.to_string()))?;

        let mut file = File::create(dest).map_err(|e| plug_fs::Error::io(dest, e))?;
        response
            .copy_to(&mut file)
            .map_err(|e| download_err(e.to_string()))
    }
}

impl Transport for HttpTransport {
    fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        let parsed = Url::parse(url).map_err(|e| Error::Download {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let bytes = match parsed.scheme() {
            "file" => self.copy_local(&parsed, dest)?,
            "http" | "https" => self.fetch_remote(&parsed, dest)?,
            other => {
                return Err(Error::Download {
                    url: url.to_string(),
                    message: format!("unsupported URL scheme '{other}'"),
                });
            }
        };
        debug!("Wrote {} bytes from {} to {}", bytes, url, dest.display());
        Ok(bytes)
    }
}

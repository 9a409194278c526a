//! Direct-download strategy

use std::path::{Path, PathBuf};

use plug_fs::{enclosed_relative, io as fsio};
use plug_meta::PluginSpec;
use tracing::{debug, info, warn};

use crate::archive;
use crate::dispatcher::{FetchOutcome, Fetcher};
use crate::template::substitute;
use crate::transport::Transport;
use crate::Result;

/// Downloads `url_template` (with `{0}` = plugin source) and optionally
/// unpacks the result.
///
/// Layout inside the staging directory `T`:
/// - default: file at `T/name/type/name.ext`, archive extracted to `T/name[/extract]`
/// - `no_sub_dirs`: file at `T/name.ext`, archive extracted to `T[/extract]`
pub struct DownloadFetcher<'a> {
    url_template: &'a str,
    transport: &'a dyn Transport,
}

impl<'a> DownloadFetcher<'a> {
    pub fn new(url_template: &'a str, transport: &'a dyn Transport) -> Self {
        Self {
            url_template,
            transport,
        }
    }

    /// Plugin directory and download directory for `plugin` under `target_dir`.
    pub fn layout(plugin: &PluginSpec, target_dir: &Path) -> (PathBuf, PathBuf) {
        if plugin.no_sub_dirs {
            return (target_dir.to_path_buf(), target_dir.to_path_buf());
        }
        let plugin_dir = target_dir.join(&plugin.name);
        let download_dir = match plugin.kind.as_deref().and_then(enclosed_relative) {
            Some(kind) => plugin_dir.join(kind),
            None => plugin_dir.clone(),
        };
        (plugin_dir, download_dir)
    }
}

impl Fetcher for DownloadFetcher<'_> {
    fn fetch(&self, plugin: &PluginSpec, target_dir: &Path) -> Result<FetchOutcome> {
        let (plugin_dir, download_dir) = Self::layout(plugin, target_dir);
        fsio::create_dir_all(&download_dir)?;

        let file = download_dir.join(plugin.download_file_name());
        let url = substitute(self.url_template, &[&plugin.source]);
        info!("Downloading {} to {}", plugin.name, download_dir.display());
        self.transport.download(&url, &file)?;

        if !plugin.flags().extract_archive {
            return Ok(FetchOutcome::installed());
        }

        if !archive::is_archive(&file) {
            let warning = format!("{} is not valid zip file!", file.display());
            warn!("{}", warning);
            return Ok(FetchOutcome::Installed {
                warnings: vec![warning],
            });
        }

        let extract_dir = match plugin.archive_subpath().and_then(enclosed_relative) {
            Some(subpath) => plugin_dir.join(subpath),
            None => plugin_dir,
        };
        info!("Extracting {} to {}", file.display(), extract_dir.display());
        match archive::extract(&file, &extract_dir) {
            Ok(count) => {
                debug!("Extracted {} files from {}", count, file.display());
                Ok(FetchOutcome::installed())
            }
            Err(e) if e.is_recoverable() => {
                warn!("{}", e);
                Ok(FetchOutcome::Installed {
                    warnings: vec![e.to_string()],
                })
            }
            Err(e) => Err(e),
        }
    }
}

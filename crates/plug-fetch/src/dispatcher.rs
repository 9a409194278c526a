//! Fetcher dispatch
//!
//! A plugin names its fetcher by type; the first configured fetcher of that
//! type wins. The fetcher's [`FetchMode`] selects the strategy.

use std::path::Path;

use plug_meta::{FetchMode, FetcherSpec, PluginSpec};
use tracing::warn;

use crate::command::CommandFetcher;
use crate::download::DownloadFetcher;
use crate::transport::Transport;
use crate::{Error, Result};

/// Result of fetching one plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Content landed in the target directory. `warnings` lists problems
    /// that cut the plugin's remaining steps short.
    Installed { warnings: Vec<String> },
    /// Nothing was fetched.
    Skipped { reason: String },
}

impl FetchOutcome {
    pub fn installed() -> Self {
        Self::Installed {
            warnings: Vec::new(),
        }
    }

    /// Messages worth surfacing in a run report.
    pub fn warnings(&self) -> Vec<String> {
        match self {
            FetchOutcome::Installed { warnings } => warnings.clone(),
            FetchOutcome::Skipped { reason } => vec![reason.clone()],
        }
    }
}

/// A fetch strategy.
pub trait Fetcher {
    /// Fetch `plugin` into `target_dir` (the destination's staging directory).
    fn fetch(&self, plugin: &PluginSpec, target_dir: &Path) -> Result<FetchOutcome>;
}

/// First fetcher in `fetchers` whose type equals `plugin.fetch_type`.
pub fn find_fetcher<'c>(
    fetchers: &'c [FetcherSpec],
    plugin: &PluginSpec,
) -> Result<&'c FetcherSpec> {
    fetchers
        .iter()
        .find(|f| f.fetch_type == plugin.fetch_type)
        .ok_or_else(|| Error::NoMatchingFetcher {
            plugin: plugin.name.clone(),
            fetch_type: plugin.fetch_type.clone(),
        })
}

/// Routes plugins to the strategy their fetcher selects.
pub struct Dispatcher {
    transport: Box<dyn Transport>,
}

impl Dispatcher {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Strategy for `spec`, or `None` when its mode is unsupported.
    pub fn fetcher_for<'a>(&'a self, spec: &'a FetcherSpec) -> Option<Box<dyn Fetcher + 'a>> {
        match &spec.mode {
            FetchMode::Download { url_template } => Some(Box::new(DownloadFetcher::new(
                url_template,
                self.transport.as_ref(),
            ))),
            FetchMode::ExternalCommand {
                command_template,
                shell,
            } => Some(Box::new(CommandFetcher::new(
                command_template,
                *shell,
                spec.remove_dir.as_deref(),
            ))),
            FetchMode::Unsupported => None,
        }
    }

    /// Look up the plugin's fetcher in `fetchers`, then fetch with it.
    pub fn dispatch(
        &self,
        plugin: &PluginSpec,
        fetchers: &[FetcherSpec],
        target_dir: &Path,
    ) -> Result<FetchOutcome> {
        let spec = find_fetcher(fetchers, plugin)?;
        self.dispatch_with(plugin, spec, target_dir)
    }

    /// Fetch `plugin` with an already resolved fetcher.
    pub fn dispatch_with(
        &self,
        plugin: &PluginSpec,
        spec: &FetcherSpec,
        target_dir: &Path,
    ) -> Result<FetchOutcome> {
        match self.fetcher_for(spec) {
            Some(fetcher) => fetcher.fetch(plugin, target_dir),
            None => {
                let reason = format!("Unknown getter type: {}", spec.fetch_type);
                warn!("{} (plugin '{}' skipped)", reason, plugin.name);
                Ok(FetchOutcome::Skipped { reason })
            }
        }
    }
}

//! Run planning
//!
//! Everything that can be decided from the configuration alone is decided
//! here, before the first directory is created.

use plug_fetch::{derive_work_name, find_fetcher};
use plug_meta::{FetchMode, FetcherSpec, PluginSpec, RunConfig};
use tracing::debug;

use crate::Result;

/// One plugin paired with the fetcher that will retrieve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFetch<'c> {
    pub plugin: &'c PluginSpec,
    pub fetcher: &'c FetcherSpec,
}

/// Resolved fetches in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan<'c> {
    pub fetches: Vec<PlannedFetch<'c>>,
}

impl<'c> RunPlan<'c> {
    /// Resolve every plugin of `config`.
    ///
    /// Fails on the first plugin, in declaration order, whose fetcher type is
    /// unknown or whose command source yields no working name.
    pub fn build(config: &'c RunConfig) -> Result<Self> {
        let mut fetches = Vec::with_capacity(config.plugins.len());
        for plugin in &config.plugins {
            let fetcher = find_fetcher(&config.fetchers, plugin)?;
            // The command strategy derives the name again when it runs; an
            // unusable one must fail before any staging directory exists.
            if let FetchMode::ExternalCommand { .. } = fetcher.mode {
                derive_work_name(&plugin.source)?;
            }
            debug!(
                "Planned {} via '{}' ({})",
                plugin.name,
                fetcher.fetch_type,
                fetcher.mode.label()
            );
            fetches.push(PlannedFetch { plugin, fetcher });
        }
        Ok(Self { fetches })
    }

    /// Distinct destinations in first-reference order.
    pub fn destinations(&self) -> Vec<&'c str> {
        let mut seen: Vec<&'c str> = Vec::new();
        for fetch in &self.fetches {
            let destination = fetch.plugin.destination.as_str();
            if !seen.contains(&destination) {
                seen.push(destination);
            }
        }
        seen
    }
}

//! Transaction coordinator
//!
//! Orchestrates a whole run: plan, stage every destination, import local
//! plugins, then swap every staged destination into place. A fatal error
//! stops the run where it is; staged `-new` directories are left behind for
//! inspection and block the next run until removed.

use std::path::PathBuf;
use std::time::Duration;

use plug_fetch::{Dispatcher, FetchOutcome, HttpTransport};
use plug_fs::PluginRoot;
use plug_fs::layout::LOCAL_BUNDLE_DEST;
use plug_meta::{FetchMode, RunConfig};
use tracing::{debug, info, warn};

use crate::local::LocalSource;
use crate::plan::RunPlan;
use crate::report::RunReport;
use crate::transaction::InstallTransaction;
use crate::Result;

/// Per-invocation overrides of the configuration.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Plugin root; wins over the configured one and the platform default
    pub root: Option<PathBuf>,
    /// Source of local plugins; `None` skips the import
    pub local: Option<LocalSource>,
    /// Keep `-old` directories after the swap
    pub keep_old: bool,
    /// Plan and report without touching the filesystem
    pub dry_run: bool,
}

/// Runs install transactions with a fixed fetch dispatcher.
pub struct Coordinator {
    dispatcher: Dispatcher,
}

impl Coordinator {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Coordinator downloading over HTTP(S) with an optional timeout.
    pub fn with_http(timeout: Option<Duration>) -> Result<Self> {
        let transport = HttpTransport::new(timeout)?;
        Ok(Self::new(Dispatcher::new(Box::new(transport))))
    }

    /// Install every plugin of `config`.
    ///
    /// The configuration is validated again here, so every path a fetch
    /// writes to stays inside its staging directory however `config` was built.
    pub fn run(&self, config: &RunConfig, options: &RunOptions) -> Result<RunReport> {
        config.validate()?;
        let explicit = options.root.as_deref().or(config.plugin_root.as_deref());
        let root = PluginRoot::resolve(explicit)?;
        let keep_old = options.keep_old || config.keep_old;
        info!("Synchronizing plugins into {}", root.path().display());

        let plan = RunPlan::build(config)?;
        let mut report = RunReport::new(root.path(), options.dry_run);

        if options.dry_run {
            self.describe(config, &plan, &root, options, &mut report)?;
            return Ok(report);
        }

        let mut transactions: Vec<InstallTransaction> = Vec::new();
        for fetch in &plan.fetches {
            let plugin = fetch.plugin;
            let tx = match transactions
                .iter()
                .position(|t| t.destination() == plugin.destination)
            {
                Some(index) => &transactions[index],
                None => {
                    let tx = self.stage(&root, &plugin.destination, config)?;
                    transactions.push(tx);
                    &transactions[transactions.len() - 1]
                }
            };

            let outcome = self
                .dispatcher
                .dispatch_with(plugin, fetch.fetcher, tx.staging_dir())?;
            match &outcome {
                FetchOutcome::Installed { .. } => report.installed.push(plugin.name.clone()),
                FetchOutcome::Skipped { .. } => report.skipped.push(plugin.name.clone()),
            }
            report.warnings.extend(outcome.warnings());
        }

        if let Some(local) = &options.local {
            if !local.entries()?.is_empty() {
                let staged = transactions
                    .iter()
                    .any(|t| t.destination() == LOCAL_BUNDLE_DEST);
                if !staged {
                    let tx = self.stage(&root, LOCAL_BUNDLE_DEST, config)?;
                    transactions.push(tx);
                }
                report.imported = local.import(&root.local_bundle_dir(&config.new_suffix))?;
            }
        }

        for tx in &transactions {
            if tx.commit(keep_old)? {
                report.swapped.push(tx.destination().to_string());
            }
        }

        debug!("{}", report.summary());
        Ok(report)
    }

    fn stage(
        &self,
        root: &PluginRoot,
        destination: &str,
        config: &RunConfig,
    ) -> Result<InstallTransaction> {
        let tx = transaction(root, destination, config);
        tx.begin()?;
        Ok(tx)
    }

    /// Fill `report` with the actions a real run would take.
    ///
    /// Staging conflicts are still reported as errors.
    fn describe(
        &self,
        config: &RunConfig,
        plan: &RunPlan<'_>,
        root: &PluginRoot,
        options: &RunOptions,
        report: &mut RunReport,
    ) -> Result<()> {
        let mut destinations: Vec<&str> = plan.destinations();
        for destination in &destinations {
            let tx = transaction(root, destination, config);
            tx.check_conflict()?;
            report.push_action(format!(
                "stage {} in {}",
                destination,
                tx.staging_dir().display()
            ));
        }

        for fetch in &plan.fetches {
            let staging = root.staging_dir(&fetch.plugin.destination, &config.new_suffix);
            report.push_action(format!(
                "fetch {} with '{}' ({}) into {}",
                fetch.plugin.name,
                fetch.fetcher.fetch_type,
                fetch.fetcher.mode.label(),
                staging.display()
            ));
            if matches!(fetch.fetcher.mode, FetchMode::Unsupported) {
                warn!("Unknown getter type: {}", fetch.fetcher.fetch_type);
                report.skipped.push(fetch.plugin.name.clone());
            }
        }

        if let Some(local) = &options.local {
            let entries = local.entries()?;
            if !entries.is_empty() && !destinations.contains(&LOCAL_BUNDLE_DEST) {
                transaction(root, LOCAL_BUNDLE_DEST, config).check_conflict()?;
                destinations.push(LOCAL_BUNDLE_DEST);
            }
            let bundles = root.local_bundle_dir(&config.new_suffix);
            for entry in entries {
                if let Some(name) = entry.file_name() {
                    report.push_action(format!(
                        "copy local {} to {}",
                        entry.display(),
                        bundles.join(name).display()
                    ));
                }
            }
        }

        for destination in destinations {
            report.push_action(format!(
                "swap {} into {}",
                root.staging_dir(destination, &config.new_suffix).display(),
                root.live_dir(destination).display()
            ));
        }
        Ok(())
    }
}

fn transaction(root: &PluginRoot, destination: &str, config: &RunConfig) -> InstallTransaction {
    InstallTransaction::new(root, destination, &config.new_suffix, &config.old_suffix)
}

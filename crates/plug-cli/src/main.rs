//! plugsync CLI
//!
//! Installs the plugins of a plugin list into the plugin root.

mod cli;
mod error;
mod logging;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use plug_core::{Coordinator, LocalSource, RunOptions, RunReport};

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to set up logging: {}", "warning".yellow().bold(), e);
    }

    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "plugsync", &mut io::stdout());
        return Ok(());
    }

    cmd_sync(&cli)
}

fn cmd_sync(cli: &Cli) -> Result<()> {
    let config = plug_meta::load_config(&cli.config)?;
    tracing::debug!("Using config {}", cli.config.display());

    let local = match &cli.local_dir {
        Some(dir) => LocalSource::new(dir),
        None => LocalSource::from_program_path(&program_path()),
    };
    let options = RunOptions {
        root: cli.root.clone(),
        local: Some(local),
        keep_old: cli.keep_old,
        dry_run: cli.dry_run,
    };

    if cli.timeout == Some(0) {
        return Err(CliError::user("--timeout must be at least 1 second"));
    }
    let coordinator = Coordinator::with_http(cli.timeout.map(Duration::from_secs))?;
    let report = coordinator.run(&config, &options)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// The program as invoked, used to locate the `local` directory.
fn program_path() -> PathBuf {
    std::env::args_os()
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(".").to_path_buf())
}

fn print_report(report: &RunReport) {
    for action in &report.actions {
        println!("  {}", action.cyan());
    }
    for warning in &report.warnings {
        println!("{} {}", "warning:".yellow().bold(), warning);
    }
    println!("{} {}", "plugsync".green().bold(), report.summary());
}

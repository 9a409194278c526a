//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// plugsync - Install vim plugins from a declarative plugin list
///
/// Every destination is staged into a `-new` directory first and only
/// swapped into place once all plugins were fetched.
#[derive(Parser, Debug)]
#[command(name = "plugsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Plugin list (TOML, JSON or YAML)
    #[arg(short, long, env = "PLUGSYNC_CONFIG", default_value = "plugins.toml")]
    pub config: PathBuf,

    /// Plugin root (defaults to ~/.vim, or ~/vimfiles on Windows)
    #[arg(short, long, env = "PLUGSYNC_ROOT")]
    pub root: Option<PathBuf>,

    /// Directory of local plugins (defaults to `local` next to the program)
    #[arg(long, env = "PLUGSYNC_LOCAL_DIR")]
    pub local_dir: Option<PathBuf>,

    /// Keep the previous installation as `<dest>-old`
    #[arg(long)]
    pub keep_old: bool,

    /// Show what would be done without touching the plugin root
    #[arg(long)]
    pub dry_run: bool,

    /// HTTP timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate shell completions
    ///
    /// Examples:
    ///   plugsync completions bash > ~/.local/share/bash-completion/completions/plugsync
    ///   plugsync completions zsh > ~/.zfunc/_plugsync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

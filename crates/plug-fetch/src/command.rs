//! External-command strategy

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use plug_fs::{enclosed_relative, io as fsio, validate_path_identifier};
use plug_meta::PluginSpec;
use tracing::{debug, info};

use crate::dispatcher::{FetchOutcome, Fetcher};
use crate::template::{command_argv, substitute};
use crate::{Error, Result};

/// Working name for a command fetch: the last `/` segment of `source` with
/// everything from its last `.` stripped.
///
/// `https://github.com/tpope/vim-fugitive.git` gives `vim-fugitive`.
pub fn derive_work_name(source: &str) -> Result<String> {
    let segment = source.rsplit('/').next().unwrap_or(source);
    let name = match segment.rfind('.') {
        Some(dot) => &segment[..dot],
        None => segment,
    };
    if name.is_empty() || validate_path_identifier(name, "working name").is_err() {
        return Err(Error::UnparseableName {
            source_locator: source.to_string(),
        });
    }
    Ok(name.to_string())
}

/// Build a shell invocation for a trusted command string.
fn shell_command(cmd_str: &str) -> Command {
    #[cfg(windows)]
    {
        let mut c = Command::new("cmd");
        c.args(["/C", cmd_str]);
        c
    }
    #[cfg(not(windows))]
    {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd_str);
        c
    }
}

/// Runs `command_template` with `{0}` = plugin source and `{1}` = working
/// directory.
pub struct CommandFetcher<'a> {
    template: &'a str,
    shell: bool,
    remove_dir: Option<&'a str>,
}

impl<'a> CommandFetcher<'a> {
    pub fn new(template: &'a str, shell: bool, remove_dir: Option<&'a str>) -> Self {
        Self {
            template,
            shell,
            remove_dir,
        }
    }

    /// Working directory for `plugin` under `target_dir`.
    ///
    /// The working name must be derivable even when `no_sub_dirs` makes
    /// `target_dir` itself the working directory.
    pub fn work_dir(plugin: &PluginSpec, target_dir: &Path) -> Result<PathBuf> {
        let work_name = derive_work_name(&plugin.source)?;
        if plugin.no_sub_dirs {
            return Ok(target_dir.to_path_buf());
        }
        Ok(target_dir.join(work_name))
    }

    fn build(&self, source: &str, work_dir: &Path) -> Result<(Command, String)> {
        let work = work_dir.to_string_lossy();
        let args = [source, &*work];

        if self.shell {
            let line = substitute(self.template, &args);
            return Ok((shell_command(&line), line));
        }

        let argv = command_argv(self.template, &args);
        let (program, rest) = argv.split_first().ok_or_else(|| Error::EmptyCommand {
            template: self.template.to_string(),
        })?;
        let mut cmd = Command::new(program);
        cmd.args(rest);
        Ok((cmd, argv.join(" ")))
    }

    fn run(&self, source: &str, work_dir: &Path) -> Result<()> {
        let (mut cmd, display) = self.build(source, work_dir)?;
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let status = cmd.status().map_err(|source| Error::CommandSpawn {
            command: display.clone(),
            source,
        })?;

        if !status.success() {
            return Err(Error::CommandFailed {
                command: display,
                exit_code: status.code(),
            });
        }
        Ok(())
    }

    fn remove_after_run(&self, plugin: &PluginSpec, work_dir: &Path) -> Result<()> {
        let Some(relative) = plugin
            .remove_dir
            .as_deref()
            .or(self.remove_dir)
            .and_then(enclosed_relative)
            .filter(|p| !p.as_os_str().is_empty())
        else {
            return Ok(());
        };

        let doomed = work_dir.join(relative);
        if doomed.is_dir() {
            debug!("Removing {}", doomed.display());
            fsio::remove_dir_all_forced(&doomed)?;
        }
        Ok(())
    }
}

impl Fetcher for CommandFetcher<'_> {
    fn fetch(&self, plugin: &PluginSpec, target_dir: &Path) -> Result<FetchOutcome> {
        let work_dir = Self::work_dir(plugin, target_dir)?;
        if !plugin.no_sub_dirs {
            fsio::create_dir_all(&work_dir)?;
        }

        info!("Unpacking {} to {}", plugin.source, work_dir.display());
        self.run(&plugin.source, &work_dir)?;
        self.remove_after_run(plugin, &work_dir)?;

        if plugin.flags().remove_sub_dir_after_unpack {
            let nested = target_dir.join(&plugin.destination);
            if nested.is_dir() {
                let moved = fsio::move_contents_up(&nested, target_dir)?;
                debug!("Moved {} entries up from {}", moved, nested.display());
            }
        }
        Ok(FetchOutcome::installed())
    }
}

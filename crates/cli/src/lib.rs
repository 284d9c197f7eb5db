//! Giks CLI library
//!
//! This library contains all the CLI logic for giks, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod common;
pub mod error;
pub mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use giks_config::{AssemblyOptions, assemble};
use std::path::PathBuf;

use command::Command;
use common::RuntimeContext;

/// Giks - declarative git hooks
#[derive(Debug, Parser)]
#[command(name = "giks")]
#[command(about = "Run git hooks declared in a single configuration file")]
#[command(version)]
#[command(long_about = "Run git hooks declared in a single configuration file

Hooks are described in giks.toml as ordered steps: shell commands,
scripts, exec commands and built-in plugins. `giks install` writes small
shims into the repository's hooks directory which call back into
`giks exec` when git fires the hook.")]
pub struct Cli {
    /// Path to the config file (default: giks.toml in the current directory)
    #[arg(long, global = true, env = "GIKS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path inside the repository, or its git directory (default: current directory)
    #[arg(long, global = true, env = "GIKS_GIT_DIR", value_name = "DIR")]
    pub git_dir: Option<PathBuf>,

    /// Binary written into installed hook shims (default: this executable)
    #[arg(long, global = true, env = "GIKS_BINARY", value_name = "FILE")]
    pub binary: Option<PathBuf>,

    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, global = true, env = "GIKS_LOG_FILE", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for giks CLI
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install hook shims into the repository
    Install(cmd::install::InstallCommand),

    /// Remove hook shims from the repository
    Uninstall(cmd::install::UninstallCommand),

    /// Execute the steps of a hook (called by installed shims)
    #[command(long_about = "Execute the steps of a hook

Installed shims call this with the hook name, the config file and the
arguments git passed to the hook. Steps run in order; the first failing
step stops the hook and giks exits with a non-zero status.

Examples:
  • giks exec pre-commit
      → Run the pre-commit steps by hand

  • giks exec commit-msg .git/COMMIT_EDITMSG
      → Run commit-msg against an existing message file")]
    Exec(cmd::exec::ExecCommand),

    /// List configured hooks
    List(cmd::list::ListCommand),

    /// Show the steps of a hook
    Show(cmd::list::ShowCommand),

    /// Show resolved paths and installation state of each hook
    Status(cmd::status::StatusCommand),

    /// Print version and build information
    Version,
}

/// Main entry point for the CLI application
///
/// # Errors
///
/// Returns an error if logging cannot be set up or the command fails.
pub fn run(cli: Cli) -> Result<()> {
    // Initialize logging based on verbosity
    giks_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    execute(&cli)
}

/// Execute a parsed command line without touching global logging state
///
/// # Errors
///
/// Returns an error if the configuration cannot be assembled or the
/// command fails.
pub fn execute(cli: &Cli) -> Result<()> {
    // Version needs neither a repository nor a config file
    if let Commands::Version = cli.command {
        cmd::version::run();
        return Ok(());
    }

    let options = AssemblyOptions {
        config_file: cli.config.clone(),
        git_dir: cli.git_dir.clone(),
        binary: cli.binary.clone(),
    };
    let loaded = assemble(&options).context("Failed to load configuration")?;
    tracing::debug!(
        config = %loaded.paths.config_file,
        git_dir = %loaded.paths.git_dir,
        "Configuration assembled"
    );

    let context = RuntimeContext::new(loaded);
    execute_command(&cli.command, &context)
}

fn execute_command(command: &Commands, context: &RuntimeContext) -> Result<()> {
    match command {
        Commands::Install(install_cmd) => install_cmd.execute(context)?,
        Commands::Uninstall(uninstall_cmd) => uninstall_cmd.execute(context)?,
        Commands::Exec(exec_cmd) => {
            exec_cmd
                .execute(context)
                .with_context(|| format!("failed executing '{}' hook", exec_cmd.hook))?;
        }
        Commands::List(list_cmd) => list_cmd.execute(context)?,
        Commands::Show(show_cmd) => show_cmd.execute(context)?,
        Commands::Status(status_cmd) => status_cmd.execute(context)?,
        Commands::Version => cmd::version::run(),
    }
    Ok(())
}

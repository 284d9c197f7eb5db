//! Install and uninstall hook shims

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::{CommandError, Result};
use crate::ui::{StatusIcon, confirm};
use clap::Args;
use giks_engine::install::is_benign;
use owo_colors::OwoColorize;

/// Install hook shims into the repository
#[derive(Debug, Args)]
pub struct InstallCommand {
    /// Hook to install (default: all enabled hooks)
    #[arg(value_name = "HOOK")]
    pub hook: Option<String>,

    /// Rewrite shims that are already installed
    #[arg(short, long)]
    pub force: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Remove hook shims from the repository
#[derive(Debug, Args)]
pub struct UninstallCommand {
    /// Hook to uninstall (default: all enabled hooks)
    #[arg(value_name = "HOOK")]
    pub hook: Option<String>,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl Command for InstallCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let installer = context.installer();
        let Some(names) = targets(context, self.hook.as_deref())? else {
            return Ok(());
        };

        let prompt = format!(
            "Do you want to install the '{}' hook(s) for git directory '{}'?",
            names.join(", "),
            context.paths().git_dir
        );
        if !confirm(&prompt, self.yes, context.is_interactive())? {
            println!("Operation cancelled.");
            return Ok(());
        }

        let results = match &self.hook {
            Some(_) => names
                .iter()
                .map(|name| (name.clone(), installer.install(name, self.force)))
                .collect(),
            None => installer.install_all(self.force),
        };
        report("install", "Installed", results)
    }
}

impl Command for UninstallCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let installer = context.installer();
        let Some(names) = targets(context, self.hook.as_deref())? else {
            return Ok(());
        };

        let prompt = format!(
            "Do you want to uninstall the '{}' hook(s) for git directory '{}'?",
            names.join(", "),
            context.paths().git_dir
        );
        if !confirm(&prompt, self.yes, context.is_interactive())? {
            println!("Operation cancelled.");
            return Ok(());
        }

        let results = match &self.hook {
            Some(_) => names
                .iter()
                .map(|name| (name.clone(), installer.uninstall(name)))
                .collect(),
            None => installer.uninstall_all(),
        };
        report("uninstall", "Uninstalled", results)
    }
}

/// Hooks named in the confirmation prompt; `None` when there is nothing to do
fn targets(context: &RuntimeContext, hook: Option<&str>) -> Result<Option<Vec<String>>> {
    if let Some(name) = hook {
        let hook = context.config().lookup_hook(name)?;
        return Ok(Some(vec![hook.name.clone()]));
    }

    let names: Vec<String> = context
        .config()
        .hook_names(false)
        .into_iter()
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        println!("{}", "No enabled hooks configured.".yellow());
        return Ok(None);
    }
    Ok(Some(names))
}

/// Print per-hook outcomes; fails if any hook failed for a real reason
fn report(action: &'static str, done: &str, results: Vec<(String, giks_core::Result<()>)>) -> Result<()> {
    let total = results.len();
    let mut failed = 0;

    for (name, result) in results {
        match result {
            Ok(()) => println!("{} {done} hook '{}'", StatusIcon::Success.green(), name.cyan()),
            Err(e) if is_benign(&e) => {
                tracing::debug!(hook = %name, "Skipped {action}: {e}");
                println!(
                    "{} Hook '{}' was not {}ed: {e}",
                    StatusIcon::Warning.yellow(),
                    name.cyan(),
                    action
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!(
                    "{} Hook '{}' could not be {}ed: {e}",
                    StatusIcon::Error.red(),
                    name.cyan(),
                    action
                );
            }
        }
    }

    if failed > 0 {
        return Err(CommandError::BatchFailed {
            action,
            failed,
            total,
        });
    }
    Ok(())
}

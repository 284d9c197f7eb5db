//! Installation status of configured hooks

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use crate::ui::StatusIcon;
use clap::Args;
use giks_engine::InstallState;
use owo_colors::OwoColorize;

/// Show where giks is looking and which hooks are installed
#[derive(Debug, Args)]
pub struct StatusCommand;

impl Command for StatusCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let paths = context.paths();
        println!("{} Config:   {}", StatusIcon::Info, paths.config_file.cyan());
        println!("{} Git dir:  {}", StatusIcon::Info, paths.git_dir.cyan());
        println!("{} Work dir: {}", StatusIcon::Info, paths.work_dir.cyan());
        println!("{} Binary:   {}", StatusIcon::Info, paths.binary.cyan());
        println!();

        let hooks = context.config().hook_list(true);
        if hooks.is_empty() {
            println!("{}", "No hooks configured.".yellow());
            return Ok(());
        }

        let installer = context.installer();
        for hook in hooks {
            let state = installer.state(&hook.name)?;
            let (icon, label) = match state {
                InstallState::Managed => (StatusIcon::Success.green().to_string(), "installed"),
                InstallState::Absent => (StatusIcon::Hook.dimmed().to_string(), "not installed"),
                InstallState::External => (
                    StatusIcon::Warning.yellow().to_string(),
                    "managed by another tool",
                ),
            };
            let enabled = if hook.enabled { "" } else { " (disabled)" };
            println!("{icon} {}: {label}{}", hook.name.cyan(), enabled.dimmed());
        }
        Ok(())
    }
}

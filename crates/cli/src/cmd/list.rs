//! Listing and inspecting configured hooks

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use clap::{Args, ValueEnum};
use giks_config::{Hook, Step};
use owo_colors::OwoColorize;

/// Output format for listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable table
    #[default]
    Simple,
    /// JSON document
    Json,
}

/// List configured hooks
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Include disabled hooks
    #[arg(short, long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Simple)]
    pub format: OutputFormat,
}

/// Show the steps of a single hook
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Hook to show
    #[arg(value_name = "HOOK")]
    pub hook: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Simple)]
    pub format: OutputFormat,
}

impl Command for ListCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let hooks = context.config().hook_list(self.all);

        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&hooks)?);
            return Ok(());
        }

        if hooks.is_empty() {
            println!("{}", "No hooks configured.".yellow());
            return Ok(());
        }

        let width = hooks
            .iter()
            .map(|h| h.name.len())
            .max()
            .unwrap_or(0)
            .max("HOOK".len());

        println!("{:<width$}  {:<7}  {}", "HOOK".bold(), "ENABLED".bold(), "STEPS".bold());
        for hook in hooks {
            println!(
                "{:<width$}  {:<7}  {}",
                hook.name.cyan(),
                enabled_label(hook.enabled),
                hook.steps.len()
            );
        }
        Ok(())
    }
}

impl Command for ShowCommand {
    type Output = ();

    fn execute(&self, context: &RuntimeContext) -> Result<()> {
        let hook = context.config().lookup_hook(&self.hook)?;

        if self.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(hook)?);
            return Ok(());
        }

        print!("{}", render_hook(hook));
        Ok(())
    }
}

fn enabled_label(enabled: bool) -> &'static str {
    if enabled { "yes" } else { "no" }
}

/// Plain-text description of a hook and its steps
pub(crate) fn render_hook(hook: &Hook) -> String {
    let mut out = format!(
        "hook:    {}\nenabled: {}\nsteps:\n",
        hook.name,
        enabled_label(hook.enabled)
    );

    for (i, step) in hook.steps.iter().enumerate() {
        out.push_str(&format!("  {}.) {}: '{}'\n", i + 1, step.kind(), step.summary()));

        if let Step::Plugin(plugin) = step {
            for (key, value) in &plugin.vars {
                out.push_str(&format!("        {key} = '{value}'\n"));
            }
            if let Some(message) = &plugin.message {
                out.push_str(&format!("        message: '{message}'\n"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use giks_config::Config;

    #[test]
    fn test_render_hook_lists_steps_in_order() {
        let config = Config::parse(
            r#"
[hooks.pre-commit]
enabled = true

[[hooks.pre-commit.steps]]
command = "cargo fmt --check"

[[hooks.pre-commit.steps]]
plugin = { name = "file-watcher", vars = { FILE_WATCHER_FILES = "Cargo.toml" } }
"#,
        )
        .unwrap();

        let out = render_hook(config.lookup_hook("pre-commit").unwrap());
        assert!(out.starts_with("hook:    pre-commit\nenabled: yes\n"));
        assert!(out.contains("  1.) command: 'cargo fmt --check'\n"));
        assert!(out.contains("  2.) plugin: 'file-watcher'\n"));
        assert!(out.contains("FILE_WATCHER_FILES = 'Cargo.toml'"));
    }
}

//! Run a configured hook, as invoked by the installed shim

use crate::command::Command;
use crate::common::RuntimeContext;
use crate::error::Result;
use crate::ui::StatusIcon;
use clap::Args;
use giks_engine::{ExecutionReport, GitCli, HookExecutor};
use owo_colors::OwoColorize;

/// Execute the steps of a hook
#[derive(Debug, Args)]
pub struct ExecCommand {
    /// Hook to execute
    #[arg(value_name = "HOOK")]
    pub hook: String,

    /// Arguments passed by git to the hook
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Command for ExecCommand {
    type Output = ExecutionReport;

    fn execute(&self, context: &RuntimeContext) -> Result<ExecutionReport> {
        let hook = context.config().lookup_hook(&self.hook)?;
        let executor = HookExecutor::new(
            context.paths().work_dir.as_path(),
            context.registry(),
            &GitCli,
        );

        let report = executor.execute_hook(hook, &self.args)?;
        for warning in &report.warnings {
            eprintln!(
                "{} {} step no. {}: {}",
                StatusIcon::Warning.yellow(),
                report.hook.cyan(),
                warning.step,
                warning.error
            );
        }
        Ok(report)
    }
}

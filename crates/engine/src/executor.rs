//! Hook execution engine
//!
//! Runs the steps of a hook strictly in order. Every step gets freshly built
//! context variables and is dispatched to exactly one strategy:
//!
//! - `command`: `sh -c <command> sh <args...>`
//! - `exec`: replaces the giks process with the given command line
//! - `script`: runs the file directly, or through `sh` when it is not executable
//! - `plugin`: runs a built-in plugin from the [`PluginRegistry`]
//!
//! A step failing with a warning is reported and execution continues. Any
//! other failure aborts the hook.

use crate::context::ContextVars;
use crate::mixins::{self, GitQuery};
use crate::plugins::{PluginContext, PluginRegistry};
use giks_config::{Hook, PluginStep, Step};
use giks_core::{Error, Result};
use indexmap::IndexMap;
use std::convert::Infallible;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::CommandExt;
use std::path::Path;

/// Lifecycle of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// Not started yet
    Pending,
    /// Currently executing
    Running,
    /// Finished without error
    Succeeded,
    /// Failed recoverably; the hook went on
    WarnedAndContinued,
    /// Failed fatally; the hook stopped here
    Failed,
}

/// A recoverable step failure
#[derive(Debug)]
pub struct StepWarning {
    /// 1-based step number
    pub step: usize,
    /// What went wrong
    pub error: Error,
}

/// Outcome of a successful hook execution
#[derive(Debug)]
pub struct ExecutionReport {
    /// Hook name
    pub hook: String,
    /// Final state of every step
    pub steps: Vec<StepState>,
    /// Recoverable failures in step order
    pub warnings: Vec<StepWarning>,
}

impl ExecutionReport {
    /// Whether any step failed recoverably
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Executes hooks within a repository
pub struct HookExecutor<'a> {
    work_dir: &'a Path,
    registry: &'a PluginRegistry,
    git: &'a dyn GitQuery,
}

impl<'a> HookExecutor<'a> {
    /// Create an executor for the work tree at `work_dir`
    pub fn new(work_dir: &'a Path, registry: &'a PluginRegistry, git: &'a dyn GitQuery) -> Self {
        Self {
            work_dir,
            registry,
            git,
        }
    }

    /// Execute all steps of `hook` with the arguments git passed
    ///
    /// # Errors
    ///
    /// Returns [`Error::HookDisabled`] for disabled hooks and
    /// [`Error::StepFailed`] for the first step failing fatally. Steps after
    /// it do not run.
    #[tracing::instrument(skip(self, hook, args), fields(hook = %hook.name))]
    pub fn execute_hook(&self, hook: &Hook, args: &[String]) -> Result<ExecutionReport> {
        if !hook.enabled {
            return Err(Error::HookDisabled(hook.name.clone()));
        }

        let mut report = ExecutionReport {
            hook: hook.name.clone(),
            steps: vec![StepState::Pending; hook.steps.len()],
            warnings: Vec::new(),
        };

        tracing::debug!(steps = hook.steps.len(), "Executing hook");

        for (idx, step) in hook.steps.iter().enumerate() {
            let number = idx + 1;
            let span = tracing::info_span!("step", step = number, kind = step.kind());
            let _guard = span.enter();

            report.steps[idx] = StepState::Running;
            let start = std::time::Instant::now();

            let result = self.run_step(&hook.name, step, args);
            let elapsed = start.elapsed();

            match result {
                Ok(()) => {
                    tracing::debug!(elapsed_ms = elapsed.as_millis(), "Step completed");
                    report.steps[idx] = StepState::Succeeded;
                }
                Err(e) if e.is_warning() => {
                    tracing::warn!(
                        elapsed_ms = elapsed.as_millis(),
                        "Step no. {number} failed but continuing: {e}"
                    );
                    report.steps[idx] = StepState::WarnedAndContinued;
                    report.warnings.push(StepWarning {
                        step: number,
                        error: e,
                    });
                }
                Err(e) => {
                    tracing::error!(elapsed_ms = elapsed.as_millis(), error = %e, "Step failed");
                    report.steps[idx] = StepState::Failed;
                    return Err(Error::StepFailed {
                        hook: hook.name.clone(),
                        step: number,
                        source: Box::new(e),
                    });
                }
            }
        }

        Ok(report)
    }

    fn run_step(&self, hook: &str, step: &Step, args: &[String]) -> Result<()> {
        let ctx = ContextVars::new(hook, mixins::collect(self.git, self.work_dir));

        match step {
            Step::Command(command) => self.run_command(command, args, &ctx),
            Step::Exec(line) => match self.exec(line, args, &ctx)? {},
            Step::Script(path) => self.run_script(path, args, &ctx),
            Step::Plugin(plugin) => self.run_plugin(hook, plugin, args, ctx),
        }
    }

    /// Run a command line through `sh -c`
    ///
    /// Invocation args become the positional parameters `$1..$n`.
    #[tracing::instrument(skip(self, args, ctx))]
    fn run_command(&self, command: &str, args: &[String], ctx: &ContextVars) -> Result<()> {
        let mut sh_args = vec!["-c".to_string(), command.to_string(), "sh".to_string()];
        sh_args.extend(args.iter().cloned());

        self.shell_cmd("sh", &sh_args, ctx)
            .run()
            .map(|_| ())
            .map_err(|e| Error::Command {
                command: command.to_string(),
                message: e.to_string(),
            })
    }

    /// Replace the current process with `line`
    ///
    /// Only returns when the replacement could not happen.
    #[tracing::instrument(skip(self, args, ctx))]
    fn exec(&self, line: &str, args: &[String], ctx: &ContextVars) -> Result<Infallible> {
        let parts = shell_words::split(line)
            .map_err(|e| Error::Validation(format!("could not parse exec '{line}': {e}")))?;
        let Some((program, program_args)) = parts.split_first() else {
            return Err(Error::Validation(format!("exec '{line}' is empty")));
        };

        let binary = which::which(program)
            .map_err(|e| Error::Message(format!("binary not found for exec '{line}': {e}")))?;

        tracing::debug!(binary = %binary.display(), "Replacing process");

        let err = std::process::Command::new(&binary)
            .arg0(program)
            .args(program_args)
            .args(args)
            .envs(ctx.vars())
            .current_dir(self.work_dir)
            .exec();

        Err(Error::Command {
            command: line.to_string(),
            message: err.to_string(),
        })
    }

    /// Run a script file relative to the work tree
    #[tracing::instrument(skip(self, path, args, ctx), fields(script = %path.display()))]
    fn run_script(&self, path: &Path, args: &[String], ctx: &ContextVars) -> Result<()> {
        let script = self.work_dir.join(path);

        let metadata = fs::metadata(&script).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound {
                    kind: "Script",
                    name: script.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;

        let script_str = script.to_string_lossy().to_string();
        let expression = if metadata.is_file() && metadata.permissions().mode() & 0o100 == 0 {
            tracing::debug!("Script is not executable, running it through sh");
            let mut sh_args = vec![script_str.clone()];
            sh_args.extend(args.iter().cloned());
            self.shell_cmd("sh", &sh_args, ctx)
        } else {
            self.shell_cmd(&script_str, args, ctx)
        };

        expression.run().map(|_| ()).map_err(|e| Error::Command {
            command: script_str,
            message: e.to_string(),
        })
    }

    /// Run a built-in plugin
    #[tracing::instrument(skip(self, step, args, ctx), fields(plugin = %step.name))]
    fn run_plugin(
        &self,
        hook: &str,
        step: &PluginStep,
        args: &[String],
        ctx: ContextVars,
    ) -> Result<()> {
        let plugin = self.registry.get(&step.name)?;
        let ctx = ctx.with_plugin_vars(&step.vars);

        let plugin_ctx = PluginContext {
            work_dir: self.work_dir,
            hook,
            vars: ctx.vars(),
            args,
        };

        let Err(failure) = plugin.run(&plugin_ctx) else {
            return Ok(());
        };

        tracing::debug!(fatal = failure.fatal, error = %failure.source, "Plugin failed");

        let message = step.message.clone().unwrap_or_else(|| {
            format!("plugin '{}' failed: {}", step.name, failure.source)
        });

        if failure.fatal {
            Err(Error::Plugin(message))
        } else {
            Err(Error::warning(Error::Plugin(message)))
        }
    }

    /// Child process in the work tree with the shell step environment
    fn shell_cmd(&self, program: &str, args: &[String], ctx: &ContextVars) -> duct::Expression {
        let env: IndexMap<String, String> = ctx.shell_env();

        env.iter()
            .fold(duct::cmd(program, args).dir(self.work_dir), |cmd, (k, v)| {
                cmd.env(k, v)
            })
    }
}

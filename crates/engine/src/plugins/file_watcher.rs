//! Run a command when files matching a pattern are committed

use super::{Plugin, PluginContext, PluginFailure, PluginResult, hook_unsupported, required_var, string_var};
use giks_core::Error;
use regex::Regex;

const VAR_PATTERN: &str = "FILE_WATCHER_PATTERN";
const VAR_COMMAND: &str = "FILE_WATCHER_COMMAND";
const VAR_FILES_LIST: &str = "FILE_WATCHER_FILES_LIST";

/// `file-watcher` plugin, `pre-commit` only
///
/// When any file of `FILE_WATCHER_FILES_LIST` matches `FILE_WATCHER_PATTERN`,
/// `FILE_WATCHER_COMMAND` runs in the work tree. Its output is only shown
/// when it fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileWatcher;

impl Plugin for FileWatcher {
    fn id(&self) -> &'static str {
        "file-watcher"
    }

    fn run(&self, ctx: &PluginContext<'_>) -> PluginResult {
        let pattern = required_var(ctx.vars, VAR_PATTERN)?;
        let pattern = Regex::new(pattern).map_err(|e| {
            Error::Validation(format!(
                "provided pattern '{pattern}' can not be used as a regexp: {e}"
            ))
        })?;

        let command = required_var(ctx.vars, VAR_COMMAND)?;
        let parts = shell_words::split(command)
            .map_err(|e| Error::Validation(format!("could not parse command '{command}': {e}")))?;
        let Some((program, args)) = parts.split_first() else {
            return Err(Error::Validation("no executable command given".to_string()).into());
        };

        let files = string_var(ctx.vars, VAR_FILES_LIST, false)?.unwrap_or_default();

        if ctx.hook != "pre-commit" {
            return hook_unsupported(self.id(), ctx.hook);
        }

        let Some(file) = files.split_whitespace().find(|f| pattern.is_match(f)) else {
            tracing::debug!("[{}]: no file matched '{}'", self.id(), pattern);
            return Ok(());
        };

        tracing::info!(
            "[{}]: changes detected in '{file}'. Running '{command}'...",
            self.id()
        );

        let output = duct::cmd(program, args)
            .dir(ctx.work_dir)
            .stderr_to_stdout()
            .stdout_capture()
            .unchecked()
            .run()
            .map_err(|e| Error::Command {
                command: command.to_string(),
                message: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        Err(PluginFailure::fatal(Error::Command {
            command: command.to_string(),
            message: format!(
                "files matched pattern but command failed with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stdout).trim()
            ),
        }))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use indexmap::IndexMap;
    use std::path::Path;

    fn run(hook: &str, work_dir: &Path, pairs: &[(&str, &str)]) -> PluginResult {
        let vars: IndexMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let ctx = PluginContext {
            work_dir,
            hook,
            vars: &vars,
            args: &[],
        };
        FileWatcher.run(&ctx)
    }

    #[test]
    fn test_command_runs_on_match() {
        let temp = tempfile::tempdir().unwrap();
        let result = run(
            "pre-commit",
            temp.path(),
            &[
                (VAR_PATTERN, r".*\.proto$"),
                (VAR_COMMAND, "touch generated"),
                (VAR_FILES_LIST, "src/lib.rs api/service.proto"),
            ],
        );
        assert!(result.is_ok());
        assert!(temp.path().join("generated").exists());
    }

    #[test]
    fn test_command_skipped_without_match() {
        let temp = tempfile::tempdir().unwrap();
        let result = run(
            "pre-commit",
            temp.path(),
            &[
                (VAR_PATTERN, r".*\.proto$"),
                (VAR_COMMAND, "touch generated"),
                (VAR_FILES_LIST, "src/lib.rs README.md"),
            ],
        );
        assert!(result.is_ok());
        assert!(!temp.path().join("generated").exists());
    }

    #[test]
    fn test_failing_command_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let failure = run(
            "pre-commit",
            temp.path(),
            &[
                (VAR_PATTERN, "lock"),
                (VAR_COMMAND, "sh -c 'echo regenerate first; exit 3'"),
                (VAR_FILES_LIST, "Cargo.lock"),
            ],
        )
        .unwrap_err();
        assert!(failure.fatal);
        assert!(failure.to_string().contains("regenerate first"));
    }

    #[test]
    fn test_unsupported_hook_succeeds() {
        let temp = tempfile::tempdir().unwrap();
        let result = run(
            "pre-push",
            temp.path(),
            &[
                (VAR_PATTERN, ".*"),
                (VAR_COMMAND, "touch generated"),
                (VAR_FILES_LIST, "a.txt"),
            ],
        );
        assert!(result.is_ok());
        assert!(!temp.path().join("generated").exists());
    }

    #[test]
    fn test_missing_variables() {
        let temp = tempfile::tempdir().unwrap();

        let failure = run("pre-commit", temp.path(), &[(VAR_COMMAND, "true")]).unwrap_err();
        assert!(failure.fatal);
        assert!(failure.to_string().contains(VAR_PATTERN));

        let failure = run("pre-commit", temp.path(), &[(VAR_PATTERN, ".*")]).unwrap_err();
        assert!(failure.to_string().contains(VAR_COMMAND));
    }

    #[test]
    fn test_invalid_pattern() {
        let temp = tempfile::tempdir().unwrap();
        let failure = run(
            "pre-commit",
            temp.path(),
            &[(VAR_PATTERN, "(unclosed"), (VAR_COMMAND, "true")],
        )
        .unwrap_err();
        assert!(failure.fatal);
        assert!(failure.to_string().contains("can not be used as a regexp"));
    }
}

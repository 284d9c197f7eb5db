//! Validate commit messages against a pattern

use super::{Plugin, PluginContext, PluginFailure, PluginResult, bool_var, hook_unsupported, required_var};
use giks_core::Error;
use regex::Regex;
use std::fs;

const VAR_PATTERN: &str = "STRING_VALIDATOR_PATTERN";
const VAR_FAIL_ON_MISMATCH: &str = "STRING_VALIDATOR_FAIL_ON_MISMATCH";

/// `string-validator` plugin, `commit-msg` only
///
/// Reads the message file git passes as first argument and matches it
/// against `STRING_VALIDATOR_PATTERN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValidator;

impl Plugin for StringValidator {
    fn id(&self) -> &'static str {
        "string-validator"
    }

    fn run(&self, ctx: &PluginContext<'_>) -> PluginResult {
        let fail_on_mismatch = bool_var(ctx.vars, VAR_FAIL_ON_MISMATCH, false)?.unwrap_or(false);

        if ctx.hook != "commit-msg" {
            return hook_unsupported(self.id(), ctx.hook);
        }

        let pattern = required_var(ctx.vars, VAR_PATTERN)?;
        let regex = Regex::new(pattern).map_err(|e| {
            Error::Validation(format!(
                "provided pattern '{pattern}' can not be used as a regexp: {e}"
            ))
        })?;

        let Some(message_file) = ctx.args.first() else {
            return Err(Error::Validation(
                "commit message file argument missing".to_string(),
            )
            .into());
        };
        let message = fs::read_to_string(ctx.work_dir.join(message_file)).map_err(|e| {
            Error::Message(format!("could not read file '{message_file}': {e}"))
        })?;

        if regex.is_match(&message) {
            return Ok(());
        }

        Err(PluginFailure::with_severity(
            fail_on_mismatch,
            Error::Plugin(format!(
                "input '{}' does not match required pattern '{pattern}'",
                message.trim()
            )),
        ))
    }
}

//! Compare two space separated lists
//!
//! Typical use is guarding files that must not be committed:
//!
//! ```toml
//! [[hooks.pre-commit.steps]]
//! plugin = { name = "list-comparator", vars = { LIST_COMPARATOR_LIST_A = "GIKS_MIXIN_STAGED_FILES", LIST_COMPARATOR_LIST_B = "secrets.env", LIST_COMPARATOR_OPERATION = "intersect", LIST_COMPARATOR_FAIL_ON_MATCH = "true" } }
//! ```

use super::{Plugin, PluginContext, PluginFailure, PluginResult, bool_var, required_var, string_var};
use giks_core::Error;

const VAR_LIST_A: &str = "LIST_COMPARATOR_LIST_A";
const VAR_LIST_B: &str = "LIST_COMPARATOR_LIST_B";
const VAR_OPERATION: &str = "LIST_COMPARATOR_OPERATION";
const VAR_FAIL_ON_MATCH: &str = "LIST_COMPARATOR_FAIL_ON_MATCH";

/// Supported list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Intersect,
}

impl Operation {
    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "intersect" => Some(Operation::Intersect),
            _ => None,
        }
    }

    fn apply<'a>(self, a: &[&'a str], b: &[&str]) -> Vec<&'a str> {
        match self {
            Operation::Intersect => a.iter().copied().filter(|el| b.contains(el)).collect(),
        }
    }
}

/// `list-comparator` plugin
#[derive(Debug, Clone, Copy, Default)]
pub struct ListComparator;

impl Plugin for ListComparator {
    fn id(&self) -> &'static str {
        "list-comparator"
    }

    fn run(&self, ctx: &PluginContext<'_>) -> PluginResult {
        let list_a = split(string_var(ctx.vars, VAR_LIST_A, false)?);
        let list_b = split(string_var(ctx.vars, VAR_LIST_B, false)?);

        let operation = required_var(ctx.vars, VAR_OPERATION)?;
        let operation = Operation::parse(operation).ok_or_else(|| {
            Error::Validation(format!(
                "{} does not support operation '{operation}'",
                self.id()
            ))
        })?;

        let fail_on_match = bool_var(ctx.vars, VAR_FAIL_ON_MATCH, false)?.unwrap_or(false);

        let matched = operation.apply(&list_a, &list_b);
        if matched.is_empty() {
            return Ok(());
        }

        Err(PluginFailure::with_severity(
            fail_on_match,
            Error::Plugin(format!(
                "elements which matched the comparison: '{}'",
                matched.join(",")
            )),
        ))
    }
}

fn split(list: Option<&str>) -> Vec<&str> {
    list.map(|l| l.split_whitespace().collect())
        .unwrap_or_default()
}

//! Built-in plugins
//!
//! Plugins are compiled into giks and selected by name from a hook step:
//!
//! ```toml
//! [[hooks.commit-msg.steps]]
//! plugin = { name = "string-validator", vars = { STRING_VALIDATOR_PATTERN = "^(feat|fix): " } }
//! ```
//!
//! Every plugin decides on its own whether a failure aborts the hook, see
//! [`PluginFailure`].

mod file_watcher;
mod list_comparator;
mod string_validator;

pub use file_watcher::FileWatcher;
pub use list_comparator::ListComparator;
pub use string_validator::StringValidator;

use giks_core::{Error, Result};
use indexmap::IndexMap;
use std::fmt;
use std::path::Path;

/// Everything a plugin gets to see when it runs
#[derive(Debug, Clone, Copy)]
pub struct PluginContext<'a> {
    /// Repository work tree
    pub work_dir: &'a Path,
    /// Name of the hook being executed
    pub hook: &'a str,
    /// Context variables merged with the step's plugin vars
    pub vars: &'a IndexMap<String, String>,
    /// Arguments git passed to the hook
    pub args: &'a [String],
}

/// A failed plugin run
#[derive(Debug)]
pub struct PluginFailure {
    /// Whether the hook has to abort
    pub fatal: bool,
    /// What went wrong
    pub source: Error,
}

impl PluginFailure {
    /// Failure that aborts the hook
    pub fn fatal(source: impl Into<Error>) -> Self {
        Self {
            fatal: true,
            source: source.into(),
        }
    }

    /// Failure that is reported but lets the hook continue
    pub fn warning(source: impl Into<Error>) -> Self {
        Self {
            fatal: false,
            source: source.into(),
        }
    }

    /// Failure whose severity depends on a plugin setting
    pub fn with_severity(fatal: bool, source: impl Into<Error>) -> Self {
        Self {
            fatal,
            source: source.into(),
        }
    }
}

impl From<Error> for PluginFailure {
    /// Plain errors (bad variables, unreadable files) are fatal
    fn from(source: Error) -> Self {
        Self::fatal(source)
    }
}

impl fmt::Display for PluginFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source.fmt(f)
    }
}

/// Result of a plugin run
pub type PluginResult = std::result::Result<(), PluginFailure>;

/// A built-in plugin
pub trait Plugin {
    /// Name used to reference the plugin from the configuration
    fn id(&self) -> &'static str;

    /// Run the plugin
    fn run(&self, ctx: &PluginContext<'_>) -> PluginResult;
}

/// Lookup table of available plugins
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Registry with every built-in plugin
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(StringValidator));
        registry.register(Box::new(FileWatcher));
        registry.register(Box::new(ListComparator));
        registry
    }

    /// Add a plugin; a plugin with the same id is replaced
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.retain(|p| p.id() != plugin.id());
        self.plugins.push(plugin);
    }

    /// Resolve a plugin by id
    pub fn get(&self, name: &str) -> Result<&dyn Plugin> {
        self.plugins
            .iter()
            .find(|p| p.id() == name)
            .map(AsRef::as_ref)
            .ok_or_else(|| Error::PluginNotFound(name.to_string()))
    }

    /// Ids of all registered plugins
    pub fn ids(&self) -> Vec<&'static str> {
        self.plugins.iter().map(|p| p.id()).collect()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.ids())
            .finish()
    }
}

/// Read a string variable
///
/// A required variable has to be present and non-blank. An optional variable
/// that is absent yields `None`.
pub fn string_var<'a>(
    vars: &'a IndexMap<String, String>,
    key: &str,
    required: bool,
) -> Result<Option<&'a str>> {
    match vars.get(key) {
        Some(value) if required && value.trim().is_empty() => Err(Error::Validation(format!(
            "variable '{key}' is required but empty"
        ))),
        Some(value) => Ok(Some(value.as_str())),
        None if required => Err(Error::Validation(format!(
            "variable '{key}' is required but not set"
        ))),
        None => Ok(None),
    }
}

/// Read a required string variable
pub fn required_var<'a>(vars: &'a IndexMap<String, String>, key: &str) -> Result<&'a str> {
    string_var(vars, key, true)?
        .ok_or_else(|| Error::Validation(format!("variable '{key}' is required but not set")))
}

/// Read a boolean variable
///
/// Accepts `1`, `t`, `true` and `0`, `f`, `false` in any case. A blank
/// optional variable counts as absent.
pub fn bool_var(vars: &IndexMap<String, String>, key: &str, required: bool) -> Result<Option<bool>> {
    let Some(value) = string_var(vars, key, required)? else {
        return Ok(None);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "1" | "t" | "true" => Ok(Some(true)),
        "0" | "f" | "false" => Ok(Some(false)),
        _ => Err(Error::Validation(format!(
            "failed parsing '{key}' variable: '{value}' is not a boolean"
        ))),
    }
}

/// Log and succeed for hooks a plugin has no meaning for
fn hook_unsupported(plugin: &str, hook: &str) -> PluginResult {
    tracing::warn!("Hook '{hook}' not supported by {plugin}");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    struct Noop;

    impl Plugin for Noop {
        fn id(&self) -> &'static str {
            "list-comparator"
        }

        fn run(&self, _ctx: &PluginContext<'_>) -> PluginResult {
            Ok(())
        }
    }

    #[test]
    fn test_builtin_registry() {
        let registry = PluginRegistry::builtin();
        for id in ["string-validator", "file-watcher", "list-comparator"] {
            assert_eq!(registry.get(id).unwrap().id(), id);
        }
    }

    #[test]
    fn test_unknown_plugin() {
        let registry = PluginRegistry::builtin();
        let err = registry.get("foo").err().unwrap();
        assert!(matches!(err, Error::PluginNotFound(name) if name == "foo"));
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = PluginRegistry::builtin();
        registry.register(Box::new(Noop));
        assert_eq!(registry.ids().len(), 3);

        let ctx = PluginContext {
            work_dir: Path::new("/repo"),
            hook: "pre-commit",
            vars: &IndexMap::new(),
            args: &[],
        };
        // The built-in would fail on the missing operation
        assert!(registry.get("list-comparator").unwrap().run(&ctx).is_ok());
    }

    #[test]
    fn test_string_var() {
        let v = vars(&[("SET", "value"), ("BLANK", "  ")]);

        assert_eq!(string_var(&v, "SET", true).unwrap(), Some("value"));
        assert_eq!(string_var(&v, "MISSING", false).unwrap(), None);
        assert_eq!(string_var(&v, "BLANK", false).unwrap(), Some("  "));

        let err = string_var(&v, "MISSING", true).unwrap_err();
        assert!(err.to_string().contains("required but not set"));
        let err = string_var(&v, "BLANK", true).unwrap_err();
        assert!(err.to_string().contains("required but empty"));
    }

    #[test]
    fn test_bool_var() {
        let v = vars(&[
            ("YES", "true"),
            ("ONE", "1"),
            ("UPPER", "FALSE"),
            ("EMPTY", ""),
            ("BAD", "maybe"),
        ]);

        assert_eq!(bool_var(&v, "YES", false).unwrap(), Some(true));
        assert_eq!(bool_var(&v, "ONE", true).unwrap(), Some(true));
        assert_eq!(bool_var(&v, "UPPER", false).unwrap(), Some(false));
        assert_eq!(bool_var(&v, "EMPTY", false).unwrap(), None);
        assert_eq!(bool_var(&v, "MISSING", false).unwrap(), None);
        assert!(bool_var(&v, "BAD", false).is_err());
        assert!(bool_var(&v, "MISSING", true).is_err());
    }

    #[test]
    fn test_failure_from_error_is_fatal() {
        let failure = PluginFailure::from(Error::Plugin("boom".to_string()));
        assert!(failure.fatal);
        assert_eq!(failure.to_string(), "boom");
        assert!(!PluginFailure::warning(Error::Plugin("x".to_string())).fatal);
    }
}

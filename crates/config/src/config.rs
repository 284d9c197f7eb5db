//! Configuration model
//!
//! A giks configuration maps git hook names to an ordered list of steps:
//!
//! ```toml
//! [hooks.pre-commit]
//! enabled = true
//!
//! [[hooks.pre-commit.steps]]
//! command = "cargo fmt --check"
//!
//! [[hooks.pre-commit.steps]]
//! plugin = { name = "file-watcher", vars = { FILE_WATCHER_PATTERN = ".*\\.proto", FILE_WATCHER_COMMAND = "make proto" } }
//! ```
//!
//! Parsing is strict: a single unknown hook name or malformed step rejects
//! the whole document.

use giks_core::{Error, GitHook, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The validated root document
#[derive(Debug, Clone, Default, Serialize)]
pub struct Config {
    /// Hook definitions keyed by git hook name, in file order
    pub hooks: IndexMap<String, Hook>,
}

/// A single git hook definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hook {
    /// Git hook name, taken from the key in `Config::hooks`
    pub name: String,

    /// Disabled hooks are neither executed nor installed by default
    pub enabled: bool,

    /// Steps in execution order
    pub steps: Vec<Step>,
}

/// One unit of work within a hook
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Shell command run through `sh -c`
    Command(String),
    /// Command line that replaces the giks process
    Exec(String),
    /// Script file, run directly or through `sh` when not executable
    Script(PathBuf),
    /// Built-in plugin
    Plugin(PluginStep),
}

/// Plugin invocation within a step
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginStep {
    /// Registry identifier, resolved when the step runs
    #[serde(default)]
    pub name: String,

    /// Plugin variables
    ///
    /// A value naming an existing context variable is replaced by that
    /// variable's value when the step runs.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub vars: IndexMap<String, String>,

    /// Message reported instead of the plugin's own error text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Config {
    /// Parse and validate a configuration document
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed TOML, unknown hook names and
    /// steps without exactly one populated entry point.
    pub fn parse(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content).map_err(|e| Error::Parse(e.to_string()))?;

        let mut hooks = IndexMap::with_capacity(raw.hooks.len());
        for (name, raw_hook) in raw.hooks {
            let hook = raw_hook
                .into_hook(&name)
                .map_err(|e| Error::Parse(e.to_string()))?;
            hooks.insert(name, hook);
        }

        let config = Config { hooks };
        config
            .validate()
            .map_err(|e| Error::Parse(e.to_string()))?;

        for hook in config.hooks.values() {
            hook.warn_unreachable_steps();
        }

        tracing::debug!(hooks = config.hooks.len(), "Parsed configuration");
        Ok(config)
    }

    /// Load and parse a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound {
                    kind: "Configuration file",
                    name: path.display().to_string(),
                }
            } else {
                Error::Message(format!(
                    "Failed to read config file {}: {e}",
                    path.display()
                ))
            }
        })?;

        Self::parse(&content)
    }

    /// Validate every hook of the document
    pub fn validate(&self) -> Result<()> {
        for (name, hook) in &self.hooks {
            hook.validate()
                .map_err(|e| Error::Validation(format!("hook '{name}' is invalid: {e}")))?;
        }
        Ok(())
    }

    /// Look up a hook by its exact name
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] for an empty or unknown name, or the
    /// validation error of the hook itself.
    pub fn lookup_hook(&self, name: &str) -> Result<&Hook> {
        if name.is_empty() {
            return Err(Error::hook_not_found(name));
        }
        let hook = self
            .hooks
            .get(name)
            .ok_or_else(|| Error::hook_not_found(name))?;
        hook.validate()?;
        Ok(hook)
    }

    /// Valid hooks, optionally including disabled ones
    pub fn hook_list(&self, include_disabled: bool) -> Vec<&Hook> {
        self.hooks
            .values()
            .filter(|hook| hook.validate().is_ok() && (include_disabled || hook.enabled))
            .collect()
    }

    /// Names of [`Config::hook_list`]
    pub fn hook_names(&self, include_disabled: bool) -> Vec<&str> {
        self.hook_list(include_disabled)
            .into_iter()
            .map(|hook| hook.name.as_str())
            .collect()
    }
}

impl Hook {
    /// Check the hook name against the supported git hooks
    pub fn validate(&self) -> Result<()> {
        self.git_hook().map(|_| ())
    }

    /// The git hook this definition targets
    pub fn git_hook(&self) -> Result<GitHook> {
        self.name.parse()
    }

    /// An `exec` step replaces the process, so nothing after it ever runs
    fn warn_unreachable_steps(&self) {
        if let Some(pos) = self.steps.iter().position(|s| matches!(s, Step::Exec(_)))
            && pos + 1 < self.steps.len()
        {
            tracing::warn!(
                hook = %self.name,
                step = pos + 1,
                skipped = self.steps.len() - pos - 1,
                "Steps after an 'exec' step will never run"
            );
        }
    }
}

impl Step {
    /// Configuration key of this step kind
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Command(_) => "command",
            Step::Exec(_) => "exec",
            Step::Script(_) => "script",
            Step::Plugin(_) => "plugin",
        }
    }

    /// Human readable value of the step (command line, path or plugin name)
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Step::Command(cmd) | Step::Exec(cmd) => cmd.clone(),
            Step::Script(path) => path.display().to_string(),
            Step::Plugin(plugin) => plugin.name.clone(),
        }
    }
}

impl PluginStep {
    /// Plugin name must not be empty
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(
                "provided plugin name is empty".to_string(),
            ));
        }
        Ok(())
    }
}

// Serialized forms. Steps are read as four optional keys and converted into
// the `Step` sum type right away.

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    hooks: IndexMap<String, RawHook>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHook {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    steps: Vec<RawStep>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStep {
    command: Option<String>,
    exec: Option<String>,
    script: Option<String>,
    plugin: Option<PluginStep>,
}

impl RawHook {
    fn into_hook(self, name: &str) -> Result<Hook> {
        let steps = self
            .steps
            .into_iter()
            .enumerate()
            .map(|(idx, step)| {
                step.into_step().map_err(|e| {
                    Error::Validation(format!("hook '{name}' step no. {}: {e}", idx + 1))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Hook {
            name: name.to_string(),
            enabled: self.enabled,
            steps,
        })
    }
}

impl RawStep {
    fn into_step(self) -> Result<Step> {
        let populated = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let command = populated(self.command).map(Step::Command);
        let exec = populated(self.exec).map(Step::Exec);
        let script = populated(self.script).map(|s| Step::Script(PathBuf::from(s)));
        let plugin = self
            .plugin
            .filter(|p| p.validate().is_ok())
            .map(Step::Plugin);

        let mut candidates = [command, exec, script, plugin].into_iter().flatten();
        match (candidates.next(), candidates.next()) {
            (Some(step), None) => Ok(step),
            _ => Err(Error::Validation(
                "too many or too few step entry-points provided. \
                 Only one of 'command', 'exec', 'script' or 'plugin' is possible"
                    .to_string(),
            )),
        }
    }
}

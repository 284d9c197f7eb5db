//! Shared state handed to every command

use giks_config::{Config, LoadedConfig, RuntimePaths};
use giks_engine::{Installer, PluginRegistry};
use std::io::IsTerminal;

/// Runtime context for command execution
///
/// Holds the loaded configuration, its resolved paths and the plugin
/// registry. Built once per process.
#[derive(Debug)]
pub struct RuntimeContext {
    loaded: LoadedConfig,
    registry: PluginRegistry,
    interactive: bool,
}

impl RuntimeContext {
    /// Create a context from a loaded configuration
    pub fn new(loaded: LoadedConfig) -> Self {
        Self {
            loaded,
            registry: PluginRegistry::builtin(),
            interactive: std::io::stdin().is_terminal(),
        }
    }

    /// Hook definitions
    pub fn config(&self) -> &Config {
        &self.loaded.config
    }

    /// Resolved runtime paths
    pub fn paths(&self) -> &RuntimePaths {
        &self.loaded.paths
    }

    /// Built-in plugins
    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    /// Installer for the current repository
    pub fn installer(&self) -> Installer<'_> {
        Installer::new(&self.loaded.config, &self.loaded.paths)
    }

    /// Whether stdin is a terminal a user can answer prompts on
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

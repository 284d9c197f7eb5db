//! # Giks Engine
//!
//! Everything that happens after the configuration is loaded:
//!
//! - **Mixins**: read-only git queries exposed to steps as variables
//! - **Context**: per-step variables and their environment rendering
//! - **Plugins**: built-in plugins and the registry resolving them
//! - **Executor**: ordered step execution with warning/fatal classification
//! - **Install**: writing, detecting and removing hook shims

pub mod context;
pub mod executor;
pub mod install;
pub mod mixins;
pub mod plugins;

// Re-export error types from core
pub use giks_core::{Error, Result};

// Re-export commonly used types
pub use context::ContextVars;
pub use executor::{ExecutionReport, HookExecutor, StepState, StepWarning};
pub use install::{InstallState, Installer};
pub use mixins::{GitCli, GitQuery};
pub use plugins::{Plugin, PluginContext, PluginFailure, PluginRegistry};

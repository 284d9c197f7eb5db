//! Configuration management for giks
//!
//! This crate handles:
//! - Parsing and validating hook definitions
//! - Resolving runtime paths (config file, git directory, binary)
//! - Logging initialization

pub mod assembly;
pub mod config;
pub mod logging;

// Re-export error types from core
pub use giks_core::{Error, Result};

// Re-export main types
pub use assembly::{
    AssemblyOptions, DEFAULT_CONFIG_FILENAME, LoadedConfig, RuntimePaths, assemble,
};
pub use config::{Config, Hook, PluginStep, Step};

//! Runtime assembly of a configuration
//!
//! Combines the parsed configuration document with the absolute paths giks
//! needs at runtime: the configuration file itself, the repository's git and
//! work directories, and the giks binary that installed shims call back into.

use crate::config::Config;
use giks_core::{AbsPath, Error, Result};
use std::path::{Path, PathBuf};

/// Configuration file looked up in the current directory by default
pub const DEFAULT_CONFIG_FILENAME: &str = "giks.toml";

/// User supplied overrides, typically taken from CLI flags
#[derive(Debug, Clone, Default)]
pub struct AssemblyOptions {
    /// Explicit configuration file
    pub config_file: Option<PathBuf>,
    /// Directory inside the repository, or the git directory itself
    pub git_dir: Option<PathBuf>,
    /// Binary written into hook shims
    pub binary: Option<PathBuf>,
}

/// Absolute paths resolved at assembly time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePaths {
    /// Configuration file the hooks were loaded from
    pub config_file: AbsPath,
    /// The repository's git directory (`.git`)
    pub git_dir: AbsPath,
    /// Working tree; steps run from here
    pub work_dir: AbsPath,
    /// The giks binary
    pub binary: AbsPath,
}

impl RuntimePaths {
    /// Directory git looks up hook files in
    #[must_use]
    pub fn hooks_dir(&self) -> AbsPath {
        self.git_dir.join("hooks")
    }
}

/// A parsed configuration together with its runtime paths
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Hook definitions
    pub config: Config,
    /// Resolved paths
    pub paths: RuntimePaths,
}

/// Resolve all runtime paths and load the configuration file
pub fn assemble(options: &AssemblyOptions) -> Result<LoadedConfig> {
    let config_file = resolve_config_file(options.config_file.as_deref())?;
    let (git_dir, work_dir) = resolve_git_dir(options.git_dir.as_deref())?;
    let binary = resolve_binary(options.binary.as_deref())?;

    tracing::debug!(
        config = %config_file,
        git_dir = %git_dir,
        work_dir = %work_dir,
        binary = %binary,
        "Resolved runtime paths"
    );

    let config = Config::load(config_file.as_path())?;

    Ok(LoadedConfig {
        config,
        paths: RuntimePaths {
            config_file,
            git_dir,
            work_dir,
            binary,
        },
    })
}

/// Resolve the configuration file, which has to exist
pub fn resolve_config_file(explicit: Option<&Path>) -> Result<AbsPath> {
    let path = AbsPath::resolve(explicit.unwrap_or(Path::new(DEFAULT_CONFIG_FILENAME)))?;

    if !path.as_path().is_file() {
        return Err(Error::NotFound {
            kind: "Configuration file",
            name: path.to_string(),
        });
    }
    Ok(path)
}

/// Resolve the git directory and work tree of the repository containing `start`
///
/// `start` defaults to the current directory. Returns `(git_dir, work_dir)`.
/// Bare repositories have no work tree; the parent of the git directory is
/// used instead.
pub fn resolve_git_dir(start: Option<&Path>) -> Result<(AbsPath, AbsPath)> {
    let start = AbsPath::resolve(start.unwrap_or(Path::new(".")))?;

    let repo = git2::Repository::discover(start.as_path()).map_err(|e| {
        Error::Message(format!("Not a git repository ({start}): {}", e.message()))
    })?;

    // libgit2 reports directories with a trailing separator
    let git_dir = AbsPath::resolve(&normalize(repo.path()))?;
    let work_dir = match repo.workdir() {
        Some(dir) => AbsPath::resolve(&normalize(dir))?,
        None => git_dir.parent().unwrap_or_else(|| git_dir.clone()),
    };

    Ok((git_dir, work_dir))
}

/// Resolve the binary embedded into hook shims
///
/// Without an explicit value the running executable is used. An explicit
/// value that exists on disk is made absolute; anything else is looked up on
/// `PATH`.
pub fn resolve_binary(explicit: Option<&Path>) -> Result<AbsPath> {
    let Some(binary) = explicit else {
        let exe = std::env::current_exe().or_else(|_| {
            std::env::args_os()
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| Error::Message("Cannot determine the giks binary".to_string()))
        })?;
        return resolve_binary(Some(&exe));
    };

    if binary.exists() {
        return AbsPath::resolve(binary);
    }

    let found = which::which(binary).map_err(|e| {
        Error::Message(format!(
            "Cannot resolve binary '{}': {e}",
            binary.display()
        ))
    })?;
    AbsPath::resolve(&found)
}

fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

//! Base error types for giks
//!
//! Every library crate reports failures through this single taxonomy so the
//! CLI can tell configuration problems, installation outcomes and hook
//! failures apart without inspecting messages.

use std::path::PathBuf;
use thiserror::Error;

/// Base error type for shared functionality
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Path is not absolute
    #[error("Path must be absolute: {}", path.display())]
    PathNotAbsolute { path: PathBuf },

    /// Malformed or invalid configuration document
    #[error("Provided configuration malformed: {0}")]
    Parse(String),

    /// A hook or step violates the configuration rules
    #[error("{0}")]
    Validation(String),

    /// Requested item does not exist
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// Plugin name could not be resolved against the registry
    #[error("Plugin '{0}' not found")]
    PluginNotFound(String),

    /// Execution was requested for a disabled hook
    #[error("Hook '{0}' is not enabled")]
    HookDisabled(String),

    /// Shim file already present with the expected content
    #[error("Hook '{0}' is already installed")]
    AlreadyInstalled(String),

    /// No shim file present
    #[error("Hook '{0}' is not installed")]
    NotInstalled(String),

    /// Hook file exists but was not written by giks
    #[error("Hook '{hook}' is externally managed ({})", path.display())]
    ExternallyManaged { hook: String, path: PathBuf },

    /// A hook step failed fatally
    #[error("Hook '{hook}' failed executing step no. {step}")]
    StepFailed {
        hook: String,
        step: usize,
        #[source]
        source: Box<Error>,
    },

    /// External command could not be run or exited unsuccessfully
    #[error("Command '{command}' failed: {message}")]
    Command { command: String, message: String },

    /// Plugin reported a failure
    #[error("{0}")]
    Plugin(String),

    /// Recoverable failure; hook execution continues
    #[error("{0}")]
    Warning(Box<Error>),

    /// Generic error message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Tag an error as recoverable
    ///
    /// Warnings never abort a hook. Tagging an existing warning does not nest it.
    pub fn warning(err: impl Into<Error>) -> Self {
        match err.into() {
            warning @ Error::Warning(_) => warning,
            other => Error::Warning(Box::new(other)),
        }
    }

    /// Whether this error is tagged recoverable
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(self, Error::Warning(_))
    }

    /// Create a `NotFound` error for a hook
    pub fn hook_not_found(name: impl Into<String>) -> Self {
        Error::NotFound {
            kind: "Hook",
            name: name.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_plain_error_is_fatal() {
        let err = Error::Message("boom".to_string());
        assert!(!err.is_warning());
    }

    #[test]
    fn test_warning_tag() {
        let err = Error::warning(Error::Message("foo bar".to_string()));
        assert!(err.is_warning());
        assert_eq!(err.to_string(), "foo bar");
    }

    #[test]
    fn test_warning_is_not_nested() {
        let err = Error::warning(Error::warning(Error::Message("once".to_string())));
        match err {
            Error::Warning(inner) => assert!(!inner.is_warning()),
            other => panic!("expected warning, got {other:?}"),
        }
    }

    #[test]
    fn test_io_error_can_be_downgraded() {
        let io = std::io::Error::other("disk on fire");
        let err = Error::warning(io);
        assert!(err.is_warning());
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_step_failed_message() {
        let err = Error::StepFailed {
            hook: "pre-commit".to_string(),
            step: 2,
            source: Box::new(Error::Message("exit status 1".to_string())),
        };
        assert_eq!(
            err.to_string(),
            "Hook 'pre-commit' failed executing step no. 2"
        );
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "exit status 1");
    }

    #[test]
    fn test_hook_not_found() {
        let err = Error::hook_not_found("absent");
        assert_eq!(err.to_string(), "Hook 'absent' not found");
    }

    #[test]
    fn test_externally_managed_mentions_path() {
        let err = Error::ExternallyManaged {
            hook: "pre-commit".to_string(),
            path: PathBuf::from("/repo/.git/hooks/pre-commit"),
        };
        assert!(err.to_string().contains("/repo/.git/hooks/pre-commit"));
    }
}

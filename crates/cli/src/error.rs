//! Error types for CLI commands

use thiserror::Error;

/// Errors that can occur during command execution
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CommandError {
    /// Error reported by the giks libraries
    #[error(transparent)]
    Giks(#[from] giks_core::Error),

    /// Some hooks of a batch install/uninstall failed
    #[error("{action} failed for {failed} out of {total} hooks")]
    BatchFailed {
        /// `install` or `uninstall`
        action: &'static str,
        /// Number of hooks that failed
        failed: usize,
        /// Total number of hooks
        total: usize,
    },

    /// Interactive prompt failed
    #[error("Failed to read confirmation: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Output serialization failed
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for command operations
pub type Result<T> = std::result::Result<T, CommandError>;

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_giks_error_is_transparent() {
        let err = CommandError::from(giks_core::Error::hook_not_found("pre-commit"));
        assert_eq!(err.to_string(), "Hook 'pre-commit' not found");
    }

    #[test]
    fn test_batch_failed_message() {
        let err = CommandError::BatchFailed {
            action: "install",
            failed: 1,
            total: 3,
        };
        assert_eq!(err.to_string(), "install failed for 1 out of 3 hooks");
    }

    #[test]
    fn test_io_error() {
        let err = CommandError::from(std::io::Error::other("disk full"));
        assert!(err.to_string().contains("disk full"));
    }
}

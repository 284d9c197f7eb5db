//! Catalogue of git hooks giks knows how to manage
//!
//! Hook names are validated against this fixed set. Each hook also knows how
//! many positional arguments git passes to it, which determines the
//! placeholders written into installed shim files.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A git hook supported by giks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GitHook {
    ApplypatchMsg,
    CommitMsg,
    FsmonitorWatchman,
    PostCheckout,
    PostCommit,
    PostMerge,
    PostRewrite,
    PostUpdate,
    PreApplypatch,
    PreCommit,
    PreMergeCommit,
    PrePush,
    PreRebase,
    PreReceive,
    PrepareCommitMsg,
    Update,
}

impl GitHook {
    /// Every supported hook, in alphabetical order
    pub const ALL: [GitHook; 16] = [
        GitHook::ApplypatchMsg,
        GitHook::CommitMsg,
        GitHook::FsmonitorWatchman,
        GitHook::PostCheckout,
        GitHook::PostCommit,
        GitHook::PostMerge,
        GitHook::PostRewrite,
        GitHook::PostUpdate,
        GitHook::PreApplypatch,
        GitHook::PreCommit,
        GitHook::PreMergeCommit,
        GitHook::PrePush,
        GitHook::PreRebase,
        GitHook::PreReceive,
        GitHook::PrepareCommitMsg,
        GitHook::Update,
    ];

    /// The file name git looks for in the hooks directory
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GitHook::ApplypatchMsg => "applypatch-msg",
            GitHook::CommitMsg => "commit-msg",
            GitHook::FsmonitorWatchman => "fsmonitor-watchman",
            GitHook::PostCheckout => "post-checkout",
            GitHook::PostCommit => "post-commit",
            GitHook::PostMerge => "post-merge",
            GitHook::PostRewrite => "post-rewrite",
            GitHook::PostUpdate => "post-update",
            GitHook::PreApplypatch => "pre-applypatch",
            GitHook::PreCommit => "pre-commit",
            GitHook::PreMergeCommit => "pre-merge-commit",
            GitHook::PrePush => "pre-push",
            GitHook::PreRebase => "pre-rebase",
            GitHook::PreReceive => "pre-receive",
            GitHook::PrepareCommitMsg => "prepare-commit-msg",
            GitHook::Update => "update",
        }
    }

    /// Number of positional arguments git passes to this hook
    ///
    /// `post-update` receives a variable list of refs; only the fixed part is
    /// forwarded, which is none.
    #[must_use]
    pub fn arg_count(&self) -> usize {
        match self {
            GitHook::PostCommit
            | GitHook::PostUpdate
            | GitHook::PreApplypatch
            | GitHook::PreCommit
            | GitHook::PreMergeCommit
            | GitHook::PreReceive => 0,
            GitHook::ApplypatchMsg
            | GitHook::CommitMsg
            | GitHook::PostMerge
            | GitHook::PostRewrite => 1,
            GitHook::FsmonitorWatchman | GitHook::PrePush | GitHook::PreRebase => 2,
            GitHook::PostCheckout | GitHook::PrepareCommitMsg | GitHook::Update => 3,
        }
    }

    /// Whether `name` is a supported hook name
    #[must_use]
    pub fn is_valid(name: &str) -> bool {
        name.parse::<GitHook>().is_ok()
    }
}

impl FromStr for GitHook {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GitHook::ALL
            .iter()
            .copied()
            .find(|hook| hook.as_str() == s)
            .ok_or_else(|| Error::Validation(format!("hook '{s}' is not a valid Git hook")))
    }
}

impl fmt::Display for GitHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_parse_known_hooks() {
        for hook in GitHook::ALL {
            assert_eq!(hook.as_str().parse::<GitHook>().unwrap(), hook);
        }
    }

    #[test]
    fn test_parse_unknown_hook() {
        let err = "foo".parse::<GitHook>().unwrap_err();
        assert!(err.to_string().contains("not a valid Git hook"));
        assert!(!GitHook::is_valid(""));
        assert!(!GitHook::is_valid("Pre-Commit"));
    }

    #[test]
    fn test_arg_counts() {
        assert_eq!(GitHook::PreCommit.arg_count(), 0);
        assert_eq!(GitHook::CommitMsg.arg_count(), 1);
        assert_eq!(GitHook::PrePush.arg_count(), 2);
        assert_eq!(GitHook::PreRebase.arg_count(), 2);
        assert_eq!(GitHook::PrepareCommitMsg.arg_count(), 3);
        assert_eq!(GitHook::Update.arg_count(), 3);
    }

    #[test]
    fn test_display_matches_file_name() {
        assert_eq!(GitHook::PreMergeCommit.to_string(), "pre-merge-commit");
    }
}

//! Absolute path handling
//!
//! Runtime paths (configuration file, git directory, giks binary) are always
//! stored as [`AbsPath`] so that they can be embedded verbatim into installed
//! hook shims regardless of the directory git later runs them from.
//!
//! # Examples
//!
//! ```
//! use giks_core::path::AbsPath;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let git_dir = AbsPath::new("/repo/.git".into())?;
//! assert_eq!(git_dir.join("hooks").as_path(), std::path::Path::new("/repo/.git/hooks"));
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// An absolute path on the filesystem
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbsPath(PathBuf);

impl AbsPath {
    /// Create a new `AbsPath` from a `PathBuf`
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute.
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.is_absolute() {
            Ok(AbsPath(path))
        } else {
            Err(Error::PathNotAbsolute { path })
        }
    }

    /// Resolve any user supplied path to an absolute one
    ///
    /// - `~` and `~/...` expand to the home directory
    /// - relative paths are joined onto the current working directory
    /// - absolute paths are returned unchanged
    ///
    /// No normalisation of `..` components takes place.
    pub fn resolve(path: &Path) -> Result<Self> {
        if path.is_absolute() {
            return Ok(AbsPath(path.to_path_buf()));
        }

        if let Ok(rest) = path.strip_prefix("~") {
            let home = dirs::home_dir().ok_or_else(|| {
                Error::Message(format!(
                    "Could not retrieve user home directory to expand '{}'",
                    path.display()
                ))
            })?;
            return Self::new(home.join(rest));
        }

        let cwd = std::env::current_dir()?;
        Self::new(cwd.join(path))
    }

    /// Get the underlying `Path`
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert to a `PathBuf`
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Join with a relative component
    #[must_use]
    pub fn join(&self, rel: impl AsRef<Path>) -> Self {
        AbsPath(self.0.join(rel))
    }

    /// Get the parent directory
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(|p| AbsPath(p.to_path_buf()))
    }
}

impl AsRef<Path> for AbsPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl std::fmt::Display for AbsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

//! Hook installation
//!
//! Installing a hook writes a small shell shim into the repository's hooks
//! directory which calls back into giks:
//!
//! ```sh
//! #!/bin/sh
//! # GIKS-ZONE!
//! # ...
//! /usr/local/bin/giks exec commit-msg --config=/repo/giks.toml ${1}
//! ```
//!
//! A hook file counts as managed by giks only if its trimmed content equals
//! the shim giks would write right now. Any other file is left alone.

use giks_config::{Config, RuntimePaths};
use giks_core::{AbsPath, Error, GitHook, Result};
use std::fs;
use std::io::ErrorKind;
use std::os::unix::fs::PermissionsExt;

/// File mode of installed shims
const HOOK_MODE: u32 = 0o755;

/// What currently occupies a hook file location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    /// No file
    Absent,
    /// A shim written by giks for the current configuration
    Managed,
    /// Any other file
    External,
}

/// Installs and removes hook shims
#[derive(Debug, Clone, Copy)]
pub struct Installer<'a> {
    config: &'a Config,
    paths: &'a RuntimePaths,
}

impl<'a> Installer<'a> {
    /// Create an installer for the repository described by `paths`
    pub fn new(config: &'a Config, paths: &'a RuntimePaths) -> Self {
        Self { config, paths }
    }

    /// Location of the hook file
    pub fn hook_path(&self, hook: &str) -> AbsPath {
        self.paths.hooks_dir().join(hook)
    }

    /// Shim content for `hook`, trimmed
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when `hook` is not a supported git hook.
    pub fn expected_content(&self, hook: &str) -> Result<String> {
        let git_hook: GitHook = hook.parse()?;

        let mut invocation = format!(
            "{} exec {hook} --config={}",
            quote(&self.paths.binary),
            quote(&self.paths.config_file)
        );
        for n in 1..=git_hook.arg_count() {
            invocation.push_str(&format!(" ${{{n}}}"));
        }

        let content = format!(
            "#!/bin/sh
# GIKS-ZONE!
# This {hook} hook is managed via giks (https://github.com/jenpet/giks).
# You should not alter this file manually except you do it tenderly and know what you are actually doing.
# To remove this hook run 'giks uninstall {hook}'.
{invocation}
"
        );
        Ok(content.trim().to_string())
    }

    /// Inspect the hook file location
    pub fn state(&self, hook: &str) -> Result<InstallState> {
        let expected = self.expected_content(hook)?;
        let path = self.hook_path(hook);

        match fs::read_to_string(path.as_path()) {
            Ok(content) if content.trim() == expected => Ok(InstallState::Managed),
            Ok(_) => Ok(InstallState::External),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(InstallState::Absent),
            // Binary content is not ours either
            Err(e) if e.kind() == ErrorKind::InvalidData => Ok(InstallState::External),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a giks shim is installed for `hook`
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExternallyManaged`] when a foreign file is present.
    pub fn is_installed(&self, hook: &str) -> Result<bool> {
        match self.state(hook)? {
            InstallState::Absent => Ok(false),
            InstallState::Managed => Ok(true),
            InstallState::External => Err(self.externally_managed(hook)),
        }
    }

    /// Write the shim for `hook`
    ///
    /// `force` rewrites an existing giks shim. Foreign files are never
    /// overwritten.
    pub fn install(&self, hook: &str, force: bool) -> Result<()> {
        match self.state(hook)? {
            InstallState::Managed if !force => {
                return Err(Error::AlreadyInstalled(hook.to_string()));
            }
            InstallState::External => return Err(self.externally_managed(hook)),
            InstallState::Managed | InstallState::Absent => {}
        }

        let hooks_dir = self.paths.hooks_dir();
        fs::create_dir_all(hooks_dir.as_path())?;

        let path = self.hook_path(hook);
        let content = self.expected_content(hook)?;
        fs::write(path.as_path(), format!("{content}\n"))?;
        fs::set_permissions(path.as_path(), fs::Permissions::from_mode(HOOK_MODE))?;

        tracing::info!("Installed hook '{hook}' in '{path}'");
        Ok(())
    }

    /// Remove the shim for `hook`
    pub fn uninstall(&self, hook: &str) -> Result<()> {
        match self.state(hook)? {
            InstallState::Absent => return Err(Error::NotInstalled(hook.to_string())),
            InstallState::External => return Err(self.externally_managed(hook)),
            InstallState::Managed => {}
        }

        let path = self.hook_path(hook);
        fs::remove_file(path.as_path())?;

        tracing::info!("Uninstalled hook '{hook}' by removing '{path}'");
        Ok(())
    }

    /// Install every enabled hook, each reporting on its own
    pub fn install_all(&self, force: bool) -> Vec<(String, Result<()>)> {
        self.config
            .hook_names(false)
            .into_iter()
            .map(|name| (name.to_string(), self.install(name, force)))
            .collect()
    }

    /// Uninstall every enabled hook, each reporting on its own
    pub fn uninstall_all(&self) -> Vec<(String, Result<()>)> {
        self.config
            .hook_names(false)
            .into_iter()
            .map(|name| (name.to_string(), self.uninstall(name)))
            .collect()
    }

    fn externally_managed(&self, hook: &str) -> Error {
        Error::ExternallyManaged {
            hook: hook.to_string(),
            path: self.hook_path(hook).into_path_buf(),
        }
    }
}

/// Outcomes of an install run that are not failures of giks itself
pub fn is_benign(err: &Error) -> bool {
    matches!(
        err,
        Error::AlreadyInstalled(_) | Error::NotInstalled(_) | Error::ExternallyManaged { .. }
    )
}

fn quote(path: &AbsPath) -> String {
    shell_words::quote(&path.to_string()).into_owned()
}

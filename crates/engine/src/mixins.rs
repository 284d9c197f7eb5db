//! Git mixins
//!
//! Mixins are read-only git queries whose results are handed to every step
//! as context variables, e.g. the list of staged files.

use giks_core::{Error, Result};
use indexmap::IndexMap;
use std::ffi::OsString;
use std::path::Path;

/// Files modified in the work tree but not staged
pub const MODIFIED_FILES: &str = "GIKS_MIXIN_MODIFIED_FILES";
/// Files staged for the next commit
pub const STAGED_FILES: &str = "GIKS_MIXIN_STAGED_FILES";
/// Files differing from `HEAD`, staged or not
pub const CHANGED_FILES: &str = "GIKS_MIXIN_CHANGED_FILES";

/// Hash of the empty tree, diffed against before the first commit
const EMPTY_TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// Runs read-only git commands in a repository
pub trait GitQuery {
    /// Run `git <args>` inside `work_dir` and return its standard output
    fn query(&self, work_dir: &Path, args: &[&str]) -> Result<String>;
}

/// [`GitQuery`] backed by the `git` executable
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitQuery for GitCli {
    fn query(&self, work_dir: &Path, args: &[&str]) -> Result<String> {
        let mut cmd_args: Vec<OsString> = vec!["-C".into(), work_dir.into()];
        cmd_args.extend(args.iter().map(OsString::from));

        let command = format!("git {}", args.join(" "));
        let output = duct::cmd("git", cmd_args)
            .stdout_capture()
            .stderr_capture()
            .unchecked()
            .run()
            .map_err(|e| Error::Command {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::Command {
                command,
                message: format!(
                    "{}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

type Resolver = fn(&dyn GitQuery, &Path) -> Result<String>;

/// Mixins in the order they are applied
const MIXINS: &[(&str, Resolver)] = &[
    (MODIFIED_FILES, modified_files),
    (STAGED_FILES, staged_files),
    (CHANGED_FILES, changed_files),
];

/// Run every mixin against the repository at `work_dir`
///
/// A failing mixin is logged and left out; the others still apply.
pub fn collect(git: &dyn GitQuery, work_dir: &Path) -> IndexMap<String, String> {
    let mut vars = IndexMap::with_capacity(MIXINS.len());

    for (name, resolve) in MIXINS {
        match resolve(git, work_dir) {
            Ok(value) => {
                tracing::trace!(mixin = name, value = %value, "Applied git mixin");
                vars.insert((*name).to_string(), value);
            }
            Err(e) => {
                tracing::warn!("Failed applying git mixin '{name}': {e}");
            }
        }
    }

    vars
}

fn modified_files(git: &dyn GitQuery, work_dir: &Path) -> Result<String> {
    git.query(work_dir, &["ls-files", "-m"]).map(|out| join_lines(&out))
}

fn staged_files(git: &dyn GitQuery, work_dir: &Path) -> Result<String> {
    git.query(work_dir, &["diff", "--cached", "--name-only"])
        .map(|out| join_lines(&out))
}

fn changed_files(git: &dyn GitQuery, work_dir: &Path) -> Result<String> {
    git.query(work_dir, &["diff", "--name-only", "HEAD"])
        .or_else(|e| {
            tracing::debug!("Diff against HEAD failed, using the empty tree: {e}");
            git.query(work_dir, &["diff", "--name-only", EMPTY_TREE])
        })
        .map(|out| join_lines(&out))
}

/// One file per line becomes a single space separated list
fn join_lines(output: &str) -> String {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

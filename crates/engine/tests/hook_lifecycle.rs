//! End-to-end tests: configuration, installation and execution in a scratch repository

use giks_config::{Config, Hook, RuntimePaths, Step};
use giks_core::{AbsPath, Error};
use giks_engine::{GitCli, HookExecutor, InstallState, Installer, PluginRegistry, StepState};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CONFIG: &str = r#"
[hooks.pre-commit]
enabled = true

[[hooks.pre-commit.steps]]
command = "printf '%s' \"$GIKS_MIXIN_STAGED_FILES\" > staged.out"

[[hooks.pre-commit.steps]]
plugin = { name = "list-comparator", vars = { LIST_COMPARATOR_LIST_A = "GIKS_MIXIN_STAGED_FILES", LIST_COMPARATOR_LIST_B = "secrets.env", LIST_COMPARATOR_OPERATION = "intersect", LIST_COMPARATOR_FAIL_ON_MATCH = "true" }, message = "secrets.env must not be committed" }

[[hooks.pre-commit.steps]]
command = "touch done.marker"

[hooks.pre-push]
enabled = true

[[hooks.pre-push.steps]]
command = "exit 1"

[[hooks.pre-push.steps]]
command = "touch marker"
"#;

struct Repo {
    temp: TempDir,
    repo: git2::Repository,
    config: Config,
    paths: RuntimePaths,
}

impl Repo {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        let repo = git2::Repository::init(&root).unwrap();
        fs::write(root.join("giks.toml"), CONFIG).unwrap();

        let paths = RuntimePaths {
            config_file: AbsPath::new(root.join("giks.toml")).unwrap(),
            git_dir: AbsPath::new(root.join(".git")).unwrap(),
            work_dir: AbsPath::new(root).unwrap(),
            binary: AbsPath::new("/usr/local/bin/giks".into()).unwrap(),
        };

        Self {
            temp,
            repo,
            config: Config::parse(CONFIG).unwrap(),
            paths,
        }
    }

    fn stage(&self, file: &str) {
        fs::write(self.temp.path().join(file), "content").unwrap();
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();
    }

    fn work_dir(&self) -> &Path {
        self.paths.work_dir.as_path()
    }
}

fn git_available() -> bool {
    which::which("git").is_ok()
}

#[test]
fn test_install_and_uninstall_enabled_hooks() {
    let repo = Repo::new();
    let installer = Installer::new(&repo.config, &repo.paths);

    let results = installer.install_all(false);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|(_, r)| r.is_ok()));

    let shim = fs::read_to_string(repo.paths.hooks_dir().join("pre-push").as_path()).unwrap();
    assert!(shim.trim_end().ends_with("giks.toml ${1} ${2}"));
    assert_eq!(installer.state("pre-push").unwrap(), InstallState::Managed);

    let results = installer.install_all(false);
    assert!(
        results
            .iter()
            .all(|(_, r)| matches!(r, Err(Error::AlreadyInstalled(_))))
    );

    assert!(installer.uninstall_all().iter().all(|(_, r)| r.is_ok()));
    assert_eq!(installer.state("pre-commit").unwrap(), InstallState::Absent);
}

#[test]
fn test_failing_step_halts_hook() {
    let repo = Repo::new();
    let registry = PluginRegistry::builtin();
    let executor = HookExecutor::new(repo.work_dir(), &registry, &GitCli);

    let hook = repo.config.lookup_hook("pre-push").unwrap();
    let err = executor
        .execute_hook(hook, &["origin".to_string(), "git@example.com:repo.git".to_string()])
        .unwrap_err();

    assert!(matches!(err, Error::StepFailed { step: 1, .. }));
    assert!(!repo.work_dir().join("marker").exists());
}

#[test]
fn test_pre_commit_sees_staged_files() {
    if !git_available() {
        return;
    }
    let repo = Repo::new();
    repo.stage("src.rs");

    let registry = PluginRegistry::builtin();
    let executor = HookExecutor::new(repo.work_dir(), &registry, &GitCli);
    let hook = repo.config.lookup_hook("pre-commit").unwrap();

    let report = executor.execute_hook(hook, &[]).unwrap();
    assert_eq!(report.steps, vec![StepState::Succeeded; 3]);
    assert_eq!(
        fs::read_to_string(repo.work_dir().join("staged.out")).unwrap(),
        "src.rs"
    );
    assert!(repo.work_dir().join("done.marker").exists());
}

#[test]
fn test_pre_commit_blocks_forbidden_file() {
    if !git_available() {
        return;
    }
    let repo = Repo::new();
    repo.stage("src.rs");
    repo.stage("secrets.env");

    let registry = PluginRegistry::builtin();
    let executor = HookExecutor::new(repo.work_dir(), &registry, &GitCli);
    let hook = repo.config.lookup_hook("pre-commit").unwrap();

    let err = executor.execute_hook(hook, &[]).unwrap_err();
    match &err {
        Error::StepFailed { step, source, .. } => {
            assert_eq!(*step, 2);
            assert_eq!(source.to_string(), "secrets.env must not be committed");
        }
        other => panic!("expected StepFailed, got {other:?}"),
    }
    assert!(!repo.work_dir().join("done.marker").exists());
}

#[test]
fn test_later_steps_see_files_staged_by_earlier_steps() {
    if !git_available() {
        return;
    }
    let repo = Repo::new();
    let hook = Hook {
        name: "pre-commit".to_string(),
        enabled: true,
        steps: vec![
            Step::Command("echo x > a.txt && git add a.txt".to_string()),
            Step::Command("printf '%s' \"$GIKS_MIXIN_STAGED_FILES\" > staged.out".to_string()),
        ],
    };

    let registry = PluginRegistry::builtin();
    let executor = HookExecutor::new(repo.work_dir(), &registry, &GitCli);
    executor.execute_hook(&hook, &[]).unwrap();

    assert_eq!(
        fs::read_to_string(repo.work_dir().join("staged.out")).unwrap(),
        "a.txt"
    );
}

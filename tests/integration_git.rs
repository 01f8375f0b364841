// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for repository operations.
//!
//! Drives real `git` against temporary upstream/clone pairs.

use repo_steward::config::{Config, ConfigHandle};
use repo_steward::git::batch::{BatchOrchestrator, BatchReport};
use repo_steward::git::collection::RepositorySet;
use repo_steward::git::repository::{Repository, RepositoryOperations};
use repo_steward::git::runner::{CommandRunner, ShellRunner};
use repo_steward::git::status::SyncStatus;
use repo_steward::git::versions::{RepositoryKind, VersionDescriptor, VersionKind};
use repo_steward::notify::{AutoConfirm, AutoDeny, SilentNotifier};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Helper to run git commands in a directory
fn run_git(args: &[&str], cwd: &Path) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn commit_file(dir: &Path, content: &str, message: &str) {
    fs::write(dir.join("README.md"), content).unwrap();
    assert!(run_git(&["add", "README.md"], dir));
    assert!(run_git(&["commit", "-q", "--no-gpg-sign", "-m", message], dir));
}

/// Creates `upstream/` with one commit and clones it to `name/`.
fn upstream_and_clone(root: &Path, name: &str) -> (PathBuf, PathBuf) {
    let upstream = root.join(format!("{name}-upstream"));
    fs::create_dir(&upstream).unwrap();
    assert!(run_git(&["init", "-q", "-b", "main"], &upstream));
    commit_file(&upstream, "# v1", "Initial commit");

    let clone = root.join(name);
    assert!(run_git(
        &[
            "clone",
            "-q",
            upstream.to_str().unwrap(),
            clone.to_str().unwrap()
        ],
        root
    ));
    (upstream, clone)
}

fn runner(config: &ConfigHandle) -> Arc<dyn CommandRunner> {
    Arc::new(ShellRunner::new(config.clone()))
}

fn plugin(path: &Path) -> Repository {
    let config = ConfigHandle::default();
    Repository::new(path, RepositoryKind::Plugin, runner(&config), config)
}

fn readme(dir: &Path) -> String {
    fs::read_to_string(dir.join("README.md")).unwrap()
}

// =============================================================================
// Status and update to latest
// =============================================================================

#[tokio::test]
async fn git_behind_clone_updates_to_latest() {
    let temp = temp_dir();
    let (upstream, clone) = upstream_and_clone(temp.path(), "node-a");
    commit_file(&upstream, "# v2", "Second commit");

    let repo = plugin(&clone);
    assert_eq!(repo.check_status().await, SyncStatus::UpdateAvailable);
    assert!(repo.update_available());

    let outcome = repo
        .apply(&VersionDescriptor::latest(), Arc::new(AutoDeny))
        .await;
    assert!(outcome.success, "{outcome}");
    assert_eq!(outcome.message, "updated to latest");
    assert!(!repo.update_available());
    assert_eq!(readme(&clone), "# v2");

    assert_eq!(repo.check_status().await, SyncStatus::UpToDate);
}

#[tokio::test]
async fn git_local_changes_declined_then_discarded() {
    let temp = temp_dir();
    let (upstream, clone) = upstream_and_clone(temp.path(), "node-b");
    commit_file(&upstream, "# upstream edit", "Upstream edit");
    fs::write(clone.join("README.md"), "# local edit").unwrap();

    let repo = plugin(&clone);
    repo.check_status().await;

    let declined = repo
        .apply(&VersionDescriptor::latest(), Arc::new(AutoDeny))
        .await;
    assert!(!declined.success);
    assert_eq!(readme(&clone), "# local edit");

    let accepted = repo
        .apply(&VersionDescriptor::latest(), Arc::new(AutoConfirm))
        .await;
    assert!(accepted.success, "{accepted}");
    assert_eq!(readme(&clone), "# upstream edit");
}

// =============================================================================
// Versions and rollback
// =============================================================================

#[tokio::test]
async fn git_versions_and_rollback_to_tag() {
    let temp = temp_dir();
    let (upstream, _) = upstream_and_clone(temp.path(), "node-c");
    assert!(run_git(&["tag", "v1"], &upstream));
    commit_file(&upstream, "# v2", "Second commit");

    let clone = temp.path().join("node-c-tagged");
    assert!(run_git(
        &[
            "clone",
            "-q",
            upstream.to_str().unwrap(),
            clone.to_str().unwrap()
        ],
        temp.path()
    ));

    let repo = plugin(&clone);
    let versions = repo.fetch_versions().await;
    assert_eq!(versions[0].kind(), VersionKind::Latest);
    assert!(versions.iter().any(|v| v.identifier() == Some("v1")));
    let commits = versions
        .iter()
        .filter(|v| v.kind() == VersionKind::Commit)
        .count();
    assert_eq!(commits, 2);

    let outcome = repo
        .apply(
            &VersionDescriptor::from_selection("tag:v1").unwrap(),
            Arc::new(AutoDeny),
        )
        .await;
    assert!(outcome.success, "{outcome}");
    assert!(outcome.message.starts_with("rolled back to v1, now at "));
    assert_eq!(readme(&clone), "# v1");

    assert_eq!(repo.check_status().await, SyncStatus::Detached);

    let back = repo
        .apply(&VersionDescriptor::latest(), Arc::new(AutoDeny))
        .await;
    assert!(back.success, "{back}");
    assert_eq!(readme(&clone), "# v2");
}

#[tokio::test]
async fn git_versions_survive_legacy_log_encoding() {
    let temp = temp_dir();
    let (_, clone) = upstream_and_clone(temp.path(), "node-gbk");
    assert!(run_git(&["config", "i18n.logOutputEncoding", "gbk"], &clone));
    commit_file(&clone, "# v2", "修复加载器");
    commit_file(&clone, "# v3", "third");

    let repo = plugin(&clone);
    let versions = repo.fetch_versions().await;
    let labels: Vec<&str> = versions.iter().map(VersionDescriptor::label).collect();
    assert_eq!(versions.len(), 4, "{labels:?}");
    assert!(labels[1].ends_with(" - third"), "{labels:?}");
    assert!(labels[2].ends_with(" - 修复加载器"), "{labels:?}");
    assert!(labels[3].ends_with(" - Initial commit"), "{labels:?}");
}

// =============================================================================
// Non-repository paths
// =============================================================================

#[tokio::test]
async fn git_plain_directory_is_not_a_repository() {
    let temp = temp_dir();
    let repo = plugin(temp.path());

    assert_eq!(repo.check_status().await, SyncStatus::NotARepository);
    assert!(repo.fetch_versions().await.is_empty());
    assert!(repo.head_summary().await.is_none());

    let outcome = repo
        .apply(&VersionDescriptor::latest(), Arc::new(AutoConfirm))
        .await;
    assert!(!outcome.success);
}

// =============================================================================
// Batch update
// =============================================================================

#[tokio::test]
async fn git_batch_updates_only_outdated_checkouts() {
    let temp = temp_dir();
    let (upstream_a, clone_a) = upstream_and_clone(temp.path(), "node-a");
    let (_, clone_b) = upstream_and_clone(temp.path(), "node-b");
    commit_file(&upstream_a, "# v2", "Second commit");

    let mut config = Config::default();
    config.paths.plugins = vec![clone_a.clone(), clone_b];
    let handle = ConfigHandle::new(config);

    let mut set = RepositorySet::from_config(runner(&handle), handle);
    set.refresh_all();
    set.wait_idle().await;

    let targets = set.updatable_plugins();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].display_name(), "node-a");

    let report = BatchOrchestrator::builder()
        .confirm(Arc::new(AutoDeny))
        .notify(Arc::new(SilentNotifier))
        .ask_before_start(false)
        .build()
        .run(targets)
        .await;

    let BatchReport::Completed(entries) = &report else {
        panic!("expected a completed batch, got {report:?}");
    };
    assert_eq!(entries.len(), 1);
    assert!(entries[0].outcome.success, "{}", entries[0].outcome);
    assert_eq!(readme(&clone_a), "# v2");
    assert!(set.updatable_plugins().is_empty());
}

// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository handle.
//!
//! ```text
//! Repository { path, display_name, kind, runner, config }
//!   check_status()        fetch; status -uno -> SyncStatus
//!   fetch_versions()      Latest, tags (newest first), commits
//!   apply(selection)      update / rollback state machine
//!   head_summary()        log -1
//!   install_dependencies  python -m pip install -r <manifest>
//! ```
//!
//! # Update state machine
//!
//! ```text
//! Resolving ──> Executing ──ok──> Success
//!                  │
//!                 fail
//!                  v
//!          conflict::resolve
//!           Fatal | Declined | ResetFailed ──> Failure
//!           Reset ──> Retrying (once) ──> Success | Failure
//! ```
//!
//! Every operation holds the handle's operation lock for its whole duration,
//! so two operations on one checkout never interleave.

use futures_util::future::BoxFuture;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, LazyLock, PoisonError};
use tokio::sync::Mutex;
use tracing::{Instrument, debug, info, warn};

use super::conflict::{self, Confirm, Decision};
use super::runner::{CommandOutput, CommandRunner, Tool};
use super::status::SyncStatus;
use super::versions::{self, RepositoryKind, VersionDescriptor, VersionKind};
use crate::config::ConfigHandle;
use crate::logging::repo_span;

/// Branch used when the remote does not advertise one.
pub const FALLBACK_BRANCH: &str = "master";

static HEAD_BRANCH: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"HEAD (?:branch|分支)\s*[:：]\s*(\S+)").ok());

/// Extracts the advertised default branch from `git remote show` output.
#[must_use]
pub fn parse_default_branch(output: &str) -> Option<String> {
    let regex = HEAD_BRANCH.as_ref()?;
    let branch = regex.captures(output)?.get(1)?.as_str();
    (branch != "(unknown)").then(|| branch.to_string())
}

/// Result of an update, rollback or install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    pub success: bool,
    pub message: String,
}

impl OperationOutcome {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl fmt::Display for OperationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.success { "ok" } else { "failed" };
        write!(f, "{state}: {}", self.message)
    }
}

/// Operations shared by every presentation of a checkout.
pub trait RepositoryOperations: Send + Sync {
    fn display_name(&self) -> &str;

    /// Flag set by the last status check, cleared by a successful update.
    fn update_available(&self) -> bool;

    fn check_status(&self) -> BoxFuture<'_, SyncStatus>;

    fn fetch_versions(&self) -> BoxFuture<'_, Vec<VersionDescriptor>>;

    /// Moves the checkout to `selection`, asking `confirm` before discarding
    /// local changes.
    fn apply<'a>(
        &'a self,
        selection: &'a VersionDescriptor,
        confirm: Arc<dyn Confirm>,
    ) -> BoxFuture<'a, OperationOutcome>;
}

/// Handle bound to one checkout on disk.
pub struct Repository {
    path: PathBuf,
    display_name: String,
    kind: RepositoryKind,
    runner: Arc<dyn CommandRunner>,
    config: ConfigHandle,
    update_available: AtomicBool,
    last_status: std::sync::Mutex<Option<SyncStatus>>,
    op_lock: Mutex<()>,
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.path)
            .field("display_name", &self.display_name)
            .field("kind", &self.kind)
            .field("update_available", &self.update_available())
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Creates a handle named after the last component of `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        kind: RepositoryKind,
        runner: Arc<dyn CommandRunner>,
        config: ConfigHandle,
    ) -> Self {
        let path = path.into();
        let display_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self {
            path,
            display_name,
            kind,
            runner,
            config,
            update_available: AtomicBool::new(false),
            last_status: std::sync::Mutex::new(None),
            op_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn kind(&self) -> RepositoryKind {
        self.kind
    }

    /// True iff `<path>/.git` exists (directory, or file for worktrees).
    #[must_use]
    pub fn is_git_repository(&self) -> bool {
        self.path.join(".git").exists()
    }

    /// True iff the dependency manifest exists in the checkout.
    #[must_use]
    pub fn has_dependency_spec(&self) -> bool {
        self.manifest_path().is_file()
    }

    fn manifest_path(&self) -> PathBuf {
        self.path.join(&self.config.snapshot().dependencies.manifest)
    }

    /// Status recorded by the last completed check.
    #[must_use]
    pub fn last_status(&self) -> Option<SyncStatus> {
        self.last_status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn git(&self, args: &[&str]) -> CommandOutput {
        self.runner.run(Tool::Git, args, &self.path).await
    }

    /// Inspects upstream sync state and records it on the handle.
    pub async fn check_status(&self) -> SyncStatus {
        let _guard = self.op_lock.lock().await;
        let status = self
            .check_status_locked()
            .instrument(repo_span(&self.display_name, "status"))
            .await;
        self.update_available
            .store(status.update_available(), Ordering::SeqCst);
        *self
            .last_status
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(status.clone());
        status
    }

    async fn check_status_locked(&self) -> SyncStatus {
        if !self.is_git_repository() {
            return SyncStatus::NotARepository;
        }

        let fetch = self.git(&["fetch"]).await;
        if !fetch.success() {
            debug!(error = %fetch.error_text(), "fetch failed, using local state");
        }

        let status = self.git(&["status", "-uno"]).await;
        if !status.success() {
            return SyncStatus::Failed(status.error_text().to_string());
        }
        let status = SyncStatus::classify(&status.stdout);
        debug!(status = %status, "classified");
        status
    }

    /// Lists Latest, then tags newest first, then commits newest first.
    ///
    /// A path without `.git` has no versions at all.
    pub async fn fetch_versions(&self) -> Vec<VersionDescriptor> {
        let _guard = self.op_lock.lock().await;
        if !self.is_git_repository() {
            return Vec::new();
        }
        let limits = self.kind.limits(&self.config.snapshot().versions);

        let mut versions = vec![VersionDescriptor::latest()];

        if limits.tags > 0 {
            let tags = self.git(&["tag", "--sort=-creatordate"]).await;
            if tags.success() {
                versions.extend(versions::parse_tags(&tags.stdout, limits.tags));
            }
        }

        if limits.commits > 0 {
            let count = limits.commits.to_string();
            let log = self
                .git(&["log", "--pretty=format:%h - %s", "-n", count.as_str()])
                .await;
            if log.success() {
                versions.extend(versions::parse_commits(&log.stdout));
            }
        }

        versions
    }

    /// One-line description of HEAD: `<short> - <subject> (<date>)`.
    pub async fn head_summary(&self) -> Option<String> {
        if !self.is_git_repository() {
            return None;
        }
        let out = self
            .git(&["log", "-1", "--format=%h - %s (%cd)", "--date=short"])
            .await;
        (out.success() && !out.stdout.is_empty()).then_some(out.stdout)
    }

    async fn default_branch(&self) -> String {
        let out = self.git(&["remote", "show", "origin"]).await;
        parse_default_branch(&out.stdout).unwrap_or_else(|| FALLBACK_BRANCH.to_string())
    }

    /// Applies `selection`; see the module docs for the state machine.
    pub async fn apply(
        &self,
        selection: &VersionDescriptor,
        confirm: Arc<dyn Confirm>,
    ) -> OperationOutcome {
        let _guard = self.op_lock.lock().await;
        let outcome = self
            .apply_locked(selection, &confirm)
            .instrument(repo_span(&self.display_name, "apply"))
            .await;
        if outcome.success {
            info!(repo = %self.display_name, selection = %selection, "{}", outcome.message);
        } else {
            warn!(repo = %self.display_name, selection = %selection, error = %outcome.message, "operation failed");
        }
        outcome
    }

    async fn apply_locked(
        &self,
        selection: &VersionDescriptor,
        confirm: &Arc<dyn Confirm>,
    ) -> OperationOutcome {
        if !self.is_git_repository() {
            return OperationOutcome::failure(format!(
                "not a git repository: {}",
                self.path.display()
            ));
        }

        let governing: Vec<&str> = match selection.kind() {
            VersionKind::Latest => {
                let branch = self.default_branch().await;
                let checkout = self.git(&["checkout", branch.as_str()]).await;
                if !checkout.success() {
                    debug!(branch = %branch, error = %checkout.error_text(), "branch checkout failed, pulling anyway");
                }
                vec!["pull"]
            }
            VersionKind::Tag | VersionKind::Commit => {
                let Some(identifier) = selection.identifier() else {
                    return OperationOutcome::failure(format!(
                        "selection '{selection}' has no identifier"
                    ));
                };
                vec!["checkout", identifier]
            }
        };

        let mut result = self.git(&governing).await;
        if !result.success() {
            match conflict::resolve(
                self.runner.as_ref(),
                confirm,
                &self.display_name,
                &self.path,
                &result,
            )
            .await
            {
                Decision::Fatal | Decision::Declined => {
                    return OperationOutcome::failure(result.error_text());
                }
                Decision::ResetFailed(reset) => {
                    return OperationOutcome::failure(reset.error_text());
                }
                Decision::Reset => {
                    result = self.git(&governing).await;
                }
            }
        }

        if !result.success() {
            return OperationOutcome::failure(result.error_text());
        }

        match selection.kind() {
            VersionKind::Latest => {
                self.update_available.store(false, Ordering::SeqCst);
                OperationOutcome::success("updated to latest")
            }
            VersionKind::Tag | VersionKind::Commit => {
                let target = selection.identifier().unwrap_or_default();
                match self.head_summary().await {
                    Some(head) => OperationOutcome::success(format!(
                        "rolled back to {target}, now at {head}"
                    )),
                    None => OperationOutcome::success(format!("rolled back to {target}")),
                }
            }
        }
    }

    /// Installs the declared dependencies with the configured interpreter.
    pub async fn install_dependencies(&self) -> OperationOutcome {
        let _guard = self.op_lock.lock().await;
        let config = self.config.snapshot();

        if config.tools.python.as_os_str().is_empty() {
            return OperationOutcome::failure("no python interpreter configured");
        }
        let manifest = self.manifest_path();
        if !manifest.is_file() {
            return OperationOutcome::failure(format!(
                "no dependency manifest at {}",
                manifest.display()
            ));
        }
        let manifest = config.dependencies.manifest.to_string_lossy();

        let out = self
            .runner
            .run(
                Tool::Python,
                &["-m", "pip", "install", "-r", &*manifest],
                &self.path,
            )
            .instrument(repo_span(&self.display_name, "install"))
            .await;

        if out.success() {
            info!(repo = %self.display_name, "dependencies installed");
            OperationOutcome::success("dependencies installed")
        } else {
            warn!(repo = %self.display_name, "dependency install failed");
            OperationOutcome::failure(format!("{}\n{}", out.stderr, out.stdout))
        }
    }
}

impl RepositoryOperations for Repository {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn update_available(&self) -> bool {
        self.update_available.load(Ordering::SeqCst)
    }

    fn check_status(&self) -> BoxFuture<'_, SyncStatus> {
        Box::pin(Self::check_status(self))
    }

    fn fetch_versions(&self) -> BoxFuture<'_, Vec<VersionDescriptor>> {
        Box::pin(Self::fetch_versions(self))
    }

    fn apply<'a>(
        &'a self,
        selection: &'a VersionDescriptor,
        confirm: Arc<dyn Confirm>,
    ) -> BoxFuture<'a, OperationOutcome> {
        Box::pin(Self::apply(self, selection, confirm))
    }
}

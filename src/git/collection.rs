// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The set of managed checkouts and its background refresh workers.
//!
//! ```text
//! RepositorySet
//!   repositories: Vec<Arc<Repository>>   project first, then plugins
//!   workers:      JoinSet<()>            one status refresh per handle
//!   token:        CancellationToken      cancelled by rebuild() / drop
//! ```
//!
//! Refresh workers belong to the set, not to individual handles; rebuilding
//! the set cancels whatever is still running before the handles are
//! replaced.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::repository::{Repository, RepositoryOperations};
use super::runner::CommandRunner;
use super::versions::RepositoryKind;
use crate::config::ConfigHandle;
use crate::error::{GitError, StewardResult};

/// Name that always refers to the main checkout.
pub const PROJECT_ALIAS: &str = "project";

/// Owned collection of repository handles.
pub struct RepositorySet {
    runner: Arc<dyn CommandRunner>,
    config: ConfigHandle,
    repositories: Vec<Arc<Repository>>,
    workers: JoinSet<()>,
    token: CancellationToken,
}

impl RepositorySet {
    /// Creates an empty set.
    #[must_use]
    pub fn new(runner: Arc<dyn CommandRunner>, config: ConfigHandle) -> Self {
        Self {
            runner,
            config,
            repositories: Vec::new(),
            workers: JoinSet::new(),
            token: CancellationToken::new(),
        }
    }

    /// Creates a set holding the project and plugins from the configuration.
    #[must_use]
    pub fn from_config(runner: Arc<dyn CommandRunner>, config: ConfigHandle) -> Self {
        let mut set = Self::new(runner, config);
        set.rebuild_from_config();
        set
    }

    /// Replaces the handles with those listed in the current configuration.
    pub fn rebuild_from_config(&mut self) {
        let snapshot = self.config.snapshot();
        let entries = snapshot
            .paths
            .project()
            .map(|p| (p.to_path_buf(), RepositoryKind::Project))
            .into_iter()
            .chain(
                snapshot
                    .paths
                    .plugins
                    .iter()
                    .map(|p| (p.clone(), RepositoryKind::Plugin)),
            );
        self.rebuild(entries);
    }

    /// Cancels running refresh workers and replaces the handles.
    pub fn rebuild(&mut self, entries: impl IntoIterator<Item = (PathBuf, RepositoryKind)>) {
        self.cancel_workers();
        self.repositories = entries
            .into_iter()
            .map(|(path, kind)| {
                Arc::new(Repository::new(
                    path,
                    kind,
                    Arc::clone(&self.runner),
                    self.config.clone(),
                ))
            })
            .collect();
        debug!(count = self.repositories.len(), "repository set rebuilt");
    }

    fn cancel_workers(&mut self) {
        self.token.cancel();
        self.workers.abort_all();
        self.workers = JoinSet::new();
        self.token = CancellationToken::new();
    }

    /// Starts a status check for every handle in the background.
    ///
    /// At most `batch.concurrency` checks run at once.
    pub fn refresh_all(&mut self) {
        let limit = self.config.snapshot().batch.concurrency.max(1);
        let semaphore = Arc::new(Semaphore::new(limit));

        for repository in &self.repositories {
            let repository = Arc::clone(repository);
            let semaphore = Arc::clone(&semaphore);
            let token = self.token.clone();
            self.workers.spawn(async move {
                tokio::select! {
                    () = token.cancelled() => {
                        debug!(repo = %repository.display_name(), "refresh cancelled");
                    }
                    () = async {
                        if let Ok(_permit) = semaphore.acquire().await {
                            repository.check_status().await;
                        }
                    } => {}
                }
            });
        }
    }

    /// Waits until every refresh worker has finished.
    pub async fn wait_idle(&mut self) {
        while self.workers.join_next().await.is_some() {}
    }

    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        !self.workers.is_empty()
    }

    #[must_use]
    pub fn repositories(&self) -> &[Arc<Repository>] {
        &self.repositories
    }

    #[must_use]
    pub fn project(&self) -> Option<&Arc<Repository>> {
        self.repositories
            .iter()
            .find(|r| r.kind() == RepositoryKind::Project)
    }

    pub fn plugins(&self) -> impl Iterator<Item = &Arc<Repository>> {
        self.repositories
            .iter()
            .filter(|r| r.kind() == RepositoryKind::Plugin)
    }

    /// Looks up a handle by display name; `project` names the main checkout.
    ///
    /// # Errors
    ///
    /// Returns `GitError::UnknownRepository` if nothing matches.
    pub fn get(&self, name: &str) -> StewardResult<Arc<Repository>> {
        let found = if name == PROJECT_ALIAS {
            self.project()
        } else {
            self.repositories.iter().find(|r| r.display_name() == name)
        };
        found.cloned().ok_or_else(|| {
            GitError::UnknownRepository {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Plugin handles whose last status check reported an update.
    ///
    /// The project checkout is never part of a batch; it moves only through
    /// an explicit apply.
    #[must_use]
    pub fn updatable_plugins(&self) -> Vec<Arc<dyn RepositoryOperations>> {
        self.plugins()
            .filter(|r| r.update_available())
            .map(|r| Arc::clone(r) as Arc<dyn RepositoryOperations>)
            .collect()
    }
}

impl Drop for RepositorySet {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

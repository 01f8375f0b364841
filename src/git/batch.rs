// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Batch update of many checkouts.
//!
//! ```text
//! BatchOrchestrator::builder()
//!   .concurrency(5) .confirm(..) .notify(..) .silent(false)
//!   .build()
//!   .run(targets)
//!       empty            -> NothingToDo
//!       start declined   -> Cancelled
//!       per target: Semaphore permit -> apply(Latest) -> flume tx
//!       JoinError (panic) -> failing entry for that task id
//!       JoinSet drained  -> Completed(entries)
//! ```
//!
//! Targets are independent: a failed or panicking update yields a failing
//! entry and never stops the others.

use bon::Builder;
use indicatif::ProgressBar;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use super::conflict::{self, Confirm, Prompt, SilentConflicts};
use super::repository::{OperationOutcome, RepositoryOperations};
use super::versions::VersionDescriptor;
use crate::config::types::SilentConflictPolicy;
use crate::notify::{Notify, TracingNotifier};

/// Outcome of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    pub repository: String,
    pub outcome: OperationOutcome,
}

/// Result of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchReport {
    /// No targets were given.
    NothingToDo,
    /// The operator declined to start.
    Cancelled,
    /// Every target ran; one entry per target, in completion order.
    Completed(Vec<BatchEntry>),
}

impl BatchReport {
    #[must_use]
    pub fn entries(&self) -> &[BatchEntry] {
        match self {
            Self::Completed(entries) => entries,
            Self::NothingToDo | Self::Cancelled => &[],
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.entries().iter().filter(|e| e.outcome.success).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.entries().len() - self.succeeded()
    }
}

/// Runs "update to latest" across checkouts with bounded parallelism.
#[derive(Builder)]
pub struct BatchOrchestrator {
    /// Maximum number of updates in flight.
    #[builder(default = 5)]
    concurrency: usize,
    /// Asked before starting and, depending on `silent_conflicts`, about
    /// conflicts.
    confirm: Arc<dyn Confirm>,
    #[builder(default = Arc::new(TracingNotifier) as Arc<dyn Notify>)]
    notify: Arc<dyn Notify>,
    /// Suppress per-target notifications and apply `silent_conflicts`.
    #[builder(default = true)]
    silent: bool,
    /// Conflict handling when `silent` is set.
    #[builder(default)]
    silent_conflicts: SilentConflictPolicy,
    /// Ask `confirm` before starting.
    #[builder(default = true)]
    ask_before_start: bool,
    progress: Option<ProgressBar>,
}

impl BatchOrchestrator {
    fn conflict_confirm(&self) -> Arc<dyn Confirm> {
        if self.silent {
            Arc::new(SilentConflicts::new(
                self.silent_conflicts,
                Arc::clone(&self.confirm),
            ))
        } else {
            Arc::clone(&self.confirm)
        }
    }

    /// Updates every target to latest.
    ///
    /// Callers pass only handles with an update available; this method does
    /// not filter.
    pub async fn run(&self, targets: Vec<Arc<dyn RepositoryOperations>>) -> BatchReport {
        if targets.is_empty() {
            info!("nothing to update");
            return BatchReport::NothingToDo;
        }

        if self.ask_before_start {
            let prompt = Prompt::new(
                "Update all",
                format!("{} repositories have updates. Proceed?", targets.len()),
            );
            if !conflict::ask(&self.confirm, prompt).await {
                info!("batch update declined");
                return BatchReport::Cancelled;
            }
        }

        let total = targets.len();
        info!(targets = total, concurrency = self.concurrency, "starting batch update");
        if let Some(progress) = &self.progress {
            progress.set_length(u64::try_from(total).unwrap_or(u64::MAX));
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrency.max(1)));
        let confirm = self.conflict_confirm();
        let (tx, rx) = flume::unbounded::<BatchEntry>();
        let mut workers = JoinSet::new();

        let mut names = HashMap::with_capacity(total);

        for target in targets {
            let repository = target.display_name().to_string();
            let semaphore = Arc::clone(&semaphore);
            let confirm = Arc::clone(&confirm);
            let tx = tx.clone();
            let name = repository.clone();
            let handle = workers.spawn(async move {
                let outcome = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        debug!(repo = %name, "batch worker started");
                        target.apply(&VersionDescriptor::latest(), confirm).await
                    }
                    Err(_) => OperationOutcome::failure("batch pool closed"),
                };
                let _ = tx.send(BatchEntry {
                    repository: name,
                    outcome,
                });
            });
            names.insert(handle.id(), repository);
        }
        drop(tx);

        let mut entries = Vec::with_capacity(total);
        while let Some(joined) = workers.join_next_with_id().await {
            for entry in rx.try_iter() {
                self.record(&entry);
                entries.push(entry);
            }
            if let Err(e) = joined {
                let repository = names.remove(&e.id()).unwrap_or_default();
                error!(repo = %repository, error = %e, "batch worker died");
                let entry = BatchEntry {
                    repository,
                    outcome: OperationOutcome::failure("update panicked"),
                };
                self.record(&entry);
                entries.push(entry);
            }
        }
        for entry in rx.try_iter() {
            self.record(&entry);
            entries.push(entry);
        }

        if let Some(progress) = &self.progress {
            progress.finish_and_clear();
        }

        let report = BatchReport::Completed(entries);
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch update finished"
        );
        report
    }

    fn record(&self, entry: &BatchEntry) {
        if let Some(progress) = &self.progress {
            progress.set_message(entry.repository.clone());
            progress.inc(1);
        }
        if !self.silent {
            self.notify.notify(&entry.repository, &entry.outcome);
        }
    }
}

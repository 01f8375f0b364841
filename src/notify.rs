// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Confirmation and notification capabilities.
//!
//! ```text
//! Confirm: AutoConfirm | AutoDeny | ConsoleConfirm (dialoguer, serialized)
//!          SuspendingConfirm (hides a progress bar while asking)
//! Notify:  TracingNotifier | SilentNotifier
//! ```

use indicatif::ProgressBar;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

use crate::git::conflict::{Confirm, Prompt};
use crate::git::repository::OperationOutcome;

/// Receives the terminal result of an operation.
pub trait Notify: Send + Sync {
    fn notify(&self, repository: &str, outcome: &OperationOutcome);
}

/// Answers yes to everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Confirm for AutoConfirm {
    fn confirm(&self, prompt: &Prompt) -> bool {
        info!(prompt = %prompt.title, "auto-confirmed");
        true
    }
}

/// Answers no to everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDeny;

impl Confirm for AutoDeny {
    fn confirm(&self, prompt: &Prompt) -> bool {
        info!(prompt = %prompt.title, "auto-declined");
        false
    }
}

/// Asks on the terminal. Concurrent prompts are shown one at a time.
#[derive(Debug, Default)]
pub struct ConsoleConfirm {
    lock: Mutex<()>,
}

impl ConsoleConfirm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Confirm for ConsoleConfirm {
    fn confirm(&self, prompt: &Prompt) -> bool {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(detail) = &prompt.detail {
            eprintln!("\n{detail}\n");
        }
        let question = format!("{}: {}", prompt.title, prompt.message);
        match dialoguer::Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "prompt failed, treating as no");
                false
            }
        }
    }
}

/// Clears `progress` from the terminal for the duration of each prompt.
pub struct SuspendingConfirm {
    inner: Arc<dyn Confirm>,
    progress: ProgressBar,
}

impl SuspendingConfirm {
    #[must_use]
    pub fn new(inner: Arc<dyn Confirm>, progress: ProgressBar) -> Self {
        Self { inner, progress }
    }
}

impl Confirm for SuspendingConfirm {
    fn confirm(&self, prompt: &Prompt) -> bool {
        self.progress.suspend(|| self.inner.confirm(prompt))
    }
}

/// Reports outcomes through the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notify for TracingNotifier {
    fn notify(&self, repository: &str, outcome: &OperationOutcome) {
        if outcome.success {
            info!(repo = %repository, "{}", outcome.message);
        } else {
            warn!(repo = %repository, error = %outcome.message, "failed");
        }
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notify for SilentNotifier {
    fn notify(&self, _repository: &str, _outcome: &OperationOutcome) {}
}

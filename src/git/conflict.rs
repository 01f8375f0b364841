// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Conflict resolution policy.
//!
//! ```text
//! governing command failed
//!   stderr has indicator? --no--> Fatal
//!        | yes
//!   confirm(prompt)       --no--> Declined
//!        | yes
//!   git reset --hard HEAD --fail-> ResetFailed(output)
//!        | ok
//!   Reset  (caller retries once)
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use super::runner::{CommandOutput, CommandRunner, Tool};
use crate::config::types::SilentConflictPolicy;

/// Substrings of git error output caused by uncommitted local changes.
pub const CONFLICT_INDICATORS: [&str; 4] = [
    "overwritten by merge",
    "stash them",
    "local changes",
    "aborted",
];

/// Whether `stderr` reports local modifications blocking the operation.
#[must_use]
pub fn is_conflict(stderr: &str) -> bool {
    CONFLICT_INDICATORS.iter().any(|i| stderr.contains(i))
}

/// Question put to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub message: String,
    /// Captured error output, for conflict prompts.
    pub detail: Option<String>,
}

impl Prompt {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Prompt asking whether to discard local modifications of `repository`.
    #[must_use]
    pub fn discard_changes(repository: &str, error: &str) -> Self {
        Self::new(
            format!("{repository}: local changes"),
            "Local modifications block this operation. Discard them with a hard reset and retry?",
        )
        .with_detail(excerpt(error))
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.title, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n\n{detail}")?;
        }
        Ok(())
    }
}

/// First lines of an error message, enough to show in a prompt.
fn excerpt(error: &str) -> String {
    const MAX_LINES: usize = 12;
    let mut lines = error.lines();
    let mut out: Vec<&str> = lines.by_ref().take(MAX_LINES).collect();
    if lines.next().is_some() {
        out.push("...");
    }
    out.join("\n")
}

/// Answers yes/no questions. Called from a blocking context.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &Prompt) -> bool;
}

/// Applies the unattended conflict policy in front of another capability.
pub struct SilentConflicts {
    policy: SilentConflictPolicy,
    inner: Arc<dyn Confirm>,
}

impl SilentConflicts {
    #[must_use]
    pub fn new(policy: SilentConflictPolicy, inner: Arc<dyn Confirm>) -> Self {
        Self { policy, inner }
    }
}

impl Confirm for SilentConflicts {
    fn confirm(&self, prompt: &Prompt) -> bool {
        match self.policy {
            SilentConflictPolicy::Skip => {
                warn!(prompt = %prompt.title, "skipping conflict in unattended run");
                false
            }
            SilentConflictPolicy::Confirm => {
                info!(prompt = %prompt.title, "discarding local changes in unattended run");
                true
            }
            SilentConflictPolicy::Ask => self.inner.confirm(prompt),
        }
    }
}

/// Asks `confirm` on the blocking pool so a waiting operator never stalls the
/// runtime. A panicking capability counts as "no".
pub async fn ask(confirm: &Arc<dyn Confirm>, prompt: Prompt) -> bool {
    let confirm = Arc::clone(confirm);
    tokio::task::spawn_blocking(move || confirm.confirm(&prompt))
        .await
        .unwrap_or(false)
}

/// What the policy decided about a failed governing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Not a conflict; the failure stands.
    Fatal,
    /// Conflict, but the operator said no.
    Declined,
    /// Conflict, the reset was attempted and failed.
    ResetFailed(CommandOutput),
    /// Local changes were discarded; retry the governing command once.
    Reset,
}

/// Decides how to proceed after `failure` and performs the reset if agreed.
pub async fn resolve(
    runner: &dyn CommandRunner,
    confirm: &Arc<dyn Confirm>,
    repository: &str,
    path: &Path,
    failure: &CommandOutput,
) -> Decision {
    if !is_conflict(&failure.stderr) {
        return Decision::Fatal;
    }

    warn!(repo = %repository, "local changes block the operation");
    if !ask(confirm, Prompt::discard_changes(repository, &failure.stderr)).await {
        info!(repo = %repository, "discarding local changes declined");
        return Decision::Declined;
    }

    let reset = runner
        .run(Tool::Git, &["reset", "--hard", "HEAD"], path)
        .await;
    if reset.success() {
        info!(repo = %repository, "local changes discarded");
        Decision::Reset
    } else {
        warn!(repo = %repository, error = %reset.error_text(), "hard reset failed");
        Decision::ResetFailed(reset)
    }
}

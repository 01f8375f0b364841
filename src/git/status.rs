// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync status classification.
//!
//! `git status -uno` output is matched on substrings, in the languages git
//! commonly speaks in production: a "behind" marker wins over a "detached"
//! marker, anything else is up to date.

use std::fmt;

/// Substrings of `git status` output meaning the branch is behind upstream.
pub const BEHIND_MARKERS: &[&str] = &["behind", "落后", "hinter", "en retard"];

/// Substrings of `git status` output meaning HEAD is detached.
pub const DETACHED_MARKERS: &[&str] = &["detached", "分离", "losgelöst", "détaché"];

/// How prominently a status should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Neutral,
    Info,
    Caution,
    Warning,
    Error,
}

/// Result of a status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// No `.git` at the path; nothing was run.
    NotARepository,
    /// Upstream has commits the checkout lacks.
    UpdateAvailable,
    /// HEAD is on a tag or commit rather than a branch.
    Detached,
    UpToDate,
    /// `git status` itself failed.
    Failed(String),
}

impl SyncStatus {
    /// Classifies the output of `git status -uno`.
    #[must_use]
    pub fn classify(status_output: &str) -> Self {
        if BEHIND_MARKERS.iter().any(|m| status_output.contains(m)) {
            Self::UpdateAvailable
        } else if DETACHED_MARKERS.iter().any(|m| status_output.contains(m)) {
            Self::Detached
        } else {
            Self::UpToDate
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::NotARepository => "not a repository",
            Self::UpdateAvailable => "update available",
            Self::Detached => "on historical version",
            Self::UpToDate => "up to date",
            Self::Failed(_) => "status failed",
        }
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::NotARepository => Severity::Neutral,
            Self::UpdateAvailable => Severity::Warning,
            Self::Detached => Severity::Caution,
            Self::UpToDate => Severity::Info,
            Self::Failed(_) => Severity::Error,
        }
    }

    #[must_use]
    pub const fn update_available(&self) -> bool {
        matches!(self, Self::UpdateAvailable)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(message) => write!(f, "{}: {message}", self.label()),
            _ => f.write_str(self.label()),
        }
    }
}

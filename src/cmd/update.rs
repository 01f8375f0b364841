// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The `update-all` command.
//!
//! ```text
//! RepositorySet::refresh_all -> wait_idle -> updatable_plugins()
//!   -> BatchOrchestrator (ConsoleConfirm behind the progress bar) -> summary
//! ```

use std::sync::{Arc, OnceLock};

use anyhow::anyhow;
use indicatif::{ProgressBar, ProgressStyle};

use super::repo::repository_set;
use crate::cli::UpdateAllArgs;
use crate::config::ConfigHandle;
use crate::error::Result;
use crate::git::batch::{BatchOrchestrator, BatchReport};
use crate::git::conflict::Confirm;
use crate::notify::{ConsoleConfirm, SuspendingConfirm};

/// Pre-validated progress bar style for batch updates.
fn bar_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-")
        })
        .clone()
}

/// Summary printed after a batch run.
#[must_use]
pub fn format_report(report: &BatchReport) -> Vec<String> {
    match report {
        BatchReport::NothingToDo => vec!["Everything is up to date".to_string()],
        BatchReport::Cancelled => vec!["Update cancelled".to_string()],
        BatchReport::Completed(entries) => {
            let mut lines = vec![format!(
                "{} updated, {} failed",
                report.succeeded(),
                report.failed()
            )];
            lines.extend(
                entries
                    .iter()
                    .filter(|e| !e.outcome.success)
                    .map(|e| format!("  {}: {}", e.repository, e.outcome.message)),
            );
            lines
        }
    }
}

/// Refreshes every checkout and updates the plugins that are behind.
///
/// # Errors
///
/// Returns an error if any update failed.
pub async fn run_update_all_command(config: &ConfigHandle, args: &UpdateAllArgs) -> Result<()> {
    let snapshot = config.snapshot();
    let mut set = repository_set(config);

    set.refresh_all();
    set.wait_idle().await;
    let targets = set.updatable_plugins();

    let progress = ProgressBar::new(0);
    progress.set_style(bar_style());

    let confirm: Arc<dyn Confirm> = Arc::new(SuspendingConfirm::new(
        Arc::new(ConsoleConfirm::new()),
        progress.clone(),
    ));
    let orchestrator = BatchOrchestrator::builder()
        .concurrency(snapshot.batch.concurrency)
        .confirm(confirm)
        .silent(!args.interactive)
        .silent_conflicts(
            args.silent_conflicts
                .unwrap_or(snapshot.batch.silent_conflicts),
        )
        .ask_before_start(!args.yes)
        .progress(progress)
        .build();

    let report = orchestrator.run(targets).await;
    for line in format_report(&report) {
        println!("{line}");
    }

    if report.failed() > 0 {
        Err(anyhow!("{} repositories failed to update", report.failed()))
    } else {
        Ok(())
    }
}

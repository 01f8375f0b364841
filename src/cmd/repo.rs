// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Single-repository commands: status, versions, apply, install.

use std::sync::Arc;

use anyhow::anyhow;

use crate::config::ConfigHandle;
use crate::error::{GitError, Result, StewardError};
use crate::git::collection::RepositorySet;
use crate::git::conflict::Confirm;
use crate::git::repository::RepositoryOperations;
use crate::git::runner::{CommandRunner, ShellRunner};
use crate::git::status::{Severity, SyncStatus};
use crate::git::versions::VersionDescriptor;
use crate::notify::ConsoleConfirm;

pub(crate) fn repository_set(config: &ConfigHandle) -> RepositorySet {
    let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner::new(config.clone()));
    RepositorySet::from_config(runner, config.clone())
}

const fn severity_marker(severity: Severity) -> char {
    match severity {
        Severity::Neutral => ' ',
        Severity::Info => '=',
        Severity::Caution => '~',
        Severity::Warning => '!',
        Severity::Error => 'x',
    }
}

/// One row of the `status` table.
#[must_use]
pub fn format_status_line(
    name: &str,
    width: usize,
    status: &SyncStatus,
    head: Option<&str>,
) -> String {
    let marker = severity_marker(status.severity());
    let line = format!("{marker} {name:<width$}  {:<22}", status.label());
    let line = match (status, head) {
        (SyncStatus::Failed(message), _) => format!("{line}{message}"),
        (_, Some(head)) => format!("{line}{head}"),
        (_, None) => line,
    };
    line.trim_end().to_string()
}

/// Checks every configured checkout and prints a status table.
///
/// # Errors
///
/// Returns an error if no repositories are configured.
pub async fn run_status_command(config: &ConfigHandle) -> Result<()> {
    let mut set = repository_set(config);
    if set.repositories().is_empty() {
        return Err(anyhow!(
            "no repositories configured, set paths.project or paths.plugins"
        ));
    }

    set.refresh_all();
    set.wait_idle().await;

    let width = set
        .repositories()
        .iter()
        .map(|r| r.display_name().len())
        .max()
        .unwrap_or(0);

    for repository in set.repositories() {
        let status = repository
            .last_status()
            .unwrap_or(SyncStatus::NotARepository);
        let head = repository.head_summary().await;
        println!(
            "{}",
            format_status_line(repository.display_name(), width, &status, head.as_deref())
        );
    }

    if set.project().is_some_and(|p| p.update_available()) {
        println!("\nThe project can be updated, run `steward apply project latest`");
    }
    let behind = set.updatable_plugins().len();
    if behind > 0 {
        println!("\n{behind} plugins can be updated, run `steward update-all`");
    }
    Ok(())
}

/// Lists the versions `repo` can be moved to, newest first.
///
/// # Errors
///
/// Returns an error if `repo` is unknown or not a git checkout.
pub async fn run_versions_command(config: &ConfigHandle, repo: &str) -> Result<()> {
    let set = repository_set(config);
    let repository = set.get(repo)?;
    if !repository.is_git_repository() {
        return Err(StewardError::from(GitError::NotARepository {
            path: repository.path().display().to_string(),
        })
        .into());
    }

    if let Some(head) = repository.head_summary().await {
        println!("current: {head}\n");
    }
    for version in repository.fetch_versions().await {
        println!("{}", version.label());
    }
    Ok(())
}

/// Moves `repo` to `selection`, asking on the terminal about conflicts.
///
/// # Errors
///
/// Returns an error if `repo` is unknown, `selection` is malformed, or the
/// operation fails.
pub async fn run_apply_command(config: &ConfigHandle, repo: &str, selection: &str) -> Result<()> {
    let set = repository_set(config);
    let repository = set.get(repo)?;
    let selection = VersionDescriptor::from_selection(selection)?;

    let confirm: Arc<dyn Confirm> = Arc::new(ConsoleConfirm::new());
    let outcome = repository.apply(&selection, confirm).await;
    if outcome.success {
        println!("{}: {}", repository.display_name(), outcome.message);
        Ok(())
    } else {
        Err(StewardError::from(GitError::CommandFailed {
            command: format!("apply {selection} in {}", repository.display_name()),
            message: outcome.message,
        })
        .into())
    }
}

/// Installs the declared dependencies of `repo`.
///
/// # Errors
///
/// Returns an error if `repo` is unknown or the install fails.
pub async fn run_install_command(config: &ConfigHandle, repo: &str) -> Result<()> {
    let set = repository_set(config);
    let repository = set.get(repo)?;

    let outcome = repository.install_dependencies().await;
    if outcome.success {
        println!("{}: {}", repository.display_name(), outcome.message);
        Ok(())
    } else {
        Err(anyhow!("{}: {}", repository.display_name(), outcome.message))
    }
}

// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::repo::format_status_line;
use super::update::format_report;
use crate::git::batch::{BatchEntry, BatchReport};
use crate::git::repository::OperationOutcome;
use crate::git::status::SyncStatus;

#[test]
fn test_status_lines() {
    let lines = [
        format_status_line(
            "project",
            7,
            &SyncStatus::UpToDate,
            Some("abc1234 - Fix (2026-01-02)"),
        ),
        format_status_line("node-a", 7, &SyncStatus::UpdateAvailable, None),
        format_status_line("node-b", 7, &SyncStatus::Detached, Some("def5678 - Old")),
        format_status_line(
            "node-c",
            7,
            &SyncStatus::Failed("fatal: bad object".to_string()),
            None,
        ),
        format_status_line("notes", 7, &SyncStatus::NotARepository, None),
    ];
    insta::assert_snapshot!(lines.join("\n"), @r"
    = project  up to date            abc1234 - Fix (2026-01-02)
    ! node-a   update available
    ~ node-b   on historical version def5678 - Old
    x node-c   status failed         fatal: bad object
      notes    not a repository
    ");
}

#[test]
fn test_report_summary() {
    let report = BatchReport::Completed(vec![
        BatchEntry {
            repository: "node-a".to_string(),
            outcome: OperationOutcome::success("updated to latest"),
        },
        BatchEntry {
            repository: "node-b".to_string(),
            outcome: OperationOutcome::failure("error: Your local changes would be overwritten"),
        },
    ]);
    insta::assert_snapshot!(format_report(&report).join("\n"), @r"
    1 updated, 1 failed
      node-b: error: Your local changes would be overwritten
    ");
}

#[test]
fn test_report_without_targets() {
    assert_eq!(
        format_report(&BatchReport::NothingToDo),
        vec!["Everything is up to date"]
    );
    assert_eq!(
        format_report(&BatchReport::Cancelled),
        vec!["Update cancelled"]
    );
}

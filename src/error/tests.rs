// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, GitError, ProcessError, StewardError, StewardResult};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "paths".to_string(),
        key: "project".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'project' in section '[paths]'"
    );
}

#[test]
fn test_timeout_display() {
    let err: StewardError = ProcessError::Timeout {
        command: "git pull".to_string(),
        timeout_secs: 60,
    }
    .into();
    insta::assert_snapshot!(
        err.to_string(),
        @"process error: process 'git pull' timed out after 60 seconds"
    );
}

#[test]
fn test_git_error_boxes_into_steward_error() {
    let err: StewardError = GitError::UnknownRepository {
        name: "missing-node".to_string(),
    }
    .into();
    assert!(matches!(err, StewardError::Git(_)));
    assert!(err.to_string().contains("missing-node"));
}

#[test]
fn test_steward_error_size() {
    let size = std::mem::size_of::<StewardError>();
    assert!(size <= 24, "StewardError is {size} bytes, expected <= 24");
}

#[test]
fn test_steward_result_size() {
    let size = std::mem::size_of::<StewardResult<()>>();
    assert!(size <= 24, "StewardResult<()> is {size} bytes, expected <= 24");
}

// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing and config layering.

use clap::Parser;
use repo_steward::cli::{Cli, Command};
use repo_steward::config::loader::ConfigLoader;
use repo_steward::config::types::SilentConflictPolicy;
use std::fs;

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["steward", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_unknown_command_rejected() {
    assert!(Cli::try_parse_from(["steward", "build"]).is_err());
}

// =============================================================================
// Overrides feed the config loader
// =============================================================================

#[test]
fn cli_overrides_win_over_files() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("steward.toml");
    fs::write(
        &file,
        "[batch]\nconcurrency = 4\nsilent_conflicts = \"ask\"\n\n[global]\noutput_log_level = 2\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "steward",
        "-l",
        "4",
        "--set",
        "batch.concurrency=2",
        "status",
    ])
    .unwrap();

    let mut loader = ConfigLoader::new().add_toml_file(&file);
    for assignment in cli.global.to_config_overrides() {
        loader = loader.set_assignment(&assignment).unwrap();
    }
    let config = loader.build().unwrap();

    assert_eq!(config.batch.concurrency, 2);
    assert_eq!(config.batch.silent_conflicts, SilentConflictPolicy::Ask);
    assert_eq!(config.global.output_log_level.as_u8(), 4);
    assert_eq!(config.global.file_log_level.as_u8(), 4);
}

#[test]
fn cli_invalid_set_rejected_by_loader() {
    let cli = Cli::try_parse_from(["steward", "--set", "no-equals-sign", "status"]).unwrap();
    let result = cli
        .global
        .to_config_overrides()
        .iter()
        .try_fold(ConfigLoader::new(), |loader, a| loader.set_assignment(a));
    assert!(result.is_err());
}

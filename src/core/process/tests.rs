// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::time::Duration;

use super::builder::ProcessBuilder;
use super::io::decode_line;
use crate::core::env::EnvOverlay;
use crate::error::ProcessError;

#[cfg(not(windows))]
fn sh(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("/bin/sh").args(["-c", script])
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_process_echo() {
    let output = ProcessBuilder::new("echo")
        .args(["hello"])
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    insta::assert_snapshot!(output.stdout(), @"hello");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_non_zero_exit_is_not_an_error() {
    let output = sh("echo oops >&2; exit 42")
        .capture_output()
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert!(!output.success());
    assert_eq!(output.stderr(), "oops");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_overlay_is_layered_over_inherited_env() {
    let mut env = EnvOverlay::non_interactive();
    env.set("STEWARD_TEST_VAR", "test_value");

    let output = sh("echo \"$STEWARD_TEST_VAR:$GIT_TERMINAL_PROMPT:${PATH:+has-path}\"")
        .env(env)
        .capture_output()
        .run()
        .await
        .expect("process should succeed");

    insta::assert_snapshot!(output.stdout(), @"test_value:0:has-path");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_cwd_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

    let output = ProcessBuilder::new("ls")
        .cwd(dir.path())
        .capture_output()
        .run()
        .await
        .unwrap();
    assert!(output.stdout().contains("marker.txt"));
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_timeout_kills_process() {
    let started = std::time::Instant::now();
    let err = sh("sleep 30")
        .timeout(Duration::from_millis(200))
        .capture_output()
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, ProcessError::Timeout { .. }), "{err}");
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_missing_executable() {
    let err = ProcessBuilder::new("definitely-not-a-real-binary-8c1f")
        .run()
        .await
        .unwrap_err();
    assert!(
        matches!(err, ProcessError::ExecutableNotFound { .. }),
        "{err}"
    );
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("git")
        .args(["log", "--pretty=format:%h - %s", "-n"]);
    insta::assert_snapshot!(builder.command_line(), @r#"git log "--pretty=format:%h - %s" -n"#);
}

#[test]
fn test_which_not_found() {
    let result = ProcessBuilder::which("definitely-not-a-real-binary-8c1f");
    assert!(matches!(
        result,
        Err(ProcessError::ExecutableNotFound { .. })
    ));
}

#[cfg(not(windows))]
#[test]
fn test_which_resolves_absolute_path() {
    let builder = ProcessBuilder::which("/bin/sh").unwrap();
    assert!(builder.program().is_absolute());
}

#[test]
fn test_decode_line_strips_terminator() {
    assert_eq!(decode_line(b"plain\r\n", encoding_rs::GBK), "plain");
    assert_eq!(decode_line("已是最新\n".as_bytes(), encoding_rs::GBK), "已是最新");
}

#[test]
fn test_decode_line_falls_back_on_invalid_utf8() {
    // "修复" in GBK
    let raw = [0xD0, 0xDE, 0xB8, 0xB4, b'\n'];
    assert_eq!(decode_line(&raw, encoding_rs::GBK), "修复");
    assert_eq!(decode_line(&[b'a', 0xE9], encoding_rs::WINDOWS_1252), "aé");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_non_utf8_line_keeps_following_output() {
    let output = sh("printf 'first\\n\\320\\336\\270\\264\\nthird\\n'")
        .capture_output()
        .run()
        .await
        .expect("printf should succeed");

    insta::assert_snapshot!(output.stdout(), @r"
    first
    修复
    third
    ");
}

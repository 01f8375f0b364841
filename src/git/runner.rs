// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command runner boundary.
//!
//! ```text
//! CommandRunner::run(tool, args, cwd)
//!        |
//!        v
//! ShellRunner
//!   snapshot config (at call time)
//!   program  = which(tools.git | tools.python)
//!   timeout  = timeouts.git | timeouts.install
//!   env      = non-interactive flags + proxy
//!   decoding = UTF-8, else tools.output_encoding
//!        |
//!        v
//! CommandOutput { exit_code, stdout, stderr }   (trimmed)
//!   spawn error / timeout -> exit_code = -1, stderr = error text
//! ```
//!
//! The runner never returns an error and never retries.

use futures_util::future::BoxFuture;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::ConfigHandle;
use crate::core::env::EnvOverlay;
use crate::core::process::builder::{ProcessBuilder, ProcessOutput};

/// External program a command is issued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// The version-control executable.
    Git,
    /// The interpreter that owns the package manager.
    Python,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Git => write!(f, "git"),
            Self::Python => write!(f, "python"),
        }
    }
}

/// Result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Exit code reported when the command could not be run to completion.
    pub const SENTINEL_EXIT: i32 = -1;

    /// Builds an output with trailing whitespace stripped from both streams.
    #[must_use]
    pub fn new(exit_code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            exit_code,
            stdout: stdout.trim_end().to_string(),
            stderr: stderr.trim_end().to_string(),
        }
    }

    /// Output standing in for a command that failed to spawn or timed out.
    #[must_use]
    pub fn sentinel(error: impl fmt::Display) -> Self {
        Self::new(Self::SENTINEL_EXIT, "", &error.to_string())
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// The text a failure is reported with: stderr, or stdout when stderr
    /// is empty.
    #[must_use]
    pub fn error_text(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

impl From<ProcessOutput> for CommandOutput {
    fn from(output: ProcessOutput) -> Self {
        Self::new(output.exit_code(), output.stdout(), output.stderr())
    }
}

/// Executes external commands on behalf of repository handles.
pub trait CommandRunner: Send + Sync {
    /// Runs `tool args...` in `cwd`.
    ///
    /// Implementations fold every failure into the returned output.
    fn run<'a>(&'a self, tool: Tool, args: &'a [&'a str], cwd: &'a Path)
    -> BoxFuture<'a, CommandOutput>;
}

/// Runs commands as child processes, configured from a [`ConfigHandle`].
#[derive(Debug, Clone)]
pub struct ShellRunner {
    config: ConfigHandle,
}

impl ShellRunner {
    #[must_use]
    pub const fn new(config: ConfigHandle) -> Self {
        Self { config }
    }
}

impl CommandRunner for ShellRunner {
    fn run<'a>(
        &'a self,
        tool: Tool,
        args: &'a [&'a str],
        cwd: &'a Path,
    ) -> BoxFuture<'a, CommandOutput> {
        Box::pin(async move {
            let config = self.config.snapshot();
            let (program, timeout) = match tool {
                Tool::Git => (config.tools.git.as_path(), config.timeouts.git()),
                Tool::Python => (config.tools.python.as_path(), config.timeouts.install()),
            };
            let forward = config.global.output_log_level.forwards_process_output()
                || config.global.file_log_level.forwards_process_output();

            let builder = match program.to_str() {
                Some(name) => ProcessBuilder::which(name),
                None => Ok(ProcessBuilder::new(program)),
            };
            let builder = match builder {
                Ok(builder) => builder,
                Err(e) => {
                    warn!(tool = %tool, error = %e, "command could not start");
                    return CommandOutput::sentinel(e);
                }
            };

            let result = builder
                .args(args)
                .cwd(cwd)
                .env(EnvOverlay::for_network(&config.network))
                .timeout(timeout)
                .name(tool.to_string())
                .capture_output()
                .forward_output(forward)
                .fallback_encoding(config.tools.encoding().unwrap_or(encoding_rs::GBK))
                .run()
                .await;

            match result {
                Ok(output) => {
                    debug!(tool = %tool, exit_code = output.exit_code(), "command finished");
                    output.into()
                }
                Err(e) => {
                    warn!(tool = %tool, cwd = %cwd.display(), error = %e, "command could not complete");
                    CommandOutput::sentinel(e)
                }
            }
        })
    }
}

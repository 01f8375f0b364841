// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!          StewardError (~24 bytes)
//!                  |
//!   +-------+------+------+-------+
//!   |       |      |      |       |
//!   v       v      v      v       v
//!  Git   Process Config   Io    Other
//!  Box     Box    Box    Box   Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Git     CommandFailed, NotARepository, UnknownRepository, InvalidSelection
//!   Process ExecutableNotFound, SpawnFailed, Timeout, OutputError
//!   Config  ParseError, MissingKey, InvalidValue
//! ```
//!
//! Repository operations never surface these to callers directly: the command
//! runner folds them into a failing `CommandOutput`, and repository handles
//! report `OperationOutcome` values. Typed errors live at the process, config
//! and CLI layers.

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`StewardError`].
pub type StewardResult<T> = std::result::Result<T, StewardError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum StewardError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for StewardError {
                fn from(err: $error) -> Self {
                    StewardError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ProcessError => Process,
    ConfigError => Config,
    std::io::Error => Io,
}

// --- Git Errors ---

/// Git-level errors raised outside the outcome-producing repository paths.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command exited unsuccessfully.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Path carries no `.git` marker.
    #[error("not a git repository: {path}")]
    NotARepository { path: String },

    /// No configured repository matches the requested name.
    #[error("unknown repository '{name}'")]
    UnknownRepository { name: String },

    /// A version selection string could not be understood.
    #[error("invalid version selection '{selection}': {message}")]
    InvalidSelection { selection: String, message: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Failed to wait on or read from the process.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration source.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

#[cfg(test)]
mod tests;

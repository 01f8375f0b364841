// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration section types.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, ToolsConfig, NetworkConfig, PathsConfig,
//!         VersionsConfig, TimeoutsConfig, BatchConfig, DependenciesConfig
//! ```
//!
//! # Silent Conflict Policy
//!
//! ```text
//! SilentConflictPolicy: Skip (default) | Confirm | Ask
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. Empty disables file logging.
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
        }
    }
}

/// External executables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Git executable, bare name resolved through PATH.
    pub git: PathBuf,
    /// Python interpreter used for `-m pip install`.
    pub python: PathBuf,
    /// Encoding label for tool output that is not valid UTF-8, e.g. when
    /// `i18n.logOutputEncoding` is set to a legacy code page.
    pub output_encoding: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
            python: PathBuf::from("python"),
            output_encoding: "gbk".to_string(),
        }
    }
}

impl ToolsConfig {
    /// Resolves `output_encoding`, `None` for an unknown label.
    #[must_use]
    pub fn encoding(&self) -> Option<&'static encoding_rs::Encoding> {
        encoding_rs::Encoding::for_label(self.output_encoding.trim().as_bytes())
    }
}

/// Network settings shared by git and pip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Proxy URL exported as `http_proxy`/`https_proxy`. Empty means none.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub https_proxy: String,
}

impl NetworkConfig {
    /// Returns the configured proxy, if any.
    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        let proxy = self.https_proxy.trim();
        (!proxy.is_empty()).then_some(proxy)
    }
}

/// How many tags and commits each listing context offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionsConfig {
    /// Tag cap for the main project.
    pub project_tags: usize,
    /// Commit cap for the main project.
    pub project_commits: usize,
    /// Tag cap for plugin checkouts.
    pub plugin_tags: usize,
    /// Commit cap for plugin checkouts.
    pub plugin_commits: usize,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            project_tags: 8,
            project_commits: 15,
            plugin_tags: 5,
            plugin_commits: 10,
        }
    }
}

/// Per-command timeouts, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeoutsConfig {
    /// Timeout for every git invocation.
    pub git_secs: u64,
    /// Timeout for dependency installation.
    pub install_secs: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            git_secs: 60,
            install_secs: 300,
        }
    }
}

impl TimeoutsConfig {
    #[must_use]
    pub const fn git(&self) -> Duration {
        Duration::from_secs(self.git_secs)
    }

    #[must_use]
    pub const fn install(&self) -> Duration {
        Duration::from_secs(self.install_secs)
    }
}

/// What a silent batch run does when an update hits local modifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SilentConflictPolicy {
    /// Leave the checkout alone and report the conflict as a failure.
    #[default]
    Skip,
    /// Discard local modifications without asking.
    Confirm,
    /// Ask the operator, as an interactive update would.
    Ask,
}

impl std::fmt::Display for SilentConflictPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Confirm => write!(f, "confirm"),
            Self::Ask => write!(f, "ask"),
        }
    }
}

impl std::str::FromStr for SilentConflictPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "confirm" => Ok(Self::Confirm),
            "ask" => Ok(Self::Ask),
            _ => Err(ConfigError::InvalidValue {
                section: "batch".to_string(),
                key: "silent_conflicts".to_string(),
                message: format!("expected 'skip', 'confirm', or 'ask', got '{s}'"),
            }),
        }
    }
}

/// Batch update settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Maximum number of repositories updated at once.
    pub concurrency: usize,
    /// Conflict handling for unattended runs.
    pub silent_conflicts: SilentConflictPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            silent_conflicts: SilentConflictPolicy::default(),
        }
    }
}

/// Dependency manifest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DependenciesConfig {
    /// Manifest file name, relative to each repository root.
    pub manifest: PathBuf,
}

impl Default for DependenciesConfig {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("requirements.txt"),
        }
    }
}

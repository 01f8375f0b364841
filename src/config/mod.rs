// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for repo-steward.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. local steward.toml (cwd)
//! 3. --ini FILE (repeatable)
//! 4. STEWARD_* env vars
//! 5. --set section.key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! STEWARD_NETWORK__HTTPS_PROXY=http://127.0.0.1:7890 → network.https_proxy
//! STEWARD_TOOLS__GIT=/usr/bin/git                    → tools.git
//! STEWARD_PATHS__PLUGINS=a,b                         → paths.plugins = ["a", "b"]
//! ```
//!
//! # Runtime Reloads
//!
//! Commands never hold on to a `Config`; they take a [`ConfigHandle`] snapshot
//! at the moment a process is spawned. [`ConfigHandle::apply`] is the single
//! reload point: commands issued afterwards see the new values, commands
//! already running keep the old ones.

pub mod handle;
pub mod loader;
pub mod paths;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{ConfigError, Result};

pub use handle::ConfigHandle;
use loader::ConfigLoader;
use paths::PathsConfig;
use types::{
    BatchConfig, DependenciesConfig, GlobalConfig, NetworkConfig, TimeoutsConfig, ToolsConfig,
    VersionsConfig,
};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// External executables.
    pub tools: ToolsConfig,
    /// Proxy settings.
    pub network: NetworkConfig,
    /// Repository locations.
    pub paths: PathsConfig,
    /// Version listing caps.
    pub versions: VersionsConfig,
    /// Command timeouts.
    pub timeouts: TimeoutsConfig,
    /// Batch update settings.
    pub batch: BatchConfig,
    /// Dependency manifest settings.
    pub dependencies: DependenciesConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use repo_steward::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("steward.toml")
    ///     .with_env_prefix("STEWARD")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve paths and reject values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` for a zero concurrency limit, a
    /// zero timeout or an unknown output encoding, and path resolution errors
    /// from [`PathsConfig::resolve`].
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        if self.batch.concurrency == 0 {
            return Err(invalid("batch", "concurrency", "must be at least 1").into());
        }
        if self.timeouts.git_secs == 0 {
            return Err(invalid("timeouts", "git_secs", "must be at least 1").into());
        }
        if self.timeouts.install_secs == 0 {
            return Err(invalid("timeouts", "install_secs", "must be at least 1").into());
        }
        if self.tools.encoding().is_none() {
            return Err(invalid(
                "tools",
                "output_encoding",
                &format!("unknown encoding '{}'", self.tools.output_encoding),
            )
            .into());
        }
        self.paths.resolve()
    }

    /// Format configuration options for display.
    ///
    /// Proxy URLs carrying credentials are shown with the user info replaced
    /// by `[hidden]`. Output is ordered by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_tool_options(&mut options);
        self.format_path_options(&mut options);
        self.format_engine_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
    }

    fn format_tool_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("tools.git".into(), self.tools.git.display().to_string());
        options.insert(
            "tools.python".into(),
            self.tools.python.display().to_string(),
        );
        options.insert(
            "tools.output_encoding".into(),
            self.tools.output_encoding.clone(),
        );
        options.insert(
            "network.https_proxy".into(),
            self.network.proxy().map_or_else(String::new, redact_proxy),
        );
    }

    fn format_path_options(&self, options: &mut BTreeMap<String, String>) {
        let fmt = |p: Option<&Path>| p.map_or_else(String::new, |p| p.display().to_string());

        options.insert("paths.project".into(), fmt(self.paths.project()));
        options.insert(
            "paths.plugins_root".into(),
            fmt(self.paths.plugins_root.as_deref()),
        );
        options.insert(
            "paths.plugins".into(),
            self.paths
                .plugins
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        );
    }

    fn format_engine_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "versions.project_tags".into(),
            self.versions.project_tags.to_string(),
        );
        options.insert(
            "versions.project_commits".into(),
            self.versions.project_commits.to_string(),
        );
        options.insert(
            "versions.plugin_tags".into(),
            self.versions.plugin_tags.to_string(),
        );
        options.insert(
            "versions.plugin_commits".into(),
            self.versions.plugin_commits.to_string(),
        );
        options.insert(
            "timeouts.git_secs".into(),
            self.timeouts.git_secs.to_string(),
        );
        options.insert(
            "timeouts.install_secs".into(),
            self.timeouts.install_secs.to_string(),
        );
        options.insert(
            "batch.concurrency".into(),
            self.batch.concurrency.to_string(),
        );
        options.insert(
            "batch.silent_conflicts".into(),
            self.batch.silent_conflicts.to_string(),
        );
        options.insert(
            "dependencies.manifest".into(),
            self.dependencies.manifest.display().to_string(),
        );
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}

/// Replaces `user:pass@` in a proxy URL with `[hidden]@`.
fn redact_proxy(proxy: &str) -> String {
    let (scheme, rest) = proxy
        .split_once("://")
        .map_or(("", proxy), |(scheme, rest)| (scheme, rest));
    match rest.rsplit_once('@') {
        Some((_, host)) if scheme.is_empty() => format!("[hidden]@{host}"),
        Some((_, host)) => format!("{scheme}://[hidden]@{host}"),
        None => proxy.to_string(),
    }
}

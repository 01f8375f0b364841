// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! project/            main checkout
//!   custom_nodes/     typical plugins_root
//!     node-a/         plugin (listed in `plugins`)
//!     node-b/
//! ```
//!
//! Plugin checkouts are listed explicitly; relative entries resolve against
//! `plugins_root`, or `project` when no root is configured.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Repository locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Main project checkout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<PathBuf>,
    /// Base directory for relative plugin entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins_root: Option<PathBuf>,
    /// Plugin checkouts.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PathBuf>,
}

impl PathsConfig {
    /// Resolves every configured location to an absolute path.
    ///
    /// `project` and `plugins_root` are taken relative to the current
    /// directory; relative plugin entries relative to `plugins_root`, or
    /// `project` when no root is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if a relative plugin entry is given but
    /// neither `plugins_root` nor `project` is configured, and
    /// `ConfigError::InvalidValue` if the current directory is unavailable.
    pub fn resolve(&mut self) -> Result<()> {
        if let Some(project) = &mut self.project {
            *project = absolute("project", project)?;
        }
        if let Some(root) = &mut self.plugins_root {
            *root = absolute("plugins_root", root)?;
        }

        let base = self.plugins_root.clone().or_else(|| self.project.clone());
        for plugin in &mut self.plugins {
            if plugin.is_absolute() {
                continue;
            }
            let Some(base) = &base else {
                return Err(ConfigError::MissingKey {
                    section: "paths".to_string(),
                    key: "plugins_root".to_string(),
                }
                .into());
            };
            *plugin = absolute("plugins", &base.join(&*plugin))?;
        }
        Ok(())
    }

    /// Returns the project path when configured.
    #[must_use]
    pub fn project(&self) -> Option<&Path> {
        self.project.as_deref()
    }
}

/// Makes `path` absolute and drops `.` components.
fn absolute(key: &str, path: &Path) -> Result<PathBuf> {
    let path = std::path::absolute(path).map_err(|e| ConfigError::InvalidValue {
        section: "paths".to_string(),
        key: key.to_string(),
        message: format!("cannot resolve '{}': {e}", path.display()),
    })?;
    Ok(path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect())
}

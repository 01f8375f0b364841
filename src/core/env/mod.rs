// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment overrides for child processes.
//!
//! # Architecture
//!
//! ```text
//! inherited process env
//!        +
//! EnvOverlay (BTreeMap<String, String>, applied last)
//!   non_interactive(): GIT_TERMINAL_PROMPT=0, GCM_INTERACTIVE=never
//!   with_proxy(url):   http_proxy, https_proxy, HTTP_PROXY, HTTPS_PROXY
//! ```
//!
//! The overlay never clears the inherited environment; credentials helpers,
//! `HOME` and `PATH` stay visible to git and pip.


use std::collections::BTreeMap;

use crate::config::types::NetworkConfig;

/// Disables the terminal credential prompt.
pub const GIT_TERMINAL_PROMPT: &str = "GIT_TERMINAL_PROMPT";
/// Disables Git Credential Manager dialogs.
pub const GCM_INTERACTIVE: &str = "GCM_INTERACTIVE";

const PROXY_KEYS: [&str; 4] = ["http_proxy", "https_proxy", "HTTP_PROXY", "HTTPS_PROXY"];

/// Variables set on top of the inherited environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    vars: BTreeMap<String, String>,
}

impl EnvOverlay {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Overlay that makes git fail instead of waiting for input.
    #[must_use]
    pub fn non_interactive() -> Self {
        let mut overlay = Self::new();
        overlay
            .set(GIT_TERMINAL_PROMPT, "0")
            .set(GCM_INTERACTIVE, "never");
        overlay
    }

    /// Overlay for a command issued under the given network settings.
    #[must_use]
    pub fn for_network(network: &NetworkConfig) -> Self {
        Self::non_interactive().with_proxy(network.proxy())
    }

    /// Exports `proxy` under both spellings of the proxy variables.
    ///
    /// `None` leaves the overlay untouched, so an inherited proxy still
    /// applies.
    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<&str>) -> Self {
        if let Some(proxy) = proxy {
            for key in PROXY_KEYS {
                self.set(key, proxy);
            }
        }
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

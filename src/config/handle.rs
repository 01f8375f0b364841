// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared, swappable configuration.
//!
//! ```text
//! ConfigHandle ── Arc<RwLock<Arc<Config>>>
//!   snapshot()  read lock, clone inner Arc (cheap)
//!   apply(cfg)  write lock, swap inner Arc
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use super::Config;

/// Cloneable handle to the live configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Arc<Config>>>,
}

impl ConfigHandle {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// Returns the configuration as of now.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Config> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the configuration for every command issued after this call.
    pub fn apply(&self, config: Config) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(config);
        tracing::debug!("configuration applied");
    }
}

impl From<Config> for ConfigHandle {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}

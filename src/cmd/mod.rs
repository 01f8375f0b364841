// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   config (options, inis), repo (status, versions, apply, install), update
//! ```

pub mod config;
pub mod repo;
pub mod update;

#[cfg(test)]
mod tests;

// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |         status / apply / update-all
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  TOML + env + --set, live |
//!              '-------------+-------------'
//!                            |
//!                            v
//!                  git (RepositorySet,
//!              Repository, BatchOrchestrator)
//!                     |            |
//!                     v            v
//!               runner (git,    notify (Confirm,
//!                 python)         Notify)
//!
//!   +-----------------------------------------+
//!   |  core   process, env overlay            |
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod notify;

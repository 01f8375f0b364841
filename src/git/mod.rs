// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version-control orchestration.
//!
//! ```text
//!   collection (RepositorySet)        batch (BatchOrchestrator)
//!              \                         /
//!               v                       v
//!          ,----------------------------------,
//!          | repository (RepositoryOperations)|
//!          '--+-----------+-------------+-----'
//!             |           |             |
//!             v           v             v
//!          status     versions      conflict
//!             \           |             /
//!              v          v            v
//!             ,------------------------,
//!             |  runner (CommandRunner) |
//!             '------------------------'
//!                         |
//!                 core::process (git, python)
//! ```
//!
//! Every public operation returns data (`SyncStatus`, `OperationOutcome`,
//! `BatchReport`); failures of external commands never surface as errors.

pub mod batch;
pub mod collection;
pub mod conflict;
pub mod repository;
pub mod runner;
pub mod status;
pub mod versions;

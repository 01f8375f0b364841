// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for repo-steward using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! steward [global options] <command>
//! status
//! versions <repo>
//! apply <repo> <selection>
//! update-all [--yes] [--interactive] [--silent-conflicts skip|confirm|ask]
//! install <repo>
//! options | inis | version
//! ```

pub mod global;


use crate::cli::global::GlobalOptions;
use crate::config::types::SilentConflictPolicy;
use clap::{Args, Parser, Subcommand};

/// Git checkout manager.
///
/// Keeps a project checkout and its plugin checkouts in sync with their
/// remotes.
#[derive(Debug, Parser)]
#[command(
    name = "steward",
    author,
    version,
    about = "Git checkout manager",
    long_about = "repo-steward Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Keeps a project checkout and its plugin checkouts in sync with\n\
                  their remotes. `steward status` shows what is behind, and\n\
                  `steward update-all` brings every outdated checkout up to date.\n\
                  Repositories are addressed by directory name; `project` always\n\
                  names the main checkout.",
    after_help = "CONFIG FILES:\n\n\
                  steward reads `steward.toml` from the current directory if it\n\
                  exists. Additional files can be given with --ini and are layered\n\
                  on top in order. Environment variables prefixed with STEWARD_\n\
                  (sections separated by `__`, e.g. STEWARD_BATCH__CONCURRENCY=3)\n\
                  come next, and --set KEY=VALUE wins over everything."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used by steward.
    Inis,

    /// Checks every checkout and prints its sync status.
    Status,

    /// Lists the versions a checkout can be moved to.
    Versions(RepoArgs),

    /// Moves a checkout to latest, a tag, or a commit.
    Apply(ApplyArgs),

    /// Updates every checkout that is behind its remote.
    #[command(name = "update-all")]
    UpdateAll(UpdateAllArgs),

    /// Installs the declared dependencies of a checkout.
    Install(RepoArgs),
}

/// A single repository argument.
#[derive(Debug, Clone, Args)]
pub struct RepoArgs {
    /// Repository name (`project` or a plugin directory name).
    #[arg(value_name = "REPO")]
    pub repo: String,
}

/// Arguments for the `apply` command.
#[derive(Debug, Clone, Args)]
pub struct ApplyArgs {
    /// Repository name (`project` or a plugin directory name).
    #[arg(value_name = "REPO")]
    pub repo: String,

    /// `latest`, `tag:<name>`, `commit:<hash>`, or a label as printed by
    /// `versions`.
    #[arg(value_name = "SELECTION")]
    pub selection: String,
}

/// Arguments for the `update-all` command.
#[derive(Debug, Clone, Default, Args)]
pub struct UpdateAllArgs {
    /// Starts without asking for confirmation.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Reports each repository as it finishes and asks about local
    /// modifications instead of following the silent policy.
    #[arg(long)]
    pub interactive: bool,

    /// What a silent run does on local modifications, overrides
    /// `batch.silent_conflicts`.
    #[arg(long = "silent-conflicts", value_name = "POLICY", conflicts_with = "interactive")]
    pub silent_conflicts: Option<SilentConflictPolicy>,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

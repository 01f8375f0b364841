// repo-steward: Git checkout manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version descriptors.
//!
//! ```text
//! Latest
//! Tag: v1.2.0
//! Commit: 1a2b3c4 - Fix loader
//!         ^^^^^^^ second whitespace token = identifier
//! ```
//!
//! Labels are both what is shown and what is parsed back, so the identifier
//! must stay the second token of every label.

use std::fmt;
use std::str::FromStr;

use crate::config::types::VersionsConfig;
use crate::error::{GitError, StewardError};

const LATEST_LABEL: &str = "Latest";
const TAG_PREFIX: &str = "Tag:";
const COMMIT_PREFIX: &str = "Commit:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionKind {
    Latest,
    Tag,
    Commit,
}

/// A selectable version of a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDescriptor {
    kind: VersionKind,
    identifier: Option<String>,
    label: String,
}

impl VersionDescriptor {
    #[must_use]
    pub fn latest() -> Self {
        Self {
            kind: VersionKind::Latest,
            identifier: None,
            label: LATEST_LABEL.to_string(),
        }
    }

    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self {
            kind: VersionKind::Tag,
            identifier: Some(name.to_string()),
            label: format!("{TAG_PREFIX} {name}"),
        }
    }

    #[must_use]
    pub fn commit(hash: &str, subject: &str) -> Self {
        Self {
            kind: VersionKind::Commit,
            identifier: Some(hash.to_string()),
            label: format!("{COMMIT_PREFIX} {hash} - {subject}"),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> VersionKind {
        self.kind
    }

    /// Tag name or short hash; `None` for [`VersionKind::Latest`].
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Parses a label produced by this type.
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidSelection` for an empty label, an unknown
    /// prefix, or a tag/commit label without an identifier.
    pub fn from_label(label: &str) -> Result<Self, StewardError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(invalid(label, "empty selection"));
        }
        if label == LATEST_LABEL {
            return Ok(Self::latest());
        }

        let kind = if label.starts_with(TAG_PREFIX) {
            VersionKind::Tag
        } else if label.starts_with(COMMIT_PREFIX) {
            VersionKind::Commit
        } else {
            return Err(invalid(label, "expected 'Latest', 'Tag: ...' or 'Commit: ...'"));
        };

        let Some(identifier) = label.split_whitespace().nth(1) else {
            return Err(invalid(label, "missing identifier"));
        };

        Ok(Self {
            kind,
            identifier: Some(identifier.to_string()),
            label: label.to_string(),
        })
    }

    /// Parses a command-line selection: `latest`, `tag:<name>`,
    /// `commit:<hash>`, or a full label.
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidSelection` when the selection matches none
    /// of the accepted forms.
    pub fn from_selection(selection: &str) -> Result<Self, StewardError> {
        let selection = selection.trim();
        if selection.eq_ignore_ascii_case("latest") {
            return Ok(Self::latest());
        }
        if let Some((prefix, rest)) = selection.split_once(':') {
            let rest = rest.trim();
            let short = match prefix.to_ascii_lowercase().as_str() {
                "tag" if !rest.is_empty() && !rest.contains(char::is_whitespace) => {
                    Some(Self::tag(rest))
                }
                "commit" if !rest.is_empty() && !rest.contains(char::is_whitespace) => {
                    Some(Self {
                        kind: VersionKind::Commit,
                        identifier: Some(rest.to_string()),
                        label: format!("{COMMIT_PREFIX} {rest}"),
                    })
                }
                _ => None,
            };
            if let Some(descriptor) = short {
                return Ok(descriptor);
            }
        }
        Self::from_label(selection)
    }
}

impl fmt::Display for VersionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl FromStr for VersionDescriptor {
    type Err = StewardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_selection(s)
    }
}

fn invalid(selection: &str, message: &str) -> StewardError {
    GitError::InvalidSelection {
        selection: selection.to_string(),
        message: message.to_string(),
    }
    .into()
}

/// Which listing context a repository belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    /// The main checkout.
    Project,
    /// A plugin checkout.
    Plugin,
}

impl RepositoryKind {
    /// Tag and commit caps for this context.
    #[must_use]
    pub const fn limits(self, versions: &VersionsConfig) -> VersionLimits {
        match self {
            Self::Project => VersionLimits {
                tags: versions.project_tags,
                commits: versions.project_commits,
            },
            Self::Plugin => VersionLimits {
                tags: versions.plugin_tags,
                commits: versions.plugin_commits,
            },
        }
    }
}

/// How many tags and commits an enumeration returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionLimits {
    pub tags: usize,
    pub commits: usize,
}

/// Parses `git tag --sort=-creatordate` output, newest first.
pub fn parse_tags(output: &str, limit: usize) -> impl Iterator<Item = VersionDescriptor> + '_ {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(limit)
        .map(VersionDescriptor::tag)
}

/// Parses `git log --pretty=format:"%h - %s"` output.
pub fn parse_commits(output: &str) -> impl Iterator<Item = VersionDescriptor> + '_ {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (hash, rest) = line.split_once(' ').unwrap_or((line, ""));
            let rest = rest.trim_start();
            let subject = rest.strip_prefix('-').unwrap_or(rest).trim();
            VersionDescriptor::commit(hash, subject)
        })
}

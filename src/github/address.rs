//! Origin addressing.
//!
//! # Responsibilities
//! - Resolve route parameters into a fully-defaulted address
//! - Build the raw-content URL for an address
//!
//! # Design Decisions
//! - Defaults apply only when the matched pattern had no such capture; a
//!   captured-but-empty segment is kept verbatim
//! - The URL is a pure string template; nothing is validated or escaped
//!   locally; the origin rejects what it cannot interpret

use std::collections::HashMap;
use std::fmt;

use crate::config::GitHubConfig;

/// Fully resolved identity of an origin resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub owner: String,
    pub repo: String,
    pub git_ref: String,
    pub file_path: String,
}

impl Address {
    /// Resolve route parameters against configured defaults.
    ///
    /// An explicit `ref` query parameter overrides the default branch
    /// entirely; it may name a branch, tag, or commit. An empty `ref` counts
    /// as absent.
    pub fn resolve(params: &HashMap<String, String>, defaults: &GitHubConfig) -> Self {
        Self {
            owner: params
                .get("owner")
                .cloned()
                .unwrap_or_else(|| defaults.default_owner.clone()),
            repo: params
                .get("repo")
                .cloned()
                .unwrap_or_else(|| defaults.default_repo.clone()),
            git_ref: params
                .get("ref")
                .filter(|r| !r.is_empty())
                .cloned()
                .unwrap_or_else(|| defaults.default_branch.clone()),
            file_path: params.get("path").cloned().unwrap_or_default(),
        }
    }

    /// Raw-content URL for this address.
    pub fn raw_url(&self, base: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.git_ref,
            self.file_path
        )
    }
}

impl fmt::Display for Address {
    /// `owner/repo/ref/path`, as reported in error details.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.owner, self.repo, self.git_ref, self.file_path
        )
    }
}

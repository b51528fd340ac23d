//! Ref classification and cache policy derivation.
//!
//! # Responsibilities
//! - Classify a repository reference as commit / tag / branch
//! - Derive the Cache-Control policy matching the ref's mutability
//!
//! # Design Decisions
//! - Classification is purely lexical, never an origin lookup
//! - Commit check runs before the tag check (a hex-only ref is a commit even
//!   when it would also parse as a version)
//! - No regex; byte-level checks keep classification allocation-free

/// The kind of snapshot a ref points at, ordered by mutability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    /// Full or abbreviated commit SHA. Immutable.
    Commit,
    /// Semver-shaped tag (`v1.2.3`, `1.2.3-beta`). Rarely moves.
    Tag,
    /// Anything else, including the default branch. Moves freely.
    Branch,
}

/// Classify `git_ref` by its lexical shape.
pub fn classify(git_ref: &str) -> RefKind {
    if git_ref.is_empty() {
        return RefKind::Branch;
    }
    if is_commit_sha(git_ref) {
        return RefKind::Commit;
    }
    if is_semver_tag(git_ref) {
        return RefKind::Tag;
    }
    RefKind::Branch
}

/// Cache-Control value for responses addressed by `git_ref`.
///
/// Commits never change, so they cache for a year and are marked immutable.
/// Tags can be deleted and recreated, so they get a week with a day of
/// stale-while-revalidate. Branches move constantly and get five minutes.
pub fn cache_control_for(git_ref: &str) -> &'static str {
    match classify(git_ref) {
        RefKind::Commit => "public, max-age=31536000, s-maxage=31536000, immutable",
        RefKind::Tag => "public, max-age=604800, s-maxage=604800, stale-while-revalidate=86400",
        RefKind::Branch => "public, max-age=300, s-maxage=300, stale-while-revalidate=3600",
    }
}

/// Abbreviated or full commit SHA: 7 to 40 hex digits, either case.
fn is_commit_sha(s: &str) -> bool {
    (7..=40).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Semver-shaped prefix: optional `v`, then `MAJOR.MINOR.PATCH` where the
/// patch component only needs to start with a digit (`1.2.3-beta` counts).
fn is_semver_tag(s: &str) -> bool {
    let s = s.strip_prefix('v').unwrap_or(s);
    let mut parts = s.splitn(3, '.');
    let major = parts.next().unwrap_or("");
    let minor = parts.next().unwrap_or("");
    let patch = parts.next().unwrap_or("");

    !major.is_empty()
        && major.bytes().all(|b| b.is_ascii_digit())
        && !minor.is_empty()
        && minor.bytes().all(|b| b.is_ascii_digit())
        && patch.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

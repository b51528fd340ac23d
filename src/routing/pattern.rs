//! Path template compilation and matching.
//!
//! # Responsibilities
//! - Compile template strings (`/files/o/:owner/r/:repo/:path*`) into
//!   segment matchers
//! - Match request paths, extracting named captures
//!
//! # Design Decisions
//! - Three segment shapes: literal, named capture, greedy trailing wildcard
//! - No regex; segment-by-segment comparison keeps matching O(n)
//! - A wildcard captures zero or more segments, joined verbatim with `/`,
//!   no percent-decoding, no normalization

use std::collections::HashMap;

/// A single compiled path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Fixed segment, compared verbatim.
    Literal(String),
    /// `:name` captures exactly one segment, which may be empty.
    Param(String),
    /// `:name*` captures the remaining path, possibly empty.
    Wildcard(String),
}

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a template string.
    ///
    /// Templates are static declarations, so a malformed one (a wildcard
    /// anywhere but last) is a programming error and panics at startup.
    pub fn compile(template: &str) -> Self {
        let segments: Vec<Segment> = template
            .split('/')
            .filter(|part| !part.is_empty())
            .map(|part| {
                if let Some(name) = part.strip_prefix(':') {
                    if let Some(name) = name.strip_suffix('*') {
                        Segment::Wildcard(name.to_string())
                    } else {
                        Segment::Param(name.to_string())
                    }
                } else {
                    Segment::Literal(part.to_string())
                }
            })
            .collect();

        if let Some(pos) = segments.iter().position(|s| matches!(s, Segment::Wildcard(_))) {
            assert_eq!(
                pos,
                segments.len() - 1,
                "wildcard segment must be last in template {template:?}"
            );
        }

        Self { segments }
    }

    /// Match `path` against this pattern, returning named captures on success.
    pub fn match_path(&self, path: &str) -> Option<HashMap<String, String>> {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let parts: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        let mut captures = HashMap::new();
        let mut idx = 0;

        for segment in &self.segments {
            match segment {
                Segment::Literal(expected) => {
                    if parts.get(idx) != Some(&expected.as_str()) {
                        return None;
                    }
                    idx += 1;
                }
                Segment::Param(name) => {
                    let value = parts.get(idx)?;
                    captures.insert(name.clone(), (*value).to_string());
                    idx += 1;
                }
                Segment::Wildcard(name) => {
                    captures.insert(name.clone(), parts[idx..].join("/"));
                    idx = parts.len();
                }
            }
        }

        if idx == parts.len() {
            Some(captures)
        } else {
            None
        }
    }
}

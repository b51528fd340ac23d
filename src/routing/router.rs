//! Route table lookup and dispatch.
//!
//! # Responsibilities
//! - Hold the ordered route declarations
//! - Find the first pattern matching a request path
//! - Merge path captures with query parameters
//!
//! # Design Decisions
//! - Routes evaluated in declaration order; first structural match wins
//! - A route may bind several equivalent patterns to one handler
//! - Path captures always win over query entries of the same name; query
//!   entries are merged only for keys not already captured
//! - Structural matching is decoupled from handling: an origin 404 is not a
//!   routing failure, and no backtracking happens across routes

use std::collections::HashMap;

use crate::routing::pattern::PathPattern;

/// Handlers a route can bind to. Dispatch happens in the HTTP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// The raw-file proxy pipeline.
    Files,
    /// Inline SVG favicon.
    Favicon,
    /// Permanent redirect from /favicon.ico to /favicon.svg.
    FaviconRedirect,
}

/// One route: a handler bound to one or more equivalent path patterns.
#[derive(Debug, Clone)]
struct Route {
    patterns: Vec<PathPattern>,
    handler: HandlerKind,
}

/// Ordered route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// The proxy's route declarations, in evaluation order.
    pub fn standard() -> Self {
        Self {
            routes: vec![
                Route {
                    patterns: vec![PathPattern::compile("/favicon.ico")],
                    handler: HandlerKind::FaviconRedirect,
                },
                Route {
                    patterns: vec![PathPattern::compile("/favicon.svg")],
                    handler: HandlerKind::Favicon,
                },
                Route {
                    patterns: vec![
                        // owner + repo
                        PathPattern::compile("/files/o/:owner/r/:repo/:path*"),
                        // repo only
                        PathPattern::compile("/files/r/:repo/:path*"),
                        // defaults for both
                        PathPattern::compile("/files/:path*"),
                    ],
                    handler: HandlerKind::Files,
                },
            ],
        }
    }

    /// Match `path` against the table, merging `query` pairs under the path
    /// captures. Returns the bound handler and merged parameters, or None;
    /// the caller decides the fallback.
    pub fn match_path(
        &self,
        path: &str,
        query: Option<&str>,
    ) -> Option<(HandlerKind, HashMap<String, String>)> {
        for route in &self.routes {
            for pattern in &route.patterns {
                if let Some(mut params) = pattern.match_path(path) {
                    for (key, value) in parse_query(query.unwrap_or("")) {
                        params.entry(key).or_insert(value);
                    }
                    return Some((route.handler, params));
                }
            }
        }
        None
    }
}

/// Decode query pairs; repeated keys keep the first occurrence.
fn parse_query(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    url::form_urlencoded::parse(query.as_bytes()).map(|(k, v)| (k.into_owned(), v.into_owned()))
}

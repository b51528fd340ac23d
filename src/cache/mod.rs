//! Transparent HTTP response cache.
//!
//! # Responsibilities
//! - Store assembled success responses keyed by request URL (path + query)
//! - Honor each response's own Cache-Control max-age as its TTL
//! - Serve hits unchanged, with no revalidation of its own
//!
//! # Design Decisions
//! - dashmap keeps lookups lock-free across concurrent requests
//! - No single-flight: concurrent misses may fetch the origin redundantly
//! - Expiry is lazy, on lookup; errors are never stored

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use bytes::Bytes;
use dashmap::DashMap;

/// A fully assembled response held until its TTL lapses.
#[derive(Debug, Clone)]
struct CachedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    expires_at: Instant,
}

/// In-process response cache with per-entry TTL.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: DashMap<String, CachedResponse>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Look up a fresh entry under `key`, rebuilding it as a response.
    /// An expired entry is evicted and reported as a miss.
    pub fn lookup(&self, key: &str) -> Option<Response> {
        let entry = self.entries.get(key)?;
        if entry.expires_at <= Instant::now() {
            drop(entry);
            self.entries.remove(key);
            return None;
        }

        let mut response = Response::new(Body::from(entry.body.clone()));
        *response.status_mut() = entry.status;
        *response.headers_mut() = entry.headers.clone();
        Some(response)
    }

    /// Store a response under `key`, with its TTL read from its own
    /// Cache-Control max-age. Responses without a positive max-age are not
    /// stored.
    pub fn store(&self, key: String, status: StatusCode, headers: HeaderMap, body: Bytes) {
        let Some(ttl) = ttl_from_headers(&headers) else {
            return;
        };
        self.entries.insert(
            key,
            CachedResponse {
                status,
                headers,
                body,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse `max-age` out of a Cache-Control header value.
fn ttl_from_headers(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(header::CACHE_CONTROL)?.to_str().ok()?;
    for directive in value.split(',') {
        if let Some(secs) = directive.trim().strip_prefix("max-age=") {
            return secs
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs);
        }
    }
    None
}

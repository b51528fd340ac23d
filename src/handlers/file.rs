//! Raw-file request pipeline.
//!
//! # Data Flow
//! ```text
//! cache lookup
//!     → address resolution (defaults, ref override)
//!     → origin fetch (single attempt)
//!     → content-type determination (origin first, extension fallback)
//!     → conditional compression
//!     → header assembly (CORS, charset, cache policy, origin metadata)
//!     → deferred cache store
//! ```
//!
//! # Design Decisions
//! - The cache key covers the query string, since `ref` changes the output
//! - Error responses are never cached
//! - The cache store is spawned off the response path and runs to
//!   completion on the runtime regardless of the caller

use std::collections::HashMap;

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

use crate::compress;
use crate::github::{refs, Address, FetchedAsset};
use crate::http::error::ProxyError;
use crate::http::headers::{apply_cors, content_type_value};
use crate::http::mime;
use crate::http::server::AppState;

/// Handle a matched file request end to end.
///
/// Every failure renders as a structured error; the dispatch layer maps
/// anything that escapes to InternalError.
pub async fn handle_file_request(
    state: &AppState,
    params: &HashMap<String, String>,
    cache_key: String,
    accept_encoding: Option<&str>,
) -> Result<Response, ProxyError> {
    if let Some(hit) = state.cache.lookup(&cache_key) {
        tracing::debug!(key = %cache_key, "Cache hit");
        return Ok(hit);
    }

    let address = Address::resolve(params, &state.config.github);
    let FetchedAsset {
        body,
        content_type,
        etag,
        last_modified,
        content_length,
    } = state.origin.fetch(&address).await?;

    // Prefer the origin's declared type; fall back to the extension.
    let content_type =
        content_type.unwrap_or_else(|| mime::from_extension(&address.file_path).to_string());
    let is_text = mime::is_text(&content_type);

    let (body, encoding) = compress::try_compress(body, accept_encoding, is_text);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&content_type_value(&content_type, is_text))
            .unwrap_or_else(|_| HeaderValue::from_static(mime::OCTET_STREAM)),
    );
    headers.insert(header::CONTENT_DISPOSITION, HeaderValue::from_static("inline"));
    apply_cors(&mut headers);

    if let Some(encoding) = encoding {
        headers.insert(
            header::CONTENT_ENCODING,
            HeaderValue::from_static(encoding.as_str()),
        );
    } else if let Some(length) = content_length {
        // a re-encoded body must not carry the origin's length
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    }

    if let Some(etag) = etag {
        if let Ok(value) = HeaderValue::from_str(&etag) {
            headers.insert(header::ETAG, value);
        }
    }
    if let Some(last_modified) = last_modified {
        if let Ok(value) = HeaderValue::from_str(&last_modified) {
            headers.insert(header::LAST_MODIFIED, value);
        }
    }

    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(refs::cache_control_for(&address.git_ref)),
    );

    // Populate the cache off the response path.
    let cache = state.cache.clone();
    let stored_headers = headers.clone();
    let stored_body = body.clone();
    tokio::spawn(async move {
        cache.store(cache_key, StatusCode::OK, stored_headers, stored_body);
    });

    let mut response = Response::new(Body::from(body));
    *response.headers_mut() = headers;
    Ok(response)
}

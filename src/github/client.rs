//! Origin fetch against the raw-content host.
//!
//! # Responsibilities
//! - Issue a single fetch per request, never retried
//! - Normalize success into a [`FetchedAsset`]
//! - Classify failures into the error taxonomy
//!
//! # Design Decisions
//! - No timeout override; the transport's default behavior applies
//! - The declared Content-Type is stripped of `;`-delimited parameters here,
//!   so downstream code sees a bare media type

use axum::http::header;
use bytes::Bytes;

use crate::github::address::Address;
use crate::http::error::{classify_origin, ErrorKind, ProxyError};

/// Normalized result of an origin fetch, independent of how the body will be
/// encoded on the way out.
#[derive(Debug, Clone)]
pub struct FetchedAsset {
    pub body: Bytes,
    /// Origin-declared media type, parameters stripped. None when the origin
    /// sent no Content-Type.
    pub content_type: Option<String>,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
    pub content_length: Option<u64>,
}

/// Client for the raw-content origin.
#[derive(Debug, Clone)]
pub struct OriginClient {
    http: reqwest::Client,
    base_url: String,
}

impl OriginClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the file `address` points at.
    ///
    /// Non-success origin statuses map into the error taxonomy with the
    /// resolved address as details; transport failures surface as
    /// GitHubApiError.
    pub async fn fetch(&self, address: &Address) -> Result<FetchedAsset, ProxyError> {
        let url = address.raw_url(&self.base_url);
        tracing::debug!(url = %url, "Fetching from origin");

        let response = self.http.get(&url).send().await.map_err(|error| {
            tracing::error!(url = %url, error = %error, "Origin fetch failed");
            ProxyError::with_details(ErrorKind::GitHubApiError, error.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let kind = classify_origin(status, response.headers());
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                code = kind.code(),
                "Origin returned error"
            );
            return Err(ProxyError::with_details(kind, address.to_string()));
        }

        let content_type = header_str(&response, header::CONTENT_TYPE).map(|value| {
            value
                .split_once(';')
                .map(|(media_type, _)| media_type)
                .unwrap_or(value)
                .trim()
                .to_string()
        });
        let etag = header_str(&response, header::ETAG).map(str::to_owned);
        let last_modified = header_str(&response, header::LAST_MODIFIED).map(str::to_owned);
        let content_length = response.content_length();

        let body = response.bytes().await?;

        Ok(FetchedAsset {
            body,
            content_type,
            etag,
            last_modified,
            content_length,
        })
    }
}

fn header_str<'a>(response: &'a reqwest::Response, name: header::HeaderName) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

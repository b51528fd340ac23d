//! Structured error taxonomy.
//!
//! # Responsibilities
//! - Map upstream failures to a closed set of error kinds
//! - Render every error as a stable JSON body with a machine-readable code
//!
//! # Design Decisions
//! - Each kind carries a fixed HTTP status and code string; callers only
//!   attach free-text details
//! - Origin failures are classified from status plus rate-limit headers
//! - Anything unexpected collapses into InternalError at the dispatch
//!   boundary, so the proxy never emits an unshaped response

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::http::headers;

/// Closed set of error conditions the proxy reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The origin has no file at the resolved address.
    FileNotFound,
    /// The origin failed or was unreachable.
    GitHubApiError,
    /// The origin refused the request because its rate limit is exhausted.
    RateLimit,
    /// The origin refused the request for another reason.
    Forbidden,
    /// The client sent an unusable request.
    BadRequest,
    /// A failure inside the proxy itself.
    InternalError,
}

impl ErrorKind {
    /// HTTP status this kind renders with.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::FileNotFound => StatusCode::NOT_FOUND,
            ErrorKind::GitHubApiError => StatusCode::BAD_GATEWAY,
            ErrorKind::RateLimit => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::FileNotFound => "FILE_NOT_FOUND",
            ErrorKind::GitHubApiError => "GITHUB_API_ERROR",
            ErrorKind::RateLimit => "RATE_LIMIT_EXCEEDED",
            ErrorKind::Forbidden => "ACCESS_FORBIDDEN",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Human-readable message.
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::FileNotFound => "File not found in repository",
            ErrorKind::GitHubApiError => "GitHub API error",
            ErrorKind::RateLimit => "GitHub API rate limit exceeded",
            ErrorKind::Forbidden => "Access forbidden",
            ErrorKind::BadRequest => "Invalid request parameters",
            ErrorKind::InternalError => "Internal server error",
        }
    }
}

/// Error flowing through the request pipeline, rendered as structured JSON.
#[derive(Debug, Error)]
#[error("{} ({})", .kind.message(), .kind.code())]
pub struct ProxyError {
    kind: ErrorKind,
    details: Option<String>,
}

impl ProxyError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, details: None }
    }

    pub fn with_details(kind: ErrorKind, details: impl Into<String>) -> Self {
        Self {
            kind,
            details: Some(details.into()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(error: reqwest::Error) -> Self {
        ProxyError::with_details(ErrorKind::GitHubApiError, error.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let mut payload = json!({
            "error": self.kind.message(),
            "errorCode": self.kind.code(),
        });
        if let Some(details) = &self.details {
            payload["details"] = json!(details);
        }
        let body = serde_json::to_vec_pretty(&payload).unwrap_or_default();

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = self.kind.status();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        headers::apply_cors(response.headers_mut());
        response
    }
}

/// Classify a non-success origin response into an error kind.
///
/// A 403 is a rate-limit rejection only when the remaining quota reads
/// exactly "0"; any other or absent value is a plain Forbidden.
pub fn classify_origin(status: StatusCode, headers: &HeaderMap) -> ErrorKind {
    match status.as_u16() {
        404 => ErrorKind::FileNotFound,
        403 => {
            let remaining = headers
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok());
            if remaining == Some("0") {
                ErrorKind::RateLimit
            } else {
                ErrorKind::Forbidden
            }
        }
        400 => ErrorKind::BadRequest,
        500 | 502 | 503 => ErrorKind::GitHubApiError,
        _ => ErrorKind::GitHubApiError,
    }
}

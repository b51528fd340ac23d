//! Shared response header helpers.

use axum::http::{header, HeaderMap, HeaderValue};

/// Apply the proxy's CORS policy. Every file, error, and preflight response
/// carries these.
pub fn apply_cors(headers: &mut HeaderMap) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));
}

/// Full Content-Type value, appending a utf-8 charset for text-like types.
pub fn content_type_value(mime: &str, is_text: bool) -> String {
    if is_text {
        format!("{mime}; charset=utf-8")
    } else {
        mime.to_string()
    }
}

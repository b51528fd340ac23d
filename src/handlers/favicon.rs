//! Favicon handlers.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

const FAVICON_SVG: &str = include_str!("../../public/favicon.svg");

/// Inline SVG favicon, cached for a day.
pub fn handle_favicon() -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        FAVICON_SVG,
    )
        .into_response()
}

/// Legacy `/favicon.ico` requests redirect permanently to the SVG.
pub fn handle_favicon_redirect() -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, "/favicon.svg")],
    )
        .into_response()
}

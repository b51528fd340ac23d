//! Documentation page, served for `/` and any unmatched path.

use axum::http::{header, HeaderValue};
use axum::response::{Html, IntoResponse, Response};

use crate::config::GitHubConfig;

const INDEX_TEMPLATE: &str = include_str!("../../public/index.html");

/// Render the documentation page with the configured defaults substituted
/// for the `{{DEFAULT_*}}` placeholders.
pub fn handle_index(defaults: &GitHubConfig) -> Response {
    let page = INDEX_TEMPLATE
        .replace("{{DEFAULT_OWNER}}", &defaults.default_owner)
        .replace("{{DEFAULT_REPO}}", &defaults.default_repo)
        .replace("{{DEFAULT_BRANCH}}", &defaults.default_branch);

    let mut response = Html(page).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=3600"),
    );
    response
}

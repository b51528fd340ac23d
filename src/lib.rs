//! GitHub raw-content reverse proxy library.
//!
//! Re-serves files from a GitHub repository's raw-content store under a
//! stable, CORS-enabled, cache-friendly URL space, with content-type
//! normalization, conditional compression, and a structured error taxonomy.

pub mod cache;
pub mod compress;
pub mod config;
pub mod github;
pub mod handlers;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::ProxyConfig;
pub use http::HttpServer;

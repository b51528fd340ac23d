//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → environment overrides (DEFAULT_OWNER, DEFAULT_REPO, ...)
//!     → ProxyConfig (immutable)
//!     → shared via Arc with the dispatch pipeline
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults so the proxy runs with zero configuration
//! - Env values are taken as-is; presence is the only validation

pub mod loader;
pub mod schema;

pub use schema::GitHubConfig;
pub use schema::ListenerConfig;
pub use schema::ProxyConfig;

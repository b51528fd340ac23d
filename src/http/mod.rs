//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → routing layer picks a handler
//!     → error.rs shapes every failure as structured JSON
//!     → headers.rs / mime.rs shape the success response
//!     → Send to client
//! ```

pub mod error;
pub mod headers;
pub mod mime;
pub mod server;

pub use server::{AppState, HttpServer};

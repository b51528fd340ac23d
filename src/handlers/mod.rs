//! Request handlers bound by the route table.
//!
//! # Data Flow
//! ```text
//! dispatch (http/server.rs)
//!     → file.rs      (raw-file proxy pipeline)
//!     → index.rs     (documentation page, the no-match fallback)
//!     → favicon.rs   (SVG asset + legacy .ico redirect)
//! ```

pub mod favicon;
pub mod file;
pub mod index;

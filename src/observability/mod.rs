//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! request lifecycle
//!     → logging.rs (tracing subscriber, structured fields)
//!     → metrics.rs (Prometheus counters and histograms)
//! ```

pub mod logging;
pub mod metrics;

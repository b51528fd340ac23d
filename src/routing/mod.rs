//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, query)
//!     → router.rs (ordered route table)
//!     → pattern.rs (segment-by-segment template match)
//!     → Return: (handler kind, merged params) or no-match
//!
//! Route Compilation (at startup):
//!     template strings
//!     → Compile segment matchers (literal / capture / wildcard)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in the hot path (segment comparison only)
//! - Deterministic: same input always matches the same route
//! - First match wins (declaration order)

pub mod pattern;
pub mod router;

pub use pattern::PathPattern;
pub use router::{HandlerKind, RouteTable};

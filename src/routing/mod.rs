//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → table.rs (route lookup)
//!     → matcher.rs (segment match, integer params)
//!     → Return: Matched { entry, params } | MethodNotAllowed | NotFound
//!
//! Table Compilation (at startup):
//!     RouteTable::standard()
//!     → compile path patterns
//!     → check every service against the BackendRegistry
//!     → freeze as immutable table
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - Independent of the HTTP framework; axum only sees a fallback handler

pub mod matcher;
pub mod table;

pub use matcher::{PathParams, PathPattern};
pub use table::{BodyPolicy, HandlerKind, RouteEntry, RouteMatch, RouteTable};

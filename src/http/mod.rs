//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, request id, trace span, inbound timeout)
//!     → routing::RouteTable (route lookup)
//!     → request.rs (body buffering, body policy)
//!     → proxy (forward + normalize / login) or local handler (health, docs.rs)
//!     → GatewayResponse → send to client
//! ```

pub mod docs;
pub mod request;
pub mod server;

pub use server::{AppState, GatewayServer, ServerError};

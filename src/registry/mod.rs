//! Backend registry subsystem.
//!
//! # Data Flow
//! ```text
//! GatewayConfig.services (validated)
//!     → services.rs (one BackendTarget per logical service)
//!     → shared via Arc with the dispatch handler
//!     → resolve("car") → BackendTarget { name, base_url }
//! ```
//!
//! # Design Decisions
//! - Built once at startup, immutable afterwards (no reload)
//! - Lookups of unknown names fail fast; the route table resolves every
//!   service it references before the server starts
//! - No load balancing: one base URL per service

pub mod backend;
pub mod services;

pub use backend::BackendTarget;
pub use services::{BackendRegistry, RegistryError, SERVICE_CAR, SERVICE_DAMAGE, SERVICE_USER};

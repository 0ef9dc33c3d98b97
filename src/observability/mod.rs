//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (route, service, status, latency)
//!     → tower-http spans per request, tagged with x-request-id
//!
//! Consumers:
//!     → logging.rs (fmt layer to stdout, EnvFilter)
//! ```

pub mod logging;

pub use logging::init_logging;

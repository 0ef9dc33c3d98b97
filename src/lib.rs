//! Maintenance API gateway library.
//!
//! Forwards client requests to the `user`, `car` and `damage` microservices
//! and normalizes their responses into one envelope.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod registry;
pub mod routing;

pub use config::schema::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → optional TOML file (loader.rs)
//!     → .env file (main.rs, dotenvy; never overrides the process env)
//!     → environment overrides (USER/CAR/SKADE_MICROSERVICE_URL, PORT)
//!     → CLI flags (main.rs)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::GatewayConfig;
pub use schema::{ListenerConfig, LogFormat, ObservabilityConfig, ServicesConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};

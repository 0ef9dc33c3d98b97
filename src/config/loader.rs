//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::ValidationError;

/// Environment variable holding the `user` service base URL.
pub const USER_URL_ENV: &str = "USER_MICROSERVICE_URL";
/// Environment variable holding the `car` service base URL.
pub const CAR_URL_ENV: &str = "CAR_MICROSERVICE_URL";
/// Environment variable holding the `damage` service base URL.
pub const DAMAGE_URL_ENV: &str = "SKADE_MICROSERVICE_URL";
/// Environment variable holding the listener port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a configuration from a TOML file without validating it.
pub fn read_config_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Overlay environment variables on top of `config`.
///
/// `lookup` resolves a variable name to its value; pass [`std::env::var`]
/// (via [`apply_process_env`]) in production.
pub fn apply_env<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(USER_URL_ENV) {
        config.services.user_url = url;
    }
    if let Some(url) = lookup(CAR_URL_ENV) {
        config.services.car_url = url;
    }
    if let Some(url) = lookup(DAMAGE_URL_ENV) {
        config.services.damage_url = url;
    }
    if let Some(port) = lookup(PORT_ENV) {
        config.listener.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            name: PORT_ENV,
            value: port.clone(),
        })?;
    }
    Ok(())
}

/// Overlay the process environment on top of `config`.
pub fn apply_process_env(config: &mut GatewayConfig) -> Result<(), ConfigError> {
    apply_env(config, |name| std::env::var(name).ok())
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Base URLs of the backend microservices.
    pub services: ServicesConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl GatewayConfig {
    /// Socket address string the listener binds to, e.g. `0.0.0.0:5002`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to listen on.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5002,
        }
    }
}

/// Backend microservice locations, one per logical service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Base URL of the `user` service (owns `/login`).
    pub user_url: String,

    /// Base URL of the `car` service.
    pub car_url: String,

    /// Base URL of the `damage` service (damage types and reports).
    pub damage_url: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            user_url: "http://localhost:5005".to_string(),
            car_url: "http://localhost:5006".to_string(),
            damage_url: "http://localhost:5007".to_string(),
        }
    }
}

/// Timeout configuration for inbound and outbound traffic.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Backend connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total time allowed for one backend call in seconds.
    pub request_secs: u64,

    /// Total time allowed for handling one inbound request in seconds.
    pub inbound_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
            inbound_secs: 60,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format of the fmt layer.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = GatewayConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:5002");
        assert_eq!(config.services.user_url, "http://localhost:5005");
        assert_eq!(config.services.car_url, "http://localhost:5006");
        assert_eq!(config.services.damage_url, "http://localhost:5007");
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [services]
            car_url = "http://cars.internal:8000"

            [observability]
            log_format = "compact"
            "#,
        )
        .unwrap();

        assert_eq!(config.services.car_url, "http://cars.internal:8000");
        assert_eq!(config.services.user_url, "http://localhost:5005");
        assert_eq!(config.listener.port, 5002);
        assert_eq!(config.observability.log_format, LogFormat::Compact);
    }
}

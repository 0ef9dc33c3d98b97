//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every service base URL is an absolute http(s) URL
//! - Validate value ranges (timeouts > 0, port valid)
//! - Inbound timeout must outlast the outbound one, so backend timeouts
//!   surface as a 502 envelope
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("service '{service}' has invalid base URL '{url}': {reason}")]
    InvalidServiceUrl {
        service: &'static str,
        url: String,
        reason: String,
    },

    #[error("timeout '{0}' must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("listener port must be greater than zero")]
    ZeroPort,

    #[error("inbound_secs ({inbound_secs}) must be greater than request_secs ({request_secs})")]
    InboundTimeoutTooShort { inbound_secs: u64, request_secs: u64 },
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let services = [
        ("user", &config.services.user_url),
        ("car", &config.services.car_url),
        ("damage", &config.services.damage_url),
    ];
    for (service, url) in services {
        if let Err(reason) = check_base_url(url) {
            errors.push(ValidationError::InvalidServiceUrl {
                service,
                url: url.clone(),
                reason,
            });
        }
    }

    let timeouts = [
        ("connect_secs", config.timeouts.connect_secs),
        ("request_secs", config.timeouts.request_secs),
        ("inbound_secs", config.timeouts.inbound_secs),
    ];
    for (name, secs) in timeouts {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    let (inbound_secs, request_secs) = (config.timeouts.inbound_secs, config.timeouts.request_secs);
    if inbound_secs != 0 && request_secs != 0 && inbound_secs <= request_secs {
        errors.push(ValidationError::InboundTimeoutTooShort {
            inbound_secs,
            request_secs,
        });
    }

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_base_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("query and fragment are not allowed".to_string());
    }
    Ok(())
}

//! Backend registry: logical service name → base URL.
//!
//! # Responsibilities
//! - Hold one `BackendTarget` per logical service
//! - Resolve service names, failing on unknown names

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ServicesConfig;
use crate::registry::backend::BackendTarget;

/// Logical name of the user service.
pub const SERVICE_USER: &str = "user";
/// Logical name of the car service.
pub const SERVICE_CAR: &str = "car";
/// Logical name of the damage service.
pub const SERVICE_DAMAGE: &str = "damage";

/// Error returned when a service name is not registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("no backend registered for service '{0}'")]
    UnknownService(String),
}

/// Immutable mapping of logical service names to backend targets.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    targets: HashMap<String, Arc<BackendTarget>>,
}

impl BackendRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry for the `user`, `car` and `damage` services.
    pub fn from_config(services: &ServicesConfig) -> Self {
        Self::new()
            .with_target(BackendTarget::new(SERVICE_USER, services.user_url.as_str()))
            .with_target(BackendTarget::new(SERVICE_CAR, services.car_url.as_str()))
            .with_target(BackendTarget::new(SERVICE_DAMAGE, services.damage_url.as_str()))
    }

    /// Register (or replace) a target under its own name.
    pub fn with_target(mut self, target: BackendTarget) -> Self {
        tracing::debug!(service = %target.name(), base_url = %target.base_url(), "Registered backend");
        self.targets.insert(target.name().to_string(), Arc::new(target));
        self
    }

    /// Look up the target registered for `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<BackendTarget>, RegistryError> {
        self.targets
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownService(name.to_string()))
    }

    /// Registered service names, sorted.
    pub fn service_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.targets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

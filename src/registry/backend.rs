//! Backend target abstraction.

use std::fmt;

/// A single logical backend service and where to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendTarget {
    /// Logical service name, e.g. `car`.
    name: String,
    /// Base URL without a trailing slash.
    base_url: String,
}

impl BackendTarget {
    /// Create a new target. A trailing `/` on `base_url` is dropped so that
    /// `base_url + "/path"` never produces a double slash.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            name: name.into(),
            base_url,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path such as `/cars/7`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl fmt::Display for BackendTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.base_url)
    }
}

//! Route table and dispatch lookup.
//!
//! # Responsibilities
//! - Declare every exposed (method, path) pair
//! - Bind each to a backend service + path template and a handler kind
//! - Look up a request: matched route, wrong method, or no route
//!
//! # Design Decisions
//! - Built once at startup, immutable afterwards (thread-safe without locks)
//! - O(n) scan in declaration order (the table is small)
//! - Explicit NotFound / MethodNotAllowed rather than silent defaults

use axum::http::Method;

use crate::proxy::forwarder::ForwardMethod;
use crate::proxy::login::LOGIN_PATH;
use crate::registry::{BackendRegistry, RegistryError, SERVICE_CAR, SERVICE_DAMAGE, SERVICE_USER};
use crate::routing::matcher::{PathParams, PathPattern};

/// What serves a matched route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Generic forward + normalize.
    Forward,
    /// Forward to the user service and re-issue the auth cookie.
    Login,
    /// Local liveness probe.
    Health,
    /// Local service description.
    Index,
    /// Local API document.
    ApiSpec,
}

impl HandlerKind {
    /// Whether the handler answers without calling a backend.
    pub fn is_local(self) -> bool {
        matches!(self, Self::Health | Self::Index | Self::ApiSpec)
    }
}

/// How the inbound body is treated before forwarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPolicy {
    /// No body is read or forwarded.
    Ignored,
    /// Any JSON value, or nothing.
    Optional,
    /// A non-empty JSON object is required.
    RequiredObject,
}

/// One row of the route table.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub method: ForwardMethod,
    pub pattern: PathPattern,
    /// Logical backend service; `None` for local handlers.
    pub service: Option<&'static str>,
    pub backend_path: Option<PathPattern>,
    pub handler: HandlerKind,
    pub body: BodyPolicy,
    /// One-line description used by the API documents.
    pub summary: &'static str,
}

impl RouteEntry {
    fn forward(
        method: ForwardMethod,
        path: &str,
        service: &'static str,
        summary: &'static str,
    ) -> Self {
        let body = if method.sends_body() {
            BodyPolicy::Optional
        } else {
            BodyPolicy::Ignored
        };
        Self {
            method,
            pattern: PathPattern::parse(path),
            service: Some(service),
            backend_path: Some(PathPattern::parse(path)),
            handler: HandlerKind::Forward,
            body,
            summary,
        }
    }

    fn local(path: &str, handler: HandlerKind, summary: &'static str) -> Self {
        Self {
            method: ForwardMethod::Get,
            pattern: PathPattern::parse(path),
            service: None,
            backend_path: None,
            handler,
            body: BodyPolicy::Ignored,
            summary,
        }
    }

    fn with_body(mut self, body: BodyPolicy) -> Self {
        self.body = body;
        self
    }

    /// Backend path for a match of this route, e.g. `/cars/7`.
    pub fn backend_path_for(&self, params: &PathParams) -> Option<String> {
        self.backend_path.as_ref()?.render(params)
    }
}

/// Result of looking up a request.
#[derive(Debug)]
pub enum RouteMatch<'a> {
    Matched {
        entry: &'a RouteEntry,
        params: PathParams,
    },
    MethodNotAllowed,
    NotFound,
}

/// The gateway's static route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build a table from explicit entries.
    pub fn new(routes: Vec<RouteEntry>) -> Self {
        Self { routes }
    }

    /// The gateway's full route surface.
    pub fn standard() -> Self {
        use ForwardMethod::{Delete, Get, Patch, Post};

        Self::new(vec![
            // cars
            RouteEntry::forward(Get, "/cars", SERVICE_CAR, "List all cars"),
            RouteEntry::forward(Get, "/cars/{id}", SERVICE_CAR, "Get a car by id"),
            RouteEntry::forward(Patch, "/cars/{id}", SERVICE_CAR, "Update a car"),
            // damage types
            RouteEntry::forward(Get, "/damage-types", SERVICE_DAMAGE, "List damage types"),
            RouteEntry::forward(Get, "/damage-types/{id}", SERVICE_DAMAGE, "Get a damage type by id"),
            RouteEntry::forward(Post, "/damage-types", SERVICE_DAMAGE, "Create a damage type")
                .with_body(BodyPolicy::RequiredObject),
            RouteEntry::forward(Patch, "/damage-types/{id}", SERVICE_DAMAGE, "Update a damage type"),
            RouteEntry::forward(Delete, "/damage-types/{id}", SERVICE_DAMAGE, "Delete a damage type"),
            // damage reports
            RouteEntry::forward(Get, "/damage-reports", SERVICE_DAMAGE, "List damage reports"),
            RouteEntry::forward(Get, "/damage-reports/{id}", SERVICE_DAMAGE, "Get a damage report by id"),
            RouteEntry::forward(
                Get,
                "/damage-reports/cars/{id}",
                SERVICE_DAMAGE,
                "List damage reports for a car",
            ),
            RouteEntry::forward(
                Get,
                "/damage-reports/subscriptions/{id}",
                SERVICE_DAMAGE,
                "List damage reports for a subscription",
            ),
            RouteEntry::forward(
                Get,
                "/damage-reports/subscriptions/{id}/total-cost",
                SERVICE_DAMAGE,
                "Total damage cost for a subscription",
            ),
            RouteEntry::forward(Patch, "/damage-reports/{id}", SERVICE_DAMAGE, "Update a damage report"),
            RouteEntry::forward(Delete, "/damage-reports/{id}", SERVICE_DAMAGE, "Delete a damage report"),
            RouteEntry::forward(Post, "/damage-reports", SERVICE_DAMAGE, "Create a damage report"),
            // auth
            RouteEntry {
                handler: HandlerKind::Login,
                ..RouteEntry::forward(Post, LOGIN_PATH, SERVICE_USER, "Log in and receive a session cookie")
            },
            // local
            RouteEntry::local("/health", HandlerKind::Health, "Liveness probe"),
            RouteEntry::local("/", HandlerKind::Index, "Service description"),
            RouteEntry::local("/apispec.json", HandlerKind::ApiSpec, "API specification"),
        ])
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    /// Check that every referenced service is registered.
    pub fn check_services(&self, registry: &BackendRegistry) -> Result<(), RegistryError> {
        for service in self.routes.iter().filter_map(|r| r.service) {
            registry.resolve(service)?;
        }
        Ok(())
    }

    /// Look up the route for a request.
    pub fn match_request(&self, method: &Method, path: &str) -> RouteMatch<'_> {
        let method = ForwardMethod::from_http(method);
        let mut path_matched = false;

        for entry in &self.routes {
            let Some(params) = entry.pattern.matches(path) else {
                continue;
            };
            if Some(entry.method) == method {
                return RouteMatch::Matched { entry, params };
            }
            path_matched = true;
        }

        if path_matched {
            RouteMatch::MethodNotAllowed
        } else {
            RouteMatch::NotFound
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the axum Router with the dispatch fallback
//! - Wire up middleware (request id, tracing, inbound timeout)
//! - Resolve requests through the route table
//! - Hand matched routes to the forwarder, the login flow or a local handler
//! - Serve until shutdown is signalled

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::docs::ServiceDocs;
use crate::http::request::{check_body, read_json_body, request_id};
use crate::proxy::cookies::parse_cookie_header;
use crate::proxy::{login, normalize, ForwardError, ForwardRequest, Forwarder, GatewayResponse};
use crate::registry::{BackendRegistry, RegistryError};
use crate::routing::{BodyPolicy, HandlerKind, PathParams, RouteEntry, RouteMatch, RouteTable};

/// Body of `404` responses.
pub const NOT_FOUND_MESSAGE: &str = "Endpoint does not exist";

/// Body of `405` responses.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed - double check the method you are using";

/// Errors that prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Forwarder(#[from] ForwardError),
}

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub table: Arc<RouteTable>,
    pub registry: Arc<BackendRegistry>,
    pub forwarder: Forwarder,
    pub docs: Arc<ServiceDocs>,
}

impl AppState {
    /// Assemble state, failing if the table references an unknown service.
    pub fn new(
        table: RouteTable,
        registry: BackendRegistry,
        forwarder: Forwarder,
    ) -> Result<Self, ServerError> {
        table.check_services(&registry)?;
        let docs = ServiceDocs::from_table(&table);
        Ok(Self {
            table: Arc::new(table),
            registry: Arc::new(registry),
            forwarder,
            docs: Arc::new(docs),
        })
    }
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create a server with the standard route table and the configured backends.
    pub fn new(config: &GatewayConfig) -> Result<Self, ServerError> {
        let registry = BackendRegistry::from_config(&config.services);
        let forwarder = Forwarder::new(&config.timeouts)?;
        let state = AppState::new(RouteTable::standard(), registry, forwarder)?;

        let router = Self::build_router(config, state);
        Ok(Self { router })
    }

    /// Build the axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new().fallback(dispatch).with_state(state).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.inbound_secs))),
        )
    }

    /// A clone of the router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Fallback handler: every request goes through the route table.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method.clone();
    let path = parts.uri.path().to_string();

    let response = match state.table.match_request(&method, &path) {
        RouteMatch::NotFound => {
            tracing::debug!(method = %method, path = %path, "No route matched");
            GatewayResponse::message(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
        }
        RouteMatch::MethodNotAllowed => {
            tracing::debug!(method = %method, path = %path, "Method not allowed");
            GatewayResponse::message(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_MESSAGE)
        }
        RouteMatch::Matched { entry, params } => {
            handle_route(&state, entry, params, &parts.headers, body).await
        }
    };

    tracing::info!(
        method = %method,
        path = %path,
        status = response.status.as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request handled"
    );
    response.into_response()
}

async fn handle_route(
    state: &AppState,
    entry: &RouteEntry,
    params: PathParams,
    headers: &HeaderMap,
    body: Body,
) -> GatewayResponse {
    match entry.handler {
        HandlerKind::Health => return GatewayResponse::new(StatusCode::OK, json!({ "status": "healthy" })),
        HandlerKind::Index => return GatewayResponse::new(StatusCode::OK, state.docs.index.clone()),
        HandlerKind::ApiSpec => return GatewayResponse::new(StatusCode::OK, state.docs.apispec.clone()),
        HandlerKind::Forward | HandlerKind::Login => {}
    }

    let request = match build_forward_request(state, entry, &params, headers, body).await {
        Ok(request) => request,
        Err(rejection) => return rejection,
    };

    if entry.handler == HandlerKind::Login {
        login::login(&state.forwarder, request).await
    } else {
        normalize::relay(&state.forwarder, request).await
    }
}

async fn build_forward_request(
    state: &AppState,
    entry: &RouteEntry,
    params: &PathParams,
    headers: &HeaderMap,
    body: Body,
) -> Result<ForwardRequest, GatewayResponse> {
    let (Some(service), Some(path)) = (entry.service, entry.backend_path_for(params)) else {
        tracing::error!(route = %entry.pattern, "Route has no backend binding");
        return Err(internal_error());
    };
    let target = state.registry.resolve(service).map_err(|e| {
        tracing::error!(error = %e, "Backend lookup failed");
        internal_error()
    })?;

    let body = match entry.body {
        BodyPolicy::Ignored => None,
        policy => check_body(policy, read_json_body(body).await?)?,
    };

    Ok(ForwardRequest::new(target, path, entry.method)
        .with_body(body)
        .with_cookies(parse_cookie_header(headers))
        .with_request_id(request_id(headers)))
}

fn internal_error() -> GatewayResponse {
    GatewayResponse::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "Gateway misconfigured" }),
    )
}

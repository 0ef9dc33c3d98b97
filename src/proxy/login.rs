//! Login flow.
//!
//! Forwards credentials to the `user` service and, on `200`, re-issues the
//! `Authorization` cookie from the backend response on the gateway response
//! as `HttpOnly; Secure`. The cookie value is relayed, never inspected.

use axum::http::StatusCode;

use crate::proxy::forwarder::{ForwardOutcome, ForwardRequest, Forwarder};
use crate::proxy::normalize::{error_envelope, unreachable};
use crate::proxy::response::{GatewayResponse, SetCookie};

/// Cookie carrying the session token.
pub const AUTH_COOKIE: &str = "Authorization";

/// Backend path of the login endpoint.
pub const LOGIN_PATH: &str = "/login";

/// Forward a login request and build the client response.
pub async fn login(forwarder: &Forwarder, request: ForwardRequest) -> GatewayResponse {
    match forwarder.forward(request).await {
        Ok(outcome) => finish_login(outcome),
        Err(e) => unreachable(&e),
    }
}

/// Map the `user` service's login outcome.
///
/// Only `200` is success here; other 2xx codes take the error branch.
pub fn finish_login(outcome: ForwardOutcome) -> GatewayResponse {
    if outcome.status != StatusCode::OK {
        tracing::info!(status = outcome.status.as_u16(), "Login rejected by user service");
        return error_envelope(outcome.status, outcome.body);
    }

    let mut response = GatewayResponse::new(StatusCode::OK, outcome.body);
    match outcome.response_cookies.get(AUTH_COOKIE) {
        Some(token) => {
            response = response.with_cookie(SetCookie::secure_http_only(AUTH_COOKIE, token.as_str()));
        }
        None => {
            tracing::debug!("Login succeeded without a new Authorization cookie");
        }
    }
    response
}

//! Mapping of backend outcomes to the client-facing envelope.
//!
//! Exactly two shapes leave this module: the backend body unchanged
//! (success) or the error envelope wrapping it. `200`, `201` and `204` are
//! success; every other status, including unreachable backends, is an error.

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::proxy::forwarder::{ForwardError, ForwardOutcome, ForwardRequest, Forwarder};
use crate::proxy::response::GatewayResponse;

/// `error` field of every error envelope.
pub const ENVELOPE_ERROR: &str = "Failed to fetch from microservice";

/// Status reported when the backend could not be reached.
pub const UNREACHABLE_STATUS: StatusCode = StatusCode::BAD_GATEWAY;

/// Whether a backend status counts as success.
pub fn is_success(status: StatusCode) -> bool {
    matches!(status.as_u16(), 200 | 201 | 204)
}

/// Wrap backend data in the error envelope.
pub fn error_envelope(status: StatusCode, data: Value) -> GatewayResponse {
    GatewayResponse::new(
        status,
        json!({
            "error": ENVELOPE_ERROR,
            "data_returned_from_microservice": data,
        }),
    )
}

/// Map a completed backend call. Response cookies are ignored here.
pub fn normalize(outcome: ForwardOutcome) -> GatewayResponse {
    if is_success(outcome.status) {
        GatewayResponse::new(outcome.status, outcome.body)
    } else {
        tracing::warn!(status = outcome.status.as_u16(), "Backend returned an error status");
        error_envelope(outcome.status, outcome.body)
    }
}

/// Map a failed backend call.
pub fn unreachable(error: &ForwardError) -> GatewayResponse {
    tracing::warn!(error = %error, timed_out = error.is_timeout(), "Backend unreachable");
    error_envelope(UNREACHABLE_STATUS, Value::Null)
}

/// Forward `request` and normalize whatever comes back.
pub async fn relay(forwarder: &Forwarder, request: ForwardRequest) -> GatewayResponse {
    match forwarder.forward(request).await {
        Ok(outcome) => normalize(outcome),
        Err(e) => unreachable(&e),
    }
}

//! Inbound request handling.
//!
//! # Responsibilities
//! - Read the request id assigned by the middleware stack
//! - Buffer and decode the JSON body within a size limit
//! - Apply the route's body policy before anything is forwarded
//!
//! # Design Decisions
//! - Bodies are buffered, never streamed
//! - An empty body is "no body", not a decode error
//! - Rejections are returned as ready-made `GatewayResponse`s

use axum::{
    body::Body,
    http::{HeaderMap, StatusCode},
};
use http_body_util::LengthLimitError;
use serde_json::Value;

use crate::proxy::forwarder::REQUEST_ID_HEADER;
use crate::proxy::GatewayResponse;
use crate::routing::BodyPolicy;

/// Largest inbound body the gateway buffers.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Message returned when a required body is missing or empty.
pub const NO_DATA_MESSAGE: &str = "No data provided";

/// The `x-request-id` of the inbound request, if any.
pub fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Buffer the body and decode it as JSON.
///
/// Returns `Ok(None)` for an empty body.
pub async fn read_json_body(body: Body) -> Result<Option<Value>, GatewayResponse> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(read_failure)?;
    decode_json(&bytes)
}

/// 413 when the body exceeded [`MAX_BODY_BYTES`], 400 for any other read failure.
fn read_failure(error: axum::Error) -> GatewayResponse {
    tracing::debug!(error = %error, "Failed to read request body");
    if exceeded_limit(&error) {
        GatewayResponse::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            serde_json::json!({ "error": "Request body is too large" }),
        )
    } else {
        GatewayResponse::client_error("Request body could not be read")
    }
}

fn exceeded_limit(error: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(e) = current {
        if e.is::<LengthLimitError>() {
            return true;
        }
        current = e.source();
    }
    false
}

fn decode_json(bytes: &[u8]) -> Result<Option<Value>, GatewayResponse> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|_| GatewayResponse::client_error("Request body must be valid JSON"))
}

/// Apply a route's body policy to a decoded body.
pub fn check_body(policy: BodyPolicy, body: Option<Value>) -> Result<Option<Value>, GatewayResponse> {
    match policy {
        BodyPolicy::Ignored => Ok(None),
        BodyPolicy::Optional => Ok(body),
        BodyPolicy::RequiredObject => match body {
            None | Some(Value::Null) => Err(no_data()),
            Some(Value::Object(map)) if map.is_empty() => Err(no_data()),
            Some(Value::Array(items)) if items.is_empty() => Err(no_data()),
            Some(Value::Object(map)) => Ok(Some(Value::Object(map))),
            Some(_) => Err(GatewayResponse::client_error("Request body must be a JSON object")),
        },
    }
}

fn no_data() -> GatewayResponse {
    GatewayResponse::message(StatusCode::BAD_REQUEST, NO_DATA_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_is_none() {
        assert_eq!(decode_json(b"").unwrap(), None);
        assert_eq!(decode_json(b" \n").unwrap(), None);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let rejection = decode_json(b"{not json").unwrap_err();
        assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
        assert_eq!(rejection.payload, json!({"error": "Request body must be valid JSON"}));
    }

    #[tokio::test]
    async fn test_read_json_body() {
        let body = Body::from(r#"{"email": "a@b.dk"}"#);
        assert_eq!(read_json_body(body).await.unwrap(), Some(json!({"email": "a@b.dk"})));
    }

    #[tokio::test]
    async fn test_oversized_body_is_413() {
        let body = Body::from(vec![b' '; MAX_BODY_BYTES + 1]);
        let rejection = read_json_body(body).await.unwrap_err();
        assert_eq!(rejection.status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_interrupted_body_is_400() {
        let error = axum::Error::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "client went away",
        ));
        let rejection = read_failure(error);
        assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
        assert_eq!(rejection.payload, json!({"error": "Request body could not be read"}));
    }

    #[test]
    fn test_ignored_policy_drops_body() {
        assert_eq!(check_body(BodyPolicy::Ignored, Some(json!({"a": 1}))).unwrap(), None);
    }

    #[test]
    fn test_optional_policy_passes_anything() {
        assert_eq!(check_body(BodyPolicy::Optional, None).unwrap(), None);
        assert_eq!(check_body(BodyPolicy::Optional, Some(json!([1]))).unwrap(), Some(json!([1])));
    }

    #[test]
    fn test_required_object_policy() {
        for missing in [None, Some(json!(null)), Some(json!({})), Some(json!([]))] {
            let rejection = check_body(BodyPolicy::RequiredObject, missing).unwrap_err();
            assert_eq!(rejection.status, StatusCode::BAD_REQUEST);
            assert_eq!(rejection.payload, json!({"message": "No data provided"}));
        }

        let rejection = check_body(BodyPolicy::RequiredObject, Some(json!("scratch"))).unwrap_err();
        assert_eq!(rejection.payload, json!({"error": "Request body must be a JSON object"}));

        let accepted = check_body(BodyPolicy::RequiredObject, Some(json!({"type": "scratch"})));
        assert_eq!(accepted.unwrap(), Some(json!({"type": "scratch"})));
    }
}

//! Outbound call execution.
//!
//! # Responsibilities
//! - Build the backend URL from the target base URL and path
//! - Mirror the inbound method and JSON body
//! - Relay inbound cookies as a single `Cookie` header
//! - Collect status, decoded body and response cookies
//!
//! # Design Decisions
//! - One shared `reqwest::Client` (connection pooling), no cookie store
//! - No retries; network failures and timeouts surface as `BackendUnreachable`
//! - An undecodable body is not an error, it becomes `[]`

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{Method, StatusCode};
use reqwest::header::COOKIE;
use serde_json::Value;

use crate::config::TimeoutConfig;
use crate::proxy::cookies::{render_cookie_header, CookieMap};
use crate::registry::BackendTarget;

/// Header used to correlate gateway and backend logs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP methods the gateway forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForwardMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl ForwardMethod {
    /// Map an inbound method; anything outside the four forwarded verbs is `None`.
    pub fn from_http(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Self::Get),
            Method::POST => Some(Self::Post),
            Method::PATCH => Some(Self::Patch),
            Method::DELETE => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether a JSON body accompanies the outbound call.
    pub fn sends_body(self) -> bool {
        !matches!(self, Self::Get)
    }

    fn to_http(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Patch => Method::PATCH,
            Self::Delete => Method::DELETE,
        }
    }
}

impl fmt::Display for ForwardMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound call, built per inbound request.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub target: Arc<BackendTarget>,
    /// Backend path, already substituted, e.g. `/cars/7`.
    pub path: String,
    pub method: ForwardMethod,
    pub body: Option<Value>,
    pub cookies: CookieMap,
    pub request_id: Option<String>,
}

impl ForwardRequest {
    pub fn new(target: Arc<BackendTarget>, path: impl Into<String>, method: ForwardMethod) -> Self {
        Self {
            target,
            path: path.into(),
            method,
            body: None,
            cookies: CookieMap::new(),
            request_id: None,
        }
    }

    pub fn with_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    pub fn with_cookies(mut self, cookies: CookieMap) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Absolute outbound URL.
    pub fn url(&self) -> String {
        self.target.url_for(&self.path)
    }
}

/// Raw result of a completed backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardOutcome {
    pub status: StatusCode,
    /// Decoded JSON body, or `[]` when the body was not valid JSON.
    pub body: Value,
    pub response_cookies: CookieMap,
}

/// Errors raised while forwarding.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    /// The call could not complete (refused, DNS, timeout, broken body).
    #[error("backend '{service}' unreachable at {url}: {source}")]
    BackendUnreachable {
        service: String,
        url: String,
        timed_out: bool,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ForwardError {
    /// Whether the failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::BackendUnreachable { timed_out: true, .. })
    }
}

/// Issues outbound calls to backend services.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    /// Create a forwarder whose calls are bounded by `timeouts`.
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, ForwardError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .no_proxy()
            .build()
            .map_err(ForwardError::Client)?;
        Ok(Self { client })
    }

    /// Execute one outbound call.
    pub async fn forward(&self, request: ForwardRequest) -> Result<ForwardOutcome, ForwardError> {
        let start = Instant::now();
        let url = request.url();
        let service = request.target.name().to_string();

        let mut builder = self.client.request(request.method.to_http(), &url);
        if let Some(cookie) = render_cookie_header(&request.cookies) {
            builder = builder.header(COOKIE, cookie);
        }
        if let Some(ref request_id) = request.request_id {
            builder = builder.header(REQUEST_ID_HEADER, request_id.as_str());
        }
        if request.method.sends_body() {
            let body = request.body.unwrap_or(Value::Null);
            builder = builder.json(&body);
        }

        let unreachable = |source: reqwest::Error| ForwardError::BackendUnreachable {
            service: service.clone(),
            url: url.clone(),
            timed_out: source.is_timeout(),
            source,
        };

        let response = builder.send().await.map_err(unreachable)?;
        let status = response.status();
        let response_cookies: CookieMap = response
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect();
        let bytes = response.bytes().await.map_err(unreachable)?;
        let body = decode_body(&bytes);

        tracing::debug!(
            service = %service,
            method = %request.method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Backend responded"
        );

        Ok(ForwardOutcome {
            status,
            body,
            response_cookies,
        })
    }
}

/// Decode a backend body, substituting `[]` when it is not valid JSON.
pub fn decode_body(bytes: &[u8]) -> Value {
    match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, len = bytes.len(), "Backend body is not JSON, using []");
            Value::Array(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_body_valid_json() {
        assert_eq!(decode_body(br#"{"id": 4}"#), json!({"id": 4}));
        assert_eq!(decode_body(b"null"), Value::Null);
    }

    #[test]
    fn test_decode_body_fallback_is_empty_list() {
        assert_eq!(decode_body(b""), json!([]));
        assert_eq!(decode_body(b"<html>502</html>"), json!([]));
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(ForwardMethod::from_http(&Method::PATCH), Some(ForwardMethod::Patch));
        assert_eq!(ForwardMethod::from_http(&Method::PUT), None);
        assert!(!ForwardMethod::Get.sends_body());
        assert!(ForwardMethod::Delete.sends_body());
    }

    #[test]
    fn test_request_url_joins_base_and_path() {
        let target = Arc::new(BackendTarget::new("car", "http://cars:5006/"));
        let request = ForwardRequest::new(target, "/cars/12", ForwardMethod::Get);
        assert_eq!(request.url(), "http://cars:5006/cars/12");
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        // Bind then drop to obtain a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let forwarder = Forwarder::new(&TimeoutConfig::default()).unwrap();
        let target = Arc::new(BackendTarget::new("car", format!("http://{}", addr)));
        let err = forwarder
            .forward(ForwardRequest::new(target, "/cars", ForwardMethod::Get))
            .await
            .unwrap_err();

        match err {
            ForwardError::BackendUnreachable { ref service, timed_out, .. } => {
                assert_eq!(service, "car");
                assert!(!timed_out);
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}

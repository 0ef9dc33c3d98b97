//! Client-facing response contract.
//!
//! # Responsibilities
//! - Carry status, JSON payload and cookies to set
//! - Render `Set-Cookie` headers
//! - Convert into an axum `Response`

use axum::{
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

/// A cookie the gateway itself sets on the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub http_only: bool,
    pub secure: bool,
}

impl SetCookie {
    /// A cookie flagged `HttpOnly` and `Secure`.
    pub fn secure_http_only(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            http_only: true,
            secure: true,
        }
    }

    /// `Set-Cookie` header value, e.g. `Authorization=tok; HttpOnly; Secure`.
    pub fn header_value(&self) -> String {
        let mut rendered = format!("{}={}", self.name, self.value);
        if self.http_only {
            rendered.push_str("; HttpOnly");
        }
        if self.secure {
            rendered.push_str("; Secure");
        }
        rendered
    }
}

/// Final response handed back to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub payload: Value,
    pub set_cookies: Vec<SetCookie>,
}

impl GatewayResponse {
    pub fn new(status: StatusCode, payload: Value) -> Self {
        Self {
            status,
            payload,
            set_cookies: Vec::new(),
        }
    }

    /// `{"message": ...}` body, used for routing failures.
    pub fn message(status: StatusCode, message: &str) -> Self {
        Self::new(status, json!({ "message": message }))
    }

    /// `{"error": ...}` body, used for rejected client input.
    pub fn client_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, json!({ "error": message.into() }))
    }

    pub fn with_cookie(mut self, cookie: SetCookie) -> Self {
        self.set_cookies.push(cookie);
        self
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.payload)).into_response();
        for cookie in &self.set_cookies {
            match HeaderValue::from_str(&cookie.header_value()) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => {
                    tracing::warn!(cookie = %cookie.name, error = %e, "Dropping unrepresentable cookie");
                }
            }
        }
        response
    }
}

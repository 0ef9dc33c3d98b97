//! Cookie header handling.
//!
//! Inbound cookies are relayed opaquely: the gateway parses the `Cookie`
//! header into name/value pairs only so it can re-emit them on the outbound
//! call. Values are never decoded or validated.

use std::collections::BTreeMap;

use axum::http::{header::COOKIE, HeaderMap};

/// Cookie name → value, ordered by name so rendering is deterministic.
pub type CookieMap = BTreeMap<String, String>;

/// Parse every `Cookie` header in `headers` into a map.
///
/// Pairs without `=` or with an empty name are skipped. On duplicate names
/// the first occurrence wins.
pub fn parse_cookie_header(headers: &HeaderMap) -> CookieMap {
    let mut cookies = CookieMap::new();
    for value in headers.get_all(COOKIE) {
        let Ok(raw) = value.to_str() else {
            tracing::debug!("Ignoring non-ASCII cookie header");
            continue;
        };
        for pair in raw.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            cookies
                .entry(name.to_string())
                .or_insert_with(|| value.trim().to_string());
        }
    }
    cookies
}

/// Render a map back into a single `Cookie` header value.
///
/// Returns `None` when there is nothing to send.
pub fn render_cookie_header(cookies: &CookieMap) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    let rendered = cookies
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ");
    Some(rendered)
}

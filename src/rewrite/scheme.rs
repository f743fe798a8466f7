//! Scheme capture and normalization.
//!
//! Devices connect over `ws`/`wss` but cannot follow a redirect naming those
//! schemes, so they are mapped to their HTTP equivalents.

use axum::http::{HeaderMap, Uri};

/// Header set by the edge load balancer with the client-facing scheme.
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Scheme of the inbound request, falling back to `X-Forwarded-Proto`.
///
/// Returns an empty string when neither is available.
pub fn original_scheme(uri: &Uri, headers: &HeaderMap) -> String {
    if let Some(scheme) = uri.scheme_str().filter(|s| !s.is_empty()) {
        return scheme.to_string();
    }
    headers
        .get(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Map `ws` → `http` and `wss` → `https`; anything else is returned as is.
pub fn normalize_scheme(scheme: &str) -> &str {
    match scheme {
        "ws" => "http",
        "wss" => "https",
        other => other,
    }
}

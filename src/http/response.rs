//! Response handling and transformation.
//!
//! # Responsibilities
//! - Relay resolver headers to the client
//! - Drop trace propagation and hop-by-hop headers
//!
//! # Design Decisions
//! - Every other header is copied verbatim, multi-valued headers included
//! - The body is re-framed by the server, so framing headers of the
//!   resolver connection are not relayed

use axum::http::HeaderMap;

use crate::http::request::strip_hop_by_hop;
use crate::observability::tracing::is_trace_header;

/// Headers from a resolver response that may be shown to the client.
pub fn relay_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream.iter() {
        if is_trace_header(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    strip_hop_by_hop(&mut headers);
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderValue};

    #[test]
    fn test_relay_headers() {
        let mut upstream = HeaderMap::new();
        upstream.insert(header::LOCATION, HeaderValue::from_static("http://node/api"));
        upstream.insert("traceparent", HeaderValue::from_static("00-abc-def-01"));
        upstream.insert("tracestate", HeaderValue::from_static("vendor=1"));
        upstream.insert(header::TRANSFER_ENCODING, HeaderValue::from_static("chunked"));
        upstream.append("x-petasos-server", HeaderValue::from_static("a"));
        upstream.append("x-petasos-server", HeaderValue::from_static("b"));

        let relayed = relay_headers(&upstream);
        assert_eq!(relayed.get(header::LOCATION).unwrap(), "http://node/api");
        assert!(relayed.get("traceparent").is_none());
        assert!(relayed.get("tracestate").is_none());
        assert!(relayed.get(header::TRANSFER_ENCODING).is_none());
        let values: Vec<_> = relayed.get_all("x-petasos-server").iter().collect();
        assert_eq!(values, vec!["a", "b"]);
    }
}

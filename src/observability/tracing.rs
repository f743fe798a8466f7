//! Distributed trace context handling.
//!
//! The resolver may answer with W3C Trace Context headers describing its own
//! internal spans. Those are dropped before the response is relayed.

use axum::http::HeaderName;

/// W3C Trace Context propagation headers.
pub const TRACE_HEADERS: [&str; 2] = ["traceparent", "tracestate"];

pub fn is_trace_header(name: &HeaderName) -> bool {
    TRACE_HEADERS.contains(&name.as_str())
}

//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rewriter_requests_total` (counter): requests by method, status
//! - `rewriter_request_duration_seconds` (histogram): latency distribution
//! - `rewriter_redirects_total` (counter): redirect handling by outcome
//! - `rewriter_resource_updates_total` (counter): side-channel publishes by outcome
//! - `rewriter_errors_total` (counter): captured hard failures by kind
//! - `rewriter_startup_probe_attempts_total` (counter): resolver probes by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, start: Instant) {
    let status = status.to_string();
    counter!(
        "rewriter_requests_total",
        "method" => method.to_string(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        "rewriter_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status
    )
    .record(start.elapsed().as_secs_f64());
}

/// `outcome` is one of `rewritten`, `failed`, `passthrough`.
pub fn record_redirect(outcome: &'static str) {
    counter!("rewriter_redirects_total", "outcome" => outcome).increment(1);
}

pub fn record_resource_update(success: bool) {
    let outcome = if success { "ok" } else { "failed" };
    counter!("rewriter_resource_updates_total", "outcome" => outcome).increment(1);
}

pub fn record_error(kind: &'static str) {
    counter!("rewriter_errors_total", "kind" => kind).increment(1);
}

pub fn record_probe_attempt(success: bool) {
    let outcome = if success { "ok" } else { "failed" };
    counter!("rewriter_startup_probe_attempts_total", "outcome" => outcome).increment(1);
}

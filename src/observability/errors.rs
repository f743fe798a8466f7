//! Error tracking.
//!
//! Hard failures (failed forwards, failed startup probes) are handed to an
//! [`ErrorTracker`]. The default tracker logs the whole source chain and
//! counts the failure; other sinks plug in behind the same trait.

use std::error::Error;

use super::metrics;

pub trait ErrorTracker: Send + Sync {
    /// Record a hard failure. `kind` is a short, low-cardinality label.
    fn capture(&self, kind: &'static str, error: &(dyn Error + 'static));
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorTracker;

impl ErrorTracker for TracingErrorTracker {
    fn capture(&self, kind: &'static str, error: &(dyn Error + 'static)) {
        tracing::error!(kind, error = %error, chain = %error_chain(error), "Captured error");
        metrics::record_error(kind);
    }
}

/// Render `error` and all of its sources as `outer: inner: root`.
pub fn error_chain(error: &(dyn Error + 'static)) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(e) = source {
        out.push_str(": ");
        out.push_str(&e.to_string());
        source = e.source();
    }
    out
}

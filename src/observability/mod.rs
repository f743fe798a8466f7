//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → errors.rs (hard failures for the error tracker)
//!
//! Consumers:
//!     → Log aggregation (stdout, plain or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID and device name flow through every request span
//! - Metrics are cheap (atomic increments)
//! - Trace propagation headers from the resolver never reach clients

pub mod errors;
pub mod logging;
pub mod metrics;
pub mod tracing;

pub use errors::{ErrorTracker, TracingErrorTracker};

//! Resolver health checking.
//!
//! # Data Flow
//! ```text
//! process start
//!     → probe.rs: GET resolver with a synthetic device name
//!     → transport error? wait fixed delay, try again
//!     → attempts exhausted → fatal, listener never bound
//! ```
//!
//! # Design Decisions
//! - Only runs at startup; there is no background monitor
//! - Any HTTP answer counts as reachable, status is not inspected
//! - Fixed delay between attempts, no jitter or exponential growth

pub mod probe;

pub use probe::{wait_for_resolver, HealthProbe, ProbeError};

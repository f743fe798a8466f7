//! Device metadata side channel.
//!
//! # Data Flow
//! ```text
//! inbound request headers
//!     → record.rs (IP, certificate provider/expiry, optional convey data)
//!     → publisher.rs (PUT {endpoint}/{device id} as JSON)
//! ```
//!
//! # Design Decisions
//! - Publishing is awaited inline before forwarding, never detached
//! - Any failure is returned to the forwarder, which logs it and carries on
//! - Convey decode failures do not stop the publish; the record simply lacks
//!   the convey fields

pub mod publisher;
pub mod record;

pub use publisher::{ResourcePublisher, ResourceUpdateError};
pub use record::{CertificateProvider, ResourceUpdateRecord};

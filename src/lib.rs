//! Redirect-rewriting discovery gateway.
//!
//! Sits in front of a resolver that answers device discovery requests with
//! `307` redirects naming cluster-internal nodes, and rewrites those
//! redirects into externally routable ones before the device sees them.

pub mod config;
pub mod convey;
pub mod error;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resource;
pub mod rewrite;

pub use config::GatewayConfig;
pub use error::{GatewayError, SetupError};
pub use http::{HttpServer, RequestForwarder};
pub use lifecycle::Shutdown;
pub use rewrite::RewriteRule;

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → middleware/ (authorization enforcement)
//!     → forwarder.rs (scheme, side channel, resolver call, redirect rewrite)
//!     → request.rs / response.rs (header preparation and relay)
//!     → Send to client
//! ```

pub mod forwarder;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use forwarder::RequestForwarder;
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};

//! Gateway error taxonomy.
//!
//! - [`GatewayError`]: a single request failed; mapped to an HTTP response
//! - [`SetupError`]: the process cannot start; fatal before the listener binds
//!
//! Side-channel failures (resource updates, convey decoding) have their own
//! types and never become a `GatewayError`.

use axum::http::header::InvalidHeaderValue;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::config::ConfigError;
use crate::health::ProbeError;
use crate::resource::ResourceUpdateError;
use crate::rewrite::RewriteError;

/// Hard, request-scoped failure.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to build resolver request")]
    Request(#[from] axum::http::Error),

    #[error("resolver request failed")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("failed to read resolver response body")]
    Body(#[source] axum::Error),

    #[error("resolver redirect carries no usable Location header")]
    MissingLocation,

    #[error("failed to rewrite redirect")]
    Rewrite(#[from] RewriteError),

    #[error("rewritten Location is not a valid header value")]
    HeaderValue(#[from] InvalidHeaderValue),
}

impl GatewayError {
    /// Low-cardinality label for metrics and error tracking.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Request(_) => "request_build",
            GatewayError::Upstream(_) => "upstream",
            GatewayError::Body(_) => "body",
            GatewayError::MissingLocation => "missing_location",
            GatewayError::Rewrite(RewriteError::Translate(_)) => "no_match",
            GatewayError::Rewrite(_) => "rewrite",
            GatewayError::HeaderValue(_) => "header_value",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Request(_) | GatewayError::HeaderValue(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        // Details stay in the logs; they may contain internal host names.
        let message = match self {
            GatewayError::Upstream(_) | GatewayError::Body(_) => "Upstream request failed",
            GatewayError::MissingLocation | GatewayError::Rewrite(_) => "Redirect could not be rewritten",
            GatewayError::Request(_) | GatewayError::HeaderValue(_) => "Internal error",
        };
        (self.status(), message).into_response()
    }
}

/// Fatal startup failure.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid resolver endpoint {0:?}")]
    ResolverEndpoint(String),

    #[error("failed to build resource publisher")]
    Publisher(#[from] ResourceUpdateError),

    #[error("could not reach resolver, shutting down")]
    Resolver(#[from] ProbeError),

    #[error("failed to bind {address}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Serve(#[source] std::io::Error),
}

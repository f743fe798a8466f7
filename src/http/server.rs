//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler
//! - Wire up middleware (tracing, timeout, body limit, request ID, authorization)
//! - Bind server to listener
//! - Record per-request metrics and capture hard failures

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Instrument;

use crate::config::GatewayConfig;
use crate::error::SetupError;
use crate::http::forwarder::RequestForwarder;
use crate::http::middleware::require_authorization;
use crate::http::request::{header_or_empty, MakeRequestUuid, X_REQUEST_ID, X_TENANT_ID, X_WEBPA_DEVICE_NAME};
use crate::observability::{metrics, ErrorTracker, TracingErrorTracker};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<RequestForwarder>,
    pub errors: Arc<dyn ErrorTracker>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, SetupError> {
        Self::with_error_tracker(config, Arc::new(TracingErrorTracker))
    }

    /// Create a server reporting hard failures to `errors`.
    pub fn with_error_tracker(
        config: GatewayConfig,
        errors: Arc<dyn ErrorTracker>,
    ) -> Result<Self, SetupError> {
        let forwarder = Arc::new(RequestForwarder::from_config(&config)?);
        let state = AppState { forwarder, errors };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(forward_handler))
            .route("/{*path}", get(forward_handler))
            .with_state(state)
            .layer(middleware::from_fn_with_state(
                config.authorization.enforce,
                require_authorization,
            ))
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            resolver = %self.config.resolver.endpoint,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Forward one discovery request and account for it.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    let span = tracing::info_span!(
        "forward",
        request_id = %header_or_empty(request.headers(), X_REQUEST_ID),
        device = %header_or_empty(request.headers(), X_WEBPA_DEVICE_NAME),
        tenant = %header_or_empty(request.headers(), X_TENANT_ID),
        path = %request.uri().path(),
    );

    let response = match state.forwarder.forward(request).instrument(span.clone()).await {
        Ok(response) => response,
        Err(e) => {
            let _guard = span.enter();
            state.errors.capture(e.kind(), &e);
            e.into_response()
        }
    };

    metrics::record_request(&method, response.status().as_u16(), start);
    response
}

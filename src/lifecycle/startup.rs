//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics endpoint
//! - Block until the resolver is reachable (bounded, fixed delay)
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last, so no traffic is accepted before the resolver answers

use std::sync::Arc;

use axum::http::Uri;
use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::error::SetupError;
use crate::health::{wait_for_resolver, HealthProbe};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::{metrics, ErrorTracker, TracingErrorTracker};

/// Run the gateway with an already validated configuration.
pub async fn start(config: GatewayConfig, shutdown: Shutdown) -> Result<(), SetupError> {
    let errors: Arc<dyn ErrorTracker> = Arc::new(TracingErrorTracker);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let resolver: Uri = config
        .resolver
        .endpoint
        .parse()
        .map_err(|_| SetupError::ResolverEndpoint(config.resolver.endpoint.clone()))?;
    let probe = HealthProbe::new(resolver, &config.health_check);
    wait_for_resolver(&probe, &config.health_check, errors.as_ref()).await?;

    let server = HttpServer::with_error_tracker(config, errors)?;

    let address = server.config().listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| SetupError::Bind { address, source })?;

    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(SetupError::Serve)
}

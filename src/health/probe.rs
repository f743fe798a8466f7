//! Startup reachability probe for the resolver.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::time;

use crate::config::HealthCheckConfig;
use crate::http::request::X_WEBPA_DEVICE_NAME;
use crate::observability::{metrics, ErrorTracker};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to build probe request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("resolver unreachable: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("resolver probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("resolver still unreachable after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: Box<ProbeError>,
    },
}

/// Checks that the resolver answers HTTP at all.
pub struct HealthProbe {
    client: Client<HttpConnector, Body>,
    resolver: Uri,
    device_name: String,
    timeout: Duration,
}

impl HealthProbe {
    pub fn new(resolver: Uri, config: &HealthCheckConfig) -> Self {
        // The legacy client never follows redirects, which the resolver answers with.
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Self {
            client,
            resolver,
            device_name: config.device_name.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Issue a single probe. Succeeds on any response, whatever its status.
    pub async fn check(&self) -> Result<(), ProbeError> {
        let request = Request::builder()
            .method("GET")
            .uri(self.resolver.clone())
            .header(X_WEBPA_DEVICE_NAME, self.device_name.as_str())
            .header("user-agent", "redirect-rewriter-health-check")
            .body(Body::empty())?;

        match time::timeout(self.timeout, self.client.request(request)).await {
            Ok(Ok(response)) => {
                tracing::debug!(status = %response.status(), "Resolver answered probe");
                Ok(())
            }
            Ok(Err(e)) => Err(ProbeError::Transport(e)),
            Err(_) => Err(ProbeError::Timeout(self.timeout)),
        }
    }
}

/// Probe the resolver until it answers or `config.attempts` is used up.
pub async fn wait_for_resolver(
    probe: &HealthProbe,
    config: &HealthCheckConfig,
    errors: &dyn ErrorTracker,
) -> Result<(), ProbeError> {
    let delay = Duration::from_millis(config.delay_ms);
    let attempts = config.attempts.max(1);

    tracing::info!(resolver = %probe.resolver, attempts, "Checking if resolver is reachable");

    let mut attempt = 1;
    loop {
        tracing::debug!(attempt, "Trying to reach resolver");
        match probe.check().await {
            Ok(()) => {
                metrics::record_probe_attempt(true);
                tracing::info!(attempt, "Resolver is reachable");
                return Ok(());
            }
            Err(e) => {
                metrics::record_probe_attempt(false);
                errors.capture("startup_probe", &e);
                if attempt >= attempts {
                    return Err(ProbeError::Exhausted {
                        attempts,
                        last: Box::new(e),
                    });
                }
            }
        }
        attempt += 1;
        time::sleep(delay).await;
    }
}

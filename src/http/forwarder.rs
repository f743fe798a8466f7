//! Discovery request forwarding and redirect rewriting.
//!
//! # Flow
//! ```text
//! inbound GET
//!     → capture + normalize scheme (ws → http, wss → https)
//!     → [optional] publish device metadata (failure logged only)
//!     → GET {resolver}{path}, redirects not followed
//!     → status != 307: relay status, headers and body untouched
//!     → status == 307: rewrite Location and body, recompute Content-Length
//! ```

use std::time::Duration;

use axum::body::Body;
use axum::http::{
    header::{CONTENT_LENGTH, LOCATION},
    uri::{Authority, Scheme},
    HeaderMap, HeaderValue, Request, StatusCode, Uri,
};
use axum::response::Response;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, SetupError};
use crate::http::request::{header_or_empty, outbound_headers, X_WEBPA_DEVICE_NAME};
use crate::http::response::relay_headers;
use crate::observability::metrics;
use crate::resource::ResourcePublisher;
use crate::rewrite::{normalize_scheme, original_scheme, rewrite_first_quoted, rewrite_location, RewriteRule};

/// Forwards discovery requests to the resolver and rewrites its redirects.
///
/// Immutable after construction and shared by all requests.
pub struct RequestForwarder {
    client: Client<HttpConnector, Body>,
    resolver_scheme: Scheme,
    resolver_authority: Authority,
    rule: RewriteRule,
    publisher: Option<ResourcePublisher>,
    max_body_bytes: usize,
}

impl RequestForwarder {
    pub fn from_config(config: &GatewayConfig) -> Result<Self, SetupError> {
        let resolver: Uri = config
            .resolver
            .endpoint
            .parse()
            .map_err(|_| SetupError::ResolverEndpoint(config.resolver.endpoint.clone()))?;
        let (resolver_scheme, resolver_authority) = match (resolver.scheme(), resolver.authority()) {
            (Some(scheme), Some(authority)) => (scheme.clone(), authority.clone()),
            _ => return Err(SetupError::ResolverEndpoint(config.resolver.endpoint.clone())),
        };

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        // The legacy client hands 3xx responses back as is; the redirect is ours to rewrite.
        let client = Client::builder(TokioExecutor::new()).build(connector);

        let publisher = if config.resource_update.enabled {
            Some(ResourcePublisher::new(
                &config.resource_update.endpoint,
                Duration::from_secs(config.resource_update.timeout_secs),
            )?)
        } else {
            None
        };

        Ok(Self {
            client,
            resolver_scheme,
            resolver_authority,
            rule: config.rewrite.clone(),
            publisher,
            max_body_bytes: config.limits.max_body_bytes,
        })
    }

    /// Handle one inbound request.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, GatewayError> {
        let (parts, body) = request.into_parts();

        let original = original_scheme(&parts.uri, &parts.headers);
        let scheme = normalize_scheme(&original).to_string();
        tracing::debug!(original_scheme = %original, "Captured request scheme");
        if scheme != original {
            tracing::debug!(from = %original, to = %scheme, "Replacing original scheme in output");
        }

        if let Some(publisher) = &self.publisher {
            tracing::info!("Updating resource's IP address and certificate information");
            match publisher.publish(&parts.headers).await {
                Ok(()) => metrics::record_resource_update(true),
                Err(e) => {
                    metrics::record_resource_update(false);
                    tracing::warn!(error = %e, "Resource update failed, continuing");
                }
            }
        }

        let uri = Uri::builder()
            .scheme(self.resolver_scheme.clone())
            .authority(self.resolver_authority.clone())
            .path_and_query(parts.uri.path())
            .build()?;

        let mut outbound = Request::builder()
            .method(parts.method.clone())
            .uri(uri)
            .body(body)?;
        *outbound.headers_mut() = outbound_headers(&parts.headers);

        tracing::debug!(
            method = %outbound.method(),
            uri = %outbound.uri(),
            headers = ?outbound.headers(),
            "Forwarding request to resolver"
        );

        let response = self.client.request(outbound).await?;
        let (upstream, body) = response.into_parts();

        tracing::debug!(
            status = %upstream.status,
            headers = ?upstream.headers,
            "Response from resolver"
        );

        let headers = relay_headers(&upstream.headers);

        if upstream.status != StatusCode::TEMPORARY_REDIRECT {
            metrics::record_redirect("passthrough");
            return Ok(build_response(upstream.status, headers, Body::new(body)));
        }

        let device = header_or_empty(&parts.headers, X_WEBPA_DEVICE_NAME);
        self.rewrite_redirect(upstream.status, headers, body, &scheme, device)
            .await
            .inspect_err(|_| metrics::record_redirect("failed"))
    }

    async fn rewrite_redirect(
        &self,
        status: StatusCode,
        mut headers: HeaderMap,
        body: Incoming,
        scheme: &str,
        device: &str,
    ) -> Result<Response, GatewayError> {
        let location = headers
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(GatewayError::MissingLocation)?
            .to_string();

        let rewritten = rewrite_location(&location, &self.rule, scheme)?.to_string();

        let body = axum::body::to_bytes(Body::new(body), self.max_body_bytes)
            .await
            .map_err(GatewayError::Body)?;
        let body = rewrite_first_quoted(&body, &rewritten);

        tracing::info!(
            from = %location,
            to = %rewritten,
            device = %device,
            "Redirecting to rewritten Location"
        );

        headers.insert(LOCATION, HeaderValue::from_str(&rewritten)?);
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        metrics::record_redirect("rewritten");

        Ok(build_response(status, headers, Body::from(body)))
    }
}

fn build_response(status: StatusCode, headers: HeaderMap, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

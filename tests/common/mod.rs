//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::Request;
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;

use redirect_rewriter::config::GatewayConfig;
use redirect_rewriter::http::HttpServer;
use redirect_rewriter::lifecycle::Shutdown;
use redirect_rewriter::observability::ErrorTracker;

pub const REDIRECT_BODY: &str =
    "<a href=\"http://internal-node-1:6200/api/v2/device\">Temporary Redirect</a>.\n";

/// A request seen by a mock backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

pub type Log = Arc<Mutex<Vec<Recorded>>>;

type Responder = Arc<dyn Fn(&Recorded) -> Response + Send + Sync>;

/// Start a mock backend on an ephemeral port answering with `respond`.
pub async fn start_backend<F>(respond: F) -> (SocketAddr, Log)
where
    F: Fn(&Recorded) -> Response + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log = serve_backend(listener, respond);
    (addr, log)
}

/// Serve a mock backend on an already bound listener.
pub fn serve_backend<F>(listener: TcpListener, respond: F) -> Log
where
    F: Fn(&Recorded) -> Response + Send + Sync + 'static,
{
    let log: Log = Default::default();
    let respond: Responder = Arc::new(respond);
    let recorder = log.clone();

    let app = Router::new().fallback(move |request: Request| {
        let log = recorder.clone();
        let respond = respond.clone();
        async move {
            let (parts, body) = request.into_parts();
            let body = axum::body::to_bytes(body, 1024 * 1024).await.unwrap_or_default();
            let recorded = Recorded {
                method: parts.method,
                path: parts.uri.path().to_string(),
                query: parts.uri.query().map(String::from),
                headers: parts.headers,
                body: body.to_vec(),
            };
            let response = respond(&recorded);
            log.lock().unwrap().push(recorded);
            response
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    log
}

/// A loopback address nothing listens on.
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Gateway config pointed at `resolver` with the `internal-node-` → `ext` rule.
pub fn gateway_config(resolver: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.resolver.endpoint = format!("http://{}", resolver);
    config.rewrite.internal_pattern = "internal-node-".into();
    config.rewrite.external_replacement = "ext".into();
    config.rewrite.domain = "example.com".into();
    config.observability.metrics_enabled = false;
    config.timeouts.request_secs = 10;
    config
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let server = HttpServer::new(config).expect("gateway config");
    run_gateway(server).await
}

pub async fn start_gateway_with_tracker(
    config: GatewayConfig,
    errors: Arc<dyn ErrorTracker>,
) -> (SocketAddr, Shutdown) {
    let server = HttpServer::with_error_tracker(config, errors).expect("gateway config");
    run_gateway(server).await
}

async fn run_gateway(server: HttpServer) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

//! Redirect Rewriter
//!
//! HTTP gateway in front of the discovery resolver.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                REDIRECT REWRITER                 │
//!                        │                                                  │
//!   Device GET           │  ┌──────────┐   ┌───────────┐   ┌────────────┐   │
//!   ─────────────────────┼─▶│  server  │──▶│ forwarder │──▶│  resolver  │───┼──▶ Resolver
//!                        │  │ + authz  │   │  + scheme │   │   client   │   │
//!                        │  └──────────┘   └─────┬─────┘   └─────┬──────┘   │
//!                        │                       │               │          │
//!                        │                       ▼               ▼          │
//!                        │               ┌─────────────┐  ┌────────────┐    │
//!                        │               │  resource   │  │  rewrite   │    │
//!                        │               │  publisher  │  │ Location + │    │
//!                        │               │ (soft fail) │  │    body    │    │
//!                        │               └──────┬──────┘  └─────┬──────┘    │
//!   307 (public node)    │                      ▼               │          │
//!   ◀────────────────────┼──────────────── Resource store ◀─────┘          │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use redirect_rewriter::config::{read_config, validate_config, ConfigError, GatewayConfig};
use redirect_rewriter::lifecycle::{self, Shutdown};
use redirect_rewriter::observability::{errors::error_chain, logging};

#[derive(Parser)]
#[command(name = "redirect-rewriter")]
#[command(about = "Gateway rewriting discovery redirects to public node names", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "REDIRECT_REWRITER_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(long)]
    bind_address: Option<String>,

    /// Override `observability.log_level`.
    #[arg(long)]
    log_level: Option<String>,

    /// Validate the configuration, print it and exit.
    #[arg(long)]
    check_config: bool,
}

fn load(cli: &Cli) -> Result<GatewayConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind_address) = &cli.bind_address {
        config.listener.bind_address = bind_address.clone();
    }
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("redirect-rewriter: {}", e);
            std::process::exit(2);
        }
    };

    if cli.check_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    logging::init(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "redirect-rewriter starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        resolver = %config.resolver.endpoint,
        internal_pattern = %config.rewrite.internal_pattern,
        external_replacement = %config.rewrite.external_replacement,
        domain = %config.rewrite.domain,
        fixed_scheme = ?config.rewrite.fixed_scheme,
        resource_update = config.resource_update.enabled,
        enforce_authorization = config.authorization.enforce,
        "Configuration loaded"
    );
    tracing::debug!(config = ?config, "Effective configuration");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    if let Err(e) = lifecycle::start(config, shutdown).await {
        tracing::error!(error = %error_chain(&e), "Fatal startup error");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

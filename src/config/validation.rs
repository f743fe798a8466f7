//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoints, schemes and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::Uri;
use thiserror::Error;

use crate::config::schema::GatewayConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("{:?} is not a socket address", config.listener.bind_address),
        ));
    }

    if let Err(message) = check_resolver_endpoint(&config.resolver.endpoint) {
        errors.push(ValidationError::new("resolver.endpoint", message));
    }

    if config.rewrite.internal_pattern.is_empty() {
        errors.push(ValidationError::new("rewrite.internal_pattern", "must not be empty"));
    }
    if config.rewrite.domain.is_empty() {
        errors.push(ValidationError::new("rewrite.domain", "must not be empty"));
    }
    match config.rewrite.fixed_scheme.as_deref() {
        None | Some("") | Some("http") | Some("https") => {}
        Some(other) => errors.push(ValidationError::new(
            "rewrite.fixed_scheme",
            format!("invalid scheme {:?}, expected \"http\" or \"https\"", other),
        )),
    }

    if config.resource_update.enabled {
        match url::Url::parse(&config.resource_update.endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => errors.push(ValidationError::new(
                "resource_update.endpoint",
                format!("{:?} is not an http(s) URL", config.resource_update.endpoint),
            )),
        }
    }

    if config.health_check.attempts == 0 {
        errors.push(ValidationError::new("health_check.attempts", "must be at least 1"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::new("limits.max_body_bytes", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_resolver_endpoint(endpoint: &str) -> Result<(), String> {
    let uri: Uri = endpoint
        .parse()
        .map_err(|e| format!("{:?} is not a URI: {}", endpoint, e))?;
    if uri.scheme_str() != Some("http") {
        return Err(format!("{:?} must use the http scheme", endpoint));
    }
    if uri.authority().is_none() {
        return Err(format!("{:?} has no host", endpoint));
    }
    if !matches!(uri.path(), "" | "/") {
        return Err(format!("{:?} must not carry a path", endpoint));
    }
    Ok(())
}

//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::rewrite::RewriteRule;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Resolver the discovery requests are forwarded to.
    pub resolver: ResolverConfig,

    /// Internal → external name translation.
    pub rewrite: RewriteRule,

    /// Device metadata side channel.
    pub resource_update: ResourceUpdateConfig,

    /// Authorization header enforcement.
    pub authorization: AuthorizationConfig,

    /// Startup reachability check of the resolver.
    pub health_check: HealthCheckConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Body size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:6400").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:6400".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Base URI of the resolver, e.g. "http://petasos:6400".
    pub endpoint: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:6401".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourceUpdateConfig {
    /// Publish device metadata before forwarding.
    pub enabled: bool,

    /// Base URL; the device id is appended as the last path segment.
    pub endpoint: String,

    /// Timeout for the whole PUT in seconds.
    pub timeout_secs: u64,
}

impl Default for ResourceUpdateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthorizationConfig {
    /// Reject requests without an `Authorization` header with 400.
    pub enforce: bool,
}

/// Startup health check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Number of probes before giving up.
    pub attempts: u32,

    /// Fixed delay between probes in milliseconds.
    pub delay_ms: u64,

    /// Timeout for a single probe in seconds.
    pub timeout_secs: u64,

    /// Device name sent with the probe; the resolver refuses requests without one.
    pub device_name: String,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            attempts: 10,
            delay_ms: 1000,
            timeout_secs: 5,
            device_name: "mac:223344556677".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest redirect body the gateway buffers for rewriting.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub log_json: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

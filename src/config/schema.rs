//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the forms filter proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (port, bind address, display host).
    pub listener: ListenerConfig,

    /// Upstream forms API settings.
    pub upstream: UpstreamConfig,

    /// Pagination defaults for the filtered endpoint.
    pub pagination: PaginationConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Listen port.
    pub port: u16,

    /// IP address to bind (e.g., "0.0.0.0").
    pub bind_address: String,

    /// Base URL shown in startup logs. Never used for binding.
    pub host: String,
}

impl ListenerConfig {
    /// Socket address string handed to the TCP listener.
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Human-facing URL of the service.
    pub fn display_url(&self) -> String {
        format!("{}:{}", self.host.trim_end_matches('/'), self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: "0.0.0.0".to_string(),
            host: "http://localhost".to_string(),
        }
    }
}

/// Upstream forms API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the forms API (scheme + host, optional path prefix).
    pub base_url: String,

    /// Total timeout for the submissions call in seconds.
    pub timeout_secs: u64,

    /// Query parameters passed through to the submissions call.
    pub forwarded_params: Vec<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.fillout.com".to_string(),
            timeout_secs: 30,
            forwarded_params: vec![
                "afterDate".to_string(),
                "beforeDate".to_string(),
                "status".to_string(),
                "includeEditLink".to_string(),
                "sort".to_string(),
                "search".to_string(),
            ],
        }
    }
}

/// Pagination configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when `limit` is absent or invalid.
    pub default_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { default_limit: 150 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

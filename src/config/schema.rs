//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the forwarder.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the forwarder.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ForwarderConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream target resolution and mount point.
    pub upstream: UpstreamConfig,

    /// Inbound request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream configuration.
///
/// The base URL is normally read from the environment on every request, so
/// changing `INTERNAL_API_URL` takes effect without a restart. Setting
/// `base_url` pins it instead.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Public path prefix stripped before forwarding (e.g., "/api/op").
    pub mount_prefix: String,

    /// Preferred environment variable holding the base URL.
    pub url_env: String,

    /// Environment variable consulted when `url_env` is unset.
    pub fallback_url_env: String,

    /// Fixed base URL. Disables environment lookups when set.
    pub base_url: Option<String>,

    /// Total upstream request timeout in seconds. Unset uses the client default.
    pub timeout_secs: Option<u64>,

    /// Upstream connect timeout in seconds. Unset uses the client default.
    pub connect_timeout_secs: Option<u64>,
}

impl UpstreamConfig {
    /// Mount prefix without a trailing slash.
    pub fn mount_prefix(&self) -> &str {
        self.mount_prefix.trim_end_matches('/')
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            mount_prefix: "/api/op".to_string(),
            url_env: "INTERNAL_API_URL".to_string(),
            fallback_url_env: "API_URL".to_string(),
            base_url: None,
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

/// Inbound request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound request body size in bytes.
    pub max_request_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_body_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output for development.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

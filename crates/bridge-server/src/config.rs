//! Dispatcher and serve-loop configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the dispatcher and serve loop.
///
/// This is deliberately small: there is no bind address, no rate limiting,
/// no TLS here — the host connection is always stdio, and backend-dial TLS
/// is `bridge-backend`'s concern (§4.3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Server name advertised during `initialize`.
    pub name: String,
    /// Server version advertised during `initialize`.
    pub version: String,
    /// Server description, surfaced in logs only.
    pub description: Option<String>,
    /// Per-call timeout policy.
    pub timeouts: TimeoutConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Timeout policy for backend calls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Default per-call deadline.
    pub default_call_timeout: Duration,
    /// Deadline for long-running calls (e.g. `weave`).
    pub long_call_timeout: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default_call_timeout: Duration::from_secs(30),
            long_call_timeout: Duration::from_secs(5 * 60),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Tracing env-filter directive, e.g. `"info"` or `"bridge_server=debug"`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            name: crate::SERVER_NAME.to_string(),
            version: crate::SERVER_VERSION.to_string(),
            description: None,
            timeouts: TimeoutConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

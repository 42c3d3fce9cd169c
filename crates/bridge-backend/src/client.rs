//! Backend RPC transport: one HTTP(S) POST per RPC method (§6.2).

use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{BackendError, BackendResult};

/// Default per-call deadline (§4.3).
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);
/// Deadline for the long-running `weave` tool (§4.3).
pub const LONG_CALL_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// TLS posture for dialing the backend. Plaintext is the development
/// default; TLS is opt-in via configuration (§4.3).
#[derive(Debug, Clone, Default)]
pub enum BackendTls {
    /// No TLS; plain HTTP. Development default.
    #[default]
    Plaintext,
    /// TLS using the system trust store.
    SystemTrustStore,
    /// TLS trusting an additional caller-supplied CA certificate (PEM).
    CustomCa(PathBuf),
    /// TLS with certificate verification disabled. Explicit opt-in only.
    SkipVerify,
}

/// Configuration for dialing the backend.
#[derive(Debug, Clone)]
pub struct BackendClientConfig {
    /// Base URL of the backend RPC surface, e.g. `http://localhost:8787`.
    pub base_url: String,
    /// TLS posture.
    pub tls: BackendTls,
}

/// A thin HTTP(S) JSON-RPC-by-POST client to the backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client from the given configuration.
    pub fn new(config: BackendClientConfig) -> BackendResult<Self> {
        let mut builder = reqwest::Client::builder();
        builder = match &config.tls {
            BackendTls::Plaintext | BackendTls::SystemTrustStore => builder,
            BackendTls::CustomCa(path) => {
                let pem = std::fs::read(path)
                    .map_err(|e| BackendError::Dial(format!("reading CA cert {path:?}: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&pem)
                    .map_err(|e| BackendError::Dial(format!("parsing CA cert {path:?}: {e}")))?;
                builder.add_root_certificate(cert)
            }
            BackendTls::SkipVerify => {
                warn!("backend TLS verification disabled; do not use in production");
                builder.danger_accept_invalid_certs(true)
            }
        };
        let http = builder
            .build()
            .map_err(|e| BackendError::Dial(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Invoke one backend RPC method with the given request body, honoring
    /// `timeout` and `cancel` — whichever fires first wins (§4.3).
    pub async fn call(
        &self,
        method: &str,
        body: Value,
        timeout: Duration,
        cancel: Option<&CancellationToken>,
    ) -> BackendResult<Value> {
        let url = format!("{}/{method}", self.base_url.trim_end_matches('/'));
        let request = self.http.post(&url).json(&body).send();

        let response = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        return Err(BackendError::Cancelled { method: method.to_string() });
                    }
                    result = tokio::time::timeout(timeout, request) => {
                        result.map_err(|_| BackendError::Cancelled { method: method.to_string() })?
                    }
                }
            }
            None => tokio::time::timeout(timeout, request)
                .await
                .map_err(|_| BackendError::Cancelled {
                    method: method.to_string(),
                })?,
        };

        let response = response.map_err(|source| BackendError::Transport {
            method: method.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Rejected {
                method: method.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| BackendError::Decode {
                method: method.to_string(),
                detail: e.to_string(),
            })?;
        debug!(method, "backend call succeeded");
        Ok(value)
    }
}

//! Error type for the backend bridge (§3.1).

use thiserror::Error;

/// Failure modes surfaced by [`crate::client::BackendClient`] and
/// [`crate::bridge::BackendBridge`].
#[derive(Debug, Error)]
pub enum BackendError {
    /// Failed to construct the HTTP client (bad CA cert, bad URL, ...).
    #[error("failed to configure backend client: {0}")]
    Dial(String),

    /// The RPC transport itself failed (connection refused, DNS, TLS...).
    #[error("backend RPC transport error calling {method}: {source}")]
    Transport {
        /// The backend method that was being invoked.
        method: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The backend responded with a non-success status.
    #[error("backend rejected {method} with status {status}: {body}")]
    Rejected {
        /// The backend method that was being invoked.
        method: String,
        /// HTTP status code returned.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// The call exceeded its deadline, or the parent context was cancelled
    /// first.
    #[error("backend call to {method} was cancelled or timed out")]
    Cancelled {
        /// The backend method that was being invoked.
        method: String,
    },

    /// No dispatch-table entry exists for the requested tool name.
    #[error("unknown tool: {name}")]
    UnknownTool {
        /// The requested tool name.
        name: String,
    },

    /// The response body did not decode into the expected shape.
    #[error("failed to decode response from {method}: {detail}")]
    Decode {
        /// The backend method that was being invoked.
        method: String,
        /// Decode failure detail.
        detail: String,
    },
}

/// Result alias for backend bridge operations.
pub type BackendResult<T> = Result<T, BackendError>;

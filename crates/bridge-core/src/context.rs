//! Per-request context threaded through handler invocation.
//!
//! # Examples
//!
//! ```
//! use bridge_core::RequestContext;
//!
//! let ctx = RequestContext::new("tools/call");
//! assert_eq!(ctx.method, "tools/call");
//! assert!(!ctx.request_id.is_empty());
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::types::Timestamp;

/// Context a handler is invoked with. Carries enough identity for logging
/// and enough control surface (the cancellation token) for a handler to
/// observe serve-loop cancellation without polling.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this dispatch, independent of the wire request id.
    pub request_id: String,
    /// Method name being dispatched, for span/log correlation.
    pub method: String,
    /// Wall-clock time the context was created.
    pub timestamp: Timestamp,
    /// Monotonic start time, for elapsed-time measurement.
    pub start_time: Instant,
    /// Free-form metadata (e.g. `"transport" -> "stdio"`).
    pub metadata: Arc<HashMap<String, serde_json::Value>>,
    /// Cancellation token mirroring the serve loop's shutdown signal.
    pub cancellation_token: Option<CancellationToken>,
}

impl RequestContext {
    /// Create a new context for the given method.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            method: method.into(),
            timestamp: Timestamp::now(),
            start_time: Instant::now(),
            metadata: Arc::new(HashMap::new()),
            cancellation_token: None,
        }
    }

    /// Attach a cancellation token propagated from the serve loop.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Attach one metadata entry, replacing the shared map.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        let mut map = (*self.metadata).clone();
        map.insert(key.into(), value.into());
        self.metadata = Arc::new(map);
        self
    }

    /// True once the associated cancellation signal has fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation_token
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Elapsed time since context creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Outcome of a completed dispatch, used for the logging policy (§7 ambient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseStatus {
    /// The handler completed successfully.
    Success,
    /// The handler (or the dispatcher) failed with a JSON-RPC error code.
    Error {
        /// Wire error code.
        code: i32,
    },
    /// The request was cancelled before completion.
    Cancelled,
}

/// Summary of a completed dispatch, used only for logging at the call site.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    /// The originating request's id.
    pub request_id: String,
    /// How long the dispatch took.
    pub duration: Duration,
    /// The outcome.
    pub status: ResponseStatus,
}

impl ResponseContext {
    /// Build a success summary.
    #[must_use]
    pub fn success(request_id: impl Into<String>, duration: Duration) -> Self {
        Self {
            request_id: request_id.into(),
            duration,
            status: ResponseStatus::Success,
        }
    }

    /// Build an error summary.
    #[must_use]
    pub fn error(request_id: impl Into<String>, duration: Duration, code: i32) -> Self {
        Self {
            request_id: request_id.into(),
            duration,
            status: ResponseStatus::Error { code },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_has_unique_id_and_no_cancellation() {
        let ctx = RequestContext::new("ping");
        assert!(!ctx.request_id.is_empty());
        assert!(!ctx.is_cancelled());
    }

    #[test]
    fn cancellation_token_reflects_cancel() {
        let token = CancellationToken::new();
        let ctx = RequestContext::new("tools/call").with_cancellation(token.clone());
        assert!(!ctx.is_cancelled());
        token.cancel();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn metadata_round_trips() {
        let ctx = RequestContext::new("initialize").with_metadata("transport", "stdio");
        assert_eq!(
            ctx.metadata.get("transport").and_then(|v| v.as_str()),
            Some("stdio")
        );
    }
}

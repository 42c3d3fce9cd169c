//! Dispatch error types and wire error-code mapping.

/// Result type for dispatcher operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Errors the dispatcher itself can raise, independent of handler failures.
///
/// Handler failures are folded in at the call site (`Dispatcher::handle`) via
/// [`DispatchError::from_handler`], since a handler's own error type lives in
/// whichever crate owns it (`bridge_backend::BackendError`, etc.).
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The frame was not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// The frame was valid JSON but not a well-formed JSON-RPC request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No handler is registered for this method.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// The method was known but its params did not match what the handler expects.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// A handler failed in a way that carries no more specific wire code.
    #[error("internal error: {0}")]
    Internal(String),

    /// A handler panicked; the dispatcher caught it and is reporting it as
    /// an internal error without re-raising.
    #[error("handler panicked: {0}")]
    HandlerPanicked(String),

    /// An application-defined error in the -32000..-32099 range.
    #[error("{message}")]
    Application {
        /// The application error code (-32000..-32099).
        code: i32,
        /// Human-readable message.
        message: String,
    },
}

impl DispatchError {
    /// The wire-exact JSON-RPC error code for this error (§4.1/§7).
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Parse(_) => -32700,
            Self::InvalidRequest(_) => -32600,
            Self::MethodNotFound(_) => -32601,
            Self::InvalidParams(_) => -32602,
            Self::Internal(_) | Self::HandlerPanicked(_) => -32603,
            Self::Application { code, .. } => *code,
        }
    }
}

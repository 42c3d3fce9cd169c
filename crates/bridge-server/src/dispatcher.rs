//! JSON-RPC dispatcher: decode a frame, route it to one registered handler
//! by method name, emit at most one response frame.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bridge_core::RequestContext;
use bridge_protocol::jsonrpc::{
    JsonRpcError, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
};
use bridge_protocol::{
    Implementation, InitializeRequest, InitializeResult, ResourcesCapability, ServerCapabilities,
    ToolsCapability, methods,
};
use futures::FutureExt;
use serde_json::{Value, json};
use tracing::{debug, error, warn};

use crate::error::DispatchError;

/// One registered method handler.
///
/// Params are untyped `Value`; each handler deserializes its own expected
/// shape and returns `DispatchError::InvalidParams` on mismatch. This is the
/// generic method-table seam the dispatcher routes through — the specific
/// tool-name dispatch table (`bridge-backend`) is a different, inner layer
/// reached only through the `tools/call` handler.
#[async_trait]
pub trait MethodHandler: Send + Sync {
    /// Handle one call, returning the JSON-RPC `result` value on success.
    async fn handle(&self, params: Option<Value>, ctx: &RequestContext) -> Result<Value, DispatchError>;
}

/// Connection state, advanced by `initialize` and queried by handlers that
/// need to know whether the client identity has been established (§4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No `initialize` call has completed yet.
    Uninit,
    /// `initialize` has completed; normal operation.
    Ready,
    /// The transport has closed.
    Closed,
}

/// Decodes frames, routes them by method name, and encodes at most one
/// response frame per request.
pub struct Dispatcher {
    server_name: String,
    server_version: String,
    extensions: HashMap<String, Value>,
    methods: HashMap<String, Arc<dyn MethodHandler>>,
    ready: AtomicBool,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("server_name", &self.server_name)
            .field("server_version", &self.server_version)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Dispatcher {
    /// Construct a dispatcher advertising the given identity and extension map.
    #[must_use]
    pub fn new(
        server_name: impl Into<String>,
        server_version: impl Into<String>,
        extensions: HashMap<String, Value>,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            server_version: server_version.into(),
            extensions,
            methods: HashMap::new(),
            ready: AtomicBool::new(false),
        }
    }

    /// Register a handler for an additional method. Registration is
    /// process-private and never exposed on the wire.
    pub fn register(&mut self, method: impl Into<String>, handler: Arc<dyn MethodHandler>) {
        self.methods.insert(method.into(), handler);
    }

    /// Current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        if self.ready.load(Ordering::Acquire) {
            ConnectionState::Ready
        } else {
            ConnectionState::Uninit
        }
    }

    /// Decode one frame and produce at most one response frame.
    ///
    /// Returns `None` for notifications (including unknown-method
    /// notifications, which are silently ignored per JSON-RPC semantics).
    pub async fn handle(&self, frame: &str) -> Option<String> {
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(frame) {
            if !map.contains_key("method") && !map.contains_key("result") && !map.contains_key("error") {
                // Missing `method` makes this neither a valid request/notification nor a
                // response; the untagged `JsonRpcMessage` enum would otherwise happily
                // parse it as an all-fields-absent `Response` and we'd silently drop it.
                let id = map
                    .get("id")
                    .and_then(|v| serde_json::from_value(v.clone()).ok());
                warn!("inbound frame is missing method");
                let response = JsonRpcResponse::error(JsonRpcError::invalid_request("missing method"), id);
                return serde_json::to_string(&response).ok();
            }
        }

        match serde_json::from_str::<JsonRpcMessage>(frame) {
            Ok(JsonRpcMessage::Request(req)) => {
                Some(self.handle_request(req).await)
            }
            Ok(JsonRpcMessage::RequestBatch(batch)) => {
                let mut responses = Vec::with_capacity(batch.len());
                for req in batch {
                    responses.push(self.handle_request(req).await);
                }
                serde_json::to_string(&responses).ok()
            }
            Ok(JsonRpcMessage::Notification(note)) => {
                self.handle_notification(note).await;
                None
            }
            Ok(JsonRpcMessage::Response(_) | JsonRpcMessage::ResponseBatch(_)) => None,
            Ok(JsonRpcMessage::MessageBatch(_)) => None,
            Err(err) => {
                warn!(error = %err, "failed to parse inbound frame");
                let response = JsonRpcResponse::error(JsonRpcError::parse_error(err.to_string()), None);
                serde_json::to_string(&response).ok()
            }
        }
    }

    async fn handle_request(&self, req: JsonRpcRequest) -> String {
        let start = std::time::Instant::now();
        let method = req.method.clone();
        let ctx = RequestContext::new(method.clone());

        let result = self.dispatch_one(&req.method, req.params.clone(), &ctx).await;
        let response = match result {
            Ok(value) => {
                debug!(method = %method, elapsed_ms = start.elapsed().as_millis(), "dispatch succeeded");
                JsonRpcResponse::success(value, req.id)
            }
            Err(err) => {
                let code = err.code();
                if code == -32603 {
                    error!(method = %method, error = %err, "dispatch failed internally");
                } else {
                    warn!(method = %method, code, error = %err, "dispatch failed");
                }
                JsonRpcResponse::error(
                    JsonRpcError {
                        code,
                        message: err.to_string(),
                        data: None,
                    },
                    Some(req.id),
                )
            }
        };
        serde_json::to_string(&response).unwrap_or_else(|_| {
            let fallback = JsonRpcResponse::error(
                JsonRpcError::internal_error("failed to serialize response"),
                None,
            );
            serde_json::to_string(&fallback).unwrap_or_default()
        })
    }

    async fn handle_notification(&self, note: JsonRpcNotification) {
        if note.method == methods::INITIALIZED {
            debug!("client acknowledged initialization");
            return;
        }
        debug!(method = %note.method, "ignoring notification with no registered effect");
    }

    async fn dispatch_one(
        &self,
        method: &str,
        params: Option<Value>,
        ctx: &RequestContext,
    ) -> Result<Value, DispatchError> {
        match method {
            methods::INITIALIZE => self.handle_initialize(params),
            methods::PING => Ok(json!({})),
            _ => {
                let Some(handler) = self.methods.get(method).cloned() else {
                    return Err(DispatchError::MethodNotFound(method.to_string()));
                };
                match AssertUnwindSafe(handler.handle(params, ctx)).catch_unwind().await {
                    Ok(result) => result,
                    Err(panic) => {
                        let message = panic_message(&panic);
                        error!(method = %method, panic = %message, "handler panicked");
                        Err(DispatchError::HandlerPanicked(message))
                    }
                }
            }
        }
    }

    fn handle_initialize(&self, params: Option<Value>) -> Result<Value, DispatchError> {
        let request: InitializeRequest = match params {
            Some(value) => serde_json::from_value(value)
                .map_err(|err| DispatchError::InvalidParams(err.to_string()))?,
            None => return Err(DispatchError::InvalidParams("missing params".to_string())),
        };

        if request.protocol_version != bridge_protocol::PROTOCOL_VERSION {
            warn!(
                client_version = %request.protocol_version,
                server_version = %bridge_protocol::PROTOCOL_VERSION,
                "protocol version mismatch; continuing anyway"
            );
        }

        self.ready.store(true, Ordering::Release);

        let result = InitializeResult {
            protocol_version: bridge_protocol::PROTOCOL_VERSION.to_string(),
            server_info: Implementation {
                name: self.server_name.clone(),
                version: self.server_version.clone(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: Some(ResourcesCapability {
                    list_changed: Some(true),
                }),
            },
            extensions: self.extensions.clone(),
        };

        serde_json::to_value(result).map_err(|err| DispatchError::Internal(err.to_string()))
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

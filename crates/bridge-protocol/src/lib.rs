//! # Bridge Protocol
//!
//! Wire-format types for the protocol bridge: the JSON-RPC 2.0 envelope
//! (`jsonrpc`) and the MCP message shapes carried inside it (`types`) —
//! tool/resource records, initialize handshake, content blocks.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all
)]
#![deny(unsafe_code)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod jsonrpc;
pub mod types;

pub use jsonrpc::{
    JsonRpcError, JsonRpcErrorCode, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    JsonRpcVersion, RequestId,
};
pub use types::{
    CallToolRequest, CallToolResult, ClientCapabilities, ContentBlock, Implementation,
    InitializeRequest, InitializeResult, ListResourcesResult, ListToolsResult, ReadResourceRequest,
    ReadResourceResult, Resource, ResourceContents, ResourceMeta, ResourcesCapability,
    ServerCapabilities, TextContent, Tool, ToolAnnotations, ToolInputSchema, ToolMeta,
    ToolUiMeta, ToolsCapability,
};

/// Current MCP protocol version this bridge speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Well-known extension key advertised in `initialize` (§6.4).
pub const UI_APPS_EXTENSION: &str = "ui-apps";

/// Protocol method names used as dispatch-table keys.
pub mod methods {
    /// Initialize handshake method.
    pub const INITIALIZE: &str = "initialize";
    /// Initialized acknowledgement notification.
    pub const INITIALIZED: &str = "notifications/initialized";
    /// Liveness check method.
    pub const PING: &str = "ping";
    /// List available tools.
    pub const LIST_TOOLS: &str = "tools/list";
    /// Call a tool.
    pub const CALL_TOOL: &str = "tools/call";
    /// List available resources.
    pub const LIST_RESOURCES: &str = "resources/list";
    /// Read a resource.
    pub const READ_RESOURCE: &str = "resources/read";
    /// Resource list changed notification.
    pub const RESOURCE_LIST_CHANGED: &str = "notifications/resources/list_changed";
}

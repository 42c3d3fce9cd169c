//! Core MCP protocol types: initialization, tools, resources, content blocks.
//!
//! Field names follow the wire's camelCase convention via explicit
//! `#[serde(rename = "...")]` annotations rather than a blanket
//! `rename_all`, so each rename is visible at its declaration site.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity of either peer in the `initialize` handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Implementation {
    /// Implementation name.
    pub name: String,
    /// Implementation version string.
    pub version: String,
}

/// `initialize` request params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeRequest {
    /// Protocol version the client was built against.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Client identity.
    #[serde(rename = "clientInfo")]
    pub client_info: Implementation,
    /// Client-declared capabilities.
    #[serde(default)]
    pub capabilities: ClientCapabilities,
}

/// `initialize` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    /// Protocol version the server speaks.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server identity.
    #[serde(rename = "serverInfo")]
    pub server_info: Implementation,
    /// Server-declared capabilities.
    pub capabilities: ServerCapabilities,
    /// Non-standard extension advertisement (§6.4): maps extension name to
    /// an arbitrary descriptor object, e.g. `{"ui-apps": {}}`.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extensions: HashMap<String, serde_json::Value>,
}

/// Capabilities a client may declare in `initialize` params.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientCapabilities {
    /// Non-standard extension advertisement mirroring [`InitializeResult::extensions`].
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extensions: HashMap<String, serde_json::Value>,
}

/// Capabilities the server declares in `initialize` results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tool-related capability flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
    /// Resource-related capability flags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourcesCapability>,
}

/// Tool list capability flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsCapability {
    /// Whether the server emits `notifications/tools/list_changed`.
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Resource list capability flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcesCapability {
    /// Whether the server emits `notifications/resources/list_changed`.
    #[serde(rename = "listChanged", skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Advisory booleans hosts use to decide confirmation prompts (§3).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolAnnotations {
    /// The tool only reads state.
    #[serde(rename = "readOnlyHint", skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    /// The tool may destroy data irreversibly.
    #[serde(rename = "destructiveHint", skip_serializing_if = "Option::is_none")]
    pub destructive: Option<bool>,
    /// Calling the tool twice with the same args has the same effect as once.
    #[serde(rename = "idempotentHint", skip_serializing_if = "Option::is_none")]
    pub idempotent: Option<bool>,
    /// The tool interacts with an open-ended, non-enumerable world.
    #[serde(rename = "openWorldHint", skip_serializing_if = "Option::is_none")]
    pub open_world: Option<bool>,
}

/// UI-resource link embedded in a tool's `meta.ui` (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolUiMeta {
    /// URI of the UI resource that visualizes this tool's output.
    #[serde(rename = "resourceUri")]
    pub resource_uri: String,
    /// Who the tool is offered to: subset of `{"model", "app"}`.
    pub visibility: Vec<String>,
}

/// Extension metadata attached to a tool definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolMeta {
    /// UI-resource link, if this tool has a viewer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui: Option<ToolUiMeta>,
}

/// JSON-Schema-shaped description of a tool's input object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputSchema {
    /// Always `"object"`.
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Property schemas keyed by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, serde_json::Value>>,
    /// Required property names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl Default for ToolInputSchema {
    fn default() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: None,
            required: None,
        }
    }
}

/// A named, schema-typed operation the host can invoke (§3, GLOSSARY).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Dispatch key.
    pub name: String,
    /// Human-readable summary shown to the host/user.
    pub description: String,
    /// Input schema.
    #[serde(rename = "inputSchema")]
    pub input_schema: ToolInputSchema,
    /// Confirmation-prompt hints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<ToolAnnotations>,
    /// Extension metadata (UI link).
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<ToolMeta>,
}

/// `tools/list` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResult {
    /// Every registered tool.
    pub tools: Vec<Tool>,
}

/// `tools/call` request params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolRequest {
    /// Name of the tool to invoke.
    pub name: String,
    /// Free-form call arguments, re-encoded per-tool (§4.3).
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// `tools/call` result. `is_error=true` marks a *tool execution* failure,
/// distinct from a JSON-RPC protocol error (§4.1/§7).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolResult {
    /// Output content blocks.
    pub content: Vec<ContentBlock>,
    /// Whether the call failed from the tool's perspective.
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl CallToolResult {
    /// Build a successful result carrying a single text block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(TextContent { text: text.into() })],
            is_error: None,
        }
    }

    /// Build an `isError=true` result carrying a single human-readable message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(TextContent {
                text: message.into(),
            })],
            is_error: Some(true),
        }
    }
}

/// Tagged content carried in tool results and resource contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Plain text.
    #[serde(rename = "text")]
    Text(TextContent),
}

/// Plain-text content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    /// UTF-8 text payload.
    pub text: String,
}

/// Extension metadata attached to a resource (§3): CSP directives,
/// permission requests, display hints, mutability marker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceMeta {
    /// Set only on entries managed through the dynamic partition (§4.4).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic: Option<bool>,
}

/// A UI resource entry's public identity (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Reserved-scheme URI identifying the resource.
    pub uri: String,
    /// Display name.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fixed MIME type for UI resources: `text/html;profile=mcp-app`.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Extension metadata.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResourceMeta>,
}

/// `resources/list` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResourcesResult {
    /// Every visible resource (embedded ∪ dynamic, deduplicated by URI).
    pub resources: Vec<Resource>,
}

/// `resources/read` request params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResourceRequest {
    /// URI of the resource to read.
    pub uri: String,
}

/// `resources/read` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResourceResult {
    /// The resource's content blocks (HTML payload as a single text block).
    pub contents: Vec<ResourceContents>,
}

/// One resource payload entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContents {
    /// URI this payload was read from.
    pub uri: String,
    /// MIME type of the payload.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// UTF-8 text payload (the compiled HTML document).
    pub text: String,
}

//! Translates tool invocations into backend RPCs and exposes the backend's
//! UI-app inventory as MCP resources (§4.3).

use std::collections::HashMap;
use std::sync::Arc;

use base64::Engine;
use bridge_protocol::{
    CallToolResult, ListToolsResult, Resource, ResourceContents, ResourceMeta, Tool,
};
use bridge_ui::UiResourceRegistry;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::catalog::{build_catalog, names};
use crate::client::{BackendClient, DEFAULT_CALL_TIMEOUT, LONG_CALL_TIMEOUT};
use crate::error::{BackendError, BackendResult};

/// Invoked after a UI-app-mutating tool succeeds, to push a best-effort
/// `notifications/resources/list_changed` onto the serve loop. Silently
/// unused if the caller never wires one in (§4.3).
pub type ChangeNotifier = Arc<dyn Fn() + Send + Sync>;

/// Maps tool names to the backend RPC method they invoke plus any
/// pre-processing their arguments need.
pub struct BackendBridge {
    client: BackendClient,
    registry: Arc<UiResourceRegistry>,
    tool_catalog: Vec<Tool>,
    on_resource_list_changed: Option<ChangeNotifier>,
}

impl std::fmt::Debug for BackendBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendBridge")
            .field("tool_count", &self.tool_catalog.len())
            .finish()
    }
}

impl BackendBridge {
    /// Construct a bridge over the given backend client and UI registry.
    #[must_use]
    pub fn new(client: BackendClient, registry: Arc<UiResourceRegistry>) -> Self {
        Self {
            client,
            registry,
            tool_catalog: build_catalog(),
            on_resource_list_changed: None,
        }
    }

    /// Install the resource-change notification hook.
    pub fn set_change_notifier(&mut self, notifier: ChangeNotifier) {
        self.on_resource_list_changed = Some(notifier);
    }

    /// The static tool catalog, built once at construction (§3 Lifecycles).
    #[must_use]
    pub fn list_tools(&self) -> ListToolsResult {
        ListToolsResult {
            tools: self.tool_catalog.clone(),
        }
    }

    /// Dispatch a tool call by name. Unknown names, backend failures, and
    /// validation failures all surface as `isError=true` results rather
    /// than protocol errors (§4.1/§4.3/§7).
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Value,
        cancel: Option<&CancellationToken>,
    ) -> CallToolResult {
        match self.dispatch(name, arguments, cancel).await {
            Ok(result) => result,
            Err(err) => {
                warn!(tool = name, error = %err, "tool call failed");
                CallToolResult::error(err.to_string())
            }
        }
    }

    async fn dispatch(
        &self,
        name: &str,
        arguments: Value,
        cancel: Option<&CancellationToken>,
    ) -> BackendResult<CallToolResult> {
        if !self.tool_catalog.iter().any(|tool| tool.name == name) {
            return Err(BackendError::UnknownTool {
                name: name.to_string(),
            });
        }

        let timeout = if name == names::WEAVE {
            LONG_CALL_TIMEOUT
        } else {
            DEFAULT_CALL_TIMEOUT
        };

        let body = preprocess_arguments(name, arguments)?;
        let response = self.client.call(name, body, timeout, cancel).await?;

        if matches!(name, names::CREATE_APP | names::UPDATE_APP | names::DELETE_APP) {
            if let Some(notifier) = &self.on_resource_list_changed {
                notifier();
            }
        }

        Ok(response_to_tool_result(&response))
    }

    /// Merge embedded and dynamic (backend-reported) resources, local wins
    /// on uri collision (§4.3).
    pub async fn list_resources(&self) -> Vec<Resource> {
        let mut by_uri: HashMap<String, Resource> = self
            .registry
            .list()
            .into_iter()
            .map(|entry| {
                let resource = Resource {
                    uri: entry.uri.clone(),
                    name: entry.name,
                    description: entry.description,
                    mime_type: entry.mime_type,
                    meta: Some(ResourceMeta {
                        dynamic: (!entry.embedded).then_some(true),
                    }),
                };
                (entry.uri, resource)
            })
            .collect();

        match self.client.call("list-resources", json!({}), DEFAULT_CALL_TIMEOUT, None).await {
            Ok(response) => {
                if let Some(resources) = response.get("resources").and_then(Value::as_array) {
                    for item in resources {
                        if let Ok(resource) = serde_json::from_value::<Resource>(item.clone()) {
                            by_uri.entry(resource.uri.clone()).or_insert(resource);
                        }
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "backend list-resources failed; degrading to local registry only");
            }
        }

        let mut resources: Vec<Resource> = by_uri.into_values().collect();
        resources.sort_by(|a, b| a.uri.cmp(&b.uri));
        resources
    }

    /// Read a resource: local registry first, then proxy to the backend
    /// using the uri's short-name component (§4.3).
    pub async fn read_resource(&self, uri: &str) -> BackendResult<ResourceContents> {
        if let Some(html) = self.registry.read(uri) {
            return Ok(ResourceContents {
                uri: uri.to_string(),
                mime_type: bridge_ui::UI_RESOURCE_MIME_TYPE.to_string(),
                text: html,
            });
        }

        let short_name = uri.rsplit('/').next().unwrap_or(uri);
        let response = self
            .client
            .call("read-resource", json!({"name": short_name}), DEFAULT_CALL_TIMEOUT, None)
            .await?;
        let text = response
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Ok(ResourceContents {
            uri: uri.to_string(),
            mime_type: bridge_ui::UI_RESOURCE_MIME_TYPE.to_string(),
            text,
        })
    }
}

fn preprocess_arguments(name: &str, arguments: Value) -> BackendResult<Value> {
    Ok(match name {
        names::REGISTER_TOOL => json!({ "tool": arguments }),
        names::UPLOAD_ARTIFACT => {
            let mut arguments = arguments;
            if let Some(content) = arguments.get("content").and_then(Value::as_str) {
                let encoded = base64::engine::general_purpose::STANDARD.encode(content.as_bytes());
                arguments["content"] = json!(encoded);
            }
            arguments
        }
        _ => arguments,
    })
}

fn response_to_tool_result(response: &Value) -> CallToolResult {
    if let Some(error_message) = response.get("error").and_then(Value::as_str) {
        return CallToolResult::error(error_message);
    }
    let text = serde_json::to_string_pretty(response).unwrap_or_default();
    CallToolResult::text(text)
}

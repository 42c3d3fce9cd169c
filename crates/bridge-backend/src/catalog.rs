//! Static tool catalog assembled once at bridge construction (§4.3).

use std::collections::HashMap;

use bridge_protocol::{Tool, ToolAnnotations, ToolInputSchema, ToolMeta, ToolUiMeta};
use serde_json::json;

/// Wire names of every tool this bridge exposes. Grouped by the backend RPC
/// category they cover (§6.2): agent orchestration, session lifecycle,
/// pattern catalog, tool registry/health, agent management, model
/// listing/switching, workflow execution/scheduling, dynamic-UI app CRUD
/// and component-type discovery, artifact storage.
pub mod names {
    /// Long-running agent orchestration.
    pub const WEAVE: &str = "loom_weave";
    /// Begin a session.
    pub const START_SESSION: &str = "loom_start_session";
    /// End a session.
    pub const END_SESSION: &str = "loom_end_session";
    /// Answer an agent's outstanding clarification request.
    pub const ANSWER_CLARIFICATION: &str = "loom_answer_clarification";
    /// List the known pattern catalog.
    pub const LIST_PATTERNS: &str = "loom_list_patterns";
    /// Register a new backend tool.
    pub const REGISTER_TOOL: &str = "loom_register_tool";
    /// Check backend tool health.
    pub const TOOL_HEALTH: &str = "loom_tool_health";
    /// List known agents.
    pub const LIST_AGENTS: &str = "loom_list_agents";
    /// List available models.
    pub const LIST_MODELS: &str = "loom_list_models";
    /// Switch the active model.
    pub const SWITCH_MODEL: &str = "loom_switch_model";
    /// Run a workflow.
    pub const RUN_WORKFLOW: &str = "loom_run_workflow";
    /// Schedule a workflow for later execution.
    pub const SCHEDULE_WORKFLOW: &str = "loom_schedule_workflow";
    /// Create a dynamic UI app.
    pub const CREATE_APP: &str = "loom_create_app";
    /// Update a dynamic UI app.
    pub const UPDATE_APP: &str = "loom_update_app";
    /// Delete a dynamic UI app.
    pub const DELETE_APP: &str = "loom_delete_app";
    /// List the dynamic-UI component-type catalog.
    pub const LIST_COMPONENT_TYPES: &str = "loom_list_component_types";
    /// Upload a stored artifact.
    pub const UPLOAD_ARTIFACT: &str = "loom_upload_artifact";
}

/// URI of the embedded viewer resource some tools link to via `meta.ui`.
pub const CONVERSATION_VIEWER_URI: &str = "ui://loom/conversation-viewer";

fn annotations(read_only: bool, destructive: bool, idempotent: bool, open_world: bool) -> ToolAnnotations {
    ToolAnnotations {
        read_only: Some(read_only),
        destructive: Some(destructive),
        idempotent: Some(idempotent),
        open_world: Some(open_world),
    }
}

fn ui_linked_meta(visibility: &[&str]) -> ToolMeta {
    ToolMeta {
        ui: Some(ToolUiMeta {
            resource_uri: CONVERSATION_VIEWER_URI.to_string(),
            visibility: visibility.iter().map(|s| (*s).to_string()).collect(),
        }),
    }
}

fn schema(properties: serde_json::Value, required: &[&str]) -> ToolInputSchema {
    let properties = properties
        .as_object()
        .map(|map| {
            map.iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<HashMap<String, serde_json::Value>>()
        })
        .filter(|map| !map.is_empty());
    let required = if required.is_empty() {
        None
    } else {
        Some(required.iter().map(|s| (*s).to_string()).collect())
    };
    ToolInputSchema {
        schema_type: "object".to_string(),
        properties,
        required,
    }
}

/// Build the static list of tool descriptors. Assembled once at
/// construction and never mutated afterward (§3 "Lifecycles").
#[must_use]
pub fn build_catalog() -> Vec<Tool> {
    vec![
        Tool {
            name: names::WEAVE.to_string(),
            description: "Run an agent orchestration session to completion.".to_string(),
            input_schema: schema(
                json!({
                    "prompt": {"type": "string"},
                    "session_id": {"type": "string"},
                }),
                &["prompt"],
            ),
            annotations: Some(annotations(false, false, false, true)),
            meta: Some(ui_linked_meta(&["model", "app"])),
        },
        Tool {
            name: names::START_SESSION.to_string(),
            description: "Start a new agent session.".to_string(),
            input_schema: schema(json!({}), &[]),
            annotations: Some(annotations(false, false, false, false)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::END_SESSION.to_string(),
            description: "End an existing agent session.".to_string(),
            input_schema: schema(json!({"session_id": {"type": "string"}}), &["session_id"]),
            annotations: Some(annotations(false, true, true, false)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::ANSWER_CLARIFICATION.to_string(),
            description: "Answer an agent's outstanding clarification request.".to_string(),
            input_schema: schema(
                json!({"session_id": {"type": "string"}, "answer": {"type": "string"}}),
                &["session_id", "answer"],
            ),
            annotations: Some(annotations(false, false, false, false)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::LIST_PATTERNS.to_string(),
            description: "List the known agent pattern catalog.".to_string(),
            input_schema: schema(json!({}), &[]),
            annotations: Some(annotations(true, false, true, false)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::REGISTER_TOOL.to_string(),
            description: "Register a new tool with the backend tool registry.".to_string(),
            input_schema: schema(
                json!({"name": {"type": "string"}, "schema": {"type": "object"}}),
                &["name", "schema"],
            ),
            annotations: Some(annotations(false, false, false, false)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::TOOL_HEALTH.to_string(),
            description: "Check the health of registered backend tools.".to_string(),
            input_schema: schema(json!({}), &[]),
            annotations: Some(annotations(true, false, true, false)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::LIST_AGENTS.to_string(),
            description: "List known agents and their status.".to_string(),
            input_schema: schema(json!({}), &[]),
            annotations: Some(annotations(true, false, true, false)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::LIST_MODELS.to_string(),
            description: "List available models.".to_string(),
            input_schema: schema(json!({}), &[]),
            annotations: Some(annotations(true, false, true, false)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::SWITCH_MODEL.to_string(),
            description: "Switch the active model for a session.".to_string(),
            input_schema: schema(
                json!({"session_id": {"type": "string"}, "model": {"type": "string"}}),
                &["session_id", "model"],
            ),
            annotations: Some(annotations(false, false, true, false)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::RUN_WORKFLOW.to_string(),
            description: "Run a named workflow.".to_string(),
            input_schema: schema(json!({"workflow": {"type": "string"}}), &["workflow"]),
            annotations: Some(annotations(false, false, false, true)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::SCHEDULE_WORKFLOW.to_string(),
            description: "Schedule a named workflow for later execution.".to_string(),
            input_schema: schema(
                json!({"workflow": {"type": "string"}, "cron": {"type": "string"}}),
                &["workflow", "cron"],
            ),
            annotations: Some(annotations(false, false, false, false)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::CREATE_APP.to_string(),
            description: "Create a dynamic UI app from a declarative spec.".to_string(),
            input_schema: schema(
                json!({"name": {"type": "string"}, "spec": {"type": "object"}, "overwrite": {"type": "boolean"}}),
                &["name", "spec"],
            ),
            annotations: Some(annotations(false, false, false, false)),
            meta: Some(ui_linked_meta(&["app"])),
        },
        Tool {
            name: names::UPDATE_APP.to_string(),
            description: "Replace an existing dynamic UI app's spec.".to_string(),
            input_schema: schema(
                json!({"name": {"type": "string"}, "spec": {"type": "object"}}),
                &["name", "spec"],
            ),
            annotations: Some(annotations(false, false, true, false)),
            meta: Some(ui_linked_meta(&["app"])),
        },
        Tool {
            name: names::DELETE_APP.to_string(),
            description: "Delete a dynamic UI app.".to_string(),
            input_schema: schema(json!({"name": {"type": "string"}}), &["name"]),
            annotations: Some(annotations(false, true, true, false)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::LIST_COMPONENT_TYPES.to_string(),
            description: "List the closed catalog of dynamic-UI component types.".to_string(),
            input_schema: schema(json!({}), &[]),
            annotations: Some(annotations(true, false, true, false)),
            meta: Some(ToolMeta::default()),
        },
        Tool {
            name: names::UPLOAD_ARTIFACT.to_string(),
            description: "Upload a binary artifact to backend storage.".to_string(),
            input_schema: schema(
                json!({"name": {"type": "string"}, "content": {"type": "string"}}),
                &["name", "content"],
            ),
            annotations: Some(annotations(false, false, false, false)),
            meta: Some(ToolMeta::default()),
        },
    ]
}

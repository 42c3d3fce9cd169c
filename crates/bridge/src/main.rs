//! Stdio entrypoint: wires the dispatcher, the backend bridge, and the
//! UI-resource registry together and drives them over stdio until shutdown.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use bridge_backend::{BackendBridge, BackendClient, BackendClientConfig, BackendTls, ChangeNotifier};
use bridge_core::RequestContext;
use bridge_protocol::{
    CallToolRequest, ListResourcesResult, ReadResourceRequest, ReadResourceResult, methods,
};
use bridge_server::{BridgeConfig, Dispatcher, DispatchError, MethodHandler, NotificationSender, ServeLoop, ServerLifecycle};
use bridge_transport::StdioTransport;
use bridge_ui::{ResourceEntry, UiComponent, UiResourceRegistry, UiSpec};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Reserved uri of the conversation-viewer app bundled at startup.
const CONVERSATION_VIEWER_URI: &str = "ui://loom/conversation-viewer";

#[derive(Debug, Parser)]
#[command(name = "bridge", about = "MCP-to-backend protocol bridge")]
struct Cli {
    /// Base URL of the backend RPC surface.
    #[arg(long, env = "BRIDGE_BACKEND_URL", default_value = "http://localhost:8787")]
    backend_url: String,

    /// Path to an additional CA certificate (PEM) to trust when dialing the backend over TLS.
    #[arg(long, env = "BRIDGE_BACKEND_CA_CERT")]
    backend_ca_cert: Option<PathBuf>,

    /// Disable TLS certificate verification when dialing the backend. Development use only.
    #[arg(long, env = "BRIDGE_BACKEND_TLS_SKIP_VERIFY", default_value_t = false)]
    backend_tls_skip_verify: bool,

    /// Tracing env-filter directive, e.g. `info` or `bridge=debug`.
    #[arg(long, env = "BRIDGE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

struct ListToolsHandler {
    bridge: Arc<BackendBridge>,
}

#[async_trait]
impl MethodHandler for ListToolsHandler {
    async fn handle(&self, _params: Option<serde_json::Value>, _ctx: &RequestContext) -> Result<serde_json::Value, DispatchError> {
        let result = self.bridge.list_tools();
        serde_json::to_value(result).map_err(|err| DispatchError::Internal(err.to_string()))
    }
}

struct CallToolHandler {
    bridge: Arc<BackendBridge>,
}

#[async_trait]
impl MethodHandler for CallToolHandler {
    async fn handle(&self, params: Option<serde_json::Value>, ctx: &RequestContext) -> Result<serde_json::Value, DispatchError> {
        let request: CallToolRequest = match params {
            Some(value) => serde_json::from_value(value).map_err(|err| DispatchError::InvalidParams(err.to_string()))?,
            None => return Err(DispatchError::InvalidParams("missing params".to_string())),
        };
        let result = self
            .bridge
            .call_tool(&request.name, request.arguments, ctx.cancellation_token.as_ref())
            .await;
        serde_json::to_value(result).map_err(|err| DispatchError::Internal(err.to_string()))
    }
}

struct ListResourcesHandler {
    bridge: Arc<BackendBridge>,
}

#[async_trait]
impl MethodHandler for ListResourcesHandler {
    async fn handle(&self, _params: Option<serde_json::Value>, _ctx: &RequestContext) -> Result<serde_json::Value, DispatchError> {
        let resources = self.bridge.list_resources().await;
        serde_json::to_value(ListResourcesResult { resources }).map_err(|err| DispatchError::Internal(err.to_string()))
    }
}

struct ReadResourceHandler {
    bridge: Arc<BackendBridge>,
}

#[async_trait]
impl MethodHandler for ReadResourceHandler {
    async fn handle(&self, params: Option<serde_json::Value>, _ctx: &RequestContext) -> Result<serde_json::Value, DispatchError> {
        let request: ReadResourceRequest = match params {
            Some(value) => serde_json::from_value(value).map_err(|err| DispatchError::InvalidParams(err.to_string()))?,
            None => return Err(DispatchError::InvalidParams("missing params".to_string())),
        };
        let contents = self
            .bridge
            .read_resource(&request.uri)
            .await
            .map_err(|err| DispatchError::Application {
                code: -32001,
                message: err.to_string(),
            })?;
        serde_json::to_value(ReadResourceResult { contents: vec![contents] }).map_err(|err| DispatchError::Internal(err.to_string()))
    }
}

fn conversation_viewer_html() -> String {
    let spec = UiSpec {
        version: "1.0".to_string(),
        title: Some("Conversation Viewer".to_string()),
        layout: "stack".to_string(),
        components: vec![UiComponent {
            component_type: "text".to_string(),
            props: Some(serde_json::json!({"content": "Waiting for session activity."})),
            children: None,
            id: None,
        }],
    };
    bridge_ui::compile(&spec).expect("bundled conversation-viewer spec is always valid")
}

fn backend_tls(cli: &Cli) -> BackendTls {
    if cli.backend_tls_skip_verify {
        return BackendTls::SkipVerify;
    }
    if let Some(path) = &cli.backend_ca_cert {
        return BackendTls::CustomCa(path.clone());
    }
    BackendTls::Plaintext
}

fn build_dispatcher(bridge: &Arc<BackendBridge>) -> Dispatcher {
    let config = BridgeConfig::default();
    let mut dispatcher = Dispatcher::new(config.name, config.version, std::collections::HashMap::new());
    dispatcher.register(methods::LIST_TOOLS, Arc::new(ListToolsHandler { bridge: Arc::clone(bridge) }));
    dispatcher.register(methods::CALL_TOOL, Arc::new(CallToolHandler { bridge: Arc::clone(bridge) }));
    dispatcher.register(methods::LIST_RESOURCES, Arc::new(ListResourcesHandler { bridge: Arc::clone(bridge) }));
    dispatcher.register(methods::READ_RESOURCE, Arc::new(ReadResourceHandler { bridge: Arc::clone(bridge) }));
    dispatcher
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(cli.log_level.clone()))
        .init();

    let client = BackendClient::new(BackendClientConfig {
        base_url: cli.backend_url.clone(),
        tls: backend_tls(&cli),
    })?;

    let registry = Arc::new(UiResourceRegistry::new());
    registry.register(ResourceEntry {
        uri: CONVERSATION_VIEWER_URI.to_string(),
        name: "Conversation Viewer".to_string(),
        description: Some("Live view of the active agent session.".to_string()),
        mime_type: bridge_ui::UI_RESOURCE_MIME_TYPE.to_string(),
        html: conversation_viewer_html(),
        embedded: true,
    })?;

    // The notifier closure must exist before the bridge is shared (so it can
    // be installed via `&mut self`), but the sender it needs only exists
    // once the serve loop is built. Defer the lookup through a cell filled
    // in right after construction; by the time any tool mutates a UI app the
    // cell is always populated.
    let notification_cell: Arc<OnceLock<NotificationSender>> = Arc::new(OnceLock::new());
    let mut bridge = BackendBridge::new(client, Arc::clone(&registry));
    let deferred_cell = Arc::clone(&notification_cell);
    let change_notifier: ChangeNotifier = Arc::new(move || {
        if let Some(sender) = deferred_cell.get() {
            sender.notify(methods::RESOURCE_LIST_CHANGED, serde_json::json!({}));
        }
    });
    bridge.set_change_notifier(change_notifier);
    let bridge = Arc::new(bridge);

    let dispatcher = Arc::new(build_dispatcher(&bridge));

    let transport = StdioTransport::new();
    let (reader, writer) = transport.split();
    let serve_loop = ServeLoop::new(reader, writer, dispatcher);
    notification_cell
        .set(serve_loop.notification_sender())
        .expect("notification cell is set exactly once, before first use");

    let lifecycle = Arc::new(ServerLifecycle::new());
    let shutdown = lifecycle.shutdown_signal();
    lifecycle.start().await;

    tokio::spawn({
        let lifecycle = Arc::clone(&lifecycle);
        async move {
            let _ = tokio::signal::ctrl_c().await;
            lifecycle.shutdown().await;
        }
    });

    let reason = serve_loop.run(shutdown).await;
    tracing::info!(?reason, "serve loop exited");

    Ok(())
}

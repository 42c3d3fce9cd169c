//! # Bridge Server
//!
//! The JSON-RPC dispatcher (§4.1) and serve loop (§4.2): decodes inbound
//! frames, routes them by method name, and multiplexes responses against
//! asynchronous notifications until the connection closes.

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

/// Default server name advertised during `initialize`, overridable via [`config::BridgeConfig`].
pub const SERVER_NAME: &str = "bridge";
/// Default server version advertised during `initialize`.
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod lifecycle;
pub mod serve_loop;

pub use config::{BridgeConfig, LoggingConfig, TimeoutConfig};
pub use dispatcher::{ConnectionState, Dispatcher, MethodHandler};
pub use error::{DispatchError, DispatchResult};
pub use lifecycle::{ServerLifecycle, ServerState, ShutdownSignal};
pub use serve_loop::{ExitReason, NotificationSender, ServeLoop};

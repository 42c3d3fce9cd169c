//! # Bridge Backend
//!
//! The tool catalog (§4.3, §3) and the backend RPC bridge: translates
//! inbound tool calls into typed backend RPCs with per-call deadlines, and
//! exposes the backend's UI-app inventory as MCP resources.

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

pub mod bridge;
pub mod catalog;
pub mod client;
pub mod error;

pub use bridge::{BackendBridge, ChangeNotifier};
pub use catalog::{build_catalog, names};
pub use client::{BackendClient, BackendClientConfig, BackendTls, DEFAULT_CALL_TIMEOUT, LONG_CALL_TIMEOUT};
pub use error::{BackendError, BackendResult};

//! # Bridge Core
//!
//! Foundation types shared by every other crate in this workspace: request
//! context, cancellation, and time handling.

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

pub mod context;
pub mod types;

pub use context::{RequestContext, ResponseContext, ResponseStatus};
pub use types::Timestamp;

/// MCP protocol version this workspace targets.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

//! # Bridge UI
//!
//! The UI-resource registry (§4.4) and the dynamic-UI compiler (§4.5/§4.6):
//! a concurrent-safe store of HTML resources, a validator for declarative
//! component trees, and the embedded runtime security contract they compile
//! against.

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

pub mod catalog;
pub mod compiler;
pub mod error;
pub mod registry;
pub mod runtime;
pub mod spec;

pub use catalog::ComponentKind;
pub use compiler::{compile, validate};
pub use error::{CompileError, CompileResult, RegistryError, RegistryResult};
pub use registry::{ResourceEntry, UiResourceRegistry};
pub use runtime::RUNTIME_SCRIPT;
pub use spec::{UiComponent, UiSpec};

/// The fixed mime type for UI resources (§3).
pub const UI_RESOURCE_MIME_TYPE: &str = "text/html;profile=mcp-app";

//! # Bridge Transport
//!
//! The host connection: an opaque channel of newline-delimited JSON frames
//! over stdio. Framing is the only concern here; parsing and dispatch live
//! in `bridge-protocol` and `bridge-server`.

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

pub mod core;
pub mod stdio;

pub use core::{FrameReader, FrameWriter, TransportError, TransportResult};
pub use stdio::{StdioFrameReader, StdioFrameWriter, StdioTransport};

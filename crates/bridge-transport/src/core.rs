//! Transport abstraction: an opaque, bidirectional channel of newline-delimited
//! JSON frames between this process and its host.
//!
//! The host connection is stdio only and lives for the lifetime of the
//! process; there is no reconnection, pooling, or multiplexing to model here,
//! so the trait is deliberately small.

use async_trait::async_trait;
use thiserror::Error;

/// Failure modes for a frame transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying reader returned an I/O error.
    #[error("failed to read frame: {0}")]
    Read(#[source] std::io::Error),

    /// The underlying writer returned an I/O error.
    #[error("failed to write frame: {0}")]
    Write(#[source] std::io::Error),

    /// A line exceeded the configured maximum frame size.
    #[error("frame exceeded maximum size of {limit} bytes")]
    FrameTooLarge {
        /// The configured limit that was exceeded.
        limit: usize,
    },
}

/// Result alias for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// The read half of a frame transport.
///
/// Split from the write half so the serve loop can run a dedicated
/// background read task while the foreground loop owns sending — necessary
/// for handler-completion-ordered responses (§5) rather than one handler
/// blocking the next frame's receipt.
#[async_trait]
pub trait FrameReader: Send {
    /// Read the next frame, or `None` once the peer has closed the channel.
    async fn recv_frame(&mut self) -> TransportResult<Option<String>>;
}

/// The write half of a frame transport.
#[async_trait]
pub trait FrameWriter: Send {
    /// Write one frame and flush it immediately.
    ///
    /// Immediate flush matters here: the host reads line-by-line and a
    /// buffered write would stall it indefinitely.
    async fn send_frame(&mut self, frame: &str) -> TransportResult<()>;
}

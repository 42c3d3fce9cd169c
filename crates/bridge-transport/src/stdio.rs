//! Standard I/O transport implementation.
//!
//! This transport uses stdin/stdout for communication, which is the only way
//! this bridge talks to its host. It frames JSON-RPC messages as
//! newline-delimited JSON, one message per line.

use futures::{SinkExt, StreamExt};
use tokio::io::{BufReader, Stdin, Stdout};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};

use crate::core::{FrameReader, FrameWriter, TransportError, TransportResult};

/// Maximum length of a single frame, in bytes. Generous enough for a large
/// tool-call payload while still bounding unbuffered memory growth from a
/// misbehaving host.
const MAX_FRAME_BYTES: usize = 16 * 1024 * 1024;

/// Standard I/O transport: stdin framed as inbound lines, stdout framed as
/// outbound lines.
///
/// Constructed whole, then split into independent read/write halves so the
/// serve loop can read frames on a background task while dispatch tasks
/// write responses as they complete, rather than one blocking the other.
#[derive(Debug)]
pub struct StdioTransport {
    reader: StdioFrameReader,
    writer: StdioFrameWriter,
}

/// The stdin half of [`StdioTransport`].
#[derive(Debug)]
pub struct StdioFrameReader {
    inner: FramedRead<BufReader<Stdin>, LinesCodec>,
}

/// The stdout half of [`StdioTransport`].
#[derive(Debug)]
pub struct StdioFrameWriter {
    inner: FramedWrite<Stdout, LinesCodec>,
}

impl StdioTransport {
    /// Construct a transport over the process's stdin/stdout.
    #[must_use]
    pub fn new() -> Self {
        let reader = StdioFrameReader {
            inner: FramedRead::new(
                BufReader::new(tokio::io::stdin()),
                LinesCodec::new_with_max_length(MAX_FRAME_BYTES),
            ),
        };
        let writer = StdioFrameWriter {
            inner: FramedWrite::new(
                tokio::io::stdout(),
                LinesCodec::new_with_max_length(MAX_FRAME_BYTES),
            ),
        };
        Self { reader, writer }
    }

    /// Split into independent read and write halves.
    #[must_use]
    pub fn split(self) -> (StdioFrameReader, StdioFrameWriter) {
        (self.reader, self.writer)
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn map_read_err(err: LinesCodecError) -> TransportError {
    match err {
        LinesCodecError::MaxLineLengthExceeded => TransportError::FrameTooLarge {
            limit: MAX_FRAME_BYTES,
        },
        LinesCodecError::Io(io_err) => TransportError::Read(io_err),
    }
}

fn map_write_err(err: LinesCodecError) -> TransportError {
    match err {
        LinesCodecError::MaxLineLengthExceeded => TransportError::FrameTooLarge {
            limit: MAX_FRAME_BYTES,
        },
        LinesCodecError::Io(io_err) => TransportError::Write(io_err),
    }
}

#[async_trait::async_trait]
impl FrameReader for StdioFrameReader {
    async fn recv_frame(&mut self) -> TransportResult<Option<String>> {
        match self.inner.next().await {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(err)) => Err(map_read_err(err)),
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl FrameWriter for StdioFrameWriter {
    async fn send_frame(&mut self, frame: &str) -> TransportResult<()> {
        self.inner
            .send(frame.to_string())
            .await
            .map_err(map_write_err)?;
        self.inner.flush().await.map_err(map_write_err)
    }
}

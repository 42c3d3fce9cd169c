//! Cancellation signal shared between the binary entrypoint and the serve loop.

use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Broadcasts a single shutdown signal to the serve loop.
///
/// Grounded on the teacher's `ServerLifecycle`, trimmed to just the
/// state/shutdown-signal pair the serve loop needs (§4.2): there is no
/// health-check surface here, since this process has no endpoint for one to
/// answer.
#[derive(Debug)]
pub struct ServerLifecycle {
    state: Arc<RwLock<ServerState>>,
    shutdown_tx: broadcast::Sender<()>,
}

/// Coarse lifecycle state, used only for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Process has started but the serve loop has not begun.
    Starting,
    /// The serve loop is running.
    Running,
    /// Shutdown has been signalled; the serve loop is unwinding.
    ShuttingDown,
    /// The serve loop has returned.
    Stopped,
}

/// Receiver half of the shutdown broadcast.
pub type ShutdownSignal = broadcast::Receiver<()>;

impl ServerLifecycle {
    /// Create a new lifecycle tracker in the `Starting` state.
    #[must_use]
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(16);
        Self {
            state: Arc::new(RwLock::new(ServerState::Starting)),
            shutdown_tx,
        }
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> ServerState {
        *self.state.read().await
    }

    /// Mark the serve loop as running.
    pub async fn start(&self) {
        *self.state.write().await = ServerState::Running;
        tracing::info!("bridge serve loop started");
    }

    /// Fire the shutdown signal and mark the state as shutting down.
    pub async fn shutdown(&self) {
        *self.state.write().await = ServerState::ShuttingDown;
        let _ = self.shutdown_tx.send(());
        tracing::info!("bridge shutdown initiated");
    }

    /// Subscribe to the shutdown broadcast.
    #[must_use]
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown_tx.subscribe()
    }
}

impl Default for ServerLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

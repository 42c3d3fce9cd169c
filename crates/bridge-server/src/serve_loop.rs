//! Drives a [`Dispatcher`] over a split [`FrameReader`]/[`FrameWriter`] pair
//! until cancellation or transport failure.
//!
//! Inbound frames are read on a dedicated background task and dispatched
//! concurrently, each on its own task; the foreground loop only multiplexes
//! three completion sources — cancellation, a dispatched response, and an
//! asynchronous notification — and writes whichever arrives first (§4.2).
//! This is what makes responses come back in handler-completion order rather
//! than request-arrival order (§5): a slow handler's task is still pending
//! while a later, faster one's response is already on the channel.

use std::sync::Arc;

use bridge_transport::{FrameReader, FrameWriter};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::dispatcher::Dispatcher;
use crate::lifecycle::ShutdownSignal;

/// Capacity of the outbound-notification channel. Enqueue attempts beyond
/// this are dropped with a warning — notifications are best-effort, not
/// guaranteed (§4.2, §9 "Notification dropping").
const NOTIFICATION_CHANNEL_CAPACITY: usize = 16;

/// Handle used by other components (the backend bridge's resource-change
/// hook) to push a best-effort notification into the serve loop.
#[derive(Debug, Clone)]
pub struct NotificationSender {
    tx: mpsc::Sender<Value>,
}

impl NotificationSender {
    /// Attempt to enqueue a notification frame payload (already-built JSON
    /// value for the `params` field). Drops and logs a warning if the
    /// channel is full.
    pub fn notify(&self, method: &str, params: Value) {
        let frame = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
        });
        if let Err(_err) = self.tx.try_send(frame) {
            warn!(method, "notification channel full; dropping notification");
        }
    }
}

/// Why the serve loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The cancellation signal fired.
    Cancelled,
    /// The transport's peer closed the connection.
    TransportClosed,
}

/// Owns the transport halves and dispatcher for one connection's lifetime.
pub struct ServeLoop<R: FrameReader + 'static, W: FrameWriter + 'static> {
    reader: R,
    writer: W,
    dispatcher: Arc<Dispatcher>,
    notification_rx: mpsc::Receiver<Value>,
    notification_tx: mpsc::Sender<Value>,
}

impl<R: FrameReader + 'static, W: FrameWriter + 'static> ServeLoop<R, W> {
    /// Construct a serve loop over the given transport halves and dispatcher.
    #[must_use]
    pub fn new(reader: R, writer: W, dispatcher: Arc<Dispatcher>) -> Self {
        let (notification_tx, notification_rx) = mpsc::channel(NOTIFICATION_CHANNEL_CAPACITY);
        Self {
            reader,
            writer,
            dispatcher,
            notification_rx,
            notification_tx,
        }
    }

    /// A cloneable handle other components can use to push notifications
    /// into this loop.
    #[must_use]
    pub fn notification_sender(&self) -> NotificationSender {
        NotificationSender {
            tx: self.notification_tx.clone(),
        }
    }

    /// Run until `shutdown` fires or the transport closes.
    pub async fn run(mut self, mut shutdown: ShutdownSignal) -> ExitReason {
        info!("serve loop starting");

        // Unbounded: a response is only ever produced by a dispatch task we
        // ourselves spawned, one per inbound frame, so the queue is bounded
        // in practice by in-flight request count, not by an external actor.
        let (response_tx, mut response_rx) = mpsc::unbounded_channel::<String>();
        let (inbound_tx, mut inbound_rx) = mpsc::channel::<String>(1);

        let mut reader = self.reader;
        let read_task = tokio::spawn(async move {
            loop {
                match reader.recv_frame().await {
                    Ok(Some(line)) => {
                        if inbound_tx.send(line).await.is_err() {
                            return;
                        }
                    }
                    Ok(None) => return,
                    Err(err) => {
                        warn!(error = %err, "transport read failed; treating as closed");
                        return;
                    }
                }
            }
        });

        let exit_reason = loop {
            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    info!("serve loop cancelled");
                    break ExitReason::Cancelled;
                }

                frame = inbound_rx.recv() => {
                    match frame {
                        Some(line) => {
                            let dispatcher = Arc::clone(&self.dispatcher);
                            let response_tx = response_tx.clone();
                            tokio::spawn(async move {
                                if let Some(response) = dispatcher.handle(&line).await {
                                    let _ = response_tx.send(response);
                                }
                            });
                        }
                        None => {
                            info!("transport closed by peer");
                            break ExitReason::TransportClosed;
                        }
                    }
                }

                Some(response) = response_rx.recv() => {
                    if let Err(err) = self.writer.send_frame(&response).await {
                        warn!(error = %err, "failed to send response frame");
                    }
                }

                Some(notification) = self.notification_rx.recv() => {
                    let line = notification.to_string();
                    if let Err(err) = self.writer.send_frame(&line).await {
                        warn!(error = %err, "failed to send notification frame");
                    } else {
                        debug!("sent notification frame");
                    }
                }
            }
        };

        read_task.abort();
        exit_reason
    }
}

//! Minimal in-process HTTP mock of the backend RPC surface (§8 "in-process
//! mock backend (no real network)"). Speaks just enough HTTP/1.1 to satisfy
//! `reqwest`: a request line, headers up to `Content-Length`, a JSON body,
//! and a JSON response with a status line. No keep-alive.

use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Maps an inbound `(method, body)` pair to a `(status, body)` response.
pub type MockHandler = Arc<dyn Fn(&str, serde_json::Value) -> (u16, serde_json::Value) + Send + Sync>;

/// A running mock backend. Dropping this aborts the accept loop.
pub struct MockBackend {
    pub base_url: String,
    task: JoinHandle<()>,
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start a mock backend on an ephemeral loopback port, dispatching every
/// request through `handler`.
pub async fn spawn_mock_backend(handler: MockHandler) -> MockBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind loopback listener");
    let addr = listener.local_addr().expect("local addr");

    let task = tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                return;
            };
            let handler = Arc::clone(&handler);
            tokio::spawn(serve_one(socket, handler));
        }
    });

    MockBackend {
        base_url: format!("http://{addr}"),
        task,
    }
}

async fn serve_one(mut socket: tokio::net::TcpStream, handler: MockHandler) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let (method_path, header_end) = loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..pos]).to_string();
            break (head, pos);
        }
        if buf.len() > 64 * 1024 {
            return;
        }
    };

    let content_length: usize = method_path
        .lines()
        .find_map(|line| {
            let lower = line.to_ascii_lowercase();
            lower.strip_prefix("content-length:").map(|v| v.trim().to_string())
        })
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    let path = method_path
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .trim_start_matches('/')
        .to_string();

    let json_body: serde_json::Value = if body.is_empty() {
        serde_json::json!({})
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
    };

    let (status, response_body) = handler(&path, json_body);
    let encoded = serde_json::to_vec(&response_body).unwrap_or_default();
    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        encoded.len()
    );

    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.write_all(&encoded).await;
    let _ = socket.shutdown().await;
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|pos| pos + 4)
}

/// A mock backend that never writes a response, to exercise client-side
/// timeout handling (§8 scenario 5).
pub async fn spawn_silent_backend() -> MockBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind loopback listener");
    let addr = listener.local_addr().expect("local addr");
    let task = tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let mut socket = socket;
                let mut sink = [0u8; 1024];
                loop {
                    match socket.read(&mut sink).await {
                        Ok(0) | Err(_) => return,
                        Ok(_) => {}
                    }
                }
            });
        }
    });
    MockBackend {
        base_url: format!("http://{addr}"),
        task,
    }
}

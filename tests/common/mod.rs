//! Shared helpers: a local webhook receiver that records what it is sent.

#![allow(dead_code)]

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::CONTENT_TYPE};
use axum::routing::post;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// One request seen by the receiver.
#[derive(Debug, Clone)]
pub struct Received {
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// A webhook endpoint bound to an ephemeral local port.
pub struct Receiver {
    pub addr: SocketAddr,
    rx: mpsc::UnboundedReceiver<Received>,
}

impl Receiver {
    /// Start a receiver that answers every POST with `status`.
    pub async fn start(status: StatusCode) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Router::new()
            .route("/{*hook}", post(record))
            .with_state((tx, status));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, rx }
    }

    /// URL of a hook on this receiver.
    pub fn url(&self, hook: &str) -> String {
        format!("http://{}/{}", self.addr, hook)
    }

    /// Wait up to two seconds for the next request.
    pub async fn next(&mut self) -> Option<Received> {
        tokio::time::timeout(Duration::from_secs(2), self.rx.recv())
            .await
            .ok()
            .flatten()
    }

    /// Whether a request arrives within `wait`.
    pub async fn nothing_within(&mut self, wait: Duration) -> bool {
        tokio::time::timeout(wait, self.rx.recv()).await.is_err()
    }
}

async fn record(
    State((tx, status)): State<(mpsc::UnboundedSender<Received>, StatusCode)>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let _ = tx.send(Received { content_type, body });
    status
}

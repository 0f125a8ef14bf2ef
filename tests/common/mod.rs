//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use api_forwarder::config::{BaseUrlResolver, ForwarderConfig, StaticResolver};
use api_forwarder::{Forwarder, HttpServer, Shutdown};
use axum::{
    body::Bytes,
    extract::Request,
    http::{HeaderMap, Method},
    response::IntoResponse,
    Json, Router,
};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Mount prefix used by every test forwarder.
pub const PREFIX: &str = "/api/op";

/// A client that ignores any proxy settings in the environment.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Start a backend that describes every request it receives as JSON.
pub async fn start_echo_backend() -> SocketAddr {
    async fn echo(method: Method, headers: HeaderMap, request: Request) -> impl IntoResponse {
        let uri = request.uri().to_string();
        let body: Bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
            .await
            .unwrap();
        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(String::from);

        (
            [("x-backend", "echo")],
            Json(json!({
                "method": method.as_str(),
                "uri": uri,
                "host": header("host"),
                "request_id": header("x-request-id"),
                "content_type": header("content-type"),
                "content_length": header("content-length"),
                "body": String::from_utf8_lossy(&body),
            })),
        )
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().fallback(echo);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Start a backend that answers every connection with a raw HTTP response.
pub async fn start_mock_backend(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                // Drain the request head before answering.
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    addr
}

/// An address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// A running forwarder. Dropping it stops the server.
pub struct TestForwarder {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestForwarder {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestForwarder {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a forwarder whose base URL is fixed to `base`.
pub async fn start_forwarder(base: Option<String>) -> TestForwarder {
    start_forwarder_with(Arc::new(StaticResolver::new(base))).await
}

/// Start a forwarder with any resolver.
pub async fn start_forwarder_with(resolver: Arc<dyn BaseUrlResolver>) -> TestForwarder {
    let mut config = ForwarderConfig::default();
    config.upstream.mount_prefix = PREFIX.to_string();

    let forwarder = Forwarder::new(client(), resolver, PREFIX);
    let server = HttpServer::with_forwarder(config, forwarder);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestForwarder { addr, shutdown }
}

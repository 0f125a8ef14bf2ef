//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router for the mount prefix
//! - Wire up middleware (request id, tracing, body limit)
//! - Bind the server to a listener with graceful shutdown
//! - Hand each request to the forwarder

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method, Uri},
    response::Response,
    routing::{get, MethodRouter},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ForwarderConfig;
use crate::forward::Forwarder;
use crate::http::request::{
    into_inbound, propagate_request_id_layer, set_request_id_layer, RequestIdExt,
};
use crate::lifecycle::StartupError;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the forwarder.
pub struct HttpServer {
    router: Router,
    config: ForwarderConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ForwarderConfig) -> Result<Self, StartupError> {
        let forwarder = Forwarder::from_config(&config.upstream)?;
        Ok(Self::with_forwarder(config, forwarder))
    }

    /// Create a server around an already-built forwarder.
    pub fn with_forwarder(config: ForwarderConfig, forwarder: Forwarder) -> Self {
        let state = AppState {
            forwarder: Arc::new(forwarder),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ForwarderConfig, state: AppState) -> Router {
        let prefix = state.forwarder.mount_prefix().to_string();

        Router::new()
            .route(&prefix, forward_methods())
            .route(&format!("{}/", prefix), forward_methods())
            .route(&format!("{}/{{*path}}", prefix), forward_methods())
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_request_body_bytes))
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer()),
            )
    }

    /// The router, for serving or driving directly in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mount_prefix = %self.config.upstream.mount_prefix(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ForwarderConfig {
        &self.config
    }
}

/// The six forwarded methods. Axum also serves HEAD through the GET route.
fn forward_methods() -> MethodRouter<AppState> {
    get(forward_handler)
        .post(forward_handler)
        .put(forward_handler)
        .patch(forward_handler)
        .delete(forward_handler)
        .options(forward_handler)
}

// `Bytes` is extracted under `DefaultBodyLimit`, so an oversized body is
// answered with 413 before this runs.
async fn forward_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    tracing::debug!(
        request_id = %headers.request_id(),
        method = %method,
        path = %uri.path(),
        body_bytes = body.len(),
        "Inbound request"
    );

    state
        .forwarder
        .handle(into_inbound(method, &uri, headers, body))
        .await
}

//! api-forwarder: reverse HTTP forwarding to an internal API.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ /api/op/users/42?active=true
//!                 │
//!                 ▼
//!        ┌──────────────────┐   base URL from INTERNAL_API_URL / API_URL
//!        │  http::server    │   (read per request)
//!        │  request id,     │
//!        │  trace, limits   │
//!        └────────┬─────────┘
//!                 ▼
//!        ┌──────────────────┐
//!        │ forward::        │──▶ http://api.internal:8080/users/42?active=true
//!        │ Forwarder        │◀── status, headers, streamed body
//!        └────────┬─────────┘
//!                 ▼
//!   Client ◀── response minus transfer-encoding / connection / keep-alive
//! ```

use std::path::PathBuf;

use clap::Parser;

use api_forwarder::lifecycle::{self, startup, Shutdown};
use api_forwarder::observability::init_logging;

#[derive(Parser)]
#[command(name = "api-forwarder")]
#[command(about = "Forward a public path prefix to an internal API", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, env = "API_FORWARDER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = startup::resolve_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability);

    tracing::info!("api-forwarder v{} starting", env!("CARGO_PKG_VERSION"));
    let base_url_source = if config.upstream.base_url.is_some() {
        "config"
    } else {
        "environment"
    };
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mount_prefix = %config.upstream.mount_prefix(),
        base_url_source,
        "Configuration loaded"
    );

    let (server, listener) = startup::prepare(config).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move { shutdown.trigger_on(lifecycle::wait_for_signal()).await }
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

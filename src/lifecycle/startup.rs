//! Startup orchestration.
//!
//! Fail fast: any error here is fatal and the process exits before
//! accepting traffic.

use std::path::Path;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_config, ConfigError, ForwarderConfig};
use crate::http::HttpServer;

/// Errors that stop the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Load the config file if one is given, otherwise use defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<ForwarderConfig, StartupError> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None => Ok(ForwarderConfig::default()),
    }
}

/// Build the server and bind its listener. Listeners come last so no
/// traffic arrives before the forwarder is ready.
pub async fn prepare(config: ForwarderConfig) -> Result<(HttpServer, TcpListener), StartupError> {
    let address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;
    Ok((server, listener))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_path_uses_defaults() {
        let config = resolve_config(None).unwrap();
        assert_eq!(config.upstream.mount_prefix(), "/api/op");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = resolve_config(Some(Path::new("/nonexistent/forwarder.toml"))).unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Io(_))));
    }

    #[tokio::test]
    async fn test_address_in_use_is_bind_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = taken.local_addr().unwrap().to_string();

        let mut config = ForwarderConfig::default();
        config.listener.bind_address = address.clone();
        match prepare(config).await {
            Err(StartupError::Bind { address: failed, .. }) => assert_eq!(failed, address),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("bound an address already in use"),
        }
    }

    #[tokio::test]
    async fn test_prepare_binds_ephemeral_port() {
        let mut config = ForwarderConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        let (_server, listener) = prepare(config).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }
}

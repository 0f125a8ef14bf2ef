//! Forwarding errors and their client-facing rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Every way a forward can fail. The display text is the client-facing
/// message and is part of the HTTP contract.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// Neither environment source yields a base URL.
    #[error("API URL not configured")]
    ConfigurationMissing,

    /// The outbound call failed: bad target, DNS, refused, timeout, ...
    #[error("Proxy request failed")]
    UpstreamUnreachable {
        target: String,
        #[source]
        source: BoxError,
    },
}

impl ForwardError {
    pub fn upstream(target: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::UpstreamUnreachable {
            target: target.into(),
            source: source.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ConfigurationMissing => StatusCode::INTERNAL_SERVER_ERROR,
            Self::UpstreamUnreachable { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

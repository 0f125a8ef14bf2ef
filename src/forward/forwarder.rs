//! The forwarder: one inbound request in, one response out.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    http::{
        header::{HeaderValue, CONTENT_LENGTH, HOST},
        HeaderMap, Method,
    },
    response::{IntoResponse, Response},
};

use crate::config::{resolver_from_config, BaseUrlResolver, UpstreamConfig};
use crate::forward::error::ForwardError;
use crate::forward::headers::HeaderFilter;
use crate::forward::target::{build_target_url, upstream_host};
use crate::http::response::relay;

/// Framework-independent view of an inbound request.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl InboundRequest {
    /// GET and HEAD never carry a body upstream.
    pub fn carries_body(&self) -> bool {
        !matches!(self.method, Method::GET | Method::HEAD)
    }
}

/// Forwards requests under a mount prefix to the resolved base URL.
///
/// Holds no per-request state; clones share the same HTTP client.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    resolver: Arc<dyn BaseUrlResolver>,
    mount_prefix: String,
    response_filter: HeaderFilter,
}

impl Forwarder {
    pub fn new(
        client: reqwest::Client,
        resolver: Arc<dyn BaseUrlResolver>,
        mount_prefix: impl Into<String>,
    ) -> Self {
        Self {
            client,
            resolver,
            mount_prefix: mount_prefix.into().trim_end_matches('/').to_string(),
            response_filter: HeaderFilter::hop_by_hop(),
        }
    }

    /// Build a forwarder and its HTTP client from configuration.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self::new(
            client,
            resolver_from_config(config),
            config.mount_prefix(),
        ))
    }

    pub fn mount_prefix(&self) -> &str {
        &self.mount_prefix
    }

    /// Forward and render any failure as its JSON error response.
    pub async fn handle(&self, request: InboundRequest) -> Response {
        match self.forward(request).await {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    ForwardError::ConfigurationMissing => {
                        tracing::error!("No upstream base URL configured");
                    }
                    ForwardError::UpstreamUnreachable { target, source } => {
                        tracing::error!(target_url = %target, error = %source, "Upstream request failed");
                    }
                }
                err.into_response()
            }
        }
    }

    /// Forward one request upstream and relay the response.
    pub async fn forward(&self, request: InboundRequest) -> Result<Response, ForwardError> {
        let base = self
            .resolver
            .resolve()
            .ok_or(ForwardError::ConfigurationMissing)?;

        let target = build_target_url(
            &base,
            &self.mount_prefix,
            &request.path,
            request.query.as_deref(),
        );
        let url = reqwest::Url::parse(&target)
            .map_err(|e| ForwardError::upstream(target.clone(), e))?;

        let carries_body = request.carries_body();
        let InboundRequest {
            method,
            mut headers,
            body,
            ..
        } = request;

        if let Some(host) = upstream_host(&base) {
            let value = HeaderValue::from_str(&host)
                .map_err(|e| ForwardError::upstream(target.clone(), e))?;
            headers.insert(HOST, value);
        }

        tracing::info!(method = %method, target_url = %target, "Forwarding request");

        let mut outbound = self.client.request(method, url);
        if carries_body {
            outbound = outbound.body(body);
        } else {
            headers.remove(CONTENT_LENGTH);
        }

        let upstream = outbound
            .headers(headers)
            .send()
            .await
            .map_err(|e| ForwardError::upstream(target.clone(), e))?;

        tracing::debug!(
            target_url = %target,
            status = %upstream.status(),
            "Upstream responded"
        );

        Ok(relay(upstream, &self.response_filter))
    }
}

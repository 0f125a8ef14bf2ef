//! Response relaying.
//!
//! The upstream body is streamed through as it arrives, never buffered.
//! Status and headers are copied, minus whatever the filter rejects.

use axum::{body::Body, response::Response};

use crate::forward::headers::HeaderFilter;

/// Turn an upstream response into the response sent to the client.
pub fn relay(upstream: reqwest::Response, filter: &HeaderFilter) -> Response {
    let status = upstream.status();
    let headers = filter.apply(upstream.headers());

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

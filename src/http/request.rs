//! Inbound request handling.
//!
//! # Responsibilities
//! - Tag every request with an `x-request-id` before it is forwarded
//! - Convert the framework request into the forwarder's `InboundRequest`

use axum::{
    body::Bytes,
    http::{HeaderMap, HeaderName, Method, Uri},
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use crate::forward::InboundRequest;

/// Header carrying the correlation id.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Assigns a UUID to requests that arrive without one. The id is written
/// into the inbound headers, so it travels upstream with the rest of them.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Copies the request id onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Read access to the request id set by [`set_request_id_layer`].
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> &str {
        self.get(X_REQUEST_ID)
            .and_then(|id| id.to_str().ok())
            .unwrap_or("unknown")
    }
}

/// Assemble the forwarder's view of an inbound request.
pub fn into_inbound(method: Method, uri: &Uri, headers: HeaderMap, body: Bytes) -> InboundRequest {
    InboundRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_into_inbound_splits_uri() {
        let uri: Uri = "/api/op/users/7?fields=name".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer t"));

        let inbound = into_inbound(Method::PATCH, &uri, headers, Bytes::from_static(b"{}"));
        assert_eq!(inbound.method, Method::PATCH);
        assert_eq!(inbound.path, "/api/op/users/7");
        assert_eq!(inbound.query.as_deref(), Some("fields=name"));
        assert_eq!(inbound.headers["authorization"], "Bearer t");
        assert_eq!(&inbound.body[..], b"{}");
    }

    #[test]
    fn test_request_id_read_from_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(headers.request_id(), "unknown");

        headers.insert(X_REQUEST_ID, HeaderValue::from_static("req-7"));
        assert_eq!(headers.request_id(), "req-7");
    }
}

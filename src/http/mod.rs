//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, method routing under the mount prefix)
//!     → request.rs (request id, convert to InboundRequest)
//!     → forward::Forwarder (target URL, upstream call)
//!     → response.rs (strip hop-by-hop headers, stream body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::HttpServer;

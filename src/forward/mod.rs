//! Request forwarding core.
//!
//! # Data Flow
//! ```text
//! InboundRequest
//!     → resolver (base URL, or 500)
//!     → target.rs (strip mount prefix, append remainder + query)
//!     → forwarder.rs (override Host, drop GET/HEAD body, send)
//!     → http/response.rs (filter hop-by-hop headers, stream body back)
//! ```
//!
//! Any transport failure becomes a 502. Nothing is retried.

pub mod error;
pub mod forwarder;
pub mod headers;
pub mod target;

pub use error::ForwardError;
pub use forwarder::{Forwarder, InboundRequest};
pub use headers::HeaderFilter;
pub use target::{build_target_url, strip_mount_prefix, upstream_host};

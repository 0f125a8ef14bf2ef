//! Reverse HTTP forwarder library.
//!
//! Requests under a public mount prefix are rewritten onto an internal base
//! URL, forwarded, and relayed back without hop-by-hop headers.

pub mod config;
pub mod forward;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ForwarderConfig;
pub use forward::Forwarder;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

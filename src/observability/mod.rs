//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! forwarder / http server
//!     → tracing events (structured fields: method, target_url, request_id)
//!     → logging.rs (EnvFilter + fmt layer, pretty or JSON)
//!     → stdout
//! ```
//!
//! The request id set by the HTTP layer is logged with each inbound request
//! and forwarded upstream, so both sides can be correlated.

pub mod logging;

pub use logging::init_logging;

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ForwarderConfig (validated, immutable)
//!     → upstream.rs (base URL resolver injected into the forwarder)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the service runs with no file at all
//! - The upstream base URL comes from the environment and is read per request

pub mod loader;
pub mod schema;
pub mod upstream;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ForwarderConfig, LimitsConfig, ListenerConfig, LogFormat, ObservabilityConfig,
    UpstreamConfig,
};
pub use upstream::{resolver_from_config, BaseUrlResolver, EnvResolver, StaticResolver};

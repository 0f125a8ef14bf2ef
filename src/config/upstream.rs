//! Upstream base URL resolution.
//!
//! The forwarder never reads process state directly; it asks a resolver
//! injected at construction.

use std::env;
use std::fmt::Debug;
use std::sync::Arc;

use crate::config::schema::UpstreamConfig;

/// Source of the internal base URL.
pub trait BaseUrlResolver: Send + Sync + Debug {
    /// Returns the base URL, or `None` when nothing is configured.
    fn resolve(&self) -> Option<String>;
}

/// Reads the primary variable, then the fallback, on every call.
#[derive(Debug, Clone)]
pub struct EnvResolver {
    primary: String,
    fallback: String,
}

impl EnvResolver {
    pub fn new(primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

impl BaseUrlResolver for EnvResolver {
    fn resolve(&self) -> Option<String> {
        non_empty_var(&self.primary).or_else(|| non_empty_var(&self.fallback))
    }
}

/// A fixed value, decided once.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver(Option<String>);

impl StaticResolver {
    pub fn new(base_url: Option<String>) -> Self {
        Self(base_url)
    }
}

impl BaseUrlResolver for StaticResolver {
    fn resolve(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Pick the resolver described by the upstream configuration.
pub fn resolver_from_config(config: &UpstreamConfig) -> Arc<dyn BaseUrlResolver> {
    match &config.base_url {
        Some(base) => Arc::new(StaticResolver::new(Some(base.clone()))),
        None => Arc::new(EnvResolver::new(
            config.url_env.clone(),
            config.fallback_url_env.clone(),
        )),
    }
}

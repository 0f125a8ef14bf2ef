//! Configuration validation.
//!
//! Semantic checks run after serde has accepted the file. Every problem is
//! reported, not just the first.

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ForwarderConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ForwarderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let upstream = &config.upstream;
    let prefix = upstream.mount_prefix();
    if !upstream.mount_prefix.starts_with('/') {
        errors.push(ValidationError::new(
            "upstream.mount_prefix",
            "must start with '/'",
        ));
    } else if prefix.is_empty() {
        errors.push(ValidationError::new(
            "upstream.mount_prefix",
            "must not be the root path",
        ));
    }
    if prefix.contains(['{', '}', '*']) {
        errors.push(ValidationError::new(
            "upstream.mount_prefix",
            "must not contain route parameters or wildcards",
        ));
    }

    if upstream.url_env.trim().is_empty() {
        errors.push(ValidationError::new("upstream.url_env", "must not be empty"));
    }
    if upstream.fallback_url_env.trim().is_empty() {
        errors.push(ValidationError::new(
            "upstream.fallback_url_env",
            "must not be empty",
        ));
    }

    if let Some(base) = &upstream.base_url {
        match url::Url::parse(base) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => {}
            Ok(_) => errors.push(ValidationError::new(
                "upstream.base_url",
                "must be an http or https URL with a host",
            )),
            Err(e) => errors.push(ValidationError::new(
                "upstream.base_url",
                format!("invalid URL: {}", e),
            )),
        }
    }

    if upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::new("upstream.timeout_secs", "must be > 0"));
    }
    if upstream.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::new(
            "upstream.connect_timeout_secs",
            "must be > 0",
        ));
    }

    if config.limits.max_request_body_bytes == 0 {
        errors.push(ValidationError::new(
            "limits.max_request_body_bytes",
            "must be > 0",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ForwarderConfig::default()).is_ok());
    }

    #[test]
    fn test_trailing_slash_prefix_is_accepted() {
        let mut config = ForwarderConfig::default();
        config.upstream.mount_prefix = "/api/op/".into();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.upstream.mount_prefix(), "/api/op");
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ForwarderConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.upstream.mount_prefix = "/".into();
        config.upstream.url_env = " ".into();
        config.upstream.base_url = Some("ftp://files.internal".into());
        config.upstream.timeout_secs = Some(0);
        config.limits.max_request_body_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "upstream.mount_prefix",
                "upstream.url_env",
                "upstream.base_url",
                "upstream.timeout_secs",
                "limits.max_request_body_bytes",
            ]
        );
    }

    #[test]
    fn test_rejects_relative_prefix_and_wildcards() {
        let mut config = ForwarderConfig::default();
        config.upstream.mount_prefix = "api/{*rest}".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.field == "upstream.mount_prefix"));
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let mut config = ForwarderConfig::default();
        config.upstream.base_url = Some("not a url".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "upstream.base_url");
        assert!(errors[0].to_string().starts_with("upstream.base_url: invalid URL"));
    }
}

//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and URL shape.
//! Every problem is reported, not just the first.

use thiserror::Error;
use url::Url;

use crate::config::schema::ClientConfig;

/// Upper bound on `retries.max_retries`.
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("api.base_url '{0}' is not a valid http(s) URL")]
    InvalidBaseUrl(String),

    #[error("api.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("retries.base_delay_ms must be greater than zero")]
    ZeroBaseDelay,

    #[error("retries.max_delay_ms ({max}) is smaller than retries.base_delay_ms ({base})")]
    MaxDelayBelowBase { base: u64, max: u64 },

    #[error("retries.max_retries ({value}) exceeds the limit of {limit}")]
    TooManyRetries { value: u32, limit: u32 },

    #[error("retries.jitter_ratio ({0}) must be between 0 and 1")]
    JitterOutOfRange(String),

    #[error("navigation.{field} '{path}' must start with '/'")]
    RelativePath { field: &'static str, path: String },
}

/// Check a parsed configuration.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.api.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(config.api.base_url.clone())),
    }

    if config.api.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let retries = &config.retries;
    if retries.base_delay_ms == 0 {
        errors.push(ValidationError::ZeroBaseDelay);
    }
    if retries.max_delay_ms < retries.base_delay_ms {
        errors.push(ValidationError::MaxDelayBelowBase {
            base: retries.base_delay_ms,
            max: retries.max_delay_ms,
        });
    }
    if retries.max_retries > MAX_RETRIES_LIMIT {
        errors.push(ValidationError::TooManyRetries {
            value: retries.max_retries,
            limit: MAX_RETRIES_LIMIT,
        });
    }
    if !(0.0..=1.0).contains(&retries.jitter_ratio) {
        errors.push(ValidationError::JitterOutOfRange(retries.jitter_ratio.to_string()));
    }

    for (field, path) in [
        ("login_path", &config.navigation.login_path),
        ("home_path", &config.navigation.home_path),
    ] {
        if !path.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                field,
                path: path.clone(),
            });
        }
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
        assert!(validate_config(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ClientConfig::default();
        config.api.base_url = "ftp://files.example".into();
        config.api.timeout_secs = 0;
        config.retries.base_delay_ms = 500;
        config.retries.max_delay_ms = 100;
        config.navigation.login_path = "login".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::MaxDelayBelowBase { base: 500, max: 100 }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::RelativePath { field: "login_path", .. })));
    }

    #[test]
    fn test_rejects_unbounded_retries() {
        let mut config = ClientConfig::default();
        config.retries.max_retries = 50;
        config.retries.jitter_ratio = 1.5;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0], ValidationError::TooManyRetries { value: 50, limit: 10 });
        assert!(errors[1].to_string().contains("jitter_ratio"));
    }
}

//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ClientConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "FESTIVAL_API_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load, override and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ClientConfig = toml::from_str(&content).map_err(ConfigError::Parse)?;

    finish(config)
}

/// Build configuration without a file: defaults plus environment overrides.
pub fn load_default() -> Result<ClientConfig, ConfigError> {
    finish(ClientConfig::default())
}

fn finish(mut config: ClientConfig) -> Result<ClientConfig, ConfigError> {
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Replace the base URL (e.g. from a command-line flag) and revalidate.
pub fn override_base_url(config: &mut ClientConfig, url: &str) -> Result<(), ConfigError> {
    config.api.base_url = url.trim().to_string();
    validate_config(config).map_err(ConfigError::Validation)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
        tracing::debug!(base_url = %url, "Base URL overridden from environment");
        config.api.base_url = url.trim().to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_env_override_replaces_base_url() {
        let mut config = ClientConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == BASE_URL_ENV).then(|| " https://api.festival.example ".to_string())
        });
        assert_eq!(config.api.base_url, "https://api.festival.example");
    }

    #[test]
    fn test_base_url_override_is_validated() {
        let mut config = ClientConfig::default();
        let err = override_base_url(&mut config, "ftp://x").unwrap_err();
        assert!(err.to_string().contains("ftp://x"));

        let mut config = ClientConfig::default();
        override_base_url(&mut config, "https://api.festival.example").unwrap();
        assert_eq!(config.api.base_url, "https://api.festival.example");
    }

    #[test]
    fn test_blank_env_value_is_ignored() {
        let mut config = ClientConfig::default();
        apply_env_overrides(&mut config, |_| Some("   ".to_string()));
        assert_eq!(config.api.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_load_reports_validation_errors() {
        let path = std::env::temp_dir().join(format!("festival-config-{}.toml", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[api]\ntimeout_secs = 0").unwrap();

        let err = load_config(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!("festival-config-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[retries\nmax_retries = ").unwrap();

        let err = load_config(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

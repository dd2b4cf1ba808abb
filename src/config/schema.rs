//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the API client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the API client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend location and transport timeout.
    pub api: ApiConfig,

    /// Retry and backoff settings.
    pub retries: RetryConfig,

    /// User-facing notification settings.
    pub notifications: NotificationConfig,

    /// Redirect targets for authentication failures.
    pub navigation: NavigationConfig,

    /// Where the CLI persists the session.
    pub credentials: CredentialsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto (e.g., "http://localhost:3000").
    pub base_url: String,

    /// Per-attempt request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retries per logical request (not counting the first attempt).
    pub max_retries: u32,

    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,

    /// Upper bound of random jitter as a fraction of the delay.
    /// e.g., 0.1 for up to 10% extra. Zero disables jitter.
    pub jitter_ratio: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
            jitter_ratio: 0.0,
        }
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Error codes whose default notification is suppressed because the
    /// calling component displays them itself.
    pub silent_codes: Vec<String>,

    /// How long error notifications stay visible, in milliseconds.
    pub error_duration_ms: u64,

    /// How long warning notifications stay visible, in milliseconds.
    pub warning_duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            silent_codes: vec![
                "ALREADY_REGISTERED".to_string(),
                "INVALID_CREDENTIALS".to_string(),
                "VALIDATION_ERROR".to_string(),
            ],
            error_duration_ms: 4000,
            warning_duration_ms: 5000,
        }
    }
}

impl NotificationConfig {
    /// Whether `code` is in the silent list.
    pub fn is_silent(&self, code: &str) -> bool {
        self.silent_codes.iter().any(|c| c == code)
    }
}

/// Navigation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Login entry point used after an authentication failure.
    pub login_path: String,

    /// Home entry point used after a permissions failure.
    pub home_path: String,

    /// Delay between the session-expired notification and the login redirect.
    pub login_delay_ms: u64,

    /// Delay between the permissions notification and the home redirect.
    pub home_delay_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            home_path: "/".to_string(),
            login_delay_ms: 1000,
            home_delay_ms: 1500,
        }
    }
}

/// Credential persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialsConfig {
    /// Path of the JSON session file. `None` keeps the session in memory only.
    pub path: Option<String>,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            path: Some(".festival-session.json".to_string()),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

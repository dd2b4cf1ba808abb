//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (FESTIVAL_API_URL)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!     → handed to ApiClient::builder
//! ```
//!
//! All fields have defaults, so an empty file (or no file) is a valid config.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_default, override_base_url, ConfigError};
pub use schema::{
    ApiConfig, ClientConfig, CredentialsConfig, NavigationConfig, NotificationConfig,
    ObservabilityConfig, RetryConfig,
};
pub use validation::ValidationError;

//! Resilient API client for the festival registration backend.

pub mod api;
pub mod client;
pub mod config;
pub mod credentials;
pub mod http;
pub mod navigation;
pub mod notify;
pub mod observability;
pub mod resilience;
pub mod transport;

pub use client::{ApiClient, ApiClientBuilder, ApiError, ApiResult};
pub use config::ClientConfig;
pub use http::{ApiRequest, ApiResponse, RetryState};
pub use transport::{HttpTransport, Transport};

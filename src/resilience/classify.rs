//! Failure classification.
//!
//! Every failed attempt is classified exactly once. The class decides
//! whether the attempt is retried, which notification is shown and which
//! side effects (credential clear, redirect) run.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::http::ApiResponse;
use crate::transport::{TransportError, TransportErrorKind};

/// Error code marking a 403 that should send the user home.
pub const INSUFFICIENT_PERMISSIONS: &str = "INSUFFICIENT_PERMISSIONS";

/// Error codes marking a 401 caused by an expired session.
pub const SESSION_EXPIRED_CODES: &[&str] = &["TOKEN_EXPIRED", "SESSION_EXPIRED"];

/// Failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// No response was received.
    TransportFailure(TransportErrorKind),
    /// 5xx.
    ServerError,
    /// 429.
    RateLimited,
    /// 401.
    Unauthenticated,
    /// 403.
    Forbidden,
    /// 404.
    NotFound,
    /// Any other 4xx.
    ClientError,
}

impl FailureClass {
    /// Classify an HTTP status. Returns `None` for non-error statuses.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        let class = match status.as_u16() {
            500..=u16::MAX => FailureClass::ServerError,
            429 => FailureClass::RateLimited,
            401 => FailureClass::Unauthenticated,
            403 => FailureClass::Forbidden,
            404 => FailureClass::NotFound,
            400..=499 => FailureClass::ClientError,
            _ => return None,
        };
        Some(class)
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            FailureClass::TransportFailure(kind) => *kind != TransportErrorKind::InvalidRequest,
            FailureClass::ServerError | FailureClass::RateLimited => true,
            _ => false,
        }
    }

    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            FailureClass::TransportFailure(_) => "transport_failure",
            FailureClass::ServerError => "server_error",
            FailureClass::RateLimited => "rate_limited",
            FailureClass::Unauthenticated => "unauthenticated",
            FailureClass::Forbidden => "forbidden",
            FailureClass::NotFound => "not_found",
            FailureClass::ClientError => "client_error",
        }
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureClass::TransportFailure(kind) => write!(f, "transport failure ({})", kind.as_str()),
            other => f.write_str(other.label()),
        }
    }
}

/// A classified failed attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{class}{}", .status.map(|s| format!(" [{}]", s)).unwrap_or_default())]
pub struct ApiFailure {
    pub class: FailureClass,
    /// HTTP status, absent for transport failures.
    pub status: Option<StatusCode>,
    /// Machine-readable code from the error body.
    pub error_code: Option<String>,
    /// Human-readable message from the error body or transport.
    pub message: Option<String>,
    /// `retry-after` hint from the response.
    pub retry_after: Option<Duration>,
}

impl ApiFailure {
    /// Classify a response. Returns `None` when the status is not an error.
    pub fn from_response(response: &ApiResponse) -> Option<Self> {
        let class = FailureClass::from_status(response.status)?;
        let body = response.error_body();
        Some(Self {
            class,
            status: Some(response.status),
            error_code: body.code,
            message: body.error,
            retry_after: response.retry_after(),
        })
    }

    pub fn from_transport(err: &TransportError) -> Self {
        Self {
            class: FailureClass::TransportFailure(err.kind),
            status: None,
            error_code: None,
            message: Some(err.message.clone()),
            retry_after: None,
        }
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.error_code.as_deref() == Some(code)
    }

    pub fn is_session_expired(&self) -> bool {
        self.error_code
            .as_deref()
            .is_some_and(|c| SESSION_EXPIRED_CODES.contains(&c))
    }
}

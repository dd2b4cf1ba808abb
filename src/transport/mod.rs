//! Transport abstraction.
//!
//! The client never talks to the network directly; it hands each attempt to
//! a `Transport`. `HttpTransport` is the reqwest-backed implementation; tests
//! plug in scripted transports.

pub mod http;

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use crate::http::{ApiResponse, PreparedRequest};

pub use self::http::HttpTransport;

/// Why no response was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The attempt exceeded its deadline.
    Timeout,
    /// DNS, TCP or TLS connection failure.
    Connect,
    /// Any other failure after the request left (reset, truncated body).
    Other,
    /// The request could not be built (bad URL, bad header). Never retried.
    InvalidRequest,
}

impl TransportErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Other => "other",
            TransportErrorKind::InvalidRequest => "invalid_request",
        }
    }
}

/// A request that never produced an HTTP response.
#[derive(Debug, Clone, Error)]
#[error("{} error: {message}", kind.as_str())]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_builder() {
            TransportErrorKind::InvalidRequest
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, err.to_string())
    }
}

/// Sends one attempt of a request.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: &PreparedRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: &PreparedRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransportError::timeout("operation timed out");
        assert_eq!(err.to_string(), "timeout error: operation timed out");

        let err = TransportError::connect("connection refused");
        assert_eq!(err.kind, TransportErrorKind::Connect);
        assert!(err.to_string().starts_with("connect error"));
    }
}

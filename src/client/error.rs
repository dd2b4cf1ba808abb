//! Client error type.

use reqwest::StatusCode;
use thiserror::Error;

use crate::credentials::StoreError;
use crate::resilience::classify::{ApiFailure, FailureClass};

/// Errors returned by `ApiClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The call failed after the retry policy ran; side effects already happened.
    #[error("request failed: {0}")]
    Failed(#[from] ApiFailure),

    /// The request could not be built or sent at all.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response body did not match the expected type.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The session could not be saved or removed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            ApiError::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn class(&self) -> Option<FailureClass> {
        self.failure().map(|f| f.class)
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.failure().and_then(|f| f.status)
    }

    /// The backend error code, for callers handling silent codes themselves.
    pub fn error_code(&self) -> Option<&str> {
        self.failure().and_then(|f| f.error_code.as_deref())
    }
}

/// Result type for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

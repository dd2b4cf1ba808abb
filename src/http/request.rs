//! Request descriptors.
//!
//! # Responsibilities
//! - Describe an outbound call (method, path, body, headers)
//! - Carry the retry bookkeeping a logical request starts with
//! - Produce the per-attempt `PreparedRequest` the transport sends
//!
//! # Design Decisions
//! - `RetryState` is `Copy` and passed forward by value; executing a
//!   descriptor never mutates it, so one descriptor may back many calls
//! - Request ID is generated once per logical request and reused on retries

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde::Serialize;
use uuid::Uuid;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Retry bookkeeping for one logical request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryState {
    /// Set once the chain has failed at least once.
    pub attempted: bool,
    /// Retries already spent by this chain.
    pub attempt_count: u32,
}

impl RetryState {
    /// State for a chain that already spent `count` retries.
    pub fn resumed(count: u32) -> Self {
        Self {
            attempted: count > 0,
            attempt_count: count,
        }
    }

    /// State after scheduling one more retry.
    pub fn next(self) -> Self {
        Self {
            attempted: true,
            attempt_count: self.attempt_count.saturating_add(1),
        }
    }
}

/// An outbound API call.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
    pub retry: RetryState,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
            retry: RetryState::default(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a raw JSON value as body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Start the chain with retry bookkeeping carried over from elsewhere.
    pub fn with_retry_state(mut self, retry: RetryState) -> Self {
        self.retry = retry;
        self
    }

    /// Build the request the transport sends for every attempt of this call.
    ///
    /// Fails only if the bearer token contains bytes not allowed in a header.
    pub fn prepare(
        &self,
        request_id: Uuid,
        token: Option<&str>,
    ) -> Result<PreparedRequest, reqwest::header::InvalidHeaderValue> {
        let mut headers = self.headers.clone();
        headers.insert(
            HeaderName::from_static(X_REQUEST_ID),
            HeaderValue::from_str(&request_id.to_string())?,
        );
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(PreparedRequest {
            request_id,
            method: self.method.clone(),
            path: self.path.clone(),
            body: self.body.clone(),
            headers,
        })
    }
}

/// A request ready for the transport: auth and correlation headers applied.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub request_id: Uuid,
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub headers: HeaderMap,
}

//! Resilient API client.
//!
//! # Data Flow
//! ```text
//! ApiRequest
//!     → prepare (bearer token from the credential store, request ID)
//!     → transport.send
//!     → success: return response
//!     → failure: classify → retry policy
//!         → retry: notify on first failure, sleep, send again
//!         → give up: side effects (clear session, notify, schedule redirect), reject
//! ```
//!
//! # Design Decisions
//! - Retry bookkeeping lives in the call, seeded from the request and passed
//!   forward by value; concurrent calls never share counters
//! - Side effects run before the call rejects, so callers observe them
//! - Redirects run on a spawned task and never delay the rejection

mod error;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::credentials::{CredentialStore, MemoryStore};
use crate::http::{ApiRequest, ApiResponse, RetryState};
use crate::navigation::{self, Navigator, TracingNavigator};
use crate::notify::messages::message_for;
use crate::notify::{Notification, NotificationLevel, Notifier, TracingNotifier};
use crate::observability::metrics;
use crate::resilience::classify::{ApiFailure, FailureClass, INSUFFICIENT_PERMISSIONS};
use crate::resilience::retries::{decide, GiveUpReason, RetryDecision};
use crate::transport::{HttpTransport, Transport, TransportError, TransportErrorKind};

pub use error::{ApiError, ApiResult};

/// HTTP client applying classification, retries and user-facing side effects.
pub struct ApiClient<T> {
    transport: T,
    config: Arc<ClientConfig>,
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient<HttpTransport> {
    /// Client over reqwest with in-memory credentials and logging collaborators.
    pub fn from_config(config: ClientConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.api)?;
        Ok(ApiClientBuilder::new(config).build(transport))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Execute a request under the retry policy.
    pub async fn execute(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        let request_id = Uuid::new_v4();
        let token = self.store.token();
        let prepared = request
            .prepare(request_id, token.as_deref())
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        metrics::record_request(request.method.as_str());

        let mut state = request.retry;
        loop {
            let failure = match self.transport.send(&prepared).await {
                Ok(response) => match ApiFailure::from_response(&response) {
                    None => {
                        tracing::debug!(
                            request_id = %request_id,
                            method = %request.method,
                            path = %request.path,
                            status = %response.status,
                            "Request succeeded"
                        );
                        return Ok(response);
                    }
                    Some(failure) => failure,
                },
                Err(e) if e.kind == TransportErrorKind::InvalidRequest => {
                    tracing::error!(request_id = %request_id, path = %request.path, error = %e, "Request could not be sent");
                    return Err(ApiError::InvalidRequest(e.message));
                }
                Err(e) => {
                    tracing::warn!(
                        request_id = %request_id,
                        path = %request.path,
                        attempt = state.attempt_count,
                        error = %e,
                        "Transport error"
                    );
                    ApiFailure::from_transport(&e)
                }
            };

            match decide(&failure, state, &self.config.retries) {
                RetryDecision::Retry { delay } => {
                    if !state.attempted {
                        self.notify(&failure);
                    }
                    state = state.next();
                    metrics::record_retry(failure.class);
                    tracing::info!(
                        request_id = %request_id,
                        path = %request.path,
                        attempt = state.attempt_count,
                        delay = ?delay,
                        class = failure.class.label(),
                        "Retrying request"
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::GiveUp(reason) => {
                    tracing::warn!(
                        request_id = %request_id,
                        method = %request.method,
                        path = %request.path,
                        attempts = state.attempt_count.saturating_add(1),
                        class = failure.class.label(),
                        reason = ?reason,
                        "Request failed"
                    );
                    self.surface(&failure, state, reason);
                    metrics::record_failure(failure.class);
                    return Err(ApiError::Failed(failure));
                }
            }
        }
    }

    /// Execute and decode a JSON response body.
    pub async fn send_json<R: DeserializeOwned>(&self, request: &ApiRequest) -> ApiResult<R> {
        let response = self.execute(request).await?;
        Ok(response.json()?)
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        self.send_json(&ApiRequest::get(path)).await
    }

    pub async fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> ApiResult<R> {
        let request = ApiRequest::post(path).json(body)?;
        self.send_json(&request).await
    }

    /// Run the side effects of a final failure.
    fn surface(&self, failure: &ApiFailure, state: RetryState, reason: GiveUpReason) {
        if reason == GiveUpReason::Exhausted {
            // Retryable classes were announced on their first failure.
            if !state.attempted {
                self.notify(failure);
            }
            return;
        }

        let navigation = &self.config.navigation;
        match failure.class {
            FailureClass::Unauthenticated => {
                if let Err(e) = self.store.clear() {
                    tracing::error!(error = %e, "Failed to clear stored credentials");
                }
                self.notify(failure);
                navigation::schedule(
                    self.navigator.clone(),
                    navigation.login_path.clone(),
                    Duration::from_millis(navigation.login_delay_ms),
                );
            }
            FailureClass::Forbidden if failure.has_code(INSUFFICIENT_PERMISSIONS) => {
                self.notify(failure);
                navigation::schedule(
                    self.navigator.clone(),
                    navigation.home_path.clone(),
                    Duration::from_millis(navigation.home_delay_ms),
                );
            }
            _ => self.notify(failure),
        }
    }

    fn notify(&self, failure: &ApiFailure) {
        let settings = &self.config.notifications;
        if let Some((level, message)) = message_for(failure, settings) {
            let duration_ms = match level {
                NotificationLevel::Error => settings.error_duration_ms,
                NotificationLevel::Warning => settings.warning_duration_ms,
            };
            self.notifier.notify(Notification {
                level,
                message,
                duration: Duration::from_millis(duration_ms),
            });
        }
    }
}

/// Builder for `ApiClient`.
pub struct ApiClientBuilder {
    config: ClientConfig,
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClientBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            store: Arc::new(MemoryStore::new()),
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(TracingNavigator),
        }
    }

    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = store;
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn build<T: Transport>(self, transport: T) -> ApiClient<T> {
        ApiClient {
            transport,
            config: Arc::new(self.config),
            store: self.store,
            notifier: self.notifier,
            navigator: self.navigator,
        }
    }
}

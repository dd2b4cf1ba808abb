//! Client metrics.
//!
//! # Metrics
//! - `api_client_requests_total` (counter): logical requests by method
//! - `api_client_retries_total` (counter): retries by failure class
//! - `api_client_failures_total` (counter): rejected requests by failure class
//!
//! No recorder is installed here; without one these calls are no-ops.

use crate::resilience::classify::FailureClass;

pub fn record_request(method: &str) {
    ::metrics::counter!("api_client_requests_total", "method" => method.to_string()).increment(1);
}

pub fn record_retry(class: FailureClass) {
    ::metrics::counter!("api_client_retries_total", "class" => class.label()).increment(1);
}

pub fn record_failure(class: FailureClass) {
    ::metrics::counter!("api_client_failures_total", "class" => class.label()).increment(1);
}

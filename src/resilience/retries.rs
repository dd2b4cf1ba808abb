//! Retry decisions.
//!
//! # Responsibilities
//! - Decide whether a classified failure is retried
//! - Pick the delay before the next attempt
//! - Enforce the per-request retry limit
//!
//! # Design Decisions
//! - Pure function of (failure, retry state, config); no shared counters
//! - One exponential schedule for transport, 5xx and 429 failures
//! - A `retry-after` hint on 429 overrides the schedule

use std::time::Duration;

use crate::config::RetryConfig;
use crate::http::RetryState;
use crate::resilience::backoff::calculate_backoff;
use crate::resilience::classify::{ApiFailure, FailureClass};

/// Why a failure is surfaced instead of retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveUpReason {
    /// The class is never retried.
    NotRetryable,
    /// The request already spent every retry.
    Exhausted,
}

/// Outcome of the retry policy for one failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retry { delay: Duration },
    GiveUp(GiveUpReason),
}

/// Decide what to do after `failure`, given the retries already spent.
pub fn decide(failure: &ApiFailure, state: RetryState, config: &RetryConfig) -> RetryDecision {
    if !failure.class.is_retryable() {
        return RetryDecision::GiveUp(GiveUpReason::NotRetryable);
    }
    if state.attempt_count >= config.max_retries {
        return RetryDecision::GiveUp(GiveUpReason::Exhausted);
    }

    if failure.class == FailureClass::RateLimited {
        if let Some(hint) = failure.retry_after {
            if is_oversized_hint(hint, config) {
                tracing::warn!(
                    retry_after = ?hint,
                    max_delay_ms = config.max_delay_ms,
                    "Server retry-after hint exceeds the configured maximum delay"
                );
            }
            return RetryDecision::Retry { delay: hint };
        }
    }

    let delay = calculate_backoff(
        state.attempt_count + 1,
        config.base_delay_ms,
        config.max_delay_ms,
        config.jitter_ratio,
    );
    RetryDecision::Retry { delay }
}

/// Whether a `retry-after` hint is longer than the backoff cap.
pub fn is_oversized_hint(hint: Duration, config: &RetryConfig) -> bool {
    hint > Duration::from_millis(config.max_delay_ms)
}

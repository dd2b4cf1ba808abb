//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Failed attempt:
//!     → classify.rs (status / transport error → FailureClass)
//!     → retries.rs (retry or give up, and the delay)
//!     → backoff.rs (exponential schedule with optional jitter)
//! ```

pub mod backoff;
pub mod classify;
pub mod retries;

pub use classify::{ApiFailure, FailureClass};
pub use retries::{decide, GiveUpReason, RetryDecision};

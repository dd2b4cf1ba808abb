//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! ApiClient and collaborators produce:
//!     → logging.rs (structured log events, request ID on every event)
//!     → metrics.rs (request, retry and failure counters)
//! ```

pub mod logging;
pub mod metrics;

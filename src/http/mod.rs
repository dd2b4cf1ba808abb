//! HTTP request and response types.
//!
//! # Data Flow
//! ```text
//! caller builds ApiRequest
//!     → request.rs (prepare: bearer token, request ID)
//!     → [transport sends PreparedRequest]
//!     → response.rs (ApiResponse, error body, retry-after)
//! ```

pub mod request;
pub mod response;

pub use request::{ApiRequest, PreparedRequest, RetryState, X_REQUEST_ID};
pub use response::{ApiResponse, ErrorBody};

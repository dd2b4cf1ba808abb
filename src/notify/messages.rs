//! User-facing notification texts.

use crate::config::NotificationConfig;
use crate::notify::NotificationLevel;
use crate::resilience::classify::{ApiFailure, FailureClass, INSUFFICIENT_PERMISSIONS};
use crate::transport::TransportErrorKind;

pub const TIMEOUT: &str = "Request timed out. Please check your connection and try again.";
pub const NETWORK_ERROR: &str = "Network error. Please check your internet connection.";
pub const UNABLE_TO_CONNECT: &str = "Unable to connect to the server. Please try again later.";
pub const SERVER_ERROR: &str = "Server error. Please try again later.";
pub const RATE_LIMITED: &str = "Too many requests. Please wait a moment and try again.";
pub const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";
pub const AUTH_REQUIRED: &str = "Please sign in to continue.";
pub const PERMISSION_DENIED: &str = "You don't have permission to perform this action.";
pub const NOT_FOUND: &str = "The requested resource was not found.";
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Pick the notification for a classified failure, if any.
pub fn message_for(
    failure: &ApiFailure,
    config: &NotificationConfig,
) -> Option<(NotificationLevel, String)> {
    let message = match failure.class {
        FailureClass::TransportFailure(TransportErrorKind::Timeout) => TIMEOUT.to_string(),
        FailureClass::TransportFailure(TransportErrorKind::Connect) => NETWORK_ERROR.to_string(),
        FailureClass::TransportFailure(_) => UNABLE_TO_CONNECT.to_string(),
        FailureClass::ServerError => body_message(failure).unwrap_or(SERVER_ERROR).to_string(),
        FailureClass::RateLimited => {
            return Some((NotificationLevel::Warning, RATE_LIMITED.to_string()));
        }
        FailureClass::Unauthenticated if failure.is_session_expired() => SESSION_EXPIRED.to_string(),
        FailureClass::Unauthenticated => AUTH_REQUIRED.to_string(),
        FailureClass::Forbidden if failure.has_code(INSUFFICIENT_PERMISSIONS) => {
            PERMISSION_DENIED.to_string()
        }
        FailureClass::Forbidden => return None,
        FailureClass::NotFound => NOT_FOUND.to_string(),
        FailureClass::ClientError => {
            if failure.error_code.as_deref().is_some_and(|c| config.is_silent(c)) {
                return None;
            }
            body_message(failure).unwrap_or(GENERIC_ERROR).to_string()
        }
    };
    Some((NotificationLevel::Error, message))
}

fn body_message(failure: &ApiFailure) -> Option<&str> {
    failure
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use reqwest::StatusCode;

    fn http_failure(class: FailureClass, message: Option<&str>, code: Option<&str>) -> ApiFailure {
        ApiFailure {
            class,
            status: Some(StatusCode::BAD_REQUEST),
            error_code: code.map(String::from),
            message: message.map(String::from),
            retry_after: None,
        }
    }

    fn text(failure: &ApiFailure) -> Option<String> {
        message_for(failure, &NotificationConfig::default()).map(|(_, m)| m)
    }

    #[test]
    fn test_transport_messages_by_kind() {
        assert_eq!(text(&ApiFailure::from_transport(&TransportError::timeout("t"))).unwrap(), TIMEOUT);
        assert_eq!(text(&ApiFailure::from_transport(&TransportError::connect("c"))).unwrap(), NETWORK_ERROR);
        assert_eq!(
            text(&ApiFailure::from_transport(&TransportError::new(TransportErrorKind::Other, "reset"))).unwrap(),
            UNABLE_TO_CONNECT
        );
    }

    #[test]
    fn test_server_message_prefers_body() {
        assert_eq!(
            text(&http_failure(FailureClass::ServerError, Some("Database down"), None)).unwrap(),
            "Database down"
        );
        assert_eq!(text(&http_failure(FailureClass::ServerError, Some("  "), None)).unwrap(), SERVER_ERROR);
    }

    #[test]
    fn test_rate_limit_is_warning() {
        let (level, message) = message_for(
            &http_failure(FailureClass::RateLimited, Some("ignored"), None),
            &NotificationConfig::default(),
        )
        .unwrap();
        assert_eq!(level, NotificationLevel::Warning);
        assert_eq!(message, RATE_LIMITED);
    }

    #[test]
    fn test_auth_messages() {
        assert_eq!(
            text(&http_failure(FailureClass::Unauthenticated, None, Some("SESSION_EXPIRED"))).unwrap(),
            SESSION_EXPIRED
        );
        assert_eq!(text(&http_failure(FailureClass::Unauthenticated, None, None)).unwrap(), AUTH_REQUIRED);
    }

    #[test]
    fn test_forbidden_only_for_insufficient_permissions() {
        assert_eq!(
            text(&http_failure(FailureClass::Forbidden, None, Some(INSUFFICIENT_PERMISSIONS))).unwrap(),
            PERMISSION_DENIED
        );
        assert_eq!(text(&http_failure(FailureClass::Forbidden, Some("nope"), None)), None);
    }

    #[test]
    fn test_client_error_silent_codes() {
        assert_eq!(
            text(&http_failure(FailureClass::ClientError, Some("Bad input"), Some("ALREADY_REGISTERED"))),
            None
        );
        assert_eq!(
            text(&http_failure(FailureClass::ClientError, Some("Bad input"), Some("OTHER"))).unwrap(),
            "Bad input"
        );
        assert_eq!(
            text(&http_failure(FailureClass::ClientError, Some("Bad input"), None)).unwrap(),
            "Bad input"
        );
        assert_eq!(text(&http_failure(FailureClass::ClientError, None, None)).unwrap(), GENERIC_ERROR);
    }
}

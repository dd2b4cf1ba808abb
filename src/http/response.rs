//! Responses and error bodies.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A complete HTTP response received from the backend.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self { status, headers, body }
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The `retry-after` hint, when given as whole seconds.
    ///
    /// HTTP-date values are ignored.
    pub fn retry_after(&self) -> Option<Duration> {
        self.headers
            .get(RETRY_AFTER)?
            .to_str()
            .ok()?
            .trim()
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    }

    /// The error body, if the backend sent a JSON object.
    ///
    /// Each field is read on its own; a field of the wrong type is skipped
    /// without losing the others.
    pub fn error_body(&self) -> ErrorBody {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(&self.body) else {
            return ErrorBody::default();
        };
        ErrorBody {
            error: string_field(&fields, &["error", "message"]),
            code: string_field(&fields, &["code", "errorCode"]),
        }
    }
}

/// First of `names` holding a string.
fn string_field(fields: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| fields.get(*name).and_then(Value::as_str))
        .map(str::to_string)
}

/// The optional error fields the backend puts in failed responses.
///
/// Accepts `error` or `message` for the text and `code` or `errorCode` for
/// the machine-readable code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn response(body: &str) -> ApiResponse {
        ApiResponse::new(StatusCode::BAD_REQUEST, HeaderMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_error_body_fields_and_aliases() {
        let body = response(r#"{"error":"Bad input","code":"ALREADY_REGISTERED"}"#).error_body();
        assert_eq!(body.error.as_deref(), Some("Bad input"));
        assert_eq!(body.code.as_deref(), Some("ALREADY_REGISTERED"));

        let body = response(r#"{"message":"Nope","errorCode":"TOKEN_EXPIRED"}"#).error_body();
        assert_eq!(body.error.as_deref(), Some("Nope"));
        assert_eq!(body.code.as_deref(), Some("TOKEN_EXPIRED"));

        let body = response(r#"{"error":"First","message":"Second"}"#).error_body();
        assert_eq!(body.error.as_deref(), Some("First"));
    }

    #[test]
    fn test_mistyped_fields_do_not_hide_others() {
        let body = response(r#"{"error":{"issues":["email taken"]},"code":"ALREADY_REGISTERED"}"#).error_body();
        assert_eq!(body.error, None);
        assert_eq!(body.code.as_deref(), Some("ALREADY_REGISTERED"));

        let body = response(r#"{"error":["a"],"message":"Readable","code":42,"errorCode":"TOKEN_EXPIRED"}"#).error_body();
        assert_eq!(body.error.as_deref(), Some("Readable"));
        assert_eq!(body.code.as_deref(), Some("TOKEN_EXPIRED"));
    }

    #[test]
    fn test_non_json_body_yields_empty_error_body() {
        assert_eq!(response("<html>502</html>").error_body(), ErrorBody::default());
        assert_eq!(response("").error_body(), ErrorBody::default());
        assert_eq!(response("[1,2]").error_body(), ErrorBody::default());
    }

    #[test]
    fn test_retry_after_seconds_only() {
        let mut resp = response("");
        assert_eq!(resp.retry_after(), None);

        resp.headers.insert(RETRY_AFTER, HeaderValue::from_static("2"));
        assert_eq!(resp.retry_after(), Some(Duration::from_secs(2)));

        resp.headers.insert(
            RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(resp.retry_after(), None);
    }
}

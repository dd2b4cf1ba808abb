//! reqwest-backed transport.
//!
//! # Responsibilities
//! - Join the configured base URL with each request path
//! - Enforce the per-attempt timeout
//! - Buffer the full response body
//!
//! # Design Decisions
//! - One pooled `reqwest::Client` per transport
//! - Status codes are never errors here; classification happens in the client

use std::time::Duration;

use url::Url;

use crate::config::ApiConfig;
use crate::http::{ApiResponse, PreparedRequest};
use crate::transport::{Transport, TransportError, TransportErrorKind};

/// HTTP transport over reqwest.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport for the configured backend.
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            TransportError::new(
                TransportErrorKind::InvalidRequest,
                format!("invalid base URL '{}': {}", config.base_url, e),
            )
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        tracing::debug!(base_url = %base_url, timeout_secs = config.timeout_secs, "HTTP transport created");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request path against the base URL.
    ///
    /// Absolute URLs are used as-is; anything else is appended to the base
    /// URL's path, so a base of `http://host/api` and a path of `/v1/user`
    /// give `http://host/api/v1/user`. Query strings of the base and the path
    /// are merged; fragments are dropped.
    pub fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path).map_err(|e| invalid_path(path, e));
        }

        let path = path.split('#').next().unwrap_or_default();
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };

        let mut url = self.base_url.clone();
        url.set_fragment(None);
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let merged = match url.query().filter(|q| !q.is_empty()) {
                Some(base) => format!("{}&{}", base, query),
                None => query.to_string(),
            };
            url.set_query(Some(&merged));
        }
        Ok(url)
    }
}

fn invalid_path(path: &str, err: url::ParseError) -> TransportError {
    TransportError::new(
        TransportErrorKind::InvalidRequest,
        format!("invalid request path '{}': {}", path, err),
    )
}

impl Transport for HttpTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<ApiResponse, TransportError> {
        let url = self.resolve(&request.path)?;

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(ApiResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(&ApiConfig {
            base_url: base.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_resolve_appends_to_base_path() {
        let t = transport("http://localhost:3000/api/");
        assert_eq!(
            t.resolve("/v1/user/signup").unwrap().as_str(),
            "http://localhost:3000/api/v1/user/signup"
        );
        assert_eq!(
            t.resolve("v1/user/signin").unwrap().as_str(),
            "http://localhost:3000/api/v1/user/signin"
        );
    }

    #[test]
    fn test_resolve_keeps_base_query_after_path() {
        let t = transport("http://h/api?v=1#top");
        assert_eq!(t.resolve("/v1/user").unwrap().as_str(), "http://h/api/v1/user?v=1");
        assert_eq!(
            t.resolve("/v1/user?page=2").unwrap().as_str(),
            "http://h/api/v1/user?v=1&page=2"
        );

        let t = transport("http://h");
        assert_eq!(t.resolve("events?day=1").unwrap().as_str(), "http://h/events?day=1");
    }

    #[test]
    fn test_resolve_keeps_absolute_urls() {
        let t = transport("http://localhost:3000");
        assert_eq!(
            t.resolve("https://cdn.example/x").unwrap().as_str(),
            "https://cdn.example/x"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpTransport::new(&ApiConfig {
            base_url: "not a url".into(),
            timeout_secs: 5,
        })
        .err()
        .unwrap();
        assert_eq!(err.kind, TransportErrorKind::InvalidRequest);
    }
}

//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use festival_client::config::ClientConfig;
use festival_client::credentials::CredentialStore;
use festival_client::http::{ApiResponse, PreparedRequest};
use festival_client::navigation::Navigator;
use festival_client::notify::{Notification, Notifier};
use festival_client::transport::{Transport, TransportError};
use festival_client::{ApiClient, ApiClientBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use tokio::net::TcpListener;
use tokio::time::Instant;

pub type Outcome = Result<ApiResponse, TransportError>;

/// Build a response with a body and optional headers.
pub fn response(status: u16, body: &str, headers: &[(&'static str, &'static str)]) -> Outcome {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        map.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    Ok(ApiResponse::new(
        StatusCode::from_u16(status).unwrap(),
        map,
        body.as_bytes().to_vec(),
    ))
}

/// Transport replaying a fixed script of outcomes and recording every send.
///
/// Once the script runs out every send returns `200 {}`.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Outcome>>,
    calls: Mutex<Vec<(Instant, PreparedRequest)>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Outcome>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Script where every send returns `outcome`, `times` times.
    pub fn repeat(outcome: Outcome, times: usize) -> Arc<Self> {
        Self::new(std::iter::repeat(outcome).take(times).collect())
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub fn requests(&self) -> Vec<PreparedRequest> {
        self.calls.lock().unwrap().iter().map(|(_, r)| r.clone()).collect()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: &PreparedRequest) -> Outcome {
        self.calls
            .lock()
            .unwrap()
            .push((Instant::now(), request.clone()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| response(200, "{}", &[]))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<(Instant, Notification)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|(_, n)| n.message.clone()).collect()
    }

    pub fn times(&self) -> Vec<Instant> {
        self.seen.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().iter().map(|(_, n)| n.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push((Instant::now(), notification));
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    seen: Mutex<Vec<(Instant, String)>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.seen.lock().unwrap().iter().map(|(_, p)| p.clone()).collect()
    }

    pub fn times(&self) -> Vec<Instant> {
        self.seen.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.seen.lock().unwrap().push((Instant::now(), path.to_string()));
    }
}

/// A client wired to recording collaborators.
pub struct Harness<T> {
    pub client: ApiClient<T>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness<T: Transport>(
    config: ClientConfig,
    store: Arc<dyn CredentialStore>,
    transport: T,
) -> Harness<T> {
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let client = ApiClientBuilder::new(config)
        .store(store)
        .notifier(notifier.clone())
        .navigator(navigator.clone())
        .build(transport);
    Harness {
        client,
        notifier,
        navigator,
    }
}

/// Serve `app` on an ephemeral local port.
pub async fn start_backend(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

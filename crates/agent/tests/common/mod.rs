//! In-process stand-in for the monitoring API.
//!
//! Serves `POST /api/sensor/raw`, `POST /api/sensor/data` and
//! `GET /api/sensor/current` on an ephemeral localhost port and records
//! every submission it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

/// How the stub answers submissions.
#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    /// Reply 200 immediately.
    Accept,
    /// Reply with the given status.
    Status(u16),
    /// Wait, then reply 200.
    Delay(Duration),
    /// Reply 200 with a plain-text body instead of the JSON envelope.
    PlainText,
}

/// Message carried by the stub's JSON reply to an accepted submission.
pub const ACCEPTED_MESSAGE: &str = "Sensor data received";

/// One recorded submission.
#[derive(Debug, Clone)]
pub struct Received {
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct StubState {
    behaviour: Behaviour,
    received: Arc<Mutex<Vec<Received>>>,
}

pub struct StubApi {
    /// API root, e.g. `http://127.0.0.1:41234/api`.
    pub base_url: String,
    received: Arc<Mutex<Vec<Received>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl StubApi {
    pub async fn spawn(behaviour: Behaviour) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            behaviour,
            received: Arc::clone(&received),
        };

        let app = Router::new()
            .route("/api/sensor/raw", post(record))
            .route("/api/sensor/data", post(record))
            .route("/api/sensor/current", get(current))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}/api"),
            received,
            handle,
        }
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

impl Drop for StubApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL on which nothing is listening.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

async fn record(
    State(state): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Behaviour::Delay(delay) = state.behaviour {
        tokio::time::sleep(delay).await;
    }

    state.received.lock().unwrap().push(Received {
        path: uri.path().to_string(),
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    match state.behaviour {
        Behaviour::Status(code) => StatusCode::from_u16(code).unwrap().into_response(),
        Behaviour::PlainText => "OK".into_response(),
        Behaviour::Accept | Behaviour::Delay(_) => {
            Json(serde_json::json!({ "success": true, "message": ACCEPTED_MESSAGE }))
                .into_response()
        }
    }
}

async fn current() -> Response {
    Json(serde_json::json!({
        "success": true,
        "data": {
            "furnace_Temp": 892.0,
            "env_Humid": 45.5,
            "activeWarnings": ["gate"],
            "activeAlarms": []
        }
    }))
    .into_response()
}

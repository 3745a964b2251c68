//! HTTP client for the Smart Factory monitoring API.
//!
//! Wraps a [`reqwest::Client`] configured with a per-request timeout.
//! Submissions succeed only on HTTP 200; every other status and every
//! transport failure is returned as a [`SubmitError`] for the caller to
//! log and skip. A successful submission hands back the API's JSON
//! envelope when the body carries one.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::{AgentConfig, Endpoint};

/// Identifies the bridge to the monitoring API.
pub const USER_AGENT: &str = "SmartFactoryClient/1.0";

/// Path of the read-back resource, relative to the API root.
const CURRENT_READING_PATH: &str = "sensor/current";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of a single submission or read-back.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The HTTP request itself failed (connection refused, timeout, DNS,
    /// undecodable body, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with something other than 200.
    #[error("API returned HTTP {0}")]
    HttpStatus(u16),
}

impl SubmitError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SubmitError::Request(e) if e.is_timeout())
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// JSON envelope used by every API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Result of the startup connectivity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// `GET /sensor/current` answered 200.
    Reachable,
    /// The server answered, but not with 200.
    Degraded(u16),
    /// No HTTP response at all.
    Unreachable,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client bound to one API root.
#[derive(Debug, Clone)]
pub struct SensorApiClient {
    client: reqwest::Client,
    base_url: String,
    endpoint: Endpoint,
}

impl SensorApiClient {
    /// Build a client for `base_url` (no trailing slash) with the given
    /// per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        endpoint: Endpoint,
        timeout: Duration,
    ) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            endpoint,
        })
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self, SubmitError> {
        Self::new(
            config.api_base_url.clone(),
            config.endpoint,
            config.request_timeout,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of the submission resource.
    pub fn submit_url(&self) -> String {
        format!("{}/{}", self.base_url, self.endpoint.path())
    }

    /// Submit one wire-text payload.
    ///
    /// Returns the decoded [`ApiResponse`] on HTTP 200, or `None` when the
    /// body is empty, unreadable, or not the JSON envelope.
    pub async fn submit(&self, wire_text: &str) -> Result<Option<ApiResponse>, SubmitError> {
        let request = self.client.post(self.submit_url());
        let request = match self.endpoint {
            Endpoint::Raw => request
                .header(CONTENT_TYPE, "text/plain")
                .body(wire_text.to_owned()),
            Endpoint::Data => request.json(wire_text),
        };

        let response = request.send().await?;
        if response.status() != StatusCode::OK {
            return Err(SubmitError::HttpStatus(response.status().as_u16()));
        }

        match response.text().await {
            Ok(body) => Ok(decode_envelope(&body)),
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read submission response body");
                Ok(None)
            }
        }
    }

    /// Probe `GET /sensor/current` without decoding the body.
    pub async fn check_connectivity(&self) -> Connectivity {
        match self.client.get(self.current_url()).send().await {
            Ok(response) if response.status() == StatusCode::OK => Connectivity::Reachable,
            Ok(response) => Connectivity::Degraded(response.status().as_u16()),
            Err(e) => {
                tracing::debug!(error = %e, "Connectivity check failed");
                Connectivity::Unreachable
            }
        }
    }

    /// Fetch and decode the most recent reading held by the API.
    pub async fn current_reading(&self) -> Result<ApiResponse, SubmitError> {
        let response = self.client.get(self.current_url()).send().await?;
        if response.status() != StatusCode::OK {
            return Err(SubmitError::HttpStatus(response.status().as_u16()));
        }
        Ok(response.json::<ApiResponse>().await?)
    }

    fn current_url(&self) -> String {
        format!("{}/{}", self.base_url, CURRENT_READING_PATH)
    }
}

fn decode_envelope(body: &str) -> Option<ApiResponse> {
    match serde_json::from_str(body) {
        Ok(envelope) => Some(envelope),
        Err(e) => {
            tracing::debug!(error = %e, "Submission response is not a JSON envelope");
            None
        }
    }
}

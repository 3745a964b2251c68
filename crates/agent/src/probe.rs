//! Canned-payload verification against a live API.
//!
//! Submits each [`Scenario`] in order with a pause between them, then
//! reads back the API's current reading so an operator can confirm the
//! dashboard picked the payloads up.

use std::time::Duration;

use smartfactory_core::Scenario;

use crate::client::{ApiResponse, SensorApiClient, SubmitError};
use crate::sender;

/// Outcome of submitting one scenario.
#[derive(Debug)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub outcome: Result<Option<ApiResponse>, SubmitError>,
}

impl ScenarioResult {
    pub fn delivered(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The API's reply envelope, if the submission succeeded and carried one.
    pub fn response(&self) -> Option<&ApiResponse> {
        self.outcome.as_ref().ok().and_then(Option::as_ref)
    }
}

/// Submit every scenario in [`Scenario::ALL`] order.
///
/// Each reply's `success` flag and message are logged. Failures are logged
/// and recorded; they never stop the sequence.
pub async fn run_scenarios(client: &SensorApiClient, pause: Duration) -> Vec<ScenarioResult> {
    let mut results = Vec::with_capacity(Scenario::ALL.len());

    for (i, scenario) in Scenario::ALL.into_iter().enumerate() {
        if i > 0 && !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }

        tracing::info!(scenario = scenario.name(), "Sending canned sensor data");

        let snapshot = scenario.snapshot();
        let wire_text = scenario.wire_text();
        let outcome = sender::submit_snapshot(client, i as u64 + 1, &snapshot, &wire_text).await;

        match &outcome {
            Ok(Some(response)) => tracing::info!(
                scenario = scenario.name(),
                success = response.success,
                api_message = response.message.as_deref().unwrap_or("N/A"),
                "API response",
            ),
            Ok(None) => tracing::info!(
                scenario = scenario.name(),
                "API accepted the payload without a JSON reply",
            ),
            Err(_) => {}
        }

        results.push(ScenarioResult { scenario, outcome });
    }

    results
}

/// Fetch and log the API's current reading.
pub async fn report_current(client: &SensorApiClient) -> Result<(), SubmitError> {
    let response = client.current_reading().await?;

    if !response.success {
        tracing::warn!(api_message = ?response.message, "API reported no current reading");
        return Ok(());
    }

    let data = response.data.unwrap_or_default();
    let active_warnings = data
        .get("activeWarnings")
        .and_then(|v| v.as_array())
        .map_or(0, Vec::len);
    let active_alarms = data
        .get("activeAlarms")
        .and_then(|v| v.as_array())
        .map_or(0, Vec::len);

    tracing::info!(
        furnace_temp = %field_or_na(&data, "furnace_Temp"),
        humidity = %field_or_na(&data, "env_Humid"),
        light_level = %field_or_na(&data, "light_Level"),
        active_warnings,
        active_alarms,
        "Current sensor data",
    );
    Ok(())
}

fn field_or_na(data: &serde_json::Value, key: &str) -> String {
    match data.get(key) {
        Some(serde_json::Value::Null) | None => "N/A".to_string(),
        Some(v) => v.to_string(),
    }
}

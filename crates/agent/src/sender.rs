//! Snapshot submission loop.
//!
//! Generates a snapshot, submits it via
//! [`SensorApiClient`](crate::client::SensorApiClient), waits for the
//! configured interval, and repeats. Failures are logged and counted; only
//! cancellation or the optional iteration cap ends the loop.
//!
//! Cancellation is only observed between submissions, so a request that is
//! already in flight always runs to completion (or to its timeout).

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use smartfactory_core::{classify, validate, Channel, Generator, SensorSnapshot};

use crate::client::{ApiResponse, SensorApiClient, SubmitError};

/// Counters for one run of the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: u64,
    pub delivered: u64,
    pub failed: u64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Loop pacing and termination.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Delay after each submission.
    pub interval: Duration,
    /// Stop after this many submissions; `None` runs until cancelled.
    pub max_submissions: Option<u64>,
}

/// Run the submission loop until `cancel` fires or the cap is reached.
pub async fn run(
    client: &SensorApiClient,
    generator: &mut Generator,
    options: LoopOptions,
    cancel: &CancellationToken,
) -> RunSummary {
    let started_at = Utc::now();
    let mut attempted = 0u64;
    let mut delivered = 0u64;

    tracing::info!(
        url = %client.submit_url(),
        profile = generator.profile().name,
        interval_secs = options.interval.as_secs_f64(),
        max_submissions = ?options.max_submissions,
        "Starting sensor simulation",
    );

    loop {
        if cancel.is_cancelled() {
            break;
        }
        if options.max_submissions.is_some_and(|max| attempted >= max) {
            break;
        }

        attempted += 1;
        let (snapshot, wire_text) = generator.generate();
        if submit_snapshot(client, attempted, &snapshot, &wire_text).await.is_ok() {
            delivered += 1;
        }

        if options.max_submissions.is_some_and(|max| attempted >= max) {
            break;
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(options.interval) => {}
        }
    }

    let summary = RunSummary {
        attempted,
        delivered,
        failed: attempted - delivered,
        started_at,
        finished_at: Utc::now(),
    };

    tracing::info!(
        attempted = summary.attempted,
        delivered = summary.delivered,
        failed = summary.failed,
        elapsed_secs = summary.elapsed().num_seconds(),
        "Sensor simulation stopped",
    );

    summary
}

/// Submit one snapshot and log the outcome.
///
/// `seq` is the 1-based submission number used in log lines. Snapshots
/// outside the API's plausible ranges are still sent, with a warning.
pub async fn submit_snapshot(
    client: &SensorApiClient,
    seq: u64,
    snapshot: &SensorSnapshot,
    wire_text: &str,
) -> Result<Option<ApiResponse>, SubmitError> {
    let status = classify(snapshot);

    if let Err(violations) = validate(snapshot) {
        for violation in &violations {
            tracing::warn!(seq, %violation, "Snapshot outside plausible range");
        }
    }

    match client.submit(wire_text).await {
        Ok(response) => {
            let temp = format!("{:.1}", snapshot.get(Channel::FurnaceTemp).as_f64());
            tracing::info!(
                seq,
                status = %status,
                furnace_temp_c = %temp,
                tank_pressure_psi = %snapshot.get(Channel::TankPressure),
                gas_co_ppm = %snapshot.get(Channel::GasCo),
                "Data sent",
            );
            Ok(response)
        }
        Err(e) => {
            log_failure(seq, &e);
            Err(e)
        }
    }
}

fn log_failure(seq: u64, error: &SubmitError) {
    match error {
        SubmitError::HttpStatus(code) => {
            tracing::warn!(seq, status = code, "API rejected snapshot, skipping");
        }
        SubmitError::Request(e) => {
            tracing::error!(
                seq,
                error = %e,
                timeout = e.is_timeout(),
                "Connection error, skipping snapshot",
            );
        }
    }
}

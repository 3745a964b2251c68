//! `smartfactory-probe` -- manual verification of the monitoring API.
//!
//! Sends the canned normal, warning and emergency payloads, reads back the
//! current reading, and, when `PROBE_CONTINUOUS` is set, continues with a
//! continuous simulation using the `probe` profile until interrupted.

use smartfactory_agent::client::SensorApiClient;
use smartfactory_agent::config::{AgentConfig, Role};
use smartfactory_agent::sender::{self, LoopOptions};
use smartfactory_agent::{probe, shutdown};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    smartfactory_agent::init_tracing("smartfactory_agent=info,smartfactory_probe=info");

    let config = AgentConfig::from_env(Role::Probe).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let client = SensorApiClient::from_config(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    tracing::info!(api = %client.base_url(), "Smart Factory Monitoring System - API probe");

    let results = probe::run_scenarios(&client, config.probe_pause).await;
    let delivered = results.iter().filter(|r| r.delivered()).count();
    tracing::info!(delivered, total = results.len(), "Canned payloads submitted");

    if !config.probe_pause.is_zero() {
        tokio::time::sleep(config.probe_pause).await;
    }
    if let Err(e) = probe::report_current(&client).await {
        tracing::error!(error = %e, "Failed to read current sensor data");
    }

    if !config.probe_continuous {
        tracing::info!("Set PROBE_CONTINUOUS=true to follow up with a continuous simulation");
        return;
    }

    let cancel = shutdown::cancel_on_signal();
    let mut generator = config.generator();
    let options = LoopOptions {
        interval: config.interval,
        max_submissions: config.max_submissions,
    };
    sender::run(&client, &mut generator, options, &cancel).await;
}

//! `smartfactory-agent` -- simulated hardware sensor bridge.
//!
//! Generates bounded-random factory sensor snapshots and pushes them to
//! the Smart Factory monitoring API as two-line wire text until
//! interrupted. See [`AgentConfig`] for the environment variables.

use smartfactory_agent::client::{Connectivity, SensorApiClient};
use smartfactory_agent::config::{AgentConfig, Role};
use smartfactory_agent::sender::{self, LoopOptions};
use smartfactory_agent::shutdown;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    smartfactory_agent::init_tracing("smartfactory_agent=info");

    let config = AgentConfig::from_env(Role::Bridge).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        api = %config.api_base_url,
        endpoint = ?config.endpoint,
        profile = config.profile.name,
        seed = ?config.seed,
        interval_secs = config.interval.as_secs(),
        timeout_secs = config.request_timeout.as_secs(),
        "Starting smartfactory-agent",
    );

    let client = SensorApiClient::from_config(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    match client.check_connectivity().await {
        Connectivity::Reachable => {
            tracing::info!("API server is running and accessible");
        }
        Connectivity::Degraded(status) => {
            tracing::warn!(status, "API server responded with a non-200 status");
        }
        Connectivity::Unreachable => {
            tracing::error!(
                api = %config.api_base_url,
                "API server is not accessible; start the monitoring backend first",
            );
            std::process::exit(1);
        }
    }

    let cancel = shutdown::cancel_on_signal();
    let mut generator = config.generator();
    let options = LoopOptions {
        interval: config.interval,
        max_submissions: config.max_submissions,
    };

    let summary = sender::run(&client, &mut generator, options, &cancel).await;

    tracing::info!(
        total_sent = summary.delivered,
        total_attempted = summary.attempted,
        "Bridge stopped",
    );
}

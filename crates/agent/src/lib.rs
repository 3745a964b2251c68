//! `smartfactory-agent` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoints live in `main.rs` (bridge simulator) and `bin/probe.rs`
//! (canned-payload probe).

pub mod client;
pub mod config;
pub mod probe;
pub mod sender;
pub mod shutdown;

/// Install the `tracing` subscriber shared by both binaries.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

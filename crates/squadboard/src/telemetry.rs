//! Tracing subscriber initialization.

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console telemetry with an env-filtered fmt layer.
///
/// Respects `RUST_LOG`; defaults to `info` globally with `debug` for the
/// squadboard crates. Call once at process start.
pub fn init_console_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,squadboard=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Telemetry initialized");
    Ok(())
}

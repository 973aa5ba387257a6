//! Subscriber initialization.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize console logging for a binary that uses the client.
///
/// Reads the filter from `RUST_LOG`, defaulting to `info`. Safe to call more
/// than once; only the first call installs a subscriber.
///
/// # Arguments
/// * `service_name` - Name recorded on the startup event
///
/// # Example
/// ```
/// use llama_telemetry::init_telemetry;
/// init_telemetry("llama-demo").expect("Failed to initialize telemetry");
/// ```
pub fn init_telemetry(service_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .expect("Failed to create env filter");

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();

        tracing::info!(service.name = service_name, "Telemetry initialized");
    });

    Ok(())
}

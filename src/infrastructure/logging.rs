use super::errors::InfraError;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Sends `tracing` output to `log_path`, filtered by `RUST_LOG`.
///
/// The terminal belongs to the UI, so without a log file nothing is
/// installed and events are dropped. Returns whether a subscriber was set up.
pub fn init_logging(log_path: Option<&str>) -> Result<bool, InfraError> {
    let Some(path) = log_path else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| InfraError::io(path, e))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evenup=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| InfraError::Logging(e.to_string()))?;

    Ok(true)
}

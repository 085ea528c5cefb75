//! Structured telemetry initialisation for worker processes.

use std::io;

use once_cell::sync::OnceCell;
use tracing::{Subscriber, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use gantry_config::{LogFormat, TelemetrySettings};

static TELEMETRY_GUARD: OnceCell<()> = OnceCell::new();

/// Handle returned when telemetry has been initialised.
#[derive(Debug, Default, Clone, Copy)]
pub struct TelemetryHandle;

/// Errors encountered while configuring telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to parse the configured log filter expression.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Failed to install the tracing subscriber.
    #[error("failed to install telemetry subscriber: {0}")]
    Subscriber(SetGlobalDefaultError),
}

/// Configures the global tracing subscriber when invoked for the first
/// time.
///
/// Repeated calls are idempotent: the first invocation installs the
/// global subscriber; later invocations detect the existing
/// registration and return a fresh [`TelemetryHandle`] without
/// touching global state again. Output goes to standard error so the
/// host's log capture picks it up regardless of what the engine does
/// with standard output.
///
/// # Errors
///
/// Returns a [`TelemetryError`] if the filter expression is invalid or
/// a conflicting subscriber is already installed.
pub fn initialise(settings: &TelemetrySettings) -> Result<TelemetryHandle, TelemetryError> {
    TELEMETRY_GUARD
        .get_or_try_init(|| install_subscriber(settings))
        .map(|_| TelemetryHandle)
}

fn install_subscriber(settings: &TelemetrySettings) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(settings.log_filter())
        .map_err(|error| TelemetryError::Filter(error.to_string()))?;
    match settings.log_format() {
        LogFormat::Json => set_subscriber(
            fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .finish(),
        ),
        LogFormat::Compact => set_subscriber(
            fmt()
                .compact()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .finish(),
        ),
    }
}

fn set_subscriber<S>(subscriber: S) -> Result<(), TelemetryError>
where
    S: Subscriber + Send + Sync + 'static,
{
    tracing::subscriber::set_global_default(subscriber).map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use gantry_config::TelemetrySettings;

    use super::initialise;

    #[test]
    fn initialise_is_idempotent() {
        let settings = TelemetrySettings::default();
        initialise(&settings).expect("first initialisation succeeds");
        initialise(&settings).expect("repeat initialisation succeeds");
    }
}

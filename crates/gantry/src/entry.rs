//! The exported worker entry point and its bootstrap sequence.

use std::io::{self, Write};
use std::process;

use tracing::error;

use gantry_config::{LoaderConfig, TelemetrySettings};
use gantry_types::StartArgument;

use crate::exit::exit_status;
use crate::telemetry;
use crate::trampoline::run_trampoline;

const ENTRY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::entry");

/// Exit status used when configuration fails before a variant profile
/// is available to consult.
const CONFIG_FAILURE_STATUS: u8 = 1;

/// Worker entry point the host resolves by name when starting the
/// background worker process.
///
/// This is the function named by the descriptor's relaunch pair (see
/// [`crate::registrar::SHIM_ENTRY_FUNCTION`]); its only caller is the
/// host's worker launcher, and it never returns: the worker process
/// ends here with the variant-mapped exit status.
#[unsafe(no_mangle)]
pub extern "C-unwind" fn gantry_worker_main(argument: usize) {
    let status = bootstrap_worker(StartArgument::from_raw(argument));
    process::exit(i32::from(status));
}

fn bootstrap_worker(argument: StartArgument) -> u8 {
    let settings = TelemetrySettings::from_env();
    if let Err(telemetry_error) = telemetry::initialise(&settings) {
        // Telemetry failing is not worth dying for; the host still
        // captures standard error.
        writeln!(io::stderr(), "gantry: telemetry unavailable: {telemetry_error}").ok();
    }
    match LoaderConfig::from_env() {
        Ok(config) => run_worker(&config, argument),
        Err(config_error) => {
            error!(
                target: ENTRY_TARGET,
                error = %config_error,
                "invalid worker configuration"
            );
            CONFIG_FAILURE_STATUS
        }
    }
}

/// Runs the trampoline with production collaborators and maps the
/// outcome onto the exit status for the configured variant.
#[must_use]
pub fn run_worker(config: &LoaderConfig, argument: StartArgument) -> u8 {
    let outcome = run_trampoline(config, argument);
    if let Err(trampoline_error) = &outcome {
        error!(
            target: ENTRY_TARGET,
            error = %trampoline_error,
            "worker bootstrap failed"
        );
    }
    exit_status(&outcome, config.variant())
}

#[cfg(test)]
mod tests {
    use gantry_config::{LibraryLocator, LoaderConfig, VariantKind};
    use gantry_types::StartArgument;

    use super::run_worker;

    #[test]
    fn run_worker_reports_the_failure_status_when_the_engine_is_absent() {
        let config = LoaderConfig::new(
            LibraryLocator::new("/nonexistent/gantry/lib").expect("valid directory"),
            VariantKind::Oneshot.profile(),
        );
        assert_eq!(run_worker(&config, StartArgument::ZERO), 1);
    }
}

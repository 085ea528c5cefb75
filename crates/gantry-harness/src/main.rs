//! Operator harness for the worker trampoline.
//!
//! Runs the bootstrap sequence a spawned worker runs (signal
//! unblocking, path resolution, dynamic load, entry invocation) but
//! from the command line, against any library directory, so operators
//! can smoke-test an engine build without going through the host. The
//! process exit status is exactly what the host's supervisor would see.

use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use thiserror::Error;

use gantry::{TelemetryError, run_worker, telemetry};
use gantry_config::{
    ConfigError, LibraryLocator, LoaderConfig, LogFormat, TelemetrySettings, VariantKind, defaults,
};
use gantry_types::StartArgument;

/// Drive the engine worker trampoline outside the host.
#[derive(Debug, Parser)]
#[command(name = "gantry-harness", version)]
struct Cli {
    /// Library directory containing the engine shared object.
    #[arg(long, value_name = "DIR")]
    library_dir: Utf8PathBuf,

    /// Engine library file name inside the library directory.
    #[arg(long, value_name = "FILE", default_value = defaults::ENGINE_LIBRARY_FILE)]
    library_file: String,

    /// Deployment variant governing exit codes and diagnostics.
    #[arg(long, default_value = "managed")]
    variant: VariantKind,

    /// Opaque start argument forwarded to the engine entry point.
    #[arg(long, default_value_t = 0)]
    argument: usize,

    /// Log filter expression.
    #[arg(long, default_value = defaults::DEFAULT_LOG_FILTER)]
    log_filter: String,

    /// Log output format.
    #[arg(long, default_value = "compact")]
    log_format: LogFormat,
}

#[derive(Debug, Error)]
enum HarnessError {
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(status) => ExitCode::from(status),
        Err(harness_error) => {
            writeln!(io::stderr(), "gantry-harness: {harness_error}").ok();
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<u8, HarnessError> {
    telemetry::initialise(&TelemetrySettings::new(cli.log_filter, cli.log_format))?;
    let locator = LibraryLocator::with_file_name(cli.library_dir, cli.library_file)?;
    let config = LoaderConfig::new(locator, cli.variant.profile());
    Ok(run_worker(&config, StartArgument::from_raw(cli.argument)))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::Cli;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_deployment_contract() {
        let cli = <Cli as clap::Parser>::try_parse_from(["gantry-harness", "--library-dir", "/opt/pg/lib"])
            .expect("minimal arguments parse");
        assert_eq!(cli.library_file, "ferretdb.so");
        assert_eq!(cli.argument, 0);
    }
}

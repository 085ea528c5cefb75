//! Configuration shared by the gantry shim and its harness binary.
//!
//! The shim's configurable surface is deliberately narrow: where the
//! engine library lives ([`LibraryLocator`]), which deployment variant
//! governs exit codes and diagnostics ([`VariantProfile`]), and how
//! telemetry is emitted ([`TelemetrySettings`]). Everything else, such
//! as the engine file name, the entry symbol, and the worker policies,
//! is a fixed part of the load contract and lives in [`defaults`].
//!
//! Production code reads the `GANTRY_*` environment variables through
//! [`LoaderConfig::from_env`]; tests inject a lookup table through
//! [`LoaderConfig::from_lookup`] so no test mutates process state.

pub mod defaults;
mod environment;
mod error;
mod locator;
mod logging;
mod variant;

pub use self::environment::{
    LIBRARY_DIR_VAR, LOG_FILTER_VAR, LOG_FORMAT_VAR, LoaderConfig, TelemetrySettings, VARIANT_VAR,
};
pub use self::error::ConfigError;
pub use self::locator::LibraryLocator;
pub use self::logging::LogFormat;
pub use self::variant::{DiagnosticLevel, VariantKind, VariantProfile};

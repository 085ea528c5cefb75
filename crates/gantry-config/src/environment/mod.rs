//! Environment-driven configuration for the worker entry point.
//!
//! The host launches worker processes with its own environment, so the
//! shim's few knobs arrive as `GANTRY_*` variables. Lookups go through
//! a closure seam: production reads the process environment, tests
//! supply a table, and no test ever mutates global state.

use std::env;
use std::ffi::{OsStr, OsString};

use camino::Utf8PathBuf;

use crate::defaults;
use crate::error::ConfigError;
use crate::locator::LibraryLocator;
use crate::logging::LogFormat;
use crate::variant::{VariantKind, VariantProfile};

/// Variable naming the host's shared-library directory.
pub const LIBRARY_DIR_VAR: &str = "GANTRY_LIBRARY_DIR";

/// Variable selecting the deployment variant by name.
pub const VARIANT_VAR: &str = "GANTRY_VARIANT";

/// Variable holding the log filter expression.
pub const LOG_FILTER_VAR: &str = "GANTRY_LOG_FILTER";

/// Variable selecting the log output format.
pub const LOG_FORMAT_VAR: &str = "GANTRY_LOG_FORMAT";

/// Everything the trampoline needs to bootstrap one worker process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    locator: LibraryLocator,
    variant: VariantProfile,
}

impl LoaderConfig {
    /// Assembles a configuration from already-validated parts.
    #[must_use]
    pub const fn new(locator: LibraryLocator, variant: VariantProfile) -> Self {
        Self { locator, variant }
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable holds a non-Unicode
    /// value, the library directory fails validation, or the variant
    /// name is unknown.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var_os(name))
    }

    /// Reads the configuration through an injected variable lookup.
    ///
    /// # Errors
    ///
    /// Same conditions as [`LoaderConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let directory = lookup(LIBRARY_DIR_VAR).map_or_else(
            || Ok(Utf8PathBuf::from(defaults::DEFAULT_LIBRARY_DIRECTORY)),
            |value| unicode_value(value, LIBRARY_DIR_VAR).map(Utf8PathBuf::from),
        )?;
        let locator = LibraryLocator::new(directory)?;
        let variant = lookup(VARIANT_VAR)
            .map(|value| parse_variant(&value))
            .transpose()?
            .unwrap_or_default();
        Ok(Self::new(locator, variant.profile()))
    }

    /// Returns the engine library locator.
    #[must_use]
    pub const fn locator(&self) -> &LibraryLocator {
        &self.locator
    }

    /// Returns the active variant profile.
    #[must_use]
    pub const fn variant(&self) -> &VariantProfile {
        &self.variant
    }
}

/// Telemetry knobs for the worker entry point and the harness.
///
/// Unlike [`LoaderConfig`], telemetry settings are lenient: an
/// unparseable or non-Unicode value falls back to the default rather
/// than preventing the worker from starting, because a worker that
/// cannot log is still more useful than one that never runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetrySettings {
    filter: String,
    format: LogFormat,
}

impl TelemetrySettings {
    /// Assembles settings from explicit values.
    #[must_use]
    pub const fn new(filter: String, format: LogFormat) -> Self {
        Self { filter, format }
    }

    /// Reads the settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var_os(name))
    }

    /// Reads the settings through an injected variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let filter = lookup(LOG_FILTER_VAR)
            .and_then(|value| value.into_string().ok())
            .unwrap_or_else(defaults::default_log_filter_string);
        let format = lookup(LOG_FORMAT_VAR)
            .and_then(|value| value.into_string().ok())
            .and_then(|text| text.parse().ok())
            .unwrap_or_default();
        Self { filter, format }
    }

    /// Returns the log filter expression.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.filter.as_str()
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.format
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            filter: defaults::default_log_filter_string(),
            format: defaults::default_log_format(),
        }
    }
}

fn unicode_value(value: OsString, variable: &'static str) -> Result<String, ConfigError> {
    value
        .into_string()
        .map_err(|_| ConfigError::NonUnicodeValue { variable })
}

fn parse_variant(value: &OsStr) -> Result<VariantKind, ConfigError> {
    let text = value
        .to_str()
        .ok_or(ConfigError::NonUnicodeValue {
            variable: VARIANT_VAR,
        })?;
    text.parse::<VariantKind>()
        .map_err(|source| ConfigError::UnknownVariant {
            value: text.to_owned(),
            source,
        })
}

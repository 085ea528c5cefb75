//! Logging output formats supported by the telemetry bootstrap.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Supported logging output formats.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON for ingestion by the host's logging stack.
    #[default]
    Json,
    /// Human-readable single-line output for interactive use.
    Compact,
}

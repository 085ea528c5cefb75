//! Deployment-variant profiles governing exit codes and diagnostics.
//!
//! The shim ships in two deployment flavours that differ only in how
//! the host's supervisor should interpret a worker stopping and how
//! loudly the resolved library path is logged. Rather than two code
//! paths, a single trampoline is parameterised by a [`VariantProfile`];
//! the flavours are the named constructors on that profile, selectable
//! by name through [`VariantKind`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Severity used for the resolved-path diagnostic line.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DiagnosticLevel {
    /// Emit the path line at debug severity.
    Debug,
    /// Emit the path line at info severity.
    #[default]
    Info,
}

/// Named deployment variants recognised by configuration.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum VariantKind {
    /// The engine runs for the host's whole lifetime; the entry point
    /// returning means the worker stopped without being asked to.
    #[default]
    Managed,
    /// The engine runs a bounded job; the entry point returning is the
    /// expected clean finish.
    Oneshot,
}

impl VariantKind {
    /// Returns the profile for this variant.
    #[must_use]
    pub const fn profile(self) -> VariantProfile {
        match self {
            Self::Managed => VariantProfile::managed(),
            Self::Oneshot => VariantProfile::oneshot(),
        }
    }
}

/// Exit-status and diagnostic parameters for one deployment variant.
///
/// The numeric values are a deployment detail, not a stable contract,
/// but they are consistent within one build: every exit the worker
/// process takes maps through exactly one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantProfile {
    on_return: u8,
    on_failure: u8,
    path_diagnostic: DiagnosticLevel,
}

impl VariantProfile {
    /// Profile for long-running deployments supervised by the host.
    ///
    /// The entry point returning is unexpected, so the worker exits
    /// non-zero to make the supervisor take notice. The path line is
    /// kept at debug severity to stay out of steady-state host logs.
    #[must_use]
    pub const fn managed() -> Self {
        Self {
            on_return: 1,
            on_failure: 1,
            path_diagnostic: DiagnosticLevel::Debug,
        }
    }

    /// Profile for bounded runs where the entry point returning is a
    /// clean finish.
    #[must_use]
    pub const fn oneshot() -> Self {
        Self {
            on_return: 0,
            on_failure: 1,
            path_diagnostic: DiagnosticLevel::Info,
        }
    }

    /// Exit status used when the entry point returns.
    #[must_use]
    pub const fn on_return(self) -> u8 {
        self.on_return
    }

    /// Exit status used when bootstrap fails before the entry call.
    #[must_use]
    pub const fn on_failure(self) -> u8 {
        self.on_failure
    }

    /// Severity of the resolved-path diagnostic line.
    #[must_use]
    pub const fn path_diagnostic(self) -> DiagnosticLevel {
        self.path_diagnostic
    }
}

#[cfg(test)]
mod tests;

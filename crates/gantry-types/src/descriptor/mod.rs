//! Background-worker descriptor types submitted to the host registry.
//!
//! A [`WorkerDescriptor`] declares everything the host needs to launch
//! and supervise one background worker: a display name, capability
//! flags, start and restart policies, and the library/function pair the
//! host resolves when (re)launching the worker process. Descriptors are
//! validated before submission so malformed registrations are rejected
//! at host initialisation rather than at first launch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Earliest point in the host's startup sequence at which a worker may
/// be launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPolicy {
    /// As soon as the host's supervisor process is up.
    PostmasterStart,
    /// Once the host has reached a consistent on-disk state.
    ConsistentState,
    /// Only after recovery/startup has fully completed.
    RecoveryFinished,
}

impl StartPolicy {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PostmasterStart => "postmaster_start",
            Self::ConsistentState => "consistent_state",
            Self::RecoveryFinished => "recovery_finished",
        }
    }
}

impl std::fmt::Display for StartPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host behaviour after a worker process terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// The host never relaunches the worker; a crash requires operator
    /// intervention.
    Never,
    /// The host relaunches the worker after the given delay.
    Interval {
        /// Delay before the relaunch, in seconds.
        seconds: u64,
    },
}

impl std::fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Never => f.write_str("never"),
            Self::Interval { seconds } => write!(f, "after {seconds}s"),
        }
    }
}

/// Capability flags the worker requests from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerCapabilities {
    #[serde(default)]
    shared_memory: bool,
}

impl WorkerCapabilities {
    /// Requests or relinquishes access to the host's shared memory.
    #[must_use]
    pub const fn with_shared_memory(mut self, shared_memory: bool) -> Self {
        self.shared_memory = shared_memory;
        self
    }

    /// Returns whether the worker requests shared-memory access.
    #[must_use]
    pub const fn requests_shared_memory(self) -> bool {
        self.shared_memory
    }
}

/// Library/function pair the host resolves to launch the worker.
///
/// This names the shim's own loadable identity, not the engine library:
/// the host starts the worker by loading `library` and calling
/// `function`, and that function performs the engine load itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerEntryPoint {
    library: String,
    function: String,
}

impl WorkerEntryPoint {
    /// Creates an entry pair from a library name and a function name.
    #[must_use]
    pub fn new(library: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            function: function.into(),
        }
    }

    /// Returns the loadable library name.
    #[must_use]
    pub const fn library(&self) -> &str {
        self.library.as_str()
    }

    /// Returns the exported function name.
    #[must_use]
    pub const fn function(&self) -> &str {
        self.function.as_str()
    }
}

/// Declarative description of one background worker.
///
/// Built exactly once at host initialisation and submitted to the
/// host's registry, after which the host owns it outright. The
/// defaults are deliberately conservative: no capabilities, start only
/// after recovery, never restart automatically.
///
/// # Example
///
/// ```
/// use gantry_types::{WorkerDescriptor, WorkerEntryPoint};
///
/// let descriptor = WorkerDescriptor::new(
///     "engine worker",
///     WorkerEntryPoint::new("gantry", "gantry_worker_main"),
/// );
///
/// assert!(descriptor.validate().is_ok());
/// assert_eq!(descriptor.name(), "engine worker");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerDescriptor {
    name: String,
    #[serde(default)]
    capabilities: WorkerCapabilities,
    start_policy: StartPolicy,
    restart_policy: RestartPolicy,
    entry: WorkerEntryPoint,
}

impl WorkerDescriptor {
    /// Creates a descriptor with conservative defaults.
    #[must_use]
    pub fn new(name: impl Into<String>, entry: WorkerEntryPoint) -> Self {
        Self {
            name: name.into(),
            capabilities: WorkerCapabilities::default(),
            start_policy: StartPolicy::RecoveryFinished,
            restart_policy: RestartPolicy::Never,
            entry,
        }
    }

    /// Replaces the requested capability flags.
    #[must_use]
    pub const fn with_capabilities(mut self, capabilities: WorkerCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Replaces the start policy.
    #[must_use]
    pub const fn with_start_policy(mut self, start_policy: StartPolicy) -> Self {
        self.start_policy = start_policy;
        self
    }

    /// Replaces the restart policy.
    #[must_use]
    pub const fn with_restart_policy(mut self, restart_policy: RestartPolicy) -> Self {
        self.restart_policy = restart_policy;
        self
    }

    /// Validates the descriptor, returning an error if it is malformed.
    ///
    /// # Errors
    ///
    /// Returns a [`DescriptorError`] if the display name or either half
    /// of the entry pair is empty.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.name.trim().is_empty() {
            return Err(DescriptorError::EmptyName);
        }
        if self.entry.library.trim().is_empty() {
            return Err(DescriptorError::EmptyLibrary);
        }
        if self.entry.function.trim().is_empty() {
            return Err(DescriptorError::EmptyFunction);
        }
        Ok(())
    }

    /// Returns the display name shown by the host's process listing.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the requested capability flags.
    #[must_use]
    pub const fn capabilities(&self) -> WorkerCapabilities {
        self.capabilities
    }

    /// Returns the start policy.
    #[must_use]
    pub const fn start_policy(&self) -> StartPolicy {
        self.start_policy
    }

    /// Returns the restart policy.
    #[must_use]
    pub const fn restart_policy(&self) -> RestartPolicy {
        self.restart_policy
    }

    /// Returns the library/function pair used to launch the worker.
    #[must_use]
    pub const fn entry(&self) -> &WorkerEntryPoint {
        &self.entry
    }
}

/// Errors raised while validating a [`WorkerDescriptor`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    /// The display name is empty or whitespace.
    #[error("worker display name must not be empty")]
    EmptyName,
    /// The entry library name is empty or whitespace.
    #[error("worker entry library must not be empty")]
    EmptyLibrary,
    /// The entry function name is empty or whitespace.
    #[error("worker entry function must not be empty")]
    EmptyFunction,
}

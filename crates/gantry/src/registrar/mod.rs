//! Worker registration with the host at module-initialisation time.
//!
//! The host calls into this module exactly once per process lifetime,
//! from its module-initialisation hook, before normal operation begins.
//! Registration is an explicit call that hands a typed, validated
//! descriptor across the [`WorkerRegistry`] seam; nothing here mutates
//! ambient host state, and after submission the registrar retains no
//! reference to the descriptor.
//!
//! The registrar must not block: it builds a value and makes one call.
//! Repeated invocation is undefined and unsupported.

use tracing::info;

use gantry_config::defaults;
use gantry_types::{
    DescriptorError, RestartPolicy, StartPolicy, WorkerCapabilities, WorkerDescriptor,
    WorkerEntryPoint,
};

#[cfg(test)]
use mockall::automock;

/// Loadable identity of this shim, as the host resolves it.
pub const SHIM_LIBRARY: &str = "gantry";

/// Exported function the host calls to start each worker process.
pub const SHIM_ENTRY_FUNCTION: &str = "gantry_worker_main";

const REGISTRAR_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::registrar");

/// Errors raised while registering the worker with the host.
#[derive(Debug, thiserror::Error)]
pub enum RegistrarError {
    /// The descriptor failed validation before submission.
    #[error("worker descriptor rejected: {source}")]
    Descriptor {
        /// Underlying validation error.
        #[from]
        source: DescriptorError,
    },

    /// The host registry refused the descriptor.
    #[error("host registry refused worker '{name}': {message}")]
    Refused {
        /// Display name of the rejected worker.
        name: String,
        /// Host-provided description of the refusal.
        message: String,
    },
}

/// Seam through which descriptors reach the host's worker registry.
///
/// Host glue implements this once over the real registration facility;
/// tests implement it with recording doubles.
///
/// # Example
///
/// ```
/// use gantry::registrar::{RegistrarError, WorkerRegistry};
/// use gantry_types::WorkerDescriptor;
///
/// struct RejectingRegistry;
///
/// impl WorkerRegistry for RejectingRegistry {
///     fn submit(&mut self, descriptor: WorkerDescriptor) -> Result<(), RegistrarError> {
///         Err(RegistrarError::Refused {
///             name: descriptor.name().to_owned(),
///             message: String::from("registration window closed"),
///         })
///     }
/// }
/// ```
#[cfg_attr(test, automock)]
pub trait WorkerRegistry {
    /// Accepts ownership of one worker descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrarError::Refused`] when the host cannot accept
    /// the registration.
    fn submit(&mut self, descriptor: WorkerDescriptor) -> Result<(), RegistrarError>;
}

/// Builds the shim's fixed worker descriptor.
///
/// The policy fields are deliberately not configurable: the worker
/// starts only after recovery has finished and is never restarted
/// automatically. A crash therefore surfaces to the operator instead
/// of being silently retried.
///
/// # Errors
///
/// Returns [`RegistrarError::Descriptor`] if `worker_name` is blank.
pub fn build_descriptor(worker_name: &str) -> Result<WorkerDescriptor, RegistrarError> {
    let descriptor = WorkerDescriptor::new(
        worker_name,
        WorkerEntryPoint::new(SHIM_LIBRARY, SHIM_ENTRY_FUNCTION),
    )
    .with_capabilities(WorkerCapabilities::default().with_shared_memory(true))
    .with_start_policy(StartPolicy::RecoveryFinished)
    .with_restart_policy(RestartPolicy::Never);
    descriptor.validate()?;
    Ok(descriptor)
}

/// Declares the engine worker to the host.
///
/// Called from the host's module-initialisation hook; builds the fixed
/// descriptor and hands it to `registry`. Failure propagates to the
/// hook, which owns the fatal-error channel.
///
/// # Errors
///
/// Returns a [`RegistrarError`] if the descriptor fails validation or
/// the host refuses it.
pub fn register_worker<R>(registry: &mut R) -> Result<(), RegistrarError>
where
    R: WorkerRegistry + ?Sized,
{
    let descriptor = build_descriptor(defaults::DEFAULT_WORKER_NAME)?;
    info!(
        target: REGISTRAR_TARGET,
        name = descriptor.name(),
        library = descriptor.entry().library(),
        function = descriptor.entry().function(),
        "submitting background worker descriptor"
    );
    registry.submit(descriptor)
}

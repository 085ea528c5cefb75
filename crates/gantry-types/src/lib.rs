//! Value objects crossing the host boundary of the gantry shim.
//!
//! The `gantry-types` crate defines the data the registrar hands to the
//! host's worker registry and the opaque argument the host hands back to
//! each spawned worker process. Both binaries and the core library need
//! to agree on these shapes, so they live in a dependency-light crate of
//! their own.
//!
//! The central type is [`WorkerDescriptor`]: an immutable, validated
//! description of one background worker. Descriptors are built exactly
//! once, submitted to the host, and owned by the host thereafter; the
//! policy fields are drawn from small closed enumerations rather than
//! free-form flags.
//!
//! # Example
//!
//! ```
//! use gantry_types::{RestartPolicy, StartPolicy, WorkerCapabilities, WorkerDescriptor, WorkerEntryPoint};
//!
//! let descriptor = WorkerDescriptor::new(
//!     "engine worker",
//!     WorkerEntryPoint::new("gantry", "gantry_worker_main"),
//! )
//! .with_capabilities(WorkerCapabilities::default().with_shared_memory(true))
//! .with_start_policy(StartPolicy::RecoveryFinished)
//! .with_restart_policy(RestartPolicy::Never);
//!
//! descriptor.validate().expect("descriptor is well formed");
//! assert_eq!(descriptor.restart_policy(), RestartPolicy::Never);
//! ```

mod argument;
mod descriptor;

pub use self::argument::StartArgument;
pub use self::descriptor::{
    DescriptorError, RestartPolicy, StartPolicy, WorkerCapabilities, WorkerDescriptor,
    WorkerEntryPoint,
};

//! Background-worker bootstrap shim for a PostgreSQL-style host.
//!
//! The shim has two halves that run at different times in different
//! processes:
//!
//! 1. The **registrar** runs once, inside the host's main process, at
//!    module-initialisation time. It builds a validated
//!    [`gantry_types::WorkerDescriptor`] (display name, shared-memory
//!    capability, start deferred until recovery has finished, never
//!    restarted automatically) and submits it through the
//!    [`WorkerRegistry`] seam. Ownership of the descriptor transfers to
//!    the host.
//! 2. The **trampoline** runs once per spawned worker process. It
//!    unblocks the host's default signal mask, resolves the engine
//!    library path, logs it, opens the library with eager resolution
//!    and global symbol visibility, looks up the fixed entry symbol,
//!    invokes it with the opaque start argument, and closes the handle
//!    once the call returns. Every failure on that path is fatal for
//!    the worker process; recovery is the host's business and the
//!    registered restart policy says "never".
//!
//! The exported [`gantry_worker_main`] ties the two together: it is the
//! function named by the descriptor's relaunch pair, and its body is
//! the trampoline followed by process exit with a status mapped through
//! the active [`gantry_config::VariantProfile`].
//!
//! # Example
//!
//! ```
//! use gantry::{WorkerRegistry, RegistrarError, register_worker};
//! use gantry_types::WorkerDescriptor;
//!
//! #[derive(Default)]
//! struct RecordingRegistry(Vec<WorkerDescriptor>);
//!
//! impl WorkerRegistry for RecordingRegistry {
//!     fn submit(&mut self, descriptor: WorkerDescriptor) -> Result<(), RegistrarError> {
//!         self.0.push(descriptor);
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = RecordingRegistry::default();
//! register_worker(&mut registry).expect("registration succeeds");
//! assert_eq!(registry.0.len(), 1);
//! ```

mod entry;
pub mod exit;
pub mod registrar;
pub mod telemetry;
pub mod trampoline;

pub use self::entry::{gantry_worker_main, run_worker};
pub use self::exit::exit_status;
pub use self::registrar::{
    RegistrarError, SHIM_ENTRY_FUNCTION, SHIM_LIBRARY, WorkerRegistry, build_descriptor,
    register_worker,
};
pub use self::telemetry::{TelemetryError, TelemetryHandle};
pub use self::trampoline::{
    DynamicEngineLoader, EngineLibrary, EngineLoader, EntryFn, HostSignalGate, SignalGate,
    TrampolineError, run_trampoline, run_trampoline_with,
};

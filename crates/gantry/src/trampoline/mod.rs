//! Per-process bootstrap that loads the engine and jumps into it.
//!
//! The trampoline is the entire body of a spawned worker process. Its
//! steps run in a fixed order: unblock the host's default signal mask,
//! resolve the engine library path, log it, open the library, resolve
//! the fixed entry symbol, invoke it with the opaque start argument,
//! and close the handle once the call returns. The entry call is
//! expected to block for the worker's whole useful lifetime; the
//! trampoline does no other work concurrently.
//!
//! Nothing on this path is retried. A load failure, a missing symbol,
//! or the entry point crashing all end the worker process; recovery is
//! the host's responsibility through its restart policy, which the
//! registrar fixes to "never".
//!
//! The signal mask and the dynamic loader sit behind the
//! [`SignalGate`] and [`EngineLoader`] traits so tests can observe
//! step ordering with doubles while production uses [`HostSignalGate`]
//! and [`DynamicEngineLoader`].

mod loader;
mod signals;

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use gantry_config::{defaults, DiagnosticLevel, LoaderConfig};
use gantry_types::StartArgument;

pub use self::loader::{DynamicEngineLoader, EngineLibrary, EngineLoader, EntryFn};
pub use self::signals::{HostSignalGate, SignalGate};

const TRAMPOLINE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::trampoline");

/// Errors that end a worker process during bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum TrampolineError {
    /// The host's default signal mask could not be lifted.
    #[error("failed to unblock worker signals: {source}")]
    SignalUnblock {
        /// Underlying OS error.
        #[source]
        source: nix::errno::Errno,
    },

    /// The engine library could not be opened.
    #[error("failed to load engine library '{path}': {message}")]
    OpenFailed {
        /// Path the loader attempted to open.
        path: Utf8PathBuf,
        /// Human-readable failure description.
        message: String,
        /// Optional underlying loader error.
        #[source]
        source: Option<Arc<libloading::Error>>,
    },

    /// The opened library does not export the entry symbol.
    #[error("engine library '{path}' does not export '{symbol}': {message}")]
    SymbolMissing {
        /// Path of the library that was searched.
        path: Utf8PathBuf,
        /// Symbol name that was looked up.
        symbol: String,
        /// Human-readable failure description.
        message: String,
        /// Optional underlying loader error.
        #[source]
        source: Option<Arc<libloading::Error>>,
    },
}

/// Runs the trampoline with the production collaborators.
///
/// # Errors
///
/// Returns a [`TrampolineError`] if the signal mask cannot be lifted,
/// the engine library cannot be opened, or the entry symbol is absent.
pub fn run_trampoline(config: &LoaderConfig, argument: StartArgument) -> Result<(), TrampolineError> {
    run_trampoline_with(&HostSignalGate, &DynamicEngineLoader::new(), config, argument)
}

/// Runs the trampoline with injected collaborators.
///
/// The signal mask is lifted before any other step so the host's
/// shutdown signal can reach the worker. The library handle is dropped,
/// and thereby closed, on every path that reaches a successful open,
/// including the missing-symbol failure.
///
/// # Errors
///
/// Same conditions as [`run_trampoline`].
pub fn run_trampoline_with<G, L>(
    gate: &G,
    loader: &L,
    config: &LoaderConfig,
    argument: StartArgument,
) -> Result<(), TrampolineError>
where
    G: SignalGate,
    L: EngineLoader,
{
    gate.unblock_all()?;
    let path = config.locator().resolve();
    emit_path_diagnostic(config.variant().path_diagnostic(), &path);
    let library = loader.open(&path)?;
    let entry = library.entry(defaults::ENGINE_ENTRY_SYMBOL)?;
    // SAFETY: the symbol was resolved from `library`, which stays open
    // until after the call returns, and the entry ABI is the fixed
    // one-word contract the engine library exports.
    unsafe { entry(argument.as_raw()) };
    drop(library);
    Ok(())
}

fn emit_path_diagnostic(level: DiagnosticLevel, path: &Utf8Path) {
    match level {
        DiagnosticLevel::Debug => debug!(
            target: TRAMPOLINE_TARGET,
            path = %path,
            "resolved engine library path"
        ),
        DiagnosticLevel::Info => info!(
            target: TRAMPOLINE_TARGET,
            path = %path,
            "resolved engine library path"
        ),
    }
}

#[cfg(test)]
mod tests;

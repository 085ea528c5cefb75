//! Signal-mask control for freshly spawned worker processes.
//!
//! The host starts worker processes with every signal blocked so its
//! own handlers stay undisturbed during the fork window. The first
//! thing a worker must do is lift that mask; until it does, the host's
//! shutdown signal cannot reach it and the worker is uncancellable.

use nix::sys::signal::{SigSet, SigmaskHow, sigprocmask};
use tracing::debug;

use super::{TRAMPOLINE_TARGET, TrampolineError};

/// Abstraction over the worker's signal-mask control.
pub trait SignalGate {
    /// Lifts the host's default signal-blocking posture.
    ///
    /// # Errors
    ///
    /// Returns [`TrampolineError::SignalUnblock`] if the mask cannot be
    /// changed.
    fn unblock_all(&self) -> Result<(), TrampolineError>;
}

/// Gate that clears the process signal mask through `sigprocmask`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostSignalGate;

impl SignalGate for HostSignalGate {
    fn unblock_all(&self) -> Result<(), TrampolineError> {
        sigprocmask(SigmaskHow::SIG_UNBLOCK, Some(&SigSet::all()), None)
            .map_err(|source| TrampolineError::SignalUnblock { source })?;
        debug!(target: TRAMPOLINE_TARGET, "worker signal mask cleared");
        Ok(())
    }
}

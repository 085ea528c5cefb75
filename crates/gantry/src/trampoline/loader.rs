//! Dynamic loading of the engine shared object.
//!
//! The production loader opens the engine with eager symbol resolution
//! and global visibility: unresolved symbols fail the open rather than
//! a later call, and symbols the engine exports stay resolvable to
//! libraries it loads transitively. Closing is the handle's drop, so a
//! successful open is always paired with exactly one close no matter
//! which path the trampoline takes afterwards.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use libloading::os::unix::{Library, RTLD_GLOBAL, RTLD_NOW, Symbol};

use super::TrampolineError;

/// Signature of the engine's exported execution body: accept one
/// opaque word, return only when the engine decides to stop.
pub type EntryFn = unsafe extern "C-unwind" fn(usize);

/// An opened engine library from which the entry point can be resolved.
///
/// Dropping the value closes the library.
pub trait EngineLibrary {
    /// Looks up the entry function by symbol name.
    ///
    /// The returned pointer is only valid while this library stays
    /// open; callers must keep the library alive across the call.
    ///
    /// # Errors
    ///
    /// Returns [`TrampolineError::SymbolMissing`] when the library does
    /// not export `symbol`.
    fn entry(&self, symbol: &str) -> Result<EntryFn, TrampolineError>;
}

/// Abstraction over the dynamic-loading facility.
pub trait EngineLoader {
    /// Opens the library at `path` for immediate use.
    ///
    /// # Errors
    ///
    /// Returns [`TrampolineError::OpenFailed`] when the file is
    /// missing, a dependency is unresolved, or the binary format is
    /// incompatible.
    fn open(&self, path: &Utf8Path) -> Result<Box<dyn EngineLibrary>, TrampolineError>;
}

/// Loader backed by the platform's dynamic linker.
#[derive(Debug, Default, Clone, Copy)]
pub struct DynamicEngineLoader;

impl DynamicEngineLoader {
    /// Creates the production loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl EngineLoader for DynamicEngineLoader {
    fn open(&self, path: &Utf8Path) -> Result<Box<dyn EngineLibrary>, TrampolineError> {
        // SAFETY: opening runs the engine's initialisers; the library
        // directory is part of the host deployment's trust boundary.
        let inner = unsafe { Library::open(Some(path.as_std_path()), RTLD_NOW | RTLD_GLOBAL) }
            .map_err(|error| {
                let message = error.to_string();
                TrampolineError::OpenFailed {
                    path: path.to_owned(),
                    message,
                    source: Some(Arc::new(error)),
                }
            })?;
        Ok(Box::new(DynamicEngineLibrary {
            path: path.to_owned(),
            inner,
        }))
    }
}

struct DynamicEngineLibrary {
    path: Utf8PathBuf,
    inner: Library,
}

impl EngineLibrary for DynamicEngineLibrary {
    fn entry(&self, symbol: &str) -> Result<EntryFn, TrampolineError> {
        // SAFETY: the entry signature is fixed by the worker ABI
        // contract; a mismatched export is a deployment error the host
        // cannot detect either.
        let resolved: Symbol<EntryFn> =
            unsafe { self.inner.get(symbol.as_bytes()) }.map_err(|error| {
                let message = error.to_string();
                TrampolineError::SymbolMissing {
                    path: self.path.clone(),
                    symbol: symbol.to_owned(),
                    message,
                    source: Some(Arc::new(error)),
                }
            })?;
        Ok(*resolved)
    }
}

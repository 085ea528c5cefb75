//! Unit tests for trampoline step ordering and failure handling.
//!
//! The doubles record every step into a thread-local event log; each
//! test runs on its own thread, so the logs never interleave.

use std::cell::RefCell;

use camino::{Utf8Path, Utf8PathBuf};

use gantry_config::{LibraryLocator, LoaderConfig, VariantKind, defaults};
use gantry_types::StartArgument;
use nix::errno::Errno;

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Unblock,
    Open(Utf8PathBuf),
    Resolve(String),
    Invoke(usize),
    Close,
}

thread_local! {
    static EVENTS: RefCell<Vec<Event>> = const { RefCell::new(Vec::new()) };
}

fn record(event: Event) {
    EVENTS.with(|events| events.borrow_mut().push(event));
}

fn drain() -> Vec<Event> {
    EVENTS.with(|events| events.borrow_mut().drain(..).collect())
}

extern "C-unwind" fn recording_entry(argument: usize) {
    record(Event::Invoke(argument));
}

struct RecordingGate {
    fail: bool,
}

impl SignalGate for RecordingGate {
    fn unblock_all(&self) -> Result<(), TrampolineError> {
        record(Event::Unblock);
        if self.fail {
            return Err(TrampolineError::SignalUnblock {
                source: Errno::EPERM,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum LibraryBehaviour {
    Resolve,
    MissingSymbol,
}

struct FakeLibrary {
    behaviour: LibraryBehaviour,
}

impl EngineLibrary for FakeLibrary {
    fn entry(&self, symbol: &str) -> Result<EntryFn, TrampolineError> {
        record(Event::Resolve(symbol.to_owned()));
        match self.behaviour {
            LibraryBehaviour::Resolve => Ok(recording_entry as EntryFn),
            LibraryBehaviour::MissingSymbol => Err(TrampolineError::SymbolMissing {
                path: Utf8PathBuf::from("/opt/pg/lib/ferretdb.so"),
                symbol: symbol.to_owned(),
                message: String::from("undefined symbol"),
                source: None,
            }),
        }
    }
}

impl Drop for FakeLibrary {
    fn drop(&mut self) {
        record(Event::Close);
    }
}

enum LoaderBehaviour {
    Open(LibraryBehaviour),
    Fail,
}

struct FakeLoader {
    behaviour: LoaderBehaviour,
}

impl EngineLoader for FakeLoader {
    fn open(&self, path: &Utf8Path) -> Result<Box<dyn EngineLibrary>, TrampolineError> {
        record(Event::Open(path.to_owned()));
        match self.behaviour {
            LoaderBehaviour::Open(behaviour) => Ok(Box::new(FakeLibrary { behaviour })),
            LoaderBehaviour::Fail => Err(TrampolineError::OpenFailed {
                path: path.to_owned(),
                message: String::from("no such file"),
                source: None,
            }),
        }
    }
}

fn config() -> LoaderConfig {
    LoaderConfig::new(
        LibraryLocator::new("/opt/pg/lib").expect("valid directory"),
        VariantKind::Managed.profile(),
    )
}

fn gate() -> RecordingGate {
    RecordingGate { fail: false }
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[test]
fn runs_every_step_in_order_and_closes_after_the_call() {
    drain();
    let loader = FakeLoader {
        behaviour: LoaderBehaviour::Open(LibraryBehaviour::Resolve),
    };
    run_trampoline_with(&gate(), &loader, &config(), StartArgument::from_raw(42))
        .expect("trampoline succeeds");
    assert_eq!(
        drain(),
        vec![
            Event::Unblock,
            Event::Open(Utf8PathBuf::from("/opt/pg/lib/ferretdb.so")),
            Event::Resolve(defaults::ENGINE_ENTRY_SYMBOL.to_owned()),
            Event::Invoke(42),
            Event::Close,
        ]
    );
}

#[test]
fn forwards_the_argument_unmodified() {
    drain();
    let loader = FakeLoader {
        behaviour: LoaderBehaviour::Open(LibraryBehaviour::Resolve),
    };
    run_trampoline_with(&gate(), &loader, &config(), StartArgument::ZERO)
        .expect("trampoline succeeds");
    assert!(drain().contains(&Event::Invoke(0)));
}

// ---------------------------------------------------------------------------
// Failure paths
// ---------------------------------------------------------------------------

#[test]
fn open_failure_skips_the_entry_point_and_leaves_no_handle() {
    drain();
    let loader = FakeLoader {
        behaviour: LoaderBehaviour::Fail,
    };
    let err = run_trampoline_with(&gate(), &loader, &config(), StartArgument::ZERO)
        .expect_err("open should fail");
    assert!(matches!(err, TrampolineError::OpenFailed { .. }));
    assert_eq!(
        drain(),
        vec![
            Event::Unblock,
            Event::Open(Utf8PathBuf::from("/opt/pg/lib/ferretdb.so")),
        ]
    );
}

#[test]
fn missing_symbol_still_closes_the_handle() {
    drain();
    let loader = FakeLoader {
        behaviour: LoaderBehaviour::Open(LibraryBehaviour::MissingSymbol),
    };
    let err = run_trampoline_with(&gate(), &loader, &config(), StartArgument::ZERO)
        .expect_err("lookup should fail");
    assert!(matches!(err, TrampolineError::SymbolMissing { .. }));
    assert_eq!(
        drain(),
        vec![
            Event::Unblock,
            Event::Open(Utf8PathBuf::from("/opt/pg/lib/ferretdb.so")),
            Event::Resolve(defaults::ENGINE_ENTRY_SYMBOL.to_owned()),
            Event::Close,
        ]
    );
}

#[test]
fn signal_failure_stops_before_the_load_attempt() {
    drain();
    let loader = FakeLoader {
        behaviour: LoaderBehaviour::Open(LibraryBehaviour::Resolve),
    };
    let err = run_trampoline_with(
        &RecordingGate { fail: true },
        &loader,
        &config(),
        StartArgument::ZERO,
    )
    .expect_err("gate should fail");
    assert!(matches!(err, TrampolineError::SignalUnblock { .. }));
    assert_eq!(drain(), vec![Event::Unblock]);
}

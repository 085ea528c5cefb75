//! Integration coverage for the production engine loader.

use std::fs;

use camino::Utf8PathBuf;
use gantry::{DynamicEngineLoader, EngineLoader, TrampolineError};

#[test]
fn open_fails_for_a_missing_file() {
    let path = Utf8PathBuf::from("/nonexistent/gantry/lib/ferretdb.so");
    let error = DynamicEngineLoader::new()
        .open(&path)
        .map(|_| ())
        .expect_err("open must fail");
    assert!(matches!(error, TrampolineError::OpenFailed { .. }));
    assert!(error.to_string().contains("ferretdb.so"));
}

#[test]
fn open_fails_for_an_invalid_object() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ferretdb.so");
    fs::write(&path, b"not a shared object").expect("write stub file");
    let utf8 = Utf8PathBuf::from_path_buf(path).expect("utf8 path");
    let error = DynamicEngineLoader::new()
        .open(&utf8)
        .map(|_| ())
        .expect_err("open must fail");
    assert!(matches!(error, TrampolineError::OpenFailed { .. }));
}

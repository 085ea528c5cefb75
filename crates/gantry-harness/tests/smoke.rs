//! End-to-end runs of the harness binary against broken deployments.

use assert_cmd::Command;
use predicates::prelude::*;

fn harness() -> Command {
    Command::cargo_bin("gantry-harness").expect("harness binary builds")
}

#[test]
fn missing_engine_library_exits_with_the_failure_status() {
    let dir = tempfile::tempdir().expect("tempdir");
    harness()
        .args([
            "--library-dir",
            dir.path().to_str().expect("utf8 path"),
            "--variant",
            "oneshot",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ferretdb.so"));
}

#[test]
fn invalid_object_exits_with_the_failure_status() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("ferretdb.so"), b"not a shared object")
        .expect("write stub file");
    harness()
        .args(["--library-dir", dir.path().to_str().expect("utf8 path")])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn relative_library_directory_is_rejected_before_any_load() {
    harness()
        .args(["--library-dir", "pg/lib"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absolute"));
}

#[test]
fn help_describes_the_variant_flag() {
    harness()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--variant"));
}

//! End-to-end termination scenarios, run in a child process so the real exit
//! status and stderr can be observed.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const DIAGNOSTIC: &str = "error: atexit handler error:";

fn demo(sentinel: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_atexit-demo"));
    command
        .env_remove("RUST_LOG")
        .env_remove("ATEXIT_FAULT_DIAGNOSTICS")
        .env_remove("ATEXIT_FATAL_EXIT_CODE")
        .env("ATEXIT_LOG", "off")
        .arg("--sentinel")
        .arg(sentinel);
    command
}

fn run(command: &mut Command) -> Output {
    command.output().expect("Failed to execute atexit-demo")
}

fn sentinel_contents(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

#[test]
fn test_faulting_handler_does_not_stop_others() {
    let temp_dir = TempDir::new().unwrap();
    let sentinel = temp_dir.path().join("sentinel");

    let output = run(demo(&sentinel)
        .args(["--exit-code", "1"])
        .args(["write:A", "panic:handler B exploded", "write:C"]));

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(sentinel_contents(&sentinel), "AC");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(&format!("{DIAGNOSTIC} handler B exploded")),
        "missing diagnostic in stderr: {stderr}"
    );
}

#[test]
fn test_cancelled_handler_never_runs() {
    let temp_dir = TempDir::new().unwrap();
    let sentinel = temp_dir.path().join("sentinel");

    let output = run(demo(&sentinel).args(["write:D", "cancel-last", "write:E"]));

    assert!(output.status.success());
    assert_eq!(sentinel_contents(&sentinel), "E");
}

#[test]
fn test_exit_code_is_propagated() {
    let temp_dir = TempDir::new().unwrap();
    let sentinel = temp_dir.path().join("sentinel");

    let output = run(demo(&sentinel).args(["--exit-code", "42", "write:done"]));

    assert_eq!(output.status.code(), Some(42));
    assert_eq!(sentinel_contents(&sentinel), "done");
}

#[test]
fn test_cancel_then_fault_then_exit() {
    // data handler, cancelled handler, faulting handler, exit 1
    let temp_dir = TempDir::new().unwrap();
    let sentinel = temp_dir.path().join("main.out");
    let data = "2026-10-17 12:00:00 +0000 UTC";

    let output = run(demo(&sentinel).args(["--exit-code", "1"]).args([
        format!("write:{data}"),
        "write:\nunused".to_string(),
        "cancel-last".to_string(),
        "panic:integer divide by zero".to_string(),
    ]));

    assert!(!output.status.success());
    assert_eq!(sentinel_contents(&sentinel), data);
}

#[test]
fn test_fatal_plain_runs_handlers_then_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let sentinel = temp_dir.path().join("sentinel");

    let output = run(demo(&sentinel).args(["--fatal", "plain", "write:flushed"]));

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(sentinel_contents(&sentinel), "flushed");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("demo failed after 1 steps"), "stderr: {stderr}");
}

#[test]
fn test_fatal_format_message() {
    let temp_dir = TempDir::new().unwrap();
    let sentinel = temp_dir.path().join("sentinel");

    let output = run(demo(&sentinel).args(["--fatal", "format", "write:x", "write:y"]));

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(sentinel_contents(&sentinel), "xy");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("demo failed after 2 steps"), "stderr: {stderr}");
}

#[test]
fn test_fatal_lines_with_configured_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let sentinel = temp_dir.path().join("sentinel");

    let output = run(demo(&sentinel)
        .env("ATEXIT_FATAL_EXIT_CODE", "4")
        .args(["--fatal", "lines", "write:z"]));

    assert_eq!(output.status.code(), Some(4));
    assert_eq!(sentinel_contents(&sentinel), "z");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("demo failed\nsteps: 1\n"), "stderr: {stderr}");
}

#[test]
fn test_fault_diagnostics_can_be_disabled() {
    let temp_dir = TempDir::new().unwrap();
    let sentinel = temp_dir.path().join("sentinel");

    let output = run(demo(&sentinel)
        .env("ATEXIT_FAULT_DIAGNOSTICS", "false")
        .args(["panic:quiet", "write:after"]));

    assert!(output.status.success());
    assert_eq!(sentinel_contents(&sentinel), "after");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains(DIAGNOSTIC), "stderr: {stderr}");
}

#[test]
fn test_invalid_step_is_rejected_before_registering() {
    let temp_dir = TempDir::new().unwrap();
    let sentinel = temp_dir.path().join("sentinel");

    let output = run(demo(&sentinel).args(["write:never", "sleep:5"]));

    assert_eq!(output.status.code(), Some(2));
    assert!(!sentinel.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown step"), "stderr: {stderr}");
}

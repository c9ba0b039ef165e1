//! End-to-end tests for the `ctty` binary
//!
//! Each test starts the binary in a new session (`setsid`) so it has no
//! controlling terminal, whatever terminal the test runner itself has.

use std::os::unix::process::CommandExt;
use std::process::{Command, Output};

const CTTY: &str = env!("CARGO_BIN_EXE_ctty");

fn run_detached(args: &[&str]) -> Output
{
    let mut command = Command::new(CTTY);
    command.args(args).env_remove("RUST_LOG").env_remove("CTTY_LOG_FILE");

    // SAFETY: setsid is async-signal-safe and touches no memory shared with
    // the parent.
    unsafe {
        command.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(std::io::Error::last_os_error());
            }
            Ok(())
        });
    }

    command.output().expect("failed to run ctty")
}

fn stdout(output: &Output) -> String
{
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_detached_legacy_prints_zero()
{
    let output = run_detached(&["device", "--legacy"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0");
}

#[test]
fn test_detached_device_fails()
{
    let output = run_detached(&["device"]);
    assert!(!output.status.success());

    if cfg!(any(target_os = "freebsd", target_os = "macos")) {
        assert_eq!(stdout(&output), "none");
    } else {
        assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported platform"));
    }
}

#[test]
fn test_detached_path_fails()
{
    let output = run_detached(&["path"]);
    assert!(!output.status.success());
}

#[test]
fn test_legacy_runs_agree()
{
    let first = run_detached(&["device", "--legacy"]);
    let second = run_detached(&["device", "--legacy"]);
    assert_eq!(stdout(&first), stdout(&second));
}

#[test]
fn test_info_reports_layout()
{
    let output = run_detached(&["info"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("layout:"));
    assert!(text.contains("device:      none") || text.contains("device:      error"));

    if cfg!(target_os = "macos") {
        assert!(text.contains("kp_eproc.e_tdev"));
    } else if cfg!(target_os = "freebsd") {
        assert!(text.contains("ki_tdev"));
    } else {
        assert!(text.contains("unsupported"));
    }
}

#[test]
fn test_json_logs_go_to_stderr()
{
    let output = run_detached(&["device", "--legacy", "--log-level", "debug", "--log-format", "json"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0");
    assert!(String::from_utf8_lossy(&output.stderr).contains('{'));
}

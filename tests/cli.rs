//! Runs the built binary to check exit codes and usage output.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::tempdir;

fn downurl() -> Command {
    Command::new(env!("CARGO_BIN_EXE_downurl"))
}

#[test]
fn missing_argument_prints_usage_and_exits_1() {
    let tmp = tempdir().unwrap();
    let out = downurl().current_dir(tmp.path()).output().unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage: downurl <urls.txt> [options]"), "{stderr}");
    assert!(!tmp.path().join("output").exists());
}

#[test]
fn directory_argument_exits_1() {
    let tmp = tempdir().unwrap();
    let out = downurl()
        .current_dir(tmp.path())
        .arg(tmp.path())
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("must be a file of URLs"), "{stderr}");
    assert!(!tmp.path().join("output").exists());
}

#[test]
fn empty_stdin_writes_an_empty_report() {
    let tmp = tempdir().unwrap();
    let mut child = downurl()
        .current_dir(tmp.path())
        .args(["-", "--no-archive", "-q"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"\n  \n").unwrap();
    let out = child.wait_with_output().unwrap();

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Done: 0 success, 0 failed"), "{stdout}");
    let report = tmp.path().join("output").join("report.txt");
    assert_eq!(std::fs::read_to_string(report).unwrap(), "");
}

#[test]
fn unknown_format_is_rejected() {
    let out = downurl().args(["-f", "xml", "urls.txt"]).output().unwrap();
    assert!(!out.status.success());
}

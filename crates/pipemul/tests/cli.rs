//! End-to-end tests spawning the real binary: two processes, two pipes.

use std::process::{Command, Output};

fn pipemul(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pipemul"))
        .args(args)
        .output()
        .expect("failed to run pipemul")
}

#[test]
fn multiplies_valid_operands() {
    let out = pipemul(&["1234", "5678"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("== 7006652"), "stdout: {stdout}");
}

#[test]
fn boundary_operands() {
    let cases = [
        (["1000", "1000"], "1000000"),
        (["9999", "9999"], "99980001"),
        (["1000", "9999"], "9999000"),
    ];
    for (args, expected) in cases {
        let out = pipemul(&args);
        assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

        let stdout = String::from_utf8_lossy(&out.stdout);
        let line = stdout.lines().last().unwrap_or("");
        assert!(line.ends_with(&format!("== {expected}")), "stdout: {stdout}");
    }
}

#[test]
fn rejects_wrong_argument_count() {
    for args in [&[][..], &["1234"][..], &["1234", "5678", "9012"][..]] {
        let out = pipemul(args);
        assert!(!out.status.success());
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("error:"), "stderr: {stderr}");
        assert!(out.stdout.is_empty());
    }
}

#[test]
fn rejects_out_of_range_operands() {
    for args in [&["999", "5678"][..], &["1234", "10000"][..]] {
        let out = pipemul(args);
        assert_eq!(out.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("out of range"), "stderr: {stderr}");
    }
}

#[test]
fn rejects_non_numeric_operands() {
    let out = pipemul(&["12x4", "5678"]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("not a valid integer"), "stderr: {stderr}");
}

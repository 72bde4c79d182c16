// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests for the `ftl` binary.
//!
//! These drive the compiled binary against the core crate's fixture corpus
//! and assert exit codes and output shape.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Path to a fixture in the core crate's corpus.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../ftl-core/tests/fixtures")
        .join(name)
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ftl"))
        .args(args)
        .output()
        .expect("failed to run ftl binary")
}

#[test]
fn valid_file_exits_zero() {
    let path = fixture("simple.ftl");
    let output = run(&[path.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());
}

#[test]
fn file_with_errors_prints_caret_diagnostics_and_fails() {
    let path = fixture("junk.ftl");
    let output = run(&[path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parse "), "stderr: {stderr}");
    assert!(stderr.contains("3:11"), "stderr: {stderr}");
    assert!(stderr.contains("bad = { 1 + 2 }"), "stderr: {stderr}");
    assert!(stderr.contains("^ missing closing '}'"), "stderr: {stderr}");
}

#[test]
fn json_flag_prints_canonical_resource() {
    let path = fixture("simple.ftl");
    let output = run(&["--json", path.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("{\n    \"type\": \"Resource\""), "stdout: {stdout}");
    assert!(stdout.contains("\"name\": \"hello\""));
}

#[test]
fn json_flag_emits_junk_for_broken_files() {
    let path = fixture("junk.ftl");
    let output = run(&["--json", path.to_str().unwrap()]);
    // Parse errors still fail the run, but the partial tree is printed.
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"type\": \"Junk\""), "stdout: {stdout}");
}

#[test]
fn missing_file_fails() {
    let output = run(&["no-such-file.ftl"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("read "), "stderr: {stderr}");
}

#[test]
fn no_files_prints_usage_and_exits_one() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "stdout: {stdout}");
}

#[test]
fn multiple_files_parse_in_one_run() {
    let good = fixture("simple.ftl");
    let bad = fixture("junk.ftl");
    let output = run(&[good.to_str().unwrap(), bad.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}

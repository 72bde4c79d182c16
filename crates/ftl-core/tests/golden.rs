// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Golden corpus tests.
//!
//! Each fixture pairs an `.ftl` input with the expected canonical AST JSON.
//! The comparison is structural (parsed JSON values), so the `.json` files
//! can be formatted for readability; `ftl_core::json` formatting itself is
//! covered by unit tests.

use ftl_core::json;
use ftl_core::syntax::parse;

fn check(name: &str, source: &str, expected: &str) {
    let (resource, _errors) = parse(source.as_bytes());
    let rendered = json::to_string(&resource).unwrap();
    let actual: serde_json::Value = serde_json::from_str(&rendered)
        .unwrap_or_else(|error| panic!("{name}: canonical output is not valid JSON: {error}"));
    let expected: serde_json::Value = serde_json::from_str(expected)
        .unwrap_or_else(|error| panic!("{name}: bad fixture JSON: {error}"));
    assert_eq!(actual, expected, "fixture {name} mismatch:\n{rendered}");
}

#[test]
fn simple() {
    check(
        "simple",
        include_str!("fixtures/simple.ftl"),
        include_str!("fixtures/simple.json"),
    );
}

#[test]
fn select() {
    check(
        "select",
        include_str!("fixtures/select.ftl"),
        include_str!("fixtures/select.json"),
    );
}

#[test]
fn references() {
    check(
        "references",
        include_str!("fixtures/references.ftl"),
        include_str!("fixtures/references.json"),
    );
}

#[test]
fn multiline() {
    check(
        "multiline",
        include_str!("fixtures/multiline.ftl"),
        include_str!("fixtures/multiline.json"),
    );
}

#[test]
fn tabs() {
    check(
        "tabs",
        include_str!("fixtures/tabs.ftl"),
        include_str!("fixtures/tabs.json"),
    );
}

#[test]
fn junk() {
    let source = include_str!("fixtures/junk.ftl");
    check("junk", source, include_str!("fixtures/junk.json"));

    // The junk fixture must also report a diagnostic at the '+'.
    let (_, errors) = parse(source.as_bytes());
    let errors = errors.expect("junk fixture should produce diagnostics");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.errors()[0].message, "missing closing '}'");
    assert_eq!(errors.errors()[0].line, 3);
    assert_eq!(errors.errors()[0].column, 11);
}

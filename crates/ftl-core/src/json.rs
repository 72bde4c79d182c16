// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Canonical JSON rendering of AST nodes.
//!
//! The canonical form is the normative contract for the AST shape: a `type`
//! tag first on every node, arrays present even when empty, `null` for
//! absent optional nodes. This module fixes the formatting: 4-space
//! indentation, no HTML escaping, and a single trailing newline.
//! Identical trees always render to byte-identical output.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Renders a node (usually a [`crate::ast::Resource`]) as canonical JSON.
///
/// # Errors
///
/// Returns any underlying [`serde_json::Error`]; serialization of AST
/// nodes does not fail in practice.
pub fn to_string<T: Serialize>(node: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    node.serialize(&mut serializer)?;
    buf.push(b'\n');
    // The serializer only ever writes valid UTF-8.
    Ok(String::from_utf8(buf).expect("serialized JSON is UTF-8"))
}

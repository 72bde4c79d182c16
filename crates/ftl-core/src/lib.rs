// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fluent (FTL) resource parser core.
//!
//! This crate contains the core functionality:
//! - AST definitions with canonical tagged-JSON serialization
//! - Parsing (byte-driven recursive descent with error recovery)
//! - Diagnostics (position-annotated parse errors, caret rendering)
//!
//! The parser always produces a [`ast::Resource`], even for malformed
//! input: entries that fail to parse are preserved as [`ast::Junk`] and
//! parsing resumes at the next entry boundary.

#![doc = include_str!("../../../README.md")]

pub mod ast;
pub mod json;
pub mod syntax;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::ast::{
        Entry, Expression, Identifier, InlineExpression, Message, Pattern, PatternElement,
        Resource, Term,
    };
    pub use crate::syntax::{parse, ParseError, ParseErrors};
}

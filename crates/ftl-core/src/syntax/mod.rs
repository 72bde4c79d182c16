// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parsing infrastructure for FTL source.
//!
//! The entry point is [`parse`], which consumes raw bytes and always
//! produces a [`Resource`](crate::ast::Resource):
//!
//! ```
//! use ftl_core::syntax::parse;
//!
//! let (resource, errors) = parse(b"hello = Hello, world!\n");
//! assert!(errors.is_none());
//! assert_eq!(resource.body.len(), 1);
//! ```
//!
//! # Error Handling
//!
//! The parser uses entry-level error recovery: an error anywhere inside an
//! entry drops that entry, records a [`ParseError`], emits a
//! [`Junk`](crate::ast::Junk) node holding the verbatim source slice, and
//! resumes at the next entry boundary. Errors never abort the parse; when
//! any occurred they are returned together as [`ParseErrors`], ordered by
//! byte position.

mod error;
mod parser;


pub use error::{ParseError, ParseErrors};
pub use parser::parse;

// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parse diagnostics.
//!
//! [`ParseError`] is a single position-annotated diagnostic; [`ParseErrors`]
//! is the collection returned from a parse that encountered at least one.
//! The collection has a short one-line rendering (`Display`, members joined
//! with `"; "`) and a [`verbose`](ParseErrors::verbose) rendering that
//! underlines the offending column with a caret.

use std::fmt::{self, Write as _};

use ecow::EcoString;
use thiserror::Error;

/// A single parse diagnostic.
///
/// `line` and `column` are 1-based; `position` is the byte offset of the
/// offending character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub position: usize,
    pub message: EcoString,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(line: usize, column: usize, position: usize, message: impl Into<EcoString>) -> Self {
        Self {
            line,
            column,
            position,
            message: message.into(),
        }
    }
}

/// All diagnostics from one parse, in byte-position order, together with
/// the source they point into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors {
    source: Vec<u8>,
    errors: Vec<ParseError>,
}

impl ParseErrors {
    pub(crate) fn new(source: Vec<u8>, errors: Vec<ParseError>) -> Self {
        Self { source, errors }
    }

    /// The individual diagnostics, in source order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Number of diagnostics; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Renders every diagnostic with its source line and a caret under the
    /// reported column:
    ///
    /// ```text
    /// 1:11
    /// bad = { 1 + 2 }
    ///           ^ missing closing '}'
    /// ```
    #[must_use]
    pub fn verbose(&self) -> String {
        let mut out = String::new();
        for error in &self.errors {
            let position = error.position.min(self.source.len());
            let line_start = self.source[..position]
                .iter()
                .rposition(|&byte| byte == b'\n')
                .map_or(0, |index| index + 1);
            let line_end = self.source[position..]
                .iter()
                .position(|&byte| byte == b'\n')
                .map_or(self.source.len(), |index| position + index);
            let line = String::from_utf8_lossy(&self.source[line_start..line_end]);
            let line = line.strip_suffix('\r').unwrap_or(&line);

            let _ = writeln!(out, "{}:{}", error.line, error.column);
            let _ = writeln!(out, "{line}");
            let _ = writeln!(out, "{:>width$} {}", "^", error.message, width = error.column);
        }
        out
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let error = ParseError::new(3, 7, 42, "expected '='");
        assert_eq!(error.to_string(), "3:7: expected '='");
    }

    #[test]
    fn collection_joins_with_semicolons() {
        let errors = ParseErrors::new(
            b"a\nb\n".to_vec(),
            vec![
                ParseError::new(1, 2, 1, "first"),
                ParseError::new(2, 2, 3, "second"),
            ],
        );
        assert_eq!(errors.to_string(), "1:2: first; 2:2: second");
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn verbose_places_caret_under_column() {
        let source = b"bad = { 1 + 2 }\n".to_vec();
        let errors = ParseErrors::new(
            source,
            vec![ParseError::new(1, 11, 10, "missing closing '}'")],
        );
        assert_eq!(
            errors.verbose(),
            "1:11\nbad = { 1 + 2 }\n          ^ missing closing '}'\n"
        );
    }

    #[test]
    fn verbose_handles_error_at_eof() {
        let source = b"key =".to_vec();
        let errors = ParseErrors::new(source, vec![ParseError::new(1, 6, 5, "expected message field")]);
        let rendered = errors.verbose();
        assert!(rendered.starts_with("1:6\nkey =\n"));
        assert!(rendered.contains("^ expected message field"));
    }

    #[test]
    fn verbose_strips_carriage_return() {
        let source = b"oops\r\n".to_vec();
        let errors = ParseErrors::new(source, vec![ParseError::new(1, 1, 0, "expected identifier")]);
        assert_eq!(errors.verbose(), "1:1\noops\n^ expected identifier\n");
    }
}

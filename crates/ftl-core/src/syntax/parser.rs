// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for FTL source.
//!
//! The parser is a single-pass, byte-oriented scanner: it owns a byte view
//! of the source and tracks the current rune, its UTF-8 width, and the
//! 1-based line and column. All grammar-significant characters are ASCII;
//! non-ASCII runes only occur inside text, string-literal bodies, and
//! comment content, and pass through unchanged.
//!
//! # Design
//!
//! - **Error recovery is mandatory** - a parse always produces a resource;
//!   a failed entry becomes [`Junk`] and parsing resumes at the next line
//!   that starts with a letter, `-`, or `#`
//! - **Multiple errors** - every failed entry contributes a diagnostic;
//!   the first error never stops the parse
//! - **Lookahead by checkpoint** - attribute detection, comment-level
//!   changes, and pattern indent measurement save and restore the full
//!   scanner state rather than peeking through a token buffer
//!
//! Inside a single entry, errors propagate with `Result` and `?` up to the
//! entry loop, which converts them into [`Junk`] plus a recorded
//! [`ParseError`].

use ecow::{eco_format, EcoString};

use crate::ast::{
    Attribute, CallArguments, Comment, Entry, Expression, FunctionReference, GroupComment,
    Identifier, InlineExpression, Junk, Literal, Message, MessageReference, NamedArgument,
    NumberLiteral, Pattern, PatternElement, Placeable, Resource, ResourceComment,
    SelectExpression, StringLiteral, Term, TermReference, TextElement, VariableReference, Variant,
    VariantKey,
};

use super::{ParseError, ParseErrors};

/// Maximum expression nesting depth, counting both placeables and call
/// arguments. Deeper input is rejected rather than risking stack
/// exhaustion on adversarial sources.
const MAX_EXPRESSION_DEPTH: usize = 64;

/// Parses FTL source bytes into a resource.
///
/// Always returns a [`Resource`], possibly containing [`Junk`] entries for
/// regions that failed to parse. The second component is `Some` iff at
/// least one diagnostic was recorded.
///
/// # Examples
///
/// ```
/// use ftl_core::syntax::parse;
///
/// let (resource, errors) = parse(b"hello = Hello, world!\n");
/// assert!(errors.is_none());
/// assert_eq!(resource.body.len(), 1);
/// ```
#[must_use]
pub fn parse(input: &[u8]) -> (Resource, Option<ParseErrors>) {
    Parser::new(input).parse_resource()
}

/// Scanner and parser state over one source buffer.
struct Parser<'src> {
    /// The source bytes.
    input: &'src [u8],
    /// Byte offset of the current rune.
    pos: usize,
    /// The current rune; `None` at end of input.
    ch: Option<char>,
    /// UTF-8 width of the current rune in bytes.
    width: usize,
    /// 1-based line of the current rune.
    line: usize,
    /// 1-based column of the current rune.
    col: usize,
    /// Current expression nesting depth (placeables and call arguments).
    depth: usize,
    /// Non-fatal diagnostics for invalid UTF-8 bytes.
    encoding_errors: Vec<ParseError>,
}

/// A saved scanner position for backtracking lookahead.
#[derive(Clone, Copy)]
struct Checkpoint {
    pos: usize,
    ch: Option<char>,
    width: usize,
    line: usize,
    col: usize,
}

impl<'src> Parser<'src> {
    fn new(input: &'src [u8]) -> Self {
        let mut parser = Self {
            input,
            pos: 0,
            ch: None,
            width: 0,
            line: 1,
            col: 0,
            depth: 0,
            encoding_errors: Vec::new(),
        };
        parser.next();
        parser
    }

    // ========================================================================
    // Scanner
    // ========================================================================

    /// Advances to the next rune, updating line and column.
    fn next(&mut self) {
        if self.ch == Some('\n') {
            self.line += 1;
            self.col = 0;
        }
        self.col += 1;

        self.pos += self.width;
        if self.pos >= self.input.len() {
            self.ch = None;
            self.width = 0;
            return;
        }

        match decode_char(&self.input[self.pos..]) {
            Some((ch, width)) => {
                self.ch = Some(ch);
                self.width = width;
            }
            None => {
                // Invalid byte: record it, scan it as U+FFFD, move on.
                let error = self.error("invalid utf-8 encoding");
                self.encoding_errors.push(error);
                self.ch = Some(char::REPLACEMENT_CHARACTER);
                self.width = 1;
            }
        }
    }

    /// The rune after the current one, without advancing.
    fn peek(&self) -> Option<char> {
        let pos = self.pos + self.width;
        if pos >= self.input.len() {
            return None;
        }
        match decode_char(&self.input[pos..]) {
            Some((ch, _)) => Some(ch),
            None => Some(char::REPLACEMENT_CHARACTER),
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            ch: self.ch,
            width: self.width,
            line: self.line,
            col: self.col,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.ch = checkpoint.ch;
        self.width = checkpoint.width;
        self.line = checkpoint.line;
        self.col = checkpoint.col;
    }

    /// A diagnostic at the current scanner position.
    fn error(&self, message: impl Into<EcoString>) -> ParseError {
        ParseError::new(self.line, self.col, self.pos, message)
    }

    /// The source slice `[start, end)` decoded lossily.
    fn slice(&self, start: usize, end: usize) -> EcoString {
        EcoString::from(String::from_utf8_lossy(&self.input[start..end]).as_ref())
    }

    /// True at `\n`, or at the `\r` of a `\r\n` pair.
    fn is_eol(&self) -> bool {
        match self.ch {
            Some('\n') => true,
            Some('\r') => self.peek() == Some('\n'),
            _ => false,
        }
    }

    /// Consumes one line break (`\n` or `\r\n`). Returns false if not at one.
    fn skip_eol(&mut self) -> bool {
        match self.ch {
            Some('\n') => {
                self.next();
                true
            }
            Some('\r') if self.peek() == Some('\n') => {
                self.next();
                self.next();
                true
            }
            _ => false,
        }
    }

    /// Skips spaces and tabs on the current line; returns the count skipped.
    fn skip_blank_inline(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.ch, Some(' ' | '\t')) {
            self.next();
        }
        self.pos - start
    }

    /// Skips whole blank lines (inline blanks ending in a line break);
    /// returns how many were skipped. Stops before a line with content.
    fn skip_blank_block(&mut self) -> usize {
        let mut count = 0;
        loop {
            let checkpoint = self.checkpoint();
            self.skip_blank_inline();
            if !self.skip_eol() {
                self.restore(checkpoint);
                break;
            }
            count += 1;
        }
        count
    }

    /// Skips spaces, tabs, and line breaks.
    fn skip_blank(&mut self) {
        loop {
            self.skip_blank_inline();
            if !self.skip_eol() {
                break;
            }
        }
    }

    /// Advances to end of input or the first character after a line break
    /// that can start an entry (letter, `-`, or `#`).
    fn skip_to_next_entry_start(&mut self) {
        while let Some(ch) = self.ch {
            let at_line_start = self.pos == 0 || self.input[self.pos - 1] == b'\n';
            if at_line_start && (is_letter(ch) || ch == '-' || ch == '#') {
                break;
            }
            self.next();
        }
    }

    /// Validates a `\uXXXX` or `\UXXXXXX` escape body. The current rune is
    /// the `u`/`U`.
    fn skip_unicode_escape_sequence(&mut self) -> Result<(), ParseError> {
        let need = match self.ch {
            Some('u') => 4,
            Some('U') => 6,
            _ => 0,
        };
        self.next();

        let mut taken = 0;
        while let Some(ch) = self.ch {
            if taken >= need || !is_hex(ch) {
                break;
            }
            taken += 1;
            self.next();
        }
        if taken < need {
            return Err(self.error("invalid unicode escape sequence"));
        }
        Ok(())
    }

    /// Consumes a run of ASCII digits; returns the count.
    fn skip_digits(&mut self) -> usize {
        let mut count = 0;
        while self.ch.is_some_and(|ch| ch.is_ascii_digit()) {
            self.next();
            count += 1;
        }
        count
    }

    // ========================================================================
    // Resource and entries
    // ========================================================================

    /// Parses the whole resource: the top-level entry loop with junk
    /// recovery and pending-comment attachment.
    fn parse_resource(mut self) -> (Resource, Option<ParseErrors>) {
        let mut body: Vec<Entry> = Vec::new();
        let mut errors: Vec<ParseError> = Vec::new();
        let mut last_comment: Option<Comment> = None;

        self.skip_blank_block();

        while self.pos < self.input.len() {
            let start = self.pos;

            let mut entry = match self.parse_entry() {
                Ok(entry) => entry,
                Err(error) => {
                    errors.push(error);
                    self.skip_to_next_entry_start();
                    Entry::Junk(Junk::new(self.slice(start, self.pos)))
                }
            };

            let blank_lines = self.skip_blank_block();

            // A level-1 comment with no blank line after it may belong to
            // the next message or term; hold it aside.
            entry = match entry {
                Entry::Comment(comment) if blank_lines == 0 => {
                    last_comment = Some(comment);
                    continue;
                }
                other => other,
            };

            if let Some(comment) = last_comment.take() {
                match &mut entry {
                    Entry::Message(message) => message.comment = Some(comment),
                    Entry::Term(term) => term.comment = Some(comment),
                    _ => body.push(Entry::Comment(comment)),
                }
            }

            body.push(entry);
        }

        if let Some(comment) = last_comment {
            body.push(Entry::Comment(comment));
        }

        errors.append(&mut self.encoding_errors);
        errors.sort_by_key(|error| error.position);

        let resource = Resource { body };
        if errors.is_empty() {
            (resource, None)
        } else {
            (resource, Some(ParseErrors::new(self.input.to_vec(), errors)))
        }
    }

    fn parse_entry(&mut self) -> Result<Entry, ParseError> {
        match self.ch {
            Some('#') => self.parse_comment(),
            Some('-') => self.parse_term().map(Entry::Term),
            _ => self.parse_message().map(Entry::Message),
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Counts the `#` marker run, up to three.
    fn parse_comment_level(&mut self) -> usize {
        let mut level = 0;
        while self.ch == Some('#') && level < 3 {
            level += 1;
            self.next();
        }
        level
    }

    /// The rest of the current line, excluding the line break.
    fn parse_comment_line(&mut self) -> EcoString {
        let start = self.pos;
        while self.ch.is_some() && !self.is_eol() {
            self.next();
        }
        self.slice(start, self.pos)
    }

    /// Parses a block of comment lines that share one marker level.
    ///
    /// A change of level ends the block and leaves the next marker run to
    /// start a fresh comment entry.
    fn parse_comment(&mut self) -> Result<Entry, ParseError> {
        let mut lines: Vec<EcoString> = Vec::new();
        let mut last_level = 0;

        while self.ch.is_some() {
            let checkpoint = self.checkpoint();
            let level = self.parse_comment_level();
            if level == 0 {
                break;
            }
            if last_level != 0 && level != last_level {
                self.restore(checkpoint);
                break;
            }
            last_level = level;

            let mut line = EcoString::new();
            if !self.is_eol() {
                if self.ch != Some(' ') {
                    return Err(self.error(eco_format!(
                        "expected ' ', found {}",
                        describe(self.ch)
                    )));
                }
                self.next();
                line = self.parse_comment_line();
            }

            lines.push(line);
            self.skip_eol();
        }

        let content = join_lines(&lines);
        match last_level {
            1 => Ok(Entry::Comment(Comment { content })),
            2 => Ok(Entry::GroupComment(GroupComment { content })),
            3 => Ok(Entry::ResourceComment(ResourceComment { content })),
            // parse_comment is only entered at a '#' and the level is
            // capped at 3.
            _ => unreachable!("comment level out of range"),
        }
    }

    // ========================================================================
    // Messages, terms, attributes
    // ========================================================================

    fn parse_message(&mut self) -> Result<Message, ParseError> {
        let id = self.parse_identifier()?;

        self.skip_blank_inline();

        if self.ch != Some('=') {
            return Err(self.error(eco_format!("expected '=', found {}", describe(self.ch))));
        }
        self.next();

        let pattern = self.parse_pattern()?;

        self.skip_blank_block();

        let attributes = self.parse_attributes()?;

        if pattern.elements.is_empty() && attributes.is_empty() {
            return Err(self.error("expected message field"));
        }

        let value = if pattern.elements.is_empty() {
            None
        } else {
            Some(pattern)
        };

        Ok(Message {
            id,
            value,
            attributes,
            comment: None,
        })
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        if self.ch != Some('-') {
            return Err(self.error("expected '-'"));
        }
        self.next();

        let id = self.parse_identifier()?;

        self.skip_blank_inline();

        if self.ch != Some('=') {
            return Err(self.error("expected '='"));
        }
        self.next();

        self.skip_blank_inline();

        let value = self.parse_pattern()?;
        if value.elements.is_empty() {
            return Err(self.error("expected term field"));
        }

        self.skip_blank_block();

        let attributes = self.parse_attributes()?;

        Ok(Term {
            id,
            value,
            attributes,
            comment: None,
        })
    }

    /// Parses `.id = pattern` attributes. Before each candidate the scanner
    /// position is saved; a line whose first non-blank character is not `.`
    /// restores it and ends the list.
    fn parse_attributes(&mut self) -> Result<Vec<Attribute>, ParseError> {
        let mut attributes = Vec::new();

        while self.ch.is_some() {
            let checkpoint = self.checkpoint();

            self.skip_blank_inline();

            if self.ch != Some('.') {
                self.restore(checkpoint);
                break;
            }

            attributes.push(self.parse_attribute()?);
        }

        Ok(attributes)
    }

    fn parse_attribute(&mut self) -> Result<Attribute, ParseError> {
        self.next(); // skip '.'

        let id = self.parse_identifier()?;

        self.skip_blank_inline();

        if self.ch != Some('=') {
            return Err(self.error("expected '='"));
        }
        self.next();

        self.skip_blank_inline();

        let value = self.parse_pattern()?;

        Ok(Attribute { id, value })
    }

    // ========================================================================
    // Patterns
    // ========================================================================

    /// Parses a pattern: text runs and placeables, possibly spanning
    /// multiple indented lines.
    ///
    /// Block-mode lines are measured for a common indent (the minimum
    /// non-zero leading-blank count over measured text lines), which is
    /// stripped from each captured line as a space prefix before
    /// consecutive text lines are joined with `\n`. Only the final joined
    /// run is right-trimmed, and dropped if that leaves it empty.
    fn parse_pattern(&mut self) -> Result<Pattern, ParseError> {
        let mut elements: Vec<PatternElement> = Vec::new();
        let mut block = false;
        let mut has_non_blank = false;
        let mut common_indent = 0usize;

        self.skip_blank_inline();

        if self.skip_eol() {
            self.skip_blank_block();
            block = true;
        }

        while self.ch.is_some() {
            if self.skip_eol() {
                block = true;
            }

            if self.ch == Some('{') {
                let placeable = self.parse_placeable()?;
                has_non_blank = true;
                elements.push(PatternElement::Placeable(placeable));
                continue;
            }

            if block {
                let checkpoint = self.checkpoint();
                let indent = self.skip_blank_inline();
                // A non-indented character ends the pattern block, as does
                // a continuation line opening a variant, an attribute, or
                // the closing brace of a surrounding placeable.
                if indent == 0 && !self.is_eol() {
                    break;
                }
                if matches!(self.ch, Some('[' | '*' | '.' | '}')) {
                    break;
                }
                if indent > 0 && (common_indent == 0 || indent < common_indent) {
                    common_indent = indent;
                }
                self.restore(checkpoint);
            }

            let text = self.parse_text_element()?;
            if !text.value.is_empty() {
                has_non_blank = true;
            }
            elements.push(PatternElement::Text(text));
        }

        if !has_non_blank {
            return Ok(Pattern::default());
        }

        // Dedent, join adjacent text lines, and trim the trailing run.
        let indent = " ".repeat(common_indent);
        let mut processed: Vec<PatternElement> = Vec::new();
        let mut run: Vec<EcoString> = Vec::new();

        for element in elements {
            match element {
                PatternElement::Text(text) => {
                    let dedented = text
                        .value
                        .strip_prefix(indent.as_str())
                        .map_or(text.value.clone(), EcoString::from);
                    run.push(dedented);
                }
                PatternElement::Placeable(placeable) => {
                    if !run.is_empty() {
                        processed.push(PatternElement::Text(TextElement::new(join_lines(&run))));
                        run.clear();
                    }
                    processed.push(PatternElement::Placeable(placeable));
                }
            }
        }
        if !run.is_empty() {
            let joined = join_lines(&run);
            let trimmed = joined.trim_end();
            if !trimmed.is_empty() {
                processed.push(PatternElement::Text(TextElement::new(trimmed)));
            }
        }

        Ok(Pattern {
            elements: processed,
        })
    }

    /// Parses literal text up to a line break or `{`. An unmatched `}` in
    /// text position is a hard error.
    fn parse_text_element(&mut self) -> Result<TextElement, ParseError> {
        let start = self.pos;

        while let Some(ch) = self.ch {
            if self.is_eol() {
                break;
            }
            match ch {
                '{' => break,
                '}' => return Err(self.error("unbalanced closing '}'")),
                _ => self.next(),
            }
        }

        Ok(TextElement::new(self.slice(start, self.pos)))
    }

    // ========================================================================
    // Placeables and expressions
    // ========================================================================

    fn parse_placeable(&mut self) -> Result<Placeable, ParseError> {
        if self.depth >= MAX_EXPRESSION_DEPTH {
            return Err(self.error("expression nesting too deep"));
        }
        self.depth += 1;
        let placeable = self.parse_placeable_inner();
        self.depth -= 1;
        placeable
    }

    fn parse_placeable_inner(&mut self) -> Result<Placeable, ParseError> {
        self.next(); // skip '{'

        self.skip_blank();

        let expression = self.parse_expression()?;

        self.skip_blank_inline();

        if self.ch != Some('}') {
            return Err(self.error("missing closing '}'"));
        }
        self.next();

        Ok(Placeable::new(expression))
    }

    /// Parses an expression: an inline expression, or - when `->` follows -
    /// a select expression with its variant list.
    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let selector = self.parse_inline_expression()?;

        self.skip_blank();

        if !(self.ch == Some('-') && self.peek() == Some('>')) {
            if let InlineExpression::TermReference(reference) = &selector {
                if reference.attribute.is_some() {
                    return Err(self.error("term attribute as placeable"));
                }
            }
            return Ok(Expression::Inline(selector));
        }

        match &selector {
            InlineExpression::MessageReference(reference) => {
                if reference.attribute.is_none() {
                    return Err(self.error("message reference as selector"));
                }
                return Err(self.error("message attribute as selector"));
            }
            InlineExpression::TermReference(reference) if reference.attribute.is_none() => {
                return Err(self.error("term attribute used as placeable"));
            }
            _ => {}
        }

        self.next(); // skip '-'
        self.next(); // skip '>'

        self.skip_blank_inline();
        if !self.skip_eol() {
            return Err(self.error("expected eol"));
        }
        self.skip_blank();

        let variants = self.parse_variants()?;

        Ok(Expression::Select(SelectExpression { selector, variants }))
    }

    /// Dispatches on the first character of an inline expression.
    fn parse_inline_expression(&mut self) -> Result<InlineExpression, ParseError> {
        match self.ch {
            Some('"') => self
                .parse_string_literal()
                .map(InlineExpression::StringLiteral),
            Some(ch) if ch.is_ascii_digit() => self
                .parse_number_literal()
                .map(InlineExpression::NumberLiteral),
            Some('-') => {
                if self.peek().is_some_and(is_letter) {
                    self.next(); // skip '-'

                    let id = self.parse_identifier()?;

                    let attribute = if self.ch == Some('.') {
                        self.next();
                        Some(self.parse_identifier()?)
                    } else {
                        None
                    };

                    let arguments = if self.ch == Some('(') {
                        Some(self.parse_call_arguments()?)
                    } else {
                        None
                    };

                    Ok(InlineExpression::TermReference(TermReference {
                        id,
                        attribute,
                        arguments,
                    }))
                } else {
                    self.parse_number_literal()
                        .map(InlineExpression::NumberLiteral)
                }
            }
            Some('$') => {
                self.next();
                let id = self.parse_identifier()?;
                Ok(InlineExpression::VariableReference(VariableReference {
                    id,
                }))
            }
            Some(ch) if is_letter(ch) => {
                let id = self.parse_identifier()?;

                if self.ch == Some('(') {
                    if !id.name.chars().all(is_callee_char) {
                        return Err(self.error("forbidden callee"));
                    }
                    let arguments = self.parse_call_arguments()?;
                    return Ok(InlineExpression::FunctionReference(FunctionReference {
                        id,
                        arguments,
                    }));
                }

                let attribute = if self.ch == Some('.') {
                    self.next();
                    Some(self.parse_identifier()?)
                } else {
                    None
                };

                Ok(InlineExpression::MessageReference(MessageReference {
                    id,
                    attribute,
                }))
            }
            Some('{') => self.parse_placeable().map(InlineExpression::Placeable),
            _ => Err(self.error("expected inline expression")),
        }
    }

    /// Parses `( ... )` call arguments: positional expressions first, then
    /// `name: literal` pairs with pairwise-distinct names. A trailing comma
    /// is permitted.
    ///
    /// Shares the depth cap with placeables: bare nested calls recurse
    /// through here with no `{` in between.
    fn parse_call_arguments(&mut self) -> Result<CallArguments, ParseError> {
        if self.depth >= MAX_EXPRESSION_DEPTH {
            return Err(self.error("expression nesting too deep"));
        }
        self.depth += 1;
        let arguments = self.parse_call_arguments_inner();
        self.depth -= 1;
        arguments
    }

    fn parse_call_arguments_inner(&mut self) -> Result<CallArguments, ParseError> {
        self.next(); // skip '('

        let mut positional: Vec<InlineExpression> = Vec::new();
        let mut named: Vec<NamedArgument> = Vec::new();

        self.skip_blank();

        while self.ch.is_some() {
            if self.ch == Some(')') {
                break;
            }

            let expression = self.parse_inline_expression()?;

            self.skip_blank();

            if self.ch == Some(':') {
                let name = match expression {
                    InlineExpression::MessageReference(MessageReference {
                        id,
                        attribute: None,
                    }) => id,
                    _ => return Err(self.error("argument name must be simple identifier")),
                };

                self.next(); // skip ':'
                self.skip_blank();

                let value = self.parse_literal()?;

                if named.iter().any(|argument| argument.name.name == name.name) {
                    return Err(self.error("named arguments must be unique"));
                }

                named.push(NamedArgument { name, value });
            } else if !named.is_empty() {
                return Err(self.error("positional argument follows names"));
            } else {
                positional.push(expression);
            }

            self.skip_blank();

            if self.ch == Some(',') {
                self.next();
                self.skip_blank();
                continue;
            }

            break;
        }

        if self.ch != Some(')') {
            return Err(self.error("expected ')'"));
        }
        self.next();

        Ok(CallArguments { positional, named })
    }

    /// Parses a literal: the only forms allowed as named-argument values.
    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        match self.ch {
            Some(ch) if ch.is_ascii_digit() => self.parse_number_literal().map(Literal::Number),
            Some('"') => self.parse_string_literal().map(Literal::String),
            _ => Err(self.error("expected literal")),
        }
    }

    /// Parses a quoted string. Escapes (`\\`, `\"`, `\uXXXX`, `\UXXXXXX`)
    /// are validated but the stored value keeps the raw inner text.
    fn parse_string_literal(&mut self) -> Result<StringLiteral, ParseError> {
        self.next(); // skip '"'

        let start = self.pos;
        loop {
            if self.is_eol() {
                return Err(self.error("unexpected eol"));
            }
            match self.ch {
                None => break,
                Some('\\') => {
                    self.next();
                    match self.ch {
                        Some('\\' | '"') => self.next(),
                        Some('u' | 'U') => self.skip_unicode_escape_sequence()?,
                        _ => return Err(self.error("invalid escape sequence")),
                    }
                }
                Some('"') => break,
                Some(_) => self.next(),
            }
        }

        let value = self.slice(start, self.pos);
        self.next(); // skip closing '"'

        Ok(StringLiteral { value })
    }

    /// Parses a number: optional `-`, digits, optional `.` and digits. The
    /// value keeps the raw source text.
    fn parse_number_literal(&mut self) -> Result<NumberLiteral, ParseError> {
        let start = self.pos;

        if self.ch == Some('-') {
            self.next();
        }

        if self.skip_digits() == 0 {
            return Err(self.error("expected digit"));
        }

        if self.ch == Some('.') {
            self.next();
            if self.skip_digits() == 0 {
                return Err(self.error("expected digit"));
            }
        }

        Ok(NumberLiteral {
            value: self.slice(start, self.pos),
        })
    }

    /// Parses an identifier: `[A-Za-z][A-Za-z0-9_-]*`.
    fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let start = self.pos;

        if !self.ch.is_some_and(is_letter) {
            return Err(self.error("expected identifier"));
        }
        self.next();

        while self
            .ch
            .is_some_and(|ch| is_letter(ch) || ch.is_ascii_digit() || ch == '_' || ch == '-')
        {
            self.next();
        }

        Ok(Identifier {
            name: self.slice(start, self.pos),
        })
    }

    // ========================================================================
    // Variants
    // ========================================================================

    /// Parses the variant list of a select expression. Exactly one variant
    /// must carry the `*` default marker.
    fn parse_variants(&mut self) -> Result<Vec<Variant>, ParseError> {
        let mut variants: Vec<Variant> = Vec::new();
        let mut has_default = false;

        while matches!(self.ch, Some('*' | '[')) {
            let default = self.ch == Some('*');
            if default {
                if has_default {
                    return Err(self.error("multiple default variants"));
                }
                has_default = true;
                self.next();
            }

            let key = self.parse_variant_key()?;
            let value = self.parse_pattern()?;

            variants.push(Variant {
                key,
                value,
                default,
            });

            self.skip_blank();
        }

        if !has_default {
            return Err(self.error("missing default variant"));
        }

        Ok(variants)
    }

    /// Parses `[ key ]`: a number literal when the key starts with a digit,
    /// otherwise an identifier.
    fn parse_variant_key(&mut self) -> Result<VariantKey, ParseError> {
        if self.ch != Some('[') {
            return Err(self.error("expected '['"));
        }
        self.next();
        self.skip_blank();

        let key = if self.ch.is_some_and(|ch| ch.is_ascii_digit()) {
            VariantKey::NumberLiteral(self.parse_number_literal()?)
        } else {
            VariantKey::Identifier(self.parse_identifier()?)
        };

        self.skip_blank();
        if self.ch != Some(']') {
            return Err(self.error("expected ']'"));
        }
        self.next();

        Ok(key)
    }
}

// ============================================================================
// Character classes and helpers
// ============================================================================

fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

/// Digits accepted inside `\u`/`\U` escape bodies.
///
/// NOTE: deliberately lenient: all ASCII letters count, not just
/// `[0-9a-fA-F]`, so `\uGGGG` validates. Kept for compatibility with
/// existing resources that rely on the loose check.
fn is_hex(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

/// Characters allowed in a function callee name: `[A-Z0-9_-]`.
fn is_callee_char(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_' || ch == '-'
}

/// Decodes the first rune of `bytes`; `None` when the leading byte does not
/// begin a valid UTF-8 sequence (the caller consumes exactly one byte).
fn decode_char(bytes: &[u8]) -> Option<(char, usize)> {
    let window = bytes.len().min(4);
    let prefix = match std::str::from_utf8(&bytes[..window]) {
        Ok(prefix) => prefix,
        Err(error) => {
            let valid = error.valid_up_to();
            if valid == 0 {
                return None;
            }
            match std::str::from_utf8(&bytes[..valid]) {
                Ok(prefix) => prefix,
                Err(_) => return None,
            }
        }
    };
    prefix.chars().next().map(|ch| (ch, ch.len_utf8()))
}

fn join_lines(lines: &[EcoString]) -> EcoString {
    let mut joined = EcoString::new();
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            joined.push('\n');
        }
        joined.push_str(line);
    }
    joined
}

fn describe(ch: Option<char>) -> EcoString {
    match ch {
        Some(ch) => eco_format!("{ch:?}"),
        None => "end of file".into(),
    }
}

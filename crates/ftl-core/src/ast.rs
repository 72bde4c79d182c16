// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract syntax tree (AST) definitions for Fluent resources.
//!
//! The AST represents the structure of an FTL file after parsing. It is a
//! closed, tagged hierarchy: every variant of every sum is listed here, and
//! exhaustive `match` is the intended way to consume it.
//!
//! # Design
//!
//! - **Immutable after parse** - the parser builds each node exactly once;
//!   the only post-construction step is attaching a preceding [`Comment`]
//!   to the [`Message`] or [`Term`] that immediately follows it
//! - **Error recovery** - unparseable entries survive as [`Junk`] carrying
//!   the verbatim source slice
//! - **No source spans** - nodes carry only their content; diagnostics
//!   track positions separately
//!
//! # Canonical serialization
//!
//! Every node serializes to a JSON object whose first field is a `type` tag
//! (`"Message"`, `"SelectExpression"`, ...) followed by the node's fields in
//! declaration order. Sequence fields are always emitted, even when empty;
//! optional node fields are emitted as `null` when absent. [`crate::json`]
//! renders this form with 4-space indentation.
//!
//! # Example
//!
//! ```
//! use ftl_core::ast::{Entry, PatternElement};
//! use ftl_core::syntax::parse;
//!
//! let (resource, errors) = parse(b"hello = Hello, world!\n");
//! assert!(errors.is_none());
//! let Entry::Message(message) = &resource.body[0] else {
//!     panic!("expected a message");
//! };
//! assert_eq!(message.id.name, "hello");
//! let value = message.value.as_ref().unwrap();
//! assert!(matches!(&value.elements[0], PatternElement::Text(t) if t.value == "Hello, world!"));
//! ```

use ecow::EcoString;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// A complete FTL resource: the ordered body of a single file.
///
/// Produced by [`crate::syntax::parse`]; the body preserves source order,
/// including [`Junk`] entries for regions that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resource {
    /// Top-level entries in source order.
    pub body: Vec<Entry>,
}

/// A top-level construct in a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Message(Message),
    Term(Term),
    Comment(Comment),
    GroupComment(GroupComment),
    ResourceComment(ResourceComment),
    Junk(Junk),
}

/// A named translation unit.
///
/// At least one of `value` and a non-empty `attributes` is always present;
/// the parser rejects messages with neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Identifier,
    /// The message pattern, absent for attribute-only messages.
    pub value: Option<Pattern>,
    pub attributes: Vec<Attribute>,
    /// A level-1 comment attached from the line(s) immediately above.
    pub comment: Option<Comment>,
}

/// A term: a translation unit referenced from other patterns, written with
/// a leading `-` in source (the stored name excludes it).
///
/// Unlike messages, terms always have a value pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub id: Identifier,
    pub value: Pattern,
    pub attributes: Vec<Attribute>,
    /// A level-1 comment attached from the line(s) immediately above.
    pub comment: Option<Comment>,
}

/// A level-1 comment (`#`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment text with the markers stripped; lines joined with `\n`.
    pub content: EcoString,
}

/// A level-2 group comment (`##`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupComment {
    pub content: EcoString,
}

/// A level-3 resource comment (`###`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceComment {
    pub content: EcoString,
}

/// An unparseable region of source, preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Junk {
    /// The raw source slice from the failed entry's start to the next
    /// entry boundary.
    pub content: EcoString,
    /// Reserved; always empty today.
    pub annotations: Vec<Annotation>,
}

impl Junk {
    /// Creates a junk entry with no annotations.
    #[must_use]
    pub fn new(content: impl Into<EcoString>) -> Self {
        Self {
            content: content.into(),
            annotations: Vec::new(),
        }
    }
}

/// A structured note attached to [`Junk`]. Reserved for future
/// diagnostics-in-tree support; never produced by the current parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation;

/// An attribute of a [`Message`] or [`Term`]: `.id = value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub id: Identifier,
    pub value: Pattern,
}

/// An identifier: `[A-Za-z][A-Za-z0-9_-]*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: EcoString,
}

impl Identifier {
    #[must_use]
    pub fn new(name: impl Into<EcoString>) -> Self {
        Self { name: name.into() }
    }
}

/// The value of a message, term, attribute, or variant: literal text
/// interleaved with placeables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
}

/// One element of a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternElement {
    Text(TextElement),
    Placeable(Placeable),
}

/// A run of literal text. Multi-line runs are stored dedented, with lines
/// joined by `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextElement {
    pub value: EcoString,
}

impl TextElement {
    #[must_use]
    pub fn new(value: impl Into<EcoString>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A `{ ... }` expression embedded in a pattern.
///
/// A placeable is both a pattern element and, when nested inside another
/// expression, an inline expression; the same node serves both positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeable {
    pub expression: Box<Expression>,
}

impl Placeable {
    #[must_use]
    pub fn new(expression: Expression) -> Self {
        Self {
            expression: Box::new(expression),
        }
    }
}

/// Any expression valid inside a placeable: an inline expression or a
/// select expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Inline(InlineExpression),
    Select(SelectExpression),
}

/// An expression valid in argument and selector positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineExpression {
    StringLiteral(StringLiteral),
    NumberLiteral(NumberLiteral),
    FunctionReference(FunctionReference),
    MessageReference(MessageReference),
    TermReference(TermReference),
    VariableReference(VariableReference),
    Placeable(Placeable),
}

/// A quoted string literal.
///
/// `value` holds the raw text between the quotes: escape sequences are
/// validated during parsing but preserved verbatim, not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub value: EcoString,
}

/// A decimal number literal, preserved as source text
/// (optional `-`, digits, optional `.` and fraction digits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberLiteral {
    pub value: EcoString,
}

/// A call to a built-in formatting function: `NAME(...)`.
///
/// Callee names are restricted to `[A-Z][A-Z0-9_-]*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionReference {
    pub id: Identifier,
    pub arguments: CallArguments,
}

/// A reference to another message, optionally to one of its attributes:
/// `id` or `id.attribute`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageReference {
    pub id: Identifier,
    pub attribute: Option<Identifier>,
}

/// A reference to a term: `-id`, optionally with an attribute and/or
/// call arguments for parameterized terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermReference {
    pub id: Identifier,
    pub attribute: Option<Identifier>,
    pub arguments: Option<CallArguments>,
}

/// A reference to an externally provided variable: `$id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    pub id: Identifier,
}

/// A branching expression: a selector and one or more keyed variants,
/// exactly one of which is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectExpression {
    pub selector: InlineExpression,
    pub variants: Vec<Variant>,
}

/// One arm of a [`SelectExpression`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub key: VariantKey,
    pub value: Pattern,
    /// Marked with `*` in source.
    pub default: bool,
}

/// A variant key: an identifier or a number literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantKey {
    Identifier(Identifier),
    NumberLiteral(NumberLiteral),
}

/// Arguments of a function or term call. Positional arguments always
/// precede named ones, and named-argument names are pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CallArguments {
    pub positional: Vec<InlineExpression>,
    pub named: Vec<NamedArgument>,
}

/// A `name: value` argument. Values are restricted to literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedArgument {
    pub name: Identifier,
    pub value: Literal,
}

/// A literal value: the only forms allowed as named-argument values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    String(StringLiteral),
    Number(NumberLiteral),
}

// ============================================================================
// Canonical serialization
//
// Hand-written impls so that every node emits its `type` tag as the first
// field, sequences are always present, and absent options serialize as
// null. Sum types serialize transparently as their payload node.
// ============================================================================

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Resource", 2)?;
        node.serialize_field("type", "Resource")?;
        node.serialize_field("body", &self.body)?;
        node.end()
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entry::Message(message) => message.serialize(serializer),
            Entry::Term(term) => term.serialize(serializer),
            Entry::Comment(comment) => comment.serialize(serializer),
            Entry::GroupComment(comment) => comment.serialize(serializer),
            Entry::ResourceComment(comment) => comment.serialize(serializer),
            Entry::Junk(junk) => junk.serialize(serializer),
        }
    }
}

impl Serialize for Message {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Message", 5)?;
        node.serialize_field("type", "Message")?;
        node.serialize_field("id", &self.id)?;
        node.serialize_field("value", &self.value)?;
        node.serialize_field("attributes", &self.attributes)?;
        node.serialize_field("comment", &self.comment)?;
        node.end()
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Term", 5)?;
        node.serialize_field("type", "Term")?;
        node.serialize_field("id", &self.id)?;
        node.serialize_field("value", &self.value)?;
        node.serialize_field("attributes", &self.attributes)?;
        node.serialize_field("comment", &self.comment)?;
        node.end()
    }
}

impl Serialize for Comment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Comment", 2)?;
        node.serialize_field("type", "Comment")?;
        node.serialize_field("content", &self.content)?;
        node.end()
    }
}

impl Serialize for GroupComment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("GroupComment", 2)?;
        node.serialize_field("type", "GroupComment")?;
        node.serialize_field("content", &self.content)?;
        node.end()
    }
}

impl Serialize for ResourceComment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("ResourceComment", 2)?;
        node.serialize_field("type", "ResourceComment")?;
        node.serialize_field("content", &self.content)?;
        node.end()
    }
}

impl Serialize for Junk {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Junk", 3)?;
        node.serialize_field("type", "Junk")?;
        node.serialize_field("content", &self.content)?;
        node.serialize_field("annotations", &self.annotations)?;
        node.end()
    }
}

impl Serialize for Annotation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Annotation", 1)?;
        node.serialize_field("type", "Annotation")?;
        node.end()
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Attribute", 3)?;
        node.serialize_field("type", "Attribute")?;
        node.serialize_field("id", &self.id)?;
        node.serialize_field("value", &self.value)?;
        node.end()
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Identifier", 2)?;
        node.serialize_field("type", "Identifier")?;
        node.serialize_field("name", &self.name)?;
        node.end()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Pattern", 2)?;
        node.serialize_field("type", "Pattern")?;
        node.serialize_field("elements", &self.elements)?;
        node.end()
    }
}

impl Serialize for PatternElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PatternElement::Text(text) => text.serialize(serializer),
            PatternElement::Placeable(placeable) => placeable.serialize(serializer),
        }
    }
}

impl Serialize for TextElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("TextElement", 2)?;
        node.serialize_field("type", "TextElement")?;
        node.serialize_field("value", &self.value)?;
        node.end()
    }
}

impl Serialize for Placeable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Placeable", 2)?;
        node.serialize_field("type", "Placeable")?;
        node.serialize_field("expression", &self.expression)?;
        node.end()
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expression::Inline(inline) => inline.serialize(serializer),
            Expression::Select(select) => select.serialize(serializer),
        }
    }
}

impl Serialize for InlineExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InlineExpression::StringLiteral(literal) => literal.serialize(serializer),
            InlineExpression::NumberLiteral(literal) => literal.serialize(serializer),
            InlineExpression::FunctionReference(reference) => reference.serialize(serializer),
            InlineExpression::MessageReference(reference) => reference.serialize(serializer),
            InlineExpression::TermReference(reference) => reference.serialize(serializer),
            InlineExpression::VariableReference(reference) => reference.serialize(serializer),
            InlineExpression::Placeable(placeable) => placeable.serialize(serializer),
        }
    }
}

impl Serialize for StringLiteral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("StringLiteral", 2)?;
        node.serialize_field("type", "StringLiteral")?;
        node.serialize_field("value", &self.value)?;
        node.end()
    }
}

impl Serialize for NumberLiteral {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("NumberLiteral", 2)?;
        node.serialize_field("type", "NumberLiteral")?;
        node.serialize_field("value", &self.value)?;
        node.end()
    }
}

impl Serialize for FunctionReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("FunctionReference", 3)?;
        node.serialize_field("type", "FunctionReference")?;
        node.serialize_field("id", &self.id)?;
        node.serialize_field("arguments", &self.arguments)?;
        node.end()
    }
}

impl Serialize for MessageReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("MessageReference", 3)?;
        node.serialize_field("type", "MessageReference")?;
        node.serialize_field("id", &self.id)?;
        node.serialize_field("attribute", &self.attribute)?;
        node.end()
    }
}

impl Serialize for TermReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("TermReference", 4)?;
        node.serialize_field("type", "TermReference")?;
        node.serialize_field("id", &self.id)?;
        node.serialize_field("attribute", &self.attribute)?;
        node.serialize_field("arguments", &self.arguments)?;
        node.end()
    }
}

impl Serialize for VariableReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("VariableReference", 2)?;
        node.serialize_field("type", "VariableReference")?;
        node.serialize_field("id", &self.id)?;
        node.end()
    }
}

impl Serialize for SelectExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("SelectExpression", 3)?;
        node.serialize_field("type", "SelectExpression")?;
        node.serialize_field("selector", &self.selector)?;
        node.serialize_field("variants", &self.variants)?;
        node.end()
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("Variant", 4)?;
        node.serialize_field("type", "Variant")?;
        node.serialize_field("key", &self.key)?;
        node.serialize_field("value", &self.value)?;
        node.serialize_field("default", &self.default)?;
        node.end()
    }
}

impl Serialize for VariantKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            VariantKey::Identifier(identifier) => identifier.serialize(serializer),
            VariantKey::NumberLiteral(literal) => literal.serialize(serializer),
        }
    }
}

impl Serialize for CallArguments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("CallArguments", 3)?;
        node.serialize_field("type", "CallArguments")?;
        node.serialize_field("positional", &self.positional)?;
        node.serialize_field("named", &self.named)?;
        node.end()
    }
}

impl Serialize for NamedArgument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("NamedArgument", 3)?;
        node.serialize_field("type", "NamedArgument")?;
        node.serialize_field("name", &self.name)?;
        node.serialize_field("value", &self.value)?;
        node.end()
    }
}

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Literal::String(literal) => literal.serialize(serializer),
            Literal::Number(literal) => literal.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    #[test]
    fn comment_serializes_tag_first() {
        let comment = Comment {
            content: "Standalone Comment".into(),
        };
        let rendered = json::to_string(&comment).unwrap();
        assert_eq!(
            rendered,
            "{\n    \"type\": \"Comment\",\n    \"content\": \"Standalone Comment\"\n}\n"
        );
    }

    #[test]
    fn empty_resource_has_body_array() {
        let rendered = json::to_string(&Resource::default()).unwrap();
        assert_eq!(rendered, "{\n    \"type\": \"Resource\",\n    \"body\": []\n}\n");
    }

    #[test]
    fn absent_options_serialize_as_null() {
        let message = Message {
            id: Identifier::new("key"),
            value: None,
            attributes: vec![Attribute {
                id: Identifier::new("title"),
                value: Pattern {
                    elements: vec![PatternElement::Text(TextElement::new("Hi"))],
                },
            }],
            comment: None,
        };
        let rendered = json::to_string(&message).unwrap();
        assert!(rendered.contains("\"value\": null"));
        assert!(rendered.contains("\"comment\": null"));
        assert!(rendered.starts_with("{\n    \"type\": \"Message\""));
    }

    #[test]
    fn junk_serializes_content_before_annotations() {
        let junk = Junk::new("oops = {\n");
        let rendered = json::to_string(&junk).unwrap();
        let content_at = rendered.find("\"content\"").unwrap();
        let annotations_at = rendered.find("\"annotations\"").unwrap();
        assert!(content_at < annotations_at);
        assert!(rendered.contains("\"annotations\": []"));
    }

    #[test]
    fn placeable_nests_in_both_positions() {
        // A placeable wrapping a placeable wrapping a variable reference.
        let inner = Placeable::new(Expression::Inline(InlineExpression::VariableReference(
            VariableReference {
                id: Identifier::new("x"),
            },
        )));
        let outer = Placeable::new(Expression::Inline(InlineExpression::Placeable(inner)));
        let rendered = json::to_string(&outer).unwrap();
        assert_eq!(rendered.matches("\"Placeable\"").count(), 2);
        assert_eq!(rendered.matches("\"VariableReference\"").count(), 1);
    }

    #[test]
    fn html_is_not_escaped() {
        let text = TextElement::new("<b>&amp;</b>");
        let rendered = json::to_string(&text).unwrap();
        assert!(rendered.contains("<b>&amp;</b>"));
    }
}

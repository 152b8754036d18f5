//! Parser and block tree for curlew templates.
//!
//! A template is plain text interleaved with `{{ ... }}` directives:
//!
//! - `{{ name }}` and `{{ user.name }}` output a value
//! - `{{#loop items as item}} ... {{/loop}}` repeats its body per element
//! - `{{#if user.active}} ... {{/if}}` renders its body when the value is truthy
//! - `{{# anything #}}` is a comment
//!
//! [`parse`] turns the source into a [`Template`], the root of an immutable
//! tree of [`Block`]s.
//!
//! ```rust
//! let template = curlew_ast::parse("Hello {{ name }}!").unwrap();
//! assert_eq!(template.children().len(), 3);
//! ```

use std::fmt;

use thiserror::Error;

mod lexer;
mod parser;
mod token;

pub use parser::Parser;

// ============================================================================
// Location
// ============================================================================

/// Location in source code (1-indexed line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
}

impl Location {
    pub fn new(line: usize, column: usize, byte_offset: usize) -> Self {
        Self {
            line,
            column,
            byte_offset,
        }
    }

    /// Compute the line and column of `offset` within `source`.
    ///
    /// Offsets past the end are clamped, offsets inside a multi-byte
    /// character are moved back to the start of that character.
    pub fn locate(source: &str, offset: usize) -> Self {
        let offset = floor_char_boundary(source, offset);
        let before = &source[..offset];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        Self {
            line: before.matches('\n').count() + 1,
            column: before[line_start..].chars().count() + 1,
            byte_offset: offset,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

fn floor_char_boundary(source: &str, offset: usize) -> usize {
    let mut offset = offset.min(source.len());
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Byte range of a block in the template source.
///
/// For containers the range runs from the opening directive's `{{` to the
/// end of the closing directive's `}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Characters of context kept on either side of an error offset.
const SNIPPET_RADIUS: usize = 20;

/// Where an error happened: a location plus a short excerpt of the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceContext {
    pub location: Location,
    pub snippet: String,
}

impl SourceContext {
    /// Capture the location of `offset` and up to twenty characters of
    /// source on each side of it. Newlines in the excerpt are shown as `\n`
    /// and truncated ends are marked with `...`.
    pub fn capture(source: &str, offset: usize) -> Self {
        let location = Location::locate(source, offset);
        let offset = location.byte_offset;

        let start = source[..offset]
            .char_indices()
            .rev()
            .nth(SNIPPET_RADIUS - 1)
            .map_or(0, |(i, _)| i);
        let end = source[offset..]
            .char_indices()
            .nth(SNIPPET_RADIUS)
            .map_or(source.len(), |(i, _)| offset + i);

        let mut snippet = String::new();
        if start > 0 {
            snippet.push_str("...");
        }
        snippet.push_str(&source[start..end].replace('\n', "\\n"));
        if end < source.len() {
            snippet.push_str("...");
        }

        Self { location, snippet }
    }
}

impl fmt::Display for SourceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} near `{}`", self.location, self.snippet)
    }
}

// ============================================================================
// Blocks
// ============================================================================

/// Discriminant of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Root,
    Text,
    Comment,
    Variable,
    Accessor,
    Loop,
    If,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Root => "root",
            BlockKind::Text => "text",
            BlockKind::Comment => "comment",
            BlockKind::Variable => "variable",
            BlockKind::Accessor => "accessor",
            BlockKind::Loop => "loop",
            BlockKind::If => "if",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The root block of a parsed template. There is exactly one per tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    children: Vec<Block>,
    span: Span,
}

impl Template {
    pub fn new(children: Vec<Block>, span: Span) -> Self {
        Self { children, span }
    }

    pub fn children(&self) -> &[Block] {
        &self.children
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn kind(&self) -> BlockKind {
        BlockKind::Root
    }
}

/// A node below the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Text(TextBlock),
    Comment(CommentBlock),
    Variable(VariableBlock),
    Accessor(AccessorBlock),
    Loop(LoopBlock),
    If(IfBlock),
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Text(_) => BlockKind::Text,
            Block::Comment(_) => BlockKind::Comment,
            Block::Variable(_) => BlockKind::Variable,
            Block::Accessor(_) => BlockKind::Accessor,
            Block::Loop(_) => BlockKind::Loop,
            Block::If(_) => BlockKind::If,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Block::Text(b) => b.span,
            Block::Comment(b) => b.span,
            Block::Variable(b) => b.span,
            Block::Accessor(b) => b.span,
            Block::Loop(b) => b.span,
            Block::If(b) => b.span,
        }
    }

    /// Child blocks of a container, empty for leaves.
    pub fn children(&self) -> &[Block] {
        match self {
            Block::Loop(b) => &b.children,
            Block::If(b) => &b.children,
            Block::Text(_) | Block::Comment(_) | Block::Variable(_) | Block::Accessor(_) => &[],
        }
    }
}

/// Literal text between directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub content: String,
    pub span: Span,
}

/// `{{# ... #}}`; `content` keeps the `#` markers. Renders nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub content: String,
    pub span: Span,
}

/// `{{ name }}`: a single-level scope lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableBlock {
    pub name: String,
    pub span: Span,
}

/// `{{ a.b.c }}`: `expression` is the raw text, `path` its trimmed segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorBlock {
    pub expression: String,
    pub path: Vec<String>,
    pub span: Span,
}

/// `{{#loop target as alias}} ... {{/loop}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopBlock {
    pub target: String,
    pub alias: String,
    pub path: Vec<String>,
    pub children: Vec<Block>,
    pub span: Span,
}

/// `{{#if condition}} ... {{/if}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfBlock {
    pub condition: Vec<String>,
    pub children: Vec<Block>,
    pub span: Span,
}

// ============================================================================
// Errors
// ============================================================================

/// Template syntax errors. These are raised while parsing and do not depend
/// on the data the template is later rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unmatched opening delimiter '{{{{' at {at}")]
    UnmatchedOpen { at: SourceContext },

    #[error("closing '/{found}' does not match the open '{expected}' block at {at}")]
    MismatchedClose {
        expected: BlockKind,
        found: BlockKind,
        at: SourceContext,
    },

    #[error("unexpected closing directive '{directive}' at {at}")]
    UnexpectedClose { directive: String, at: SourceContext },

    #[error("unclosed {} at end of input, innermost opened at {at}", describe_open(.open))]
    UnclosedDirective {
        open: Vec<BlockKind>,
        at: SourceContext,
    },

    #[error("malformed directive '{body}' ({reason}) at {at}")]
    MalformedDirective {
        body: String,
        reason: &'static str,
        at: SourceContext,
    },

    #[error("empty directive at {at}")]
    EmptyDirective { at: SourceContext },
}

impl ParseError {
    /// Source location and excerpt of the offending directive.
    pub fn context(&self) -> &SourceContext {
        match self {
            ParseError::UnmatchedOpen { at }
            | ParseError::MismatchedClose { at, .. }
            | ParseError::UnexpectedClose { at, .. }
            | ParseError::UnclosedDirective { at, .. }
            | ParseError::MalformedDirective { at, .. }
            | ParseError::EmptyDirective { at } => at,
        }
    }
}

fn describe_open(open: &[BlockKind]) -> String {
    open.iter()
        .map(|kind| format!("'{kind}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse a template source string into its block tree.
pub fn parse(source: &str) -> Result<Template, ParseError> {
    Parser::new(source).parse()
}

//! Delimiter scanner.
//!
//! Splits template source into runs of literal text and the trimmed bodies
//! of `{{ ... }}` directives, keeping exact byte offsets for diagnostics.

use crate::{ParseError, SourceContext, Span};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A piece of template source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Text { content: &'a str, span: Span },
    /// `body` is the text between the delimiters with surrounding whitespace
    /// removed; `span` covers both delimiters.
    Directive { body: &'a str, span: Span },
}

/// Index-based scanner over template source
pub(crate) struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Return the next segment, or `None` at end of input.
    pub(crate) fn next_segment(&mut self) -> Result<Option<Segment<'a>>, ParseError> {
        let source = self.source;
        let rest = &source[self.pos..];
        if rest.is_empty() {
            return Ok(None);
        }

        match rest.find(OPEN) {
            Some(0) => self.scan_directive().map(Some),
            Some(len) => {
                let start = self.pos;
                self.pos += len;
                Ok(Some(Segment::Text {
                    content: &rest[..len],
                    span: Span::new(start, self.pos),
                }))
            }
            None => {
                let start = self.pos;
                self.pos = source.len();
                Ok(Some(Segment::Text {
                    content: rest,
                    span: Span::new(start, self.pos),
                }))
            }
        }
    }

    fn scan_directive(&mut self) -> Result<Segment<'a>, ParseError> {
        let source = self.source;
        let open = self.pos;
        let body_start = open + OPEN.len();

        let Some(len) = source[body_start..].find(CLOSE) else {
            return Err(ParseError::UnmatchedOpen {
                at: SourceContext::capture(source, open),
            });
        };

        let body_end = body_start + len;
        self.pos = body_end + CLOSE.len();
        Ok(Segment::Directive {
            body: source[body_start..body_end].trim(),
            span: Span::new(open, self.pos),
        })
    }
}

//! Builds the block tree from the scanned segments.
//!
//! Containers are tracked on an explicit stack of open blocks: an opening
//! directive pushes, a closing directive pops after checking that it closes
//! the innermost open block, and every other segment is appended to the
//! innermost open block (or to the root when nothing is open).

use crate::lexer::{Lexer, Segment};
use crate::token::{self, Directive, Invalid};
use crate::{
    AccessorBlock, Block, BlockKind, CommentBlock, IfBlock, LoopBlock, ParseError, SourceContext,
    Span, Template, TextBlock, VariableBlock,
};

/// Header of a container whose closing directive has not been seen yet.
enum Header {
    Loop {
        target: String,
        alias: String,
        path: Vec<String>,
    },
    If {
        condition: Vec<String>,
    },
}

impl Header {
    fn kind(&self) -> BlockKind {
        match self {
            Header::Loop { .. } => BlockKind::Loop,
            Header::If { .. } => BlockKind::If,
        }
    }
}

struct OpenBlock {
    header: Header,
    start: usize,
    children: Vec<Block>,
}

/// Single-pass template parser
pub struct Parser<'a> {
    source: &'a str,
    root: Vec<Block>,
    stack: Vec<OpenBlock>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            root: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Parse the whole source into a [`Template`].
    pub fn parse(mut self) -> Result<Template, ParseError> {
        let mut lexer = Lexer::new(self.source);

        while let Some(segment) = lexer.next_segment()? {
            match segment {
                Segment::Text { content, span } => self.append(Block::Text(TextBlock {
                    content: content.to_string(),
                    span,
                })),
                Segment::Directive { body, span } => self.directive(body, span)?,
            }
        }

        if let Some(innermost) = self.stack.last() {
            return Err(ParseError::UnclosedDirective {
                open: self.stack.iter().map(|open| open.header.kind()).collect(),
                at: self.context(innermost.start),
            });
        }

        log::debug!(
            "parsed template: {} bytes, {} top-level blocks",
            self.source.len(),
            self.root.len()
        );
        Ok(Template::new(self.root, Span::new(0, self.source.len())))
    }

    fn directive(&mut self, body: &str, span: Span) -> Result<(), ParseError> {
        let directive = token::classify(body).map_err(|invalid| match invalid {
            Invalid::Empty => ParseError::EmptyDirective {
                at: self.context(span.start),
            },
            Invalid::Malformed(reason) => ParseError::MalformedDirective {
                body: body.to_string(),
                reason,
                at: self.context(span.start),
            },
        })?;
        log::trace!("directive at {}..{}: {:?}", span.start, span.end, directive);

        match directive {
            Directive::LoopOpen {
                target,
                alias,
                path,
            } => self.push(
                Header::Loop {
                    target: target.to_string(),
                    alias: alias.to_string(),
                    path,
                },
                span,
            ),
            Directive::IfOpen { path } => self.push(Header::If { condition: path }, span),
            Directive::LoopClose => return self.pop(BlockKind::Loop, body, span),
            Directive::IfClose => return self.pop(BlockKind::If, body, span),
            Directive::Comment(content) => self.append(Block::Comment(CommentBlock {
                content: content.to_string(),
                span,
            })),
            Directive::Accessor { expression, path } => {
                self.append(Block::Accessor(AccessorBlock {
                    expression: expression.to_string(),
                    path,
                    span,
                }))
            }
            Directive::Variable(name) => self.append(Block::Variable(VariableBlock {
                name: name.to_string(),
                span,
            })),
            Directive::UnknownClose(directive) => {
                return Err(ParseError::UnexpectedClose {
                    directive: directive.to_string(),
                    at: self.context(span.start),
                })
            }
        }
        Ok(())
    }

    fn push(&mut self, header: Header, span: Span) {
        self.stack.push(OpenBlock {
            header,
            start: span.start,
            children: Vec::new(),
        });
    }

    fn pop(&mut self, found: BlockKind, body: &str, span: Span) -> Result<(), ParseError> {
        let expected = match self.stack.last() {
            Some(open) => open.header.kind(),
            None => {
                return Err(ParseError::UnexpectedClose {
                    directive: body.to_string(),
                    at: self.context(span.start),
                })
            }
        };
        if expected != found {
            return Err(ParseError::MismatchedClose {
                expected,
                found,
                at: self.context(span.start),
            });
        }

        if let Some(OpenBlock {
            header,
            start,
            children,
        }) = self.stack.pop()
        {
            let span = Span::new(start, span.end);
            let block = match header {
                Header::Loop {
                    target,
                    alias,
                    path,
                } => Block::Loop(LoopBlock {
                    target,
                    alias,
                    path,
                    children,
                    span,
                }),
                Header::If { condition } => Block::If(IfBlock {
                    condition,
                    children,
                    span,
                }),
            };
            self.append(block);
        }
        Ok(())
    }

    fn append(&mut self, block: Block) {
        match self.stack.last_mut() {
            Some(open) => open.children.push(block),
            None => self.root.push(block),
        }
    }

    fn context(&self, offset: usize) -> SourceContext {
        SourceContext::capture(self.source, offset)
    }
}

//! Renderer for evaluating the curlew block tree.
//!
//! Rendering is a recursive walk that reads the tree and the scope and never
//! modifies either. Strict mode turns every missing, null or mistyped value
//! into an error; lenient mode renders those as an empty string (or a
//! best-effort string for non-scalar values).

use crate::config::RenderConfig;
use crate::error::{CurlewError, Result, SourceContext};
use crate::resolver::PathResolver;
use crate::scope::Scope;
use crate::value::Value;
use curlew_ast::{AccessorBlock, Block, IfBlock, LoopBlock, Span, Template, VariableBlock};

/// Renderer for evaluating a parsed template
pub struct Renderer<'a> {
    source: &'a str,
    resolver: PathResolver,
    strict: bool,
}

impl<'a> Renderer<'a> {
    /// Create a renderer. `source` is the text the template was parsed from
    /// and is only read to build error messages.
    pub fn new(source: &'a str, config: &RenderConfig) -> Self {
        Self {
            source,
            resolver: PathResolver::new(config.strict_var_mode),
            strict: config.strict_var_mode,
        }
    }

    /// Render the template against `scope`, without output normalization.
    pub fn render(&self, template: &Template, scope: &Scope<'_>) -> Result<String> {
        self.render_blocks(template.children(), scope)
    }

    fn render_blocks(&self, blocks: &[Block], scope: &Scope<'_>) -> Result<String> {
        let mut output = String::new();
        for block in blocks {
            output.push_str(&self.render_block(block, scope)?);
        }
        Ok(output)
    }

    /// Render a single block and its children.
    pub fn render_block(&self, block: &Block, scope: &Scope<'_>) -> Result<String> {
        match block {
            Block::Text(b) => Ok(b.content.clone()),
            Block::Comment(_) => Ok(String::new()),
            Block::Variable(b) => self.render_variable(b, scope),
            Block::Accessor(b) => self.render_accessor(b, scope),
            Block::Loop(b) => self.render_loop(b, scope),
            Block::If(b) => self.render_if(b, scope),
        }
    }

    fn render_variable(&self, block: &VariableBlock, scope: &Scope<'_>) -> Result<String> {
        self.output(scope.get(&block.name), &block.name, block.span)
    }

    fn render_accessor(&self, block: &AccessorBlock, scope: &Scope<'_>) -> Result<String> {
        let value = self.resolve(&block.path, scope, block.span)?;
        self.output(value, &block.expression, block.span)
    }

    fn render_loop(&self, block: &LoopBlock, scope: &Scope<'_>) -> Result<String> {
        let items = match self.resolve(&block.path, scope, block.span)? {
            Some(Value::Array(items)) => items,
            Some(other) if self.strict => {
                return Err(CurlewError::NotIterable {
                    path: block.target.clone(),
                    found: other.type_name(),
                    at: self.context(block.span),
                })
            }
            other => {
                log::debug!(
                    "loop target `{}` is {}, rendering nothing",
                    block.target,
                    other.map_or("absent", Value::type_name)
                );
                return Ok(String::new());
            }
        };

        log::trace!("loop `{}` over {} items", block.target, items.len());
        let mut output = String::new();
        for item in items {
            let child = scope.bind(&block.alias, item);
            output.push_str(&self.render_blocks(&block.children, &child)?);
        }
        Ok(output)
    }

    fn render_if(&self, block: &IfBlock, scope: &Scope<'_>) -> Result<String> {
        let truthy = match self.resolve(&block.condition, scope, block.span)? {
            Some(Value::Null) if self.strict => {
                return Err(CurlewError::MissingVariable {
                    name: block.condition.join("."),
                    at: self.context(block.span),
                })
            }
            Some(value) => value.is_truthy(),
            None => false,
        };

        if truthy {
            self.render_blocks(&block.children, scope)
        } else {
            Ok(String::new())
        }
    }

    /// Turn a looked-up value into output text.
    fn output(&self, value: Option<&Value>, name: &str, span: Span) -> Result<String> {
        let value = match value {
            Some(value) if !value.is_null() => value,
            _ if self.strict => {
                return Err(CurlewError::MissingVariable {
                    name: name.to_string(),
                    at: self.context(span),
                })
            }
            _ => {
                log::debug!("`{}` is missing or null, rendering empty", name);
                return Ok(String::new());
            }
        };

        match value.scalar_string() {
            Some(text) => Ok(text),
            None if self.strict => Err(CurlewError::UnsupportedType {
                name: name.to_string(),
                found: value.type_name(),
                at: self.context(span),
            }),
            None => {
                log::debug!("`{}` is {}, rendering as JSON", name, value.type_name());
                Ok(value.coerce_string())
            }
        }
    }

    fn resolve<'s>(
        &self,
        path: &[String],
        scope: &Scope<'s>,
        span: Span,
    ) -> Result<Option<&'s Value>> {
        self.resolver
            .resolve(path, scope)
            .map_err(|unresolved| unresolved.into_error(self.context(span)))
    }

    fn context(&self, span: Span) -> SourceContext {
        SourceContext::capture(self.source, span.start)
    }
}

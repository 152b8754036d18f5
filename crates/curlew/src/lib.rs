//! curlew - a small text-templating engine
//!
//! Templates are compiled once into a block tree and then evaluated against
//! a JSON data context:
//! - `{{ name }}` and `{{ user.name }}` output strings, numbers and booleans
//! - `{{#loop items as item}} ... {{/loop}}` repeats its body per element
//! - `{{#if user.active}} ... {{/if}}` renders its body when the value is truthy
//! - `{{# comment #}}` renders nothing
//!
//! Strict mode (the default) reports any missing, null or mistyped value as
//! an error; lenient mode renders those as empty text. The rendered output is
//! normalized: runs of blank lines collapse to one line break and the result
//! is trimmed (see [`normalize`]).
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//!
//! let result = curlew::render(
//!     "Hello {{ name }}!",
//!     json!({"name": "World"}),
//! ).unwrap();
//!
//! assert_eq!(result, "Hello World!");
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod normalize;
pub mod renderer;
pub mod resolver;
pub mod scope;
pub mod value;

pub use config::RenderConfig;
pub use curlew_ast::{Block, BlockKind, Location, ParseError, SourceContext, Template};
pub use error::{CurlewError, ErrorKind, Result};
pub use renderer::Renderer;
pub use resolver::PathResolver;
pub use scope::Scope;
pub use value::Value;

use std::collections::BTreeMap;

/// A parsed template bound to its data context.
///
/// The template is parsed once, in [`Curlew::new`]; [`Curlew::render`] can be
/// called any number of times and always produces the same output.
#[derive(Debug, Clone)]
pub struct Curlew {
    source: String,
    template: Template,
    data: BTreeMap<String, Value>,
    config: RenderConfig,
}

impl Curlew {
    /// Parse `source` and capture `data` for rendering.
    ///
    /// Fails with a syntax error if the template is malformed (in any mode),
    /// or with [`CurlewError::InvalidContext`] if `data` is not an object.
    ///
    /// # Example
    ///
    /// ```rust
    /// use curlew::{Curlew, RenderConfig};
    /// use serde_json::json;
    ///
    /// let tmpl = Curlew::new(
    ///     "{{#loop items as item}}-{{item}}{{/loop}}",
    ///     json!({"items": ["A", "B"]}),
    ///     RenderConfig::default(),
    /// ).unwrap();
    /// assert_eq!(tmpl.render().unwrap(), "-A-B");
    /// ```
    pub fn new(source: &str, data: serde_json::Value, config: RenderConfig) -> Result<Self> {
        let template = curlew_ast::parse(source)?;
        let data = into_context(data)?;
        Ok(Self {
            source: source.to_string(),
            template,
            data,
            config,
        })
    }

    /// Render the template with the data given at construction.
    pub fn render(&self) -> Result<String> {
        self.render_context(&self.data)
    }

    /// Render the same parsed template with different data. The data given
    /// at construction is left untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use curlew::{Curlew, RenderConfig};
    /// use serde_json::json;
    ///
    /// let tmpl = Curlew::new("Hi {{name}}", json!({"name": "Alice"}), RenderConfig::default()).unwrap();
    /// assert_eq!(tmpl.render_with(json!({"name": "Bob"})).unwrap(), "Hi Bob");
    /// assert_eq!(tmpl.render().unwrap(), "Hi Alice");
    /// ```
    pub fn render_with(&self, data: serde_json::Value) -> Result<String> {
        let data = into_context(data)?;
        self.render_context(&data)
    }

    fn render_context(&self, data: &BTreeMap<String, Value>) -> Result<String> {
        let renderer = Renderer::new(&self.source, &self.config);
        let raw = renderer.render(&self.template, &Scope::root(data))?;
        let output = normalize::normalize(&raw);
        log::debug!(
            "rendered {} bytes (strict: {})",
            output.len(),
            self.config.strict_var_mode
        );
        Ok(output)
    }

    /// Get a reference to the parsed block tree
    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn config(&self) -> RenderConfig {
        self.config
    }
}

fn into_context(data: serde_json::Value) -> Result<BTreeMap<String, Value>> {
    match Value::from_json(data) {
        Value::Object(map) => Ok(map),
        other => Err(CurlewError::InvalidContext {
            found: other.type_name(),
        }),
    }
}

/// Convenience function: parse and render in one call, in strict mode.
pub fn render(source: &str, data: serde_json::Value) -> Result<String> {
    render_with_config(source, data, RenderConfig::default())
}

/// Convenience function: parse and render in one call with `config`.
///
/// # Example
///
/// ```rust
/// use curlew::RenderConfig;
/// use serde_json::json;
///
/// let result = curlew::render_with_config("Hello {{name}}!", json!({}), RenderConfig::lenient()).unwrap();
/// assert_eq!(result, "Hello !");
/// ```
pub fn render_with_config(
    source: &str,
    data: serde_json::Value,
    config: RenderConfig,
) -> Result<String> {
    Curlew::new(source, data, config)?.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_simple() {
        let result = render("Hello {{name}}!", json!({"name": "Alice"})).unwrap();
        assert_eq!(result, "Hello Alice!");
    }

    #[test]
    fn test_render_is_idempotent() {
        let tmpl = Curlew::new(
            "{{#loop xs as x}}\n{{x}}\n\n{{/loop}}",
            json!({"xs": [1, 2]}),
            RenderConfig::default(),
        )
        .unwrap();
        let first = tmpl.render().unwrap();
        assert_eq!(first, "1\n2");
        assert_eq!(tmpl.render().unwrap(), first);
    }

    #[test]
    fn test_template_reuse_with_other_data() {
        let tmpl = Curlew::new("Hello {{name}}!", json!({"name": "Alice"}), RenderConfig::default())
            .unwrap();
        assert_eq!(tmpl.render_with(json!({"name": "Bob"})).unwrap(), "Hello Bob!");
        assert_eq!(tmpl.render().unwrap(), "Hello Alice!");
    }

    #[test]
    fn test_syntax_error_in_lenient_mode() {
        let err = Curlew::new("{{#if x}}", json!({}), RenderConfig::lenient()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_syntax_error_reported_before_data_error() {
        let err = Curlew::new("{{ a", json!([]), RenderConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_data_must_be_object() {
        let err = Curlew::new("x", json!(["a"]), RenderConfig::default()).unwrap_err();
        assert!(matches!(err, CurlewError::InvalidContext { found: "array" }));
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_output_is_normalized() {
        let result = render("\n  Title\n\n\n{{ body }}\n", json!({"body": "text"})).unwrap();
        assert_eq!(result, "Title\ntext");
    }

    #[test]
    fn test_template_accessor() {
        let tmpl = Curlew::new("a{{b}}", json!({"b": 1}), RenderConfig::lenient()).unwrap();
        assert_eq!(tmpl.template().children().len(), 2);
        assert_eq!(tmpl.config(), RenderConfig::lenient());
    }
}

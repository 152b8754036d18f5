//! Error types for the curlew template engine.

use thiserror::Error;

// Re-export diagnostics from curlew-ast
pub use curlew_ast::{Location, ParseError, SourceContext};

/// Broad error families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed template source. Raised while parsing, in every mode.
    Syntax,
    /// A name, property or path segment is missing or null (strict mode).
    Reference,
    /// A value has the wrong type for where it is used (strict mode), or the
    /// data context is not an object.
    Type,
    /// The render configuration could not be read.
    Config,
}

/// All errors that can occur in curlew
#[derive(Error, Debug)]
pub enum CurlewError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] ParseError),

    #[error("Missing variable '{name}' at {at}")]
    MissingVariable { name: String, at: SourceContext },

    #[error("Missing property '{key}' on {target} at {at}")]
    MissingProperty {
        key: String,
        target: String,
        at: SourceContext,
    },

    #[error("Cannot read property '{key}' of null '{path}' at {at}")]
    NullProperty {
        key: String,
        path: String,
        at: SourceContext,
    },

    #[error("'{path}' is not iterable (found {found}) at {at}")]
    NotIterable {
        path: String,
        found: &'static str,
        at: SourceContext,
    },

    #[error("Cannot output {found} value of '{name}' at {at}")]
    UnsupportedType {
        name: String,
        found: &'static str,
        at: SourceContext,
    },

    #[error("Template data must be an object, got {found}")]
    InvalidContext { found: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

impl CurlewError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CurlewError::Syntax(_) => ErrorKind::Syntax,
            CurlewError::MissingVariable { .. }
            | CurlewError::MissingProperty { .. }
            | CurlewError::NullProperty { .. } => ErrorKind::Reference,
            CurlewError::NotIterable { .. }
            | CurlewError::UnsupportedType { .. }
            | CurlewError::InvalidContext { .. } => ErrorKind::Type,
            CurlewError::InvalidConfig(_) => ErrorKind::Config,
        }
    }

    /// Where in the template the error was raised, when it came from a
    /// directive.
    pub fn context(&self) -> Option<&SourceContext> {
        match self {
            CurlewError::Syntax(err) => Some(err.context()),
            CurlewError::MissingVariable { at, .. }
            | CurlewError::MissingProperty { at, .. }
            | CurlewError::NullProperty { at, .. }
            | CurlewError::NotIterable { at, .. }
            | CurlewError::UnsupportedType { at, .. } => Some(at),
            CurlewError::InvalidContext { .. } | CurlewError::InvalidConfig(_) => None,
        }
    }
}

/// Result type alias for curlew operations
pub type Result<T> = std::result::Result<T, CurlewError>;

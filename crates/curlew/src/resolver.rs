//! Dotted path resolution.
//!
//! The first segment is looked up in the scope, every following segment as
//! an own property of the value found so far. In strict mode a missing
//! segment or a null in the middle of the path is an error; in lenient mode
//! the walk stops and reports the value as absent.

use crate::error::{CurlewError, SourceContext};
use crate::scope::Scope;
use crate::value::Value;

/// Why a path could not be resolved in strict mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    /// `key` is not present on `target`.
    MissingProperty { key: String, target: String },
    /// `path` resolved to null and `key` was read from it.
    NullProperty { key: String, path: String },
}

impl Unresolved {
    pub fn into_error(self, at: SourceContext) -> CurlewError {
        match self {
            Unresolved::MissingProperty { key, target } => {
                CurlewError::MissingProperty { key, target, at }
            }
            Unresolved::NullProperty { key, path } => CurlewError::NullProperty { key, path, at },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathResolver {
    strict: bool,
}

impl PathResolver {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Resolve `path` against `scope`.
    ///
    /// Returns the value at the last segment unchanged, which may itself be
    /// null. `Ok(None)` means the path was absent (lenient mode only).
    pub fn resolve<'a>(
        &self,
        path: &[String],
        scope: &Scope<'a>,
    ) -> Result<Option<&'a Value>, Unresolved> {
        let Some((first, rest)) = path.split_first() else {
            return self.fail(|| Unresolved::MissingProperty {
                key: String::new(),
                target: scope.describe(),
            });
        };

        let mut current = match scope.get(first) {
            Some(value) => value,
            None => {
                return self.fail(|| Unresolved::MissingProperty {
                    key: first.clone(),
                    target: scope.describe(),
                })
            }
        };

        for (index, key) in rest.iter().enumerate() {
            if current.is_null() {
                return self.fail(|| Unresolved::NullProperty {
                    key: key.clone(),
                    path: path[..=index].join("."),
                });
            }
            current = match current.get(key) {
                Some(value) => value,
                None => {
                    return self.fail(|| Unresolved::MissingProperty {
                        key: key.clone(),
                        target: current.preview(),
                    })
                }
            };
        }

        Ok(Some(current))
    }

    fn fail<'a>(
        &self,
        unresolved: impl FnOnce() -> Unresolved,
    ) -> Result<Option<&'a Value>, Unresolved> {
        if self.strict {
            Err(unresolved())
        } else {
            Ok(None)
        }
    }
}

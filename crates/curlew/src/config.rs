//! Render configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Options that control how data problems are reported.
///
/// Deserializes from the camelCase form hosts usually pass around,
/// e.g. `{"strictVarMode": false}`. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// When true (the default), a missing, null or wrongly typed variable,
    /// accessor, loop target or condition is an error. When false those
    /// render as empty text. Syntax errors are reported either way.
    pub strict_var_mode: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            strict_var_mode: true,
        }
    }
}

impl RenderConfig {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self {
            strict_var_mode: false,
        }
    }

    /// Read a configuration from a JSON object.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

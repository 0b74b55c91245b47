//! Operand types for selectors
//!
//! - [`ComparableValue`]: the only literal types a selector may compare against
//! - [`FieldPath`]: opaque locator into a stored JSON document

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar operand of a field condition
///
/// Only booleans, numbers and strings can appear as an equality target or an
/// operator operand. JSON null, arrays and objects are rejected by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComparableValue {
    /// Boolean value
    Bool(bool),
    /// Numeric value, kept as the original JSON number
    Number(serde_json::Number),
    /// String value
    String(String),
}

impl ComparableValue {
    /// Convert a JSON value into a comparable value
    ///
    /// Returns `None` for null, arrays and objects.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(ComparableValue::Bool(*b)),
            serde_json::Value::Number(n) => Some(ComparableValue::Number(n.clone())),
            serde_json::Value::String(s) => Some(ComparableValue::String(s.clone())),
            _ => None,
        }
    }

    /// Convert back into a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ComparableValue::Bool(b) => serde_json::Value::Bool(*b),
            ComparableValue::Number(n) => serde_json::Value::Number(n.clone()),
            ComparableValue::String(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for ComparableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl From<bool> for ComparableValue {
    fn from(v: bool) -> Self {
        ComparableValue::Bool(v)
    }
}

impl From<i32> for ComparableValue {
    fn from(v: i32) -> Self {
        ComparableValue::Number(v.into())
    }
}

impl From<i64> for ComparableValue {
    fn from(v: i64) -> Self {
        ComparableValue::Number(v.into())
    }
}

impl From<u32> for ComparableValue {
    fn from(v: u32) -> Self {
        ComparableValue::Number(v.into())
    }
}

impl From<u64> for ComparableValue {
    fn from(v: u64) -> Self {
        ComparableValue::Number(v.into())
    }
}

impl From<f64> for ComparableValue {
    /// Non-finite floats have no JSON representation and collapse to `0`.
    fn from(v: f64) -> Self {
        ComparableValue::Number(serde_json::Number::from_f64(v).unwrap_or_else(|| 0.into()))
    }
}

impl From<f32> for ComparableValue {
    fn from(v: f32) -> Self {
        ComparableValue::from(v as f64)
    }
}

impl From<String> for ComparableValue {
    fn from(v: String) -> Self {
        ComparableValue::String(v)
    }
}

impl From<&str> for ComparableValue {
    fn from(v: &str) -> Self {
        ComparableValue::String(v.to_string())
    }
}

/// Location inside a stored JSON document
///
/// Conventionally JSON-Path syntax (`$.a.b`), but the compiler never parses
/// it. The path is handed to `json_extract` as a value, never spliced into
/// SQL text unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// Create a field path
    pub fn new(path: impl Into<String>) -> Self {
        FieldPath(path.into())
    }

    /// Get the path text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the path text
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(v: &str) -> Self {
        FieldPath(v.to_string())
    }
}

impl From<String> for FieldPath {
    fn from(v: String) -> Self {
        FieldPath(v)
    }
}

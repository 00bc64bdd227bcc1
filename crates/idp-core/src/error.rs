//! Error types for the navigation parse boundary

use thiserror::Error;

/// Why a raw navigation entry was rejected at the parse boundary.
///
/// Only structurally unusable entries are rejected. Missing optional fields,
/// blank module ids and non-numeric orders are normalized instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("entry has no usable `{0}` field")]
    MissingKey(&'static str),
}

/// Describe a JSON value's kind for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

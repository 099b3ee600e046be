//! Violation records produced by document validation
//!
//! Validation never aborts at the first failure. Every failed constraint
//! becomes one immutable `Violation` carrying the path to the offending value,
//! a human-readable message, and the kind of constraint node that rejected it.
//! Callers receive the complete list sorted by path.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::path::FieldPath;

/// One reported failure of a document against the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    path: FieldPath,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    constraint: Option<&'static str>,
}

impl Violation {
    /// Creates a violation at `path` attributed to the given constraint kind.
    pub fn new(path: FieldPath, message: impl Into<String>, constraint: &'static str) -> Self {
        Self {
            path,
            message: message.into(),
            constraint: Some(constraint),
        }
    }

    /// Creates a type-mismatch violation. The mismatched value is not
    /// descended into, so this is the only violation reported for it.
    pub fn type_mismatch(path: FieldPath, expected: &'static str, actual: &Value) -> Self {
        Self {
            path,
            message: format!("expected {}, got {}", expected, json_type_name(actual)),
            constraint: Some(expected),
        }
    }

    /// Creates a missing-required-key violation at the key's own path.
    pub fn missing_required(path: FieldPath) -> Self {
        Self {
            path,
            message: "missing required key".into(),
            constraint: Some("object"),
        }
    }

    /// Creates an unknown-key violation at the key's own path.
    pub fn unknown_key(path: FieldPath) -> Self {
        Self {
            path,
            message: "key is not declared in the schema".into(),
            constraint: Some("object"),
        }
    }

    /// Returns the path to the offending value.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Returns the human-readable failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the kind of constraint node that produced this violation.
    pub fn constraint(&self) -> Option<&'static str> {
        self.constraint
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Returns the JSON type name of a value for mismatch messages.
///
/// Integral numbers report as `integer` so mismatch messages distinguish
/// `42` from `42.5`.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

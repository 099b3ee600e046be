//! Compiled constraint tree
//!
//! A schema compiles into a tree of `ConstraintNode` values, one node per
//! constrained position in the document. Nodes are immutable after
//! compilation, children are owned exclusively by their parent, and the tree
//! is finite and acyclic by construction, so the compiled schema is safe to
//! share read-only across concurrent validations.

use regex::Regex;
use serde_json::Value;

use super::formats::Format;

/// One compiled unit of the schema.
///
/// Each variant is a kind with its kind-specific constraints. Supported kinds:
/// object, array, string, number, integer, boolean, null, enumeration,
/// constant.
#[derive(Debug, Clone)]
pub enum ConstraintNode {
    /// Object shape: declared members, required members, unknown-key policy.
    Object {
        /// Child nodes in the schema's declared order. Declared order drives
        /// the validator's member walk, keeping enumeration deterministic.
        properties: Vec<(String, ConstraintNode)>,
        /// Keys that must be present. Always a subset of `properties`.
        required: Vec<String>,
        /// Whether keys outside `properties` are accepted.
        allow_unknown: bool,
    },
    /// Homogeneous array with optional element node and cardinality bounds.
    Array {
        items: Option<Box<ConstraintNode>>,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },
    /// UTF-8 string with length, pattern, and format constraints.
    String {
        /// Minimum length in characters, not bytes.
        min_length: Option<usize>,
        /// Maximum length in characters, not bytes.
        max_length: Option<usize>,
        pattern: Option<Regex>,
        format: Option<Format>,
    },
    /// Any JSON number with inclusive bounds.
    Number {
        minimum: Option<f64>,
        maximum: Option<f64>,
    },
    /// Integral number with inclusive bounds.
    Integer {
        minimum: Option<i64>,
        maximum: Option<i64>,
    },
    /// Boolean, no further constraints.
    Boolean,
    /// JSON null, no further constraints.
    Null,
    /// Membership in a fixed set of permitted values.
    Enum { values: Vec<Value> },
    /// Equality with a single fixed value.
    Const { value: Value },
}

impl ConstraintNode {
    /// Returns the kind name for diagnostics and violation records.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConstraintNode::Object { .. } => "object",
            ConstraintNode::Array { .. } => "array",
            ConstraintNode::String { .. } => "string",
            ConstraintNode::Number { .. } => "number",
            ConstraintNode::Integer { .. } => "integer",
            ConstraintNode::Boolean => "boolean",
            ConstraintNode::Null => "null",
            ConstraintNode::Enum { .. } => "enum",
            ConstraintNode::Const { .. } => "const",
        }
    }

    /// Looks up a declared member node on an object kind.
    pub fn property(&self, key: &str) -> Option<&ConstraintNode> {
        match self {
            ConstraintNode::Object { properties, .. } => properties
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, node)| node),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(
            ConstraintNode::Object {
                properties: Vec::new(),
                required: Vec::new(),
                allow_unknown: true,
            }
            .kind_name(),
            "object"
        );
        assert_eq!(
            ConstraintNode::Array {
                items: None,
                min_items: None,
                max_items: None,
            }
            .kind_name(),
            "array"
        );
        assert_eq!(ConstraintNode::Boolean.kind_name(), "boolean");
        assert_eq!(ConstraintNode::Null.kind_name(), "null");
        assert_eq!(
            ConstraintNode::Enum { values: Vec::new() }.kind_name(),
            "enum"
        );
    }

    #[test]
    fn test_property_lookup_on_object() {
        let node = ConstraintNode::Object {
            properties: vec![("title".into(), ConstraintNode::Boolean)],
            required: Vec::new(),
            allow_unknown: true,
        };
        assert!(node.property("title").is_some());
        assert!(node.property("missing").is_none());
    }

    #[test]
    fn test_property_lookup_on_non_object() {
        assert!(ConstraintNode::Null.property("anything").is_none());
    }
}

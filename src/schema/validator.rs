//! Document validation engine
//!
//! Walks a document against the compiled constraint tree and collects every
//! violation. The engine never short-circuits at the first failure and never
//! panics on any well-formed JSON value: anything it cannot accept becomes a
//! `Violation`, not a crash.
//!
//! Semantics:
//! - a kind mismatch emits one violation and stops descent into that value
//! - when the kind matches, every declared constraint is applied
//!   independently, one violation per failing constraint
//! - object members are walked in the schema's declared order
//! - a present `null` for a non-required key counts as absent
//! - the final list is stably sorted by path (prefixes first, then
//!   lexicographic by token, keys before indices)

use serde_json::Value;

use super::formats::FormatRegistry;
use super::path::FieldPath;
use super::types::ConstraintNode;
use super::violation::Violation;

/// Validates a document against a compiled constraint tree.
///
/// Pure: no I/O, no mutation of inputs, safe to call concurrently against the
/// same shared tree.
pub(crate) fn validate_document(
    root: &ConstraintNode,
    document: &Value,
    formats: &FormatRegistry,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_node(root, document, &FieldPath::root(), formats, &mut violations);
    violations.sort_by(|a, b| a.path().cmp(b.path()));
    violations
}

fn check_node(
    node: &ConstraintNode,
    value: &Value,
    path: &FieldPath,
    formats: &FormatRegistry,
    out: &mut Vec<Violation>,
) {
    match node {
        ConstraintNode::Object {
            properties,
            required,
            allow_unknown,
        } => check_object(value, path, properties, required, *allow_unknown, formats, out),
        ConstraintNode::Array {
            items,
            min_items,
            max_items,
        } => check_array(value, path, items.as_deref(), *min_items, *max_items, formats, out),
        ConstraintNode::String {
            min_length,
            max_length,
            pattern,
            format,
        } => {
            let text = match value.as_str() {
                Some(text) => text,
                None => {
                    out.push(Violation::type_mismatch(path.clone(), "string", value));
                    return;
                }
            };
            let length = text.chars().count();
            if let Some(min) = min_length {
                if length < *min {
                    out.push(Violation::new(
                        path.clone(),
                        format!("string length {} is below the minimum {}", length, min),
                        "string",
                    ));
                }
            }
            if let Some(max) = max_length {
                if length > *max {
                    out.push(Violation::new(
                        path.clone(),
                        format!("string length {} exceeds the maximum {}", length, max),
                        "string",
                    ));
                }
            }
            if let Some(pattern) = pattern {
                if !pattern.is_match(text) {
                    out.push(Violation::new(
                        path.clone(),
                        format!("value does not match pattern '{}'", pattern.as_str()),
                        "string",
                    ));
                }
            }
            if let Some(format) = format {
                if !formats.check(*format, text) {
                    out.push(Violation::new(
                        path.clone(),
                        format!("value does not satisfy format '{}'", format.name()),
                        "string",
                    ));
                }
            }
        }
        ConstraintNode::Number { minimum, maximum } => {
            let number = match value.as_f64() {
                Some(number) => number,
                None => {
                    out.push(Violation::type_mismatch(path.clone(), "number", value));
                    return;
                }
            };
            if let Some(min) = minimum {
                if number < *min {
                    out.push(Violation::new(
                        path.clone(),
                        format!("value {} is below the minimum {}", number, min),
                        "number",
                    ));
                }
            }
            if let Some(max) = maximum {
                if number > *max {
                    out.push(Violation::new(
                        path.clone(),
                        format!("value {} exceeds the maximum {}", number, max),
                        "number",
                    ));
                }
            }
        }
        ConstraintNode::Integer { minimum, maximum } => {
            // Widen to i128 so u64 values above i64::MAX still bound-check.
            let integer: i128 = if let Some(signed) = value.as_i64() {
                i128::from(signed)
            } else if let Some(unsigned) = value.as_u64() {
                i128::from(unsigned)
            } else {
                out.push(Violation::type_mismatch(path.clone(), "integer", value));
                return;
            };
            if let Some(min) = minimum {
                if integer < i128::from(*min) {
                    out.push(Violation::new(
                        path.clone(),
                        format!("value {} is below the minimum {}", integer, min),
                        "integer",
                    ));
                }
            }
            if let Some(max) = maximum {
                if integer > i128::from(*max) {
                    out.push(Violation::new(
                        path.clone(),
                        format!("value {} exceeds the maximum {}", integer, max),
                        "integer",
                    ));
                }
            }
        }
        ConstraintNode::Boolean => {
            if !value.is_boolean() {
                out.push(Violation::type_mismatch(path.clone(), "boolean", value));
            }
        }
        ConstraintNode::Null => {
            if !value.is_null() {
                out.push(Violation::type_mismatch(path.clone(), "null", value));
            }
        }
        ConstraintNode::Enum { values } => {
            if !values.contains(value) {
                out.push(Violation::new(
                    path.clone(),
                    "value is not one of the permitted values",
                    "enum",
                ));
            }
        }
        ConstraintNode::Const { value: expected } => {
            if value != expected {
                out.push(Violation::new(
                    path.clone(),
                    "value does not equal the required constant",
                    "const",
                ));
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn check_object(
    value: &Value,
    path: &FieldPath,
    properties: &[(String, ConstraintNode)],
    required: &[String],
    allow_unknown: bool,
    formats: &FormatRegistry,
    out: &mut Vec<Violation>,
) {
    let members = match value.as_object() {
        Some(members) => members,
        None => {
            out.push(Violation::type_mismatch(path.clone(), "object", value));
            return;
        }
    };

    for (key, child) in properties {
        let is_required = required.iter().any(|name| name == key);
        match members.get(key) {
            None => {
                if is_required {
                    out.push(Violation::missing_required(path.child(key)));
                }
            }
            // A null supplied for an optional key counts as absent.
            Some(Value::Null) if !is_required => {}
            Some(member) => check_node(child, member, &path.child(key), formats, out),
        }
    }

    if !allow_unknown {
        for key in members.keys() {
            if !properties.iter().any(|(name, _)| name == key) {
                out.push(Violation::unknown_key(path.child(key)));
            }
        }
    }
}

fn check_array(
    value: &Value,
    path: &FieldPath,
    items: Option<&ConstraintNode>,
    min_items: Option<usize>,
    max_items: Option<usize>,
    formats: &FormatRegistry,
    out: &mut Vec<Violation>,
) {
    let elements = match value.as_array() {
        Some(elements) => elements,
        None => {
            out.push(Violation::type_mismatch(path.clone(), "array", value));
            return;
        }
    };

    if let Some(min) = min_items {
        if elements.len() < min {
            out.push(Violation::new(
                path.clone(),
                format!("expected at least {} items, got {}", min, elements.len()),
                "array",
            ));
        }
    }
    if let Some(max) = max_items {
        if elements.len() > max {
            out.push(Violation::new(
                path.clone(),
                format!("expected at most {} items, got {}", max, elements.len()),
                "array",
            ));
        }
    }

    if let Some(item_node) = items {
        for (index, element) in elements.iter().enumerate() {
            check_node(item_node, element, &path.element(index), formats, out);
        }
    }
}

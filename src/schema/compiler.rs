//! Constraint language compiler
//!
//! Compiles the declarative schema source (a JSON document) into the
//! `ConstraintNode` tree. The vocabulary is closed: `type`, `required`,
//! `properties`, `additionalProperties`, `items`, `pattern`, `enum`, `const`,
//! `minimum`/`maximum`, `minLength`/`maxLength`, `minItems`/`maxItems`,
//! `format`, plus the ignored annotation `description`. Anything else is a
//! compile error, as is any structurally invalid combination: unknown kind,
//! conflicting kind discriminators, a `required` key missing from
//! `properties`, an uncompilable `pattern`, inverted bounds, or an unknown
//! `format` name.
//!
//! Compilation happens once at startup. Every error is fatal.

use serde_json::{Map, Value};

use super::errors::{SchemaError, SchemaResult};
use super::formats::Format;
use super::path::FieldPath;
use super::types::ConstraintNode;

/// Every key the constraint language accepts.
const VOCABULARY: &[&str] = &[
    "type",
    "required",
    "properties",
    "additionalProperties",
    "items",
    "pattern",
    "enum",
    "const",
    "minimum",
    "maximum",
    "minLength",
    "maxLength",
    "minItems",
    "maxItems",
    "format",
    "description",
];

/// Compiles a schema source document into a constraint tree.
pub(crate) fn compile(source: &Value) -> SchemaResult<ConstraintNode> {
    compile_node(source, &FieldPath::root())
}

fn compile_node(source: &Value, at: &FieldPath) -> SchemaResult<ConstraintNode> {
    let obj = match source.as_object() {
        Some(obj) => obj,
        None => {
            return Err(SchemaError::malformed_at(
                at,
                "constraint node must be an object",
            ))
        }
    };

    for key in obj.keys() {
        if !VOCABULARY.contains(&key.as_str()) {
            return Err(SchemaError::malformed_at(
                at,
                format!("unrecognized constraint key '{}'", key),
            ));
        }
    }

    // Exactly one kind discriminator per node.
    let discriminators: Vec<&str> = ["type", "enum", "const"]
        .into_iter()
        .filter(|d| obj.contains_key(*d))
        .collect();
    match discriminators.len() {
        0 => {
            return Err(SchemaError::malformed_at(
                at,
                "node declares no kind: expected 'type', 'enum', or 'const'",
            ))
        }
        1 => {}
        _ => {
            return Err(SchemaError::conflicting_constraints(
                at,
                format!(
                    "node declares more than one kind discriminator: {}",
                    discriminators.join(", ")
                ),
            ))
        }
    }

    if let Some(value) = obj.get("const") {
        check_allowed(obj, &["const"], at, "const")?;
        return Ok(ConstraintNode::Const {
            value: value.clone(),
        });
    }

    if let Some(values) = obj.get("enum") {
        check_allowed(obj, &["enum"], at, "enum")?;
        let values = match values.as_array() {
            Some(values) if !values.is_empty() => values.clone(),
            _ => {
                return Err(SchemaError::malformed_at(
                    at,
                    "'enum' must be a non-empty array of permitted values",
                ))
            }
        };
        return Ok(ConstraintNode::Enum { values });
    }

    let kind = match obj.get("type").and_then(Value::as_str) {
        Some(kind) => kind,
        None => return Err(SchemaError::malformed_at(at, "'type' must be a string")),
    };

    match kind {
        "object" => compile_object(obj, at),
        "array" => compile_array(obj, at),
        "string" => compile_string(obj, at),
        "number" => compile_number(obj, at),
        "integer" => compile_integer(obj, at),
        "boolean" => {
            check_allowed(obj, &["type"], at, "boolean")?;
            Ok(ConstraintNode::Boolean)
        }
        "null" => {
            check_allowed(obj, &["type"], at, "null")?;
            Ok(ConstraintNode::Null)
        }
        other => Err(SchemaError::unknown_kind(at, other)),
    }
}

fn compile_object(obj: &Map<String, Value>, at: &FieldPath) -> SchemaResult<ConstraintNode> {
    check_allowed(
        obj,
        &["type", "properties", "required", "additionalProperties"],
        at,
        "object",
    )?;

    let mut properties = Vec::new();
    if let Some(declared) = obj.get("properties") {
        let declared = match declared.as_object() {
            Some(declared) => declared,
            None => {
                return Err(SchemaError::malformed_at(
                    at,
                    "'properties' must be an object",
                ))
            }
        };
        let properties_at = at.child("properties");
        for (key, child_source) in declared {
            let child = compile_node(child_source, &properties_at.child(key))?;
            properties.push((key.clone(), child));
        }
    }

    let mut required = Vec::new();
    if let Some(entries) = obj.get("required") {
        let entries = match entries.as_array() {
            Some(entries) => entries,
            None => {
                return Err(SchemaError::malformed_at(
                    at,
                    "'required' must be an array of key names",
                ))
            }
        };
        for entry in entries {
            let key = match entry.as_str() {
                Some(key) => key,
                None => {
                    return Err(SchemaError::malformed_at(
                        at,
                        "'required' entries must be strings",
                    ))
                }
            };
            if !properties.iter().any(|(name, _)| name == key) {
                return Err(SchemaError::required_unknown_key(at, key));
            }
            required.push(key.to_string());
        }
    }

    let allow_unknown = match obj.get("additionalProperties") {
        None => true,
        Some(Value::Bool(allowed)) => *allowed,
        Some(_) => {
            return Err(SchemaError::malformed_at(
                at,
                "'additionalProperties' must be a boolean",
            ))
        }
    };

    Ok(ConstraintNode::Object {
        properties,
        required,
        allow_unknown,
    })
}

fn compile_array(obj: &Map<String, Value>, at: &FieldPath) -> SchemaResult<ConstraintNode> {
    check_allowed(obj, &["type", "items", "minItems", "maxItems"], at, "array")?;

    let items = match obj.get("items") {
        None => None,
        Some(item_source) => Some(Box::new(compile_node(item_source, &at.child("items"))?)),
    };

    let min_items = expect_count(obj, "minItems", at)?;
    let max_items = expect_count(obj, "maxItems", at)?;
    if let (Some(min), Some(max)) = (min_items, max_items) {
        if min > max {
            return Err(SchemaError::bounds_conflict(at, "item count"));
        }
    }

    Ok(ConstraintNode::Array {
        items,
        min_items,
        max_items,
    })
}

fn compile_string(obj: &Map<String, Value>, at: &FieldPath) -> SchemaResult<ConstraintNode> {
    check_allowed(
        obj,
        &["type", "minLength", "maxLength", "pattern", "format"],
        at,
        "string",
    )?;

    let min_length = expect_count(obj, "minLength", at)?;
    let max_length = expect_count(obj, "maxLength", at)?;
    if let (Some(min), Some(max)) = (min_length, max_length) {
        if min > max {
            return Err(SchemaError::bounds_conflict(at, "length"));
        }
    }

    let pattern = match obj.get("pattern") {
        None => None,
        Some(Value::String(pattern)) => match regex::Regex::new(pattern) {
            Ok(compiled) => Some(compiled),
            Err(reason) => return Err(SchemaError::bad_pattern(at, pattern, reason)),
        },
        Some(_) => return Err(SchemaError::malformed_at(at, "'pattern' must be a string")),
    };

    let format = match obj.get("format") {
        None => None,
        Some(Value::String(name)) => match Format::from_name(name) {
            Some(format) => Some(format),
            None => return Err(SchemaError::unknown_format(at, name)),
        },
        Some(_) => return Err(SchemaError::malformed_at(at, "'format' must be a string")),
    };

    Ok(ConstraintNode::String {
        min_length,
        max_length,
        pattern,
        format,
    })
}

fn compile_number(obj: &Map<String, Value>, at: &FieldPath) -> SchemaResult<ConstraintNode> {
    check_allowed(obj, &["type", "minimum", "maximum"], at, "number")?;

    let minimum = expect_f64(obj, "minimum", at)?;
    let maximum = expect_f64(obj, "maximum", at)?;
    if let (Some(min), Some(max)) = (minimum, maximum) {
        if min > max {
            return Err(SchemaError::bounds_conflict(at, "numeric"));
        }
    }

    Ok(ConstraintNode::Number { minimum, maximum })
}

fn compile_integer(obj: &Map<String, Value>, at: &FieldPath) -> SchemaResult<ConstraintNode> {
    check_allowed(obj, &["type", "minimum", "maximum"], at, "integer")?;

    let minimum = expect_i64(obj, "minimum", at)?;
    let maximum = expect_i64(obj, "maximum", at)?;
    if let (Some(min), Some(max)) = (minimum, maximum) {
        if min > max {
            return Err(SchemaError::bounds_conflict(at, "numeric"));
        }
    }

    Ok(ConstraintNode::Integer { minimum, maximum })
}

/// Rejects vocabulary keys that do not apply to the node's kind. The
/// annotation key `description` is always accepted.
fn check_allowed(
    obj: &Map<String, Value>,
    allowed: &[&str],
    at: &FieldPath,
    kind: &str,
) -> SchemaResult<()> {
    for key in obj.keys() {
        if key == "description" {
            continue;
        }
        if !allowed.contains(&key.as_str()) {
            return Err(SchemaError::misplaced_constraint(at, key, kind));
        }
    }
    Ok(())
}

fn expect_count(
    obj: &Map<String, Value>,
    key: &str,
    at: &FieldPath,
) -> SchemaResult<Option<usize>> {
    match obj.get(key) {
        None => Ok(None),
        Some(value) => match value.as_u64() {
            Some(count) => Ok(Some(count as usize)),
            None => Err(SchemaError::malformed_at(
                at,
                format!("'{}' must be a non-negative integer", key),
            )),
        },
    }
}

fn expect_i64(obj: &Map<String, Value>, key: &str, at: &FieldPath) -> SchemaResult<Option<i64>> {
    match obj.get(key) {
        None => Ok(None),
        Some(value) => match value.as_i64() {
            Some(bound) => Ok(Some(bound)),
            None => Err(SchemaError::malformed_at(
                at,
                format!("'{}' must be an integer", key),
            )),
        },
    }
}

fn expect_f64(obj: &Map<String, Value>, key: &str, at: &FieldPath) -> SchemaResult<Option<f64>> {
    match obj.get(key) {
        None => Ok(None),
        Some(value) => match value.as_f64() {
            Some(bound) => Ok(Some(bound)),
            None => Err(SchemaError::malformed_at(
                at,
                format!("'{}' must be a number", key),
            )),
        },
    }
}

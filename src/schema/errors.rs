//! Schema compilation error types
//!
//! Error codes:
//! - PAPER_SCHEMA_MALFORMED
//! - PAPER_SCHEMA_UNKNOWN_KIND
//! - PAPER_SCHEMA_CONFLICTING_CONSTRAINTS
//! - PAPER_SCHEMA_MISPLACED_CONSTRAINT
//! - PAPER_SCHEMA_REQUIRED_UNKNOWN_KEY
//! - PAPER_SCHEMA_BAD_PATTERN
//! - PAPER_SCHEMA_BOUNDS_CONFLICT
//! - PAPER_SCHEMA_UNKNOWN_FORMAT
//!
//! Every compile error is fatal: the process must refuse to start rather than
//! run with an unusable schema. Document validation failures are not errors
//! at all; they are `Violation` lists returned as ordinary values.

use std::fmt;

use super::path::FieldPath;

/// Schema compile error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema source is not a well-formed constraint description
    MalformedSchema,
    /// `type` names a kind outside the supported set
    UnknownKind,
    /// A node declares more than one kind discriminator
    ConflictingConstraints,
    /// A constraint key that does not apply to the node's kind
    MisplacedConstraint,
    /// A `required` entry names a key absent from `properties`
    RequiredUnknownKey,
    /// A `pattern` failed to compile as a regular expression
    BadPattern,
    /// Numeric or cardinality bounds with minimum above maximum
    BoundsConflict,
    /// A `format` name outside the predicate registry
    UnknownFormat,
}

impl SchemaErrorCode {
    /// Returns the string code.
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::MalformedSchema => "PAPER_SCHEMA_MALFORMED",
            SchemaErrorCode::UnknownKind => "PAPER_SCHEMA_UNKNOWN_KIND",
            SchemaErrorCode::ConflictingConstraints => "PAPER_SCHEMA_CONFLICTING_CONSTRAINTS",
            SchemaErrorCode::MisplacedConstraint => "PAPER_SCHEMA_MISPLACED_CONSTRAINT",
            SchemaErrorCode::RequiredUnknownKey => "PAPER_SCHEMA_REQUIRED_UNKNOWN_KEY",
            SchemaErrorCode::BadPattern => "PAPER_SCHEMA_BAD_PATTERN",
            SchemaErrorCode::BoundsConflict => "PAPER_SCHEMA_BOUNDS_CONFLICT",
            SchemaErrorCode::UnknownFormat => "PAPER_SCHEMA_UNKNOWN_FORMAT",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema compile error with the position inside the schema source.
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    /// Position of the offending node inside the schema source, when known.
    at: Option<FieldPath>,
}

impl SchemaError {
    /// Creates a malformed-schema error with no position context.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedSchema,
            message: message.into(),
            at: None,
        }
    }

    /// Creates a malformed-schema error at a position in the source.
    pub fn malformed_at(at: &FieldPath, message: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedSchema,
            message: message.into(),
            at: Some(at.clone()),
        }
    }

    /// Creates an unknown-kind error.
    pub fn unknown_kind(at: &FieldPath, kind: &str) -> Self {
        Self {
            code: SchemaErrorCode::UnknownKind,
            message: format!("unsupported kind '{}'", kind),
            at: Some(at.clone()),
        }
    }

    /// Creates a conflicting-constraints error.
    pub fn conflicting_constraints(at: &FieldPath, message: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::ConflictingConstraints,
            message: message.into(),
            at: Some(at.clone()),
        }
    }

    /// Creates a misplaced-constraint error.
    pub fn misplaced_constraint(at: &FieldPath, key: &str, kind: &str) -> Self {
        Self {
            code: SchemaErrorCode::MisplacedConstraint,
            message: format!("constraint '{}' does not apply to kind '{}'", key, kind),
            at: Some(at.clone()),
        }
    }

    /// Creates a required-unknown-key error.
    pub fn required_unknown_key(at: &FieldPath, key: &str) -> Self {
        Self {
            code: SchemaErrorCode::RequiredUnknownKey,
            message: format!("required key '{}' is not declared in properties", key),
            at: Some(at.clone()),
        }
    }

    /// Creates a bad-pattern error.
    pub fn bad_pattern(at: &FieldPath, pattern: &str, reason: impl fmt::Display) -> Self {
        Self {
            code: SchemaErrorCode::BadPattern,
            message: format!("pattern '{}' failed to compile: {}", pattern, reason),
            at: Some(at.clone()),
        }
    }

    /// Creates a bounds-conflict error.
    pub fn bounds_conflict(at: &FieldPath, constraint: &str) -> Self {
        Self {
            code: SchemaErrorCode::BoundsConflict,
            message: format!("{} minimum exceeds maximum", constraint),
            at: Some(at.clone()),
        }
    }

    /// Creates an unknown-format error.
    pub fn unknown_format(at: &FieldPath, name: &str) -> Self {
        Self {
            code: SchemaErrorCode::UnknownFormat,
            message: format!("format '{}' is not in the predicate registry", name),
            at: Some(at.clone()),
        }
    }

    /// Returns the error code.
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the position inside the schema source, if known.
    pub fn at(&self) -> Option<&FieldPath> {
        self.at.as_ref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[FATAL] {}: {}", self.code.code(), self.message)?;
        if let Some(ref at) = self.at {
            write!(f, " (at {})", at)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema compilation.
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SchemaErrorCode::MalformedSchema.code(),
            "PAPER_SCHEMA_MALFORMED"
        );
        assert_eq!(
            SchemaErrorCode::UnknownKind.code(),
            "PAPER_SCHEMA_UNKNOWN_KIND"
        );
        assert_eq!(SchemaErrorCode::BadPattern.code(), "PAPER_SCHEMA_BAD_PATTERN");
        assert_eq!(
            SchemaErrorCode::UnknownFormat.code(),
            "PAPER_SCHEMA_UNKNOWN_FORMAT"
        );
    }

    #[test]
    fn test_display_carries_position() {
        let at = FieldPath::root().child("properties").child("paper");
        let err = SchemaError::unknown_kind(&at, "tuple");
        let display = err.to_string();
        assert!(display.contains("PAPER_SCHEMA_UNKNOWN_KIND"));
        assert!(display.contains("FATAL"));
        assert!(display.contains("properties.paper"));
        assert!(display.contains("tuple"));
    }

    #[test]
    fn test_display_without_position() {
        let err = SchemaError::malformed("schema source is not valid JSON");
        assert!(!err.to_string().contains("(at"));
    }
}

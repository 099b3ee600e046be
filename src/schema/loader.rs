//! Schema loading and the compiled schema handle
//!
//! A `ConstraintSchema` is built exactly once at process start, either from a
//! schema file on disk or from the embedded default paper schema, and is then
//! shared read-only for the process lifetime. A malformed source refuses to
//! load; there is no partial or degraded mode. Reloading requires a restart.

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::compiler;
use super::errors::{SchemaError, SchemaResult};
use super::formats::FormatRegistry;
use super::types::ConstraintNode;
use super::validator;
use super::violation::Violation;

/// The default paper submission schema shipped with the crate.
const PAPER_V1: &str = include_str!("paper_v1.json");

/// An immutable compiled schema: the constraint tree plus the format
/// predicate registry, both built once.
///
/// Safe for concurrent use without synchronization; validation only reads.
#[derive(Debug)]
pub struct ConstraintSchema {
    root: ConstraintNode,
    formats: FormatRegistry,
}

impl ConstraintSchema {
    /// Compiles a schema from an in-memory source document.
    pub fn compile(source: &Value) -> SchemaResult<Self> {
        let formats = FormatRegistry::compile().map_err(|e| {
            SchemaError::malformed(format!("builtin format pattern failed to compile: {}", e))
        })?;
        let root = compiler::compile(source)?;
        Ok(Self { root, formats })
    }

    /// Parses and compiles a schema from JSON text.
    pub fn from_json_str(text: &str) -> SchemaResult<Self> {
        let source: Value = serde_json::from_str(text)
            .map_err(|e| SchemaError::malformed(format!("schema source is not valid JSON: {}", e)))?;
        Self::compile(&source)
    }

    /// Loads and compiles a schema file from disk.
    pub fn load_from_file(path: &Path) -> SchemaResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed(format!(
                "failed to read schema file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&text)
    }

    /// Compiles the embedded default paper schema.
    pub fn paper_v1() -> SchemaResult<Self> {
        Self::from_json_str(PAPER_V1)
    }

    /// Returns the root of the compiled constraint tree.
    pub fn root(&self) -> &ConstraintNode {
        &self.root
    }

    /// Validates a document, returning every violation sorted by path. An
    /// empty list means the document conforms.
    pub fn validate(&self, document: &Value) -> Vec<Violation> {
        validator::validate_document(&self.root, document, &self.formats)
    }
}

//! Named format predicates for string constraints
//!
//! A schema's string node may declare a `format`. Formats are a fixed
//! registry of pure syntactic checks: no network lookups, no content
//! verification. Declaring a format name outside this registry fails schema
//! compilation rather than being silently accepted.

use chrono::DateTime;
use regex::Regex;

/// Absolute URI shape: a scheme, a colon, and a non-empty remainder with no
/// whitespace. Syntax only.
const URI_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.\-]*:\S+$";

/// Checksum shape: the literal prefix `sha256:` followed by exactly 64
/// lowercase hexadecimal characters. Whether the digest matches any actual
/// content is out of scope here.
const SHA256_PATTERN: &str = r"^sha256:[0-9a-f]{64}$";

/// The fixed set of format names a schema may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// RFC 3339 timestamp with an explicit timezone offset
    DateTime,
    /// Absolute URI
    Uri,
    /// `sha256:<64 lowercase hex>` digest string
    Sha256,
}

impl Format {
    /// Resolves a schema-declared format name. Returns `None` for names
    /// outside the registry; the compiler turns that into a fatal error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "date-time" => Some(Format::DateTime),
            "uri" => Some(Format::Uri),
            "sha256" => Some(Format::Sha256),
            _ => None,
        }
    }

    /// Returns the schema-facing name.
    pub fn name(&self) -> &'static str {
        match self {
            Format::DateTime => "date-time",
            Format::Uri => "uri",
            Format::Sha256 => "sha256",
        }
    }
}

/// Compiled predicate registry, built once alongside the schema and shared
/// read-only by every validation.
#[derive(Debug)]
pub struct FormatRegistry {
    uri: Regex,
    sha256: Regex,
}

impl FormatRegistry {
    /// Compiles the registry's patterns.
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            uri: Regex::new(URI_PATTERN)?,
            sha256: Regex::new(SHA256_PATTERN)?,
        })
    }

    /// Checks a string value against a format. Pure and total.
    pub fn check(&self, format: Format, value: &str) -> bool {
        match format {
            Format::DateTime => DateTime::parse_from_rfc3339(value).is_ok(),
            Format::Uri => self.uri.is_match(value),
            Format::Sha256 => self.sha256.is_match(value),
        }
    }
}

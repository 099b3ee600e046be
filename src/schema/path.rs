//! Document paths for violation reporting
//!
//! A path is the ordered sequence of object-key and array-index tokens from the
//! document root down to one value. Paths order lexicographically token by
//! token, with object keys sorting before array indices and a prefix sorting
//! before any of its extensions. Violation lists rely on this ordering being
//! total and stable.

use std::fmt;

use serde::{Serialize, Serializer};

/// One step in a document path.
///
/// Variant order matters: deriving `Ord` makes every key sort before every
/// index, which is the documented token ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathToken {
    /// Object member access by key
    Key(String),
    /// Array element access by zero-based index
    Index(usize),
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathToken::Key(key) => write!(f, "{}", key),
            PathToken::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Path from the document root to one value.
///
/// The root path is empty and displays as `$root`. Child paths display in
/// dotted/bracketed form, e.g. `paper.authors[1].name`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldPath {
    tokens: Vec<PathToken>,
}

impl FieldPath {
    /// Returns the empty root path.
    pub fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Returns a new path extended by an object key.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.push(PathToken::Key(key.into()));
        Self { tokens }
    }

    /// Returns a new path extended by an array index.
    pub fn element(&self, index: usize) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.push(PathToken::Index(index));
        Self { tokens }
    }

    /// Returns the tokens from root to value, in order.
    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    /// Returns whether this is the root path.
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns whether this path is a (strict or equal) prefix of `other`.
    pub fn is_prefix_of(&self, other: &FieldPath) -> bool {
        other.tokens.len() >= self.tokens.len()
            && other.tokens[..self.tokens.len()] == self.tokens[..]
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tokens.is_empty() {
            return write!(f, "$root");
        }
        for (position, token) in self.tokens.iter().enumerate() {
            match token {
                PathToken::Key(key) => {
                    if position > 0 {
                        write!(f, ".{}", key)?;
                    } else {
                        write!(f, "{}", key)?;
                    }
                }
                PathToken::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

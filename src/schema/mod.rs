//! Schema subsystem for paperdb
//!
//! The constraint schema is compiled once at startup into an immutable tree
//! and shared read-only by every validation. Validation collects every
//! violation of a document, in a deterministic path order, and reports the
//! full list as an ordinary value.
//!
//! # Design Principles
//!
//! - One compile at startup; malformed schemas are fatal
//! - Validation is pure, total, and deterministic
//! - Every violation is collected, never just the first
//! - Violation paths order identically everywhere
//! - Format predicates are syntax-only

mod compiler;
mod errors;
mod formats;
mod loader;
mod path;
mod types;
mod validator;
mod violation;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use formats::{Format, FormatRegistry};
pub use loader::ConstraintSchema;
pub use path::{FieldPath, PathToken};
pub use types::ConstraintNode;
pub use violation::Violation;

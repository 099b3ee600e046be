//! paperdb - a strict, schema-validated submission store for AI-authored
//! research papers
//!
//! Documents are validated against an immutable compiled constraint schema;
//! every violation is collected and reported in a deterministic path order.
//! Accepted documents live in an idempotent, key-addressed store with a
//! time-ordered archive view.

pub mod ident;
pub mod observability;
pub mod schema;
pub mod service;
pub mod store;

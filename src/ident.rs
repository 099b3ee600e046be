//! Identifier policy for submissions
//!
//! A submission's identifier comes from the document when it supplies a
//! usable one; otherwise one is synthesized. Synthesized identifiers are
//! drawn from a cryptographically strong random source so concurrent calls
//! need no coordination, and they satisfy the same syntactic constraints the
//! schema places on identifiers (alphanumerics plus `.`, `_`, `~`, minimum
//! length 8).
//!
//! The shipped paper schema requires `paper_id`, so the synthesis branch is
//! unreachable through the submit path today. It stays as the single policy
//! hook to widen if a future schema relaxes the requirement.

use uuid::Uuid;

/// Resolves the identifier for an accepted submission: the candidate if
/// present and non-empty, otherwise a fresh synthesized identifier.
pub fn resolve(candidate: Option<&str>) -> String {
    match candidate {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => synthesize(),
    }
}

/// Synthesizes a 32-character lowercase-hex identifier from a random UUID.
pub fn synthesize() -> String {
    Uuid::new_v4().simple().to_string()
}

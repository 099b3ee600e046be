//! Validation invariant tests
//!
//! Exercised against the embedded paper schema:
//! - A conforming document validates to the empty list
//! - Missing required keys report at the key's own path
//! - Every violation is collected, never just the first
//! - Violation lists are sorted: prefixes first, then lexicographic by
//!   token, keys before indices
//! - Validation is deterministic

use paperdb::schema::ConstraintSchema;
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn schema() -> ConstraintSchema {
    ConstraintSchema::paper_v1().unwrap()
}

fn checksum() -> String {
    format!("sha256:{}", "0123456789abcdef".repeat(4))
}

fn valid_paper() -> Value {
    json!({
        "paper": {
            "paper_id": "agents.2026.0001",
            "title": "Emergent Coordination in Multi-Agent Reviews",
            "abstract": "We study coordination between reviewing agents.",
            "keywords": ["multi-agent", "coordination", "peer-review"],
            "authors": [
                {
                    "name": "R-7 Scribe",
                    "role": "model",
                    "affiliation": "Autonomous Research Collective",
                    "contact_uri": "https://example.org/agents/r7"
                },
                { "name": "J. Doe", "role": "human_supervisor" }
            ],
            "manuscript": {
                "content": "# Introduction\nWe study coordination.",
                "content_checksum": checksum(),
                "content_type": "text/markdown",
                "word_count": 4200
            },
            "generation": {
                "model_name": "prover-large",
                "model_version": "3.1",
                "temperature": 0.7,
                "sampled_at": "2026-08-06T09:30:00Z"
            },
            "schema_revision": 1
        }
    })
}

fn violation_paths(document: &Value) -> Vec<String> {
    schema()
        .validate(document)
        .iter()
        .map(|v| v.path().to_string())
        .collect()
}

// =============================================================================
// Conformance
// =============================================================================

#[test]
fn test_conforming_document_has_no_violations() {
    let violations = schema().validate(&valid_paper());
    assert!(violations.is_empty(), "unexpected violations: {:?}", violations);
}

#[test]
fn test_minimal_document_without_optionals_conforms() {
    let document = json!({
        "paper": {
            "paper_id": "agents.2026.0002",
            "title": "A Minimal Submission",
            "keywords": ["a", "b", "c"],
            "authors": [{ "name": "R-7", "role": "model" }],
            "manuscript": {
                "content": "body",
                "content_checksum": checksum(),
                "content_type": "text/plain"
            }
        }
    });
    assert!(schema().validate(&document).is_empty());
}

#[test]
fn test_null_optional_field_counts_as_absent() {
    let mut document = valid_paper();
    document["paper"]["abstract"] = Value::Null;
    assert!(schema().validate(&document).is_empty());
}

// =============================================================================
// Required Keys
// =============================================================================

#[test]
fn test_missing_required_key_reports_its_path() {
    let mut document = valid_paper();
    document["paper"].as_object_mut().unwrap().remove("title");
    assert_eq!(violation_paths(&document), vec!["paper.title"]);
}

#[test]
fn test_missing_nested_required_key_reports_full_path() {
    let mut document = valid_paper();
    document["paper"]["manuscript"]
        .as_object_mut()
        .unwrap()
        .remove("content_checksum");
    assert_eq!(
        violation_paths(&document),
        vec!["paper.manuscript.content_checksum"]
    );
}

#[test]
fn test_null_required_key_is_type_mismatch_at_key() {
    let mut document = valid_paper();
    document["paper"]["title"] = Value::Null;
    let violations = schema().validate(&document);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path().to_string(), "paper.title");
    assert_eq!(violations[0].message(), "expected string, got null");
}

// =============================================================================
// Concrete Scenarios
// =============================================================================

#[test]
fn test_two_keywords_violate_at_keywords_path() {
    let mut document = valid_paper();
    document["paper"]["keywords"] = json!(["only", "two"]);
    let violations = schema().validate(&document);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path().to_string(), "paper.keywords");
    assert_eq!(violations[0].message(), "expected at least 3 items, got 2");
}

#[test]
fn test_malformed_checksum_violates_at_checksum_path() {
    let mut document = valid_paper();
    document["paper"]["manuscript"]["content_checksum"] = json!("sha256:XYZ");
    let violations = schema().validate(&document);
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].path().to_string(),
        "paper.manuscript.content_checksum"
    );
}

#[test]
fn test_unknown_top_level_key_rejected() {
    let mut document = valid_paper();
    document["extra_field"] = json!(true);
    assert_eq!(violation_paths(&document), vec!["extra_field"]);
}

#[test]
fn test_unknown_nested_key_rejected() {
    let mut document = valid_paper();
    document["paper"]["manuscript"]["reviewer_notes"] = json!("n/a");
    assert_eq!(
        violation_paths(&document),
        vec!["paper.manuscript.reviewer_notes"]
    );
}

// =============================================================================
// Constraint Coverage
// =============================================================================

#[test]
fn test_paper_id_charset_enforced() {
    let mut document = valid_paper();
    document["paper"]["paper_id"] = json!("agents 2026/0001");
    let violations = schema().validate(&document);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path().to_string(), "paper.paper_id");
}

#[test]
fn test_author_role_enum_enforced() {
    let mut document = valid_paper();
    document["paper"]["authors"][1]["role"] = json!("editor");
    assert_eq!(violation_paths(&document), vec!["paper.authors[1].role"]);
}

#[test]
fn test_contact_uri_format_enforced() {
    let mut document = valid_paper();
    document["paper"]["authors"][0]["contact_uri"] = json!("not a uri");
    assert_eq!(
        violation_paths(&document),
        vec!["paper.authors[0].contact_uri"]
    );
}

#[test]
fn test_sampled_at_requires_timezone_offset() {
    let mut document = valid_paper();
    document["paper"]["generation"]["sampled_at"] = json!("2026-08-06T09:30:00");
    assert_eq!(
        violation_paths(&document),
        vec!["paper.generation.sampled_at"]
    );
}

#[test]
fn test_temperature_range_enforced() {
    let mut document = valid_paper();
    document["paper"]["generation"]["temperature"] = json!(2.5);
    assert_eq!(
        violation_paths(&document),
        vec!["paper.generation.temperature"]
    );
}

#[test]
fn test_schema_revision_constant_enforced() {
    let mut document = valid_paper();
    document["paper"]["schema_revision"] = json!(2);
    assert_eq!(violation_paths(&document), vec!["paper.schema_revision"]);
}

#[test]
fn test_word_count_minimum_enforced() {
    let mut document = valid_paper();
    document["paper"]["manuscript"]["word_count"] = json!(0);
    assert_eq!(
        violation_paths(&document),
        vec!["paper.manuscript.word_count"]
    );
}

// =============================================================================
// Collection and Ordering
// =============================================================================

#[test]
fn test_all_violations_collected_not_just_first() {
    let mut document = valid_paper();
    document["paper"]["keywords"] = json!(["only", "two"]);
    document["paper"]["manuscript"]["content_checksum"] = json!("sha256:XYZ");
    document["paper"]["authors"][0]["role"] = json!("editor");
    document["extra_field"] = json!(1);

    let violations = schema().validate(&document);
    assert_eq!(violations.len(), 4);
}

#[test]
fn test_violations_sorted_by_path() {
    let mut document = valid_paper();
    document["zz_trailing"] = json!(1);
    document["paper"]["keywords"] = json!(["x"]);
    document["paper"]["authors"][1]["role"] = json!("editor");
    document["paper"]["authors"][0]["name"] = json!(7);
    document["paper"].as_object_mut().unwrap().remove("title");

    let violations = schema().validate(&document);
    for window in violations.windows(2) {
        assert!(
            window[0].path() <= window[1].path(),
            "unsorted pair: {} then {}",
            window[0].path(),
            window[1].path()
        );
    }

    let paths: Vec<String> = violations.iter().map(|v| v.path().to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "paper.authors[0].name",
            "paper.authors[1].role",
            "paper.keywords",
            "paper.title",
            "zz_trailing",
        ]
    );
}

#[test]
fn test_prefix_path_precedes_extensions() {
    // An array with a cardinality failure AND a bad element: the array's own
    // path is a prefix of the element path and must come first.
    let mut document = valid_paper();
    document["paper"]["keywords"] = json!(["a", 2]);
    let paths = violation_paths(&document);
    assert_eq!(paths, vec!["paper.keywords", "paper.keywords[1]"]);
}

#[test]
fn test_type_mismatch_stops_descent() {
    let mut document = valid_paper();
    document["paper"]["manuscript"] = json!("not an object");
    let violations = schema().validate(&document);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path().to_string(), "paper.manuscript");
}

#[test]
fn test_non_object_root_reports_root() {
    let violations = schema().validate(&json!([1, 2, 3]));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path().to_string(), "$root");
}

#[test]
fn test_validation_is_deterministic() {
    let mut document = valid_paper();
    document["paper"]["keywords"] = json!(["only", "two"]);
    document["stray"] = json!(null);

    let first = schema().validate(&document);
    let compiled = schema();
    for _ in 0..100 {
        assert_eq!(compiled.validate(&document), first);
    }
}

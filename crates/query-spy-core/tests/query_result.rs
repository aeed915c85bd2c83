// crates/query-spy-core/tests/query_result.rs
// ============================================================================
// Module: Query Result Tests
// Description: Tests for result construction and field derivation.
// ============================================================================
//! ## Overview
//! Validates the empty fallback result, field derivation from rows, and
//! conversion of JSON rows.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use query_spy_core::CoreError;
use query_spy_core::QueryResult;
use query_spy_core::rows_from_json;
use serde_json::json;

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Tests the empty result serializes as empty rows and fields.
#[test]
fn empty_result_has_no_rows_or_fields() {
    let result = QueryResult::empty();
    assert!(result.is_empty());
    assert_eq!(serde_json::to_value(&result).unwrap(), json!({"rows": [], "fields": []}));
}

/// Tests fields derive from row keys in order of first appearance.
#[test]
fn fields_follow_first_appearance() {
    let rows = rows_from_json(json!([
        {"b": 1, "a": 2},
        {"a": 3, "c": 4},
        {"c": 5, "b": 6, "d": 7}
    ]))
    .unwrap();
    let result = QueryResult::from_rows(rows);
    assert_eq!(result.fields, vec!["b", "a", "c", "d"]);
    assert_eq!(result.rows.len(), 3);
}

/// Tests explicit fields are kept verbatim.
#[test]
fn explicit_fields_are_kept() {
    let rows = rows_from_json(json!([{"val": 1}])).unwrap();
    let result = QueryResult::with_fields(rows, vec!["other".to_string()]);
    assert_eq!(result.fields, vec!["other"]);
}

/// Tests a single-row result matches the expected json shape.
#[test]
fn single_row_result_shape() {
    let result = QueryResult::from_rows(rows_from_json(json!([{"val": 1}])).unwrap());
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"rows": [{"val": 1}], "fields": ["val"]})
    );
}

// ============================================================================
// SECTION: JSON Rows
// ============================================================================

/// Tests non-array input is rejected.
#[test]
fn rows_require_array() {
    let err = rows_from_json(json!({"val": 1})).unwrap_err();
    assert!(matches!(err, CoreError::InvalidRows(_)));
}

/// Tests non-object rows are rejected with their index.
#[test]
fn rows_require_objects() {
    let err = rows_from_json(json!([{"val": 1}, 2])).unwrap_err();
    assert_eq!(err.to_string(), "invalid rows: row 1 is not a json object");
}

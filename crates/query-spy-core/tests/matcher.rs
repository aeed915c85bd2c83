// crates/query-spy-core/tests/matcher.rs
// ============================================================================
// Module: Tuple Matcher Tests
// Description: Tests for SQL/argument comparison of expected and actual tuples.
// ============================================================================
//! ## Overview
//! Validates literal-versus-regex SQL matching, structural argument equality,
//! and order-sensitive sequence comparison.

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

use query_spy_core::ExecutionRecord;
use query_spy_core::ExpectedTuple;
use query_spy_core::SqlPattern;
use query_spy_core::build_expected_tuples;
use query_spy_core::expect_args;
use query_spy_core::matcher::args_equal;
use query_spy_core::matcher::sql_equal;
use query_spy_core::matcher::tuple_equal;
use query_spy_core::matcher::tuples_equal;
use regex::Regex;
use serde_json::json;

fn record(sql: &str, args: Vec<serde_json::Value>) -> ExecutionRecord {
    ExecutionRecord::new(sql, args)
}

// ============================================================================
// SECTION: SQL Equality
// ============================================================================

/// Tests literal sql requires exact equality.
#[test]
fn literal_sql_requires_exact_equality() {
    let expected = SqlPattern::literal("select 1");
    assert!(sql_equal(&expected, "select 1"));
    assert!(!sql_equal(&expected, "select 10"));
    assert!(!sql_equal(&expected, "SELECT 1"));
    assert!(!sql_equal(&SqlPattern::literal("select"), "select 1"));
}

/// Tests regex sql matches anywhere in the statement.
#[test]
fn regex_sql_is_searched() {
    let expected = SqlPattern::regex(r"select \d").unwrap();
    assert!(sql_equal(&expected, "select 1"));
    assert!(sql_equal(&expected, "/* tag */ select 2 from t"));
    assert!(!sql_equal(&expected, "select x"));
}

/// Tests invalid regex sources are rejected.
#[test]
fn invalid_regex_source_is_rejected() {
    assert!(SqlPattern::regex("select (").is_err());
}

// ============================================================================
// SECTION: Argument Equality
// ============================================================================

/// Tests arguments compare structurally.
#[test]
fn args_compare_structurally() {
    assert!(args_equal(&[json!(1), json!({"a": [1, 2]})], &[json!(1), json!({"a": [1, 2]})]));
    assert!(!args_equal(&[json!(1)], &[json!("1")]));
    assert!(!args_equal(&[json!(1)], &[json!(1), json!(2)]));
    assert!(args_equal(&[], &[]));
}

/// Tests regex-looking arguments never match by pattern.
#[test]
fn regex_args_never_match_by_pattern() {
    let items = vec![
        query_spy_core::ExpectArg::from("select ?"),
        query_spy_core::ExpectArg::List(vec![Regex::new(r"\d").unwrap().into()]),
    ];
    let expected = build_expected_tuples(items);
    let actual = vec![record("select ?", vec![json!("1")])];
    assert!(!tuples_equal(&expected, &actual));
}

// ============================================================================
// SECTION: Tuple Equality
// ============================================================================

/// Tests a tuple requires both positions present.
#[test]
fn tuple_requires_both_positions() {
    let expected = ExpectedTuple::new("select 1", vec![]);
    let actual = record("select 1", vec![]);
    assert!(tuple_equal(Some(&expected), Some(&actual)));
    assert!(!tuple_equal(Some(&expected), None));
    assert!(!tuple_equal(None, Some(&actual)));
    assert!(!tuple_equal(None, None));
}

/// Tests tuple mismatch on args with matching sql.
#[test]
fn tuple_mismatch_on_args() {
    let expected = ExpectedTuple::new("select ?", vec![json!(2)]);
    let actual = record("select ?", vec![json!(1)]);
    assert!(!tuple_equal(Some(&expected), Some(&actual)));
}

// ============================================================================
// SECTION: Sequence Equality
// ============================================================================

/// Tests single literal expectation against one execution.
#[test]
fn single_execution_matches() {
    let expected = build_expected_tuples(expect_args!["select 1"]);
    assert!(tuples_equal(&expected, &[record("select 1", vec![])]));
    assert!(!tuples_equal(&expected, &[record("select 1", vec![json!(1)])]));
}

/// Tests regex expectation against an executed statement.
#[test]
fn regex_expectation_matches_execution() {
    let expected = build_expected_tuples(expect_args![Regex::new(r"select \d").unwrap()]);
    assert!(tuples_equal(&expected, &[record("select 1", vec![])]));
}

/// Tests length differences fail.
#[test]
fn length_difference_fails() {
    let expected = build_expected_tuples(expect_args!["select 1"]);
    let actual = vec![record("select 1", vec![]), record("select 1", vec![])];
    assert!(!tuples_equal(&expected, &actual));
    assert!(!tuples_equal(&[], &actual));
    assert!(!tuples_equal(&expected, &[]));
}

/// Tests order matters.
#[test]
fn order_matters() {
    let expected = build_expected_tuples(expect_args!["select 1", "select 2"]);
    let actual = vec![record("select 2", vec![]), record("select 1", vec![])];
    assert!(!tuples_equal(&expected, &actual));
}

/// Tests empty expectation matches empty history.
#[test]
fn empty_matches_empty() {
    assert!(tuples_equal(&[], &[]));
}

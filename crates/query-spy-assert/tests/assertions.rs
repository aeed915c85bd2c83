// crates/query-spy-assert/tests/assertions.rs
// ============================================================================
// Module: Assertion Tests
// Description: Tests for adapter and query assertions and their messages.
// ============================================================================
//! ## Overview
//! Runs statements through a fake adapter and checks assertion outcomes,
//! mismatch messages, negation, and precondition handling.

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

use async_trait::async_trait;
use query_spy_adapter::FakeAdapter;
use query_spy_adapter::SpyingAdapter;
use query_spy_adapter::fake_adapter;
use query_spy_assert::AssertionError;
use query_spy_assert::expect_adapter;
use query_spy_assert::expect_query;
use query_spy_core::Adapter;
use query_spy_core::AdapterError;
use query_spy_core::ClientHandle;
use query_spy_core::QueryResult;
use query_spy_core::QuerySource;
use query_spy_core::Statement;
use query_spy_core::expect_args;
use regex::Regex;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Query source that never compiles.
struct NoStatement;

impl QuerySource for NoStatement {
    fn statement(&self) -> Option<Statement> {
        None
    }

    fn describe(&self) -> String {
        "builder".to_string()
    }
}

/// Adapter that keeps no history.
struct PlainAdapter;

#[async_trait]
impl Adapter for PlainAdapter {
    async fn connect(&self) -> Result<ClientHandle, AdapterError> {
        Ok(ClientHandle::new(1))
    }

    async fn disconnect(&self, _client: ClientHandle) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn execute(
        &self,
        _client: ClientHandle,
        _sql: &str,
        _args: &[Value],
    ) -> Result<QueryResult, AdapterError> {
        Ok(QueryResult::empty())
    }
}

/// Returns the mismatch message or panics.
fn mismatch(result: Result<(), AssertionError>) -> String {
    match result {
        Err(AssertionError::Mismatch {
            message, ..
        }) => message,
        other => panic!("expected mismatch, got {other:?}"),
    }
}

/// Runs `sql` with `args` to completion.
async fn run(adapter: &FakeAdapter, sql: &str, args: Vec<Value>) {
    Statement::raw(sql, args).execute(adapter).await.unwrap();
}

// ============================================================================
// SECTION: Query Assertions
// ============================================================================

/// Tests a matching query passes.
#[test]
fn validates_a_query() {
    expect_query(&Statement::sql("select 1")).query("select 1", vec![]).unwrap();
    expect_query(&Statement::raw("select ?", vec![json!(1)]))
        .query(Regex::new(r"select \?").unwrap(), vec![json!(1)])
        .unwrap();
}

/// Tests mismatched SQL reports the actual query.
#[test]
fn mismatched_sql_reports_actual() {
    let message = mismatch(expect_query(&Statement::sql("select 1")).query("select", vec![]));
    assert!(Regex::new(r"to have.*select 1 ~\[\]").unwrap().is_match(&message));
}

/// Tests mismatched args report the actual args.
#[test]
fn mismatched_args_report_actual() {
    let statement = Statement::raw("select ?", vec![json!(1)]);
    let message = mismatch(expect_query(&statement).query("select ?", vec![json!(5)]));
    assert!(Regex::new(r"to have.*select \? ~\[1\]").unwrap().is_match(&message));
}

/// Tests negated query checks.
#[test]
fn negated_query_check() {
    let statement = Statement::sql("select 1");
    expect_query(&statement).not().query("select 2", vec![]).unwrap();
    let message = mismatch(expect_query(&statement).not().query("select 1", vec![]));
    assert_eq!(message, "expected query to not have SQL of select 1 ~[]");
}

/// Tests sources without statements fail the precondition.
#[test]
fn query_without_statement_is_precondition() {
    let err = expect_query(&NoStatement).query("select 1", vec![]).unwrap_err();
    assert!(err.is_precondition());
    let err = expect_query(&NoStatement).not().query("select 1", vec![]).unwrap_err();
    assert!(err.is_precondition());
}

// ============================================================================
// SECTION: Executed Assertions
// ============================================================================

/// Tests executed SQL validates.
#[tokio::test]
async fn validates_executed_sql() {
    let adapter = fake_adapter();
    run(&adapter, "select 1", vec![]).await;
    expect_adapter(&adapter).executed(expect_args!["select 1"]).unwrap();
}

/// Tests repeated and array-shaped expectations.
#[tokio::test]
async fn validates_multiple_executed_sql() {
    let adapter = fake_adapter();
    run(&adapter, "select 1", vec![]).await;
    run(&adapter, "select 1", vec![]).await;
    expect_adapter(&adapter).executed(expect_args!["select 1", "select 1"]).unwrap();
    expect_adapter(&adapter).executed(expect_args![vec!["select 1", "select 1"]]).unwrap();
    expect_adapter(&adapter)
        .executed(expect_args![vec!["select 1"], vec!["select 1"]])
        .unwrap();
}

/// Tests regex SQL expectations.
#[tokio::test]
async fn validates_executed_sql_via_regex() {
    let adapter = fake_adapter();
    run(&adapter, "select 1", vec![]).await;
    expect_adapter(&adapter).executed(expect_args![Regex::new(r"select \d").unwrap()]).unwrap();
}

/// Tests regex arguments never match.
#[tokio::test]
async fn cannot_validate_args_via_regex() {
    let adapter = fake_adapter();
    run(&adapter, "select ?", vec![json!("1")]).await;
    let message = mismatch(
        expect_adapter(&adapter)
            .executed(expect_args!["select ?", vec![Regex::new(r"\d").unwrap()]]),
    );
    let pattern = Regex::new(r"to have.*select \? ~\[/\\d/\].*got.*select \? ~\[1\]").unwrap();
    assert!(pattern.is_match(&message), "{message}");
}

/// Tests regex arguments never match a string holding the same text.
#[tokio::test]
async fn regex_args_do_not_match_their_own_text() {
    let adapter = fake_adapter();
    run(&adapter, "select ?", vec![json!(r"/\d/")]).await;
    mismatch(
        expect_adapter(&adapter)
            .executed(expect_args!["select ?", vec![Regex::new(r"\d").unwrap()]]),
    );
    expect_adapter(&adapter)
        .not()
        .executed(expect_args!["select ?", vec![Regex::new(r"\d").unwrap()]])
        .unwrap();
}

/// Tests mismatched SQL against executed statements.
#[tokio::test]
async fn mismatched_executed_sql() {
    let adapter = fake_adapter();
    run(&adapter, "select 1", vec![]).await;
    let message = mismatch(expect_adapter(&adapter).executed(expect_args!["select"]));
    let pattern = Regex::new(r"to have.*select ~\[\].*got.*select 1 ~\[\]").unwrap();
    assert!(pattern.is_match(&message));
}

/// Tests expectations against an empty history.
#[test]
fn unexecuted_sql_reports_empty_history() {
    let adapter = fake_adapter();
    let message = mismatch(expect_adapter(&adapter).executed(expect_args!["select"]));
    assert!(Regex::new(r"to have.*select ~\[\].*got \[\]$").unwrap().is_match(&message));
    assert_eq!(message, "expected fake adapter to have executed select ~[] but got []");
}

/// Tests mismatched args against executed statements.
#[tokio::test]
async fn mismatched_executed_args() {
    let adapter = fake_adapter();
    run(&adapter, "select ?", vec![json!(1)]).await;
    let message =
        mismatch(expect_adapter(&adapter).executed(expect_args!["select ?", json!([2])]));
    let pattern = Regex::new(r"to have.*select \? ~\[2\].*got.*select \? ~\[1\]").unwrap();
    assert!(pattern.is_match(&message));
}

/// Tests failed statements count as attempted only.
#[tokio::test]
async fn validates_attempted_sql() {
    let adapter = fake_adapter();
    adapter.fail(Regex::new(".*").unwrap()).unwrap();
    Statement::sql("select 1").execute(&adapter).await.unwrap_err();
    expect_adapter(&adapter).executed(expect_args![]).unwrap();
    expect_adapter(&adapter).attempted(expect_args!["select 1"]).unwrap();
    let message = mismatch(expect_adapter(&adapter).not().attempted(expect_args!["select 1"]));
    assert_eq!(message, "expected fake adapter to not have attempted select 1 ~[]");
}

// ============================================================================
// SECTION: Client Assertions
// ============================================================================

/// Tests client usage checks.
#[tokio::test]
async fn validates_used_clients() {
    let adapter = fake_adapter();
    run(&adapter, "select 1", vec![]).await;
    expect_adapter(&adapter).used_clients().unwrap();
    expect_adapter(&adapter).used_one_client().unwrap();
    expect_adapter(&adapter).client_count(1).unwrap();
}

/// Tests negated client checks.
#[test]
fn negates_used_clients() {
    let adapter = fake_adapter();
    expect_adapter(&adapter).not().used_clients().unwrap();
    expect_adapter(&adapter).not().used_one_client().unwrap();
    expect_adapter(&adapter).not().client_count(1).unwrap();
    mismatch(expect_adapter(&adapter).used_clients());
    mismatch(expect_adapter(&adapter).not().client_count(0));
}

/// Tests adapters without history fail the precondition.
#[test]
fn adapter_without_history_is_precondition() {
    let err = expect_adapter(&PlainAdapter).executed(expect_args![]).unwrap_err();
    assert!(err.is_precondition());
    assert_eq!(err.to_string(), "precondition failed: adapter does not record execution history");
    let err = expect_adapter(&PlainAdapter).not().used_clients().unwrap_err();
    assert!(err.is_precondition());

    let wrapped = SpyingAdapter::new(PlainAdapter);
    expect_adapter(&wrapped).executed(expect_args![]).unwrap();
}

// ============================================================================
// SECTION: Scenarios
// ============================================================================

/// Tests scoped assertions see only the scoped window.
#[tokio::test]
async fn scoped_assertions() {
    let adapter = fake_adapter();
    run(&adapter, "select 1", vec![]).await;
    adapter.scope();
    run(&adapter, "select 2", vec![]).await;
    expect_adapter(&adapter).executed(expect_args!["select 2"]).unwrap();
    expect_adapter(&adapter).used_one_client().unwrap();
    adapter.unscope().unwrap();
    expect_adapter(&adapter).executed(expect_args!["select 1", "select 2"]).unwrap();
    expect_adapter(&adapter).client_count(2).unwrap();
}

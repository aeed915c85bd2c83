// crates/query-spy-assert/src/query.rs
// ============================================================================
// Module: Query Assertions
// Description: Single-statement SQL and argument checks.
// Purpose: Check the SQL a query compiles to before it runs.
// Dependencies: query-spy-core, serde_json
// ============================================================================

//! ## Overview
//! [`expect_query`] checks the statement a [`QuerySource`] compiles to.

// ============================================================================
// SECTION: Imports
// ============================================================================

use query_spy_core::QuerySource;
use query_spy_core::SqlPattern;
use query_spy_core::matcher::args_equal;
use query_spy_core::matcher::format_tuple;
use query_spy_core::matcher::sql_equal;
use serde_json::Value;

use crate::error::AssertionError;
use crate::error::Verdict;

// ============================================================================
// SECTION: Query Assertions
// ============================================================================

/// Starts an assertion against `source`.
#[must_use]
pub fn expect_query(source: &dyn QuerySource) -> QueryAssertion<'_> {
    QueryAssertion {
        source,
        negated: false,
    }
}

/// Assertion builder for a single query.
pub struct QueryAssertion<'a> {
    /// Subject query.
    source: &'a dyn QuerySource,
    /// Inverts the outcome of mismatch checks.
    negated: bool,
}

impl QueryAssertion<'_> {
    /// Negates the following check.
    #[must_use]
    pub const fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Checks the query's SQL and arguments.
    ///
    /// Arguments compare structurally; patterns apply to SQL only.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::Precondition`] when the source exposes no
    /// statement, or [`AssertionError::Mismatch`] when the check fails.
    pub fn query(
        &self,
        sql: impl Into<SqlPattern>,
        args: Vec<Value>,
    ) -> Result<(), AssertionError> {
        let subject = self.source.describe();
        let statement = self.source.statement().ok_or_else(|| {
            AssertionError::Precondition(format!("{subject} does not expose a statement"))
        })?;
        let sql = sql.into();
        let expected = format_tuple(&sql.to_string(), &args);
        let actual = format_tuple(&statement.sql, &statement.args);
        Verdict {
            pass: sql_equal(&sql, &statement.sql) && args_equal(&args, &statement.args),
            positive: format!("expected {subject} to have SQL {expected} but got {actual}"),
            negative: format!("expected {subject} to not have SQL of {actual}"),
            expected,
            actual,
        }
        .resolve(self.negated)
    }
}

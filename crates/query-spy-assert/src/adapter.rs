// crates/query-spy-assert/src/adapter.rs
// ============================================================================
// Module: Adapter Assertions
// Description: Assertions over an adapter's recorded execution history.
// Purpose: Check executed and attempted SQL and client usage.
// Dependencies: query-spy-core
// ============================================================================

//! ## Overview
//! [`expect_adapter`] starts an assertion against any adapter that records
//! history. Adapters without history fail every check with a precondition
//! error before any comparison happens.

// ============================================================================
// SECTION: Imports
// ============================================================================

use query_spy_core::Adapter;
use query_spy_core::ExecutionRecord;
use query_spy_core::ExpectArg;
use query_spy_core::SpySnapshot;
use query_spy_core::build_expected_tuples;
use query_spy_core::matcher::format_expected;
use query_spy_core::matcher::format_records;
use query_spy_core::matcher::tuples_equal;

use crate::error::AssertionError;
use crate::error::Verdict;

// ============================================================================
// SECTION: Adapter Assertions
// ============================================================================

/// Starts an assertion against `adapter`.
#[must_use]
pub fn expect_adapter(adapter: &dyn Adapter) -> AdapterAssertion<'_> {
    AdapterAssertion {
        adapter,
        negated: false,
    }
}

/// Assertion builder for adapter history.
pub struct AdapterAssertion<'a> {
    /// Subject adapter.
    adapter: &'a dyn Adapter,
    /// Inverts the outcome of mismatch checks.
    negated: bool,
}

impl AdapterAssertion<'_> {
    /// Negates the following check.
    #[must_use]
    pub const fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Checks completed executions against variadic expectation items.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError`] when the adapter records no history or the
    /// executions do not match.
    pub fn executed(&self, items: Vec<ExpectArg>) -> Result<(), AssertionError> {
        let snapshot = self.snapshot()?;
        self.compare("executed", items, &snapshot.executed)
    }

    /// Checks attempted executions against variadic expectation items.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError`] when the adapter records no history or the
    /// attempts do not match.
    pub fn attempted(&self, items: Vec<ExpectArg>) -> Result<(), AssertionError> {
        let snapshot = self.snapshot()?;
        self.compare("attempted", items, &snapshot.attempted)
    }

    /// Checks that at least one client was used.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError`] when the adapter records no history or the
    /// check fails.
    pub fn used_clients(&self) -> Result<(), AssertionError> {
        let count = self.snapshot()?.clients.len();
        let subject = self.adapter.describe();
        Verdict {
            pass: count > 0,
            positive: format!("expected {subject} to have used clients but got {count}"),
            negative: format!("expected {subject} to not have used clients but got {count}"),
            expected: "> 0".to_string(),
            actual: count.to_string(),
        }
        .resolve(self.negated)
    }

    /// Checks that exactly one client was used.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError`] when the adapter records no history or the
    /// check fails.
    pub fn used_one_client(&self) -> Result<(), AssertionError> {
        self.check_client_count(1)
    }

    /// Checks that exactly `expected` clients were used.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError`] when the adapter records no history or the
    /// check fails.
    pub fn client_count(&self, expected: usize) -> Result<(), AssertionError> {
        self.check_client_count(expected)
    }

    /// Compares the client count with `expected`.
    fn check_client_count(&self, expected: usize) -> Result<(), AssertionError> {
        let count = self.snapshot()?.clients.len();
        let subject = self.adapter.describe();
        Verdict {
            pass: count == expected,
            positive: format!(
                "expected {subject} to have used {expected} client(s) but got {count}"
            ),
            negative: format!("expected {subject} to not have used {expected} client(s)"),
            expected: expected.to_string(),
            actual: count.to_string(),
        }
        .resolve(self.negated)
    }

    /// Matches expectation items against recorded executions.
    fn compare(
        &self,
        verb: &str,
        items: Vec<ExpectArg>,
        records: &[ExecutionRecord],
    ) -> Result<(), AssertionError> {
        let expected = build_expected_tuples(items);
        let rendered_expected = format_expected(&expected);
        let rendered_actual = format_records(records);
        let subject = self.adapter.describe();
        Verdict {
            pass: tuples_equal(&expected, records),
            positive: format!(
                "expected {subject} to have {verb} {rendered_expected} but got {rendered_actual}"
            ),
            negative: format!("expected {subject} to not have {verb} {rendered_actual}"),
            expected: rendered_expected,
            actual: rendered_actual,
        }
        .resolve(self.negated)
    }

    /// Returns the adapter history or a precondition failure.
    fn snapshot(&self) -> Result<SpySnapshot, AssertionError> {
        self.adapter.spy_snapshot().ok_or_else(|| {
            AssertionError::Precondition(format!(
                "{} does not record execution history",
                self.adapter.describe()
            ))
        })
    }
}

// crates/query-spy-assert/src/error.rs
// ============================================================================
// Module: Assertion Errors
// Description: Failure kinds produced by query spy assertions.
// Purpose: Separate test-authoring mistakes from expectation mismatches.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A [`AssertionError::Precondition`] means the assertion was pointed at the
//! wrong kind of subject and is reported regardless of negation. A
//! [`AssertionError::Mismatch`] is an ordinary failed expectation and carries
//! rendered expected and actual values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Assertion failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    /// The subject cannot be asserted on.
    #[error("precondition failed: {0}")]
    Precondition(String),
    /// The expectation did not hold.
    #[error("{message}")]
    Mismatch {
        /// Full failure message.
        message: String,
        /// Rendered expectation.
        expected: String,
        /// Rendered observation.
        actual: String,
    },
}

impl AssertionError {
    /// Returns true for precondition failures.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}

// ============================================================================
// SECTION: Verdicts
// ============================================================================

/// Outcome of one predicate with both failure messages prepared.
pub(crate) struct Verdict {
    /// Whether the predicate held.
    pub(crate) pass: bool,
    /// Message used when a positive assertion fails.
    pub(crate) positive: String,
    /// Message used when a negated assertion fails.
    pub(crate) negative: String,
    /// Rendered expectation.
    pub(crate) expected: String,
    /// Rendered observation.
    pub(crate) actual: String,
}

impl Verdict {
    /// Resolves the verdict under the given negation flag.
    pub(crate) fn resolve(self, negated: bool) -> Result<(), AssertionError> {
        if self.pass != negated {
            return Ok(());
        }
        let message = if negated { self.negative } else { self.positive };
        Err(AssertionError::Mismatch {
            message,
            expected: self.expected,
            actual: self.actual,
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

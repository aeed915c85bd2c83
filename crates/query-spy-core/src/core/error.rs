// crates/query-spy-core/src/core/error.rs
// ============================================================================
// Module: Query Spy Core Errors
// Description: Error types shared by adapters, responders, and helpers.
// Purpose: Give the adapter contract a stable failure channel.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`SimulatedFailure`] is what a fake responder raises; it travels to the
//! caller of `execute` wrapped in [`AdapterError::Simulated`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

// ============================================================================
// SECTION: Simulated Failure
// ============================================================================

/// Failure raised by a fake responder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SimulatedFailure {
    /// Human-readable failure message.
    message: String,
}

impl SimulatedFailure {
    /// Creates a failure with a custom message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates the failure raised by a `fail` responder for `pattern`.
    #[must_use]
    pub fn for_pattern(pattern: &impl fmt::Display) -> Self {
        Self::new(format!("FakeFail for {pattern}"))
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

// ============================================================================
// SECTION: Adapter Errors
// ============================================================================

/// Errors returned through the adapter contract.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// A fake responder raised a simulated failure.
    #[error(transparent)]
    Simulated(#[from] SimulatedFailure),
    /// The adapter failed for another reason.
    #[error("adapter failure: {0}")]
    Failed(String),
}

// ============================================================================
// SECTION: Core Errors
// ============================================================================

/// Errors raised by core helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Row input did not have the expected JSON shape.
    #[error("invalid rows: {0}")]
    InvalidRows(String),
    /// A regex pattern failed to compile.
    #[error("invalid sql pattern: {0}")]
    InvalidPattern(String),
}

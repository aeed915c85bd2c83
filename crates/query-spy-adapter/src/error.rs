// crates/query-spy-adapter/src/error.rs
// ============================================================================
// Module: Query Spy Adapter Errors
// Description: Errors raised by execution spies.
// Purpose: Surface scope misuse as an explicit failure.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`SpyError`] reports misuse of the execution spy scope stack. Responder
//! pattern errors surface as `query_spy_core::CoreError` instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Execution spy errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpyError {
    /// `unscope` was called without a matching `scope`.
    #[error("unscope called without a matching scope")]
    ScopeUnderflow,
}

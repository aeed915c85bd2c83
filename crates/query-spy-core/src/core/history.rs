// crates/query-spy-core/src/core/history.rs
// ============================================================================
// Module: Query Spy Execution History
// Description: Recorded executions and read-only spy snapshots.
// Purpose: Carry spy history from adapters to assertions.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! An [`ExecutionRecord`] is one `(sql, args)` pair seen by an adapter. A
//! [`SpySnapshot`] copies the attempted, executed, and client views of a spy
//! at one point in time.
//! Invariants:
//! - `executed` is an order-preserving sub-sequence of `attempted`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::client::ClientHandle;

// ============================================================================
// SECTION: Execution Records
// ============================================================================

/// SQL text and arguments of one execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// SQL text as passed to `execute`.
    pub sql: String,
    /// Positional arguments.
    pub args: Vec<Value>,
}

impl ExecutionRecord {
    /// Creates an execution record.
    #[must_use]
    pub fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }
}

// ============================================================================
// SECTION: Spy Snapshot
// ============================================================================

/// Point-in-time copy of a spy's recorded history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpySnapshot {
    /// Executions that completed without failing.
    pub executed: Vec<ExecutionRecord>,
    /// Every execution attempt.
    pub attempted: Vec<ExecutionRecord>,
    /// Distinct clients that completed an execution.
    pub clients: Vec<ClientHandle>,
}

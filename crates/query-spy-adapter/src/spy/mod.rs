// crates/query-spy-adapter/src/spy/mod.rs
// ============================================================================
// Module: Execution Spy
// Description: Attempt, completion, and client history with nested scopes.
// Purpose: Record what an adapter was asked to run and what it completed.
// Dependencies: query-spy-core, tracing
// ============================================================================

//! ## Overview
//! An [`ExecutionSpy`] keeps three histories: every attempted execution, every
//! completed execution, and the distinct clients that completed one. A scope
//! saves all three and starts them empty; unscoping puts the saved history
//! back in front of whatever was recorded inside the scope.
//!
//! Invariants:
//! - Executed records are an order-preserving subsequence of attempts.
//! - Clients are de-duplicated.
//! - Scopes nest in strict LIFO order and never discard history.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use query_spy_core::ClientHandle;
use query_spy_core::ExecutionRecord;
use query_spy_core::SpySnapshot;
use serde_json::Value;
use tracing::debug;

use crate::error::SpyError;

// ============================================================================
// SECTION: Spy State
// ============================================================================

/// Recorded history for one scope level.
#[derive(Debug, Default)]
struct History {
    /// Every attempt, in call order.
    attempted: Vec<ExecutionRecord>,
    /// Completed executions, in completion order.
    executed: Vec<ExecutionRecord>,
    /// Distinct clients that completed an execution.
    clients: Vec<ClientHandle>,
}

impl History {
    /// Prepends `parent` to this history, keeping clients distinct.
    fn restore_parent(&mut self, parent: Self) {
        let Self {
            mut attempted,
            mut executed,
            mut clients,
        } = parent;
        attempted.append(&mut self.attempted);
        executed.append(&mut self.executed);
        for client in self.clients.drain(..) {
            if !clients.contains(&client) {
                clients.push(client);
            }
        }
        self.attempted = attempted;
        self.executed = executed;
        self.clients = clients;
    }
}

/// Current history plus saved scope frames.
#[derive(Debug, Default)]
struct SpyState {
    /// History visible to readers.
    current: History,
    /// Saved parent histories, innermost last.
    frames: Vec<History>,
}

// ============================================================================
// SECTION: Execution Spy
// ============================================================================

/// Records attempted and completed executions.
#[derive(Debug, Default)]
pub struct ExecutionSpy {
    /// Guarded spy state.
    state: Mutex<SpyState>,
}

impl ExecutionSpy {
    /// Creates an empty spy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an execution attempt.
    pub fn record_attempt(&self, sql: &str, args: &[Value]) {
        self.lock().current.attempted.push(ExecutionRecord::new(sql, args.to_vec()));
    }

    /// Records a completed execution and the client that ran it.
    pub fn record_completion(&self, client: ClientHandle, sql: &str, args: &[Value]) {
        let mut state = self.lock();
        state.current.executed.push(ExecutionRecord::new(sql, args.to_vec()));
        if !state.current.clients.contains(&client) {
            state.current.clients.push(client);
        }
    }

    /// Saves the current history and starts an empty one.
    pub fn scope(&self) {
        let mut state = self.lock();
        let parent = std::mem::take(&mut state.current);
        state.frames.push(parent);
        debug!(depth = state.frames.len(), "spy scope entered");
    }

    /// Restores the most recently saved history in front of the current one.
    ///
    /// # Errors
    ///
    /// Returns [`SpyError::ScopeUnderflow`] when no scope is active.
    pub fn unscope(&self) -> Result<(), SpyError> {
        let mut state = self.lock();
        let parent = state.frames.pop().ok_or(SpyError::ScopeUnderflow)?;
        state.current.restore_parent(parent);
        debug!(depth = state.frames.len(), "spy scope exited");
        Ok(())
    }

    /// Returns completed executions in the current scope.
    #[must_use]
    pub fn executed_sql(&self) -> Vec<ExecutionRecord> {
        self.lock().current.executed.clone()
    }

    /// Returns attempted executions in the current scope.
    #[must_use]
    pub fn attempted_sql(&self) -> Vec<ExecutionRecord> {
        self.lock().current.attempted.clone()
    }

    /// Returns distinct clients used in the current scope.
    #[must_use]
    pub fn clients(&self) -> Vec<ClientHandle> {
        self.lock().current.clients.clone()
    }

    /// Returns the number of active scopes.
    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.lock().frames.len()
    }

    /// Returns a copy of the current history.
    #[must_use]
    pub fn snapshot(&self) -> SpySnapshot {
        let state = self.lock();
        SpySnapshot {
            executed: state.current.executed.clone(),
            attempted: state.current.attempted.clone(),
            clients: state.current.clients.clone(),
        }
    }

    /// Locks the spy state, recovering from poisoning.
    fn lock(&self) -> MutexGuard<'_, SpyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

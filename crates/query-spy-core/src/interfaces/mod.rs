// crates/query-spy-core/src/interfaces/mod.rs
// ============================================================================
// Module: Query Spy Interfaces
// Description: Adapter contract and query-source surface.
// Purpose: Define the seams fake adapters and assertions plug into.
// Dependencies: async-trait, serde, serde_json, crate::core
// ============================================================================

//! ## Overview
//! [`Adapter`] is the `connect`/`disconnect`/`execute` contract a database
//! adapter satisfies. Execution is asynchronous: callers await every
//! operation. Adapters that record history expose it through
//! [`Adapter::spy_snapshot`]; assertions treat a `None` snapshot as a usage
//! error rather than a mismatch.
//!
//! [`Statement`] and [`run_statement`] stand in for a host query builder: each
//! run acquires its own client, executes once, and releases the client.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::AdapterError;
use crate::core::ClientHandle;
use crate::core::QueryResult;
use crate::core::SpySnapshot;

// ============================================================================
// SECTION: Adapter Contract
// ============================================================================

/// Database adapter contract.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Acquires a client connection.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when a connection cannot be acquired.
    async fn connect(&self) -> Result<ClientHandle, AdapterError>;

    /// Releases a client connection.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when the client cannot be released.
    async fn disconnect(&self, client: ClientHandle) -> Result<(), AdapterError>;

    /// Executes `sql` with positional `args` on `client`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when execution fails.
    async fn execute(
        &self,
        client: ClientHandle,
        sql: &str,
        args: &[Value],
    ) -> Result<QueryResult, AdapterError>;

    /// Returns recorded history when the adapter spies on its executions.
    fn spy_snapshot(&self) -> Option<SpySnapshot> {
        None
    }

    /// Returns a short label used when describing the adapter in messages.
    fn describe(&self) -> String {
        "adapter".to_string()
    }
}

// ============================================================================
// SECTION: Query Sources
// ============================================================================

/// Anything that can expose compiled SQL and arguments.
pub trait QuerySource {
    /// Returns the compiled statement, or `None` when no SQL is available.
    fn statement(&self) -> Option<Statement>;

    /// Returns a short label used when describing the source in messages.
    fn describe(&self) -> String {
        "query".to_string()
    }
}

/// Raw SQL statement with positional arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// SQL text.
    pub sql: String,
    /// Positional arguments.
    pub args: Vec<Value>,
}

impl Statement {
    /// Creates a statement from SQL text and arguments.
    #[must_use]
    pub fn raw(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// Creates a statement without arguments.
    #[must_use]
    pub fn sql(sql: impl Into<String>) -> Self {
        Self::raw(sql, Vec::new())
    }

    /// Runs the statement against `adapter`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError`] when any adapter operation fails.
    pub async fn execute(&self, adapter: &dyn Adapter) -> Result<QueryResult, AdapterError> {
        run_statement(adapter, self).await
    }
}

impl QuerySource for Statement {
    fn statement(&self) -> Option<Statement> {
        Some(self.clone())
    }
}

// ============================================================================
// SECTION: Statement Runner
// ============================================================================

/// Connects, executes `statement`, and disconnects.
///
/// The client is released even when execution fails; an execution failure
/// takes precedence over a release failure.
///
/// # Errors
///
/// Returns [`AdapterError`] from the first failing adapter operation.
pub async fn run_statement(
    adapter: &dyn Adapter,
    statement: &Statement,
) -> Result<QueryResult, AdapterError> {
    let client = adapter.connect().await?;
    let outcome = adapter.execute(client, &statement.sql, &statement.args).await;
    let released = adapter.disconnect(client).await;
    let result = outcome?;
    released?;
    Ok(result)
}

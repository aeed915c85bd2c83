// crates/query-spy-adapter/src/fake.rs
// ============================================================================
// Module: Fake Adapter
// Description: Adapter that answers SQL from responders and records history.
// Purpose: Stand in for a database adapter in tests.
// Dependencies: query-spy-config, query-spy-core, tokio, tracing
// ============================================================================

//! ## Overview
//! [`FakeAdapter`] composes a [`ResponderRegistry`], an [`ExecutionSpy`], and
//! a client id allocator behind the [`Adapter`] contract. Executions always
//! suspend before resolving, so callers never observe a synchronous result.
//!
//! Invariants:
//! - An attempt is recorded before resolution; a completion only on success.
//! - Unmatched SQL resolves to an empty result.
//! - No lock is held across the simulated delay or while a producer runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use query_spy_config::DEFAULT_EXECUTE_DELAY_MS;
use query_spy_config::FakeAdapterConfig;
use query_spy_core::Adapter;
use query_spy_core::AdapterError;
use query_spy_core::ClientHandle;
use query_spy_core::ClientIdAllocator;
use query_spy_core::CoreError;
use query_spy_core::ExecutionRecord;
use query_spy_core::QueryResult;
use query_spy_core::Row;
use query_spy_core::SimulatedFailure;
use query_spy_core::SpySnapshot;
use query_spy_core::SqlPattern;
use serde_json::Value;
use tracing::debug;

use crate::error::SpyError;
use crate::observer::ExecutionEvent;
use crate::observer::ExecutionObserver;
use crate::observer::NoopObserver;
use crate::observer::TracingObserver;
use crate::responder::ResponderRegistry;
use crate::spy::ExecutionSpy;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default simulated execution delay.
pub const DEFAULT_EXECUTE_DELAY: Duration = Duration::from_millis(DEFAULT_EXECUTE_DELAY_MS);

// ============================================================================
// SECTION: Fake Adapter
// ============================================================================

/// Test double for a database adapter.
pub struct FakeAdapter {
    /// Registered responders.
    responders: ResponderRegistry,
    /// Execution history.
    spy: ExecutionSpy,
    /// Source of client handles.
    allocator: ClientIdAllocator,
    /// Simulated execution delay.
    delay: Duration,
    /// Execution observer.
    observer: Arc<dyn ExecutionObserver>,
}

impl FakeAdapter {
    /// Creates a fake adapter with default settings.
    #[must_use]
    pub fn new() -> Self {
        FakeAdapterBuilder::new().build()
    }

    /// Creates a fake adapter from configuration.
    #[must_use]
    pub fn from_config(config: &FakeAdapterConfig) -> Self {
        FakeAdapterBuilder::new().config(config).build()
    }

    /// Returns a builder.
    #[must_use]
    pub fn builder() -> FakeAdapterBuilder {
        FakeAdapterBuilder::new()
    }

    /// Returns the responder registry.
    #[must_use]
    pub const fn responders(&self) -> &ResponderRegistry {
        &self.responders
    }

    /// Returns the execution spy.
    #[must_use]
    pub const fn spy(&self) -> &ExecutionSpy {
        &self.spy
    }

    /// Returns the simulated execution delay.
    #[must_use]
    pub const fn execute_delay(&self) -> Duration {
        self.delay
    }

    /// Registers a failure for matching SQL. See [`ResponderRegistry::fail`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPattern`] when literal text does not
    /// compile as a regex.
    pub fn fail(&self, pattern: impl Into<SqlPattern>) -> Result<(), CoreError> {
        self.responders.fail(pattern)
    }

    /// Registers canned rows for matching SQL.
    pub fn respond(&self, pattern: impl Into<SqlPattern>, rows: Vec<Row>) {
        self.responders.respond(pattern, rows);
    }

    /// Registers canned rows and field names for matching SQL.
    pub fn respond_with_fields(
        &self,
        pattern: impl Into<SqlPattern>,
        rows: Vec<Row>,
        fields: Vec<String>,
    ) {
        self.responders.respond_with_fields(pattern, rows, fields);
    }

    /// Registers an incrementing `{id: n}` responder for matching SQL.
    pub fn sequence(&self, pattern: impl Into<SqlPattern>, start: i64) {
        self.responders.sequence(pattern, start);
    }

    /// Registers a custom producer for matching SQL.
    pub fn custom<F>(&self, pattern: impl Into<SqlPattern>, producer: F)
    where
        F: Fn(&ClientHandle, &str, &[Value]) -> Result<QueryResult, SimulatedFailure>
            + Send
            + Sync
            + 'static,
    {
        self.responders.custom(pattern, producer);
    }

    /// Starts a history scope.
    pub fn scope(&self) {
        self.spy.scope();
    }

    /// Ends the innermost history scope.
    ///
    /// # Errors
    ///
    /// Returns [`SpyError::ScopeUnderflow`] when no scope is active.
    pub fn unscope(&self) -> Result<(), SpyError> {
        self.spy.unscope()
    }

    /// Returns completed executions in the current scope.
    #[must_use]
    pub fn executed_sql(&self) -> Vec<ExecutionRecord> {
        self.spy.executed_sql()
    }

    /// Returns attempted executions in the current scope.
    #[must_use]
    pub fn attempted_sql(&self) -> Vec<ExecutionRecord> {
        self.spy.attempted_sql()
    }

    /// Returns distinct clients used in the current scope.
    #[must_use]
    pub fn clients(&self) -> Vec<ClientHandle> {
        self.spy.clients()
    }
}

impl Default for FakeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for FakeAdapter {
    async fn connect(&self) -> Result<ClientHandle, AdapterError> {
        let client = self.allocator.allocate();
        debug!(client = client.id(), "fake adapter connected");
        Ok(client)
    }

    async fn disconnect(&self, client: ClientHandle) -> Result<(), AdapterError> {
        debug!(client = client.id(), "fake adapter disconnected");
        Ok(())
    }

    async fn execute(
        &self,
        client: ClientHandle,
        sql: &str,
        args: &[Value],
    ) -> Result<QueryResult, AdapterError> {
        let event = ExecutionEvent::new(client, sql, args.len());
        self.spy.record_attempt(sql, args);
        self.observer.on_attempt(&event);

        tokio::task::yield_now().await;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let outcome = match self.responders.resolve(sql) {
            Some(responder) => responder.produce(&client, sql, args),
            None => Ok(QueryResult::empty()),
        };
        match outcome {
            Ok(result) => {
                self.spy.record_completion(client, sql, args);
                self.observer.on_completion(&event);
                debug!(
                    client = client.id(),
                    sql,
                    rows = result.rows.len(),
                    "fake execute completed"
                );
                Ok(result)
            }
            Err(failure) => {
                let err = AdapterError::from(failure);
                self.observer.on_failure(&event, &err);
                debug!(client = client.id(), sql, error = %err, "fake execute failed");
                Err(err)
            }
        }
    }

    fn spy_snapshot(&self) -> Option<SpySnapshot> {
        Some(self.spy.snapshot())
    }

    fn describe(&self) -> String {
        "fake adapter".to_string()
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for [`FakeAdapter`].
pub struct FakeAdapterBuilder {
    /// Simulated execution delay.
    delay: Duration,
    /// Source of client handles.
    allocator: ClientIdAllocator,
    /// Execution observer.
    observer: Arc<dyn ExecutionObserver>,
}

impl FakeAdapterBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            delay: DEFAULT_EXECUTE_DELAY,
            allocator: ClientIdAllocator::process(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Applies delay, client id scope, and logging from configuration.
    #[must_use]
    pub fn config(mut self, config: &FakeAdapterConfig) -> Self {
        self.delay = config.execute_delay();
        self.allocator = config.client_ids.allocator();
        if config.log_executions {
            self.observer = Arc::new(TracingObserver);
        }
        self
    }

    /// Sets the simulated execution delay.
    #[must_use]
    pub const fn execute_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the client id allocator.
    #[must_use]
    pub fn client_ids(mut self, allocator: ClientIdAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    /// Sets the execution observer.
    #[must_use]
    pub fn observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Builds the adapter.
    #[must_use]
    pub fn build(self) -> FakeAdapter {
        FakeAdapter {
            responders: ResponderRegistry::new(),
            spy: ExecutionSpy::new(),
            allocator: self.allocator,
            delay: self.delay,
            observer: self.observer,
        }
    }
}

impl Default for FakeAdapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a fake adapter with default settings.
#[must_use]
pub fn fake_adapter() -> FakeAdapter {
    FakeAdapter::new()
}

// crates/query-spy-adapter/src/spying.rs
// ============================================================================
// Module: Spying Adapter
// Description: Execution history around any adapter implementation.
// Purpose: Record attempts and completions for adapters that are not fakes.
// Dependencies: query-spy-core
// ============================================================================

//! ## Overview
//! [`SpyingAdapter`] forwards every call to an inner [`Adapter`] and records
//! history the same way [`crate::FakeAdapter`] does: the attempt before
//! delegating, the completion only when the inner call succeeds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use query_spy_core::Adapter;
use query_spy_core::AdapterError;
use query_spy_core::ClientHandle;
use query_spy_core::QueryResult;
use query_spy_core::SpySnapshot;
use serde_json::Value;

use crate::error::SpyError;
use crate::observer::ExecutionEvent;
use crate::observer::ExecutionObserver;
use crate::observer::NoopObserver;
use crate::spy::ExecutionSpy;

// ============================================================================
// SECTION: Spying Adapter
// ============================================================================

/// Adapter wrapper that records execution history.
pub struct SpyingAdapter<A> {
    /// Wrapped adapter.
    inner: A,
    /// Execution history.
    spy: ExecutionSpy,
    /// Execution observer.
    observer: Arc<dyn ExecutionObserver>,
}

impl<A: Adapter> SpyingAdapter<A> {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: A) -> Self {
        Self::with_observer(inner, Arc::new(NoopObserver))
    }

    /// Wraps `inner` and reports executions to `observer`.
    #[must_use]
    pub fn with_observer(inner: A, observer: Arc<dyn ExecutionObserver>) -> Self {
        Self {
            inner,
            spy: ExecutionSpy::new(),
            observer,
        }
    }

    /// Returns the wrapped adapter.
    #[must_use]
    pub const fn inner(&self) -> &A {
        &self.inner
    }

    /// Returns the execution spy.
    #[must_use]
    pub const fn spy(&self) -> &ExecutionSpy {
        &self.spy
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

    /// Unwraps the inner adapter, discarding history.
    #[must_use]
    pub fn into_inner(self) -> A {
        self.inner
    }
}

#[async_trait]
impl<A: Adapter> Adapter for SpyingAdapter<A> {
    async fn connect(&self) -> Result<ClientHandle, AdapterError> {
        self.inner.connect().await
    }

    async fn disconnect(&self, client: ClientHandle) -> Result<(), AdapterError> {
        self.inner.disconnect(client).await
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
        match self.inner.execute(client, sql, args).await {
            Ok(result) => {
                self.spy.record_completion(client, sql, args);
                self.observer.on_completion(&event);
                Ok(result)
            }
            Err(err) => {
                self.observer.on_failure(&event, &err);
                Err(err)
            }
        }
    }

    fn spy_snapshot(&self) -> Option<SpySnapshot> {
        Some(self.spy.snapshot())
    }

    fn describe(&self) -> String {
        format!("spying {}", self.inner.describe())
    }
}

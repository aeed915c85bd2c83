// crates/query-spy-adapter/src/observer.rs
// ============================================================================
// Module: Execution Observers
// Description: Hooks notified as adapters attempt, complete, or fail SQL.
// Purpose: Provide execution logging without coupling adapters to a backend.
// Dependencies: query-spy-core, serde_json, tracing
// ============================================================================

//! ## Overview
//! Adapters report each execution to an [`ExecutionObserver`]. Observers see
//! the client, the SQL text, and the argument count; argument values are never
//! exposed to them. Observers cannot change an execution's outcome, so
//! [`JsonLogObserver`] reports write failures through `tracing` and carries on.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;
use std::sync::PoisonError;

use query_spy_core::AdapterError;
use query_spy_core::ClientHandle;
use serde_json::json;
use tracing::info;
use tracing::warn;

// ============================================================================
// SECTION: Events
// ============================================================================

/// One execution as seen by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionEvent<'a> {
    /// Client running the statement.
    pub client: ClientHandle,
    /// SQL text.
    pub sql: &'a str,
    /// Number of positional arguments.
    pub args_len: usize,
}

impl<'a> ExecutionEvent<'a> {
    /// Creates an execution event.
    #[must_use]
    pub const fn new(client: ClientHandle, sql: &'a str, args_len: usize) -> Self {
        Self {
            client,
            sql,
            args_len,
        }
    }
}

// ============================================================================
// SECTION: Observer Trait
// ============================================================================

/// Receives execution lifecycle notifications.
pub trait ExecutionObserver: Send + Sync {
    /// Called after an attempt is recorded.
    fn on_attempt(&self, event: &ExecutionEvent<'_>);
    /// Called after a completion is recorded.
    fn on_completion(&self, event: &ExecutionEvent<'_>);
    /// Called when the execution failed.
    fn on_failure(&self, event: &ExecutionEvent<'_>, error: &AdapterError);
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExecutionObserver for NoopObserver {
    fn on_attempt(&self, _event: &ExecutionEvent<'_>) {}

    fn on_completion(&self, _event: &ExecutionEvent<'_>) {}

    fn on_failure(&self, _event: &ExecutionEvent<'_>, _error: &AdapterError) {}
}

/// Observer that emits `tracing` info events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExecutionObserver for TracingObserver {
    fn on_attempt(&self, event: &ExecutionEvent<'_>) {
        info!(client = event.client.id(), sql = event.sql, args_len = event.args_len, "attempt");
    }

    fn on_completion(&self, event: &ExecutionEvent<'_>) {
        info!(client = event.client.id(), sql = event.sql, args_len = event.args_len, "complete");
    }

    fn on_failure(&self, event: &ExecutionEvent<'_>, error: &AdapterError) {
        info!(
            client = event.client.id(),
            sql = event.sql,
            args_len = event.args_len,
            error = %error,
            "fail"
        );
    }
}

// ============================================================================
// SECTION: JSON Log Observer
// ============================================================================

/// Observer that writes one JSON record per event to a writer.
pub struct JsonLogObserver<W: Write + Send> {
    /// Output writer.
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLogObserver<W> {
    /// Creates an observer writing to `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Returns the writer, consuming the observer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serializes and writes one record.
    fn write_record(&self, name: &str, event: &ExecutionEvent<'_>, error: Option<&str>) {
        let mut record = json!({
            "event": name,
            "client": event.client.id(),
            "sql": event.sql,
            "args_len": event.args_len,
        });
        if let (Some(error), Some(fields)) = (error, record.as_object_mut()) {
            fields.insert("error".to_string(), json!(error));
        }
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let written = serde_json::to_writer(&mut *writer, &record)
            .map_err(std::io::Error::from)
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush());
        if let Err(err) = written {
            warn!(error = %err, event = name, "execution log write failed");
        }
    }
}

impl<W: Write + Send> ExecutionObserver for JsonLogObserver<W> {
    fn on_attempt(&self, event: &ExecutionEvent<'_>) {
        self.write_record("attempt", event, None);
    }

    fn on_completion(&self, event: &ExecutionEvent<'_>) {
        self.write_record("complete", event, None);
    }

    fn on_failure(&self, event: &ExecutionEvent<'_>, error: &AdapterError) {
        self.write_record("fail", event, Some(&error.to_string()));
    }
}

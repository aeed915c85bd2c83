// crates/query-spy-adapter/src/lib.rs
// ============================================================================
// Module: Query Spy Adapter Library
// Description: Fake and spying adapters for SQL-issuing code under test.
// Purpose: Expose responders, execution spies, observers, and adapters.
// Dependencies: query-spy-config, query-spy-core
// ============================================================================

//! ## Overview
//! [`FakeAdapter`] answers SQL from registered responders and records what it
//! was asked to run. [`SpyingAdapter`] records the same history around any
//! other [`query_spy_core::Adapter`].
//!
//! ```
//! use query_spy_adapter::fake_adapter;
//! use query_spy_core::Statement;
//! use query_spy_core::rows_from_json;
//! use regex::Regex;
//! use serde_json::json;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let adapter = fake_adapter();
//! adapter.respond(Regex::new(".*").unwrap(), rows_from_json(json!([{"val": 1}])).unwrap());
//! let result = Statement::sql("select 1").execute(&adapter).await.unwrap();
//! assert_eq!(result.fields, vec!["val"]);
//! assert_eq!(adapter.executed_sql().len(), 1);
//! # });
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod fake;
pub mod observer;
pub mod responder;
pub mod spy;
pub mod spying;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::SpyError;
pub use fake::DEFAULT_EXECUTE_DELAY;
pub use fake::FakeAdapter;
pub use fake::FakeAdapterBuilder;
pub use fake::fake_adapter;
pub use observer::ExecutionEvent;
pub use observer::ExecutionObserver;
pub use observer::JsonLogObserver;
pub use observer::NoopObserver;
pub use observer::TracingObserver;
pub use responder::Producer;
pub use responder::Responder;
pub use responder::ResponderPattern;
pub use responder::ResponderRegistry;
pub use spy::ExecutionSpy;
pub use spying::SpyingAdapter;

// crates/query-spy-assert/src/lib.rs
// ============================================================================
// Module: Query Spy Assert Library
// Description: Assertions over recorded SQL history and compiled queries.
// Purpose: Expose adapter and query assertion builders.
// Dependencies: query-spy-core
// ============================================================================

//! ## Overview
//! Assertions return `Result<(), AssertionError>` so they compose with any
//! test harness. Expected SQL is given as variadic items built with
//! [`query_spy_core::expect_args!`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod adapter;
pub mod error;
pub mod query;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use adapter::AdapterAssertion;
pub use adapter::expect_adapter;
pub use error::AssertionError;
pub use query::QueryAssertion;
pub use query::expect_query;

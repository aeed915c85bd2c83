// crates/query-spy-core/src/core/mod.rs
// ============================================================================
// Module: Query Spy Core Types
// Description: Data model shared by adapters, spies, and assertions.
// Purpose: Group client, result, pattern, history, and error types.
// Dependencies: crate::core::*
// ============================================================================

//! ## Overview
//! Core types are plain data. They perform no I/O and hold no locks.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod error;
pub mod history;
pub mod pattern;
pub mod result;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ClientHandle;
pub use client::ClientIdAllocator;
pub use error::AdapterError;
pub use error::CoreError;
pub use error::SimulatedFailure;
pub use history::ExecutionRecord;
pub use history::SpySnapshot;
pub use pattern::SqlPattern;
pub use result::QueryResult;
pub use result::Row;
pub use result::derive_fields;
pub use result::rows_from_json;

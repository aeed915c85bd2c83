// crates/query-spy-core/src/lib.rs
// ============================================================================
// Module: Query Spy Core Library
// Description: Public API surface for the Query Spy core.
// Purpose: Expose core types, the adapter contract, and the tuple matcher.
// Dependencies: crate::{core, interfaces, matcher}
// ============================================================================

//! ## Overview
//! Query Spy core defines the data model and contracts for verifying that code
//! under test issues the SQL it should, without touching a real database. It
//! holds no adapter implementation; fake and spying adapters live in
//! `query-spy-adapter` and assertions in `query-spy-assert`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod matcher;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::Adapter;
pub use interfaces::QuerySource;
pub use interfaces::Statement;
pub use interfaces::run_statement;
pub use matcher::ExpectArg;
pub use matcher::ExpectedTuple;
pub use matcher::build_expected_tuples;

// crates/query-spy-config/src/lib.rs
// ============================================================================
// Module: Query Spy Config Library
// Description: Canonical configuration model for Query Spy.
// Purpose: Expose config types, loading, and validation.
// Dependencies: query-spy-core, serde, toml
// ============================================================================

//! ## Overview
//! Query Spy configuration tunes fake adapters: the simulated execution delay,
//! the scope of client id uniqueness, and execution logging.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::CONFIG_ENV_VAR;
pub use config::ClientIdScope;
pub use config::ConfigError;
pub use config::DEFAULT_EXECUTE_DELAY_MS;
pub use config::FakeAdapterConfig;
pub use config::MAX_CONFIG_FILE_SIZE;
pub use config::MAX_EXECUTE_DELAY_MS;
pub use config::QuerySpyConfig;

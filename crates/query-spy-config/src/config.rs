// crates/query-spy-config/src/config.rs
// ============================================================================
// Module: Query Spy Configuration
// Description: Configuration loading and validation for fake adapters.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: query-spy-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every field has a default, so an empty file is a valid configuration.
//! Unknown keys are rejected rather than ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use query_spy_core::ClientIdAllocator;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "query-spy.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "QUERY_SPY_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default simulated execution delay in milliseconds.
pub const DEFAULT_EXECUTE_DELAY_MS: u64 = 1;
/// Maximum simulated execution delay in milliseconds.
pub const MAX_EXECUTE_DELAY_MS: u64 = 1_000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Top-level Query Spy configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuerySpyConfig {
    /// Fake adapter settings.
    #[serde(default)]
    pub adapter: FakeAdapterConfig,
}

impl QuerySpyConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: the explicit `path`, then [`CONFIG_ENV_VAR`], then
    /// `query-spy.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.adapter.validate()
    }
}

/// Fake adapter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FakeAdapterConfig {
    /// Simulated execution delay in milliseconds.
    #[serde(default = "default_execute_delay_ms")]
    pub execute_delay_ms: u64,
    /// Scope of client id uniqueness.
    #[serde(default)]
    pub client_ids: ClientIdScope,
    /// Emits a structured log event for every execution when true.
    #[serde(default)]
    pub log_executions: bool,
}

impl FakeAdapterConfig {
    /// Returns the simulated execution delay.
    #[must_use]
    pub const fn execute_delay(&self) -> Duration {
        Duration::from_millis(self.execute_delay_ms)
    }

    /// Validates adapter settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the delay exceeds
    /// [`MAX_EXECUTE_DELAY_MS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.execute_delay_ms > MAX_EXECUTE_DELAY_MS {
            return Err(ConfigError::Invalid(format!(
                "adapter.execute_delay_ms must be <= {MAX_EXECUTE_DELAY_MS}"
            )));
        }
        Ok(())
    }
}

impl Default for FakeAdapterConfig {
    fn default() -> Self {
        Self {
            execute_delay_ms: DEFAULT_EXECUTE_DELAY_MS,
            client_ids: ClientIdScope::default(),
            log_executions: false,
        }
    }
}

/// Scope in which client ids are unique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientIdScope {
    /// Ids are unique across every adapter in the process.
    #[default]
    Process,
    /// Ids are unique within one adapter instance.
    Instance,
}

impl ClientIdScope {
    /// Returns an allocator for this scope.
    #[must_use]
    pub fn allocator(self) -> ClientIdAllocator {
        match self {
            Self::Process => ClientIdAllocator::process(),
            Self::Instance => ClientIdAllocator::isolated(),
        }
    }
}

/// Returns the default execution delay.
const fn default_execute_delay_ms() -> u64 {
    DEFAULT_EXECUTE_DELAY_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

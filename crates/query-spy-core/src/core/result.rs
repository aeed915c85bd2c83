// crates/query-spy-core/src/core/result.rs
// ============================================================================
// Module: Query Spy Query Results
// Description: Row/field result sets returned by adapters.
// Purpose: Model the `{rows, fields}` shape of an executed statement.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`QueryResult`] is the canned response an adapter returns for a statement.
//! Rows are ordered JSON objects so the order in which keys first appear is
//! preserved when deriving the field list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::error::CoreError;

// ============================================================================
// SECTION: Result Types
// ============================================================================

/// A single result row keyed by field name.
pub type Row = Map<String, Value>;

/// Rows and field names produced by a statement.
///
/// # Invariants
/// - When built with [`QueryResult::from_rows`], `fields` holds each row key
///   exactly once, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Result rows.
    pub rows: Vec<Row>,
    /// Field names.
    pub fields: Vec<String>,
}

impl QueryResult {
    /// Returns the empty result used when nothing responds to a statement.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            rows: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Builds a result whose fields are derived from the row keys.
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let fields = derive_fields(&rows);
        Self {
            rows,
            fields,
        }
    }

    /// Builds a result with an explicit field list.
    #[must_use]
    pub const fn with_fields(rows: Vec<Row>, fields: Vec<String>) -> Self {
        Self {
            rows,
            fields,
        }
    }

    /// Returns true when the result has no rows and no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.fields.is_empty()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the de-duplicated union of row keys in order of first appearance.
#[must_use]
pub fn derive_fields(rows: &[Row]) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for key in rows.iter().flat_map(Map::keys) {
        if !fields.iter().any(|field| field == key) {
            fields.push(key.clone());
        }
    }
    fields
}

/// Converts a JSON array of objects into result rows.
///
/// # Errors
///
/// Returns [`CoreError::InvalidRows`] when the value is not an array or any
/// element is not an object.
pub fn rows_from_json(value: Value) -> Result<Vec<Row>, CoreError> {
    let Value::Array(items) = value else {
        return Err(CoreError::InvalidRows("rows must be a json array".to_string()));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            _ => Err(CoreError::InvalidRows(format!("row {index} is not a json object"))),
        })
        .collect()
}

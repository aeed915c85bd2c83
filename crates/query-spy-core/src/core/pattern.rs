// crates/query-spy-core/src/core/pattern.rs
// ============================================================================
// Module: Query Spy SQL Patterns
// Description: Literal-or-regex SQL patterns.
// Purpose: Describe which SQL a responder or an expectation refers to.
// Dependencies: regex
// ============================================================================

//! ## Overview
//! A [`SqlPattern`] is either a literal SQL string or a regular expression.
//! How a literal is compared depends on the consumer: expectations compare
//! literals for equality, responders treat them as substrings, and failure
//! responders compile them as case-insensitive regexes. Regexes are always
//! searched against the whole SQL string.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use regex::Regex;

use crate::core::error::CoreError;

// ============================================================================
// SECTION: SQL Pattern
// ============================================================================

/// Literal SQL text or a regular expression over SQL text.
#[derive(Debug, Clone)]
pub enum SqlPattern {
    /// Literal SQL text.
    Literal(String),
    /// Regular expression searched against SQL text.
    Regex(Regex),
}

impl SqlPattern {
    /// Creates a literal pattern.
    #[must_use]
    pub fn literal(sql: impl Into<String>) -> Self {
        Self::Literal(sql.into())
    }

    /// Compiles a regex pattern from its source.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPattern`] when the source does not compile.
    pub fn regex(source: &str) -> Result<Self, CoreError> {
        Regex::new(source)
            .map(Self::Regex)
            .map_err(|err| CoreError::InvalidPattern(err.to_string()))
    }

    /// Returns the literal text or the regex source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Regex(regex) => regex.as_str(),
        }
    }

    /// Returns true for regex patterns.
    #[must_use]
    pub const fn is_regex(&self) -> bool {
        matches!(self, Self::Regex(_))
    }

    /// Returns true when `sql` equals the literal or the regex matches it.
    #[must_use]
    pub fn matches_statement(&self, sql: &str) -> bool {
        match self {
            Self::Literal(text) => text == sql,
            Self::Regex(regex) => regex.is_match(sql),
        }
    }
}

impl PartialEq for SqlPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(left), Self::Literal(right)) => left == right,
            (Self::Regex(left), Self::Regex(right)) => left.as_str() == right.as_str(),
            _ => false,
        }
    }
}

impl Eq for SqlPattern {}

impl fmt::Display for SqlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Regex(regex) => write!(f, "/{}/", regex.as_str()),
        }
    }
}

impl From<&str> for SqlPattern {
    fn from(value: &str) -> Self {
        Self::literal(value)
    }
}

impl From<String> for SqlPattern {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<&String> for SqlPattern {
    fn from(value: &String) -> Self {
        Self::literal(value.as_str())
    }
}

impl From<Regex> for SqlPattern {
    fn from(value: Regex) -> Self {
        Self::Regex(value)
    }
}

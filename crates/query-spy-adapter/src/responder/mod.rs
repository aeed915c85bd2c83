// crates/query-spy-adapter/src/responder/mod.rs
// ============================================================================
// Module: Responder Registry
// Description: Ordered rules mapping SQL patterns to canned outcomes.
// Purpose: Resolve executed SQL to a result or a simulated failure.
// Dependencies: query-spy-core, regex, serde_json
// ============================================================================

//! ## Overview
//! A [`ResponderRegistry`] holds responders newest-first. Resolution scans
//! from the front and returns the first responder whose pattern matches the
//! SQL text; arguments never take part in matching. An unmatched statement is
//! not an error, callers fall back to an empty result.
//!
//! Invariants:
//! - The most recently registered matching responder wins.
//! - Regex patterns are searched in the SQL text; literal patterns match as
//!   case-sensitive substrings.
//! - A literal given to `fail` is compiled as a case-insensitive regex.
//! - The registry lock is released before any producer runs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use query_spy_core::ClientHandle;
use query_spy_core::CoreError;
use query_spy_core::QueryResult;
use query_spy_core::Row;
use query_spy_core::SimulatedFailure;
use query_spy_core::SqlPattern;
use regex::Regex;
use regex::RegexBuilder;
use serde_json::Value;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Function producing the outcome of a matched execution.
pub type Producer = Arc<
    dyn Fn(&ClientHandle, &str, &[Value]) -> Result<QueryResult, SimulatedFailure> + Send + Sync,
>;

/// Pattern a responder tests against SQL text.
#[derive(Debug, Clone)]
pub enum ResponderPattern {
    /// Regex search, or case-sensitive substring for literals.
    Sql(SqlPattern),
    /// Case-insensitive regex search.
    CaseInsensitive(Regex),
}

impl ResponderPattern {
    /// Compiles `source` as a case-insensitive regex.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPattern`] when the source does not compile.
    pub fn case_insensitive(source: &str) -> Result<Self, CoreError> {
        RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map(Self::CaseInsensitive)
            .map_err(|err| CoreError::InvalidPattern(err.to_string()))
    }

    /// Returns true when the pattern accepts `sql`.
    #[must_use]
    pub fn matches(&self, sql: &str) -> bool {
        match self {
            Self::Sql(SqlPattern::Regex(regex)) => regex.is_match(sql),
            Self::Sql(SqlPattern::Literal(text)) => sql.contains(text.as_str()),
            Self::CaseInsensitive(regex) => regex.is_match(sql),
        }
    }
}

impl fmt::Display for ResponderPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sql(pattern) => write!(f, "{pattern}"),
            Self::CaseInsensitive(regex) => write!(f, "/{}/i", regex.as_str()),
        }
    }
}

/// One registered rule.
#[derive(Clone)]
pub struct Responder {
    /// Pattern selecting statements.
    pattern: ResponderPattern,
    /// Outcome producer.
    producer: Producer,
}

impl Responder {
    /// Creates a responder.
    #[must_use]
    pub fn new(pattern: ResponderPattern, producer: Producer) -> Self {
        Self {
            pattern,
            producer,
        }
    }

    /// Returns the responder pattern.
    #[must_use]
    pub const fn pattern(&self) -> &ResponderPattern {
        &self.pattern
    }

    /// Runs the producer for one execution.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatedFailure`] when the producer raises one.
    pub fn produce(
        &self,
        client: &ClientHandle,
        sql: &str,
        args: &[Value],
    ) -> Result<QueryResult, SimulatedFailure> {
        (self.producer)(client, sql, args)
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder").field("pattern", &self.pattern).finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Newest-first collection of responders.
#[derive(Debug, Default)]
pub struct ResponderRegistry {
    /// Responders, most recent at the front.
    responders: Mutex<VecDeque<Responder>>,
}

impl ResponderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a responder that always fails.
    ///
    /// Literal text is compiled as a case-insensitive regex. The failure
    /// message names the pattern, for example `FakeFail for /select/i`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPattern`] when literal text does not
    /// compile as a regex; nothing is registered in that case.
    pub fn fail(&self, pattern: impl Into<SqlPattern>) -> Result<(), CoreError> {
        let pattern = match pattern.into() {
            SqlPattern::Literal(text) => ResponderPattern::case_insensitive(&text)?,
            regex @ SqlPattern::Regex(_) => ResponderPattern::Sql(regex),
        };
        let failure = SimulatedFailure::for_pattern(&pattern);
        self.register(Responder::new(pattern, Arc::new(move |_, _, _| Err(failure.clone()))));
        Ok(())
    }

    /// Registers a responder returning `rows`, with fields derived from the
    /// row keys in order of first appearance.
    pub fn respond(&self, pattern: impl Into<SqlPattern>, rows: Vec<Row>) {
        let result = QueryResult::from_rows(rows);
        self.custom(pattern, move |_, _, _| Ok(result.clone()));
    }

    /// Registers a responder returning `rows` with explicit field names.
    pub fn respond_with_fields(
        &self,
        pattern: impl Into<SqlPattern>,
        rows: Vec<Row>,
        fields: Vec<String>,
    ) {
        let result = QueryResult::with_fields(rows, fields);
        self.custom(pattern, move |_, _, _| Ok(result.clone()));
    }

    /// Registers a responder returning `{id: n}` rows, counting up from
    /// `start` on every match.
    ///
    /// Each registration owns its counter.
    pub fn sequence(&self, pattern: impl Into<SqlPattern>, start: i64) {
        let counter = AtomicI64::new(start);
        self.custom(pattern, move |_, _, _| {
            let id = counter.fetch_add(1, Ordering::Relaxed);
            let mut row = Row::new();
            row.insert("id".to_string(), Value::from(id));
            Ok(QueryResult::with_fields(vec![row], vec!["id".to_string()]))
        });
    }

    /// Registers a responder with an arbitrary producer.
    pub fn custom<F>(&self, pattern: impl Into<SqlPattern>, producer: F)
    where
        F: Fn(&ClientHandle, &str, &[Value]) -> Result<QueryResult, SimulatedFailure>
            + Send
            + Sync
            + 'static,
    {
        self.register(Responder::new(ResponderPattern::Sql(pattern.into()), Arc::new(producer)));
    }

    /// Registers a prepared responder ahead of all existing ones.
    pub fn register(&self, responder: Responder) {
        self.lock().push_front(responder);
    }

    /// Returns the newest responder matching `sql`, if any.
    #[must_use]
    pub fn resolve(&self, sql: &str) -> Option<Responder> {
        self.lock().iter().find(|responder| responder.pattern.matches(sql)).cloned()
    }

    /// Returns the number of registered responders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true when no responders are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Removes every responder.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Locks the responder list, recovering from poisoning.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Responder>> {
        self.responders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

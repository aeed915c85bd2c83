// crates/query-spy-core/src/matcher/mod.rs
// ============================================================================
// Module: Query Spy Tuple Matcher
// Description: Comparison of expected and recorded (sql, args) tuples.
// Purpose: Decide whether recorded executions satisfy an expectation.
// Dependencies: regex, serde_json, crate::core
// ============================================================================

//! ## Overview
//! Expectations arrive as a flat, variadic list of [`ExpectArg`] items that
//! alternate between SQL and optional argument lists. They are normalized into
//! [`ExpectedTuple`] values and compared index by index against recorded
//! [`ExecutionRecord`] values.
//! Invariants:
//! - SQL compares by equality for literals and by search for regexes.
//! - Arguments always compare structurally; an argument given as a pattern
//!   never matches anything.
//! - Sequences compare in order; a length difference is a mismatch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use regex::Regex;
use serde_json::Value;

use crate::core::ExecutionRecord;
use crate::core::SqlPattern;

// ============================================================================
// SECTION: Expectation Items
// ============================================================================

/// One item of a variadic expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectArg {
    /// SQL text or pattern.
    Sql(SqlPattern),
    /// Plain JSON value.
    Value(Value),
    /// A list of items: an argument list or a pre-built tuple list.
    List(Vec<ExpectArg>),
}

impl ExpectArg {
    /// Returns true for list items.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns true when the item is, or contains, a regex pattern.
    #[must_use]
    pub fn contains_pattern(&self) -> bool {
        match self {
            Self::Sql(pattern) => pattern.is_regex(),
            Self::Value(_) => false,
            Self::List(items) => items.iter().any(Self::contains_pattern),
        }
    }

    /// Converts the item into a plain argument value.
    ///
    /// Patterns become their rendered text for diagnostics; tuples built from
    /// them are flagged so the text never stands in for a real argument.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Sql(pattern) => Value::String(pattern.to_string()),
            Self::List(items) => Value::Array(items.into_iter().map(Self::into_value).collect()),
        }
    }

    /// Converts a list item into an argument list.
    fn into_args(self) -> Vec<Value> {
        match self {
            Self::List(items) => items.into_iter().map(Self::into_value).collect(),
            other => vec![other.into_value()],
        }
    }

    /// Converts a non-list item into the SQL pattern it names.
    fn into_pattern(self) -> Option<SqlPattern> {
        match self {
            Self::Sql(pattern) => Some(pattern),
            Self::Value(Value::String(text)) => Some(SqlPattern::Literal(text)),
            Self::Value(value) => Some(SqlPattern::Literal(value.to_string())),
            Self::List(_) => None,
        }
    }
}

impl From<&str> for ExpectArg {
    fn from(value: &str) -> Self {
        Self::Sql(SqlPattern::literal(value))
    }
}

impl From<String> for ExpectArg {
    fn from(value: String) -> Self {
        Self::Sql(SqlPattern::Literal(value))
    }
}

impl From<Regex> for ExpectArg {
    fn from(value: Regex) -> Self {
        Self::Sql(SqlPattern::Regex(value))
    }
}

impl From<SqlPattern> for ExpectArg {
    fn from(value: SqlPattern) -> Self {
        Self::Sql(value)
    }
}

impl From<Value> for ExpectArg {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            other => Self::Value(other),
        }
    }
}

impl<T: Into<Self>> From<Vec<T>> for ExpectArg {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

/// Builds a `Vec<ExpectArg>` from heterogeneous expectation items.
///
/// ```
/// use query_spy_core::expect_args;
/// use serde_json::json;
///
/// let items = expect_args!["BEGIN", "SELECT ?", json!([1]), "COMMIT"];
/// assert_eq!(items.len(), 4);
/// ```
#[macro_export]
macro_rules! expect_args {
    () => {
        ::std::vec::Vec::<$crate::matcher::ExpectArg>::new()
    };
    ($($item:expr),+ $(,)?) => {
        ::std::vec![$($crate::matcher::ExpectArg::from($item)),+]
    };
}

// ============================================================================
// SECTION: Expected Tuples
// ============================================================================

/// Expected SQL pattern and arguments for one execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedTuple {
    /// Expected SQL.
    pub sql: SqlPattern,
    /// Expected arguments.
    pub args: Vec<Value>,
    /// Whether any expected argument was given as a pattern.
    pub pattern_args: bool,
}

impl ExpectedTuple {
    /// Creates an expected tuple.
    #[must_use]
    pub fn new(sql: impl Into<SqlPattern>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
            pattern_args: false,
        }
    }
}

/// Normalizes variadic expectation items into expected tuples.
///
/// When every item is a list, the items are first flattened by one level.
/// Each remaining non-list item then starts a tuple; a list immediately
/// following it becomes its arguments, otherwise the arguments are empty.
/// Lists that do not follow an SQL item are ignored.
#[must_use]
pub fn build_expected_tuples(items: Vec<ExpectArg>) -> Vec<ExpectedTuple> {
    let items: Vec<ExpectArg> = if items.iter().all(ExpectArg::is_list) {
        items
            .into_iter()
            .flat_map(|item| match item {
                ExpectArg::List(inner) => inner,
                other => vec![other],
            })
            .collect()
    } else {
        items
    };

    let mut tuples = Vec::new();
    let mut iter = items.into_iter().peekable();
    while let Some(item) = iter.next() {
        let Some(sql) = item.into_pattern() else {
            continue;
        };
        let args_item = iter.next_if(ExpectArg::is_list);
        let pattern_args = args_item.as_ref().is_some_and(ExpectArg::contains_pattern);
        let args = args_item.map_or_else(Vec::new, ExpectArg::into_args);
        tuples.push(ExpectedTuple {
            sql,
            args,
            pattern_args,
        });
    }
    tuples
}

// ============================================================================
// SECTION: Comparison
// ============================================================================

/// Returns true when the expected SQL accepts the actual SQL.
#[must_use]
pub fn sql_equal(expected: &SqlPattern, actual: &str) -> bool {
    expected.matches_statement(actual)
}

/// Returns true when argument lists are structurally equal.
#[must_use]
pub fn args_equal(expected: &[Value], actual: &[Value]) -> bool {
    expected == actual
}

/// Returns true when both tuples are present and match.
///
/// A tuple whose arguments were given as patterns never matches.
#[must_use]
pub fn tuple_equal(expected: Option<&ExpectedTuple>, actual: Option<&ExecutionRecord>) -> bool {
    match (expected, actual) {
        (Some(expected), Some(actual)) => {
            !expected.pattern_args
                && sql_equal(&expected.sql, &actual.sql)
                && args_equal(&expected.args, &actual.args)
        }
        _ => false,
    }
}

/// Returns true when the sequences match pairwise, in order.
#[must_use]
pub fn tuples_equal(expected: &[ExpectedTuple], actual: &[ExecutionRecord]) -> bool {
    let len = expected.len().max(actual.len());
    (0 .. len).all(|index| tuple_equal(expected.get(index), actual.get(index)))
}

// ============================================================================
// SECTION: Formatting
// ============================================================================

/// Renders one tuple as `SQL ~[arg, arg]`.
#[must_use]
pub fn format_tuple(sql: &str, args: &[Value]) -> String {
    let rendered: Vec<String> = args.iter().map(format_arg).collect();
    format!("{sql} ~[{}]", rendered.join(", "))
}

/// Renders expected tuples for diagnostics.
#[must_use]
pub fn format_expected(tuples: &[ExpectedTuple]) -> String {
    join_rendered(tuples.iter().map(|tuple| format_tuple(&tuple.sql.to_string(), &tuple.args)))
}

/// Renders recorded executions for diagnostics.
#[must_use]
pub fn format_records(records: &[ExecutionRecord]) -> String {
    join_rendered(records.iter().map(|record| format_tuple(&record.sql, &record.args)))
}

/// Joins rendered tuples, rendering an empty sequence as `[]`.
fn join_rendered(rendered: impl Iterator<Item = String>) -> String {
    let rendered: Vec<String> = rendered.collect();
    if rendered.is_empty() { "[]".to_string() } else { rendered.join(", ") }
}

/// Renders one argument: strings unquoted, null empty, arrays comma-joined.
fn format_arg(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(format_arg).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

//! Error types for the groq-builder crate.

use thiserror::Error;

/// Errors that can occur when building or rendering queries.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GroqError {
    /// Operator name outside the supported set.
    #[error("unsupported operator: {0}")]
    UnknownOperator(String),

    /// Sort direction name other than `asc` or `desc`.
    #[error("unsupported sort direction: {0}")]
    UnknownDirection(String),

    /// `contains` filter whose value is not a string.
    #[error("operator 'contains' on field '{field}' requires a string value, got {actual}")]
    ContainsRequiresString { field: String, actual: &'static str },

    /// `in` / `nin` filter whose value is not an array.
    #[error("operator '{op}' on field '{field}' requires an array value, got {actual}")]
    ArrayRequired {
        field: String,
        op: &'static str,
        actual: &'static str,
    },

    /// `match` filter whose value is neither a string nor an array of strings.
    #[error("operator 'match' on field '{field}' requires a string or array of strings")]
    MatchRequiresText { field: String },

    /// Projection tree nested deeper than the supported maximum.
    #[error("projection '{name}' exceeds the maximum nesting depth of {max}")]
    ProjectionTooDeep { name: String, max: usize },

    /// A filter, sort or projection names an empty field.
    #[error("empty field name in {context}")]
    EmptyField { context: &'static str },

    /// Collection was set to an empty string.
    #[error("collection name must not be empty")]
    EmptyCollection,

    /// Slice whose start lies after its end.
    #[error("invalid slice [{start}...{end}]: start is after end")]
    InvalidSlice { start: i64, end: i64 },

    /// Filter value could not be represented as a query value.
    #[error("unsupported value: {0}")]
    UnsupportedValue(String),
}

/// Result type for groq-builder operations.
pub type Result<T> = std::result::Result<T, GroqError>;

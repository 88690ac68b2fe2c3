//! Error types for the filter crate.

use thiserror::Error;

/// Errors that can occur when building or executing a filter query.
///
/// Builder methods never fail on their own; the first problem is recorded
/// and reported by the terminal call (`get`, `filter`, `matches`, `count`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Comparison operator token is not one of the supported operators.
    #[error("unknown comparison operator '{0}'")]
    UnknownOperator(String),

    /// Field path is empty or contains a malformed segment.
    #[error("invalid field path '{path}': {reason}")]
    InvalidFieldPath { path: String, reason: &'static str },

    /// Nested groups exceed the configured depth limit.
    #[error("expression nesting exceeds maximum depth of {max}")]
    TooDeep { max: usize },
}

/// Result type for filter operations.
pub type Result<T> = std::result::Result<T, FilterError>;

//! Error types for the query crate.

use thiserror::Error;

/// Errors that can occur when building queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Operator token is not one of the supported spellings.
    #[error("unsupported filter operator '{0}'")]
    UnknownOperator(String),

    /// Sort direction token is not `asc`/`desc` (or their long forms).
    #[error("unsupported sort direction '{0}'")]
    UnknownDirection(String),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;

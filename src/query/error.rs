//! Error types for query execution.

use thiserror::Error;

/// Errors that can end a query.
///
/// Malformed or cyclic queries are not errors: they return empty results.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The executor's cancellation token fired; no partial result is produced.
    #[error("Query cancelled")]
    Cancelled,
}

/// Result of running a query.
pub type QueryResult<T> = Result<T, QueryError>;

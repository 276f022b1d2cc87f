//! Query observers.

use crate::base::QualifiedName;

use super::params::QueryMode;

/// Description of a top-level query handed to observers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub mode: QueryMode,
    pub path: Vec<QualifiedName>,
}

/// Notified before and after every top-level query.
///
/// Nested queries issued by scopes while a query runs are not reported.
pub trait QueryObserver: Send + Sync {
    fn before_query(&self, _query: &QueryDescriptor) {}

    /// `results` is the number of results, or `None` if the query was
    /// cancelled.
    fn after_query(&self, _query: &QueryDescriptor, _results: Option<usize>) {}
}

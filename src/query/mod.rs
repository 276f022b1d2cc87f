//! Query execution - the orchestrating layer.
//!
//! [`QueryExecutor`] owns the root scopes and the configuration (name
//! conversion, customizers, context) and answers three kinds of queries:
//!
//! - [`QueryExecutor::name_match_query`] - exact matches for a path
//! - [`QueryExecutor::list_symbols_query`] - all symbols of a kind
//! - [`QueryExecutor::code_completion_query`] - completion items at a cursor
//!
//! Each entry point returns a builder; `run()` executes it.

mod builder;
mod completion;
mod error;
mod executor;
mod guard;
mod observer;
mod params;
mod queries;
#[cfg(feature = "self-check")]
mod self_check;

pub use builder::QueryExecutorBuilder;
pub use completion::{CompletionItem, sort_and_dedup};
pub use error::{QueryError, QueryResult};
pub use executor::QueryExecutor;
pub use observer::{QueryDescriptor, QueryObserver};
pub use params::{QueryMode, QueryParams};
pub use queries::{CodeCompletionQuery, ListSymbolsQuery, NameMatchQuery};

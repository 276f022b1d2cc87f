//! Query builders returned by the executor's entry points.
//!
//! ```ignore
//! let matches = executor
//!     .name_match_query([QualifiedKind::new("html", "tag").with_name("btn")])
//!     .additional_scope(local_scope)
//!     .exclude([Modifier::ABSTRACT])
//!     .run()?;
//! ```

use crate::base::{Modifier, ModifierSet, QualifiedKind, QualifiedName};
use crate::hir::{Match, Scope};

use super::completion::CompletionItem;
use super::error::QueryResult;
use super::executor::QueryExecutor;

/// Options shared by all query kinds.
#[derive(Clone, Debug, Default)]
pub(crate) struct QueryOptions {
    pub(crate) additional: Vec<Scope>,
    pub(crate) required: ModifierSet,
    pub(crate) excluded: ModifierSet,
    pub(crate) strict_scope: bool,
}

macro_rules! query_options {
    ($query:ident) => {
        impl<'e> $query<'e> {
            /// Add a scope for this query only. A symbol contributes its
            /// query scope.
            pub fn additional_scope(mut self, scope: impl Into<Scope>) -> Self {
                self.options.additional.push(scope.into());
                self
            }

            pub fn additional_scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
                self.options.additional.extend(scopes);
                self
            }

            /// Only accept symbols carrying all of `modifiers`.
            pub fn require(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
                self.options.required.extend(modifiers);
                self
            }

            /// Reject symbols carrying any of `modifiers`.
            pub fn exclude(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
                self.options.excluded.extend(modifiers);
                self
            }

            pub fn strict_scope(mut self, strict: bool) -> Self {
                self.options.strict_scope = strict;
                self
            }
        }
    };
}

/// Exact matching of the last path segment.
#[derive(Debug)]
#[must_use = "queries do nothing until run"]
pub struct NameMatchQuery<'e> {
    executor: &'e QueryExecutor,
    path: Vec<QualifiedName>,
    options: QueryOptions,
    keep_unresolved: bool,
}

impl<'e> NameMatchQuery<'e> {
    pub(crate) fn new(executor: &'e QueryExecutor, path: Vec<QualifiedName>) -> Self {
        Self {
            executor,
            path,
            options: QueryOptions::default(),
            keep_unresolved: false,
        }
    }

    /// Keep placeholder matches for unresolved top-level references.
    pub fn keep_unresolved_top_level_references(mut self, keep: bool) -> Self {
        self.keep_unresolved = keep;
        self
    }

    pub fn run(self) -> QueryResult<Vec<Match>> {
        self.executor
            .run_name_match(&self.path, &self.options, self.keep_unresolved)
    }
}

query_options!(NameMatchQuery);

/// Enumeration of the symbols of one kind.
#[derive(Debug)]
#[must_use = "queries do nothing until run"]
pub struct ListSymbolsQuery<'e> {
    executor: &'e QueryExecutor,
    path: Vec<QualifiedName>,
    kind: QualifiedKind,
    expand_patterns: bool,
    options: QueryOptions,
}

impl<'e> ListSymbolsQuery<'e> {
    pub(crate) fn new(
        executor: &'e QueryExecutor,
        path: Vec<QualifiedName>,
        kind: QualifiedKind,
        expand_patterns: bool,
    ) -> Self {
        Self {
            executor,
            path,
            kind,
            expand_patterns,
            options: QueryOptions::default(),
        }
    }

    pub fn run(self) -> QueryResult<Vec<Match>> {
        self.executor
            .run_list_symbols(&self.path, &self.kind, self.expand_patterns, &self.options)
    }
}

query_options!(ListSymbolsQuery);

/// Completion of the last path segment at a cursor position.
#[derive(Debug)]
#[must_use = "queries do nothing until run"]
pub struct CodeCompletionQuery<'e> {
    executor: &'e QueryExecutor,
    path: Vec<QualifiedName>,
    position: usize,
    options: QueryOptions,
}

impl<'e> CodeCompletionQuery<'e> {
    pub(crate) fn new(executor: &'e QueryExecutor, path: Vec<QualifiedName>, position: usize) -> Self {
        Self {
            executor,
            path,
            position,
            options: QueryOptions::default(),
        }
    }

    pub fn run(self) -> QueryResult<Vec<CompletionItem>> {
        self.executor
            .run_code_completion(&self.path, self.position, &self.options)
    }
}

query_options!(CodeCompletionQuery);

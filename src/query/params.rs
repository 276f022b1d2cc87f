//! Query parameters handed to scopes.

use crate::base::{Context, ModifierSet, QualifiedKind};
use crate::hir::NameConversion;

use super::executor::QueryExecutor;

/// The kind of query being executed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// Exact name matching.
    NameMatch,
    /// Enumeration of all symbols of `kind`.
    List {
        kind: QualifiedKind,
        expand_patterns: bool,
    },
    /// Completion of a partially typed name at `position`.
    CodeCompletion { position: usize },
}

impl QueryMode {
    pub fn tag(&self) -> &'static str {
        match self {
            QueryMode::NameMatch => "name-match",
            QueryMode::List { .. } => "list",
            QueryMode::CodeCompletion { .. } => "code-completion",
        }
    }
}

/// The parameters of one query, as seen by scopes.
///
/// Modifier sets are fixed for the lifetime of the query.
#[derive(Clone, Debug)]
pub struct QueryParams<'a> {
    executor: &'a QueryExecutor,
    mode: QueryMode,
    required: ModifierSet,
    excluded: ModifierSet,
    strict_scope: bool,
}

impl<'a> QueryParams<'a> {
    pub(crate) fn new(
        executor: &'a QueryExecutor,
        mode: QueryMode,
        required: ModifierSet,
        excluded: ModifierSet,
        strict_scope: bool,
    ) -> Self {
        Self {
            executor,
            mode,
            required,
            excluded,
            strict_scope,
        }
    }

    /// The executor running the query; scopes issue nested queries through it.
    pub fn executor(&self) -> &'a QueryExecutor {
        self.executor
    }

    pub fn naming(&self) -> &'a NameConversion {
        self.executor.naming()
    }

    pub fn context(&self) -> &'a Context {
        self.executor.context()
    }

    /// Whether scopes may perform expensive resolution work.
    pub fn allow_resolve(&self) -> bool {
        self.executor.allow_resolve()
    }

    pub fn mode(&self) -> &QueryMode {
        &self.mode
    }

    pub fn required(&self) -> &ModifierSet {
        &self.required
    }

    pub fn excluded(&self) -> &ModifierSet {
        &self.excluded
    }

    pub fn strict_scope(&self) -> bool {
        self.strict_scope
    }

    /// True when `modifiers` has every required and no excluded modifier.
    pub fn accepts(&self, modifiers: &ModifierSet) -> bool {
        modifiers.satisfies(&self.required, &self.excluded)
    }

    /// Cursor position of a completion query.
    pub fn position(&self) -> Option<usize> {
        match self.mode {
            QueryMode::CodeCompletion { position } => Some(position),
            _ => None,
        }
    }

    pub fn expand_patterns(&self) -> bool {
        matches!(
            self.mode,
            QueryMode::List {
                expand_patterns: true,
                ..
            }
        )
    }
}

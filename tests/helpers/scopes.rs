//! Instrumented scope implementations.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::Mutex;
use symq::query::QueryExecutor;
use symq::{
    CompoundScope, QualifiedKind, QualifiedName, QueryParams, Scope, ScopeProvider, Symbol,
};
use tokio_util::sync::CancellationToken;

/// Shared log of the scopes that were consulted, in order.
pub type VisitLog = Arc<Mutex<Vec<String>>>;

pub fn visit_log() -> VisitLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// A static scope that records every consultation in a shared log.
///
/// Identity is the label; the log is not part of it.
#[derive(Debug)]
pub struct RecordingScope {
    pub label: &'static str,
    pub symbols: Vec<Symbol>,
    pub exclusive_for: Option<QualifiedKind>,
    pub log: VisitLog,
}

impl RecordingScope {
    pub fn new(label: &'static str, symbols: Vec<Symbol>, log: &VisitLog) -> Self {
        Self {
            label,
            symbols,
            exclusive_for: None,
            log: log.clone(),
        }
    }

    pub fn exclusive_for(mut self, kind: QualifiedKind) -> Self {
        self.exclusive_for = Some(kind);
        self
    }

    pub fn into_scope(self) -> Scope {
        Scope::opaque(self)
    }
}

impl PartialEq for RecordingScope {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for RecordingScope {}

impl Hash for RecordingScope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

impl ScopeProvider for RecordingScope {
    fn symbols(&self, kind: &QualifiedKind, _: &QueryParams<'_>, _: &[Scope]) -> Vec<Symbol> {
        self.log.lock().push(self.label.to_string());
        self.symbols
            .iter()
            .filter(|symbol| symbol.qualified_kind() == kind)
            .cloned()
            .collect()
    }

    fn is_exclusive_for(&self, kind: &QualifiedKind) -> bool {
        self.exclusive_for.as_ref() == Some(kind)
    }
}

/// A scope that re-issues the same name-match query from inside
/// `matching_symbols` and then answers with its own symbols.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ReentrantScope {
    pub symbols: Vec<Symbol>,
}

impl ScopeProvider for ReentrantScope {
    fn matching_symbols(
        &self,
        name: &QualifiedName,
        params: &QueryParams<'_>,
        _: &[Scope],
    ) -> Vec<Symbol> {
        let nested = params
            .executor()
            .name_match_query([name.clone()])
            .run()
            .unwrap_or_default();
        assert!(nested.is_empty(), "nested query must be refused: {:?}", nested);

        self.symbols
            .iter()
            .filter(|symbol| symbol.qualified_name() == *name)
            .cloned()
            .collect()
    }
}

/// A scope that fires a cancellation token when consulted.
#[derive(Debug)]
pub struct CancellingScope {
    pub token: CancellationToken,
    pub symbols: Vec<Symbol>,
}

impl PartialEq for CancellingScope {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for CancellingScope {}

impl Hash for CancellingScope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.symbols.hash(state);
    }
}

impl ScopeProvider for CancellingScope {
    fn symbols(&self, kind: &QualifiedKind, _: &QueryParams<'_>, _: &[Scope]) -> Vec<Symbol> {
        self.token.cancel();
        self.symbols
            .iter()
            .filter(|symbol| symbol.qualified_kind() == kind)
            .cloned()
            .collect()
    }
}

/// A compound scope expanding into a fixed list of scopes.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct FixedCompound {
    pub scopes: Vec<Scope>,
}

impl CompoundScope for FixedCompound {
    fn scopes(&self, _: &QueryExecutor) -> Vec<Scope> {
        self.scopes.clone()
    }

    fn modification_count(&self) -> u64 {
        7
    }
}

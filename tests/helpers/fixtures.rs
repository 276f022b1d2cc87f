//! Symbol and executor fixtures.

use std::sync::Arc;

use parking_lot::Mutex;
use symq::query::{QueryDescriptor, QueryObserver};
use symq::{Priority, QualifiedKind, QueryExecutor, Scope, Symbol, SymbolsScope};

pub fn tag() -> QualifiedKind {
    QualifiedKind::new("html", "tag")
}

pub fn attr() -> QualifiedKind {
    QualifiedKind::new("html", "attr")
}

pub fn props() -> QualifiedKind {
    QualifiedKind::new("js", "props")
}

pub fn event() -> QualifiedKind {
    QualifiedKind::new("js", "event")
}

/// A declared symbol with an explicit priority.
pub fn symbol(kind: QualifiedKind, name: &str, priority: Priority) -> Symbol {
    Symbol::builder(kind, name).priority(priority).build()
}

/// A static scope over `symbols`.
pub fn scope(label: &str, symbols: Vec<Symbol>) -> Scope {
    SymbolsScope::new(label, symbols).into_scope()
}

/// A static scope exclusive for `kind`.
pub fn exclusive_scope(label: &str, kind: QualifiedKind, symbols: Vec<Symbol>) -> Scope {
    SymbolsScope::new(label, symbols).exclusive_for(kind).into_scope()
}

/// An executor over `scopes` with default configuration.
pub fn executor(scopes: Vec<Scope>) -> QueryExecutor {
    QueryExecutor::builder().root_scopes(scopes).build()
}

/// Records the observer notifications it receives.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }
}

impl QueryObserver for RecordingObserver {
    fn before_query(&self, query: &QueryDescriptor) {
        self.events
            .lock()
            .push(format!("before {}", query.mode.tag()));
    }

    fn after_query(&self, query: &QueryDescriptor, results: Option<usize>) {
        self.events
            .lock()
            .push(format!("after {} {:?}", query.mode.tag(), results));
    }
}

//! Recursion guard for re-entrant queries.
//!
//! Scopes may issue nested queries through the executor. A query whose key is
//! already executing further up the call stack is a cycle; the guard refuses
//! it so the caller can return an empty result instead of looping.
//!
//! State is tracked per thread: an executor shared between threads sees one
//! independent call stack per thread.

use std::thread::{self, ThreadId};

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::{ModifierSet, QualifiedName};

use super::params::QueryMode;

/// Identity of an executing query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct RecursionKey {
    mode: QueryMode,
    path: Vec<QualifiedName>,
    required: ModifierSet,
    excluded: ModifierSet,
}

impl RecursionKey {
    pub(crate) fn new(
        mode: QueryMode,
        path: &[QualifiedName],
        required: &ModifierSet,
        excluded: &ModifierSet,
    ) -> Self {
        Self {
            mode,
            path: path.to_vec(),
            required: required.clone(),
            excluded: excluded.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct GuardState {
    active: FxHashSet<RecursionKey>,
    depth: usize,
}

/// The set of queries currently executing on one executor.
#[derive(Debug, Default)]
pub(crate) struct RecursionGuard {
    threads: Mutex<FxHashMap<ThreadId, GuardState>>,
}

impl RecursionGuard {
    /// Register `key` as executing on the current thread. Returns `None` if it
    /// already is.
    pub(crate) fn enter(&self, key: RecursionKey) -> Option<ActiveQuery<'_>> {
        let thread = thread::current().id();
        let mut threads = self.threads.lock();
        let state = threads.entry(thread).or_default();
        if !state.active.insert(key.clone()) {
            return None;
        }
        state.depth += 1;
        Some(ActiveQuery {
            guard: self,
            thread,
            key,
            outermost: state.depth == 1,
        })
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        let threads = self.threads.lock();
        threads.values().map(|state| state.depth).sum()
    }
}

/// An executing query. Dropping it releases the key on every exit path.
#[derive(Debug)]
pub(crate) struct ActiveQuery<'g> {
    guard: &'g RecursionGuard,
    thread: ThreadId,
    key: RecursionKey,
    outermost: bool,
}

impl ActiveQuery<'_> {
    /// True for a top-level query (not nested in another query).
    pub(crate) fn is_outermost(&self) -> bool {
        self.outermost
    }
}

impl Drop for ActiveQuery<'_> {
    fn drop(&mut self) {
        let mut threads = self.guard.threads.lock();
        if let Some(state) = threads.get_mut(&self.thread) {
            state.active.remove(&self.key);
            state.depth -= 1;
            if state.depth == 0 {
                threads.remove(&self.thread);
            }
        }
    }
}

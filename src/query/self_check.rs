//! Sampled consistency checks of scope answers.
//!
//! Every `interval`-th scope fan-out is repeated and the two answers are
//! compared. Scopes must answer identical questions identically; a mismatch
//! points at a provider violating its equality contract.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::hir::Scope;

pub(crate) const DEFAULT_INTERVAL: usize = 16;

#[derive(Debug)]
pub(crate) struct SelfCheck {
    interval: usize,
    calls: AtomicUsize,
    violations: AtomicUsize,
}

impl SelfCheck {
    pub(crate) fn new(interval: usize) -> Self {
        Self {
            interval,
            calls: AtomicUsize::new(0),
            violations: AtomicUsize::new(0),
        }
    }

    pub(crate) fn verify<T: PartialEq + fmt::Debug>(
        &self,
        scope: &Scope,
        what: &str,
        first: &[T],
        again: impl FnOnce() -> Vec<T>,
    ) {
        let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if self.interval == 0 || call % self.interval != 0 {
            return;
        }
        let second = again();
        if second.as_slice() != first {
            self.violations.fetch_add(1, Ordering::Relaxed);
            tracing::error!(
                "[SELF-CHECK] {} of {:?} is not stable: {:?} then {:?}",
                what,
                scope,
                first,
                second
            );
        }
    }

    pub(crate) fn violations(&self) -> usize {
        self.violations.load(Ordering::Relaxed)
    }
}

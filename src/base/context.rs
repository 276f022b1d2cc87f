//! Query context.

use std::collections::BTreeMap;

use smol_str::SmolStr;

/// Well-known context kinds.
pub struct ContextKind;

impl ContextKind {
    /// The active framework (e.g. "vue"); selects framework-level naming defaults.
    pub const FRAMEWORK: &'static str = "framework";
}

/// Map of context kind → context name.
///
/// Read-only during a query. Ordered so two contexts with the same entries
/// compare and hash equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Context {
    entries: BTreeMap<SmolStr, SmolStr>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn with(mut self, kind: impl Into<SmolStr>, name: impl Into<SmolStr>) -> Self {
        self.entries.insert(kind.into(), name.into());
        self
    }

    pub fn insert(&mut self, kind: impl Into<SmolStr>, name: impl Into<SmolStr>) {
        self.entries.insert(kind.into(), name.into());
    }

    pub fn get(&self, kind: &str) -> Option<&str> {
        self.entries.get(kind).map(|name| name.as_str())
    }

    /// The active framework, if any.
    pub fn framework(&self) -> Option<&str> {
        self.get(ContextKind::FRAMEWORK)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

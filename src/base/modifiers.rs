//! Symbol modifiers.

use std::collections::BTreeSet;
use std::fmt;

use smol_str::SmolStr;

/// A symbol modifier such as `abstract` or `readonly`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifier(SmolStr);

impl Modifier {
    pub const ABSTRACT: Modifier = Modifier::new_static("abstract");
    pub const VIRTUAL: Modifier = Modifier::new_static("virtual");
    pub const READONLY: Modifier = Modifier::new_static("readonly");
    pub const OPTIONAL: Modifier = Modifier::new_static("optional");
    pub const REQUIRED: Modifier = Modifier::new_static("required");
    pub const STATIC: Modifier = Modifier::new_static("static");

    /// Create a custom modifier.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self(name.into())
    }

    const fn new_static(name: &'static str) -> Self {
        Self(SmolStr::new_static(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered, hashable set of modifiers.
///
/// Ordered so that two sets with the same members hash identically; the set
/// is part of the query recursion key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet(BTreeSet<Modifier>);

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, modifier: Modifier) -> bool {
        self.0.insert(modifier)
    }

    pub fn contains(&self, modifier: &Modifier) -> bool {
        self.0.contains(modifier)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.0.iter()
    }

    /// True if every member of `other` is in this set.
    pub fn contains_all(&self, other: &ModifierSet) -> bool {
        other.0.is_subset(&self.0)
    }

    /// True if this set shares at least one member with `other`.
    pub fn intersects(&self, other: &ModifierSet) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    /// Check a symbol's modifiers against required/excluded sets.
    pub fn satisfies(&self, required: &ModifierSet, excluded: &ModifierSet) -> bool {
        self.contains_all(required) && !self.intersects(excluded)
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Modifier> for ModifierSet {
    fn extend<I: IntoIterator<Item = Modifier>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

//! Results customization pipeline.
//!
//! Customizers post-process query results: they may filter, re-rank or
//! rewrite match lists, drop or adjust completion items, and take part in
//! modifier composition of matches. The executor combines all configured
//! customizers into one [`CompoundCustomizer`].

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::identity::{DynIdentity, impl_dyn_identity};
use super::matches::Match;
use super::symbol::Symbol;
use crate::base::{ModifierSet, QualifiedKind, QualifiedName};
use crate::query::CompletionItem;

/// A pluggable post-processor of query results.
///
/// Implementations must be pure and compare equal when built from the same
/// data (derive `PartialEq, Eq, Hash`). Every method defaults to a
/// passthrough.
pub trait ResultsCustomizer: DynIdentity + fmt::Debug + Send + Sync {
    /// Narrow or reorder the matches found for `name`.
    fn apply(&self, matches: Vec<Match>, _strict: bool, _name: &QualifiedName) -> Vec<Match> {
        matches
    }

    /// Adjust a completion item, or return `None` to drop it.
    fn apply_completion(
        &self,
        item: CompletionItem,
        _strict: bool,
        _kind: &QualifiedKind,
    ) -> Option<CompletionItem> {
        Some(item)
    }

    /// Merge the modifiers accumulated so far with those of `symbol`.
    /// `None` abstains.
    fn merge_modifiers(&self, _accumulated: Option<&ModifierSet>, _symbol: &Symbol) -> Option<ModifierSet> {
        None
    }

    fn modification_count(&self) -> u64 {
        0
    }

    /// Name used in logs.
    fn name(&self) -> &'static str;
}

impl_dyn_identity!(ResultsCustomizer);

/// All configured customizers folded into one.
///
/// `apply` and `apply_completion` run in reverse registration order: the
/// last-registered customizer sees the raw input first. `merge_modifiers`
/// asks in registration order and the first answer wins.
///
/// Registering any customizer switches match-backed symbols to composed
/// modifiers (see [`Match::compose_modifiers`]). When every customizer
/// abstains from `merge_modifiers` such a symbol has no modifiers, even if
/// its contributors declare some; `require`/`exclude` filters then see an
/// empty set. An empty chain keeps the contributors' own modifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CompoundCustomizer {
    customizers: Vec<Arc<dyn ResultsCustomizer>>,
}

impl CompoundCustomizer {
    pub fn new(customizers: Vec<Arc<dyn ResultsCustomizer>>) -> Self {
        Self { customizers }
    }

    pub fn is_empty(&self) -> bool {
        self.customizers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.customizers.len()
    }

    pub fn apply(&self, mut matches: Vec<Match>, strict: bool, name: &QualifiedName) -> Vec<Match> {
        for customizer in self.customizers.iter().rev() {
            let before = matches.len();
            matches = customizer.apply(matches, strict, name);
            if matches.len() != before {
                debug!(
                    "[QUERY] customizer '{}' refined {} -> {} for {}",
                    customizer.name(),
                    before,
                    matches.len(),
                    name
                );
            }
        }
        matches
    }

    pub fn apply_completion(
        &self,
        item: CompletionItem,
        strict: bool,
        kind: &QualifiedKind,
    ) -> Option<CompletionItem> {
        self.customizers.iter().rev().try_fold(item, |item, customizer| {
            let name = item.name.clone();
            let result = customizer.apply_completion(item, strict, kind);
            if result.is_none() {
                debug!(
                    "[COMPLETION] customizer '{}' dropped '{}'",
                    customizer.name(),
                    name
                );
            }
            result
        })
    }

    pub fn merge_modifiers(&self, accumulated: Option<&ModifierSet>, symbol: &Symbol) -> Option<ModifierSet> {
        self.customizers
            .iter()
            .find_map(|customizer| customizer.merge_modifiers(accumulated, symbol))
    }

    pub fn modification_count(&self) -> u64 {
        self.customizers.iter().map(|c| c.modification_count()).sum()
    }
}

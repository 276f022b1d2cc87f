//! Matches - the result of resolving a name against scopes.
//!
//! A [`Match`] covers a matched string with ordered [`NameSegment`]s. Each
//! segment attributes a span of the string to the symbols that contributed
//! it; contributing symbols may themselves be matches, which makes a match a
//! tree.
//!
//! ## Derived properties
//!
//! Properties that are not set explicitly on the match (proximity,
//! documentation, custom properties, ...) are derived by walking the segments
//! in reverse and taking the first value supplied by a contributing symbol.
//! A deeper, later-registered contributor therefore overrides an earlier one,
//! but only where it actually supplies a value.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::hash::Hash;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::customize::CompoundCustomizer;
use super::scope::Scope;
use super::symbol::{PropertyValue, Symbol, SymbolOrigin};
use crate::base::{ModifierSet, Priority, QualifiedKind, QualifiedName};

// ============================================================================
// NAME SEGMENT
// ============================================================================

/// Problems a segment may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchProblem {
    /// A required part of the name is missing.
    MissingRequiredPart,
    /// The span could not be attributed to any symbol.
    UnknownSymbol,
    /// The span duplicates another association.
    Duplicate,
}

/// A span of the matched string and the symbols that contributed it.
///
/// A segment with `start == end` is a zero-width structural link.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NameSegment {
    start: usize,
    end: usize,
    symbols: Vec<Symbol>,
    problem: Option<MatchProblem>,
    display_name: Option<SmolStr>,
    priority: Option<Priority>,
    proximity: Option<i32>,
}

impl NameSegment {
    pub fn new(start: usize, end: usize, symbols: Vec<Symbol>) -> Self {
        Self {
            start,
            end: end.max(start),
            symbols,
            problem: None,
            display_name: None,
            priority: None,
            proximity: None,
        }
    }

    /// A span nothing could be attributed to.
    pub fn unresolved(start: usize, end: usize, problem: MatchProblem) -> Self {
        Self::new(start, end, Vec::new()).with_problem(problem)
    }

    pub fn with_problem(mut self, problem: MatchProblem) -> Self {
        self.problem = Some(problem);
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<SmolStr>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_proximity(mut self, proximity: i32) -> Self {
        self.proximity = Some(proximity);
        self
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn problem(&self) -> Option<MatchProblem> {
        self.problem
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn proximity(&self) -> Option<i32> {
        self.proximity
    }

    /// Move the segment right by `offset`.
    pub fn shifted(mut self, offset: usize) -> Self {
        self.start += offset;
        self.end += offset;
        self
    }
}

// ============================================================================
// MATCH
// ============================================================================

/// The result of resolving a name: a string covered by name segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Match {
    matched_name: SmolStr,
    name: SmolStr,
    kind: QualifiedKind,
    origin: SymbolOrigin,
    segments: Vec<NameSegment>,
    priority: Option<Priority>,
    proximity: Option<i32>,
    properties: BTreeMap<SmolStr, PropertyValue>,
}

impl Match {
    /// Create a match. An empty segment list is replaced by a single
    /// unresolved segment spanning the whole string.
    pub fn new(
        matched_name: impl Into<SmolStr>,
        kind: QualifiedKind,
        origin: SymbolOrigin,
        mut segments: Vec<NameSegment>,
    ) -> Self {
        let matched_name = matched_name.into();
        if segments.is_empty() {
            segments.push(NameSegment::unresolved(
                0,
                matched_name.len(),
                MatchProblem::UnknownSymbol,
            ));
        }
        let name = spanned_name(&matched_name, &segments);
        Self {
            matched_name,
            name,
            kind,
            origin,
            segments,
            priority: None,
            proximity: None,
            properties: BTreeMap::new(),
        }
    }

    /// A match covering the symbol's whole name with the symbol itself.
    ///
    /// Match-backed symbols yield their match unchanged.
    pub fn from_symbol(symbol: &Symbol) -> Self {
        if let Some(m) = symbol.as_match() {
            return m.clone();
        }
        let name = symbol.name();
        Self::new(
            name,
            symbol.qualified_kind().clone(),
            symbol.origin().clone(),
            vec![NameSegment::new(0, name.len(), vec![symbol.clone()])],
        )
    }

    /// Placeholder for a top-level reference nothing could resolve.
    pub fn unresolved(name: &QualifiedName) -> Self {
        Self::new(
            name.name(),
            name.qualified_kind().clone(),
            SymbolOrigin::default(),
            Vec::new(),
        )
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_proximity(mut self, proximity: i32) -> Self {
        self.proximity = Some(proximity);
        self
    }

    pub fn with_property(mut self, name: impl Into<SmolStr>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// A match for `new_name` whose single segment is attributed to this match.
    pub fn renamed(&self, new_name: impl Into<SmolStr>) -> Self {
        let new_name = new_name.into();
        let len = new_name.len();
        let mut renamed = Self::new(
            new_name,
            self.kind.clone(),
            self.origin.clone(),
            vec![NameSegment::new(0, len, vec![Symbol::from(self.clone())])],
        );
        renamed.priority = self.priority;
        renamed.proximity = self.proximity;
        renamed
    }

    /// The symbol this match stands for: the wrapped symbol when the match
    /// trivially covers a single declared symbol, the match otherwise.
    pub fn into_symbol(self) -> Symbol {
        if self.priority.is_none()
            && self.proximity.is_none()
            && self.properties.is_empty()
            && self.segments.len() == 1
        {
            let segment = &self.segments[0];
            if segment.problem.is_none()
                && segment.start == 0
                && segment.end == self.matched_name.len()
                && segment.symbols.len() == 1
                && segment.priority.is_none()
                && segment.proximity.is_none()
                && segment.display_name.is_none()
                && segment.symbols[0].name() == self.matched_name
            {
                return segment.symbols[0].clone();
            }
        }
        Symbol::from(self)
    }

    /// The full string this match was built for.
    pub fn matched_name(&self) -> &str {
        &self.matched_name
    }

    /// The substring spanned by the first..last non-trivial segment.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_kind(&self) -> &QualifiedKind {
        &self.kind
    }

    pub fn qualified_name(&self) -> QualifiedName {
        self.kind.with_name(self.name.clone())
    }

    pub fn origin(&self) -> &SymbolOrigin {
        &self.origin
    }

    pub fn segments(&self) -> &[NameSegment] {
        &self.segments
    }

    /// Contributing symbols, closest-to-root first (segments in reverse).
    fn reversed_contributors(&self) -> impl Iterator<Item = &Symbol> {
        self.segments
            .iter()
            .rev()
            .flat_map(|segment| segment.symbols.iter())
    }

    /// Explicit priority, else the highest priority found on the segments or
    /// their contributing symbols.
    pub fn priority(&self) -> Option<Priority> {
        if self.priority.is_some() {
            return self.priority;
        }
        self.segments
            .iter()
            .rev()
            .flat_map(|segment| {
                segment
                    .priority
                    .into_iter()
                    .chain(segment.symbols.iter().filter_map(Symbol::priority))
            })
            .max()
    }

    pub fn proximity(&self) -> Option<i32> {
        if self.proximity.is_some() {
            return self.proximity;
        }
        self.segments.iter().rev().find_map(|segment| {
            segment
                .proximity
                .or_else(|| segment.symbols.iter().find_map(Symbol::proximity))
        })
    }

    /// True when every contributing symbol is an extension.
    pub fn is_extension(&self) -> bool {
        let mut contributors = self.reversed_contributors().peekable();
        contributors.peek().is_some() && contributors.all(Symbol::is_extension)
    }

    pub fn hide_from_completion(&self) -> bool {
        self.reversed_contributors()
            .next()
            .is_some_and(Symbol::hide_from_completion)
    }

    pub fn documentation(&self) -> Option<&str> {
        self.reversed_contributors().find_map(Symbol::documentation)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .get(name)
            .or_else(|| self.reversed_contributors().find_map(|s| s.property(name)))
    }

    /// Union of the contributing symbols' query scopes, in segment order.
    pub fn query_scope(&self) -> Vec<Scope> {
        let mut seen = FxHashSet::default();
        let mut scopes = Vec::new();
        for symbol in self.segments.iter().flat_map(|s| s.symbols.iter()) {
            for scope in symbol.query_scope() {
                if seen.insert(scope.clone()) {
                    scopes.push(scope);
                }
            }
        }
        scopes
    }

    /// Modifiers composed without customizers: the first non-empty set of a
    /// contributing symbol, walking in reverse.
    pub fn modifiers(&self) -> ModifierSet {
        self.reversed_contributors()
            .map(Symbol::modifiers)
            .find(|modifiers| !modifiers.is_empty())
            .unwrap_or_default()
    }

    /// Modifiers composed through the customizer chain.
    ///
    /// The accumulated set is offered to the customizers together with each
    /// contributing symbol (reverse order); the first customizer returning a
    /// set wins that step. If no customizer ever answers the result is empty.
    pub fn compose_modifiers(&self, customizer: &CompoundCustomizer) -> ModifierSet {
        if customizer.is_empty() {
            return self.modifiers();
        }
        self.reversed_contributors()
            .fold(None, |acc: Option<ModifierSet>, symbol| {
                customizer.merge_modifiers(acc.as_ref(), symbol).or(acc)
            })
            .unwrap_or_default()
    }

    /// Number of segments carrying a problem.
    pub fn problem_count(&self) -> usize {
        self.segments.iter().filter(|s| s.problem.is_some()).count()
    }

    /// Length of the string covered by resolved, problem-free segments.
    pub fn coverage(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.problem.is_none() && !s.symbols.is_empty())
            .map(NameSegment::len)
            .sum()
    }

    /// How far the match resolves: `usize::MAX` when no segment carries a
    /// problem, otherwise the offset of the first problem segment.
    pub fn resolved_extent(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.problem.is_some())
            .map(NameSegment::start)
            .min()
            .unwrap_or(usize::MAX)
    }

    /// True for the placeholder produced for an unresolved top-level reference.
    pub fn is_unresolved_reference(&self) -> bool {
        self.segments.len() == 1
            && self.segments[0].symbols.is_empty()
            && self.segments[0].problem == Some(MatchProblem::UnknownSymbol)
    }

    /// Ranking key used by select-best; greater is better.
    fn rank(&self) -> (Reverse<usize>, usize, Priority, bool) {
        (
            Reverse(self.problem_count()),
            self.resolved_extent(),
            self.priority().unwrap_or_default(),
            !self.is_extension(),
        )
    }
}

fn spanned_name(matched_name: &str, segments: &[NameSegment]) -> SmolStr {
    let mut non_trivial = segments.iter().filter(|s| !s.is_empty());
    let Some(first) = non_trivial.next() else {
        return SmolStr::default();
    };
    let end = non_trivial.last().unwrap_or(first).end;
    matched_name
        .get(first.start..end.min(matched_name.len()))
        .map(SmolStr::from)
        .unwrap_or_else(|| SmolStr::from(matched_name))
}

// ============================================================================
// SELECT BEST
// ============================================================================

/// Keep the best candidates of each comparable group.
///
/// Candidates are grouped by `(qualified kind, matched name)`. Within a group
/// the maximal elements survive under the order:
/// 1. fewer segment problems, then the later first problem
/// 2. higher priority
/// 3. non-extension over extension
///
/// Ties are all retained. Group order and in-group order follow the input.
pub fn select_best(candidates: Vec<Match>) -> Vec<Match> {
    select_best_by(candidates, |m| (m.kind.clone(), m.matched_name.clone()))
}

/// [`select_best`] with a caller-supplied grouping key.
///
/// Name matching groups by kind only: every candidate answers the same query
/// name, whatever its spelling.
pub fn select_best_by<K, F>(candidates: Vec<Match>, key: F) -> Vec<Match>
where
    K: Hash + Eq,
    F: Fn(&Match) -> K,
{
    if candidates.len() < 2 {
        return candidates;
    }
    let mut groups: IndexMap<K, Vec<Match>> = IndexMap::new();
    for candidate in candidates {
        groups.entry(key(&candidate)).or_default().push(candidate);
    }
    groups.into_values().flat_map(maximal).collect()
}

/// The maximal elements of `candidates` under the select-best order,
/// ignoring grouping.
pub fn maximal(candidates: Vec<Match>) -> Vec<Match> {
    let Some(best) = candidates.iter().map(Match::rank).max() else {
        return candidates;
    };
    candidates.into_iter().filter(|m| m.rank() == best).collect()
}

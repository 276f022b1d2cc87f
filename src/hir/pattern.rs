//! Patterns - generators attached to symbols.
//!
//! A pattern materializes many concrete names from one declarative template.
//! Expansion is only performed on request (list queries with
//! `expand_patterns`, completion, name matching against a pattern symbol).

use std::fmt;

use smol_str::SmolStr;

use super::identity::{DynIdentity, impl_dyn_identity};
use super::matches::{Match, MatchProblem, NameSegment};
use super::scope::Scope;
use super::symbol::Symbol;
use crate::base::{QualifiedKind, namespaces};
use crate::query::QueryParams;

/// Upper bound on the names a single pattern listing may produce.
pub const MAX_PATTERN_EXPANSION: usize = 1024;

/// A `(name, segments)` pair produced by a pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatternItem {
    pub name: SmolStr,
    pub segments: Vec<NameSegment>,
}

/// A generator of derived names.
pub trait Pattern: DynIdentity + fmt::Debug + Send + Sync {
    /// Enumerate the names this pattern produces for `owner`.
    fn list(&self, owner: &Symbol, stack: &[Scope], params: &QueryParams<'_>) -> Vec<PatternItem>;

    /// Match `name` against the pattern. Returns no matches when the name
    /// cannot even be partially attributed.
    fn match_name(
        &self,
        owner: &Symbol,
        name: &str,
        stack: &[Scope],
        params: &QueryParams<'_>,
    ) -> Vec<Match>;
}

impl_dyn_identity!(Pattern);

/// Expand `symbol` through its pattern. A symbol without a pattern expands to
/// itself.
pub fn expand_pattern(symbol: &Symbol, stack: &[Scope], params: &QueryParams<'_>) -> Vec<Symbol> {
    let Some(pattern) = symbol.pattern() else {
        return vec![symbol.clone()];
    };
    let items = pattern.list(symbol, stack, params);
    tracing::trace!("[PATTERN] {:?} expanded to {} name(s)", symbol, items.len());
    items
        .into_iter()
        .map(|item| {
            Symbol::from(Match::new(
                item.name,
                symbol.qualified_kind().clone(),
                symbol.origin().clone(),
                item.segments,
            ))
        })
        .collect()
}

// ============================================================================
// COMPLEX PATTERN
// ============================================================================

/// One part of a [`ComplexPattern`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PatternPart {
    /// Fixed text, attributed to the owning symbol.
    Literal(SmolStr),
    /// Any name of the given kind visible from the current scope stack,
    /// attributed to the referenced symbol.
    SymbolsOf(QualifiedKind),
}

/// A pattern made of a sequence of literal and symbol-reference parts.
///
/// `on-` followed by any `js/event` yields `on-click`, `on-input`, ...
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComplexPattern {
    parts: Vec<PatternPart>,
}

/// Alternatives for one part: `(text, contributing symbol)`.
type PartOptions = Vec<(SmolStr, Symbol)>;

impl ComplexPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn literal(mut self, text: impl Into<SmolStr>) -> Self {
        self.parts.push(PatternPart::Literal(text.into()));
        self
    }

    pub fn symbols_of(mut self, kind: QualifiedKind) -> Self {
        self.parts.push(PatternPart::SymbolsOf(kind));
        self
    }

    pub fn parts(&self) -> &[PatternPart] {
        &self.parts
    }

    fn options(&self, owner: &Symbol, stack: &[Scope], params: &QueryParams<'_>) -> Vec<PartOptions> {
        self.parts
            .iter()
            .map(|part| match part {
                PatternPart::Literal(text) => vec![(text.clone(), owner.clone())],
                PatternPart::SymbolsOf(kind) => params
                    .executor()
                    .list_symbols_query(Vec::new(), kind.clone(), false)
                    .additional_scopes(stack.iter().cloned())
                    .run()
                    .unwrap_or_default()
                    .into_iter()
                    .map(|m| (SmolStr::from(m.name()), m.into_symbol()))
                    .filter(|(name, _)| !name.is_empty())
                    .collect(),
            })
            .collect()
    }
}

impl Pattern for ComplexPattern {
    fn list(&self, owner: &Symbol, stack: &[Scope], params: &QueryParams<'_>) -> Vec<PatternItem> {
        let options = self.options(owner, stack, params);
        let mut items = vec![PatternItem {
            name: SmolStr::default(),
            segments: Vec::new(),
        }];
        for alternatives in &options {
            let mut next = Vec::new();
            'product: for item in &items {
                for (text, symbol) in alternatives {
                    if next.len() >= MAX_PATTERN_EXPANSION {
                        tracing::debug!(
                            "[PATTERN] expansion of {:?} capped at {} names",
                            owner,
                            MAX_PATTERN_EXPANSION
                        );
                        break 'product;
                    }
                    let start = item.name.len();
                    let mut segments = item.segments.clone();
                    segments.push(NameSegment::new(start, start + text.len(), vec![symbol.clone()]));
                    next.push(PatternItem {
                        name: SmolStr::from(format!("{}{}", item.name, text)),
                        segments,
                    });
                }
            }
            items = next;
        }
        items.retain(|item| !item.name.is_empty());
        items
    }

    fn match_name(
        &self,
        owner: &Symbol,
        name: &str,
        stack: &[Scope],
        params: &QueryParams<'_>,
    ) -> Vec<Match> {
        let options = self.options(owner, stack, params);
        let ignore_case = namespaces::is_structural(owner.qualified_kind().namespace());
        let mut parser = Parser {
            name,
            options: &options,
            ignore_case,
            complete: Vec::new(),
            deepest: (0, Vec::new()),
        };
        parser.parse(0, 0, &mut Vec::new());

        let kind = owner.qualified_kind().clone();
        if !parser.complete.is_empty() {
            return parser
                .complete
                .into_iter()
                .map(|segments| Match::new(name, kind.clone(), owner.origin().clone(), segments))
                .collect();
        }

        let (pos, mut segments) = parser.deepest;
        if pos == 0 {
            return Vec::new();
        }
        segments.push(NameSegment::unresolved(pos, name.len(), MatchProblem::UnknownSymbol));
        vec![Match::new(name, kind, owner.origin().clone(), segments)]
    }
}

/// Depth-first parse of a name against the part alternatives.
struct Parser<'a> {
    name: &'a str,
    options: &'a [PartOptions],
    ignore_case: bool,
    complete: Vec<Vec<NameSegment>>,
    deepest: (usize, Vec<NameSegment>),
}

impl Parser<'_> {
    fn parse(&mut self, part: usize, pos: usize, segments: &mut Vec<NameSegment>) {
        if pos > self.deepest.0 {
            self.deepest = (pos, segments.clone());
        }
        let Some(alternatives) = self.options.get(part) else {
            if pos == self.name.len() {
                self.complete.push(segments.clone());
            }
            return;
        };
        for (text, symbol) in alternatives {
            let end = pos + text.len();
            let Some(slice) = self.name.get(pos..end) else {
                continue;
            };
            let matches = if self.ignore_case {
                slice.eq_ignore_ascii_case(text)
            } else {
                slice == text.as_str()
            };
            if matches {
                segments.push(NameSegment::new(pos, end, vec![symbol.clone()]));
                self.parse(part + 1, end, segments);
                segments.pop();
            }
        }
    }
}

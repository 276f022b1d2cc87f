//! Scopes - sources of symbols consulted during resolution.
//!
//! A [`Scope`] is a closed set of variants:
//!
//! - [`Scope::Symbol`] - a symbol acting as a scope through its members
//! - [`Scope::Opaque`] - any collaborator implementing [`ScopeProvider`]
//! - [`Scope::Compound`] - expands into a list of scopes when the scope chain
//!   is built
//! - [`Scope::Deferred`] - a [`ScopeHandle`] rehydrated when the chain is built
//!
//! Every variant has stable structural equality so that scope sets can be
//! unioned and query keys compared across repeated construction.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smol_str::SmolStr;

use super::identity::{DynIdentity, impl_dyn_identity};
use super::pattern::expand_pattern;
use super::symbol::Symbol;
use crate::base::{Modifier, QualifiedKind, QualifiedName};
use crate::query::{CompletionItem, QueryExecutor, QueryParams};

// ============================================================================
// CAPABILITY TRAITS
// ============================================================================

/// The scope capability implemented by collaborators.
///
/// Only [`ScopeProvider::symbols`] must be meaningful for most providers: the
/// default name-matching and completion implementations derive their answers
/// from it through the executor's name-conversion layer.
///
/// Implementations must be pure with respect to the query and must compare
/// equal (derive `PartialEq, Eq, Hash`) when built from the same data.
pub trait ScopeProvider: DynIdentity + fmt::Debug + Send + Sync {
    /// Symbols matching `name` exactly (after name conversion).
    fn matching_symbols(
        &self,
        name: &QualifiedName,
        params: &QueryParams<'_>,
        stack: &[Scope],
    ) -> Vec<Symbol> {
        let candidates = self.symbols(name.qualified_kind(), params, stack);
        match_against(candidates, name, params, stack)
    }

    /// All symbols of the given kind.
    fn symbols(
        &self,
        _kind: &QualifiedKind,
        _params: &QueryParams<'_>,
        _stack: &[Scope],
    ) -> Vec<Symbol> {
        Vec::new()
    }

    /// Completion items for the partially typed `name`.
    fn code_completions(
        &self,
        name: &QualifiedName,
        params: &QueryParams<'_>,
        stack: &[Scope],
    ) -> Vec<CompletionItem> {
        let candidates = self.symbols(name.qualified_kind(), params, stack);
        complete_from(candidates, name, params, stack)
    }

    /// Whether this scope shadows all earlier scopes for `kind`.
    fn is_exclusive_for(&self, _kind: &QualifiedKind) -> bool {
        false
    }

    fn modification_count(&self) -> u64 {
        0
    }
}

impl_dyn_identity!(ScopeProvider);

/// A scope that expands lazily into a list of scopes.
pub trait CompoundScope: DynIdentity + fmt::Debug + Send + Sync {
    fn scopes(&self, executor: &QueryExecutor) -> Vec<Scope>;

    fn modification_count(&self) -> u64 {
        0
    }
}

impl_dyn_identity!(CompoundScope);

// ============================================================================
// SCOPE HANDLE
// ============================================================================

type ScopeResolver = dyn Fn() -> Option<Scope> + Send + Sync;

/// A reference to a scope that is rehydrated when the scope chain is built.
///
/// Equality and hashing use the key only, so handles compare before they are
/// resolved. Resolution may fail (the target was invalidated), in which case
/// the handle contributes nothing.
#[derive(Clone)]
pub struct ScopeHandle {
    key: SmolStr,
    resolver: Arc<ScopeResolver>,
}

impl ScopeHandle {
    pub fn new(
        key: impl Into<SmolStr>,
        resolver: impl Fn() -> Option<Scope> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            resolver: Arc::new(resolver),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn resolve(&self) -> Option<Scope> {
        (self.resolver)()
    }
}

impl PartialEq for ScopeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ScopeHandle {}

impl Hash for ScopeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for ScopeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScopeHandle({})", self.key)
    }
}

// ============================================================================
// SCOPE
// ============================================================================

/// A source of symbols in the scope chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Symbol(Symbol),
    Opaque(Arc<dyn ScopeProvider>),
    Compound(Arc<dyn CompoundScope>),
    Deferred(ScopeHandle),
}

impl Scope {
    pub fn opaque(provider: impl ScopeProvider + 'static) -> Self {
        Scope::Opaque(Arc::new(provider))
    }

    pub fn compound(compound: impl CompoundScope + 'static) -> Self {
        Scope::Compound(Arc::new(compound))
    }

    fn provider(&self) -> Option<&dyn ScopeProvider> {
        match self {
            Scope::Symbol(symbol) => symbol.members().map(|members| &**members),
            Scope::Opaque(provider) => Some(&**provider),
            // Expanded/resolved when the chain is built; never queried directly.
            Scope::Compound(_) | Scope::Deferred(_) => None,
        }
    }

    pub fn matching_symbols(
        &self,
        name: &QualifiedName,
        params: &QueryParams<'_>,
        stack: &[Scope],
    ) -> Vec<Symbol> {
        self.provider()
            .map(|provider| provider.matching_symbols(name, params, stack))
            .unwrap_or_default()
    }

    pub fn symbols(
        &self,
        kind: &QualifiedKind,
        params: &QueryParams<'_>,
        stack: &[Scope],
    ) -> Vec<Symbol> {
        self.provider()
            .map(|provider| provider.symbols(kind, params, stack))
            .unwrap_or_default()
    }

    pub fn code_completions(
        &self,
        name: &QualifiedName,
        params: &QueryParams<'_>,
        stack: &[Scope],
    ) -> Vec<CompletionItem> {
        self.provider()
            .map(|provider| provider.code_completions(name, params, stack))
            .unwrap_or_default()
    }

    pub fn is_exclusive_for(&self, kind: &QualifiedKind) -> bool {
        self.provider()
            .is_some_and(|provider| provider.is_exclusive_for(kind))
    }

    pub fn modification_count(&self) -> u64 {
        match self {
            Scope::Compound(compound) => compound.modification_count(),
            _ => self
                .provider()
                .map(|provider| provider.modification_count())
                .unwrap_or(0),
        }
    }

    /// The symbol, when this scope is a symbol acting as a scope.
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Scope::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }
}

impl From<Symbol> for Scope {
    fn from(symbol: Symbol) -> Self {
        Scope::Symbol(symbol)
    }
}

/// Narrow a scope chain for `kind`: keep the last scope that is exclusive for
/// `kind` and everything after it. Earlier scopes are shadowed for that kind
/// only.
pub fn take_last_until_exclusive<'a>(scopes: &'a [Scope], kind: &QualifiedKind) -> &'a [Scope] {
    match scopes.iter().rposition(|scope| scope.is_exclusive_for(kind)) {
        Some(idx) => {
            if idx > 0 {
                tracing::trace!(
                    "[QUERY] {} scope(s) shadowed for '{}' by exclusive scope {:?}",
                    idx,
                    kind,
                    scopes[idx]
                );
            }
            &scopes[idx..]
        }
        None => scopes,
    }
}

// ============================================================================
// DEFAULT PROVIDER BEHAVIOR
// ============================================================================

/// Default name matching over a candidate list.
///
/// Pattern symbols are matched through their pattern; other symbols match
/// when their match names intersect the query's match names. Candidates are
/// filtered by the query's required/excluded modifiers. Outside strict mode
/// abstract symbols are skipped unless `ABSTRACT` is required.
pub fn match_against(
    candidates: Vec<Symbol>,
    name: &QualifiedName,
    params: &QueryParams<'_>,
    stack: &[Scope],
) -> Vec<Symbol> {
    let naming = params.executor().naming();
    let mut result = Vec::new();
    for symbol in candidates {
        if symbol.qualified_kind() != name.qualified_kind() {
            continue;
        }
        let modifiers = params.executor().modifiers_of(&symbol);
        if !params.accepts(&modifiers) {
            continue;
        }
        // Abstract declarations only match when asked for explicitly.
        if !params.strict_scope()
            && modifiers.contains(&Modifier::ABSTRACT)
            && !params.required().contains(&Modifier::ABSTRACT)
        {
            continue;
        }
        if let Some(pattern) = symbol.pattern() {
            result.extend(
                pattern
                    .match_name(&symbol, name.name(), stack, params)
                    .into_iter()
                    .map(Symbol::from),
            );
        } else if naming.names_match(&symbol.qualified_name(), name) {
            result.push(symbol);
        }
    }
    result
}

/// Default completion over a candidate list: one item per completion variant
/// that starts with the typed prefix. The prefix ends at the cursor; the
/// whole name is used when the cursor is past its end or not on a character
/// boundary.
pub fn complete_from(
    candidates: Vec<Symbol>,
    name: &QualifiedName,
    params: &QueryParams<'_>,
    stack: &[Scope],
) -> Vec<CompletionItem> {
    let naming = params.executor().naming();
    let typed = name.name();
    let prefix = params
        .position()
        .and_then(|position| typed.get(..position))
        .unwrap_or(typed)
        .to_lowercase();
    let mut items = Vec::new();
    for symbol in candidates {
        if symbol.qualified_kind() != name.qualified_kind() {
            continue;
        }
        if !params.accepts(&params.executor().modifiers_of(&symbol)) {
            continue;
        }
        for candidate in expand_pattern(&symbol, stack, params) {
            for variant in naming.completion_variants(&candidate.qualified_name()) {
                if variant.to_lowercase().starts_with(&prefix) {
                    items.push(CompletionItem::from_symbol(&candidate, variant));
                }
            }
        }
    }
    items
}

// ============================================================================
// BUILT-IN STATIC SCOPE
// ============================================================================

/// A scope over a fixed list of symbols.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolsScope {
    label: SmolStr,
    symbols: Vec<Symbol>,
    exclusive_for: Vec<QualifiedKind>,
    modification_count: u64,
}

impl SymbolsScope {
    pub fn new(label: impl Into<SmolStr>, symbols: Vec<Symbol>) -> Self {
        Self {
            label: label.into(),
            symbols,
            exclusive_for: Vec::new(),
            modification_count: 0,
        }
    }

    /// Declare this scope exclusive for `kind`.
    pub fn exclusive_for(mut self, kind: QualifiedKind) -> Self {
        self.exclusive_for.push(kind);
        self
    }

    pub fn with_modification_count(mut self, count: u64) -> Self {
        self.modification_count = count;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn into_scope(self) -> Scope {
        Scope::opaque(self)
    }
}

impl ScopeProvider for SymbolsScope {
    fn symbols(
        &self,
        kind: &QualifiedKind,
        _params: &QueryParams<'_>,
        _stack: &[Scope],
    ) -> Vec<Symbol> {
        self.symbols
            .iter()
            .filter(|symbol| symbol.qualified_kind() == kind)
            .cloned()
            .collect()
    }

    fn is_exclusive_for(&self, kind: &QualifiedKind) -> bool {
        self.exclusive_for.contains(kind)
    }

    fn modification_count(&self) -> u64 {
        self.modification_count
    }
}

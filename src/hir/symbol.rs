//! Symbols - named, kinded, prioritized entities.
//!
//! A [`Symbol`] is a cheap-to-clone value. It is either *declared* (built by a
//! collaborator through [`SymbolBuilder`]) or backed by a [`Match`] produced
//! during resolution. Both flavors answer the same capability questions
//! (name, kind, priority, modifiers, query scope, ...); for matches the
//! answers are derived from the contributing symbols of the name segments.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use super::matches::Match;
use super::pattern::Pattern;
use super::scope::{Scope, ScopeProvider};
use crate::base::{ModifierSet, Priority, QualifiedKind, QualifiedName};

// ============================================================================
// PROPERTIES & ORIGIN
// ============================================================================

/// A typed value attached to a symbol under a property name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Str(SmolStr),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(value) => Some(value),
            _ => None,
        }
    }
}

/// Where a symbol comes from (framework and library that contributed it).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SymbolOrigin {
    pub framework: Option<SmolStr>,
    pub library: Option<SmolStr>,
}

impl SymbolOrigin {
    pub fn framework(framework: impl Into<SmolStr>) -> Self {
        Self {
            framework: Some(framework.into()),
            library: None,
        }
    }

    pub fn with_library(mut self, library: impl Into<SmolStr>) -> Self {
        self.library = Some(library.into());
        self
    }
}

// ============================================================================
// DECLARED SYMBOL DATA
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SymbolData {
    name: SmolStr,
    kind: QualifiedKind,
    origin: SymbolOrigin,
    priority: Option<Priority>,
    proximity: Option<i32>,
    extension: bool,
    modifiers: ModifierSet,
    pattern: Option<Arc<dyn Pattern>>,
    query_scope: Vec<Scope>,
    members: Option<Arc<dyn ScopeProvider>>,
    hide_from_completion: bool,
    documentation: Option<SmolStr>,
    properties: BTreeMap<SmolStr, PropertyValue>,
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum SymbolInner {
    Declared(SymbolData),
    Match(Match),
}

// ============================================================================
// SYMBOL
// ============================================================================

/// A symbol: a match target and, when it has members or an explicit query
/// scope, a source of further scopes.
///
/// Equality is structural, so two symbols built from the same data compare
/// equal across repeated construction.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    inner: Arc<SymbolInner>,
}

impl Symbol {
    /// Start building a declared symbol.
    pub fn builder(kind: QualifiedKind, name: impl Into<SmolStr>) -> SymbolBuilder {
        SymbolBuilder::new(kind, name)
    }

    /// Shorthand for a declared symbol with default attributes.
    pub fn new(kind: QualifiedKind, name: impl Into<SmolStr>) -> Self {
        SymbolBuilder::new(kind, name).build()
    }

    pub fn name(&self) -> &str {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => &data.name,
            SymbolInner::Match(m) => m.name(),
        }
    }

    pub fn qualified_kind(&self) -> &QualifiedKind {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => &data.kind,
            SymbolInner::Match(m) => m.qualified_kind(),
        }
    }

    pub fn qualified_name(&self) -> QualifiedName {
        self.qualified_kind().with_name(self.name())
    }

    pub fn origin(&self) -> &SymbolOrigin {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => &data.origin,
            SymbolInner::Match(m) => m.origin(),
        }
    }

    pub fn priority(&self) -> Option<Priority> {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => data.priority,
            SymbolInner::Match(m) => m.priority(),
        }
    }

    pub fn proximity(&self) -> Option<i32> {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => data.proximity,
            SymbolInner::Match(m) => m.proximity(),
        }
    }

    /// Extension symbols augment rather than define a name.
    pub fn is_extension(&self) -> bool {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => data.extension,
            SymbolInner::Match(m) => m.is_extension(),
        }
    }

    /// Modifiers, composed without customizers for match-backed symbols.
    ///
    /// Use `QueryExecutor::modifiers_of` to include the configured
    /// modifier-merging customizers.
    pub fn modifiers(&self) -> ModifierSet {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => data.modifiers.clone(),
            SymbolInner::Match(m) => m.modifiers(),
        }
    }

    pub fn pattern(&self) -> Option<&Arc<dyn Pattern>> {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => data.pattern.as_ref(),
            SymbolInner::Match(_) => None,
        }
    }

    /// Scopes contributed by this symbol when it is resolved as a path segment
    /// or passed as an additional scope.
    ///
    /// An explicit query scope wins; otherwise a symbol with members
    /// contributes itself.
    pub fn query_scope(&self) -> Vec<Scope> {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => {
                if !data.query_scope.is_empty() {
                    data.query_scope.clone()
                } else if data.members.is_some() {
                    vec![Scope::Symbol(self.clone())]
                } else {
                    Vec::new()
                }
            }
            SymbolInner::Match(m) => m.query_scope(),
        }
    }

    /// The provider answering queries when this symbol acts as a scope.
    pub fn members(&self) -> Option<&Arc<dyn ScopeProvider>> {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => data.members.as_ref(),
            SymbolInner::Match(_) => None,
        }
    }

    pub fn hide_from_completion(&self) -> bool {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => data.hide_from_completion,
            SymbolInner::Match(m) => m.hide_from_completion(),
        }
    }

    pub fn documentation(&self) -> Option<&str> {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => data.documentation.as_deref(),
            SymbolInner::Match(m) => m.documentation(),
        }
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => data.properties.get(name),
            SymbolInner::Match(m) => m.property(name),
        }
    }

    /// The backing match, if this symbol was produced by resolution.
    pub fn as_match(&self) -> Option<&Match> {
        match self.inner.as_ref() {
            SymbolInner::Match(m) => Some(m),
            SymbolInner::Declared(_) => None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.as_match().is_some()
    }
}

impl From<Match> for Symbol {
    fn from(m: Match) -> Self {
        Self {
            inner: Arc::new(SymbolInner::Match(m)),
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.as_ref() {
            SymbolInner::Declared(data) => {
                write!(f, "Symbol({}/{}", data.kind, data.name)?;
                if let Some(priority) = data.priority {
                    write!(f, ", {}", priority.display())?;
                }
                if data.extension {
                    f.write_str(", extension")?;
                }
                f.write_str(")")
            }
            SymbolInner::Match(m) => write!(f, "{:?}", m),
        }
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for declared symbols.
#[derive(Clone, Debug)]
pub struct SymbolBuilder {
    data: SymbolData,
}

impl SymbolBuilder {
    pub fn new(kind: QualifiedKind, name: impl Into<SmolStr>) -> Self {
        Self {
            data: SymbolData {
                name: name.into(),
                kind,
                origin: SymbolOrigin::default(),
                priority: None,
                proximity: None,
                extension: false,
                modifiers: ModifierSet::new(),
                pattern: None,
                query_scope: Vec::new(),
                members: None,
                hide_from_completion: false,
                documentation: None,
                properties: BTreeMap::new(),
            },
        }
    }

    pub fn origin(mut self, origin: SymbolOrigin) -> Self {
        self.data.origin = origin;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.data.priority = Some(priority);
        self
    }

    pub fn proximity(mut self, proximity: i32) -> Self {
        self.data.proximity = Some(proximity);
        self
    }

    pub fn extension(mut self, extension: bool) -> Self {
        self.data.extension = extension;
        self
    }

    pub fn modifier(mut self, modifier: crate::base::Modifier) -> Self {
        self.data.modifiers.insert(modifier);
        self
    }

    pub fn modifiers(mut self, modifiers: ModifierSet) -> Self {
        self.data.modifiers = modifiers;
        self
    }

    pub fn pattern(mut self, pattern: Arc<dyn Pattern>) -> Self {
        self.data.pattern = Some(pattern);
        self
    }

    /// Scopes this symbol contributes when resolved as a path segment.
    pub fn query_scope(mut self, scope: Scope) -> Self {
        self.data.query_scope.push(scope);
        self
    }

    /// Members answering queries when this symbol acts as a scope.
    pub fn members(mut self, members: Arc<dyn ScopeProvider>) -> Self {
        self.data.members = Some(members);
        self
    }

    pub fn hide_from_completion(mut self, hide: bool) -> Self {
        self.data.hide_from_completion = hide;
        self
    }

    pub fn documentation(mut self, doc: impl Into<SmolStr>) -> Self {
        self.data.documentation = Some(doc.into());
        self
    }

    pub fn property(mut self, name: impl Into<SmolStr>, value: PropertyValue) -> Self {
        self.data.properties.insert(name.into(), value);
        self
    }

    pub fn build(self) -> Symbol {
        Symbol {
            inner: Arc::new(SymbolInner::Declared(self.data)),
        }
    }
}

//! # symbol-query
//!
//! Symbol query and resolution engine: resolves qualified names and dotted
//! paths against a prioritized chain of scopes and returns ranked,
//! deduplicated matches or completion items.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! query     → QueryExecutor, query builders, recursion guard, completion ranking
//!   ↓
//! hir       → Symbol, Scope, Match, select-best, patterns, name conversion,
//!             results customizers
//!   ↓
//! base      → Primitives (QualifiedKind, QualifiedName, Priority, modifiers, context)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use symq::{QualifiedKind, QueryExecutor, Symbol, SymbolsScope};
//!
//! let tag = QualifiedKind::new("html", "tag");
//! let executor = QueryExecutor::builder()
//!     .root_scope(SymbolsScope::new("html", vec![Symbol::new(tag.clone(), "div")]).into_scope())
//!     .build();
//!
//! let matches = executor.name_match_query([tag.with_name("DIV")]).run()?;
//! assert_eq!(matches.len(), 1);
//! ```

// ============================================================================
// MODULES (dependency order: base → hir → query)
// ============================================================================

/// Foundation types: qualified names, priority, modifiers, context
pub mod base;

/// Semantic model: symbols, scopes, matches, name conversion, customizers
pub mod hir;

/// Query execution: executor, builders, completion ranking
pub mod query;

// Re-export foundation types
pub use base::{
    Context, ContextKind, Modifier, ModifierSet, Priority, QualifiedKind, QualifiedName, SmolStr,
};

// Re-export the model and the executor
pub use hir::{
    CompoundScope, Match, NameConversionRules, NameSegment, ResultsCustomizer, Scope, ScopeHandle,
    ScopeProvider, Symbol, SymbolsScope,
};
pub use query::{CompletionItem, QueryError, QueryExecutor, QueryParams};

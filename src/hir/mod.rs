//! Semantic model - symbols, scopes, matches and the conversion layers.
//!
//! ## Key Types
//!
//! - [`Symbol`] - A named, kinded, prioritized entity; also a scope when it
//!   has members
//! - [`Scope`] - A source of symbols: symbol, opaque provider, compound scope
//!   or deferred handle
//! - [`Match`] - Result of resolving a name: a string covered by
//!   [`NameSegment`]s
//! - [`NameConversion`] - Storage/match/completion/rename name forms
//! - [`CompoundCustomizer`] - The results customization pipeline
//! - [`Pattern`] - Generators of derived names
//!
//! ## Resolution Layers
//!
//! ```text
//! Scope chain               ← root + additional scopes, exclusivity
//!     │
//!     ▼
//! ScopeProvider fan-out     ← matching_symbols / symbols / code_completions
//!     │
//!     ▼
//! Pattern expansion         ← on request
//!     │
//!     ▼
//! ResultsCustomizer chain   ← filter, re-rank, merge modifiers
//!     │
//!     ▼
//! select_best               ← per comparable group
//! ```

mod customize;
mod identity;
mod matches;
mod naming;
mod pattern;
mod scope;
mod symbol;

pub use customize::{CompoundCustomizer, ResultsCustomizer};
pub use identity::DynIdentity;
pub use matches::{Match, MatchProblem, NameSegment, maximal, select_best, select_best_by};
#[cfg(feature = "serde")]
pub use naming::ConfigError;
pub use naming::{
    CaseConverter, FrameworkNaming, NameCase, NameConversion, NameConversionRules, NameConverter,
    NameTarget,
};
pub use pattern::{
    ComplexPattern, MAX_PATTERN_EXPANSION, Pattern, PatternItem, PatternPart, expand_pattern,
};
pub use scope::{
    CompoundScope, Scope, ScopeHandle, ScopeProvider, SymbolsScope, complete_from, match_against,
    take_last_until_exclusive,
};
pub use symbol::{PropertyValue, Symbol, SymbolBuilder, SymbolOrigin};

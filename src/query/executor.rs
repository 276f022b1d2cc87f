//! The query executor.
//!
//! ## Query pipeline
//!
//! ```text
//! scope_chain(additional)      ← root scopes ∪ additional scopes, compound
//!     │                          scopes expanded, handles resolved
//!     ▼
//! resolve_path_prefix(path)    ← drill through all but the last segment
//!     │
//!     ▼
//! take_last_until_exclusive    ← shadow scopes for the terminal kind
//!     │
//!     ▼
//! name_match | list | completion
//! ```
//!
//! Every entry point runs under the recursion guard. Scopes may re-enter the
//! executor through [`QueryParams::executor`]; a re-entry with a query that is
//! already running returns an empty result.

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::base::{Context, Modifier, ModifierSet, QualifiedKind, QualifiedName};
use crate::hir::{
    CompoundCustomizer, Match, NameConversion, Scope, Symbol, expand_pattern, maximal, select_best_by,
    take_last_until_exclusive,
};

use super::builder::QueryExecutorBuilder;
use super::completion::{CompletionItem, sort_and_dedup};
use super::error::{QueryError, QueryResult};
use super::guard::{RecursionGuard, RecursionKey};
use super::observer::{QueryDescriptor, QueryObserver};
use super::params::{QueryMode, QueryParams};
use super::queries::{CodeCompletionQuery, ListSymbolsQuery, NameMatchQuery, QueryOptions};
#[cfg(feature = "self-check")]
use super::self_check::SelfCheck;

/// Most a single scope step may raise the completion proximity base.
const MAX_PROXIMITY_STEP: i32 = 5;

/// Resolves queries against a chain of scopes.
///
/// An executor is an immutable value; rebuild it when its configuration
/// changes. [`QueryExecutor::modification_count`] lets callers detect when a
/// cached executor is stale.
pub struct QueryExecutor {
    pub(crate) root_scopes: Vec<Scope>,
    /// Compound scopes expanded into `root_scopes` at build time.
    pub(crate) expanded_compounds: Vec<Scope>,
    pub(crate) context: Context,
    pub(crate) naming: NameConversion,
    pub(crate) customizer: CompoundCustomizer,
    pub(crate) observers: Vec<Arc<dyn QueryObserver>>,
    pub(crate) allow_resolve: bool,
    pub(crate) cancellation: CancellationToken,
    pub(crate) guard: RecursionGuard,
    #[cfg(feature = "self-check")]
    pub(crate) self_check: SelfCheck,
}

impl QueryExecutor {
    pub fn builder() -> QueryExecutorBuilder {
        QueryExecutorBuilder::new()
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Root scopes, with compound scopes already expanded.
    pub fn root_scopes(&self) -> &[Scope] {
        &self.root_scopes
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn naming(&self) -> &NameConversion {
        &self.naming
    }

    pub fn customizer(&self) -> &CompoundCustomizer {
        &self.customizer
    }

    pub fn allow_resolve(&self) -> bool {
        self.allow_resolve
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Sum of the modification counts of the root scopes (including the
    /// compound scopes they were expanded from), customizers and framework
    /// naming providers.
    pub fn modification_count(&self) -> u64 {
        self.root_scopes
            .iter()
            .chain(&self.expanded_compounds)
            .map(Scope::modification_count)
            .sum::<u64>()
            + self.customizer.modification_count()
            + self.naming.modification_count()
    }

    /// Modifiers of `symbol`, composed through the configured customizers for
    /// match-backed symbols.
    pub fn modifiers_of(&self, symbol: &Symbol) -> ModifierSet {
        match symbol.as_match() {
            Some(m) => m.compose_modifiers(&self.customizer),
            None => symbol.modifiers(),
        }
    }

    /// Number of unstable scope answers detected by sampled self-checks.
    #[cfg(feature = "self-check")]
    pub fn consistency_violations(&self) -> usize {
        self.self_check.violations()
    }

    // ========================================================================
    // QUERY ENTRY POINTS
    // ========================================================================

    /// Match the last segment of `path` exactly.
    pub fn name_match_query(&self, path: impl IntoIterator<Item = QualifiedName>) -> NameMatchQuery<'_> {
        NameMatchQuery::new(self, path.into_iter().collect())
    }

    /// List all symbols of `kind` reachable through `path`. An empty path
    /// lists from the scope chain itself.
    pub fn list_symbols_query(
        &self,
        path: impl IntoIterator<Item = QualifiedName>,
        kind: QualifiedKind,
        expand_patterns: bool,
    ) -> ListSymbolsQuery<'_> {
        ListSymbolsQuery::new(self, path.into_iter().collect(), kind, expand_patterns)
    }

    /// Complete the last segment of `path` at cursor `position`.
    pub fn code_completion_query(
        &self,
        path: impl IntoIterator<Item = QualifiedName>,
        position: usize,
    ) -> CodeCompletionQuery<'_> {
        CodeCompletionQuery::new(self, path.into_iter().collect(), position)
    }

    pub(crate) fn run_name_match(
        &self,
        path: &[QualifiedName],
        options: &QueryOptions,
        keep_unresolved: bool,
    ) -> QueryResult<Vec<Match>> {
        let Some((name, prefix)) = path.split_last() else {
            return Ok(Vec::new());
        };
        self.execute(QueryMode::NameMatch, path, options, |params| {
            let Some(scopes) = self.resolve_path_prefix(prefix, &options.additional)? else {
                return Ok(Vec::new());
            };
            self.name_match(params, &scopes, name, keep_unresolved)
        })
    }

    pub(crate) fn run_list_symbols(
        &self,
        path: &[QualifiedName],
        kind: &QualifiedKind,
        expand_patterns: bool,
        options: &QueryOptions,
    ) -> QueryResult<Vec<Match>> {
        let mode = QueryMode::List {
            kind: kind.clone(),
            expand_patterns,
        };
        self.execute(mode, path, options, |params| {
            let Some(scopes) = self.resolve_path_prefix(path, &options.additional)? else {
                return Ok(Vec::new());
            };
            self.list(params, &scopes, kind, expand_patterns)
        })
    }

    pub(crate) fn run_code_completion(
        &self,
        path: &[QualifiedName],
        position: usize,
        options: &QueryOptions,
    ) -> QueryResult<Vec<CompletionItem>> {
        let Some((name, prefix)) = path.split_last() else {
            return Ok(Vec::new());
        };
        self.execute(QueryMode::CodeCompletion { position }, path, options, |params| {
            let Some(scopes) = self.resolve_path_prefix(prefix, &options.additional)? else {
                return Ok(Vec::new());
            };
            self.code_completion(params, &scopes, name, position)
        })
    }

    // ========================================================================
    // EXECUTION FRAME
    // ========================================================================

    /// Run `body` under the recursion guard, notifying observers for
    /// top-level queries.
    fn execute<T>(
        &self,
        mode: QueryMode,
        path: &[QualifiedName],
        options: &QueryOptions,
        body: impl FnOnce(&QueryParams<'_>) -> QueryResult<Vec<T>>,
    ) -> QueryResult<Vec<T>> {
        let key = RecursionKey::new(mode.clone(), path, &options.required, &options.excluded);
        let Some(active) = self.guard.enter(key) else {
            warn!(
                "[QUERY] cycle detected for {} query {:?}; root scopes: {:?}; additional scopes: {:?}",
                mode.tag(),
                path,
                self.root_scopes,
                options.additional
            );
            return Ok(Vec::new());
        };

        let descriptor = active.is_outermost().then(|| QueryDescriptor {
            mode: mode.clone(),
            path: path.to_vec(),
        });
        if let Some(descriptor) = &descriptor {
            for observer in &self.observers {
                observer.before_query(descriptor);
            }
        }

        let params = QueryParams::new(
            self,
            mode,
            options.required.clone(),
            options.excluded.clone(),
            options.strict_scope,
        );
        let result = self.check_cancelled().and_then(|()| body(&params));

        if let Some(descriptor) = &descriptor {
            let count = result.as_ref().ok().map(Vec::len);
            for observer in &self.observers {
                observer.after_query(descriptor, count);
            }
        }
        result
    }

    fn check_cancelled(&self) -> QueryResult<()> {
        if self.cancellation.is_cancelled() {
            debug!("[QUERY] cancelled");
            return Err(QueryError::Cancelled);
        }
        Ok(())
    }

    /// Ask one scope for results, sampling the answer for stability when
    /// self-checks are enabled.
    fn fan_out<T: PartialEq + fmt::Debug>(
        &self,
        scope: &Scope,
        what: &'static str,
        call: impl Fn() -> Vec<T>,
    ) -> QueryResult<Vec<T>> {
        self.check_cancelled()?;
        let result = call();
        #[cfg(feature = "self-check")]
        self.self_check.verify(scope, what, &result, &call);
        trace!("[QUERY] {} {} result(s) from {:?}", result.len(), what, scope);
        Ok(result)
    }

    // ========================================================================
    // SCOPE CHAIN
    // ========================================================================

    /// Union of the root scopes and `additional`, in order.
    ///
    /// Compound scopes are expanded and handles resolved; a symbol passed as
    /// an additional scope contributes its query scope instead of itself.
    fn scope_chain(&self, additional: &[Scope]) -> Vec<Scope> {
        let mut chain = IndexSet::new();
        let mut visited = FxHashSet::default();
        for scope in &self.root_scopes {
            self.flatten_into(scope.clone(), true, &mut chain, &mut visited);
        }
        for scope in additional {
            match scope {
                Scope::Symbol(symbol) => {
                    for contributed in symbol.query_scope() {
                        self.flatten_into(contributed, true, &mut chain, &mut visited);
                    }
                }
                other => self.flatten_into(other.clone(), true, &mut chain, &mut visited),
            }
        }
        chain.into_iter().collect()
    }

    /// Normalize a set of scopes produced by path resolution.
    fn normalize(&self, scopes: IndexSet<Scope>) -> Vec<Scope> {
        let mut chain = IndexSet::new();
        let mut visited = FxHashSet::default();
        for scope in scopes {
            self.flatten_into(scope, true, &mut chain, &mut visited);
        }
        chain.into_iter().collect()
    }

    /// Expand compound scopes transitively (and resolve handles when
    /// `resolve_handles`) into `chain`.
    pub(crate) fn flatten_into(
        &self,
        scope: Scope,
        resolve_handles: bool,
        chain: &mut IndexSet<Scope>,
        visited: &mut FxHashSet<Scope>,
    ) {
        match &scope {
            Scope::Compound(compound) => {
                if !visited.insert(scope.clone()) {
                    return;
                }
                for inner in compound.scopes(self) {
                    self.flatten_into(inner, resolve_handles, chain, visited);
                }
            }
            Scope::Deferred(handle) if resolve_handles => {
                if !visited.insert(scope.clone()) {
                    return;
                }
                match handle.resolve() {
                    Some(resolved) => self.flatten_into(resolved, resolve_handles, chain, visited),
                    None => debug!("[QUERY] scope handle '{}' no longer resolves", handle.key()),
                }
            }
            _ => {
                chain.insert(scope);
            }
        }
    }

    // ========================================================================
    // PATH TRAVERSAL
    // ========================================================================

    /// Drill through `prefix`, returning the scopes contributed by its last
    /// segment. `None` when a segment name is empty (the query fails closed).
    fn resolve_path_prefix(
        &self,
        prefix: &[QualifiedName],
        additional: &[Scope],
    ) -> QueryResult<Option<Vec<Scope>>> {
        let mut scopes = self.scope_chain(additional);
        if prefix.is_empty() {
            return Ok(Some(scopes));
        }

        // Intermediate segments never resolve to abstract declarations.
        let segment_params = QueryParams::new(
            self,
            QueryMode::NameMatch,
            ModifierSet::new(),
            [Modifier::ABSTRACT].into_iter().collect(),
            false,
        );
        for segment in prefix {
            if segment.name().is_empty() {
                debug!("[PATH] empty segment in {:?}", prefix);
                return Ok(None);
            }
            let truncated = take_last_until_exclusive(&scopes, segment.qualified_kind());
            let mut next = IndexSet::new();
            for scope in truncated {
                let symbols = self.fan_out(scope, "path symbols", || {
                    scope.matching_symbols(segment, &segment_params, truncated)
                })?;
                for symbol in symbols {
                    next.extend(symbol.query_scope());
                }
            }
            scopes = self.normalize(next);
            trace!("[PATH] '{}' leads to {} scope(s)", segment, scopes.len());
        }
        Ok(Some(scopes))
    }

    // ========================================================================
    // TERMINAL ALGORITHMS
    // ========================================================================

    fn name_match(
        &self,
        params: &QueryParams<'_>,
        scopes: &[Scope],
        name: &QualifiedName,
        keep_unresolved: bool,
    ) -> QueryResult<Vec<Match>> {
        if name.name().is_empty() {
            return Ok(Vec::new());
        }
        let truncated = take_last_until_exclusive(scopes, name.qualified_kind());
        let mut found = IndexSet::new();
        for scope in truncated {
            let symbols = self.fan_out(scope, "matching symbols", || {
                scope.matching_symbols(name, params, truncated)
            })?;
            for symbol in symbols {
                let candidate = Match::from_symbol(&symbol);
                if keep_unresolved || !candidate.is_unresolved_reference() {
                    found.insert(candidate);
                }
            }
        }
        self.check_cancelled()?;

        let customized = self
            .customizer
            .apply(found.into_iter().collect(), params.strict_scope(), name);
        // Every candidate answers `name`; spellings compete with each other.
        Ok(select_best_by(customized, |m| m.qualified_kind().clone()))
    }

    fn list(
        &self,
        params: &QueryParams<'_>,
        scopes: &[Scope],
        kind: &QualifiedKind,
        expand_patterns: bool,
    ) -> QueryResult<Vec<Match>> {
        let truncated = take_last_until_exclusive(scopes, kind);
        let mut symbols = IndexSet::new();
        for scope in truncated {
            symbols.extend(self.fan_out(scope, "symbols", || scope.symbols(kind, params, truncated))?);
        }
        self.check_cancelled()?;

        let accepted = symbols.into_iter().filter(|symbol| {
            symbol.qualified_kind() == kind && params.accepts(&self.modifiers_of(symbol))
        });
        let candidates: Vec<Symbol> = if expand_patterns {
            accepted
                .flat_map(|symbol| expand_pattern(&symbol, truncated, params))
                .collect()
        } else {
            accepted.collect()
        };

        let mut groups: IndexMap<SmolStr, Vec<Match>> = IndexMap::new();
        for symbol in &candidates {
            groups
                .entry(self.naming.storage_name(&symbol.qualified_name()))
                .or_default()
                .push(Match::from_symbol(symbol));
        }
        self.check_cancelled()?;

        let mut result = Vec::with_capacity(groups.len());
        for (storage_name, group) in groups {
            let group_name = kind.with_name(storage_name);
            let customized = self.customizer.apply(group, params.strict_scope(), &group_name);
            let Some(best) = maximal(customized).into_iter().next() else {
                continue;
            };
            if expand_patterns {
                result.push(self.rename_to_completion_variant(best));
            } else {
                result.push(best);
            }
        }
        trace!("[QUERY] listed {} symbol(s) of {}", result.len(), kind);
        Ok(result)
    }

    fn rename_to_completion_variant(&self, best: Match) -> Match {
        let variant = self
            .naming
            .completion_variants(&best.qualified_name())
            .into_iter()
            .next();
        match variant {
            Some(variant) if variant != best.matched_name() => best.renamed(variant),
            _ => best,
        }
    }

    fn code_completion(
        &self,
        params: &QueryParams<'_>,
        scopes: &[Scope],
        name: &QualifiedName,
        position: usize,
    ) -> QueryResult<Vec<CompletionItem>> {
        let truncated = take_last_until_exclusive(scopes, name.qualified_kind());
        let mut items = Vec::new();
        let mut proximity_base = 0;
        let mut next_base = 0;
        let mut previous: Option<&Symbol> = None;

        for scope in truncated {
            let current = scope.as_symbol();
            let same_chain = match (current, previous) {
                (Some(current), Some(previous)) => {
                    current.is_extension() && current.name() == previous.name()
                }
                _ => false,
            };
            if !same_chain {
                proximity_base = next_base;
            }
            previous = current;

            let completions = self.fan_out(scope, "completions", || {
                scope.code_completions(name, params, truncated)
            })?;
            for mut item in completions {
                if item.offset > position || item.hidden {
                    continue;
                }
                if let Some(priority) = item.symbol.as_ref().and_then(Symbol::priority) {
                    item.priority = item.priority.max(priority);
                }
                item.proximity = item.proximity.saturating_add(proximity_base);
                next_base = next_base.max(
                    item.proximity
                        .saturating_add(1)
                        .min(proximity_base.saturating_add(MAX_PROXIMITY_STEP)),
                );
                if let Some(item) =
                    self.customizer
                        .apply_completion(item, params.strict_scope(), name.qualified_kind())
                {
                    items.push(item);
                }
            }
        }
        self.check_cancelled()?;

        let items = sort_and_dedup(items);
        trace!("[COMPLETION] {} item(s) for '{}'", items.len(), name);
        Ok(items)
    }
}

impl fmt::Debug for QueryExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryExecutor")
            .field("root_scopes", &self.root_scopes)
            .field("context", &self.context)
            .field("customizer", &self.customizer)
            .field("allow_resolve", &self.allow_resolve)
            .finish_non_exhaustive()
    }
}

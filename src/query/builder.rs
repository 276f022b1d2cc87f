//! Executor configuration.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tokio_util::sync::CancellationToken;

use crate::base::Context;
use crate::hir::{
    CompoundCustomizer, FrameworkNaming, NameConversion, NameConversionRules, ResultsCustomizer, Scope,
};

use super::executor::QueryExecutor;
use super::guard::RecursionGuard;
use super::observer::QueryObserver;
#[cfg(feature = "self-check")]
use super::self_check::{DEFAULT_INTERVAL, SelfCheck};

/// Builder for [`QueryExecutor`].
///
/// ```ignore
/// let executor = QueryExecutor::builder()
///     .root_scope(SymbolsScope::new("html", html_symbols).into_scope())
///     .name_conversion(rules)
///     .context(Context::new().with(ContextKind::FRAMEWORK, "vue"))
///     .build();
/// ```
#[must_use]
pub struct QueryExecutorBuilder {
    root_scopes: Vec<Scope>,
    rules: Vec<NameConversionRules>,
    customizers: Vec<Arc<dyn ResultsCustomizer>>,
    frameworks: IndexMap<SmolStr, Arc<dyn FrameworkNaming>>,
    observers: Vec<Arc<dyn QueryObserver>>,
    context: Context,
    allow_resolve: bool,
    cancellation: CancellationToken,
    #[cfg(feature = "self-check")]
    self_check_interval: usize,
}

impl Default for QueryExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryExecutorBuilder {
    pub fn new() -> Self {
        Self {
            root_scopes: Vec::new(),
            rules: Vec::new(),
            customizers: Vec::new(),
            frameworks: IndexMap::new(),
            observers: Vec::new(),
            context: Context::new(),
            allow_resolve: true,
            cancellation: CancellationToken::new(),
            #[cfg(feature = "self-check")]
            self_check_interval: DEFAULT_INTERVAL,
        }
    }

    pub fn root_scope(mut self, scope: impl Into<Scope>) -> Self {
        self.root_scopes.push(scope.into());
        self
    }

    pub fn root_scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
        self.root_scopes.extend(scopes);
        self
    }

    /// Add a rules source. Earlier sources take precedence per kind.
    pub fn name_conversion(mut self, rules: NameConversionRules) -> Self {
        self.rules.push(rules);
        self
    }

    /// Add a customizer. Later customizers see the raw results first.
    pub fn customizer(mut self, customizer: impl ResultsCustomizer + 'static) -> Self {
        self.customizers.push(Arc::new(customizer));
        self
    }

    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Register naming defaults for `framework`; used while the context's
    /// framework is `framework`.
    pub fn framework_naming(
        mut self,
        framework: impl Into<SmolStr>,
        naming: impl FrameworkNaming + 'static,
    ) -> Self {
        self.frameworks.insert(framework.into(), Arc::new(naming));
        self
    }

    pub fn allow_resolve(mut self, allow: bool) -> Self {
        self.allow_resolve = allow;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn QueryObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Token checked before every scope fan-out.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Repeat every `interval`-th scope fan-out to check answers are stable.
    /// Zero disables sampling.
    #[cfg(feature = "self-check")]
    pub fn self_check_interval(mut self, interval: usize) -> Self {
        self.self_check_interval = interval;
        self
    }

    /// Build the executor, expanding compound root scopes.
    pub fn build(self) -> QueryExecutor {
        let framework = self.context.framework().map(SmolStr::from);
        let mut executor = QueryExecutor {
            root_scopes: Vec::new(),
            expanded_compounds: Vec::new(),
            context: self.context,
            naming: NameConversion::new(self.rules, self.frameworks, framework),
            customizer: CompoundCustomizer::new(self.customizers),
            observers: self.observers,
            allow_resolve: self.allow_resolve,
            cancellation: self.cancellation,
            guard: RecursionGuard::default(),
            #[cfg(feature = "self-check")]
            self_check: SelfCheck::new(self.self_check_interval),
        };

        let mut flattened = IndexSet::new();
        let mut visited = FxHashSet::default();
        for scope in self.root_scopes {
            executor.flatten_into(scope, false, &mut flattened, &mut visited);
        }
        executor.root_scopes = flattened.into_iter().collect();
        executor.expanded_compounds = visited.into_iter().collect();
        tracing::debug!(
            "[QUERY] executor built with {} root scope(s)",
            executor.root_scopes.len()
        );
        executor
    }
}

//! Name conversion layer.
//!
//! A qualified name has four interchangeable string forms ([`NameTarget`]):
//!
//! | Target               | Used for                          | Table fallback       |
//! |----------------------|-----------------------------------|----------------------|
//! | `Storage`            | canonical name, dedup & grouping  | -                    |
//! | `Match`              | comparing query names             | storage              |
//! | `CompletionVariants` | strings offered to the user       | -                    |
//! | `Rename`             | rename refactoring                | match, then storage  |
//!
//! Converters are looked up per qualified kind in the merged
//! [`NameConversionRules`] tables. When no table entry applies the active
//! framework's [`FrameworkNaming`] is asked; failing that the last-resort rule
//! lower-cases names in structural namespaces and keeps everything else as is.

mod case;
#[cfg(feature = "serde")]
mod config;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use smol_str::SmolStr;

use crate::base::{QualifiedKind, QualifiedName, namespaces};

pub use case::{CaseConverter, NameCase};
#[cfg(feature = "serde")]
pub use config::ConfigError;

/// The four name forms produced by the conversion layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NameTarget {
    Storage,
    Match,
    CompletionVariants,
    Rename,
}

/// Converts a name into one or more forms.
pub trait NameConverter: fmt::Debug + Send + Sync {
    fn convert(&self, name: &str) -> Vec<SmolStr>;
}

/// Framework-level naming defaults, consulted when no table entry applies.
pub trait FrameworkNaming: fmt::Debug + Send + Sync {
    /// Names for `target`, or `None` to fall through to the last-resort rule.
    fn names(&self, target: NameTarget, name: &QualifiedName) -> Option<Vec<SmolStr>>;

    fn modification_count(&self) -> u64 {
        0
    }
}

type ConverterTable = IndexMap<QualifiedKind, Arc<dyn NameConverter>>;

// ============================================================================
// RULES
// ============================================================================

/// One configuration source: four converter tables keyed by qualified kind.
#[derive(Clone, Debug, Default)]
pub struct NameConversionRules {
    storage: ConverterTable,
    matching: ConverterTable,
    completion_variants: ConverterTable,
    rename: ConverterTable,
}

impl NameConversionRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage(mut self, kind: QualifiedKind, converter: impl NameConverter + 'static) -> Self {
        self.storage.insert(kind, Arc::new(converter));
        self
    }

    pub fn with_match(mut self, kind: QualifiedKind, converter: impl NameConverter + 'static) -> Self {
        self.matching.insert(kind, Arc::new(converter));
        self
    }

    pub fn with_completion_variants(
        mut self,
        kind: QualifiedKind,
        converter: impl NameConverter + 'static,
    ) -> Self {
        self.completion_variants.insert(kind, Arc::new(converter));
        self
    }

    pub fn with_rename(mut self, kind: QualifiedKind, converter: impl NameConverter + 'static) -> Self {
        self.rename.insert(kind, Arc::new(converter));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
            && self.matching.is_empty()
            && self.completion_variants.is_empty()
            && self.rename.is_empty()
    }

    fn table(&self, target: NameTarget) -> &ConverterTable {
        match target {
            NameTarget::Storage => &self.storage,
            NameTarget::Match => &self.matching,
            NameTarget::CompletionVariants => &self.completion_variants,
            NameTarget::Rename => &self.rename,
        }
    }

    fn table_mut(&mut self, target: NameTarget) -> &mut ConverterTable {
        match target {
            NameTarget::Storage => &mut self.storage,
            NameTarget::Match => &mut self.matching,
            NameTarget::CompletionVariants => &mut self.completion_variants,
            NameTarget::Rename => &mut self.rename,
        }
    }

    /// Merge sources left to right; the first source registering a kind wins.
    fn merge(sources: &[NameConversionRules]) -> Self {
        let mut merged = Self::default();
        for source in sources {
            for target in TARGETS {
                let table = merged.table_mut(target);
                for (kind, converter) in source.table(target) {
                    table.entry(kind.clone()).or_insert_with(|| converter.clone());
                }
            }
        }
        merged
    }
}

const TARGETS: [NameTarget; 4] = [
    NameTarget::Storage,
    NameTarget::Match,
    NameTarget::CompletionVariants,
    NameTarget::Rename,
];

// ============================================================================
// NAME CONVERSION
// ============================================================================

/// The configured conversion layer of an executor.
#[derive(Debug, Default)]
pub struct NameConversion {
    sources: Vec<NameConversionRules>,
    /// Merged tables, computed at most once on first use.
    merged: OnceCell<NameConversionRules>,
    frameworks: IndexMap<SmolStr, Arc<dyn FrameworkNaming>>,
    framework: Option<SmolStr>,
}

impl NameConversion {
    pub fn new(
        sources: Vec<NameConversionRules>,
        frameworks: IndexMap<SmolStr, Arc<dyn FrameworkNaming>>,
        framework: Option<SmolStr>,
    ) -> Self {
        Self {
            sources,
            merged: OnceCell::new(),
            frameworks,
            framework,
        }
    }

    fn rules(&self) -> &NameConversionRules {
        self.merged.get_or_init(|| {
            tracing::trace!("[NAMING] merging {} rule source(s)", self.sources.len());
            NameConversionRules::merge(&self.sources)
        })
    }

    fn framework_naming(&self) -> Option<&dyn FrameworkNaming> {
        let framework = self.framework.as_ref()?;
        self.frameworks.get(framework).map(|naming| &**naming)
    }

    /// Sum of the framework naming providers' modification counts.
    pub fn modification_count(&self) -> u64 {
        self.frameworks.values().map(|naming| naming.modification_count()).sum()
    }

    fn convert(&self, chain: &[NameTarget], name: &QualifiedName) -> Vec<SmolStr> {
        let rules = self.rules();
        for &target in chain {
            if let Some(converter) = rules.table(target).get(name.qualified_kind()) {
                let names = converter.convert(name.name());
                if !names.is_empty() {
                    return names;
                }
            }
        }
        if let Some(framework) = self.framework_naming() {
            let names = chain
                .iter()
                .filter_map(|&target| framework.names(target, name))
                .find(|names| !names.is_empty());
            if let Some(names) = names {
                return names;
            }
        }
        vec![last_resort(name)]
    }

    /// Canonical name used for de-duplication and grouping.
    pub fn storage_name(&self, name: &QualifiedName) -> SmolStr {
        self.convert(&[NameTarget::Storage], name)
            .into_iter()
            .next()
            .unwrap_or_else(|| last_resort(name))
    }

    /// Forms compared when matching query names.
    pub fn match_names(&self, name: &QualifiedName) -> Vec<SmolStr> {
        self.convert(&[NameTarget::Match, NameTarget::Storage], name)
    }

    /// Strings offered to the user in completion.
    pub fn completion_variants(&self, name: &QualifiedName) -> Vec<SmolStr> {
        self.convert(&[NameTarget::CompletionVariants], name)
    }

    pub fn rename_variants(&self, name: &QualifiedName) -> Vec<SmolStr> {
        self.convert(
            &[NameTarget::Rename, NameTarget::Match, NameTarget::Storage],
            name,
        )
    }

    /// True when the match forms of the two names intersect.
    pub fn names_match(&self, symbol: &QualifiedName, query: &QualifiedName) -> bool {
        if symbol.qualified_kind() != query.qualified_kind() {
            return false;
        }
        let query_names = self.match_names(query);
        self.match_names(symbol)
            .iter()
            .any(|name| query_names.contains(name))
    }

    /// Adjust `new_name` to the form of `occurrence` for a rename of `name`.
    ///
    /// When renaming `fooBar` to `bazQux`, an occurrence written `foo-bar`
    /// becomes `baz-qux` if both names have the same number of rename
    /// variants.
    pub fn adjust_rename(&self, name: &QualifiedName, new_name: &str, occurrence: &str) -> SmolStr {
        if occurrence == name.name() {
            return SmolStr::from(new_name);
        }
        let old_variants = self.rename_variants(name);
        let Some(index) = old_variants.iter().position(|variant| variant == occurrence) else {
            return SmolStr::from(new_name);
        };
        let new_variants = self.rename_variants(&name.with_name(new_name));
        if new_variants.len() == old_variants.len() {
            new_variants[index].clone()
        } else {
            SmolStr::from(new_name)
        }
    }
}

fn last_resort(name: &QualifiedName) -> SmolStr {
    if namespaces::is_structural(name.namespace()) {
        SmolStr::from(name.name().to_lowercase())
    } else {
        SmolStr::from(name.name())
    }
}

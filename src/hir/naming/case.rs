//! Name cases and case-based converters.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use smol_str::SmolStr;

use super::NameConverter;

/// A naming convention a name can be converted into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NameCase {
    AsIs,
    Lowercase,
    Uppercase,
    PascalCase,
    CamelCase,
    KebabCase,
    SnakeCase,
}

impl NameCase {
    pub const ALL: [NameCase; 7] = [
        NameCase::AsIs,
        NameCase::Lowercase,
        NameCase::Uppercase,
        NameCase::PascalCase,
        NameCase::CamelCase,
        NameCase::KebabCase,
        NameCase::SnakeCase,
    ];

    /// The identifier used in declarative configuration.
    pub fn id(self) -> &'static str {
        match self {
            NameCase::AsIs => "as-is",
            NameCase::Lowercase => "lowercase",
            NameCase::Uppercase => "UPPERCASE",
            NameCase::PascalCase => "PascalCase",
            NameCase::CamelCase => "camelCase",
            NameCase::KebabCase => "kebab-case",
            NameCase::SnakeCase => "snake_case",
        }
    }

    pub fn apply(self, name: &str) -> SmolStr {
        match self {
            NameCase::AsIs => SmolStr::from(name),
            NameCase::Lowercase => SmolStr::from(name.to_lowercase()),
            NameCase::Uppercase => SmolStr::from(name.to_uppercase()),
            NameCase::PascalCase => words(name).iter().map(|w| capitalize(w)).collect(),
            NameCase::CamelCase => words(name)
                .iter()
                .enumerate()
                .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
                .collect(),
            NameCase::KebabCase => SmolStr::from(lowercase_words(name).join("-")),
            NameCase::SnakeCase => SmolStr::from(lowercase_words(name).join("_")),
        }
    }
}

impl fmt::Display for NameCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for NameCase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NameCase::ALL
            .into_iter()
            .find(|case| case.id() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl NameConverter for NameCase {
    fn convert(&self, name: &str) -> Vec<SmolStr> {
        vec![self.apply(name)]
    }
}

/// Converts a name into each of the listed cases, in order, without
/// duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CaseConverter(pub Vec<NameCase>);

impl CaseConverter {
    pub fn new(cases: impl IntoIterator<Item = NameCase>) -> Self {
        Self(cases.into_iter().collect())
    }
}

impl NameConverter for CaseConverter {
    fn convert(&self, name: &str) -> Vec<SmolStr> {
        self.0
            .iter()
            .map(|case| case.apply(name))
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Split a name into words on separators and case transitions.
///
/// `fooBar`, `foo-bar`, `foo_bar` and `FooBar` all give `[foo|Foo, bar|Bar]`;
/// acronyms stay together (`HTMLElement` → `HTML`, `Element`).
pub(crate) fn words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '-' | '_' | ' ' | '.') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn lowercase_words(name: &str) -> Vec<String> {
    words(name).iter().map(|w| w.to_lowercase()).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

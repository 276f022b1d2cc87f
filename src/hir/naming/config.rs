//! Declarative name-conversion rules loaded from JSON.
//!
//! ```json
//! { "storage": { "html/tag": ["lowercase"] },
//!   "match": { "js/props": ["as-is", "kebab-case"] },
//!   "completion": { "js/props": ["camelCase", "kebab-case"] },
//!   "rename": { "js/props": ["camelCase", "kebab-case"] } }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use super::{CaseConverter, NameCase, NameConversionRules, NameTarget};
use crate::base::QualifiedKind;

/// Errors loading declarative name-conversion rules.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON or unexpected keys.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A table key that is not of the form `namespace/kind`.
    #[error("Invalid qualified kind: {0}")]
    InvalidKind(String),

    /// A case identifier that names no [`NameCase`].
    #[error("Unknown name case: {0}")]
    UnknownCase(String),
}

type RawTable = BTreeMap<String, Vec<String>>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRules {
    #[serde(default)]
    storage: RawTable,
    #[serde(default, rename = "match")]
    matching: RawTable,
    #[serde(default)]
    completion: RawTable,
    #[serde(default)]
    rename: RawTable,
}

impl NameConversionRules {
    /// Parse rules from their JSON form.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawRules = serde_json::from_str(json)?;
        let mut rules = NameConversionRules::new();
        for (target, table) in [
            (NameTarget::Storage, raw.storage),
            (NameTarget::Match, raw.matching),
            (NameTarget::CompletionVariants, raw.completion),
            (NameTarget::Rename, raw.rename),
        ] {
            for (kind, cases) in table {
                let kind = QualifiedKind::parse(&kind).ok_or(ConfigError::InvalidKind(kind))?;
                let cases = cases
                    .iter()
                    .map(|case| case.parse::<NameCase>().map_err(ConfigError::UnknownCase))
                    .collect::<Result<Vec<_>, _>>()?;
                rules = match target {
                    NameTarget::Storage => rules.with_storage(kind, CaseConverter(cases)),
                    NameTarget::Match => rules.with_match(kind, CaseConverter(cases)),
                    NameTarget::CompletionVariants => {
                        rules.with_completion_variants(kind, CaseConverter(cases))
                    }
                    NameTarget::Rename => rules.with_rename(kind, CaseConverter(cases)),
                };
            }
        }
        tracing::debug!("[NAMING] loaded declarative rules");
        Ok(rules)
    }
}

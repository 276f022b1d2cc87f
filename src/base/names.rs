//! Qualified kinds and qualified names.

use std::fmt;

use smol_str::SmolStr;

/// Built-in namespaces.
///
/// `HTML` and `CSS` are the structural namespaces: names in them are
/// case-insensitive, so the last-resort name conversion lower-cases them.
pub mod namespaces {
    pub const HTML: &str = "html";
    pub const CSS: &str = "css";
    pub const JS: &str = "js";

    /// Returns true for namespaces whose names compare case-insensitively.
    pub fn is_structural(namespace: &str) -> bool {
        namespace == HTML || namespace == CSS
    }
}

/// A `(namespace, kind)` pair classifying a symbol's category.
///
/// Immutable and cheap to clone; used as a map key throughout the engine.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedKind {
    namespace: SmolStr,
    kind: SmolStr,
}

impl QualifiedKind {
    /// Create a new qualified kind.
    pub fn new(namespace: impl Into<SmolStr>, kind: impl Into<SmolStr>) -> Self {
        Self {
            namespace: namespace.into(),
            kind: kind.into(),
        }
    }

    /// Parse the `"namespace/kind"` notation used in declarative configuration.
    pub fn parse(text: &str) -> Option<Self> {
        let (namespace, kind) = text.split_once('/')?;
        if namespace.is_empty() || kind.is_empty() || kind.contains('/') {
            return None;
        }
        Some(Self::new(namespace, kind))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Attach a name to this kind.
    pub fn with_name(&self, name: impl Into<SmolStr>) -> QualifiedName {
        QualifiedName::new(self.clone(), name)
    }
}

impl fmt::Debug for QualifiedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.kind)
    }
}

impl fmt::Display for QualifiedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.kind)
    }
}

/// A qualified kind plus a literal name.
///
/// The name may be empty only as a path terminator (e.g. the segment being
/// completed when nothing has been typed yet).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
    kind: QualifiedKind,
    name: SmolStr,
}

impl QualifiedName {
    pub fn new(kind: QualifiedKind, name: impl Into<SmolStr>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn qualified_kind(&self) -> &QualifiedKind {
        &self.kind
    }

    pub fn namespace(&self) -> &str {
        self.kind.namespace()
    }

    pub fn kind(&self) -> &str {
        self.kind.kind()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same kind, different name.
    pub fn with_name(&self, name: impl Into<SmolStr>) -> Self {
        Self::new(self.kind.clone(), name)
    }

    pub fn matches_kind(&self, kind: &QualifiedKind) -> bool {
        &self.kind == kind
    }
}

impl fmt::Debug for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

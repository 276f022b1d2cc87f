//! Foundation types for the query engine.
//!
//! This module provides the primitives every other layer builds on:
//! - [`QualifiedKind`], [`QualifiedName`] - Symbol classification and names
//! - [`Priority`] - Total order used to rank competing matches
//! - [`Modifier`], [`ModifierSet`] - Symbol modifiers (abstract, virtual, ...)
//! - [`Context`] - Read-only query context (e.g. the active framework)
//!
//! This module has NO dependencies on other crate modules.

mod context;
mod modifiers;
mod names;
mod priority;

pub use context::{Context, ContextKind};
pub use modifiers::{Modifier, ModifierSet};
pub use names::{QualifiedKind, QualifiedName, namespaces};
pub use priority::Priority;

// Re-export the string type used for all names
pub use smol_str::SmolStr;

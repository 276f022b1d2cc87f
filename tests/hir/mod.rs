//! HIR layer tests
//!
//! Tests for the semantic model:
//! - Match construction and select-best ranking
//! - Name conversion (cases, fallbacks, rename adjustment)
//! - Pattern expansion and matching

pub mod tests_matches;
pub mod tests_naming;
pub mod tests_patterns;

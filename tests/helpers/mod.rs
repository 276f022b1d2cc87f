//! Shared test helpers: symbol fixtures, instrumented scopes and observers.

pub mod fixtures;
pub mod scopes;

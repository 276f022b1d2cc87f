//! Structural identity for trait objects.
//!
//! Scopes, patterns and customizers are supplied by collaborators as trait
//! objects, yet the engine needs them to behave like values: scope sets are
//! unioned, results are de-duplicated and the recursion guard keys on them.
//! Implementors simply derive `PartialEq, Eq, Hash`; the blanket impl below
//! lifts that to `dyn` comparisons that also take the concrete type into
//! account.

use std::any::{Any, TypeId};
use std::hash::{Hash, Hasher};

/// Type-aware equality and hashing for trait objects.
pub trait DynIdentity: Any {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn Any) -> bool;
    fn dyn_hash(&self, state: &mut dyn Hasher);
}

impl<T: Any + PartialEq + Eq + Hash> DynIdentity for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }
}

/// Implement `PartialEq`, `Eq` and `Hash` for a `dyn Trait` whose trait
/// extends [`DynIdentity`].
macro_rules! impl_dyn_identity {
    ($trait:ident) => {
        impl PartialEq for dyn $trait {
            fn eq(&self, other: &Self) -> bool {
                self.dyn_eq(other.as_any())
            }
        }

        impl Eq for dyn $trait {}

        impl std::hash::Hash for dyn $trait {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.dyn_hash(state);
            }
        }
    };
}

pub(crate) use impl_dyn_identity;

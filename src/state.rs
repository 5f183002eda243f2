//! # Persistent Parse State
//!
//! Side state that semantic predicates read and update while a grammar
//! matches: backreference captures, boolean flags and per-key string sets.
//!
//! ## Properties
//!
//! Every state type here is:
//!
//! - **Immutable**: updates return a new value; existing values never change,
//!   so sibling branches explored during backtracking can share them freely.
//! - **Pre-hashed**: each value carries a [`Digest`] computed when it was built.
//!   Equality and `Hash` go through that digest only.
//! - **Identity preserving**: an update that would not change the logical
//!   contents returns the same instance. [`HashState::has_changed`] is then a
//!   pointer comparison instead of a deep one.
//!
//! Each kind salts its digests with its own scope token (see [`scope`]), so
//! equal raw contents in different kinds never collide.

use crate::hashing::Digest;

/// Contract shared by all persistent state kinds.
pub trait HashState: Clone {
    /// The precomputed structural fingerprint of this value.
    fn digest(&self) -> Digest;

    /// Whether this is the empty instance of its kind.
    fn is_empty(&self) -> bool;

    /// Whether `self` and `other` are the same instance, not merely equal.
    fn ptr_eq(&self, other: &Self) -> bool;

    /// Whether an update produced a new instance.
    fn has_changed(original: &Self, current: &Self) -> bool {
        !original.ptr_eq(current)
    }
}

/// Implements `PartialEq`, `Eq` and `Hash` through [`HashState::digest`].
macro_rules! digest_identity {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::state::HashState::digest(self) == $crate::state::HashState::digest(other)
            }
        }

        impl Eq for $ty {}

        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(&$crate::state::HashState::digest(self), state);
            }
        }
    };
}

pub(crate) use digest_identity;

pub mod backref;
pub mod bools;
pub mod parse_state;
pub mod scope;
pub mod sets;

pub use backref::BackrefState;
pub use bools::BoolState;
pub use parse_state::ParseState;
pub use sets::{SetState, StringSet};

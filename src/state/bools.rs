use std::fmt;
use std::sync::Arc;

use im::OrdSet;
use once_cell::sync::Lazy;

use super::{digest_identity, scope, HashState};
use crate::hashing::{Digest, Hasher};

static SCOPE: Lazy<Digest> = Lazy::new(|| scope::mint("bools"));

static EMPTY: Lazy<BoolState> = Lazy::new(|| {
    BoolState(Arc::new(BoolInner {
        digest: *SCOPE,
        flags: OrdSet::new(),
    }))
});

/// The set of flag ids that have fired.
#[derive(Clone)]
pub struct BoolState(Arc<BoolInner>);

struct BoolInner {
    digest: Digest,
    flags: OrdSet<i32>,
}

impl BoolState {
    /// The shared empty instance.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.0.flags.contains(&id)
    }

    /// Marks `id` as set. Returns `self` unchanged if it already was.
    pub fn add(&self, hasher: &mut Hasher, id: i32) -> Self {
        if self.contains(id) {
            return self.clone();
        }
        Self::create(hasher, self.0.flags.update(id))
    }

    pub fn len(&self) -> usize {
        self.0.flags.len()
    }

    /// Flag ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.flags.iter().copied()
    }

    fn create(hasher: &mut Hasher, flags: OrdSet<i32>) -> Self {
        if flags.is_empty() {
            return Self::empty();
        }
        hasher.append_digest(&SCOPE);
        for id in flags.iter() {
            hasher.append_i32(*id);
        }
        Self(Arc::new(BoolInner {
            digest: hasher.finish_and_reset(),
            flags,
        }))
    }
}

impl HashState for BoolState {
    fn digest(&self) -> Digest {
        self.0.digest
    }

    fn is_empty(&self) -> bool {
        self.0.flags.is_empty()
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

digest_identity!(BoolState);

impl Default for BoolState {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for BoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoolState")
            .field("digest", &self.0.digest)
            .field("flags", &self.0.flags)
            .finish()
    }
}

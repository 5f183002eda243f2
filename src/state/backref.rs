use std::fmt;
use std::sync::Arc;

use im::OrdMap;
use once_cell::sync::Lazy;

use super::{digest_identity, scope, HashState};
use crate::hashing::{Digest, Hasher};
use crate::text::InputRange;

static SCOPE: Lazy<Digest> = Lazy::new(|| scope::mint("backrefs"));

static EMPTY: Lazy<BackrefState> = Lazy::new(|| {
    BackrefState(Arc::new(BackrefInner {
        digest: *SCOPE,
        captures: OrdMap::new(),
    }))
});

/// Backreference captures: capture id to the input range it matched.
#[derive(Clone)]
pub struct BackrefState(Arc<BackrefInner>);

struct BackrefInner {
    digest: Digest,
    captures: OrdMap<i32, InputRange>,
}

impl BackrefState {
    /// The shared empty instance.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    pub fn try_get(&self, id: i32) -> Option<InputRange> {
        self.0.captures.get(&id).copied()
    }

    /// Records `range` under `id`, replacing any earlier capture.
    /// Returns `self` unchanged if `id` already maps to `range`.
    pub fn add(&self, hasher: &mut Hasher, id: i32, range: InputRange) -> Self {
        if self.try_get(id) == Some(range) {
            return self.clone();
        }
        Self::create(hasher, self.0.captures.update(id, range))
    }

    pub fn len(&self) -> usize {
        self.0.captures.len()
    }

    /// Captures in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, InputRange)> + '_ {
        self.0.captures.iter().map(|(id, range)| (*id, *range))
    }

    fn create(hasher: &mut Hasher, captures: OrdMap<i32, InputRange>) -> Self {
        if captures.is_empty() {
            return Self::empty();
        }
        hasher.append_digest(&SCOPE);
        for (id, range) in captures.iter() {
            hasher.append_i32(*id);
            hasher.append_usize(range.start());
            hasher.append_usize(range.end());
        }
        Self(Arc::new(BackrefInner {
            digest: hasher.finish_and_reset(),
            captures,
        }))
    }
}

impl HashState for BackrefState {
    fn digest(&self) -> Digest {
        self.0.digest
    }

    fn is_empty(&self) -> bool {
        self.0.captures.is_empty()
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

digest_identity!(BackrefState);

impl Default for BackrefState {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for BackrefState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackrefState")
            .field("digest", &self.0.digest)
            .field("captures", &self.0.captures)
            .finish()
    }
}

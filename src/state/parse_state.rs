use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::{digest_identity, scope, BackrefState, BoolState, HashState, SetState};
use crate::hashing::{Digest, Hasher};
use crate::text::InputRange;

static SCOPE: Lazy<Digest> = Lazy::new(|| scope::mint("parse-state"));

static EMPTY: Lazy<ParseState> = Lazy::new(|| {
    ParseState(Arc::new(ParseInner {
        digest: *SCOPE,
        backrefs: BackrefState::empty(),
        sets: SetState::empty(),
        bools: BoolState::empty(),
    }))
});

/// All side state threaded through one parse.
///
/// Updates are rebuilt only when the touched partition actually changed, so a
/// no-op update anywhere hands back this same instance.
#[derive(Clone)]
pub struct ParseState(Arc<ParseInner>);

struct ParseInner {
    digest: Digest,
    backrefs: BackrefState,
    sets: SetState,
    bools: BoolState,
}

impl ParseState {
    /// The shared empty instance.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    pub fn backrefs(&self) -> &BackrefState {
        &self.0.backrefs
    }

    pub fn sets(&self) -> &SetState {
        &self.0.sets
    }

    pub fn bools(&self) -> &BoolState {
        &self.0.bools
    }

    pub fn backref_try_get(&self, id: i32) -> Option<InputRange> {
        self.0.backrefs.try_get(id)
    }

    pub fn backref_add(&self, hasher: &mut Hasher, id: i32, range: InputRange) -> Self {
        let backrefs = self.0.backrefs.add(hasher, id, range);
        if backrefs.ptr_eq(&self.0.backrefs) {
            return self.clone();
        }
        Self::create(hasher, backrefs, self.0.sets.clone(), self.0.bools.clone())
    }

    pub fn set_contains(&self, id: i32, value: &str) -> bool {
        self.0.sets.contains(id, value)
    }

    pub fn set_add(&self, hasher: &mut Hasher, id: i32, value: &str) -> Self {
        let sets = self.0.sets.add(hasher, id, value);
        if sets.ptr_eq(&self.0.sets) {
            return self.clone();
        }
        Self::create(hasher, self.0.backrefs.clone(), sets, self.0.bools.clone())
    }

    pub fn bool_contains(&self, id: i32) -> bool {
        self.0.bools.contains(id)
    }

    pub fn bool_add(&self, hasher: &mut Hasher, id: i32) -> Self {
        let bools = self.0.bools.add(hasher, id);
        if bools.ptr_eq(&self.0.bools) {
            return self.clone();
        }
        Self::create(hasher, self.0.backrefs.clone(), self.0.sets.clone(), bools)
    }

    fn create(hasher: &mut Hasher, backrefs: BackrefState, sets: SetState, bools: BoolState) -> Self {
        if backrefs.is_empty() && sets.is_empty() && bools.is_empty() {
            return Self::empty();
        }
        hasher.append_digest(&SCOPE);
        hasher.append_digest(&backrefs.digest());
        hasher.append_digest(&sets.digest());
        hasher.append_digest(&bools.digest());
        Self(Arc::new(ParseInner {
            digest: hasher.finish_and_reset(),
            backrefs,
            sets,
            bools,
        }))
    }
}

impl HashState for ParseState {
    fn digest(&self) -> Digest {
        self.0.digest
    }

    fn is_empty(&self) -> bool {
        self.0.backrefs.is_empty() && self.0.sets.is_empty() && self.0.bools.is_empty()
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

digest_identity!(ParseState);

impl Default for ParseState {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseState")
            .field("digest", &self.0.digest)
            .field("backrefs", &self.0.backrefs)
            .field("sets", &self.0.sets)
            .field("bools", &self.0.bools)
            .finish()
    }
}

use std::fmt;
use std::sync::Arc;

use im::{OrdMap, OrdSet};
use once_cell::sync::Lazy;

use super::{digest_identity, scope, HashState};
use crate::hashing::{Digest, Hasher};

static SET_SCOPE: Lazy<Digest> = Lazy::new(|| scope::mint("sets"));
static MEMBER_SCOPE: Lazy<Digest> = Lazy::new(|| scope::mint("set-members"));

static EMPTY: Lazy<SetState> = Lazy::new(|| {
    SetState(Arc::new(SetInner {
        digest: *SET_SCOPE,
        sets: OrdMap::new(),
    }))
});

// ============================================================================
// STRING SET: the members of one keyed set
// ============================================================================

/// An ordered set of strings compared ordinally (byte-wise, case-sensitive).
///
/// Never empty: a set with no members is represented by its key being absent
/// from the owning [`SetState`].
#[derive(Clone)]
pub struct StringSet(Arc<StringSetInner>);

struct StringSetInner {
    digest: Digest,
    members: OrdSet<Arc<str>>,
}

impl StringSet {
    fn unit(hasher: &mut Hasher, value: &str) -> Self {
        Self::create(hasher, OrdSet::unit(Arc::from(value)))
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.members.contains(value)
    }

    fn add(&self, hasher: &mut Hasher, value: &str) -> Self {
        if self.contains(value) {
            return self.clone();
        }
        Self::create(hasher, self.0.members.update(Arc::from(value)))
    }

    pub fn len(&self) -> usize {
        self.0.members.len()
    }

    /// Members in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.members.iter().map(|m| m.as_ref())
    }

    fn create(hasher: &mut Hasher, members: OrdSet<Arc<str>>) -> Self {
        debug_assert!(!members.is_empty(), "keyed string sets are never empty");
        hasher.append_digest(&MEMBER_SCOPE);
        for member in members.iter() {
            hasher.append_usize(member.len());
            hasher.append_str(member);
        }
        Self(Arc::new(StringSetInner {
            digest: hasher.finish_and_reset(),
            members,
        }))
    }
}

impl HashState for StringSet {
    fn digest(&self) -> Digest {
        self.0.digest
    }

    fn is_empty(&self) -> bool {
        self.0.members.is_empty()
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

digest_identity!(StringSet);

impl fmt::Debug for StringSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// ============================================================================
// SET STATE: keyed string sets
// ============================================================================

/// Named semantic sets: set id to the strings recorded in it.
#[derive(Clone)]
pub struct SetState(Arc<SetInner>);

struct SetInner {
    digest: Digest,
    sets: OrdMap<i32, StringSet>,
}

impl SetState {
    /// The shared empty instance.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    pub fn contains(&self, id: i32, value: &str) -> bool {
        self.0.sets.get(&id).is_some_and(|set| set.contains(value))
    }

    /// The members recorded under `id`, if any.
    pub fn get(&self, id: i32) -> Option<&StringSet> {
        self.0.sets.get(&id)
    }

    /// Adds `value` to set `id`. Returns `self` unchanged if it was present.
    pub fn add(&self, hasher: &mut Hasher, id: i32, value: &str) -> Self {
        let updated = match self.0.sets.get(&id) {
            None => StringSet::unit(hasher, value),
            Some(set) => {
                let grown = set.add(hasher, value);
                if grown.ptr_eq(set) {
                    return self.clone();
                }
                grown
            }
        };
        Self::create(hasher, self.0.sets.update(id, updated))
    }

    pub fn len(&self) -> usize {
        self.0.sets.len()
    }

    /// Keyed sets in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &StringSet)> + '_ {
        self.0.sets.iter().map(|(id, set)| (*id, set))
    }

    fn create(hasher: &mut Hasher, sets: OrdMap<i32, StringSet>) -> Self {
        if sets.is_empty() {
            return Self::empty();
        }
        hasher.append_digest(&SET_SCOPE);
        for (id, set) in sets.iter() {
            hasher.append_i32(*id);
            hasher.append_digest(&set.digest());
        }
        Self(Arc::new(SetInner {
            digest: hasher.finish_and_reset(),
            sets,
        }))
    }
}

impl HashState for SetState {
    fn digest(&self) -> Digest {
        self.0.digest
    }

    fn is_empty(&self) -> bool {
        self.0.sets.is_empty()
    }

    fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

digest_identity!(SetState);

impl Default for SetState {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for SetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetState")
            .field("digest", &self.0.digest)
            .field("sets", &self.0.sets)
            .finish()
    }
}

// tests/state_tests.rs

use std::collections::{BTreeMap, BTreeSet};

use pegleg::state::StringSet;
use pegleg::{BackrefState, BoolState, HashState, Hasher, InputRange, ParseState, SetState};
use pretty_assertions::{assert_eq, assert_ne};
use proptest::prelude::*;

// ---
// Scenarios
// ---

#[test]
fn set_state_membership_is_ordinal_and_keyed() {
    let mut hasher = Hasher::new();
    let state = SetState::empty().add(&mut hasher, 2, "foo");
    assert!(state.contains(2, "foo"));
    assert!(!state.contains(2, "Foo"));
    assert!(!state.contains(3, "foo"));
}

#[test]
fn backref_state_lookup() {
    let mut hasher = Hasher::new();
    let state = BackrefState::empty().add(&mut hasher, 1, InputRange::new(0, 3));
    assert_eq!(state.try_get(1), Some(InputRange::new(0, 3)));
    assert_eq!(state.try_get(2), None);
}

#[test]
#[should_panic(expected = "ends before it starts")]
fn inverted_capture_range_cannot_be_built() {
    let mut hasher = Hasher::new();
    let _ = BackrefState::empty().add(&mut hasher, 1, InputRange::new(5, 2));
}

#[test]
fn checked_capture_range_rejects_inversion() {
    assert_eq!(InputRange::try_new(5, 2), None);
    let range = InputRange::try_new(2, 5).unwrap();
    let mut hasher = Hasher::new();
    let state = BackrefState::empty().add(&mut hasher, 1, range);
    assert_eq!(state.try_get(1).map(|r| r.len()), Some(3));
}

// ---
// Identity preservation
// ---

#[test]
fn noop_updates_preserve_identity_at_every_level() {
    let mut hasher = Hasher::new();

    let bools = BoolState::empty().add(&mut hasher, 5);
    assert!(bools.add(&mut hasher, 5).ptr_eq(&bools));

    let sets = SetState::empty().add(&mut hasher, 1, "x");
    assert!(sets.add(&mut hasher, 1, "x").ptr_eq(&sets));

    let range = InputRange::new(4, 9);
    let backrefs = BackrefState::empty().add(&mut hasher, 3, range);
    assert!(backrefs.add(&mut hasher, 3, range).ptr_eq(&backrefs));

    let state = ParseState::empty()
        .bool_add(&mut hasher, 5)
        .set_add(&mut hasher, 1, "x")
        .backref_add(&mut hasher, 3, range);
    let same = state
        .bool_add(&mut hasher, 5)
        .set_add(&mut hasher, 1, "x")
        .backref_add(&mut hasher, 3, range);
    assert!(same.ptr_eq(&state));
    assert!(!ParseState::has_changed(&state, &same));
}

#[test]
fn equal_but_distinct_instances_compare_equal() {
    let mut hasher = Hasher::new();
    let a = BoolState::empty().add(&mut hasher, 1);
    let b = BoolState::empty().add(&mut hasher, 1);
    assert!(!a.ptr_eq(&b));
    assert_eq!(a, b);
    assert!(BoolState::has_changed(&a, &b));
}

#[test]
fn empty_state_is_a_singleton() {
    assert!(ParseState::empty().ptr_eq(&ParseState::empty()));
    assert!(ParseState::empty().backrefs().ptr_eq(&BackrefState::empty()));
    assert!(ParseState::empty().sets().ptr_eq(&SetState::empty()));
    assert!(ParseState::empty().bools().ptr_eq(&BoolState::empty()));
}

// ---
// Digest discrimination
// ---

#[test]
fn empty_kinds_have_distinct_digests() {
    let digests = [
        BackrefState::empty().digest(),
        SetState::empty().digest(),
        BoolState::empty().digest(),
        ParseState::empty().digest(),
    ];
    let unique: std::collections::HashSet<_> = digests.iter().collect();
    assert_eq!(unique.len(), digests.len());
}

#[test]
fn same_raw_contents_in_different_kinds_differ() {
    let mut hasher = Hasher::new();
    let bools = BoolState::empty().add(&mut hasher, 1);
    let flagged = ParseState::empty().bool_add(&mut hasher, 1);
    let captured = ParseState::empty().backref_add(&mut hasher, 1, InputRange::new(0, 0));
    assert_ne!(bools.digest(), flagged.digest());
    assert_ne!(flagged.digest(), captured.digest());
}

#[test]
fn states_work_as_hash_map_keys() {
    let mut hasher = Hasher::new();
    let mut seen = std::collections::HashMap::new();
    let a = ParseState::empty().set_add(&mut hasher, 1, "k");
    let b = ParseState::empty().set_add(&mut hasher, 1, "k");
    seen.insert(a, "first");
    assert_eq!(seen.get(&b), Some(&"first"));
}

#[test]
fn states_are_shareable_across_threads() {
    let mut hasher = Hasher::new();
    let state = ParseState::empty().set_add(&mut hasher, 1, "shared");
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let state = state.clone();
            std::thread::spawn(move || {
                let mut hasher = Hasher::new();
                let grown = state.bool_add(&mut hasher, i);
                (state.set_contains(1, "shared"), grown.bool_contains(i))
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), (true, true));
    }
    assert!(state.bools().iter().next().is_none());
}

#[test]
fn string_sets_are_exposed_read_only() {
    let mut hasher = Hasher::new();
    let state = SetState::empty()
        .add(&mut hasher, 4, "b")
        .add(&mut hasher, 4, "a");
    let set: &StringSet = state.get(4).unwrap();
    assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    assert!(!set.is_empty());
}

// ---
// Digest determinism
// ---

fn build_sets(entries: &[(i32, String)]) -> SetState {
    let mut hasher = Hasher::new();
    entries
        .iter()
        .fold(SetState::empty(), |s, (id, v)| s.add(&mut hasher, *id, v))
}

proptest! {
    #[test]
    fn set_digest_ignores_insertion_order(
        entries in proptest::collection::vec((0i32..4, "[a-c]{0,3}"), 0..24)
    ) {
        let forward = build_sets(&entries);
        let mut reversed = entries.clone();
        reversed.reverse();
        let backward = build_sets(&reversed);
        prop_assert_eq!(forward.digest(), backward.digest());

        let expected: BTreeSet<_> = entries.iter().cloned().collect();
        for (id, value) in &expected {
            prop_assert!(forward.contains(*id, value));
        }
    }

    #[test]
    fn bool_digest_ignores_insertion_order(ids in proptest::collection::vec(-8i32..8, 0..24)) {
        let mut hasher = Hasher::new();
        let forward = ids.iter().fold(BoolState::empty(), |s, id| s.add(&mut hasher, *id));
        let backward = ids.iter().rev().fold(BoolState::empty(), |s, id| s.add(&mut hasher, *id));
        prop_assert_eq!(forward.digest(), backward.digest());
        prop_assert_eq!(forward.is_empty(), ids.is_empty());
    }

    #[test]
    fn backref_digest_ignores_insertion_order(
        captures in proptest::collection::btree_map(0i32..16, (0usize..50, 0usize..10), 0..12)
    ) {
        let captures: BTreeMap<i32, InputRange> = captures
            .into_iter()
            .map(|(id, (start, len))| (id, InputRange::new(start, start + len)))
            .collect();
        let mut hasher = Hasher::new();
        let forward = captures
            .iter()
            .fold(BackrefState::empty(), |s, (id, r)| s.add(&mut hasher, *id, *r));
        let backward = captures
            .iter()
            .rev()
            .fold(BackrefState::empty(), |s, (id, r)| s.add(&mut hasher, *id, *r));
        prop_assert_eq!(forward.digest(), backward.digest());
        prop_assert_eq!(forward.len(), captures.len());
    }

    #[test]
    fn composite_digest_ignores_update_order(flag in 0i32..100, word in "[a-z]{1,8}") {
        let mut hasher = Hasher::new();
        let one = ParseState::empty()
            .bool_add(&mut hasher, flag)
            .set_add(&mut hasher, 0, &word);
        let two = ParseState::empty()
            .set_add(&mut hasher, 0, &word)
            .bool_add(&mut hasher, flag);
        prop_assert_eq!(one, two);
    }
}

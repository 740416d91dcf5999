// Free map tests.
// Unwrapping is okay here, since we want unexpected outcomes to fail tests.
#![allow(clippy::unwrap_used)]

// Imports

use test_log::test; // We want to see logs while testing.

use super::free_map::FreeMap;

// Tests

#[test]
fn starts_fully_used() {
    let map = FreeMap::all_used(64);
    assert_eq!(map.len(), 64, "every slot tracked");
    assert_eq!(map.count_free(), 0, "nothing free until proven otherwise");
    assert_eq!(map.first_free_from(0), None, "nothing to find either");
}

#[test]
fn allocation_is_lowest_first() {
    let mut map = FreeMap::all_used(16);
    for slot in 4..16 {
        map.set_free(slot);
    }

    assert_eq!(map.allocate_from(0), Some(4), "lowest free slot wins");
    assert_eq!(map.allocate_from(0), Some(5), "then the next one");
    assert_eq!(map.count_free(), 10, "two slots claimed");
}

#[test]
fn allocation_respects_the_floor() {
    let mut map = FreeMap::all_used(16);
    for slot in 0..16 {
        map.set_free(slot);
    }

    // Slots below the floor stay untouchable even though they are free.
    assert_eq!(map.allocate_from(6), Some(6), "floor slot is the first candidate");
    assert_eq!(map.allocate_from(6), Some(7), "free slots below 6 are ignored");
    assert!(map.is_free(0), "low slots were never claimed");
}

#[test]
fn freed_holes_get_reused() {
    let mut map = FreeMap::all_used(8);
    for slot in 2..8 {
        map.set_free(slot);
    }
    let a = map.allocate_from(2).unwrap();
    let b = map.allocate_from(2).unwrap();
    let _c = map.allocate_from(2).unwrap();
    assert_eq!((a, b), (2, 3), "deterministic low-first allocation");

    // Punch a hole and watch it get filled before anything higher.
    map.set_free(b);
    assert_eq!(map.allocate_from(2), Some(b), "the hole is the lowest free slot");
}

#[test]
fn exhaustion_returns_none() {
    let mut map = FreeMap::all_used(4);
    map.set_free(3);
    assert_eq!(map.allocate_from(0), Some(3), "the last slot goes first");
    assert_eq!(map.allocate_from(0), None, "and then there were none");
}

#[test]
fn count_matches_membership() {
    let mut map = FreeMap::all_used(32);
    map.set_free(1);
    map.set_free(17);
    map.set_free(31);
    assert_eq!(map.count_free(), 3, "count agrees with the marks");

    map.set_used(17);
    assert_eq!(map.count_free(), 2, "and tracks un-freeing");
}

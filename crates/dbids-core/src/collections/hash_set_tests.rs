//! Tests for `hash_set` module

use super::*;
use crate::dbid::Dbid;
use crate::range::DbidRange;

#[test]
fn test_add_ignores_duplicates() {
    let mut set = HashSetModifiableDbids::new();
    assert!(set.add(&1));
    assert!(!set.add(&1));
    assert!(set.add(&2));
    assert_eq!(set.len(), 2);
    assert!(set.has_fast_contains());
}

#[test]
fn test_remove() {
    let mut set: HashSetModifiableDbids = [1, 2, 3].into_iter().map(Dbid::new).collect();
    assert!(set.remove(&2));
    assert!(!set.remove(&2));
    assert!(!set.contains(&2));
    assert!(set.contains(&3));
}

#[test]
fn test_add_all_and_remove_all() {
    let mut set = HashSetModifiableDbids::new();
    let range = DbidRange::new(0, 10).expect("valid range");

    assert!(set.add_all(&range));
    assert!(!set.add_all(&range));
    assert_eq!(set.len(), 10);

    let evens: HashSetModifiableDbids = (0..20).filter(|i| i % 2 == 0).map(Dbid::new).collect();
    assert!(set.remove_all(&evens));
    assert_eq!(set.len(), 5);
    assert!(!set.remove_all(&evens));
}

#[test]
fn test_retain_all() {
    let mut set: HashSetModifiableDbids = (0..10).map(Dbid::new).collect();
    let range = DbidRange::new(5, 100).expect("valid range");
    assert!(set.retain_all(&range));
    assert_eq!(set.len(), 5);
    assert!(set.iter().all(|id| id.as_i32() >= 5));
}

#[test]
fn test_from_dbids_drops_duplicates() {
    let array: ArrayModifiableDbids = [1, 1, 2, 2, 2].into_iter().map(Dbid::new).collect();
    let set = HashSetModifiableDbids::from_dbids(&array);
    assert_eq!(set.len(), 2);
}

#[test]
fn test_clear() {
    let mut set: HashSetModifiableDbids = (0..3).map(Dbid::new).collect();
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.iter().count(), 0);
}

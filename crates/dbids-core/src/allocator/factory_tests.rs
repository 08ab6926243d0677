//! Tests for `factory` module

use super::*;
use crate::collections::{Dbids, ModifiableDbids};
use crate::config::DbidsConfig;
use crate::dbid::Dbid;
use crate::knn::KnnHeap;

#[test]
fn test_default_factory_uses_simple_strategy() {
    let factory = DbidFactory::default();
    assert_eq!(factory.config().allocator.strategy, AllocatorStrategy::Simple);
    assert_eq!(factory.generate_single().expect("ok").as_i32(), -1);
    assert_eq!(factory.generate_range(3).expect("ok").start(), 0);
}

#[test]
fn test_from_config_selects_strategy() {
    let mut config = DbidsConfig::default();
    config.allocator.strategy = AllocatorStrategy::Reusing;
    let factory = DbidFactory::from_config(config).expect("valid config");

    let id = factory.generate_single().expect("ok");
    factory.deallocate_single(&id).expect("allocated");

    assert_eq!(factory.generate_single().expect("ok"), id);
}

#[test]
fn test_from_config_rejects_invalid() {
    let mut config = DbidsConfig::default();
    config.collections.initial_capacity = 0;
    assert!(DbidFactory::from_config(config).is_err());
}

#[test]
fn test_with_allocator() {
    let factory = DbidFactory::with_allocator(Box::new(TrivialDbidAllocator::new()));
    assert_eq!(factory.generate_single().expect("ok").as_i32(), 1);
    assert_eq!(factory.import_integer(42), Dbid::new(42));
    let range = factory.generate_range(2).expect("ok");
    assert!(factory.deallocate_range(&range).is_ok());
}

#[test]
fn test_new_heap_follows_knn_config() {
    let mut config = DbidsConfig::default();
    config.knn.sorted_max_k = 2;
    let factory = DbidFactory::from_config(config).expect("valid config");

    assert!(factory.new_heap(2).expect("k > 0").is_sorted_backed());
    assert!(!factory.new_heap(3).expect("k > 0").is_sorted_backed());
    assert!(factory.new_heap(0).is_err());
}

#[test]
fn test_new_heap_from_resumes() {
    let factory = DbidFactory::default();
    let mut heap = factory.new_heap(1).expect("k > 0");
    heap.insert(2.0, &Dbid::new(1));
    let list = heap.to_knn_list();

    let mut resumed = factory.new_heap_from(&list).expect("k > 0");
    resumed.insert(1.0, &Dbid::new(2));

    assert_eq!(resumed.to_knn_list().dbid(0).expect("entry"), Dbid::new(2));
}

#[test]
fn test_collection_builders() {
    let mut config = DbidsConfig::default();
    config.collections.initial_capacity = 64;
    let factory = DbidFactory::from_config(config).expect("valid config");

    let array = factory.new_array();
    assert!(array.is_empty());
    assert!(array.capacity() >= 64);

    let mut set = factory.new_hash_set();
    assert!(set.add(&1));
    assert!(!factory.new_var().is_set());

    let mut list = factory.new_distance_list();
    list.add(1.0, &Dbid::new(1));
    assert_eq!(list.len(), 1);
}

#[test]
fn test_intersection_uses_threshold() {
    let factory = DbidFactory::default();
    let a: crate::collections::ArrayModifiableDbids = (0..50).map(Dbid::new).collect();
    let b: crate::collections::ArrayModifiableDbids = (25..75).map(Dbid::new).collect();

    let common = factory.intersection(&a, &b);

    assert_eq!(common.len(), 25);
    assert!(common.contains(&25));
    assert!(!common.contains(&50));
}

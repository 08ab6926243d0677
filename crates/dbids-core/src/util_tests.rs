//! Tests for the util module.

use crate::collections::{
    ArrayModifiableDbids, ArrayStaticDbids, Dbids, HashSetModifiableDbids, ModifiableDbids,
};
use crate::dbid::Dbid;
use crate::error::Error;
use crate::range::DbidRange;
use crate::util::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn array(ids: &[i32]) -> ArrayModifiableDbids {
    ids.iter().map(|&id| Dbid::new(id)).collect()
}

fn sorted(ids: &impl Dbids) -> Vec<i32> {
    let mut out: Vec<i32> = ids.iter().map(Dbid::as_i32).collect();
    out.sort_unstable();
    out
}

// -------------------------------------------------------------------------
// Set algebra
// -------------------------------------------------------------------------

#[test]
fn test_intersection_of_arrays() {
    let a = array(&[1, 2, 3, 4]);
    let b = array(&[3, 4, 5]);
    assert_eq!(sorted(&intersection(&a, &b)), vec![3, 4]);
    assert_eq!(intersection_size(&a, &b), 2);
}

#[test]
fn test_intersection_large_probe_side() {
    // Arrange: probed side above the conversion threshold.
    let small = array(&[5, 50, 500]);
    let large: ArrayModifiableDbids = (0..100).map(Dbid::new).collect();

    // Act
    let inter = intersection(&small, &large);

    // Assert
    assert_eq!(sorted(&inter), vec![5, 50]);
    assert_eq!(intersection_size(&large, &small), 2);
}

#[test]
fn test_intersection_with_set_and_range() {
    let set: HashSetModifiableDbids = [1, 2, 3].into_iter().map(Dbid::new).collect();
    let range = DbidRange::new(2, 10).expect("valid range");
    assert_eq!(sorted(&intersection(&set, &range)), vec![2, 3]);
    assert_eq!(intersection_size(&range, &set), 2);
}

#[test]
fn test_symmetric_intersection() {
    let a = array(&[1, 2, 3, 4, 5]);
    let b = array(&[4, 5, 6]);

    let split = symmetric_intersection(&a, &b);

    assert_eq!(sorted(&split.first_only), vec![1, 2, 3]);
    assert_eq!(sorted(&split.both), vec![4, 5]);
    assert_eq!(sorted(&split.second_only), vec![6]);
}

#[test]
fn test_union_and_difference() {
    let a = array(&[1, 2, 3]);
    let b = array(&[3, 4]);
    assert_eq!(sorted(&union(&a, &b)), vec![1, 2, 3, 4]);
    assert_eq!(sorted(&difference(&a, &b)), vec![1, 2]);
    assert_eq!(sorted(&difference(&b, &a)), vec![4]);
}

#[test]
fn test_ensure_array_and_set() {
    let range = DbidRange::new(3, 3).expect("valid range");
    let arr: ArrayStaticDbids = ensure_array(&range);
    assert_eq!(arr.as_slice(), &[3, 4, 5]);
    assert!(arr.is_sorted());
    let set = ensure_set(&array(&[1, 1, 2]));
    assert_eq!(set.len(), 2);
}

// -------------------------------------------------------------------------
// Sampling
// -------------------------------------------------------------------------

#[test]
fn test_random_shuffle_is_permutation() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut ids = array(&(0..50).collect::<Vec<_>>());
    random_shuffle(&mut ids, &mut rng, 50);
    assert_eq!(sorted(&ids), (0..50).collect::<Vec<_>>());
    assert!(!ids.is_sorted());
}

#[test]
fn test_random_sample_sizes() {
    let mut rng = StdRng::seed_from_u64(2);
    let population = DbidRange::new(0, 1000).expect("valid range");
    for k in [0, 1, 10, 249, 250, 999, 1000] {
        let sample = random_sample(&population, k, &mut rng).expect("k <= n");
        assert_eq!(sample.len(), k);
        let distinct = ensure_set(&sample);
        assert_eq!(distinct.len(), k, "sample must not repeat ids");
        assert!(sample.iter().all(|id| population.contains(&id)));
    }
}

#[test]
fn test_random_sample_too_large() {
    let mut rng = StdRng::seed_from_u64(3);
    let population = array(&[1, 2, 3]);
    assert!(matches!(
        random_sample(&population, 4, &mut rng),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_random_sample_except() {
    let mut rng = StdRng::seed_from_u64(4);
    let population = DbidRange::new(0, 20).expect("valid range");
    for _ in 0..20 {
        let sample = random_sample_except(&population, &Dbid::new(7), 19, &mut rng).expect("ok");
        assert_eq!(sample.len(), 19);
        assert!(!sample.contains(&7));
    }
    assert!(random_sample_except(&population, &Dbid::new(7), 20, &mut rng).is_err());
}

#[test]
fn test_random_sample_rate() {
    let mut rng = StdRng::seed_from_u64(5);
    let population = DbidRange::new(0, 100).expect("valid range");
    assert_eq!(random_sample_rate(&population, 0.0, &mut rng).expect("ok").len(), 100);
    assert_eq!(random_sample_rate(&population, 0.25, &mut rng).expect("ok").len(), 25);
    assert_eq!(random_sample_rate(&population, 7.0, &mut rng).expect("ok").len(), 7);
    assert_eq!(random_sample_rate(&population, 500.0, &mut rng).expect("ok").len(), 100);
    assert!(random_sample_rate(&population, f64::NAN, &mut rng).is_err());
}

#[test]
fn test_random_element() {
    let mut rng = StdRng::seed_from_u64(6);
    let population = array(&[10, 20, 30]);
    let var = random_element(&population, &mut rng);
    assert!(population.contains(&var));
    assert!(!random_element(&ArrayModifiableDbids::new(), &mut rng).is_set());
}

#[test]
fn test_random_split_sizes() {
    let mut rng = StdRng::seed_from_u64(7);
    let population = DbidRange::new(0, 10).expect("valid range");

    let parts = random_split(&population, 3, &mut rng).expect("parts > 0");

    let sizes: Vec<usize> = parts.iter().map(Dbids::len).collect();
    assert_eq!(sizes, vec![4, 3, 3]);
    let mut all = ArrayModifiableDbids::new();
    for part in &parts {
        all.add_all(part);
    }
    assert_eq!(sorted(&all), (0..10).collect::<Vec<_>>());
    assert!(random_split(&population, 0, &mut rng).is_err());
}

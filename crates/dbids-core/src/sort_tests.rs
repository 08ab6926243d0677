//! Tests for `sort` module

use super::dbid::Dbid;
use super::error::Error;
use super::sort::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

fn assert_sorted_pairs(keys: &[f64], values: &[i32], original: &[(f64, i32)]) {
    assert!(keys
        .windows(2)
        .all(|w| compare_keys(w[0], w[1]) != Ordering::Greater));
    let mut got: Vec<(u64, i32)> = keys
        .iter()
        .zip(values)
        .map(|(k, &v)| (k.to_bits(), v))
        .collect();
    let mut want: Vec<(u64, i32)> = original.iter().map(|&(k, v)| (k.to_bits(), v)).collect();
    got.sort_unstable();
    want.sort_unstable();
    assert_eq!(got, want, "pairs must be permuted together");
}

#[test]
fn test_compare_keys_total_order() {
    assert_eq!(compare_keys(1.0, 2.0), Ordering::Less);
    assert_eq!(compare_keys(-0.0, 0.0), Ordering::Equal);
    assert_eq!(compare_keys(f64::INFINITY, f64::NAN), Ordering::Less);
    assert_eq!(compare_keys(f64::NAN, f64::NAN), Ordering::Equal);
    assert_eq!(compare_keys(f64::NEG_INFINITY, -1e300), Ordering::Less);
}

#[test]
fn test_sort_small_parallel_arrays() {
    // Arrange
    let mut keys = vec![7.0, 2.0, 9.0, 1.0];
    let mut values = vec![70, 20, 90, 10];

    // Act
    sort(&mut keys, &mut values).expect("equal lengths");

    // Assert
    assert_eq!(keys, vec![1.0, 2.0, 7.0, 9.0]);
    assert_eq!(values, vec![10, 20, 70, 90]);
}

#[test]
fn test_sort_large_random_keeps_pairs() {
    let mut rng = StdRng::seed_from_u64(42);
    for len in [0, 1, 21, 22, 23, 100, 1000, 5000] {
        let original: Vec<(f64, i32)> = (0..len)
            .map(|i| (f64::from(rng.gen_range(0..50_u32)), i))
            .collect();
        let mut keys: Vec<f64> = original.iter().map(|p| p.0).collect();
        let mut values: Vec<i32> = original.iter().map(|p| p.1).collect();
        sort(&mut keys, &mut values).expect("equal lengths");
        assert_sorted_pairs(&keys, &values, &original);
    }
}

#[test]
fn test_sort_all_equal_keys() {
    let original: Vec<(f64, i32)> = (0..500).map(|i| (3.0, i)).collect();
    let mut keys = vec![3.0; 500];
    let mut values: Vec<i32> = (0..500).collect();
    sort(&mut keys, &mut values).expect("equal lengths");
    assert_sorted_pairs(&keys, &values, &original);
}

#[test]
fn test_sort_special_values() {
    let original = vec![
        (f64::NAN, 1),
        (f64::INFINITY, 2),
        (0.0, 3),
        (f64::NEG_INFINITY, 4),
        (-1.0, 5),
    ];
    let mut keys: Vec<f64> = original.iter().map(|p| p.0).collect();
    let mut values: Vec<i32> = original.iter().map(|p| p.1).collect();
    sort(&mut keys, &mut values).expect("equal lengths");
    assert_eq!(values, vec![4, 5, 3, 2, 1]);
    assert!(keys[4].is_nan());
}

#[test]
fn test_sort_length_mismatch() {
    let mut keys = vec![1.0, 2.0];
    let mut values = vec![1];
    assert!(matches!(
        sort(&mut keys, &mut values),
        Err(Error::LengthMismatch { keys: 2, values: 1 })
    ));
}

#[test]
fn test_sort_range_only_touches_range() {
    let mut keys = vec![9.0, 5.0, 4.0, 3.0, 0.0];
    let mut values = vec![0, 1, 2, 3, 4];
    sort_range(&mut keys, &mut values, 1, 4).expect("valid range");
    assert_eq!(keys, vec![9.0, 3.0, 4.0, 5.0, 0.0]);
    assert_eq!(values, vec![0, 3, 2, 1, 4]);
    assert!(matches!(
        sort_range(&mut keys, &mut values, 3, 6),
        Err(Error::InvalidSlice { .. })
    ));
}

#[test]
fn test_sort_reverse() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut keys: Vec<f64> = (0..300).map(|_| rng.gen::<f64>()).collect();
    let mut values: Vec<i32> = (0..300).collect();
    sort_reverse(&mut keys, &mut values).expect("equal lengths");
    assert!(keys.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_sort_by_comparator() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut data: Vec<i32> = (0..400).map(|_| rng.gen_range(-1000..1000)).collect();
    let mut expected = data.clone();
    expected.sort_unstable_by(|a, b| b.cmp(a));

    sort_by(&mut data, |a: Dbid, b: Dbid| b.cmp(&a));

    assert_eq!(data, expected);
}

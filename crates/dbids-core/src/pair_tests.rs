//! Tests for `pair` module

use super::dbid::{Dbid, DbidRef};
use super::pair::*;
use std::cmp::Ordering;

#[test]
fn test_double_pair_accessors() {
    let pair = DoubleDbidPair::new(1.5, &Dbid::new(7));
    assert_eq!(pair.distance(), 1.5);
    assert_eq!(pair.dbid(), Dbid::new(7));
    assert_eq!(pair.internal_index(), 7);
    assert_eq!(pair.to_string(), "1.5:7");
}

#[test]
fn test_pairs_order_by_distance() {
    // Arrange
    let near = DoubleDbidPair::new(1.0, &3);
    let far = DoubleDbidPair::new(2.0, &1);
    let nan = DoubleDbidPair::new(f64::NAN, &2);

    // Act & Assert
    assert_eq!(compare_by_distance(&near, &far), Ordering::Less);
    assert_eq!(compare_by_distance(&far, &nan), Ordering::Less);
    assert_eq!(near.partial_cmp(&far), Some(Ordering::Less));
}

#[test]
fn test_equal_distance_different_ids_are_unordered() {
    let a = DoubleDbidPair::new(1.0, &1);
    let b = DoubleDbidPair::new(1.0, &2);
    assert_ne!(a, b);
    assert_eq!(a.partial_cmp(&b), None);
    assert_eq!(a.partial_cmp(&a), Some(Ordering::Equal));
}

#[test]
fn test_nan_pairs_are_neither_equal_nor_ordered() {
    let a = DoubleDbidPair::new(f64::NAN, &3);
    let b = DoubleDbidPair::new(f64::NAN, &3);
    assert_ne!(a, b);
    assert_eq!(a.partial_cmp(&b), None);
    let finite = DoubleDbidPair::new(1.0, &3);
    assert_eq!(finite.partial_cmp(&a), Some(Ordering::Less));
}

#[test]
fn test_equality_across_representations() {
    let wide = DoubleDbidPair::new(0.5, &4);
    let narrow = DistancePair::new(0.5_f32, &4);
    assert_eq!(wide, narrow);
    assert_eq!(narrow, wide);
    assert!(pair_equal(&wide, &narrow));

    let other_id = DistancePair::new(0.5_f32, &5);
    assert_ne!(wide, other_id);
}

#[test]
fn test_narrow_distance_widens() {
    let narrow = DistancePair::new(3_u8, &Dbid::new(-2));
    assert_eq!(narrow.raw_distance(), 3);
    assert_eq!(narrow.distance(), 3.0);
    let wide: DoubleDbidPair = narrow.into();
    assert_eq!(wide.distance(), 3.0);
    assert_eq!(wide.dbid(), Dbid::new(-2));
}

#[test]
fn test_negative_zero_equals_zero() {
    let a = DoubleDbidPair::new(0.0, &1);
    let b = DoubleDbidPair::new(-0.0, &1);
    assert_eq!(a, b);
}

#[test]
fn test_id_pair() {
    let pair = DbidPair::new(&Dbid::new(1), &Dbid::new(2));
    assert_eq!(pair.first(), Dbid::new(1));
    assert_eq!(pair.second(), Dbid::new(2));
    assert_eq!(pair.swapped(), DbidPair::new(&2, &1));
    assert_eq!(pair.to_string(), "(1, 2)");
}

#[test]
fn test_double_pair_serde() {
    let pair = DoubleDbidPair::new(2.25, &11);
    let json = serde_json::to_string(&pair).expect("serialize");
    let back: DoubleDbidPair = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, pair);
}

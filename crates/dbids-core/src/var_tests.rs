//! Tests for `var` module

use super::collections::{ArrayDbids, DbidCursor, Dbids};
use super::dbid::{Dbid, DbidRef};
use super::var::*;

#[test]
fn test_var_starts_unset() {
    let var = DbidVar::new();
    assert!(!var.is_set());
    assert_eq!(var.get(), None);
    assert_eq!(var.len(), 0);
    assert_eq!(var.internal_index(), i32::MIN);
    assert!(!var.iter().valid());
}

#[test]
fn test_var_set_and_rebind() {
    // Arrange
    let mut var = DbidVar::new();

    // Act
    var.set(&Dbid::new(4));
    var.set(&9);

    // Assert
    assert_eq!(var.get(), Some(Dbid::new(9)));
    assert_eq!(var.len(), 1);
    assert!(var.contains(&9));
    assert!(!var.contains(&4));
}

#[test]
fn test_var_cursor_has_one_position() {
    let var = DbidVar::with(&Dbid::new(3));
    let mut cursor = var.iter();
    assert!(cursor.valid());
    assert_eq!(cursor.internal_index(), 3);
    cursor.advance();
    assert!(!cursor.valid());
    assert_eq!(var.iter().count(), 1);
}

#[test]
fn test_var_unset_clears() {
    let mut var = DbidVar::with(&1);
    var.unset();
    assert!(!var.is_set());
    assert!(!var.contains(&i32::MIN));
}

#[test]
fn test_var_array_access() {
    let var = DbidVar::with(&6);
    assert_eq!(ArrayDbids::get(&var, 0).expect("in bounds"), Dbid::new(6));
    assert!(ArrayDbids::get(&var, 1).is_err());
    assert_eq!(var.binary_search(&6).expect("sorted"), Ok(0));
    assert_eq!(var.binary_search(&2).expect("sorted"), Err(0));
    assert_eq!(var.binary_search(&8).expect("sorted"), Err(1));
    assert_eq!(var.slice(0, 1).expect("valid").len(), 1);
    assert!(DbidVar::new().slice(0, 1).is_err());
}

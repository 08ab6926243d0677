//! Dual-pivot quicksort over parallel key/value arrays.
//!
//! Sorts an `f64` key array and an `i32` value array jointly by key: every
//! swap is applied to both arrays, so `(keys[i], values[i])` pairs stay
//! together. No per-element boxing, no temporary pair allocation.
//!
//! # Algorithm
//!
//! 1. Below [`INSERTION_THRESHOLD`] elements, insertion sort.
//! 2. Otherwise sample five elements spread around the middle, order them
//!    with an optimal 9-comparison sorting network and take the 2nd and 4th
//!    as pivots.
//! 3. Partition into `< left pivot`, `between`, `> right pivot` and recurse
//!    into the three regions. When both pivots are equal the middle region
//!    only holds elements equal to the pivot and is not recursed into.
//!
//! The sort is not stable. Keys are compared with [`compare_keys`]: NaN is
//! greater than every other value, infinities order as expected.
//!
//! The same routine sorts a single id array with a caller-supplied
//! comparator ([`sort_by`]).

use std::cmp::Ordering;

use crate::dbid::Dbid;
use crate::error::{Error, Result};

/// Ranges shorter than this are insertion sorted.
pub const INSERTION_THRESHOLD: usize = 22;

/// Total order on `f64` with NaN last.
///
/// Unlike `f64::total_cmp`, `-0.0` and `0.0` compare equal and every NaN is
/// greater than `+∞`.
#[inline]
#[must_use]
pub fn compare_keys(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ord) => ord,
        None => a.is_nan().cmp(&b.is_nan()),
    }
}

/// Sorts `keys` ascending, permuting `values` identically.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the arrays differ in length.
pub fn sort(keys: &mut [f64], values: &mut [i32]) -> Result<()> {
    let end = keys.len();
    sort_range(keys, values, 0, end)
}

/// Sorts `keys[start..end]` ascending, permuting `values` identically.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the arrays differ in length and
/// [`Error::InvalidSlice`] for an invalid range.
pub fn sort_range(keys: &mut [f64], values: &mut [i32], start: usize, end: usize) -> Result<()> {
    let mut target = ParallelArrays::new(keys, values, false)?;
    check_range(start, end, target.keys.len())?;
    quick_sort(&mut target, start, end);
    Ok(())
}

/// Sorts `keys` descending, permuting `values` identically.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] if the arrays differ in length.
pub fn sort_reverse(keys: &mut [f64], values: &mut [i32]) -> Result<()> {
    let end = keys.len();
    let mut target = ParallelArrays::new(keys, values, true)?;
    quick_sort(&mut target, 0, end);
    Ok(())
}

/// Sorts parallel arrays whose lengths are equal by construction.
pub(crate) fn sort_pairs(keys: &mut [f64], values: &mut [i32]) {
    debug_assert_eq!(keys.len(), values.len());
    let end = keys.len().min(values.len());
    let mut target = ParallelArrays {
        keys: &mut keys[..end],
        values: &mut values[..end],
        reverse: false,
    };
    quick_sort(&mut target, 0, end);
}

/// Sorts raw ids with a custom comparator.
pub fn sort_by<F>(data: &mut [i32], compare: F)
where
    F: FnMut(Dbid, Dbid) -> Ordering,
{
    let end = data.len();
    let mut target = WithComparator { data, compare };
    quick_sort(&mut target, 0, end);
}

fn check_range(start: usize, end: usize, len: usize) -> Result<()> {
    if start > end || end > len {
        return Err(Error::InvalidSlice {
            begin: start,
            end,
            len,
        });
    }
    Ok(())
}

/// Something the quicksort can compare and permute by position.
trait SortTarget {
    type Key: Copy;

    fn key(&self, i: usize) -> Self::Key;

    fn compare(&mut self, a: Self::Key, b: Self::Key) -> Ordering;

    fn swap(&mut self, i: usize, j: usize);

    #[inline]
    fn compare_at(&mut self, i: usize, j: usize) -> Ordering {
        let (a, b) = (self.key(i), self.key(j));
        self.compare(a, b)
    }
}

struct ParallelArrays<'a> {
    keys: &'a mut [f64],
    values: &'a mut [i32],
    reverse: bool,
}

impl<'a> ParallelArrays<'a> {
    fn new(keys: &'a mut [f64], values: &'a mut [i32], reverse: bool) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(Error::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            keys,
            values,
            reverse,
        })
    }
}

impl SortTarget for ParallelArrays<'_> {
    type Key = f64;

    #[inline]
    fn key(&self, i: usize) -> f64 {
        self.keys[i]
    }

    #[inline]
    fn compare(&mut self, a: f64, b: f64) -> Ordering {
        if self.reverse {
            compare_keys(b, a)
        } else {
            compare_keys(a, b)
        }
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.keys.swap(i, j);
        self.values.swap(i, j);
    }
}

struct WithComparator<'a, F> {
    data: &'a mut [i32],
    compare: F,
}

impl<F> SortTarget for WithComparator<'_, F>
where
    F: FnMut(Dbid, Dbid) -> Ordering,
{
    type Key = i32;

    #[inline]
    fn key(&self, i: usize) -> i32 {
        self.data[i]
    }

    #[inline]
    fn compare(&mut self, a: i32, b: i32) -> Ordering {
        (self.compare)(Dbid::new(a), Dbid::new(b))
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.data.swap(i, j);
    }
}

fn insertion_sort<T: SortTarget>(target: &mut T, start: usize, end: usize) {
    for i in start + 1..end {
        let mut j = i;
        while j > start && target.compare_at(j - 1, j) == Ordering::Greater {
            target.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[inline]
fn order<T: SortTarget>(target: &mut T, i: usize, j: usize) {
    if target.compare_at(i, j) == Ordering::Greater {
        target.swap(i, j);
    }
}

fn quick_sort<T: SortTarget>(target: &mut T, start: usize, end: usize) {
    let len = end - start;
    if len < INSERTION_THRESHOLD {
        insertion_sort(target, start, end);
        return;
    }

    // Five samples around the middle.
    let seventh = (len >> 3) + (len >> 6) + 1;
    let m3 = (start + end) >> 1;
    let m2 = m3 - seventh;
    let m1 = m2 - seventh;
    let m4 = m3 + seventh;
    let m5 = m4 + seventh;

    // Optimal sorting network for five elements.
    order(target, m1, m2);
    order(target, m1, m3);
    order(target, m2, m3);
    order(target, m4, m5);
    order(target, m1, m4);
    order(target, m3, m4);
    order(target, m2, m5);
    order(target, m2, m3);
    order(target, m4, m5);

    // Park the pivots at both ends.
    target.swap(start, m2);
    target.swap(end - 1, m4);
    let lpivot = target.key(start);
    let rpivot = target.key(end - 1);
    let distinct = target.compare(lpivot, rpivot) != Ordering::Equal;

    let mut left = start + 1;
    let mut right = end - 2;
    let mut k = left;
    while k <= right {
        let cur = target.key(k);
        if target.compare(cur, lpivot) == Ordering::Less {
            target.swap(k, left);
            left += 1;
        } else if target.compare(cur, rpivot) == Ordering::Greater {
            while k < right {
                let r = target.key(right);
                if target.compare(r, rpivot) != Ordering::Greater {
                    break;
                }
                right -= 1;
            }
            target.swap(k, right);
            right -= 1;
            let moved = target.key(k);
            if target.compare(moved, lpivot) == Ordering::Less {
                target.swap(k, left);
                left += 1;
            }
        }
        k += 1;
    }
    left -= 1;
    right += 1;

    // Pivots back into their final positions.
    target.swap(start, left);
    target.swap(end - 1, right);

    quick_sort(target, start, left);
    if distinct {
        quick_sort(target, left + 1, right);
    }
    quick_sort(target, right + 1, end);
}

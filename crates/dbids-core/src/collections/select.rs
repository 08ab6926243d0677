//! Partial sorting of id arrays by a custom order.
//!
//! [`quick_select`] moves the element of a given rank into its final
//! sorted position, with everything before it ordered no greater and
//! everything after it no smaller. Only the side containing the rank is
//! processed further, so the expected cost is linear.
//!
//! Pivots are taken from a sorted five-element sample, choosing the sample
//! closest to the requested rank. Runs shorter than [`SMALL`] are
//! insertion sorted.

use std::cmp::Ordering;

use super::array::ArrayModifiableDbids;
use super::Dbids;
use crate::dbid::Dbid;
use crate::error::{Error, Result};

/// Runs shorter than this are insertion sorted.
pub const SMALL: usize = 47;

/// Places the element of rank `rank` (0-based) at index `rank`.
///
/// The array is reordered in place.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfBounds`] if `rank >= data.len()`.
pub fn quick_select<F>(data: &mut ArrayModifiableDbids, compare: F, rank: usize) -> Result<()>
where
    F: FnMut(Dbid, Dbid) -> Ordering,
{
    let end = data.len();
    quick_select_range(data, compare, 0, end, rank)
}

/// Like [`quick_select`], restricted to `data[start..end]`.
///
/// # Errors
///
/// Returns [`Error::InvalidSlice`] for an invalid range and
/// [`Error::IndexOutOfBounds`] if `rank` lies outside it.
pub fn quick_select_range<F>(
    data: &mut ArrayModifiableDbids,
    mut compare: F,
    start: usize,
    end: usize,
    rank: usize,
) -> Result<()>
where
    F: FnMut(Dbid, Dbid) -> Ordering,
{
    let len = data.len();
    if start > end || end > len {
        return Err(Error::InvalidSlice {
            begin: start,
            end,
            len,
        });
    }
    if rank < start || rank >= end {
        return Err(Error::out_of_bounds(rank, end));
    }
    let store = data.raw_mut();
    select(store, &mut compare, start, end, rank);
    Ok(())
}

/// Moves the lower median into place and returns its index.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for an empty array.
pub fn median<F>(data: &mut ArrayModifiableDbids, compare: F) -> Result<usize>
where
    F: FnMut(Dbid, Dbid) -> Ordering,
{
    quantile(data, compare, 0.5)
}

/// Moves the element at quantile `q` (lower element on fractional ranks)
/// into place and returns its index.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for an empty array or `q` outside
/// `[0, 1]`.
pub fn quantile<F>(data: &mut ArrayModifiableDbids, compare: F, q: f64) -> Result<usize>
where
    F: FnMut(Dbid, Dbid) -> Ordering,
{
    if data.is_empty() {
        return Err(Error::InvalidArgument(
            "quantile of an empty array".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(Error::InvalidArgument(format!(
            "quantile {q} outside [0, 1]"
        )));
    }
    let rank = ((data.len() - 1) as f64 * q).floor() as usize;
    quick_select(data, compare, rank)?;
    Ok(rank)
}

fn best_pivot(rank: usize, m: [usize; 5]) -> usize {
    if rank < m[0] {
        m[0]
    } else if rank > m[4] {
        m[4]
    } else if rank < m[1] {
        m[1]
    } else if rank > m[3] {
        m[3]
    } else {
        m[2]
    }
}

fn select<F>(data: &mut [i32], compare: &mut F, mut start: usize, mut end: usize, rank: usize)
where
    F: FnMut(Dbid, Dbid) -> Ordering,
{
    loop {
        if start + SMALL > end {
            insertion_sort(data, compare, start, end);
            return;
        }

        let len = end - start;
        let seventh = (len >> 3) + (len >> 6) + 1;
        let m3 = (start + end) >> 1;
        let m2 = m3 - seventh;
        let m1 = m2 - seventh;
        let m4 = m3 + seventh;
        let m5 = m4 + seventh;

        for (a, b) in [
            (m1, m2),
            (m1, m3),
            (m2, m3),
            (m4, m5),
            (m1, m4),
            (m3, m4),
            (m2, m5),
            (m2, m3),
            (m4, m5),
        ] {
            if compare_at(data, compare, a, b) == Ordering::Greater {
                data.swap(a, b);
            }
        }

        let best = best_pivot(rank, [m1, m2, m3, m4, m5]);
        let pivot = end - 1;
        data.swap(best, pivot);

        // Signed cursors: `j` may step below `start` on its last move.
        let mut i = start as isize;
        let mut j = end as isize - 2;
        loop {
            while i <= j && compare_at(data, compare, i as usize, pivot) != Ordering::Greater {
                i += 1;
            }
            while j >= i && compare_at(data, compare, j as usize, pivot) != Ordering::Less {
                j -= 1;
            }
            if i >= j {
                break;
            }
            data.swap(i as usize, j as usize);
        }
        let mut i = i as usize;
        data.swap(i, pivot);

        // Skip over elements equal to the pivot.
        while rank < i && compare_at(data, compare, i - 1, i) == Ordering::Equal {
            i -= 1;
        }
        while rank > i && compare_at(data, compare, i + 1, i) == Ordering::Equal {
            i += 1;
        }
        match rank.cmp(&i) {
            Ordering::Less => end = i,
            Ordering::Greater => start = i + 1,
            Ordering::Equal => return,
        }
    }
}

#[inline]
fn compare_at<F>(data: &[i32], compare: &mut F, i: usize, j: usize) -> Ordering
where
    F: FnMut(Dbid, Dbid) -> Ordering,
{
    compare(Dbid::new(data[i]), Dbid::new(data[j]))
}

fn insertion_sort<F>(data: &mut [i32], compare: &mut F, start: usize, end: usize)
where
    F: FnMut(Dbid, Dbid) -> Ordering,
{
    for i in start + 1..end {
        let mut j = i;
        while j > start && compare_at(data, compare, j - 1, j) == Ordering::Greater {
            data.swap(j - 1, j);
            j -= 1;
        }
    }
}

//! Finalized k-nearest-neighbor results.

use std::cmp::Ordering;

use crate::collections::cursor::{ArrayCursor, DbidArrayCursor, DbidCursor};
use crate::collections::{ArrayDbids, ArraySlice, ArrayStaticDbids, Dbids};
use crate::dbid::{Dbid, DbidRef};
use crate::error::{Error, Result};
use crate::pair::{DistanceDbidPair, DoubleDbidPair};
use crate::sort::compare_keys;

/// Immutable neighbor list, ascending by distance.
///
/// The inherent [`KnnList::get`] returns the whole entry; through
/// [`ArrayDbids`] the list reads as a plain id array.
///
/// Holds at least `min(k, candidates)` entries and possibly more when
/// several candidates share the k-th distance.
#[derive(Debug, Clone, PartialEq)]
pub struct KnnList {
    k: usize,
    dists: Vec<f64>,
    ids: Vec<i32>,
}

impl KnnList {
    /// Wraps parallel arrays already sorted ascending by distance.
    pub(crate) fn from_sorted(k: usize, dists: Vec<f64>, ids: Vec<i32>) -> Self {
        debug_assert_eq!(dists.len(), ids.len());
        debug_assert!(dists
            .windows(2)
            .all(|w| compare_keys(w[0], w[1]) != Ordering::Greater));
        Self { k, dists, ids }
    }

    /// Requested neighbor count.
    #[inline]
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Distance of the k-th neighbor, `+∞` with fewer than `k` entries.
    #[must_use]
    pub fn kdist(&self) -> f64 {
        if self.k == 0 || self.dists.len() < self.k {
            f64::INFINITY
        } else {
            self.dists[self.k - 1]
        }
    }

    /// Entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] past the end.
    pub fn get(&self, index: usize) -> Result<DoubleDbidPair> {
        match (self.dists.get(index), self.ids.get(index)) {
            (Some(&distance), Some(id)) => Ok(DoubleDbidPair::new(distance, id)),
            _ => Err(Error::out_of_bounds(index, self.dists.len())),
        }
    }

    /// Distance at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] past the end.
    pub fn distance(&self, index: usize) -> Result<f64> {
        self.dists
            .get(index)
            .copied()
            .ok_or_else(|| Error::out_of_bounds(index, self.dists.len()))
    }

    /// Id at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] past the end.
    pub fn dbid(&self, index: usize) -> Result<Dbid> {
        self.ids
            .get(index)
            .map(|&id| Dbid::new(id))
            .ok_or_else(|| Error::out_of_bounds(index, self.ids.len()))
    }

    /// Distances in list order.
    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.dists
    }

    /// Cursor over `(distance, id)` entries.
    #[must_use]
    pub fn pairs(&self) -> PairCursor<'_> {
        PairCursor::new(&self.dists, &self.ids)
    }

    /// Neighbors up to rank `k`, keeping entries tied with the new k-th
    /// distance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `k` is zero or larger than
    /// the list's own `k`.
    pub fn sub_list(&self, k: usize) -> Result<KnnList> {
        if k == 0 || k > self.k {
            return Err(Error::InvalidArgument(format!(
                "sub-list k={k} outside 1..={}",
                self.k
            )));
        }
        let mut end = k.min(self.dists.len());
        if end == k {
            let kdist = self.dists[k - 1];
            while end < self.dists.len() && compare_keys(self.dists[end], kdist) == Ordering::Equal
            {
                end += 1;
            }
        }
        Ok(Self {
            k,
            dists: self.dists[..end].to_vec(),
            ids: self.ids[..end].to_vec(),
        })
    }

    /// Copies the ids, dropping distances.
    #[must_use]
    pub fn to_dbids(&self) -> ArrayStaticDbids {
        ArrayStaticDbids::new(self.ids.clone())
    }

    /// Splits into distance and id arrays.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<i32>) {
        (self.dists, self.ids)
    }
}

impl Dbids for KnnList {
    type Iter<'a>
        = ArrayCursor<'a>
    where
        Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.ids.len()
    }

    fn contains(&self, id: &impl DbidRef) -> bool {
        self.ids.contains(&id.internal_index())
    }

    fn iter(&self) -> ArrayCursor<'_> {
        ArrayCursor::new(&self.ids)
    }
}

impl ArrayDbids for KnnList {
    type Slice<'a>
        = ArraySlice<'a>
    where
        Self: 'a;

    fn get(&self, index: usize) -> Result<Dbid> {
        self.dbid(index)
    }

    /// Neighbor lists are ordered by distance, so this only succeeds when
    /// the ids happen to be ascending as well.
    fn binary_search(&self, key: &impl DbidRef) -> Result<std::result::Result<usize, usize>> {
        if !crate::collections::is_ascending(&self.ids) {
            return Err(Error::NotSorted);
        }
        Ok(crate::collections::search_sorted(
            &self.ids,
            key.internal_index(),
        ))
    }

    fn slice(&self, begin: usize, end: usize) -> Result<ArraySlice<'_>> {
        ArraySlice::new(&self.ids, begin, end, false)
    }
}

impl<'a> IntoIterator for &'a KnnList {
    type Item = DoubleDbidPair;
    type IntoIter = PairCursor<'a>;

    fn into_iter(self) -> PairCursor<'a> {
        self.pairs()
    }
}

/// Cursor over the entries of a distance list.
///
/// Positioned on an entry, the cursor itself is a [`DistanceDbidPair`].
#[derive(Debug, Clone, Copy)]
pub struct PairCursor<'a> {
    dists: &'a [f64],
    ids: &'a [i32],
    pos: isize,
}

impl<'a> PairCursor<'a> {
    pub(crate) fn new(dists: &'a [f64], ids: &'a [i32]) -> Self {
        debug_assert_eq!(dists.len(), ids.len());
        Self { dists, ids, pos: 0 }
    }
}

impl DbidRef for PairCursor<'_> {
    #[inline]
    fn internal_index(&self) -> i32 {
        if self.valid() {
            self.ids[self.pos as usize]
        } else {
            i32::MIN
        }
    }
}

impl DistanceDbidPair for PairCursor<'_> {
    #[inline]
    fn distance(&self) -> f64 {
        if self.valid() {
            self.dists[self.pos as usize]
        } else {
            f64::NAN
        }
    }
}

impl DbidCursor for PairCursor<'_> {
    #[inline]
    fn valid(&self) -> bool {
        self.pos >= 0 && (self.pos as usize) < self.ids.len()
    }

    #[inline]
    fn advance(&mut self) {
        self.pos += 1;
    }
}

impl DbidArrayCursor for PairCursor<'_> {
    fn advance_by(&mut self, count: isize) {
        self.pos += count;
    }

    fn retract(&mut self) {
        self.pos -= 1;
    }

    fn seek(&mut self, offset: isize) {
        self.pos = offset;
    }

    fn offset(&self) -> isize {
        self.pos
    }
}

impl Iterator for PairCursor<'_> {
    type Item = DoubleDbidPair;

    fn next(&mut self) -> Option<DoubleDbidPair> {
        if !self.valid() {
            return None;
        }
        let i = self.pos as usize;
        self.pos += 1;
        Some(DoubleDbidPair::new(self.dists[i], &self.ids[i]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = if self.valid() {
            self.ids.len() - self.pos as usize
        } else {
            0
        };
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for PairCursor<'_> {}

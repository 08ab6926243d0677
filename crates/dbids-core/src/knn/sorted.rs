//! Sorted-array k-nearest-neighbor accumulator.
//!
//! Keeps candidates in ascending order in two dense arrays and places each
//! new candidate by a linear scan from the back. After every insertion the
//! arrays are cut after the last entry tied with the k-th distance. For
//! small `k` this beats the heap: the scan touches a handful of contiguous
//! values and finalization needs no sort at all.

use std::cmp::Ordering;

use super::list::KnnList;
use super::KnnHeap;
use crate::dbid::DbidRef;
use crate::error::{Error, Result};
use crate::pair::DoubleDbidPair;
use crate::sort::compare_keys;

/// Bounded sorted list with tie preservation at the k-th distance.
#[derive(Debug, Clone)]
pub struct SortedKnnHeap {
    k: usize,
    dists: Vec<f64>,
    ids: Vec<i32>,
}

impl SortedKnnHeap {
    /// Creates an empty list for `k` neighbors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for `k == 0`.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidArgument(
                "k must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            k,
            dists: Vec::with_capacity(k + 1),
            ids: Vec::with_capacity(k + 1),
        })
    }

    /// Drops everything behind the last entry tied with the k-th distance.
    fn truncate_after_ties(&mut self) {
        if self.dists.len() <= self.k {
            return;
        }
        let kdist = self.dists[self.k - 1];
        let mut end = self.k;
        while end < self.dists.len() && compare_keys(self.dists[end], kdist) == Ordering::Equal {
            end += 1;
        }
        self.dists.truncate(end);
        self.ids.truncate(end);
    }
}

impl KnnHeap for SortedKnnHeap {
    #[inline]
    fn k(&self) -> usize {
        self.k
    }

    #[inline]
    fn len(&self) -> usize {
        self.dists.len()
    }

    #[inline]
    fn kdist(&self) -> f64 {
        if self.dists.len() < self.k {
            f64::INFINITY
        } else {
            self.dists[self.k - 1]
        }
    }

    fn insert(&mut self, distance: f64, id: &impl DbidRef) -> f64 {
        if self.dists.len() >= self.k
            && compare_keys(distance, self.dists[self.k - 1]) == Ordering::Greater
        {
            return self.kdist();
        }
        let mut pos = self.dists.len();
        while pos > 0 && compare_keys(self.dists[pos - 1], distance) == Ordering::Greater {
            pos -= 1;
        }
        self.dists.insert(pos, distance);
        self.ids.insert(pos, id.internal_index());
        self.truncate_after_ties();
        self.kdist()
    }

    fn peek(&self) -> Option<DoubleDbidPair> {
        let last = self.dists.len().checked_sub(1)?;
        Some(DoubleDbidPair::new(self.dists[last], &self.ids[last]))
    }

    fn poll(&mut self) -> Option<DoubleDbidPair> {
        let distance = self.dists.pop()?;
        let id = self.ids.pop()?;
        Some(DoubleDbidPair::new(distance, &id))
    }

    fn clear(&mut self) {
        self.dists.clear();
        self.ids.clear();
    }

    fn to_knn_list(self) -> KnnList {
        tracing::trace!(
            k = self.k,
            len = self.dists.len(),
            "finalized sorted knn list"
        );
        KnnList::from_sorted(self.k, self.dists, self.ids)
    }
}

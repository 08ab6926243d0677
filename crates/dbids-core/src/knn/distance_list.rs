//! Modifiable list of `(distance, id)` entries.
//!
//! Used where the result size is not bounded by `k`, e.g. range queries:
//! entries are appended in arrival order and sorted once at the end.

use crate::collections::cursor::ArrayCursor;
use crate::collections::{ArrayStaticDbids, Dbids};
use crate::dbid::DbidRef;
use crate::error::{Error, Result};
use crate::pair::{DistanceDbidPair, DoubleDbidPair};
use crate::sort;

use super::list::{KnnList, PairCursor};

/// Growable parallel-array list of distance pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoubleDbidList {
    dists: Vec<f64>,
    ids: Vec<i32>,
}

impl DoubleDbidList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            dists: Vec::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Appends an entry.
    pub fn add(&mut self, distance: f64, id: &impl DbidRef) {
        self.dists.push(distance);
        self.ids.push(id.internal_index());
    }

    /// Appends an existing pair.
    pub fn add_pair(&mut self, pair: &impl DistanceDbidPair) {
        self.add(pair.distance(), pair);
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

    /// Removes the entry at `index`, moving the last entry into its place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] past the end.
    pub fn remove_at(&mut self, index: usize) -> Result<DoubleDbidPair> {
        if index >= self.dists.len() {
            return Err(Error::out_of_bounds(index, self.dists.len()));
        }
        let distance = self.dists.swap_remove(index);
        let id = self.ids.swap_remove(index);
        Ok(DoubleDbidPair::new(distance, &id))
    }

    /// Sorts ascending by distance.
    pub fn sort(&mut self) {
        sort::sort_pairs(&mut self.dists, &mut self.ids);
    }

    /// Shortens the list to `len` entries.
    pub fn truncate(&mut self, len: usize) {
        self.dists.truncate(len);
        self.ids.truncate(len);
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.dists.clear();
        self.ids.clear();
    }

    /// Cursor over the entries in list order.
    #[must_use]
    pub fn pairs(&self) -> PairCursor<'_> {
        PairCursor::new(&self.dists, &self.ids)
    }

    /// Copies the ids, dropping distances.
    #[must_use]
    pub fn to_dbids(&self) -> ArrayStaticDbids {
        ArrayStaticDbids::new(self.ids.clone())
    }

    /// Sorts and freezes the list as a neighbor list whose `k` is its
    /// length.
    #[must_use]
    pub fn into_knn_list(mut self) -> KnnList {
        self.sort();
        let k = self.dists.len();
        KnnList::from_sorted(k, self.dists, self.ids)
    }
}

impl Dbids for DoubleDbidList {
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

impl Extend<DoubleDbidPair> for DoubleDbidList {
    fn extend<T: IntoIterator<Item = DoubleDbidPair>>(&mut self, iter: T) {
        for pair in iter {
            self.add_pair(&pair);
        }
    }
}

impl FromIterator<DoubleDbidPair> for DoubleDbidList {
    fn from_iter<T: IntoIterator<Item = DoubleDbidPair>>(iter: T) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a> IntoIterator for &'a DoubleDbidList {
    type Item = DoubleDbidPair;
    type IntoIter = PairCursor<'a>;

    fn into_iter(self) -> PairCursor<'a> {
        self.pairs()
    }
}

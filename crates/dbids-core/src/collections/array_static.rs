//! Immutable array of identifiers.

use super::cursor::ArrayCursor;
use super::slice::ArraySlice;
use super::{ArrayDbids, Dbids};
use crate::dbid::{Dbid, DbidRef};
use crate::error::{Error, Result};

/// Fixed array of identifiers.
///
/// Sortedness is determined once at construction, so binary search is
/// available exactly when the ids were handed over in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayStaticDbids {
    store: Box<[i32]>,
    sorted: bool,
}

impl ArrayStaticDbids {
    /// Freezes a buffer of raw ids.
    #[must_use]
    pub fn new(store: Vec<i32>) -> Self {
        let sorted = super::is_ascending(&store);
        Self {
            store: store.into_boxed_slice(),
            sorted,
        }
    }

    /// Copies the ids of an existing collection.
    #[must_use]
    pub fn from_dbids<D: Dbids + ?Sized>(ids: &D) -> Self {
        Self::new(ids.iter().map(Dbid::as_i32).collect())
    }

    /// Raw ids.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.store
    }

    /// Returns true if the ids are ascending by internal index.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }
}

impl Dbids for ArrayStaticDbids {
    type Iter<'a>
        = ArrayCursor<'a>
    where
        Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.store.len()
    }

    fn contains(&self, id: &impl DbidRef) -> bool {
        let key = id.internal_index();
        if self.sorted {
            super::search_sorted(&self.store, key).is_ok()
        } else {
            self.store.contains(&key)
        }
    }

    fn iter(&self) -> ArrayCursor<'_> {
        ArrayCursor::new(&self.store)
    }
}

impl ArrayDbids for ArrayStaticDbids {
    type Slice<'a>
        = ArraySlice<'a>
    where
        Self: 'a;

    fn get(&self, index: usize) -> Result<Dbid> {
        self.store
            .get(index)
            .map(|&id| Dbid::new(id))
            .ok_or_else(|| Error::out_of_bounds(index, self.store.len()))
    }

    fn binary_search(&self, key: &impl DbidRef) -> Result<std::result::Result<usize, usize>> {
        if !self.sorted {
            return Err(Error::NotSorted);
        }
        Ok(super::search_sorted(&self.store, key.internal_index()))
    }

    fn slice(&self, begin: usize, end: usize) -> Result<ArraySlice<'_>> {
        ArraySlice::new(&self.store, begin, end, self.sorted)
    }
}

impl From<Vec<i32>> for ArrayStaticDbids {
    fn from(store: Vec<i32>) -> Self {
        Self::new(store)
    }
}

impl FromIterator<Dbid> for ArrayStaticDbids {
    fn from_iter<T: IntoIterator<Item = Dbid>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Dbid::as_i32).collect())
    }
}

impl<'a> IntoIterator for &'a ArrayStaticDbids {
    type Item = Dbid;
    type IntoIter = ArrayCursor<'a>;

    fn into_iter(self) -> ArrayCursor<'a> {
        self.iter()
    }
}

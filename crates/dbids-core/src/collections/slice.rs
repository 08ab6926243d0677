//! Borrowed views over a run of an array.
//!
//! A slice keeps a reference to the *whole* backing buffer of the array it
//! was cut from, plus absolute `[begin, end)` bounds. Slicing a slice adds
//! the requested offsets to the absolute begin once, so nested views always
//! address the original buffer. Because the view borrows the array, the
//! array cannot be mutated (and therefore not reallocated) while a slice of
//! it is alive.

use super::cursor::ArrayCursor;
use super::{ArrayDbids, Dbids};
use crate::dbid::{Dbid, DbidRef};
use crate::error::{Error, Result};

/// Read-only view of `[begin, end)` of an id array.
#[derive(Debug, Clone, Copy)]
pub struct ArraySlice<'a> {
    store: &'a [i32],
    begin: usize,
    end: usize,
    sorted: bool,
}

impl<'a> ArraySlice<'a> {
    /// `sorted` tells whether the parent buffer is known to be ascending.
    pub(crate) fn new(store: &'a [i32], begin: usize, end: usize, sorted: bool) -> Result<Self> {
        if begin > end || end > store.len() {
            return Err(Error::InvalidSlice {
                begin,
                end,
                len: store.len(),
            });
        }
        Ok(Self {
            store,
            begin,
            end,
            sorted,
        })
    }

    /// Absolute start of this view in the backing buffer.
    #[must_use]
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Absolute end of this view in the backing buffer.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Raw ids of the view.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &'a [i32] {
        &self.store[self.begin..self.end]
    }
}

impl Dbids for ArraySlice<'_> {
    type Iter<'b>
        = ArrayCursor<'b>
    where
        Self: 'b;

    #[inline]
    fn len(&self) -> usize {
        self.end - self.begin
    }

    fn contains(&self, id: &impl DbidRef) -> bool {
        self.as_slice().contains(&id.internal_index())
    }

    fn iter(&self) -> ArrayCursor<'_> {
        ArrayCursor::new(self.as_slice())
    }
}

impl ArrayDbids for ArraySlice<'_> {
    type Slice<'b>
        = ArraySlice<'b>
    where
        Self: 'b;

    fn get(&self, index: usize) -> Result<Dbid> {
        self.as_slice()
            .get(index)
            .map(|&id| Dbid::new(id))
            .ok_or_else(|| Error::out_of_bounds(index, self.len()))
    }

    /// A view of a sorted array is sorted. Views of unsorted arrays are
    /// verified with a linear scan before searching.
    fn binary_search(&self, key: &impl DbidRef) -> Result<std::result::Result<usize, usize>> {
        let data = self.as_slice();
        if !self.sorted && !super::is_ascending(data) {
            return Err(Error::NotSorted);
        }
        Ok(super::search_sorted(data, key.internal_index()))
    }

    fn slice(&self, begin: usize, end: usize) -> Result<ArraySlice<'_>> {
        let len = self.len();
        if begin > end || end > len {
            return Err(Error::InvalidSlice { begin, end, len });
        }
        Ok(ArraySlice {
            store: self.store,
            begin: self.begin + begin,
            end: self.begin + end,
            sorted: self.sorted,
        })
    }
}

impl<'a> IntoIterator for &ArraySlice<'a> {
    type Item = Dbid;
    type IntoIter = ArrayCursor<'a>;

    fn into_iter(self) -> ArrayCursor<'a> {
        ArrayCursor::new(self.as_slice())
    }
}

//! Growable array of identifiers.
//!
//! Dense `i32` storage with a logical size. Removal swaps the last element
//! into the hole, so insertion order only survives until the first removal.
//!
//! The array tracks whether it is known to be sorted ascending by internal
//! index. [`ArrayModifiableDbids::sort`] sets the flag, appends keep it while
//! they stay in order, and any other mutation clears it. Binary search
//! refuses to run while the flag is clear.

use std::cmp::Ordering;

use super::cursor::{ArrayCursor, DbidArrayCursor, DbidCursor};
use super::hash_set::HashSetModifiableDbids;
use super::slice::ArraySlice;
use super::{ArrayDbids, Dbids, ModifiableDbids};
use crate::dbid::{Dbid, DbidRef};
use crate::error::{Error, Result};
use crate::sort;

/// Default initial capacity.
pub const DEFAULT_INITIAL_CAPACITY: usize = 21;

/// Probe collections larger than this are copied into a hash set before
/// bulk membership scans.
pub const SET_CONVERSION_THRESHOLD: usize = 16;

/// Growable, mutable array of identifiers.
#[derive(Debug, Clone)]
pub struct ArrayModifiableDbids {
    store: Vec<i32>,
    sorted: bool,
}

impl Default for ArrayModifiableDbids {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrayModifiableDbids {
    /// Creates an empty array with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Creates an empty array able to hold `capacity` ids without growing.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            sorted: true,
        }
    }

    /// Copies the ids of an existing collection.
    #[must_use]
    pub fn from_dbids<D: Dbids + ?Sized>(ids: &D) -> Self {
        let mut array = Self::with_capacity(ids.len());
        array.add_all(ids);
        array
    }

    /// Raw ids in storage order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.store
    }

    /// Current capacity of the backing buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns true if the array is known to be sorted by internal index.
    #[inline]
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Grows by half of the current capacity once the buffer is full.
    fn ensure_room(&mut self, additional: usize) {
        let needed = self.store.len() + additional;
        let cap = self.store.capacity();
        if needed <= cap {
            return;
        }
        let grown = (cap + (cap >> 1)).max(needed).max(4);
        self.store.reserve_exact(grown - self.store.len());
    }

    fn push_raw(&mut self, id: i32) {
        self.ensure_room(1);
        if self.sorted {
            if let Some(&last) = self.store.last() {
                self.sorted = last <= id;
            }
        }
        self.store.push(id);
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.store.len() {
            Ok(())
        } else {
            Err(Error::out_of_bounds(index, self.store.len()))
        }
    }

    /// Replaces the id at `index`, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] past the end.
    pub fn set(&mut self, index: usize, id: &impl DbidRef) -> Result<Dbid> {
        self.check_index(index)?;
        let previous = std::mem::replace(&mut self.store[index], id.internal_index());
        self.sorted = false;
        Ok(Dbid::new(previous))
    }

    /// Inserts at `index`, shifting later ids back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] for `index > len`.
    pub fn insert(&mut self, index: usize, id: &impl DbidRef) -> Result<()> {
        if index > self.store.len() {
            return Err(Error::out_of_bounds(index, self.store.len()));
        }
        self.ensure_room(1);
        self.store.insert(index, id.internal_index());
        self.sorted = false;
        Ok(())
    }

    /// Removes the id at `index` by moving the last id into its place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] past the end.
    pub fn remove_at(&mut self, index: usize) -> Result<Dbid> {
        self.check_index(index)?;
        let removed = self.store.swap_remove(index);
        if index < self.store.len() {
            self.sorted = false;
        }
        Ok(Dbid::new(removed))
    }

    /// Swaps two positions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if either position is past the end.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        if a != b {
            self.store.swap(a, b);
            self.sorted = false;
        }
        Ok(())
    }

    /// Shortens the array to `len` ids.
    pub fn truncate(&mut self, len: usize) {
        self.store.truncate(len);
    }

    /// Sorts ascending by internal index.
    pub fn sort(&mut self) {
        self.store.sort_unstable();
        self.sorted = true;
    }

    /// Sorts with a custom order using the dual-pivot quicksort.
    ///
    /// Unless the custom order happens to agree with the internal index,
    /// [`ArrayDbids::binary_search`] is rejected until the next
    /// [`ArrayModifiableDbids::sort`].
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(Dbid, Dbid) -> Ordering,
    {
        sort::sort_by(&mut self.store, compare);
        self.sorted = crate::collections::is_ascending(&self.store);
    }

    /// Keeps only the ids also contained in `other`.
    ///
    /// Returns true if anything was removed.
    pub fn retain_all<D: Dbids + ?Sized>(&mut self, other: &D) -> bool {
        if !other.has_fast_contains() && other.len() > SET_CONVERSION_THRESHOLD {
            let probe = HashSetModifiableDbids::from_dbids(other);
            return self.swap_retain(|id| probe.contains(&id));
        }
        self.swap_retain(|id| other.contains(&id))
    }

    /// Removes every id rejected by `keep`, filling holes from the back.
    fn swap_retain<F: FnMut(i32) -> bool>(&mut self, mut keep: F) -> bool {
        let before = self.store.len();
        let mut i = 0;
        while i < self.store.len() {
            if keep(self.store[i]) {
                i += 1;
                continue;
            }
            self.store.swap_remove(i);
            if i < self.store.len() {
                self.sorted = false;
            }
            // The id swapped into position i is examined next.
        }
        self.store.len() != before
    }

    /// Mutable cursor supporting removal.
    pub fn cursor_mut(&mut self) -> ArrayCursorMut<'_> {
        ArrayCursorMut { ids: self, pos: 0 }
    }

    /// Raw mutable access for in-crate algorithms that keep the sorted
    /// flag up to date themselves.
    pub(crate) fn raw_mut(&mut self) -> &mut Vec<i32> {
        self.sorted = false;
        &mut self.store
    }
}

impl Dbids for ArrayModifiableDbids {
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
            return super::search_sorted(&self.store, key).is_ok();
        }
        self.store.contains(&key)
    }

    fn iter(&self) -> ArrayCursor<'_> {
        ArrayCursor::new(&self.store)
    }
}

impl ArrayDbids for ArrayModifiableDbids {
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

impl ModifiableDbids for ArrayModifiableDbids {
    fn add(&mut self, id: &impl DbidRef) -> bool {
        self.push_raw(id.internal_index());
        true
    }

    fn add_all<D: Dbids + ?Sized>(&mut self, ids: &D) -> bool {
        let count = ids.len();
        if count == 0 {
            return false;
        }
        if self.store.len() + count > self.store.capacity() {
            self.store.reserve_exact(count);
        }
        for id in ids.iter() {
            self.push_raw(id.as_i32());
        }
        true
    }

    fn remove(&mut self, id: &impl DbidRef) -> bool {
        let key = id.internal_index();
        match self.store.iter().position(|&x| x == key) {
            Some(pos) => {
                self.store.swap_remove(pos);
                if pos < self.store.len() {
                    self.sorted = false;
                }
                true
            }
            None => false,
        }
    }

    fn remove_all<D: Dbids + ?Sized>(&mut self, ids: &D) -> bool {
        if !ids.has_fast_contains() && ids.len() > SET_CONVERSION_THRESHOLD {
            let probe = HashSetModifiableDbids::from_dbids(ids);
            return self.swap_retain(|id| !probe.contains(&id));
        }
        self.swap_retain(|id| !ids.contains(&id))
    }

    fn clear(&mut self) {
        self.store.clear();
        self.sorted = true;
    }
}

impl Extend<Dbid> for ArrayModifiableDbids {
    fn extend<T: IntoIterator<Item = Dbid>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.ensure_room(lower);
        for id in iter {
            self.push_raw(id.as_i32());
        }
    }
}

impl FromIterator<Dbid> for ArrayModifiableDbids {
    fn from_iter<T: IntoIterator<Item = Dbid>>(iter: T) -> Self {
        let mut array = Self::with_capacity(0);
        array.extend(iter);
        array
    }
}

impl<'a> IntoIterator for &'a ArrayModifiableDbids {
    type Item = Dbid;
    type IntoIter = ArrayCursor<'a>;

    fn into_iter(self) -> ArrayCursor<'a> {
        self.iter()
    }
}

/// Mutable cursor over an [`ArrayModifiableDbids`].
///
/// [`ArrayCursorMut::remove`] moves the last id into the current position,
/// so after a removal the cursor already points at the next id to visit.
#[derive(Debug)]
pub struct ArrayCursorMut<'a> {
    ids: &'a mut ArrayModifiableDbids,
    pos: isize,
}

impl ArrayCursorMut<'_> {
    /// Removes the id under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the cursor is not valid.
    pub fn remove(&mut self) -> Result<Dbid> {
        if !self.valid() {
            return Err(Error::out_of_bounds(
                self.pos.max(0) as usize,
                self.ids.len(),
            ));
        }
        self.ids.remove_at(self.pos as usize)
    }

    /// Replaces the id under the cursor, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the cursor is not valid.
    pub fn set(&mut self, id: &impl DbidRef) -> Result<Dbid> {
        if !self.valid() {
            return Err(Error::out_of_bounds(
                self.pos.max(0) as usize,
                self.ids.len(),
            ));
        }
        self.ids.set(self.pos as usize, id)
    }
}

impl DbidRef for ArrayCursorMut<'_> {
    fn internal_index(&self) -> i32 {
        if self.valid() {
            self.ids.store[self.pos as usize]
        } else {
            i32::MIN
        }
    }
}

impl DbidCursor for ArrayCursorMut<'_> {
    fn valid(&self) -> bool {
        self.pos >= 0 && (self.pos as usize) < self.ids.len()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }
}

impl DbidArrayCursor for ArrayCursorMut<'_> {
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

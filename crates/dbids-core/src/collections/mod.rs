//! DBID collections.
//!
//! Interchangeable backings for sets of record identifiers:
//!
//! | Type | Order | Mutation | `contains` |
//! |------|-------|----------|------------|
//! | [`ArrayModifiableDbids`] | insertion (until a removal) | yes | O(n) |
//! | [`ArrayStaticDbids`] | fixed | no | O(n), O(log n) if sorted |
//! | [`ArraySlice`] | view of an array | no | O(n) |
//! | [`HashSetModifiableDbids`] | unspecified | yes | O(1) expected |
//! | [`DbidRange`](crate::range::DbidRange) | ascending | no | O(1) |
//!
//! All of them are walked with the stateful cursors of [`cursor`].

pub mod array;
pub mod array_static;
pub mod cursor;
pub mod hash_set;
pub mod select;
pub mod slice;

#[cfg(test)]
mod hash_set_tests;

pub use array::{ArrayCursorMut, ArrayModifiableDbids};
pub use array_static::ArrayStaticDbids;
pub use cursor::{ArrayCursor, DbidArrayCursor, DbidCursor, SingleCursor};
pub use hash_set::{HashSetCursor, HashSetModifiableDbids};
pub use slice::ArraySlice;

use crate::dbid::{Dbid, DbidRef};
use crate::error::Result;
use crate::var::DbidVar;

/// Read-only collection of identifiers.
pub trait Dbids {
    /// Cursor type returned by [`Dbids::iter`].
    type Iter<'a>: DbidCursor + Iterator<Item = Dbid>
    where
        Self: 'a;

    /// Number of ids.
    fn len(&self) -> usize;

    /// Returns true if the collection holds no ids.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership test on the internal index.
    fn contains(&self, id: &impl DbidRef) -> bool;

    /// Returns a fresh cursor positioned on the first id.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns true if `contains` runs in (expected) constant time.
    ///
    /// Set algebra uses this to decide which side to probe.
    fn has_fast_contains(&self) -> bool {
        false
    }
}

/// Collection with positional access.
pub trait ArrayDbids: Dbids {
    /// View type returned by [`ArrayDbids::slice`].
    type Slice<'a>: ArrayDbids
    where
        Self: 'a;

    /// Id at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// past the end.
    fn get(&self, index: usize) -> Result<Dbid>;

    /// Binary search by internal index.
    ///
    /// Returns `Ok(Ok(pos))` when found and `Ok(Err(insertion_point))`
    /// otherwise, like [`slice::binary_search`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSorted`](crate::Error::NotSorted) if the
    /// collection is not sorted ascending by internal index.
    fn binary_search(&self, key: &impl DbidRef) -> Result<std::result::Result<usize, usize>>;

    /// View of `[begin, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSlice`](crate::Error::InvalidSlice) for
    /// `begin > end` or `end > len`.
    fn slice(&self, begin: usize, end: usize) -> Result<Self::Slice<'_>>;

    /// Stores the id at `index` into `var`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`](crate::Error::IndexOutOfBounds)
    /// past the end.
    fn assign_var(&self, index: usize, var: &mut DbidVar) -> Result<()> {
        var.set(&self.get(index)?);
        Ok(())
    }
}

/// Collection that can grow and shrink.
pub trait ModifiableDbids: Dbids {
    /// Adds one id. Returns false if a set already contained it.
    fn add(&mut self, id: &impl DbidRef) -> bool;

    /// Adds every id of `ids`. Returns true if the collection changed.
    fn add_all<D: Dbids + ?Sized>(&mut self, ids: &D) -> bool;

    /// Removes one occurrence of `id`. Returns true if something was removed.
    fn remove(&mut self, id: &impl DbidRef) -> bool;

    /// Removes every id contained in `ids`. Returns true if something was
    /// removed.
    fn remove_all<D: Dbids + ?Sized>(&mut self, ids: &D) -> bool;

    /// Removes everything.
    fn clear(&mut self);
}

/// Binary search over a raw sorted buffer.
pub(crate) fn search_sorted(data: &[i32], key: i32) -> std::result::Result<usize, usize> {
    data.binary_search(&key)
}

/// Linear check that a raw buffer is ascending.
pub(crate) fn is_ascending(data: &[i32]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

//! Hash set of identifiers.
//!
//! Backed by `FxHashSet<i32>`: the keys are small integers, for which the
//! Fx hash is both fast and well distributed.

use rustc_hash::FxHashSet;

use super::cursor::DbidCursor;
use super::{Dbids, ModifiableDbids};
use crate::dbid::{Dbid, DbidRef};

/// Mutable set of identifiers with unspecified iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashSetModifiableDbids {
    set: FxHashSet<i32>,
}

impl HashSetModifiableDbids {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `capacity` ids.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            set: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Copies the ids of an existing collection, dropping duplicates.
    #[must_use]
    pub fn from_dbids<D: Dbids + ?Sized>(ids: &D) -> Self {
        let mut set = Self::with_capacity(ids.len());
        set.add_all(ids);
        set
    }

    /// In-place intersection: drops every id not contained in `other`.
    ///
    /// Returns true if anything was removed.
    pub fn retain_all<D: Dbids + ?Sized>(&mut self, other: &D) -> bool {
        let before = self.set.len();
        self.set.retain(|id| other.contains(id));
        self.set.len() != before
    }
}

impl Dbids for HashSetModifiableDbids {
    type Iter<'a>
        = HashSetCursor<'a>
    where
        Self: 'a;

    #[inline]
    fn len(&self) -> usize {
        self.set.len()
    }

    #[inline]
    fn contains(&self, id: &impl DbidRef) -> bool {
        self.set.contains(&id.internal_index())
    }

    fn iter(&self) -> HashSetCursor<'_> {
        let mut inner = self.set.iter();
        let current = inner.next().copied();
        HashSetCursor { inner, current }
    }

    #[inline]
    fn has_fast_contains(&self) -> bool {
        true
    }
}

impl ModifiableDbids for HashSetModifiableDbids {
    #[inline]
    fn add(&mut self, id: &impl DbidRef) -> bool {
        self.set.insert(id.internal_index())
    }

    fn add_all<D: Dbids + ?Sized>(&mut self, ids: &D) -> bool {
        let before = self.set.len();
        self.set.reserve(ids.len());
        self.set.extend(ids.iter().map(Dbid::as_i32));
        self.set.len() != before
    }

    #[inline]
    fn remove(&mut self, id: &impl DbidRef) -> bool {
        self.set.remove(&id.internal_index())
    }

    fn remove_all<D: Dbids + ?Sized>(&mut self, ids: &D) -> bool {
        let before = self.set.len();
        if ids.has_fast_contains() && ids.len() > self.set.len() {
            self.set.retain(|id| !ids.contains(id));
        } else {
            for id in ids.iter() {
                self.set.remove(&id.as_i32());
            }
        }
        self.set.len() != before
    }

    fn clear(&mut self) {
        self.set.clear();
    }
}

impl Extend<Dbid> for HashSetModifiableDbids {
    fn extend<T: IntoIterator<Item = Dbid>>(&mut self, iter: T) {
        self.set.extend(iter.into_iter().map(Dbid::as_i32));
    }
}

impl FromIterator<Dbid> for HashSetModifiableDbids {
    fn from_iter<T: IntoIterator<Item = Dbid>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a HashSetModifiableDbids {
    type Item = Dbid;
    type IntoIter = HashSetCursor<'a>;

    fn into_iter(self) -> HashSetCursor<'a> {
        self.iter()
    }
}

/// Forward cursor over a [`HashSetModifiableDbids`].
#[derive(Debug, Clone)]
pub struct HashSetCursor<'a> {
    inner: std::collections::hash_set::Iter<'a, i32>,
    current: Option<i32>,
}

impl DbidRef for HashSetCursor<'_> {
    #[inline]
    fn internal_index(&self) -> i32 {
        self.current.unwrap_or(i32::MIN)
    }
}

impl DbidCursor for HashSetCursor<'_> {
    #[inline]
    fn valid(&self) -> bool {
        self.current.is_some()
    }

    #[inline]
    fn advance(&mut self) {
        self.current = self.inner.next().copied();
    }
}

impl Iterator for HashSetCursor<'_> {
    type Item = Dbid;

    fn next(&mut self) -> Option<Dbid> {
        let id = self.current?;
        self.advance();
        Some(Dbid::new(id))
    }
}

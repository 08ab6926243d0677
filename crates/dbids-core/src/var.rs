//! Single rebindable identifier slot.
//!
//! A [`DbidVar`] is a scratch register for algorithms that track "the
//! current best" record: rebinding is a plain integer store.

use crate::collections::cursor::SingleCursor;
use crate::collections::{ArrayDbids, ArraySlice, Dbids};
use crate::dbid::{Dbid, DbidRef};
use crate::error::{Error, Result};

/// Mutable slot holding at most one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DbidVar {
    id: i32,
}

impl DbidVar {
    /// Creates an unset variable.
    #[must_use]
    pub const fn new() -> Self {
        Self { id: i32::MIN }
    }

    /// Creates a variable bound to `id`.
    #[must_use]
    pub fn with(id: &impl DbidRef) -> Self {
        Self {
            id: id.internal_index(),
        }
    }

    /// Rebinds to `id`.
    #[inline]
    pub fn set(&mut self, id: &impl DbidRef) {
        self.id = id.internal_index();
    }

    /// Clears the binding.
    #[inline]
    pub fn unset(&mut self) {
        self.id = i32::MIN;
    }

    /// Returns true if the variable holds an id.
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.id != i32::MIN
    }

    /// Current binding, `None` when unset.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<Dbid> {
        self.is_set().then_some(Dbid::new(self.id))
    }
}

impl Default for DbidVar {
    fn default() -> Self {
        Self::new()
    }
}

impl DbidRef for DbidVar {
    #[inline]
    fn internal_index(&self) -> i32 {
        self.id
    }
}

impl Dbids for DbidVar {
    type Iter<'a> = SingleCursor;

    fn len(&self) -> usize {
        usize::from(self.is_set())
    }

    fn contains(&self, id: &impl DbidRef) -> bool {
        self.is_set() && self.id == id.internal_index()
    }

    fn iter(&self) -> SingleCursor {
        SingleCursor::new(self.id)
    }

    fn has_fast_contains(&self) -> bool {
        true
    }
}

impl ArrayDbids for DbidVar {
    type Slice<'a> = ArraySlice<'a>;

    fn get(&self, index: usize) -> Result<Dbid> {
        if index < self.len() {
            Ok(Dbid::new(self.id))
        } else {
            Err(Error::out_of_bounds(index, self.len()))
        }
    }

    fn binary_search(&self, key: &impl DbidRef) -> Result<std::result::Result<usize, usize>> {
        if !self.is_set() {
            return Ok(Err(0));
        }
        Ok(match key.internal_index().cmp(&self.id) {
            std::cmp::Ordering::Less => Err(0),
            std::cmp::Ordering::Equal => Ok(0),
            std::cmp::Ordering::Greater => Err(1),
        })
    }

    fn slice(&self, begin: usize, end: usize) -> Result<ArraySlice<'_>> {
        let len = self.len();
        ArraySlice::new(&std::slice::from_ref(&self.id)[..len], begin, end, true)
    }
}

//! Stateful cursors over DBID collections.
//!
//! A cursor is a small value (a borrowed buffer plus a position) that is
//! moved with `advance`/`retract`/`seek` and read through [`DbidRef`].
//! One cursor can walk a whole collection, back and forth, without any
//! per-step allocation. Every cursor is also an [`Iterator`] for use with
//! ordinary iterator adapters.
//!
//! Reading an invalid cursor yields the invalid sentinel `i32::MIN`.

use crate::dbid::{Dbid, DbidRef};

/// Forward cursor.
pub trait DbidCursor: DbidRef {
    /// Returns true while the cursor points at an element.
    fn valid(&self) -> bool;

    /// Moves to the next element.
    fn advance(&mut self);
}

/// Random-access cursor over an array-like collection.
pub trait DbidArrayCursor: DbidCursor {
    /// Moves by `count` positions (negative values move backwards).
    fn advance_by(&mut self, count: isize);

    /// Moves to the previous element.
    fn retract(&mut self);

    /// Moves to an absolute position.
    fn seek(&mut self, offset: isize);

    /// Current position.
    fn offset(&self) -> isize;
}

/// Cursor over a borrowed run of raw ids.
#[derive(Debug, Clone, Copy)]
pub struct ArrayCursor<'a> {
    data: &'a [i32],
    pos: isize,
}

impl<'a> ArrayCursor<'a> {
    pub(crate) fn new(data: &'a [i32]) -> Self {
        Self { data, pos: 0 }
    }
}

impl DbidRef for ArrayCursor<'_> {
    #[inline]
    fn internal_index(&self) -> i32 {
        if self.valid() {
            self.data[self.pos as usize]
        } else {
            i32::MIN
        }
    }
}

impl DbidCursor for ArrayCursor<'_> {
    #[inline]
    fn valid(&self) -> bool {
        self.pos >= 0 && (self.pos as usize) < self.data.len()
    }

    #[inline]
    fn advance(&mut self) {
        self.pos += 1;
    }
}

impl DbidArrayCursor for ArrayCursor<'_> {
    #[inline]
    fn advance_by(&mut self, count: isize) {
        self.pos += count;
    }

    #[inline]
    fn retract(&mut self) {
        self.pos -= 1;
    }

    #[inline]
    fn seek(&mut self, offset: isize) {
        self.pos = offset;
    }

    #[inline]
    fn offset(&self) -> isize {
        self.pos
    }
}

impl Iterator for ArrayCursor<'_> {
    type Item = Dbid;

    #[inline]
    fn next(&mut self) -> Option<Dbid> {
        if !self.valid() {
            return None;
        }
        let id = Dbid::new(self.data[self.pos as usize]);
        self.pos += 1;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = if self.valid() {
            self.data.len() - self.pos as usize
        } else {
            0
        };
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for ArrayCursor<'_> {}

/// Cursor over at most one id, used by [`DbidVar`](crate::var::DbidVar).
#[derive(Debug, Clone, Copy)]
pub struct SingleCursor {
    id: i32,
    pos: isize,
    len: isize,
}

impl SingleCursor {
    pub(crate) fn new(id: i32) -> Self {
        Self {
            id,
            pos: 0,
            len: isize::from(id != i32::MIN),
        }
    }
}

impl DbidRef for SingleCursor {
    #[inline]
    fn internal_index(&self) -> i32 {
        if self.valid() {
            self.id
        } else {
            i32::MIN
        }
    }
}

impl DbidCursor for SingleCursor {
    #[inline]
    fn valid(&self) -> bool {
        self.pos >= 0 && self.pos < self.len
    }

    #[inline]
    fn advance(&mut self) {
        self.pos += 1;
    }
}

impl DbidArrayCursor for SingleCursor {
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

impl Iterator for SingleCursor {
    type Item = Dbid;

    fn next(&mut self) -> Option<Dbid> {
        if !self.valid() {
            return None;
        }
        self.pos += 1;
        Some(Dbid::new(self.id))
    }
}

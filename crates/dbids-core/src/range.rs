//! Contiguous blocks of statically allocated identifiers.
//!
//! A [`DbidRange`] covers `[start, start + len)`. Storage layers keep one
//! dense array per attribute and map a record to its row with
//! [`DbidRange::offset`], a single subtraction.

use serde::{Deserialize, Serialize};

use crate::collections::cursor::{DbidArrayCursor, DbidCursor};
use crate::collections::{ArrayDbids, Dbids};
use crate::dbid::{Dbid, DbidRef};
use crate::error::{Error, Result};

/// Immutable contiguous range of identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RangeParts")]
pub struct DbidRange {
    start: i32,
    len: u32,
}

/// Unchecked wire form of a [`DbidRange`].
#[derive(Deserialize)]
struct RangeParts {
    start: i32,
    len: u32,
}

impl TryFrom<RangeParts> for DbidRange {
    type Error = Error;

    fn try_from(parts: RangeParts) -> Result<Self> {
        Self::new(parts.start, parts.len as usize)
    }
}

impl DbidRange {
    /// Creates a range, checking that `start >= 0` and that the last id
    /// still fits into an `i32`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a negative start or a range
    /// reaching past `i32::MAX`.
    pub fn new(start: i32, len: usize) -> Result<Self> {
        if start < 0 {
            return Err(Error::InvalidArgument(format!(
                "range start must be non-negative, got {start}"
            )));
        }
        let end = i64::from(start) + len as i64;
        if end > i64::from(i32::MAX) + 1 {
            return Err(Error::InvalidArgument(format!(
                "range [{start}, +{len}) exceeds the 32-bit id space"
            )));
        }
        Ok(Self {
            start,
            len: len as u32,
        })
    }

    /// Builds a range without validation. Callers guarantee the invariants.
    pub(crate) const fn from_parts(start: i32, len: u32) -> Self {
        Self { start, len }
    }

    /// First id of the range.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> i32 {
        self.start
    }

    /// One past the last id, widened so that a range ending at
    /// `i32::MAX` stays representable.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.start as i64 + self.len as i64
    }

    /// Offset of `id` relative to the start of the range.
    ///
    /// No bounds check: ids outside the range produce offsets outside
    /// `0..len`. Use [`DbidRange::index_of`] for a checked variant.
    #[inline]
    #[must_use]
    pub fn offset(&self, id: &impl DbidRef) -> i64 {
        i64::from(id.internal_index()) - i64::from(self.start)
    }

    /// Checked position of `id` in this range.
    #[inline]
    #[must_use]
    pub fn index_of(&self, id: &impl DbidRef) -> Option<usize> {
        let off = self.offset(id);
        if off >= 0 && off < i64::from(self.len) {
            Some(off as usize)
        } else {
            None
        }
    }

    /// Returns true if the two ranges share at least one id.
    #[must_use]
    pub fn overlaps(&self, other: &DbidRange) -> bool {
        self.len > 0
            && other.len > 0
            && i64::from(self.start) < other.end()
            && i64::from(other.start) < self.end()
    }

    /// Iterates over the ids of the range.
    #[must_use]
    pub fn cursor(&self) -> RangeCursor {
        RangeCursor {
            start: self.start,
            len: self.len as isize,
            pos: 0,
        }
    }
}

impl Dbids for DbidRange {
    type Iter<'a> = RangeCursor;

    #[inline]
    fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    fn contains(&self, id: &impl DbidRef) -> bool {
        self.index_of(id).is_some()
    }

    fn iter(&self) -> RangeCursor {
        self.cursor()
    }

    #[inline]
    fn has_fast_contains(&self) -> bool {
        true
    }
}

impl ArrayDbids for DbidRange {
    type Slice<'a> = DbidRange;

    fn get(&self, index: usize) -> Result<Dbid> {
        if index >= self.len as usize {
            return Err(Error::out_of_bounds(index, self.len as usize));
        }
        Ok(Dbid::new(self.start + index as i32))
    }

    /// Ranges are sorted by construction, the search is pure arithmetic.
    fn binary_search(&self, key: &impl DbidRef) -> Result<std::result::Result<usize, usize>> {
        let off = self.offset(key);
        Ok(if off < 0 {
            Err(0)
        } else if off >= i64::from(self.len) {
            Err(self.len as usize)
        } else {
            Ok(off as usize)
        })
    }

    fn slice(&self, begin: usize, end: usize) -> Result<DbidRange> {
        let len = self.len as usize;
        if begin > end || end > len {
            return Err(Error::InvalidSlice { begin, end, len });
        }
        Ok(Self::from_parts(
            self.start + begin as i32,
            (end - begin) as u32,
        ))
    }
}

/// Cursor over a [`DbidRange`]. Pure arithmetic, no backing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeCursor {
    start: i32,
    len: isize,
    pos: isize,
}

impl DbidRef for RangeCursor {
    #[inline]
    fn internal_index(&self) -> i32 {
        if self.valid() {
            self.start + self.pos as i32
        } else {
            i32::MIN
        }
    }
}

impl DbidCursor for RangeCursor {
    #[inline]
    fn valid(&self) -> bool {
        self.pos >= 0 && self.pos < self.len
    }

    #[inline]
    fn advance(&mut self) {
        self.pos += 1;
    }
}

impl DbidArrayCursor for RangeCursor {
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

impl Iterator for RangeCursor {
    type Item = Dbid;

    fn next(&mut self) -> Option<Dbid> {
        if !self.valid() {
            return None;
        }
        let id = self.as_dbid();
        self.pos += 1;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = if self.valid() {
            (self.len - self.pos) as usize
        } else {
            0
        };
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for RangeCursor {}

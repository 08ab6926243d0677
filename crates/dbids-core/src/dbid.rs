//! Database record identifiers.
//!
//! A [`Dbid`] is a plain 32-bit integer. Non-negative values belong to
//! statically allocated ranges, negative values to individually allocated
//! records, and `i32::MIN` is reserved as the invalid sentinel.
//!
//! Everything that can name a record (a handle, a cursor positioned on an
//! element, a [`DbidVar`](crate::var::DbidVar), a distance pair) implements
//! [`DbidRef`]. Equality and ordering always go through the extracted
//! integer, never through the identity of the object holding it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Integer-backed handle for one dataset record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dbid(i32);

impl Dbid {
    /// Reserved sentinel that never names a record.
    pub const INVALID: Dbid = Dbid(i32::MIN);

    /// Wraps a raw integer, e.g. when deserializing.
    #[inline]
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw integer.
    #[inline]
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }

    /// Returns true unless this is the invalid sentinel.
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != i32::MIN
    }

    /// Returns true for ids handed out from a contiguous range.
    #[inline]
    #[must_use]
    pub const fn is_static(self) -> bool {
        self.0 >= 0
    }

    /// Returns true for individually allocated ids.
    #[inline]
    #[must_use]
    pub const fn is_dynamic(self) -> bool {
        self.0 < 0 && self.0 != i32::MIN
    }
}

impl Default for Dbid {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for Dbid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("invalid")
        }
    }
}

impl From<i32> for Dbid {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<Dbid> for i32 {
    fn from(id: Dbid) -> Self {
        id.0
    }
}

/// Anything that can be read as a record index.
pub trait DbidRef {
    /// Returns the raw integer this reference currently points to.
    fn internal_index(&self) -> i32;

    /// Materializes the reference as an owned handle.
    #[inline]
    fn as_dbid(&self) -> Dbid {
        Dbid(self.internal_index())
    }
}

impl DbidRef for Dbid {
    #[inline]
    fn internal_index(&self) -> i32 {
        self.0
    }
}

impl DbidRef for i32 {
    #[inline]
    fn internal_index(&self) -> i32 {
        *self
    }
}

impl<T: DbidRef + ?Sized> DbidRef for &T {
    #[inline]
    fn internal_index(&self) -> i32 {
        (**self).internal_index()
    }
}

impl<T: DbidRef + ?Sized> DbidRef for &mut T {
    #[inline]
    fn internal_index(&self) -> i32 {
        (**self).internal_index()
    }
}

/// Compares two references by their internal index.
#[inline]
#[must_use]
pub fn compare<A: DbidRef + ?Sized, B: DbidRef + ?Sized>(a: &A, b: &B) -> Ordering {
    a.internal_index().cmp(&b.internal_index())
}

/// Tests two references for equality of their internal index.
#[inline]
#[must_use]
pub fn equal<A: DbidRef + ?Sized, B: DbidRef + ?Sized>(a: &A, b: &B) -> bool {
    a.internal_index() == b.internal_index()
}

/// Formats a sequence of ids as `[a, b, c]`.
pub fn format_ids<I>(ids: I) -> String
where
    I: IntoIterator,
    I::Item: DbidRef,
{
    let mut out = String::from("[");
    for (i, id) in ids.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&id.as_dbid().to_string());
    }
    out.push(']');
    out
}

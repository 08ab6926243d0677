//! Compact pair types.
//!
//! - [`DoubleDbidPair`]: `(f64 distance, id)`, the element type of k-NN
//!   results.
//! - [`DistancePair`]: `(D distance, id)` for any numeric distance type that
//!   widens to `f64` (e.g. `f32` from SIMD kernels).
//! - [`DbidPair`]: two ids, e.g. an edge or a join result.
//!
//! Distance pairs compare equal when their ids match and their distances
//! are numerically equal, whichever concrete representation produced them.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::dbid::{Dbid, DbidRef};
use crate::sort::compare_keys;

/// Pair of a numeric distance and an identifier.
pub trait DistanceDbidPair: DbidRef {
    /// Distance widened to `f64`.
    fn distance(&self) -> f64;
}

/// Orders two distance pairs ascending by distance (NaN sorts last).
#[inline]
#[must_use]
pub fn compare_by_distance<A, B>(a: &A, b: &B) -> Ordering
where
    A: DistanceDbidPair + ?Sized,
    B: DistanceDbidPair + ?Sized,
{
    compare_keys(a.distance(), b.distance())
}

/// Representation-independent equality of two distance pairs.
#[inline]
#[must_use]
pub fn pair_equal<A, B>(a: &A, b: &B) -> bool
where
    A: DistanceDbidPair + ?Sized,
    B: DistanceDbidPair + ?Sized,
{
    a.internal_index() == b.internal_index() && a.distance() == b.distance()
}

/// `(f64 distance, id)` pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DoubleDbidPair {
    distance: f64,
    id: i32,
}

impl DoubleDbidPair {
    /// Creates a pair.
    #[inline]
    #[must_use]
    pub fn new(distance: f64, id: &impl DbidRef) -> Self {
        Self {
            distance,
            id: id.internal_index(),
        }
    }

    /// The distance.
    #[inline]
    #[must_use]
    pub const fn distance(&self) -> f64 {
        self.distance
    }

    /// The id.
    #[inline]
    #[must_use]
    pub const fn dbid(&self) -> Dbid {
        Dbid::new(self.id)
    }
}

impl DbidRef for DoubleDbidPair {
    #[inline]
    fn internal_index(&self) -> i32 {
        self.id
    }
}

impl DistanceDbidPair for DoubleDbidPair {
    #[inline]
    fn distance(&self) -> f64 {
        self.distance
    }
}

impl PartialEq for DoubleDbidPair {
    fn eq(&self, other: &Self) -> bool {
        pair_equal(self, other)
    }
}

impl PartialOrd for DoubleDbidPair {
    /// Orders by distance only. Pairs that compare equal by distance but
    /// are not `==` (different ids, or NaN distances) are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match compare_by_distance(self, other) {
            Ordering::Equal if !pair_equal(self, other) => None,
            ord => Some(ord),
        }
    }
}

impl fmt::Display for DoubleDbidPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.distance, self.dbid())
    }
}

/// `(D distance, id)` pair for distance types narrower than `f64`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DistancePair<D> {
    distance: D,
    id: i32,
}

impl<D: Copy + Into<f64>> DistancePair<D> {
    /// Creates a pair.
    #[inline]
    #[must_use]
    pub fn new(distance: D, id: &impl DbidRef) -> Self {
        Self {
            distance,
            id: id.internal_index(),
        }
    }

    /// The distance in its native representation.
    #[inline]
    #[must_use]
    pub fn raw_distance(&self) -> D {
        self.distance
    }

    /// The id.
    #[inline]
    #[must_use]
    pub const fn dbid(&self) -> Dbid {
        Dbid::new(self.id)
    }
}

impl<D: Copy + Into<f64>> DbidRef for DistancePair<D> {
    #[inline]
    fn internal_index(&self) -> i32 {
        self.id
    }
}

impl<D: Copy + Into<f64>> DistanceDbidPair for DistancePair<D> {
    #[inline]
    fn distance(&self) -> f64 {
        self.distance.into()
    }
}

impl<D: Copy + Into<f64>> From<DistancePair<D>> for DoubleDbidPair {
    fn from(pair: DistancePair<D>) -> Self {
        Self {
            distance: pair.distance.into(),
            id: pair.id,
        }
    }
}

impl<D: Copy + Into<f64>> PartialEq for DistancePair<D> {
    fn eq(&self, other: &Self) -> bool {
        pair_equal(self, other)
    }
}

impl<D: Copy + Into<f64>> PartialEq<DistancePair<D>> for DoubleDbidPair {
    fn eq(&self, other: &DistancePair<D>) -> bool {
        pair_equal(self, other)
    }
}

impl<D: Copy + Into<f64>> PartialEq<DoubleDbidPair> for DistancePair<D> {
    fn eq(&self, other: &DoubleDbidPair) -> bool {
        pair_equal(self, other)
    }
}

/// Pair of two identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DbidPair {
    first: i32,
    second: i32,
}

impl DbidPair {
    /// Creates a pair.
    #[must_use]
    pub fn new(first: &impl DbidRef, second: &impl DbidRef) -> Self {
        Self {
            first: first.internal_index(),
            second: second.internal_index(),
        }
    }

    /// First id.
    #[must_use]
    pub const fn first(&self) -> Dbid {
        Dbid::new(self.first)
    }

    /// Second id.
    #[must_use]
    pub const fn second(&self) -> Dbid {
        Dbid::new(self.second)
    }

    /// The same pair with both ids exchanged.
    #[must_use]
    pub const fn swapped(&self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }
}

impl fmt::Display for DbidPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first(), self.second())
    }
}

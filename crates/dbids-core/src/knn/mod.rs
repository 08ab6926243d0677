//! Bounded top-k accumulation for nearest-neighbor queries.
//!
//! Two realizations share the [`KnnHeap`] contract:
//!
//! - [`DoubleIntegerKnnHeap`]: binary max-heap plus a side list of ties,
//!   `O(log k)` per accepted candidate.
//! - [`SortedKnnHeap`]: dense sorted arrays with linear placement, faster
//!   for small `k`.
//!
//! Both keep every candidate whose distance equals the k-th smallest, so
//! the finalized [`KnnList`] may hold more than `k` entries. Pick one at
//! construction time with [`KnnAccumulator`].
//!
//! # Example
//!
//! ```
//! use dbids_core::knn::{KnnAccumulator, KnnHeap};
//! use dbids_core::{Dbid, Dbids};
//!
//! let mut knn = KnnAccumulator::with_defaults(2)?;
//! knn.insert(3.0, &Dbid::new(1));
//! knn.insert(1.0, &Dbid::new(2));
//! knn.insert(3.0, &Dbid::new(3));
//! let list = knn.to_knn_list();
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.kdist(), 3.0);
//! # Ok::<(), dbids_core::Error>(())
//! ```

pub mod distance_list;
pub mod heap;
pub mod list;
pub mod sorted;


pub use distance_list::DoubleDbidList;
pub use heap::DoubleIntegerKnnHeap;
pub use list::{KnnList, PairCursor};
pub use sorted::SortedKnnHeap;

use crate::config::KnnConfig;
use crate::dbid::DbidRef;
use crate::error::Result;
use crate::pair::{DistanceDbidPair, DoubleDbidPair};

/// Bounded accumulator of the `k` nearest candidates.
pub trait KnnHeap {
    /// Requested neighbor count.
    fn k(&self) -> usize;

    /// Number of candidates held, ties included.
    fn len(&self) -> usize;

    /// Returns true if nothing was accepted yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current k-th distance, `+∞` until `k` candidates were accepted.
    fn kdist(&self) -> f64;

    /// Offers a candidate and returns the updated k-th distance.
    fn insert(&mut self, distance: f64, id: &impl DbidRef) -> f64;

    /// Offers an existing distance pair.
    fn insert_pair(&mut self, pair: &impl DistanceDbidPair) -> f64 {
        self.insert(pair.distance(), pair)
    }

    /// Worst candidate currently held.
    fn peek(&self) -> Option<DoubleDbidPair>;

    /// Removes and returns the worst candidate currently held.
    fn poll(&mut self) -> Option<DoubleDbidPair>;

    /// Drops every candidate.
    fn clear(&mut self);

    /// Finalizes into an ascending neighbor list.
    fn to_knn_list(self) -> KnnList
    where
        Self: Sized;
}

/// KNN accumulator whose realization is fixed at construction.
#[derive(Debug, Clone)]
pub enum KnnAccumulator {
    /// Heap-backed, for large `k`.
    Heap(DoubleIntegerKnnHeap),
    /// Sorted-array-backed, for small `k`.
    Sorted(SortedKnnHeap),
}

impl KnnAccumulator {
    /// Creates an accumulator for `k` neighbors, using the sorted
    /// realization up to `config.sorted_max_k`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// for `k == 0`.
    pub fn new(k: usize, config: &KnnConfig) -> Result<Self> {
        if k <= config.sorted_max_k {
            Ok(Self::Sorted(SortedKnnHeap::new(k)?))
        } else {
            Ok(Self::Heap(DoubleIntegerKnnHeap::new(k)?))
        }
    }

    /// Creates an accumulator with the default [`KnnConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// for `k == 0`.
    pub fn with_defaults(k: usize) -> Result<Self> {
        Self::new(k, &KnnConfig::default())
    }

    /// Creates an accumulator pre-filled with the entries of `list`, so a
    /// query can be resumed with more candidates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// if the list was built with `k == 0`.
    pub fn from_list(list: &KnnList, config: &KnnConfig) -> Result<Self> {
        let mut acc = Self::new(list.k(), config)?;
        for pair in list {
            acc.insert_pair(&pair);
        }
        Ok(acc)
    }

    /// Returns true for the sorted-array realization.
    #[must_use]
    pub fn is_sorted_backed(&self) -> bool {
        matches!(self, Self::Sorted(_))
    }
}

impl KnnHeap for KnnAccumulator {
    fn k(&self) -> usize {
        match self {
            Self::Heap(h) => h.k(),
            Self::Sorted(s) => s.k(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Heap(h) => h.len(),
            Self::Sorted(s) => s.len(),
        }
    }

    fn kdist(&self) -> f64 {
        match self {
            Self::Heap(h) => h.kdist(),
            Self::Sorted(s) => s.kdist(),
        }
    }

    #[inline]
    fn insert(&mut self, distance: f64, id: &impl DbidRef) -> f64 {
        match self {
            Self::Heap(h) => h.insert(distance, id),
            Self::Sorted(s) => s.insert(distance, id),
        }
    }

    fn peek(&self) -> Option<DoubleDbidPair> {
        match self {
            Self::Heap(h) => h.peek(),
            Self::Sorted(s) => s.peek(),
        }
    }

    fn poll(&mut self) -> Option<DoubleDbidPair> {
        match self {
            Self::Heap(h) => h.poll(),
            Self::Sorted(s) => s.poll(),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Heap(h) => h.clear(),
            Self::Sorted(s) => s.clear(),
        }
    }

    fn to_knn_list(self) -> KnnList {
        match self {
            Self::Heap(h) => h.to_knn_list(),
            Self::Sorted(s) => s.to_knn_list(),
        }
    }
}

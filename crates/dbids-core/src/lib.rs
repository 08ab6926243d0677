//! # `dbids-core`
//!
//! Integer-backed record identifiers for data-mining engines.
//!
//! Every record of a dataset is named by a [`Dbid`], a plain `i32`. On top
//! of that handle this crate provides the plumbing that distance-based
//! algorithms spend most of their time in:
//!
//! ## Features
//!
//! - **Allocators**: trivial, simple and reusing strategies for single ids
//!   and contiguous [`DbidRange`]s, safe to share between threads
//! - **Collections**: growable and immutable arrays, hash sets, borrowed
//!   slices and stateful cursors, all over dense `i32` buffers
//! - **Bounded top-k**: heap and sorted-array KNN accumulators that keep
//!   every candidate tied at the k-th distance
//! - **Sorting**: dual-pivot quicksort over parallel distance/id arrays
//! - **Codecs**: varint and fixed 4-byte encodings for persistence
//!
//! ## Quick Start
//!
//! ```rust
//! use dbids_core::knn::KnnHeap;
//! use dbids_core::{ArrayDbids, DbidFactory, Dbids};
//!
//! let factory = DbidFactory::default();
//! let range = factory.generate_range(5)?;
//! assert_eq!(range.get(3)?.as_i32(), range.start() + 3);
//!
//! let mut knn = factory.new_heap(2)?;
//! for (i, dist) in [4.0, 1.0, 3.0, 3.0].into_iter().enumerate() {
//!     knn.insert(dist, &range.get(i)?);
//! }
//! let result = knn.to_knn_list();
//! assert_eq!(result.kdist(), 3.0);
//! assert_eq!(result.len(), 3);
//! # Ok::<(), dbids_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// =============================================================================
// NUMERIC CAST LINTS
// =============================================================================
// Ids are i32 by definition and positions are usize; conversions between the
// two are bounds-checked where they can fail.
// =============================================================================
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
// =============================================================================
// STYLISTIC LINTS
// =============================================================================
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::redundant_pub_crate)]
#![allow(clippy::use_self)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]
#![allow(clippy::missing_errors_doc)]

pub mod allocator;
pub mod codec;
pub mod collections;
pub mod config;
pub mod dbid;
pub mod error;
pub mod knn;
pub mod pair;
#[cfg(test)]
mod pair_tests;
pub mod range;
pub mod sort;
#[cfg(test)]
mod sort_tests;
pub mod sync;
pub mod util;
#[cfg(test)]
mod util_tests;
pub mod var;
#[cfg(test)]
mod var_tests;

pub use allocator::{
    AllocatorStrategy, DbidAllocator, DbidFactory, ReusingDbidAllocator, SimpleDbidAllocator,
    TrivialDbidAllocator,
};
pub use codec::{DbidCodec, FixedCodec, VarintCodec};
pub use collections::{
    ArrayDbids, ArrayModifiableDbids, ArraySlice, ArrayStaticDbids, DbidArrayCursor, DbidCursor,
    Dbids, HashSetModifiableDbids, ModifiableDbids,
};
pub use config::{ConfigError, DbidsConfig};
pub use dbid::{Dbid, DbidRef};
pub use error::{Error, Result};
pub use knn::{DoubleDbidList, KnnAccumulator, KnnHeap, KnnList};
pub use pair::{DbidPair, DistanceDbidPair, DistancePair, DoubleDbidPair};
pub use range::DbidRange;
pub use var::DbidVar;

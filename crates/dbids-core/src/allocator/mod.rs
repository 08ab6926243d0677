//! Identifier allocators.
//!
//! An allocator hands out single dynamic ids and contiguous static ranges.
//! Three strategies are available:
//!
//! | Strategy | Singles | Ranges | Reuse |
//! |----------|---------|--------|-------|
//! | [`TrivialDbidAllocator`] | `1, 2, 3, ...` | from the same counter | no |
//! | [`SimpleDbidAllocator`] | `-1, -2, -3, ...` | `0, len, ...` | no |
//! | [`ReusingDbidAllocator`] | lowest free slot | best-fit free range | yes |
//!
//! All allocators are `Send + Sync`. Trivial and simple allocation is a
//! single compare-and-swap; the reusing allocator serializes its
//! bookkeeping behind one mutex.

pub mod factory;
pub mod reusing;
pub mod simple;
pub mod trivial;

#[cfg(test)]
mod factory_tests;

pub use factory::DbidFactory;
pub use reusing::ReusingDbidAllocator;
pub use simple::SimpleDbidAllocator;
pub use trivial::TrivialDbidAllocator;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Debug;

use crate::dbid::{self, Dbid, DbidRef};
use crate::error::Result;
use crate::range::DbidRange;

/// Source of fresh identifiers.
pub trait DbidAllocator: Send + Sync + Debug {
    /// Wraps a raw integer obtained elsewhere, e.g. from a file.
    fn import_integer(&self, id: i32) -> Dbid {
        Dbid::new(id)
    }

    /// Allocates one dynamic id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationExhausted`](crate::Error::AllocationExhausted)
    /// once the id space is used up.
    fn generate_single(&self) -> Result<Dbid>;

    /// Allocates `size` contiguous static ids.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationExhausted`](crate::Error::AllocationExhausted)
    /// once the id space is used up.
    fn generate_range(&self, size: usize) -> Result<DbidRange>;

    /// Returns a single id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHandle`](crate::Error::UnknownHandle) for an
    /// id this allocator never handed out or that was already returned.
    fn deallocate_single(&self, id: &dyn DbidRef) -> Result<()>;

    /// Returns a range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownRange`](crate::Error::UnknownRange) for a
    /// range this allocator never handed out or that was already returned.
    fn deallocate_range(&self, range: &DbidRange) -> Result<()>;

    /// Orders two ids by internal index.
    fn compare(&self, a: &dyn DbidRef, b: &dyn DbidRef) -> Ordering {
        dbid::compare(a, b)
    }

    /// Equality by internal index.
    fn equal(&self, a: &dyn DbidRef, b: &dyn DbidRef) -> bool {
        dbid::equal(a, b)
    }
}

/// Allocation strategy selected through configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocatorStrategy {
    /// One shared counter for singles and ranges.
    Trivial,
    /// Separate counters, no reuse.
    #[default]
    Simple,
    /// Free-list reuse of singles and ranges.
    Reusing,
}

impl AllocatorStrategy {
    /// Builds a fresh allocator of this strategy.
    #[must_use]
    pub fn build(self) -> Box<dyn DbidAllocator> {
        match self {
            Self::Trivial => Box::new(TrivialDbidAllocator::new()),
            Self::Simple => Box::new(SimpleDbidAllocator::new()),
            Self::Reusing => Box::new(ReusingDbidAllocator::new()),
        }
    }

    /// Lowercase name as used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trivial => "trivial",
            Self::Simple => "simple",
            Self::Reusing => "reusing",
        }
    }
}

impl std::fmt::Display for AllocatorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn exhausted(what: &str) -> crate::Error {
    tracing::error!(what, "DBID allocation exhausted");
    crate::Error::AllocationExhausted(what.to_string())
}

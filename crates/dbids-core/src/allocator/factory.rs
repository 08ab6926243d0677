//! Entry point bundling an allocator with collection and KNN defaults.

use crate::collections::{ArrayModifiableDbids, Dbids, HashSetModifiableDbids};
use crate::config::{ConfigError, DbidsConfig};
use crate::dbid::{Dbid, DbidRef};
use crate::error::Result;
use crate::knn::{DoubleDbidList, KnnAccumulator, KnnList};
use crate::range::DbidRange;
use crate::var::DbidVar;

use super::DbidAllocator;

/// Allocator plus the settings new collections and heaps are built with.
#[derive(Debug)]
pub struct DbidFactory {
    allocator: Box<dyn DbidAllocator>,
    config: DbidsConfig,
}

impl DbidFactory {
    /// Builds a factory from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn from_config(config: DbidsConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        tracing::debug!(strategy = %config.allocator.strategy, "creating DBID factory");
        Ok(Self {
            allocator: config.allocator.strategy.build(),
            config,
        })
    }

    /// Wraps an existing allocator, using default settings otherwise.
    #[must_use]
    pub fn with_allocator(allocator: Box<dyn DbidAllocator>) -> Self {
        Self {
            allocator,
            config: DbidsConfig::default(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &DbidsConfig {
        &self.config
    }

    /// Underlying allocator.
    #[must_use]
    pub fn allocator(&self) -> &dyn DbidAllocator {
        self.allocator.as_ref()
    }

    /// See [`DbidAllocator::import_integer`].
    #[must_use]
    pub fn import_integer(&self, id: i32) -> Dbid {
        self.allocator.import_integer(id)
    }

    /// See [`DbidAllocator::generate_single`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationExhausted`](crate::Error::AllocationExhausted)
    /// once the id space is used up.
    pub fn generate_single(&self) -> Result<Dbid> {
        self.allocator.generate_single()
    }

    /// See [`DbidAllocator::generate_range`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationExhausted`](crate::Error::AllocationExhausted)
    /// once the id space is used up.
    pub fn generate_range(&self, size: usize) -> Result<DbidRange> {
        self.allocator.generate_range(size)
    }

    /// See [`DbidAllocator::deallocate_single`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHandle`](crate::Error::UnknownHandle) for an
    /// id that is not allocated.
    pub fn deallocate_single(&self, id: &impl DbidRef) -> Result<()> {
        self.allocator.deallocate_single(id)
    }

    /// See [`DbidAllocator::deallocate_range`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownRange`](crate::Error::UnknownRange) for a
    /// range that is not allocated.
    pub fn deallocate_range(&self, range: &DbidRange) -> Result<()> {
        self.allocator.deallocate_range(range)
    }

    /// Empty growable array with the configured initial capacity.
    #[must_use]
    pub fn new_array(&self) -> ArrayModifiableDbids {
        ArrayModifiableDbids::with_capacity(self.config.collections.initial_capacity)
    }

    /// Empty hash set.
    #[must_use]
    pub fn new_hash_set(&self) -> HashSetModifiableDbids {
        HashSetModifiableDbids::new()
    }

    /// Unset variable.
    #[must_use]
    pub fn new_var(&self) -> DbidVar {
        DbidVar::new()
    }

    /// KNN accumulator for `k` neighbors, realization chosen by the
    /// configured `sorted_max_k`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// for `k == 0`.
    pub fn new_heap(&self, k: usize) -> Result<KnnAccumulator> {
        KnnAccumulator::new(k, &self.config.knn)
    }

    /// KNN accumulator resuming from an existing result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// if the list was built with `k == 0`.
    pub fn new_heap_from(&self, list: &KnnList) -> Result<KnnAccumulator> {
        KnnAccumulator::from_list(list, &self.config.knn)
    }

    /// Empty distance list.
    #[must_use]
    pub fn new_distance_list(&self) -> DoubleDbidList {
        DoubleDbidList::with_capacity(self.config.collections.initial_capacity)
    }

    /// Intersection using the configured set conversion threshold.
    #[must_use]
    pub fn intersection<A, B>(&self, first: &A, second: &B) -> HashSetModifiableDbids
    where
        A: Dbids + ?Sized,
        B: Dbids + ?Sized,
    {
        crate::util::intersection_with_threshold(
            first,
            second,
            self.config.collections.set_conversion_threshold,
        )
    }
}

impl Default for DbidFactory {
    fn default() -> Self {
        let config = DbidsConfig::default();
        Self {
            allocator: config.allocator.strategy.build(),
            config,
        }
    }
}

//! Allocator that recycles returned ids and ranges.
//!
//! # Singles
//!
//! Dynamic ids map to dense slots, `slot p <-> id -p-1`. Slots below the
//! high-water mark that were returned sit in a [`RoaringBitmap`]; the
//! lowest free slot is reused first. Returning the topmost slot lowers the
//! high-water mark again.
//!
//! # Ranges
//!
//! Returned ranges are kept in a free list ordered by length. A request is
//! served by an exact-length match if there is one, otherwise by splitting
//! the shortest longer range and putting the remainder back. Only when no
//! free range is long enough is a fresh range cut from the static counter.

use std::collections::BTreeMap;

use roaring::RoaringBitmap;

use crate::collections::Dbids;
use crate::dbid::{Dbid, DbidRef};
use crate::error::{Error, Result};
use crate::range::DbidRange;
use crate::sync::Mutex;

use super::simple::SimpleDbidAllocator;
use super::{exhausted, DbidAllocator};

/// Slots `0..MAX_SLOTS` map to ids `-1..=i32::MIN + 1`.
const MAX_SLOTS: u32 = i32::MAX as u32;

#[derive(Debug, Default)]
struct ReusingState {
    /// Slots `0..high_water` were handed out at some point.
    high_water: u32,
    free_slots: RoaringBitmap,
    /// Returned ranges, ascending by length.
    free_ranges: Vec<DbidRange>,
    /// Ranges currently handed out, by start.
    live_ranges: BTreeMap<i32, u32>,
}

impl ReusingState {
    fn push_free_range(&mut self, range: DbidRange) {
        let pos = self
            .free_ranges
            .partition_point(|r| r.len() <= range.len());
        self.free_ranges.insert(pos, range);
    }
}

/// Free-list reusing allocator.
#[derive(Debug)]
pub struct ReusingDbidAllocator {
    fresh: SimpleDbidAllocator,
    state: Mutex<ReusingState>,
}

impl ReusingDbidAllocator {
    /// Creates an empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fresh: SimpleDbidAllocator::new(),
            state: Mutex::new(ReusingState::default()),
        }
    }

    /// Number of returned single slots waiting for reuse.
    #[must_use]
    pub fn free_single_count(&self) -> u64 {
        self.state.lock().free_slots.len()
    }

    /// Returned ranges waiting for reuse, ascending by length.
    #[must_use]
    pub fn free_ranges(&self) -> Vec<DbidRange> {
        self.state.lock().free_ranges.clone()
    }

    /// Number of ranges currently handed out.
    #[must_use]
    pub fn live_range_count(&self) -> usize {
        self.state.lock().live_ranges.len()
    }
}

impl Default for ReusingDbidAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn slot_to_id(slot: u32) -> i32 {
    debug_assert!(slot < MAX_SLOTS);
    -(slot as i32) - 1
}

#[inline]
fn id_to_slot(id: i32) -> Option<u32> {
    (id < 0 && id != i32::MIN).then(|| (-(id + 1)).unsigned_abs())
}

impl DbidAllocator for ReusingDbidAllocator {
    fn generate_single(&self) -> Result<Dbid> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let slot = if let Some(slot) = state.free_slots.min() {
            state.free_slots.remove(slot);
            slot
        } else {
            if state.high_water >= MAX_SLOTS {
                return Err(exhausted("reusing single"));
            }
            state.high_water += 1;
            state.high_water - 1
        };
        Ok(Dbid::new(slot_to_id(slot)))
    }

    fn generate_range(&self, size: usize) -> Result<DbidRange> {
        if size == 0 {
            return self.fresh.generate_range(0);
        }
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let idx = state.free_ranges.partition_point(|r| r.len() < size);
        if idx < state.free_ranges.len() {
            let candidate = state.free_ranges.remove(idx);
            let allocated = if candidate.len() == size {
                tracing::debug!(start = candidate.start(), size, "reusing free DBID range");
                candidate
            } else {
                // Remainder is non-empty, so `start + size` stays below the
                // candidate's end and fits an i32.
                let start = candidate.start();
                let size32 = size as u32;
                let rest = DbidRange::from_parts(
                    start + size as i32,
                    (candidate.len() - size) as u32,
                );
                tracing::debug!(
                    start,
                    size,
                    remainder = rest.len(),
                    "splitting free DBID range"
                );
                state.push_free_range(rest);
                DbidRange::from_parts(start, size32)
            };
            state.live_ranges.insert(allocated.start(), size as u32);
            return Ok(allocated);
        }

        let range = self.fresh.generate_range(size)?;
        tracing::debug!(start = range.start(), size, "allocated fresh DBID range");
        state.live_ranges.insert(range.start(), size as u32);
        Ok(range)
    }

    fn deallocate_single(&self, id: &dyn DbidRef) -> Result<()> {
        let id = id.internal_index();
        let mut guard = self.state.lock();
        let state = &mut *guard;
        match id_to_slot(id) {
            Some(slot) if slot < state.high_water && !state.free_slots.contains(slot) => {
                state.free_slots.insert(slot);
                while state.high_water > 0 && state.free_slots.remove(state.high_water - 1) {
                    state.high_water -= 1;
                }
                Ok(())
            }
            _ => {
                tracing::warn!(id, "deallocating a DBID that is not allocated");
                Err(Error::UnknownHandle(id))
            }
        }
    }

    fn deallocate_range(&self, range: &DbidRange) -> Result<()> {
        if range.is_empty() {
            return Ok(());
        }
        let mut guard = self.state.lock();
        let state = &mut *guard;
        let live = state.live_ranges.get(&range.start()).copied();
        if live.map(|len| len as usize) == Some(range.len()) {
            state.live_ranges.remove(&range.start());
            tracing::debug!(
                start = range.start(),
                len = range.len(),
                "returned DBID range to free list"
            );
            state.push_free_range(*range);
            return Ok(());
        }
        tracing::warn!(
            start = range.start(),
            len = range.len(),
            "deallocating a DBID range that is not allocated"
        );
        Err(Error::UnknownRange {
            start: range.start(),
            len: range.len(),
        })
    }
}

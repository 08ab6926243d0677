//! Two-counter allocator without reuse.

use crate::collections::Dbids;
use crate::dbid::{Dbid, DbidRef};
use crate::error::{Error, Result};
use crate::range::DbidRange;
use crate::sync::{AtomicI32, Ordering};

use super::{exhausted, DbidAllocator};

/// Static ranges count up from 0, dynamic singles count down from -1.
///
/// The two halves of the id space never meet and `i32::MIN` is never
/// handed out. Deallocation is accepted for anything this allocator could
/// have produced and has no other effect.
#[derive(Debug)]
pub struct SimpleDbidAllocator {
    next_static: AtomicI32,
    next_dynamic: AtomicI32,
}

impl SimpleDbidAllocator {
    /// Creates an allocator with both counters at their origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_static: AtomicI32::new(0),
            next_dynamic: AtomicI32::new(-1),
        }
    }

    /// Next static id that would be handed out.
    pub(crate) fn static_mark(&self) -> i32 {
        self.next_static.load(Ordering::Acquire)
    }

    /// Next dynamic id that would be handed out.
    pub(crate) fn dynamic_mark(&self) -> i32 {
        self.next_dynamic.load(Ordering::Acquire)
    }
}

impl Default for SimpleDbidAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl DbidAllocator for SimpleDbidAllocator {
    fn generate_single(&self) -> Result<Dbid> {
        // checked_sub keeps the stored counter >= i32::MIN, so the id handed
        // out is always above the sentinel.
        self.next_dynamic
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .map(Dbid::new)
            .map_err(|_| exhausted("simple single"))
    }

    fn generate_range(&self, size: usize) -> Result<DbidRange> {
        let step = i32::try_from(size).map_err(|_| exhausted("simple range"))?;
        let start = self
            .next_static
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_add(step))
            .map_err(|_| exhausted("simple range"))?;
        Ok(DbidRange::from_parts(start, step.unsigned_abs()))
    }

    fn deallocate_single(&self, id: &dyn DbidRef) -> Result<()> {
        let id = id.internal_index();
        if id < 0 && id > self.dynamic_mark() {
            return Ok(());
        }
        tracing::warn!(id, "deallocating a DBID that was never allocated");
        Err(Error::UnknownHandle(id))
    }

    fn deallocate_range(&self, range: &DbidRange) -> Result<()> {
        if range.end() <= i64::from(self.static_mark()) {
            return Ok(());
        }
        tracing::warn!(
            start = range.start(),
            len = range.len(),
            "deallocating a DBID range that was never allocated"
        );
        Err(Error::UnknownRange {
            start: range.start(),
            len: range.len(),
        })
    }
}

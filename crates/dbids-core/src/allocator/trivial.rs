//! Single-counter allocator.

use crate::collections::Dbids;
use crate::dbid::{Dbid, DbidRef};
use crate::error::{Error, Result};
use crate::range::DbidRange;
use crate::sync::{AtomicI32, Ordering};

use super::{exhausted, DbidAllocator};

/// Hands out singles and ranges from one increasing counter, starting at 1.
///
/// Nothing is ever reused. Deallocation is accepted for anything below the
/// counter and has no other effect.
#[derive(Debug)]
pub struct TrivialDbidAllocator {
    next: AtomicI32,
}

impl TrivialDbidAllocator {
    /// First id handed out.
    pub const FIRST: i32 = 1;

    /// Creates an allocator whose first id is [`Self::FIRST`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: AtomicI32::new(Self::FIRST),
        }
    }

    fn mark(&self) -> i32 {
        self.next.load(Ordering::Acquire)
    }

    /// Advances the counter by `step`, returning the previous value.
    fn bump(&self, step: i32, what: &str) -> Result<i32> {
        self.next
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_add(step))
            .map_err(|_| exhausted(what))
    }
}

impl Default for TrivialDbidAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl DbidAllocator for TrivialDbidAllocator {
    fn generate_single(&self) -> Result<Dbid> {
        self.bump(1, "trivial single").map(Dbid::new)
    }

    fn generate_range(&self, size: usize) -> Result<DbidRange> {
        let step = i32::try_from(size).map_err(|_| exhausted("trivial range"))?;
        let start = self.bump(step, "trivial range")?;
        Ok(DbidRange::from_parts(start, step.unsigned_abs()))
    }

    fn deallocate_single(&self, id: &dyn DbidRef) -> Result<()> {
        let id = id.internal_index();
        if id >= Self::FIRST && id < self.mark() {
            return Ok(());
        }
        tracing::warn!(id, "deallocating a DBID that was never allocated");
        Err(Error::UnknownHandle(id))
    }

    fn deallocate_range(&self, range: &DbidRange) -> Result<()> {
        if range.is_empty()
            || (range.start() >= Self::FIRST && range.end() <= i64::from(self.mark()))
        {
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

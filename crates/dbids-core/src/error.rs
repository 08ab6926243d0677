//! Error types for `dbids-core`.
//!
//! This module provides a unified error type for all DBID operations.
//! Caller mistakes that used to be undefined behavior (out-of-range access,
//! searching unsorted data) surface here as explicit, checked errors.

use thiserror::Error;

/// Result type alias for `dbids-core` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in `dbids-core` operations.
///
/// Error codes follow the pattern `DBID-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// An allocation counter would overflow its integer range (DBID-001).
    ///
    /// Fatal: the allocator cannot hand out further identifiers.
    #[error("[DBID-001] DBID allocation exhausted: {0}")]
    AllocationExhausted(String),

    /// Positional access outside of the collection (DBID-002).
    #[error("[DBID-002] Index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Requested position.
        index: usize,
        /// Length of the collection.
        len: usize,
    },

    /// Invalid slice bounds (DBID-003).
    #[error("[DBID-003] Invalid slice [{begin}, {end}) for length {len}")]
    InvalidSlice {
        /// Inclusive start.
        begin: usize,
        /// Exclusive end.
        end: usize,
        /// Length of the sliced collection.
        len: usize,
    },

    /// Binary search on an array not known to be sorted (DBID-004).
    #[error("[DBID-004] Binary search requires an array sorted by internal index")]
    NotSorted,

    /// Deallocation of an id that is not a live dynamic allocation (DBID-005).
    #[error("[DBID-005] DBID {0} was not allocated by this allocator")]
    UnknownHandle(i32),

    /// Deallocation of a range that is not a live range allocation (DBID-006).
    #[error("[DBID-006] DBID range [{start}, +{len}) was not allocated by this allocator")]
    UnknownRange {
        /// Range start.
        start: i32,
        /// Range length.
        len: usize,
    },

    /// Invalid argument (DBID-007).
    #[error("[DBID-007] Invalid argument: {0}")]
    InvalidArgument(String),

    /// Parallel arrays of different lengths (DBID-008).
    #[error("[DBID-008] Parallel array length mismatch: {keys} keys, {values} values")]
    LengthMismatch {
        /// Number of keys.
        keys: usize,
        /// Number of values.
        values: usize,
    },

    /// Configuration error (DBID-009).
    #[error("[DBID-009] Configuration error: {0}")]
    Config(String),

    /// IO error while encoding or decoding identifiers (DBID-010).
    #[error("[DBID-010] IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the error code (e.g., "DBID-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AllocationExhausted(_) => "DBID-001",
            Self::IndexOutOfBounds { .. } => "DBID-002",
            Self::InvalidSlice { .. } => "DBID-003",
            Self::NotSorted => "DBID-004",
            Self::UnknownHandle(_) => "DBID-005",
            Self::UnknownRange { .. } => "DBID-006",
            Self::InvalidArgument(_) => "DBID-007",
            Self::LengthMismatch { .. } => "DBID-008",
            Self::Config(_) => "DBID-009",
            Self::Io(_) => "DBID-010",
        }
    }

    /// Returns true if this error is recoverable.
    ///
    /// Allocation exhaustion is the only non-recoverable error: retrying
    /// cannot succeed once a counter has reached its limit.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::AllocationExhausted(_))
    }

    /// Shorthand for a checked positional access failure.
    pub(crate) const fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }
}

/// Conversion from configuration errors.
impl From<crate::config::ConfigError> for Error {
    fn from(err: crate::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

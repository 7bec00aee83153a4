//! Error types for buffer operations.

use thiserror::Error;

/// Errors returned by buffer read and mutation operations.
///
/// Every variant is raised before any mutation is attempted, so a failed
/// call leaves the buffer exactly as it was.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BufferError {
    /// An insertion position past the end of the buffer.
    ///
    /// Valid insertion positions are `0..=len` (inserting at `len` appends).
    #[error("position {position} out of bounds for buffer of length {len}")]
    PositionOutOfBounds { position: usize, len: usize },

    /// A read or delete range extending past the end of the buffer.
    #[error("range [{start}, {start}+{count}) out of bounds for buffer of length {len}")]
    RangeOutOfBounds {
        start: usize,
        count: usize,
        len: usize,
    },
}

//! Errors reported by cursors.

use thiserror::Error;

/// A cursor was asked to do something its position doesn't allow. These are programmer errors:
/// the set itself is never modified when one is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The cursor was asked to step past either end of the set.
    #[error("cursor stepped out of range")]
    OutOfRange,
    /// The cursor is at the end position and has no key to read or remove.
    #[error("cursor does not point at a key")]
    InvalidCursor,
}

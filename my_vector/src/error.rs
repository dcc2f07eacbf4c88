//! Error type for fallible container and cursor operations.

use std::fmt;

/// Failure reported by a checked [`MyVector`](crate::MyVector) operation.
///
/// Every variant is returned at the call that detected it. A call that fails
/// leaves the container's length, capacity and contents untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorError {
    /// Position outside the range the operation accepts.
    OutOfRange {
        /// Operation that rejected the position.
        op: &'static str,
        /// The offending position, relative to `begin()`.
        index: isize,
        /// Container length at the time of the call.
        len: usize,
    },
    /// Operation needs at least one element.
    Empty {
        /// Operation that found the container empty.
        op: &'static str,
    },
    /// Cursor was produced by a different container.
    ForeignCursor {
        /// Operation that received the cursor.
        op: &'static str,
    },
    /// Cursor refers to a buffer this container has since released.
    StaleCursor {
        /// Operation that received the cursor.
        op: &'static str,
    },
    /// Requested capacity does not fit in `isize::MAX` bytes.
    CapacityOverflow,
    /// The allocator could not provide the requested block.
    AllocFailed {
        /// Size of the failed request in bytes.
        bytes: usize,
    },
}

impl VectorError {
    /// Returns true for the out-of-range family: bad indices and access to an
    /// empty container.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, VectorError::OutOfRange { .. } | VectorError::Empty { .. })
    }

    /// Returns true when a cursor could not be resolved against the container.
    pub fn is_invalid_cursor(&self) -> bool {
        matches!(
            self,
            VectorError::ForeignCursor { .. } | VectorError::StaleCursor { .. }
        )
    }
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::OutOfRange { op, index, len } => write!(
                f,
                "MyVector::{}: index {} out of range for length {}",
                op, index, len
            ),
            VectorError::Empty { op } => write!(f, "MyVector::{}: container is empty", op),
            VectorError::ForeignCursor { op } => {
                write!(f, "MyVector::{}: cursor belongs to another container", op)
            }
            VectorError::StaleCursor { op } => {
                write!(f, "MyVector::{}: cursor outlived a reallocation", op)
            }
            VectorError::CapacityOverflow => write!(f, "capacity overflow"),
            VectorError::AllocFailed { bytes } => {
                write!(f, "allocation of {} bytes failed", bytes)
            }
        }
    }
}

impl std::error::Error for VectorError {}

//! Position cursors into a [`MyVector`]'s buffer.
//!
//! A cursor is a plain value: it owns nothing and borrows nothing, so it can
//! be held while the container is mutated. Instead of a raw pointer it
//! records which container and which buffer allocation it was taken from.
//! The container checks both before trusting the offset, which turns the
//! classic "iterator used after reallocation" bug into a
//! [`VectorError::StaleCursor`].

use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::error::VectorError;
use crate::MyVector;

/// A non-owning slot position inside one buffer of one container.
///
/// Movement (`inc`, `dec`, `+ n`, `- n`) is unchecked; a cursor may wander
/// outside `[begin(), end()]` and is only validated when the container
/// resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    owner: u64,
    buffer: u64,
    index: isize,
}

impl Cursor {
    pub(crate) fn new(owner: u64, buffer: u64, index: isize) -> Self {
        Self {
            owner,
            buffer,
            index,
        }
    }

    pub(crate) fn owner(&self) -> u64 {
        self.owner
    }

    pub(crate) fn buffer(&self) -> u64 {
        self.buffer
    }

    /// Raw slot offset from the start of the buffer.
    pub fn index(&self) -> isize {
        self.index
    }

    /// Moves one slot forward.
    pub fn inc(&mut self) -> &mut Self {
        self.index = self.index.wrapping_add(1);
        self
    }

    /// Moves one slot backward.
    pub fn dec(&mut self) -> &mut Self {
        self.index = self.index.wrapping_sub(1);
        self
    }

    /// Signed number of slots from `origin` to `self`.
    ///
    /// Both cursors must come from the same buffer of the same container.
    pub fn offset_from(&self, origin: &Cursor) -> Result<isize, VectorError> {
        if self.owner != origin.owner {
            return Err(VectorError::ForeignCursor { op: "offset_from" });
        }
        if self.buffer != origin.buffer {
            return Err(VectorError::StaleCursor { op: "offset_from" });
        }
        Ok(self.index.wrapping_sub(origin.index))
    }

    /// Dereferences the cursor against the container it came from.
    pub fn get<'a, T>(&self, vec: &'a MyVector<T>) -> Result<&'a T, VectorError> {
        vec.at_cursor(*self)
    }

    /// Mutable dereference; writes land in the container's storage.
    pub fn get_mut<'a, T>(&self, vec: &'a mut MyVector<T>) -> Result<&'a mut T, VectorError> {
        vec.at_cursor_mut(*self)
    }
}

impl Add<isize> for Cursor {
    type Output = Cursor;

    fn add(mut self, n: isize) -> Cursor {
        self += n;
        self
    }
}

impl Sub<isize> for Cursor {
    type Output = Cursor;

    fn sub(mut self, n: isize) -> Cursor {
        self -= n;
        self
    }
}

/// `a - b` is [`offset_from`](Cursor::offset_from) in operator form.
impl Sub for Cursor {
    type Output = Result<isize, VectorError>;

    fn sub(self, origin: Cursor) -> Result<isize, VectorError> {
        self.offset_from(&origin)
    }
}

impl AddAssign<isize> for Cursor {
    fn add_assign(&mut self, n: isize) {
        self.index = self.index.wrapping_add(n);
    }
}

impl SubAssign<isize> for Cursor {
    fn sub_assign(&mut self, n: isize) {
        self.index = self.index.wrapping_sub(n);
    }
}

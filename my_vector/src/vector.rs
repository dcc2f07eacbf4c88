use std::fmt;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::cursor::Cursor;
use crate::error::VectorError;
use crate::raw::{next_id, RawBuf};

/// A growable array that owns one contiguous heap buffer.
///
/// Live elements occupy slots `[0, len)`; slots `[len, capacity)` are
/// allocated but uninitialized. Capacity only grows, by doubling, and only
/// through `ensure_capacity`.
pub struct MyVector<T> {
    buf: RawBuf<T>,
    len: usize,
    owner: u64,
}

/// Positions past `isize::MAX` saturate instead of wrapping negative.
fn signed(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}

impl<T> MyVector<T> {
    /// Creates an empty vector without allocating.
    pub fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
            owner: next_id(),
        }
    }

    /// Creates an empty vector with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuf::allocate(capacity),
            len: 0,
            owner: next_id(),
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pointer to the first slot. Dangling but aligned while nothing is
    /// allocated; invalidated by any reallocation.
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Mutable form of [`as_ptr`](Self::as_ptr).
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are initialized and the pointer is non-null
        // and aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    fn ensure_capacity(&mut self, min: usize) {
        self.buf.ensure_capacity(self.len, min);
    }

    fn next_len(&self) -> usize {
        match self.len.checked_add(1) {
            Some(n) => n,
            None => panic!("capacity overflow"),
        }
    }

    /// Makes room for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        match self.len.checked_add(additional) {
            Some(min) => self.ensure_capacity(min),
            None => panic!("capacity overflow"),
        }
    }

    /// Fallible form of [`reserve`](Self::reserve).
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), VectorError> {
        let min = self
            .len
            .checked_add(additional)
            .ok_or(VectorError::CapacityOverflow)?;
        self.buf.try_ensure_capacity(self.len, min)
    }

    /// Appends `value`, doubling the capacity when the buffer is full.
    pub fn push_back(&mut self, value: T) {
        let min = self.next_len();
        self.ensure_capacity(min);
        // SAFETY: slot `len` is allocated and not live.
        unsafe { ptr::write(self.buf.ptr().add(self.len), value) };
        self.len += 1;
    }

    /// Appends `value`, reporting allocation failure instead of aborting.
    pub fn try_push_back(&mut self, value: T) -> Result<(), VectorError> {
        self.try_reserve(1)?;
        // SAFETY: try_reserve made slot `len` available.
        unsafe { ptr::write(self.buf.ptr().add(self.len), value) };
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// An empty vector is an error, not a no-op.
    pub fn pop_back(&mut self) -> Result<T, VectorError> {
        if self.len == 0 {
            return Err(VectorError::Empty { op: "pop_back" });
        }
        self.len -= 1;
        // SAFETY: slot `len` was live and is now outside the live range.
        Ok(unsafe { ptr::read(self.buf.ptr().add(self.len)) })
    }

    /// Drops every element. Capacity and the buffer are kept.
    pub fn clear(&mut self) {
        let live: *mut [T] = ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len);
        // Shrink first so a panicking destructor cannot cause a double drop.
        self.len = 0;
        // SAFETY: these slots were live and are no longer reachable.
        unsafe { ptr::drop_in_place(live) };
    }

    /// Checked access to slot `index`.
    pub fn at(&self, index: usize) -> Result<&T, VectorError> {
        self.as_slice().get(index).ok_or(VectorError::OutOfRange {
            op: "at",
            index: signed(index),
            len: self.len,
        })
    }

    /// Checked mutable access to slot `index`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VectorError> {
        let len = self.len;
        self.as_mut_slice().get_mut(index).ok_or(VectorError::OutOfRange {
            op: "at",
            index: signed(index),
            len,
        })
    }

    pub fn front(&self) -> Result<&T, VectorError> {
        self.as_slice().first().ok_or(VectorError::Empty { op: "front" })
    }

    pub fn front_mut(&mut self) -> Result<&mut T, VectorError> {
        self.as_mut_slice()
            .first_mut()
            .ok_or(VectorError::Empty { op: "front" })
    }

    pub fn back(&self) -> Result<&T, VectorError> {
        self.as_slice().last().ok_or(VectorError::Empty { op: "back" })
    }

    pub fn back_mut(&mut self) -> Result<&mut T, VectorError> {
        self.as_mut_slice()
            .last_mut()
            .ok_or(VectorError::Empty { op: "back" })
    }

    /// Cursor at slot 0.
    pub fn begin(&self) -> Cursor {
        self.cursor(0)
    }

    /// Cursor one past the last live element.
    pub fn end(&self) -> Cursor {
        self.cursor(self.len)
    }

    /// Cursor at an arbitrary slot of the current buffer.
    pub fn cursor(&self, index: usize) -> Cursor {
        Cursor::new(self.owner, self.buf.id(), signed(index))
    }

    /// Turns a cursor into a signed offset from `begin()`, rejecting cursors
    /// that belong to another container or to a released buffer.
    fn resolve(&self, op: &'static str, pos: Cursor) -> Result<isize, VectorError> {
        if pos.owner() != self.owner {
            return Err(VectorError::ForeignCursor { op });
        }
        if pos.buffer() != self.buf.id() {
            return Err(VectorError::StaleCursor { op });
        }
        Ok(pos.index())
    }

    /// Resolves `pos` to a live slot index.
    fn live_index(&self, op: &'static str, pos: Cursor) -> Result<usize, VectorError> {
        let index = self.resolve(op, pos)?;
        if index < 0 || index as usize >= self.len {
            return Err(VectorError::OutOfRange {
                op,
                index,
                len: self.len,
            });
        }
        Ok(index as usize)
    }

    pub(crate) fn at_cursor(&self, pos: Cursor) -> Result<&T, VectorError> {
        let index = self.live_index("deref", pos)?;
        Ok(&self.as_slice()[index])
    }

    pub(crate) fn at_cursor_mut(&mut self, pos: Cursor) -> Result<&mut T, VectorError> {
        let index = self.live_index("deref", pos)?;
        Ok(&mut self.as_mut_slice()[index])
    }

    /// Inserts `value` before `pos`, which may be anywhere in
    /// `[begin(), end()]`. Returns a cursor to the new element in the
    /// possibly reallocated buffer.
    pub fn insert(&mut self, pos: Cursor, value: T) -> Result<Cursor, VectorError> {
        let index = self.resolve("insert", pos)?;
        if index < 0 || index as usize > self.len {
            return Err(VectorError::OutOfRange {
                op: "insert",
                index,
                len: self.len,
            });
        }
        let index = index as usize;
        self.shift_in(index, value);
        Ok(self.cursor(index))
    }

    /// Index-based form of [`insert`](Self::insert).
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<(), VectorError> {
        if index > self.len {
            return Err(VectorError::OutOfRange {
                op: "insert",
                index: signed(index),
                len: self.len,
            });
        }
        self.shift_in(index, value);
        Ok(())
    }

    fn shift_in(&mut self, index: usize, value: T) {
        let min = self.next_len();
        self.ensure_capacity(min);
        // SAFETY: index <= len < capacity; the tail moves up one slot into
        // allocated space before the hole is filled.
        unsafe {
            let p = self.buf.ptr().add(index);
            ptr::copy(p, p.add(1), self.len - index);
            ptr::write(p, value);
        }
        self.len += 1;
    }

    /// Removes the element at `pos`, which must be a live slot. Returns a
    /// cursor to the element that took its place.
    pub fn erase(&mut self, pos: Cursor) -> Result<Cursor, VectorError> {
        let index = self.live_index("erase", pos)?;
        drop(self.shift_out(index));
        Ok(self.cursor(index))
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T, VectorError> {
        if index >= self.len {
            return Err(VectorError::OutOfRange {
                op: "remove",
                index: signed(index),
                len: self.len,
            });
        }
        Ok(self.shift_out(index))
    }

    fn shift_out(&mut self, index: usize) -> T {
        // SAFETY: index < len; the value is read out before the tail moves
        // down over its slot.
        unsafe {
            let p = self.buf.ptr().add(index);
            let value = ptr::read(p);
            ptr::copy(p.add(1), p, self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Moves the contents out, leaving `self` empty with no allocation.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Move assignment: releases the current buffer and adopts `source`'s,
    /// leaving `source` empty.
    pub fn assign_from(&mut self, source: &mut Self) {
        *self = source.take();
    }

    /// Splits the vector into its buffer and length without running `Drop`.
    pub(crate) fn into_raw_parts(self) -> (RawBuf<T>, usize) {
        let me = ManuallyDrop::new(self);
        // SAFETY: `me` is never used again and its destructor never runs, so
        // the buffer is moved out exactly once.
        let buf = unsafe { ptr::read(&me.buf) };
        (buf, me.len)
    }
}

impl<T> Drop for MyVector<T> {
    fn drop(&mut self) {
        // SAFETY: exactly the live slots are dropped; RawBuf releases the
        // allocation afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.ptr(), self.len));
        }
    }
}

impl<T> Default for MyVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for MyVector<T> {
    /// Copies into a buffer with the same capacity as the source.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.capacity());
        for item in self.iter() {
            copy.push_back(item.clone());
        }
        copy
    }

    /// Copy assignment always replaces the destination's buffer, also when
    /// the source never allocated.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        copy.owner = self.owner;
        *self = copy;
    }
}

impl<T> Deref for MyVector<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for MyVector<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for MyVector<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for MyVector<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, const N: usize> From<[T; N]> for MyVector<T> {
    fn from(items: [T; N]) -> Self {
        let mut v = Self::with_capacity(N);
        for item in items {
            v.push_back(item);
        }
        v
    }
}

impl<T: Clone> From<&[T]> for MyVector<T> {
    fn from(items: &[T]) -> Self {
        let mut v = Self::with_capacity(items.len());
        for item in items {
            v.push_back(item.clone());
        }
        v
    }
}

impl<T> From<Vec<T>> for MyVector<T> {
    fn from(items: Vec<T>) -> Self {
        let mut v = Self::with_capacity(items.len());
        for item in items {
            v.push_back(item);
        }
        v
    }
}

impl<T: fmt::Debug> fmt::Debug for MyVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

//! Owned, uninitialized element storage and the capacity growth policy.
//!
//! `RawBuf` only knows about slots. It never reads, writes or drops elements;
//! the container on top decides which slots are live.

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::VectorError;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Hands out process-unique identities for containers and buffers.
pub(crate) fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Smallest `max(1, current) * 2^k` that is at least `min`.
pub(crate) fn grown_capacity(current: usize, min: usize) -> Result<usize, VectorError> {
    let mut cap = current.max(1);
    while cap < min {
        cap = cap.checked_mul(2).ok_or(VectorError::CapacityOverflow)?;
    }
    Ok(cap)
}

pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    id: u64,
    _marker: PhantomData<T>,
}

// SAFETY: RawBuf exclusively owns its allocation, so moving it to another
// thread is sound whenever the elements may move.
unsafe impl<T: Send> Send for RawBuf<T> {}
// SAFETY: shared access only ever hands out shared element references.
unsafe impl<T: Sync> Sync for RawBuf<T> {}

impl<T> RawBuf<T> {
    /// An empty buffer that owns no allocation.
    pub(crate) fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            id: next_id(),
            _marker: PhantomData,
        }
    }

    /// Allocates exactly `cap` slots.
    pub(crate) fn try_allocate(cap: usize) -> Result<Self, VectorError> {
        if cap == 0 {
            return Ok(Self::new());
        }

        let layout = Layout::array::<T>(cap).map_err(|_| VectorError::CapacityOverflow)?;
        let ptr = if layout.size() == 0 {
            // Zero-sized elements never touch the allocator.
            NonNull::dangling()
        } else {
            // SAFETY: layout has a non-zero size.
            let raw = unsafe { alloc(layout) };
            NonNull::new(raw as *mut T).ok_or(VectorError::AllocFailed {
                bytes: layout.size(),
            })?
        };

        Ok(Self {
            ptr,
            cap,
            id: next_id(),
            _marker: PhantomData,
        })
    }

    pub(crate) fn allocate(cap: usize) -> Self {
        match Self::try_allocate(cap) {
            Ok(buf) => buf,
            Err(err) => Self::reserve_failed(err),
        }
    }

    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Guarantees room for `min` slots, moving the first `len` live slots
    /// into a fresh allocation when the current one is too small.
    pub(crate) fn try_ensure_capacity(&mut self, len: usize, min: usize) -> Result<(), VectorError> {
        if self.cap >= min {
            return Ok(());
        }

        let new_cap = grown_capacity(self.cap, min)?;
        let fresh = Self::try_allocate(new_cap)?;

        // SAFETY: both regions hold at least `len` slots and never overlap;
        // the old slots are treated as moved-from once the swap happens.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr(), fresh.ptr(), len);
        }

        // Dropping the replaced buffer releases the old allocation.
        drop(mem::replace(self, fresh));
        Ok(())
    }

    pub(crate) fn ensure_capacity(&mut self, len: usize, min: usize) {
        if let Err(err) = self.try_ensure_capacity(len, min) {
            Self::reserve_failed(err)
        }
    }

    /// Infallible growth paths report failures the same way `Vec` does.
    fn reserve_failed(err: VectorError) -> ! {
        match err {
            VectorError::AllocFailed { bytes } => {
                let layout = Layout::from_size_align(bytes, mem::align_of::<T>())
                    .unwrap_or_else(|_| Layout::new::<T>());
                handle_alloc_error(layout)
            }
            _ => panic!("capacity overflow"),
        }
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.cap == 0 {
            return;
        }
        if let Ok(layout) = Layout::array::<T>(self.cap) {
            if layout.size() != 0 {
                // SAFETY: the same layout produced this allocation.
                unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) }
            }
        }
    }
}

//! A growable array over one manually managed, contiguous heap buffer.
//!
//! [`MyVector<T>`] keeps live elements in slots `[0, len)` of a buffer it
//! owns exclusively. Appending doubles the capacity when the buffer is full,
//! so `push_back` is amortized O(1). Capacity never shrinks except when the
//! whole buffer is moved out or replaced by assignment.
//!
//! Positions are expressed with [`Cursor`] values. A cursor remembers the
//! container and buffer it came from, so using one after the buffer was
//! reallocated, or against another container, is reported as an error
//! rather than reading freed memory.
//!
//! ```rust
//! use my_vector::{my_vector, MyVector};
//!
//! let mut v = MyVector::new();
//! v.push_back(10);
//! v.push_back(20);
//! v.push_back(30);
//! assert_eq!(v.front(), Ok(&10));
//! assert_eq!(v.back(), Ok(&30));
//!
//! v.insert(v.begin() + 1, 15).unwrap();
//! assert_eq!(v, [10, 15, 20, 30]);
//!
//! v.erase(v.begin()).unwrap();
//! assert_eq!(v, [15, 20, 30]);
//!
//! let cap = v.capacity();
//! v.clear();
//! assert!(v.is_empty());
//! assert_eq!(v.capacity(), cap);
//!
//! assert!(my_vector![2] > my_vector![1, 9, 9]);
//! ```

mod cmp;
mod cursor;
mod error;
mod iter;
mod raw;
mod vector;

pub use cursor::Cursor;
pub use error::VectorError;
pub use iter::IntoIter;
pub use vector::MyVector;

/// Builds a [`MyVector`] from a literal list, with capacity equal to the
/// number of elements.
///
/// ```rust
/// use my_vector::my_vector;
///
/// let v = my_vector![1, 2, 3];
/// assert_eq!(v.len(), 3);
/// assert_eq!(v.capacity(), 3);
/// ```
#[macro_export]
macro_rules! my_vector {
    () => {
        $crate::MyVector::new()
    };
    ($($x:expr),+ $(,)?) => {
        $crate::MyVector::from([$($x),+])
    };
}

#[cfg(test)]
mod tests;

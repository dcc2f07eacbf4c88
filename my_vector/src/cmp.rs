//! Equality and lexicographic ordering.
//!
//! Two vectors are equal when they have the same length and pairwise equal
//! elements. Ordering scans the common prefix; the first unequal pair
//! decides, and if there is none the shorter vector sorts first. `>`, `<=`
//! and `>=` come from `partial_cmp`, so all six operators agree.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::MyVector;

fn elements_eq<T, U>(a: &[T], b: &[U]) -> bool
where
    T: PartialEq<U>,
{
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).all(|(x, y)| x == y)
}

impl<T, U> PartialEq<MyVector<U>> for MyVector<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &MyVector<U>) -> bool {
        elements_eq(self.as_slice(), other.as_slice())
    }
}

impl<T: Eq> Eq for MyVector<T> {}

impl<T, U> PartialEq<[U]> for MyVector<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        elements_eq(self.as_slice(), other)
    }
}

impl<T, U> PartialEq<&[U]> for MyVector<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        elements_eq(self.as_slice(), other)
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for MyVector<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        elements_eq(self.as_slice(), other)
    }
}

impl<T, U> PartialEq<Vec<U>> for MyVector<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        elements_eq(self.as_slice(), other)
    }
}

impl<T: PartialOrd> PartialOrd for MyVector<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let common = self.len().min(other.len());
        for i in 0..common {
            match self[i].partial_cmp(&other[i])? {
                Ordering::Equal => {}
                decided => return Some(decided),
            }
        }
        Some(self.len().cmp(&other.len()))
    }
}

impl<T: Ord> Ord for MyVector<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        let common = self.len().min(other.len());
        for i in 0..common {
            match self[i].cmp(&other[i]) {
                Ordering::Equal => {}
                decided => return decided,
            }
        }
        self.len().cmp(&other.len())
    }
}

impl<T: Hash> Hash for MyVector<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

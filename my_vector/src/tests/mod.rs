use super::*;
use crossbeam::scope;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Droppable(Arc<AtomicUsize>);

impl Drop for Droppable {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_basic_push_pop() {
    let mut v = MyVector::new();
    v.push_back(1);
    v.push_back(2);
    v.push_back(3);
    assert_eq!(v.len(), 3);
    assert_eq!(v[0], 1);
    assert_eq!(v[1], 2);
    assert_eq!(v[2], 3);
    assert_eq!(v.pop_back(), Ok(3));
    assert_eq!(v.pop_back(), Ok(2));
    assert_eq!(v.pop_back(), Ok(1));
    assert_eq!(v.pop_back(), Err(VectorError::Empty { op: "pop_back" }));
    assert_eq!(v.len(), 0);
}

#[test]
fn test_canonical_walkthrough() {
    let mut v = MyVector::new();
    v.push_back(10);
    v.push_back(20);
    v.push_back(30);
    assert_eq!(v.len(), 3);
    assert_eq!(v.front(), Ok(&10));
    assert_eq!(v.back(), Ok(&30));

    let pos = v.insert(v.begin() + 1, 15).unwrap();
    assert_eq!(pos.get(&v), Ok(&15));
    assert_eq!(v, [10, 15, 20, 30]);

    let pos = v.erase(v.begin()).unwrap();
    assert_eq!(pos, v.begin());
    assert_eq!(v, [15, 20, 30]);

    let cap = v.capacity();
    v.clear();
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), cap);
}

#[test]
fn test_growth_is_geometric() {
    let mut v = MyVector::new();
    assert_eq!(v.capacity(), 0);
    let mut seen = Vec::new();
    for i in 0..9 {
        v.push_back(i);
        seen.push(v.capacity());
    }
    assert_eq!(seen, vec![1, 2, 4, 4, 8, 8, 8, 8, 16]);
}

#[test]
fn test_growth_from_literal_capacity() {
    let mut v = my_vector![1, 2, 3];
    assert_eq!(v.capacity(), 3);
    v.push_back(4);
    assert_eq!(v.capacity(), 6);
    assert_eq!(v, [1, 2, 3, 4]);
}

#[test]
fn test_capacity_never_shrinks() {
    let mut v: MyVector<u8> = (0..20).collect();
    let cap = v.capacity();
    v.pop_back().unwrap();
    v.erase(v.begin()).unwrap();
    v.remove(3).unwrap();
    assert_eq!(v.capacity(), cap);
    v.clear();
    assert_eq!(v.capacity(), cap);
}

#[test]
fn test_push_then_pop_restores() {
    let mut v = my_vector!['a', 'b'];
    let before = v.clone();
    v.push_back('c');
    assert_eq!(v.pop_back(), Ok('c'));
    assert_eq!(v, before);
}

#[test]
fn test_at_matches_index() {
    let v: MyVector<i64> = (0..10).map(|x| x * x).collect();
    for i in 0..v.len() {
        assert_eq!(v.at(i), Ok(&v[i]));
    }
    assert!(v.at(v.len() - 1).is_ok());
    assert_eq!(
        v.at(v.len()),
        Err(VectorError::OutOfRange {
            op: "at",
            index: 10,
            len: 10
        })
    );
}

#[test]
fn test_huge_index_is_reported_unwrapped() {
    let mut v = my_vector![1, 2, 3];
    let huge = VectorError::OutOfRange {
        op: "at",
        index: isize::MAX,
        len: 3,
    };
    assert_eq!(v.at(usize::MAX), Err(huge));
    assert_eq!(
        v.at(usize::MAX).unwrap_err().to_string(),
        format!("MyVector::at: index {} out of range for length 3", isize::MAX)
    );
    assert_eq!(
        v.remove(usize::MAX),
        Err(VectorError::OutOfRange {
            op: "remove",
            index: isize::MAX,
            len: 3
        })
    );
    assert!(v.insert_at(usize::MAX, 0).unwrap_err().is_out_of_range());
    assert!(v.cursor(usize::MAX).get(&v).is_err());
    assert_eq!(v, [1, 2, 3]);
}

#[test]
fn test_raw_pointers_follow_the_buffer() {
    let mut v = MyVector::with_capacity(2);
    v.push_back(7);
    v.push_back(8);
    assert_eq!(v.as_ptr(), v.as_slice().as_ptr());

    // SAFETY: slot 1 is live and nothing else borrows the vector.
    unsafe { *v.as_mut_ptr().add(1) = 80 };
    assert_eq!(v, [7, 80]);

    let before = v.as_ptr();
    v.push_back(9);
    assert_ne!(v.as_ptr(), before);
    assert_eq!(v.as_ptr(), v.as_slice().as_ptr());
}

#[test]
fn test_at_mut_aliases_storage() {
    let mut v = my_vector![1, 2, 3];
    *v.at_mut(1).unwrap() = 42;
    *v.front_mut().unwrap() += 1;
    *v.back_mut().unwrap() *= 10;
    assert_eq!(v, [2, 42, 30]);
    assert!(v.at_mut(3).unwrap_err().is_out_of_range());
}

#[test]
fn test_front_back_on_empty() {
    let mut v: MyVector<String> = MyVector::new();
    assert_eq!(v.front(), Err(VectorError::Empty { op: "front" }));
    assert_eq!(v.back(), Err(VectorError::Empty { op: "back" }));
    assert!(v.front_mut().unwrap_err().is_out_of_range());
    assert_eq!(
        v.back().unwrap_err().to_string(),
        "MyVector::back: container is empty"
    );
}

#[test]
fn test_insert_remove() {
    let mut v = MyVector::new();
    v.push_back(1);
    v.push_back(3);
    v.insert_at(1, 2).unwrap();
    assert_eq!(v.as_ref(), &[1, 2, 3]);
    assert_eq!(v.remove(1), Ok(2));
    assert_eq!(v.as_ref(), &[1, 3]);
}

#[test]
fn test_insert_shifts_right() {
    let mut v = my_vector![1, 2, 3];
    let end = v.end();
    v.insert(end, 4).unwrap();
    v.insert(v.begin(), 0).unwrap();
    assert_eq!(v.len(), 5);
    assert_eq!(v[0], 0);
    assert_eq!(v, [0, 1, 2, 3, 4]);
}

#[test]
fn test_failed_operations_leave_vector_unchanged() {
    let mut v = MyVector::with_capacity(4);
    v.extend([1, 2, 3]);
    let cap = v.capacity();

    let past_end = v.end() + 1;
    assert_eq!(
        v.insert(past_end, 9),
        Err(VectorError::OutOfRange {
            op: "insert",
            index: 4,
            len: 3
        })
    );
    assert!(v.insert(v.begin() - 1, 9).unwrap_err().is_out_of_range());
    assert!(v.insert_at(4, 9).is_err());
    assert!(v.erase(v.end()).unwrap_err().is_out_of_range());
    assert!(v.remove(3).is_err());
    assert!(v.at(7).is_err());

    assert_eq!(v, [1, 2, 3]);
    assert_eq!(v.capacity(), cap);
}

#[test]
fn test_erase_with_foreign_or_stale_cursor() {
    let mut a = my_vector![1, 2, 3];
    let b = my_vector![1, 2, 3];
    assert_eq!(
        a.erase(b.begin()),
        Err(VectorError::ForeignCursor { op: "erase" })
    );

    let stale = a.begin();
    a.reserve(100);
    assert_eq!(a.erase(stale), Err(VectorError::StaleCursor { op: "erase" }));
    assert!(a.insert(stale, 0).unwrap_err().is_invalid_cursor());
    assert_eq!(a, [1, 2, 3]);
}

#[test]
fn test_cursor_survives_push_without_growth() {
    let mut v = MyVector::with_capacity(4);
    v.push_back(1);
    let first = v.begin();
    v.push_back(2);
    assert_eq!(first.get(&v), Ok(&1));
}

#[test]
fn test_insert_returns_cursor_in_new_buffer() {
    let mut v = my_vector![1, 2];
    let old_begin = v.begin();
    let pos = v.insert(v.begin() + 1, 7).unwrap();
    assert_ne!(pos.offset_from(&old_begin), Ok(1));
    assert_eq!(pos.offset_from(&v.begin()), Ok(1));
    assert_eq!(pos.get(&v), Ok(&7));
}

#[test]
fn test_clone_is_equal_and_independent() {
    let mut original = MyVector::with_capacity(8);
    original.extend([String::from("a"), String::from("b")]);
    let mut copy = original.clone();
    assert_eq!(copy, original);
    assert_eq!(copy.capacity(), 8);

    copy.push_back(String::from("c"));
    copy[0].push('!');
    assert_eq!(original, [String::from("a"), String::from("b")]);
    assert_eq!(copy.len(), 3);
}

#[test]
fn test_clone_from_replaces_everything() {
    let mut dest = my_vector![1, 2, 3, 4, 5];
    let empty: MyVector<i32> = MyVector::new();
    dest.clone_from(&empty);
    assert!(dest.is_empty());
    assert_eq!(dest.capacity(), 0);

    let src = my_vector![9, 8];
    dest.clone_from(&src);
    assert_eq!(dest, src);
    assert_eq!(dest.capacity(), 2);
}

#[test]
fn test_clone_from_keeps_owner_identity() {
    let mut dest = my_vector![1];
    let before = dest.begin();
    dest.clone_from(&my_vector![5, 6]);
    assert_eq!(
        before.get(&dest),
        Err(VectorError::StaleCursor { op: "deref" })
    );
}

#[test]
fn test_take_leaves_source_empty() {
    let mut source = my_vector![1, 2, 3];
    let snapshot = source.clone();
    let cursor = source.begin() + 2;

    let moved = source.take();
    assert_eq!(moved, snapshot);
    assert_eq!(cursor.get(&moved), Ok(&3));
    assert_eq!(source.len(), 0);
    assert_eq!(source.capacity(), 0);
    assert_eq!(source.begin(), source.end());
    assert!(cursor.get(&source).unwrap_err().is_invalid_cursor());
}

#[test]
fn test_assign_from_releases_destination() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut dest = MyVector::new();
    for _ in 0..3 {
        dest.push_back(Droppable(counter.clone()));
    }
    let mut source = MyVector::new();
    source.push_back(Droppable(counter.clone()));

    dest.assign_from(&mut source);
    assert_eq!(counter.load(Ordering::SeqCst), 3);
    assert_eq!(dest.len(), 1);
    assert!(source.is_empty());
    assert_eq!(source.capacity(), 0);

    drop(source);
    assert_eq!(counter.load(Ordering::SeqCst), 3);
    drop(dest);
    assert_eq!(counter.load(Ordering::SeqCst), 4);
}

#[test]
fn test_raii_drop() {
    let counter = Arc::new(AtomicUsize::new(0));
    {
        let mut v = MyVector::new();
        for _ in 0..10 {
            v.push_back(Droppable(counter.clone()));
        }
    }
    assert_eq!(counter.load(Ordering::SeqCst), 10);
}

#[test]
fn test_each_removal_drops_once() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut v = MyVector::new();
    for _ in 0..6 {
        v.push_back(Droppable(counter.clone()));
    }

    v.erase(v.begin() + 2).unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    let popped = v.pop_back().unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    drop(popped);
    assert_eq!(counter.load(Ordering::SeqCst), 2);

    v.clear();
    assert_eq!(counter.load(Ordering::SeqCst), 6);
    drop(v);
    assert_eq!(counter.load(Ordering::SeqCst), 6);
}

#[test]
fn test_iterators() {
    let mut v = MyVector::new();
    v.push_back(10);
    v.push_back(20);
    v.push_back(30);

    let mut sum = 0;
    for &x in &v {
        sum += x;
    }
    assert_eq!(sum, 60);

    for x in &mut v {
        *x += 1;
    }
    assert_eq!(v[0], 11);
    assert_eq!(v.iter().rev().copied().collect::<Vec<_>>(), vec![31, 21, 11]);

    let collected: Vec<i32> = v.into_iter().collect();
    assert_eq!(collected, vec![11, 21, 31]);
}

#[test]
fn test_into_iter_both_ends() {
    let v = my_vector![1, 2, 3, 4];
    let mut it = v.into_iter();
    assert_eq!(it.len(), 4);
    assert_eq!(it.next(), Some(1));
    assert_eq!(it.next_back(), Some(4));
    assert_eq!(it.as_slice(), &[2, 3]);
    assert_eq!(it.next_back(), Some(3));
    assert_eq!(it.next(), Some(2));
    assert_eq!(it.next(), None);
    assert_eq!(it.next_back(), None);
}

#[test]
fn test_into_iter_drops_rest() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut v = MyVector::new();
    for _ in 0..5 {
        v.push_back(Droppable(counter.clone()));
    }
    let mut it = v.into_iter();
    drop(it.next());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
    drop(it);
    assert_eq!(counter.load(Ordering::SeqCst), 5);
}

#[test]
fn test_concurrency() {
    let mut v = MyVector::new();
    for i in 0..100 {
        v.push_back(i);
    }

    scope(|s| {
        s.spawn(|_| v.iter().sum::<i32>());
        s.spawn(|_| {
            for x in &v {
                let _ = *x;
            }
        });
    })
    .unwrap();

    let handle = std::thread::spawn(move || {
        v.push_back(100);
        v
    });
    let v = handle.join().unwrap();
    assert_eq!(v.back(), Ok(&100));
}

#[test]
fn test_cursor_outlives_thread_round_trip() {
    let mut v = MyVector::with_capacity(4);
    v.push_back(1);
    v.push_back(2);
    let second = v.begin() + 1;

    let v = std::thread::spawn(move || {
        v.push_back(3);
        v
    })
    .join()
    .unwrap();
    assert_eq!(second.get(&v), Ok(&2));

    let v = std::thread::spawn(move || {
        let mut v = v;
        v.push_back(4);
        v.push_back(5);
        v
    })
    .join()
    .unwrap();
    assert_eq!(v.capacity(), 8);
    assert_eq!(second.get(&v), Err(VectorError::StaleCursor { op: "deref" }));
}

#[test]
fn test_try_reserve() {
    let mut v: MyVector<i32> = MyVector::new();
    assert!(v.try_reserve(10).is_ok());
    assert_eq!(v.capacity(), 16);
    assert_eq!(v.try_reserve(usize::MAX), Err(VectorError::CapacityOverflow));
    assert!(v.try_push_back(1).is_ok());
    assert_eq!(v, [1]);
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn test_reserve_overflow_panics() {
    let mut v = my_vector![1u64];
    v.reserve(usize::MAX);
}

#[test]
fn test_zero_sized_elements() {
    let mut v = MyVector::new();
    for _ in 0..5 {
        v.push_back(());
    }
    assert_eq!(v.len(), 5);
    assert_eq!(v.capacity(), 8);
    v.insert(v.begin(), ()).unwrap();
    assert_eq!(v.into_iter().count(), 6);
}

#[test]
fn test_conversions() {
    let from_vec = MyVector::from(vec![1, 2, 3]);
    let from_slice = MyVector::from(&[1, 2, 3][..]);
    assert_eq!(from_vec, from_slice);
    assert_eq!(from_vec.capacity(), 3);
    assert_eq!(from_vec, vec![1, 2, 3]);
    assert_eq!(format!("{:?}", from_vec), "[1, 2, 3]");

    let empty: MyVector<u8> = my_vector![];
    assert_eq!(empty.capacity(), 0);
}

#[test]
fn test_matches_std_vec_under_random_operations() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut ours: MyVector<u32> = MyVector::new();
    let mut model: Vec<u32> = Vec::new();
    let mut last_cap = 0;

    for _ in 0..2_000 {
        match rng.random_range(0..6) {
            0 | 1 => {
                let x = rng.random();
                ours.push_back(x);
                model.push(x);
            }
            2 => assert_eq!(ours.pop_back().ok(), model.pop()),
            3 => {
                let idx = rng.random_range(0..=model.len() + 1);
                let x = rng.random();
                let res = ours.insert(ours.begin() + idx as isize, x);
                if idx <= model.len() {
                    model.insert(idx, x);
                    assert_eq!(res.unwrap().offset_from(&ours.begin()), Ok(idx as isize));
                } else {
                    assert!(res.unwrap_err().is_out_of_range());
                }
            }
            4 => {
                let idx = rng.random_range(0..=model.len());
                let res = ours.erase(ours.begin() + idx as isize);
                if idx < model.len() {
                    model.remove(idx);
                    assert!(res.is_ok());
                } else {
                    assert!(res.unwrap_err().is_out_of_range());
                }
            }
            _ => {
                if rng.random_ratio(1, 20) {
                    ours.clear();
                    model.clear();
                }
            }
        }

        assert_eq!(ours, model);
        assert!(ours.capacity() >= ours.len());
        assert!(ours.capacity() >= last_cap);
        last_cap = ours.capacity();
    }
}

use my_vector::MyVector;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct Tracked(usize, Arc<AtomicUsize>);

impl Drop for Tracked {
    fn drop(&mut self) {
        println!("Dropping element {}", self.0);
        self.1.fetch_add(1, Ordering::SeqCst);
    }
}

fn main() {
    println!("--- Ownership & Drop Tracking Example ---");
    let drop_count = Arc::new(AtomicUsize::new(0));

    {
        let mut arr = MyVector::new();
        for i in 0..4 {
            arr.push_back(Tracked(i, drop_count.clone()));
        }
        println!("Array created with {} elements.", arr.len());

        arr.erase(arr.begin() + 1).unwrap();
        println!("Erased one, dropped so far: {}", drop_count.load(Ordering::SeqCst));

        let mut moved = MyVector::new();
        moved.assign_from(&mut arr);
        println!("Moved out, source len: {}, cap: {}", arr.len(), arr.capacity());
        // Scope ends here; `moved` drops the remaining three, `arr` owns nothing.
    }

    println!("Total elements dropped: {}", drop_count.load(Ordering::SeqCst));
    assert_eq!(drop_count.load(Ordering::SeqCst), 4);
}

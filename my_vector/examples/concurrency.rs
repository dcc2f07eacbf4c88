use my_vector::{MyVector, VectorError};
use std::thread;

fn main() {
    println!("--- Cursors Across Threads Example ---");
    let mut arr = MyVector::with_capacity(4);
    arr.push_back(10);
    arr.push_back(20);

    // A cursor is plain data: it stays in main while the vector travels.
    let second = arr.begin() + 1;
    println!("Cursor taken in main at offset {}", second.index());

    let arr = thread::spawn(move || {
        arr.push_back(30);
        println!("Worker pushed within capacity: {:?} (cap {})", arr, arr.capacity());
        arr
    })
    .join()
    .unwrap();

    match second.get(&arr) {
        Ok(value) => println!("Cursor still resolves after the round trip: {}", value),
        Err(e) => println!("Unexpected: {}", e),
    }

    let arr = thread::spawn(move || {
        let mut arr = arr;
        arr.push_back(40);
        arr.push_back(50);
        println!("Worker grew the buffer: {:?} (cap {})", arr, arr.capacity());
        arr
    })
    .join()
    .unwrap();

    match second.get(&arr) {
        Err(VectorError::StaleCursor { .. }) => {
            println!("Cursor is stale now; take a fresh one instead");
            println!("Fresh cursor reads {:?}", (arr.begin() + 1).get(&arr));
        }
        other => println!("Unexpected: {:?}", other),
    }
}

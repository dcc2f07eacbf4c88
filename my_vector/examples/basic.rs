use my_vector::MyVector;

fn main() {
    println!("--- Basic Usage Example ---");
    let mut arr = MyVector::new();

    for i in 1..=5 {
        arr.push_back(i * 10);
        println!("Pushed: {}, len: {}, cap: {}", i * 10, arr.len(), arr.capacity());
    }

    let pos = arr.insert(arr.begin() + 1, 15).expect("begin + 1 is in range");
    println!("Inserted 15 at offset {:?}", pos.offset_from(&arr.begin()));
    println!("Elements: {:?}", arr);

    match arr.at(10) {
        Ok(v) => println!("at(10) = {}", v),
        Err(e) => println!("at(10) failed: {}", e),
    }

    let mut cursor = arr.end();
    while cursor != arr.begin() {
        cursor.dec();
        print!("{} ", cursor.get(&arr).expect("cursor stays in range"));
    }
    println!();

    while let Ok(val) = arr.pop_back() {
        println!("Popped: {}, len: {}, cap: {}", val, arr.len(), arr.capacity());
    }
}

//! Basic usage example for `PlacementVec`.
//!
//! This example demonstrates appending, in-place construction, positional insertion and
//! removal, and how the capacity grows as values are added.

use placement_vec::PlacementVec;

fn main() {
    let mut items = PlacementVec::new();

    println!("Created PlacementVec with capacity: {}", items.capacity());

    // Appending to a full container doubles its capacity.
    for value in [10, 20, 30, 40, 50] {
        items.push(value);
        println!(
            "Pushed {value}, length {} capacity {}",
            items.len(),
            items.capacity()
        );
    }

    // Insert at an arbitrary position. The returned reference points at the new value.
    let inserted = items.insert(2, 0);
    *inserted = 25;
    println!("After insert at position 2: {items:?}");

    // Erase returns the position of the value that followed the erased one.
    let next = items.erase(0);
    println!(
        "After erase at position 0: {items:?}, next value is {:?}",
        items.get(next)
    );

    // Values can be constructed in place from a closure.
    let mut names = PlacementVec::<String>::with_capacity(2);
    let name = names.emplace_back_with(|| String::from("placement"));
    name.push_str("_vec");
    names.emplace_with(0, || String::from("hello"));
    println!("Names: {names:?}");

    // Growing via resize fills the new slots with default values.
    names.resize(4);
    println!("Names after resize: {names:?} (capacity {})", names.capacity());

    // Reserve takes the total capacity, not the number of additional values.
    names.reserve(16);
    println!("Capacity after reserve(16): {}", names.capacity());

    names.pop_back();
    names.shrink_to_fit();
    println!(
        "After pop_back and shrink_to_fit: length {} capacity {}",
        names.len(),
        names.capacity()
    );

    println!("Example completed successfully!");
}

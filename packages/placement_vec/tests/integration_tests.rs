//! Integration tests for the `placement_vec` package.
//!
//! These tests exercise `PlacementVec` purely through its public API, covering the growth
//! policy, positional insertion and removal, copying and moving of whole containers.
#![allow(
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing,
    clippy::multiple_unsafe_ops_per_block,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]

use std::mem;

use placement_vec::{PlacementVec, RawMemory};

#[test]
fn appended_values_keep_their_order() {
    let mut items = PlacementVec::new();

    for (count, value) in (0..100_usize).enumerate() {
        items.push(value * 3);

        assert_eq!(items.len(), count + 1);
        assert!(items.capacity() >= items.len());
    }

    for (index, value) in items.iter().enumerate() {
        assert_eq!(*value, index * 3);
    }
}

#[test]
fn capacity_doubles_only_when_full() {
    let mut items = PlacementVec::new();
    let mut observed = vec![items.capacity()];

    for i in 0..16 {
        items.push(i);

        if observed.last() != Some(&items.capacity()) {
            observed.push(items.capacity());
        }
    }

    assert_eq!(observed, vec![0, 1, 2, 4, 8, 16]);
}

#[test]
fn capacity_never_shrinks_on_append() {
    let mut items = PlacementVec::new();
    let mut previous = 0;

    for i in 0..50 {
        items.push(i);
        assert!(items.capacity() >= previous);
        previous = items.capacity();
    }
}

#[test]
fn insert_and_erase_scenario() {
    let mut items = PlacementVec::from([10, 20, 30]);

    let position = items.iter().position(|v| *v == 20).unwrap();
    let inserted = items.insert(position, 15);
    assert_eq!(*inserted, 15);

    assert_eq!(items, [10, 15, 20, 30]);
    assert_eq!(items.len(), 4);

    let position = items.iter().position(|v| *v == 15).unwrap();
    let next = items.erase(position);

    assert_eq!(items[next], 20);
    assert_eq!(items, [10, 20, 30]);
    assert_eq!(items.len(), 3);
}

#[test]
fn insert_then_erase_restores_sequence() {
    let original = PlacementVec::from(["a", "b", "c"]);

    for position in 0..=original.len() {
        let mut items = original.clone();

        items.insert(position, "x");
        assert_eq!(items.len(), 4);

        items.erase(position);
        assert_eq!(items, original);
    }
}

#[test]
fn resize_scenario() {
    let mut items = PlacementVec::<i32>::from([1, 2, 3]);

    items.resize(5);
    assert_eq!(items, [1, 2, 3, 0, 0]);
    assert!(items.capacity() >= 5);

    items.resize(2);
    assert_eq!(items, [1, 2]);
    assert!(items.capacity() >= 5);
}

#[test]
fn reserve_is_noop_when_sufficient() {
    let mut items = PlacementVec::<u64>::with_capacity(16);
    items.extend([1, 2, 3]);
    let address = items.as_ptr();

    items.reserve(16);
    items.reserve(4);

    assert_eq!(items.capacity(), 16);
    assert_eq!(items.as_ptr(), address);
    assert_eq!(items, [1, 2, 3]);
}

#[test]
fn reserve_grows_to_exact_capacity() {
    let mut items = PlacementVec::from(["first".to_string()]);

    items.reserve(33);

    assert_eq!(items.capacity(), 33);
    assert_eq!(items, ["first"]);
}

#[test]
fn copy_is_deep_and_independent() {
    let mut original = PlacementVec::new();
    original.push(vec![1, 2]);
    original.push(vec![3]);

    let mut copy = original.clone();
    assert_eq!(copy, original);
    assert_eq!(copy.len(), original.len());

    copy[0].push(100);
    copy.push(vec![4]);

    assert_eq!(original, [vec![1, 2], vec![3]]);
    assert_eq!(copy, [vec![1, 2, 100], vec![3], vec![4]]);
}

#[test]
fn copy_assignment_reuses_capacity() {
    let source = PlacementVec::from(["x".to_string(), "y".to_string()]);

    let mut target = PlacementVec::with_capacity(8);
    target.extend(["a".to_string(), "b".to_string(), "c".to_string()]);

    target.clone_from(&source);

    assert_eq!(target, source);
    assert_eq!(target.capacity(), 8);
}

#[test]
fn move_leaves_source_empty() {
    let mut source = PlacementVec::from([1, 2, 3]);

    let moved = mem::take(&mut source);

    assert_eq!(moved, [1, 2, 3]);
    assert_eq!(source.len(), 0);
    assert_eq!(source.capacity(), 0);

    // The moved-from container remains fully usable.
    source.push(4);
    assert_eq!(source, [4]);
}

#[test]
fn move_assignment_replaces_contents() {
    let mut target = PlacementVec::from(["old".to_string()]);
    let mut source = PlacementVec::from(["new".to_string(), "values".to_string()]);
    assert_eq!(target, ["old"]);

    target = mem::take(&mut source);

    assert_eq!(target, ["new", "values"]);
    assert!(source.is_empty());
}

#[test]
fn swap_exchanges_contents() {
    let mut a = PlacementVec::from([1]);
    let mut b = PlacementVec::from([2, 3]);

    a.swap_with(&mut b);

    assert_eq!(a, [2, 3]);
    assert_eq!(b, [1]);
}

#[test]
fn slice_methods_are_available() {
    let mut items = PlacementVec::from([5, 3, 9, 1]);

    items.sort_unstable();

    assert_eq!(items.first(), Some(&1));
    assert_eq!(items.last(), Some(&9));
    assert!(items.contains(&5));
    assert_eq!(items.iter().sum::<i32>(), 18);
}

#[test]
fn owned_iteration_moves_values_out() {
    let items = PlacementVec::from(["a".to_string(), "b".to_string()]);

    let joined = items.into_iter().collect::<String>();

    assert_eq!(joined, "ab");
}

#[test]
fn collect_from_iterator() {
    let items = (1..=4).map(|i| i * i).collect::<PlacementVec<_>>();

    assert_eq!(items, [1, 4, 9, 16]);
}

#[test]
fn raw_memory_slots_can_be_used_directly() {
    let memory = RawMemory::<String>::with_capacity(2);

    // SAFETY: Both indexes are within the capacity and the slots start uninitialized.
    unsafe {
        memory.slot(0).write("hello".to_string());
        memory.slot(1).write("world".to_string());
    }

    // SAFETY: Both slots were initialized above and are read exactly once.
    let values = unsafe { [memory.slot(0).read(), memory.slot(1).read()] };

    assert_eq!(values, ["hello", "world"]);
}

#[test]
fn zero_sized_values_are_counted() {
    let mut items = PlacementVec::new();

    for _ in 0..10 {
        items.push(());
    }

    assert_eq!(items.len(), 10);
    assert_eq!(items.capacity(), 16);
    assert_eq!(items.pop(), Some(()));
    assert_eq!(items.len(), 9);
}

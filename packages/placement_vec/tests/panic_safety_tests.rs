//! Panic safety tests for the `placement_vec` package.
//!
//! Each test arranges for a user-provided constructor, `Clone::clone()` or `Default::default()`
//! to panic partway through a container operation and then verifies that every value is
//! dropped exactly once and that the container is left in its prior state.

use std::num::NonZero;
use std::panic::{AssertUnwindSafe, catch_unwind};

use placement_vec::PlacementVec;
use testing::{Fuse, LiveTracker, Volatile};

fn volatile_values(count: u32, fuse: &Fuse, tracker: &LiveTracker) -> PlacementVec<Volatile> {
    (0..count)
        .map(|value| Volatile::new(value, fuse, tracker))
        .collect()
}

fn values_of(items: &PlacementVec<Volatile>) -> Vec<u32> {
    items.iter().map(Volatile::value).collect()
}

#[test]
fn clone_panicking_on_third_value_leaks_nothing() {
    let tracker = LiveTracker::new();
    let fuse = Fuse::new(NonZero::new(3).unwrap());

    let original = volatile_values(5, &fuse, &tracker);

    let result = catch_unwind(AssertUnwindSafe(|| original.clone()));

    assert!(result.is_err());
    assert!(fuse.has_blown());

    // Two clones were made before the panic and both have been dropped again.
    assert_eq!(tracker.created(), 7);
    assert_eq!(tracker.live(), 5);

    // The original is fully intact.
    assert_eq!(values_of(&original), vec![0, 1, 2, 3, 4]);

    drop(original);
    assert_eq!(tracker.live(), 0);
}

#[test]
fn default_construction_panic_leaks_nothing() {
    let tracker = LiveTracker::new();
    let fuse = Fuse::new(NonZero::new(4).unwrap());

    Volatile::arm_defaults(&fuse, &tracker);
    let result = catch_unwind(|| PlacementVec::<Volatile>::with_len(10));
    Volatile::disarm_defaults();

    assert!(result.is_err());
    assert_eq!(tracker.created(), 3);
    assert_eq!(tracker.live(), 0);
}

#[test]
fn resize_panic_drops_new_values_only() {
    let tracker = LiveTracker::new();
    let fuse = Fuse::new(NonZero::new(2).unwrap());

    let mut items = volatile_values(3, &Fuse::disarmed(), &tracker);

    Volatile::arm_defaults(&fuse, &tracker);
    let result = catch_unwind(AssertUnwindSafe(|| items.resize(6)));
    Volatile::disarm_defaults();

    assert!(result.is_err());
    assert_eq!(items.len(), 3);
    assert_eq!(values_of(&items), vec![0, 1, 2]);
    assert_eq!(tracker.live(), 3);

    // The container remains usable afterwards.
    Volatile::arm_defaults(&Fuse::disarmed(), &tracker);
    items.resize(5);
    Volatile::disarm_defaults();

    assert_eq!(values_of(&items), vec![0, 1, 2, 0, 0]);
    assert_eq!(tracker.live(), 5);
}

#[test]
fn growing_emplace_panic_keeps_old_buffer() {
    let tracker = LiveTracker::new();
    let fuse = Fuse::disarmed();

    let mut items = volatile_values(4, &fuse, &tracker);
    assert_eq!(items.capacity(), 4);
    let address = items.as_ptr();

    let result = catch_unwind(AssertUnwindSafe(|| {
        items.emplace_back_with(|| panic!("constructor failed"));
    }));
    assert!(result.is_err());

    let result = catch_unwind(AssertUnwindSafe(|| {
        items.emplace_with(2, || panic!("constructor failed"));
    }));
    assert!(result.is_err());

    assert_eq!(items.capacity(), 4);
    assert_eq!(items.as_ptr(), address);
    assert_eq!(values_of(&items), vec![0, 1, 2, 3]);
    assert_eq!(tracker.live(), 4);
}

#[test]
fn insert_of_cloned_value_panic_keeps_order() {
    let tracker = LiveTracker::new();
    let fuse = Fuse::new(NonZero::new(1).unwrap());

    let mut items = volatile_values(3, &Fuse::disarmed(), &tracker);
    items.reserve(8);

    let template = Volatile::new(42, &fuse, &tracker);

    let result = catch_unwind(AssertUnwindSafe(|| {
        items.emplace_with(1, || template.clone());
    }));

    assert!(result.is_err());
    assert_eq!(values_of(&items), vec![0, 1, 2]);

    // The fuse has blown, so cloning works now.
    items.emplace_with(1, || template.clone());
    assert_eq!(values_of(&items), vec![0, 42, 1, 2]);
    assert_eq!(tracker.live(), 5);
}

#[test]
fn clone_from_panic_into_spare_capacity_drops_partial_tail() {
    let tracker = LiveTracker::new();
    let fuse = Fuse::new(NonZero::new(4).unwrap());

    let source = volatile_values(5, &fuse, &tracker);

    let mut target = PlacementVec::with_capacity(10);
    target.push(Volatile::new(100, &Fuse::disarmed(), &tracker));

    let result = catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));

    assert!(result.is_err());
    assert_eq!(target.len(), 1);
    assert_eq!(tracker.live(), 6);

    drop(source);
    drop(target);
    assert_eq!(tracker.live(), 0);
}

#[test]
fn erase_with_panicking_drop_keeps_container_consistent() {
    struct Explosive {
        armed: bool,
    }

    impl Drop for Explosive {
        fn drop(&mut self) {
            assert!(!self.armed, "drop failed");
        }
    }

    let mut items = PlacementVec::new();
    items.push(Explosive { armed: false });
    items.push(Explosive { armed: true });
    items.push(Explosive { armed: false });

    let result = catch_unwind(AssertUnwindSafe(|| items.erase(1)));

    assert!(result.is_err());
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|item| !item.armed));
}

#[test]
fn every_successful_operation_balances_drops() {
    let tracker = LiveTracker::new();
    let fuse = Fuse::disarmed();

    let mut items = PlacementVec::new();

    for value in 0..20 {
        items.push(Volatile::new(value, &fuse, &tracker));
    }

    items.insert(0, Volatile::new(100, &fuse, &tracker));
    items.erase(5);
    items.pop_back();
    items.truncate(10);
    items.shrink_to_fit();

    let copy = items.clone();
    let mut other = PlacementVec::with_capacity(3);
    other.clone_from(&copy);

    assert_eq!(tracker.live(), 30);

    drop(items);
    drop(copy);
    drop(other);

    assert_eq!(tracker.live(), 0);
    assert!(tracker.created() > 30);
}

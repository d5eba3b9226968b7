//! Demonstrates that `PlacementVec` stays consistent when element construction panics.
//!
//! A clone that fails partway through copying a container does not leak the clones made so
//! far and leaves the source untouched.

use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use placement_vec::PlacementVec;

/// Panics when cloned if its payload is negative.
#[derive(Debug)]
struct Fragile {
    value: i32,
    _instances: Rc<()>,
}

impl Clone for Fragile {
    fn clone(&self) -> Self {
        assert!(self.value >= 0, "cannot clone a negative value");

        Self {
            value: self.value,
            _instances: Rc::clone(&self._instances),
        }
    }
}

fn main() {
    let instances = Rc::new(());

    let items = [1, 2, -3, 4]
        .into_iter()
        .map(|value| Fragile {
            value,
            _instances: Rc::clone(&instances),
        })
        .collect::<PlacementVec<_>>();

    // Each Fragile holds one reference, plus the one we hold here.
    println!(
        "Live instances before clone: {}",
        Rc::strong_count(&instances).saturating_sub(1)
    );

    // Silence the default panic message for the expected panic.
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(AssertUnwindSafe(|| items.clone()));
    drop(panic::take_hook());

    assert!(result.is_err());
    println!("Clone panicked as expected");

    // The two clones created before the panic were dropped again.
    let live = Rc::strong_count(&instances).saturating_sub(1);
    println!("Live instances after failed clone: {live}");
    assert_eq!(live, items.len());

    println!(
        "Source is intact: {:?}",
        items.iter().map(|item| item.value).collect::<Vec<_>>()
    );
}

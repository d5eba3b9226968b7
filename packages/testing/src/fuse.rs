use std::cell::Cell;
use std::num::NonZero;
use std::rc::Rc;

/// Panics on a predetermined tick, then never again.
///
/// Used to simulate an operation (typically a constructor or `Clone::clone()`) that fails
/// partway through a sequence of calls. Clones of a fuse share the same state, so a fuse can
/// be embedded into many values that together count towards the same trigger.
///
/// # Example
///
/// ```rust
/// use std::num::NonZero;
/// use std::panic::{AssertUnwindSafe, catch_unwind};
///
/// use testing::Fuse;
///
/// let fuse = Fuse::new(NonZero::new(2).unwrap());
///
/// fuse.tick();
/// assert!(catch_unwind(AssertUnwindSafe(|| fuse.tick())).is_err());
///
/// // Once blown, the fuse stays quiet.
/// fuse.tick();
/// assert!(fuse.has_blown());
/// ```
#[derive(Clone, Debug)]
pub struct Fuse {
    state: Rc<Cell<FuseState>>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum FuseState {
    Armed { ticks_remaining: NonZero<usize> },
    Blown,
    Disarmed,
}

impl Fuse {
    /// Creates a fuse that panics on tick number `blow_on` (counting from 1).
    #[must_use]
    pub fn new(blow_on: NonZero<usize>) -> Self {
        Self {
            state: Rc::new(Cell::new(FuseState::Armed {
                ticks_remaining: blow_on,
            })),
        }
    }

    /// Creates a fuse that never panics.
    #[must_use]
    pub fn disarmed() -> Self {
        Self {
            state: Rc::new(Cell::new(FuseState::Disarmed)),
        }
    }

    /// Counts one tick, panicking if this is the tick the fuse was armed for.
    ///
    /// # Panics
    ///
    /// Panics on the tick the fuse was created to blow on.
    pub fn tick(&self) {
        let FuseState::Armed { ticks_remaining } = self.state.get() else {
            return;
        };

        match NonZero::new(ticks_remaining.get().wrapping_sub(1)) {
            Some(ticks_remaining) => self.state.set(FuseState::Armed { ticks_remaining }),
            None => {
                self.state.set(FuseState::Blown);
                panic!("fuse blew as planned");
            }
        }
    }

    /// Whether the fuse has already panicked.
    #[must_use]
    pub fn has_blown(&self) -> bool {
        self.state.get() == FuseState::Blown
    }

    /// Prevents the fuse from ever panicking, regardless of its current state.
    pub fn disarm(&self) {
        if !self.has_blown() {
            self.state.set(FuseState::Disarmed);
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use super::*;

    #[test]
    fn blows_on_requested_tick() {
        let fuse = Fuse::new(NonZero::new(3).unwrap());

        fuse.tick();
        fuse.tick();
        assert!(!fuse.has_blown());

        let result = catch_unwind(AssertUnwindSafe(|| fuse.tick()));
        assert!(result.is_err());
        assert!(fuse.has_blown());

        // Subsequent ticks are harmless.
        fuse.tick();
    }

    #[test]
    fn disarmed_never_blows() {
        let fuse = Fuse::disarmed();

        for _ in 0..100 {
            fuse.tick();
        }

        assert!(!fuse.has_blown());
    }

    #[test]
    fn clones_share_state() {
        let fuse = Fuse::new(NonZero::new(2).unwrap());
        let clone = fuse.clone();

        fuse.tick();

        let result = catch_unwind(AssertUnwindSafe(|| clone.tick()));
        assert!(result.is_err());
        assert!(fuse.has_blown());
    }

    #[test]
    fn disarm_stops_armed_fuse() {
        let fuse = Fuse::new(NonZero::new(1).unwrap());

        fuse.disarm();
        fuse.tick();

        assert!(!fuse.has_blown());
    }
}

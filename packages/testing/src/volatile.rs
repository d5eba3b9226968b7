use std::cell::RefCell;
use std::fmt;

use crate::{Fuse, LiveTracker, Tracked};

thread_local! {
    static DEFAULT_SOURCES: RefCell<Option<(Fuse, LiveTracker)>> = const { RefCell::new(None) };
}

/// A tracked value whose `Clone` and `Default` implementations may panic.
///
/// Every clone and every default-constructed instance first ticks a [`Fuse`]. If the fuse
/// blows, the operation panics before any new value exists. Every instance is also counted by a
/// [`LiveTracker`], so a test can verify that all instances are dropped exactly once after a
/// container operation unwinds.
///
/// `Default::default()` takes its fuse and tracker from the current thread, as configured via
/// [`arm_defaults()`][Self::arm_defaults]. Without configuration, it uses a disarmed fuse and
/// a throwaway tracker.
///
/// # Example
///
/// ```rust
/// use std::num::NonZero;
/// use std::panic::{AssertUnwindSafe, catch_unwind};
///
/// use testing::{Fuse, LiveTracker, Volatile};
///
/// let fuse = Fuse::new(NonZero::new(2).unwrap());
/// let tracker = LiveTracker::new();
///
/// let original = Volatile::new(7, &fuse, &tracker);
/// let copy = original.clone();
/// assert_eq!(copy.value(), 7);
///
/// assert!(catch_unwind(AssertUnwindSafe(|| original.clone())).is_err());
/// assert_eq!(tracker.live(), 2);
/// ```
pub struct Volatile {
    value: u32,
    fuse: Fuse,
    tracked: Tracked<()>,
}

impl Volatile {
    /// Creates an instance without ticking the fuse.
    #[must_use]
    pub fn new(value: u32, fuse: &Fuse, tracker: &LiveTracker) -> Self {
        Self {
            value,
            fuse: fuse.clone(),
            tracked: tracker.track(()),
        }
    }

    /// The payload given at creation time (or 0 for default-constructed instances).
    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Configures the fuse and tracker used by `Default::default()` on the current thread.
    pub fn arm_defaults(fuse: &Fuse, tracker: &LiveTracker) {
        DEFAULT_SOURCES.with_borrow_mut(|sources| {
            *sources = Some((fuse.clone(), tracker.clone()));
        });
    }

    /// Reverts `Default::default()` on the current thread to the unconfigured behavior.
    pub fn disarm_defaults() {
        DEFAULT_SOURCES.with_borrow_mut(|sources| *sources = None);
    }
}

impl Clone for Volatile {
    fn clone(&self) -> Self {
        self.fuse.tick();

        Self {
            value: self.value,
            fuse: self.fuse.clone(),
            tracked: self.tracked.clone(),
        }
    }
}

impl Default for Volatile {
    fn default() -> Self {
        let (fuse, tracker) = DEFAULT_SOURCES
            .with_borrow(Clone::clone)
            .unwrap_or_else(|| (Fuse::disarmed(), LiveTracker::new()));

        fuse.tick();

        Self::new(0, &fuse, &tracker)
    }
}

impl PartialEq for Volatile {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Volatile {}

impl fmt::Debug for Volatile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Volatile").field(&self.value).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::num::NonZero;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use super::*;

    #[test]
    fn clone_ticks_fuse_before_creating() {
        let fuse = Fuse::new(NonZero::new(1).unwrap());
        let tracker = LiveTracker::new();

        let original = Volatile::new(5, &fuse, &tracker);

        let result = catch_unwind(AssertUnwindSafe(|| original.clone()));

        assert!(result.is_err());
        assert_eq!(tracker.live(), 1);
        assert_eq!(tracker.created(), 1);
    }

    #[test]
    fn default_uses_armed_sources() {
        let fuse = Fuse::new(NonZero::new(2).unwrap());
        let tracker = LiveTracker::new();

        Volatile::arm_defaults(&fuse, &tracker);

        let first = Volatile::default();
        assert_eq!(first.value(), 0);
        assert_eq!(tracker.live(), 1);

        let result = catch_unwind(Volatile::default);
        assert!(result.is_err());
        assert_eq!(tracker.live(), 1);

        Volatile::disarm_defaults();

        drop(first);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn default_without_sources_never_panics() {
        Volatile::disarm_defaults();

        for _ in 0..10 {
            let value = Volatile::default();
            assert_eq!(value.value(), 0);
        }
    }

    #[test]
    fn equality_compares_payload() {
        let fuse = Fuse::disarmed();
        let tracker = LiveTracker::new();

        assert_eq!(
            Volatile::new(1, &fuse, &tracker),
            Volatile::new(1, &fuse, &tracker)
        );
        assert_ne!(
            Volatile::new(1, &fuse, &tracker),
            Volatile::new(2, &fuse, &tracker)
        );
    }
}

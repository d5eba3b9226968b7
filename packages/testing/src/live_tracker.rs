use std::cell::Cell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Counts the values created through it that are still alive.
///
/// Every [`Tracked`] value created by [`track()`][Self::track] or by cloning a tracked value
/// counts as one live value until it is dropped. Dropping more values than were created
/// (i.e. a double drop) panics immediately.
///
/// Clones of the tracker share the same counters.
///
/// # Example
///
/// ```rust
/// use testing::LiveTracker;
///
/// let tracker = LiveTracker::new();
///
/// let a = tracker.track("a");
/// let b = a.clone();
/// assert_eq!(tracker.live(), 2);
///
/// drop(a);
/// drop(b);
/// assert_eq!(tracker.live(), 0);
/// assert_eq!(tracker.created(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LiveTracker {
    counts: Rc<Counts>,
}

#[derive(Debug, Default)]
struct Counts {
    live: Cell<usize>,
    created: Cell<usize>,
}

impl LiveTracker {
    /// Creates a tracker with no live values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `value` so that its lifetime is counted by this tracker.
    #[must_use]
    pub fn track<V>(&self, value: V) -> Tracked<V> {
        self.on_created();

        Tracked {
            value,
            tracker: self.clone(),
        }
    }

    /// The number of tracked values that have been created but not yet dropped.
    #[must_use]
    pub fn live(&self) -> usize {
        self.counts.live.get()
    }

    /// The total number of tracked values ever created, including clones.
    #[must_use]
    pub fn created(&self) -> usize {
        self.counts.created.get()
    }

    fn on_created(&self) {
        let live = self.counts.live.get();
        let created = self.counts.created.get();

        self.counts
            .live
            .set(live.checked_add(1).expect("test cannot create usize::MAX values"));
        self.counts
            .created
            .set(created.checked_add(1).expect("test cannot create usize::MAX values"));
    }

    fn on_dropped(&self) {
        let live = self.counts.live.get();

        let Some(live) = live.checked_sub(1) else {
            panic!("double drop detected: more tracked values were dropped than were created");
        };

        self.counts.live.set(live);
    }
}

/// A value whose lifetime is counted by a [`LiveTracker`].
///
/// Dereferences to the wrapped value.
pub struct Tracked<V> {
    value: V,
    tracker: LiveTracker,
}

impl<V> Tracked<V> {
    /// Returns a reference to the wrapped value.
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V: Clone> Clone for Tracked<V> {
    fn clone(&self) -> Self {
        self.tracker.track(self.value.clone())
    }
}

impl<V> Drop for Tracked<V> {
    fn drop(&mut self) {
        self.tracker.on_dropped();
    }
}

impl<V> Deref for Tracked<V> {
    type Target = V;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<V: PartialEq> PartialEq for Tracked<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V: Eq> Eq for Tracked<V> {}

impl<V: fmt::Debug> fmt::Debug for Tracked<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::mem;

    use super::*;

    #[test]
    fn counts_creation_and_drop() {
        let tracker = LiveTracker::new();

        let a = tracker.track(1);
        let b = tracker.track(2);
        assert_eq!(tracker.live(), 2);

        drop(a);
        assert_eq!(tracker.live(), 1);

        drop(b);
        assert_eq!(tracker.live(), 0);
        assert_eq!(tracker.created(), 2);
    }

    #[test]
    fn clone_counts_as_creation() {
        let tracker = LiveTracker::new();

        let a = tracker.track("x".to_string());
        let b = a.clone();

        assert_eq!(tracker.live(), 2);
        assert_eq!(*b, "x");
    }

    #[test]
    #[should_panic]
    fn double_drop_panics() {
        let tracker = LiveTracker::new();
        let a = tracker.track(1);

        // SAFETY: Deliberately produces a bitwise duplicate to simulate a double drop.
        let duplicate = unsafe { std::ptr::read(&a) };

        drop(a);
        drop(duplicate);
    }

    #[test]
    fn forgotten_value_stays_live() {
        let tracker = LiveTracker::new();

        mem::forget(tracker.track(1));

        assert_eq!(tracker.live(), 1);
    }
}

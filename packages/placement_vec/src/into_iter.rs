use std::iter::FusedIterator;
use std::{fmt, ptr, slice};

use crate::RawMemory;

/// An iterator that moves values out of a [`PlacementVec`][crate::PlacementVec].
///
/// Created by the `IntoIterator` implementation of `PlacementVec<T>`. Values that are not
/// consumed by the time the iterator is dropped are dropped together with it.
///
/// # Examples
///
/// ```
/// use placement_vec::PlacementVec;
///
/// let words = PlacementVec::from(["a".to_string(), "b".to_string(), "c".to_string()]);
///
/// let mut iter = words.into_iter();
/// assert_eq!(iter.next().as_deref(), Some("a"));
/// assert_eq!(iter.next_back().as_deref(), Some("c"));
/// assert_eq!(iter.as_slice(), ["b"]);
/// ```
pub struct IntoIter<T> {
    memory: RawMemory<T>,

    // Slots in `start..end` hold values that have not been yielded yet.
    start: usize,
    end: usize,
}

impl<T> IntoIter<T> {
    /// Takes ownership of a buffer whose first `len` slots hold live values.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that slots `0..len` of `memory` are initialized and that
    /// nothing else will drop or read them.
    pub(crate) unsafe fn new(memory: RawMemory<T>, len: usize) -> Self {
        debug_assert!(len <= memory.capacity());

        Self {
            memory,
            start: 0,
            end: len,
        }
    }

    /// Returns the values that have not yet been yielded.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: start <= capacity, so this is at most the one-past-the-end slot.
        let first = unsafe { self.memory.slot(self.start) };

        // SAFETY: Slots in start..end are initialized and end <= capacity.
        unsafe { slice::from_raw_parts(first.as_ptr(), self.remaining()) }
    }

    /// Returns the values that have not yet been yielded, for in-place modification.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: start <= capacity, so this is at most the one-past-the-end slot.
        let first = unsafe { self.memory.slot(self.start) };

        // SAFETY: Slots in start..end are initialized and end <= capacity. We hold an
        // exclusive reference to the iterator, so nothing else can observe the values.
        unsafe { slice::from_raw_parts_mut(first.as_ptr(), self.remaining()) }
    }

    fn remaining(&self) -> usize {
        // start never passes end.
        self.end.wrapping_sub(self.start)
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        // SAFETY: start < end <= capacity, so the slot is in bounds and initialized.
        let slot = unsafe { self.memory.slot(self.start) };

        // The slot is logically uninitialized from here on, as it is outside start..end.
        self.start = self.start.wrapping_add(1);

        // SAFETY: The slot was initialized and we just excluded it from further use.
        Some(unsafe { slot.read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        self.end = self.end.wrapping_sub(1);

        // SAFETY: end was > start before the decrement, so the slot at the new end is in
        // bounds. It is initialized and has just been excluded from further use.
        let slot = unsafe { self.memory.slot(self.end) };

        // SAFETY: See above.
        Some(unsafe { slot.read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining: *mut [T] = self.as_mut_slice();

        // Nothing is left to yield even if dropping one of the values panics.
        self.start = self.end;

        // SAFETY: The values were initialized and are no longer reachable through the
        // iterator. The buffer itself is released when `memory` is dropped after this.
        unsafe {
            ptr::drop_in_place(remaining);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(
    clippy::arithmetic_side_effects,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::cell::Cell;

    use static_assertions::{assert_impl_all, assert_not_impl_any};
    use testing::LiveTracker;

    use super::*;
    use crate::PlacementVec;

    assert_impl_all!(IntoIter<u32>: Send, Sync, ExactSizeIterator, DoubleEndedIterator);
    assert_not_impl_any!(IntoIter<Cell<u32>>: Sync);

    #[test]
    fn yields_values_in_order() {
        let values = PlacementVec::from([1, 2, 3]);

        let collected = values.into_iter().collect::<Vec<_>>();

        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[test]
    fn iterates_from_both_ends() {
        let values = PlacementVec::from([1, 2, 3, 4]);
        let mut iter = values.into_iter();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn drops_unconsumed_values() {
        let tracker = LiveTracker::new();

        let values = (0..5).map(|i| tracker.track(i)).collect::<PlacementVec<_>>();
        assert_eq!(tracker.live(), 5);

        let mut iter = values.into_iter();
        let first = iter.next();
        let last = iter.next_back();
        drop(iter);

        assert_eq!(tracker.live(), 2);

        drop(first);
        drop(last);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn as_mut_slice_modifies_remaining() {
        let values = PlacementVec::from([1, 2, 3]);
        let mut iter = values.into_iter();

        _ = iter.next();
        for value in iter.as_mut_slice() {
            *value *= 10;
        }

        assert_eq!(iter.collect::<Vec<_>>(), vec![20, 30]);
    }

    #[test]
    fn empty_container_yields_nothing() {
        let values = PlacementVec::<String>::new();

        let mut iter = values.into_iter();

        assert!(iter.as_slice().is_empty());
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn debug_output_lists_remaining() {
        let values = PlacementVec::from([7, 8]);
        let mut iter = values.into_iter();
        _ = iter.next();

        assert_eq!(format!("{iter:?}"), "IntoIter([8])");
    }
}

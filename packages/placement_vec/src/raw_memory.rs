use std::alloc::{self, Layout};
use std::any::type_name;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::{fmt, mem};

use crate::{Error, Result, metrics};

/// Owns an uninitialized heap buffer with room for `capacity` values of type `T`.
///
/// This is the storage layer underneath [`PlacementVec`][crate::PlacementVec]. It allocates and
/// releases memory but never creates or drops a `T` - it has no knowledge of which slots hold
/// live values, so constructing values into slots and dropping them again is entirely the
/// responsibility of the owner.
///
/// The buffer is exclusively owned. There is no `Clone` implementation because duplicating a
/// buffer says nothing about how the values inside it should be duplicated. Ownership can be
/// transferred in O(1) with [`std::mem::take()`], which leaves an empty instance behind, and two
/// instances can exchange buffers with [`swap_with()`][Self::swap_with].
///
/// # Zero-sized types
///
/// Values of zero-sized types need no storage, so no memory is ever allocated for them. The
/// capacity is still tracked so that capacity bookkeeping behaves identically for all `T`.
///
/// # Examples
///
/// ```
/// use placement_vec::RawMemory;
///
/// let memory = RawMemory::<String>::with_capacity(4);
/// assert_eq!(memory.capacity(), 4);
///
/// // SAFETY: 0 is within the capacity of the buffer.
/// let slot = unsafe { memory.slot(0) };
///
/// // SAFETY: The slot is valid for writes and currently uninitialized.
/// unsafe { slot.write("hello".to_string()) };
///
/// // SAFETY: We initialized the slot above. Dropping it here leaves it uninitialized again,
/// // which is what the buffer expects when it is released.
/// unsafe { slot.drop_in_place() };
/// ```
pub struct RawMemory<T> {
    /// Start of the buffer. Dangling if nothing is allocated, which is the case when the
    /// capacity is zero or `T` is zero-sized.
    ptr: NonNull<T>,

    /// Number of `T`-sized slots in the buffer (not bytes).
    capacity: usize,

    _slots: PhantomData<T>,
}

impl<T> RawMemory<T> {
    /// Creates an instance that owns no buffer and has a capacity of zero.
    ///
    /// Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _slots: PhantomData,
        }
    }

    /// Allocates a buffer with room for exactly `capacity` values of `T`.
    ///
    /// A capacity of zero is valid and does not allocate.
    ///
    /// # Panics
    ///
    /// Panics if the size of the buffer in bytes would exceed `isize::MAX`.
    ///
    /// Allocation failure is reported via [`std::alloc::handle_alloc_error()`], which aborts
    /// the process by default.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(memory) => memory,
            Err(Error::CapacityOverflow { requested }) => {
                panic!(
                    "capacity overflow: cannot allocate room for {requested} values of {}",
                    type_name::<T>()
                )
            }
            Err(Error::AllocationFailed { layout }) => alloc::handle_alloc_error(layout),
        }
    }

    /// Allocates a buffer with room for exactly `capacity` values of `T`, reporting failure
    /// as an error instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if the size of the buffer in bytes would exceed
    /// `isize::MAX` and [`Error::AllocationFailed`] if the memory allocator fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::{Error, RawMemory};
    ///
    /// let memory = RawMemory::<u64>::try_with_capacity(16).unwrap();
    /// assert_eq!(memory.capacity(), 16);
    ///
    /// let error = RawMemory::<u64>::try_with_capacity(usize::MAX).unwrap_err();
    /// assert!(matches!(error, Error::CapacityOverflow { .. }));
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let Some(layout) = Self::allocation_layout(capacity)? else {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity,
                _slots: PhantomData,
            });
        };

        // SAFETY: allocation_layout() only returns layouts with a non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };

        let ptr = NonNull::new(ptr)
            .ok_or(Error::AllocationFailed { layout })?
            .cast::<T>();

        metrics::ALLOCATED_SLOTS.with(|e| e.observe(capacity));

        Ok(Self {
            ptr,
            capacity,
            _slots: PhantomData,
        })
    }

    /// The layout of the allocation backing `capacity` slots, or `None` if no allocation is
    /// needed because the buffer would be zero-sized.
    fn allocation_layout(capacity: usize) -> Result<Option<Layout>> {
        if capacity == 0 || size_of::<T>() == 0 {
            return Ok(None);
        }

        Layout::array::<T>(capacity)
            .map(Some)
            .map_err(|_layout_error| Error::CapacityOverflow {
                requested: capacity,
            })
    }

    /// The number of `T`-sized slots in the buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a pointer to the start of the buffer.
    ///
    /// The pointer is dangling (but non-null and aligned) if nothing is allocated.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns a mutable pointer to the start of the buffer.
    ///
    /// The pointer is dangling (but non-null and aligned) if nothing is allocated.
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns a pointer to the start of the buffer.
    ///
    /// The pointer is dangling (but non-null and aligned) if nothing is allocated.
    #[must_use]
    pub fn as_non_null(&self) -> NonNull<T> {
        self.ptr
    }

    /// Returns a pointer to the slot at `index`, for constructing or dropping a value there.
    ///
    /// `index == capacity` is permitted and yields the one-past-the-end pointer, which may be
    /// used for pointer arithmetic but not for reads or writes.
    ///
    /// The buffer does not track whether the slot is initialized. Writing to an initialized
    /// slot leaks the previous value; reading from an uninitialized slot is undefined behavior.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index <= capacity`. This is checked in debug builds only.
    #[must_use]
    pub unsafe fn slot(&self, index: usize) -> NonNull<T> {
        debug_assert!(
            index <= self.capacity,
            "slot {index} is out of bounds in RawMemory<{}> of capacity {}",
            type_name::<T>(),
            self.capacity
        );

        // SAFETY: The caller guarantees that the index is at most one past the end of the
        // buffer, so the offset stays within (or one past) our allocation. For a dangling
        // pointer the capacity is zero or T is zero-sized, so the offset in bytes is zero.
        unsafe { self.ptr.add(index) }
    }

    /// Exchanges the buffers of two instances in O(1) without touching the slot contents.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }
}

impl<T> Default for RawMemory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawMemory<T> {
    #[cfg_attr(test, mutants::skip)] // Mutation leaks memory, which the tests cannot observe.
    fn drop(&mut self) {
        let layout = Self::allocation_layout(self.capacity)
            .expect("layout was already validated when the buffer was allocated");

        let Some(layout) = layout else {
            return;
        };

        // SAFETY: The buffer was allocated in try_with_capacity() with this exact layout
        // (the layout is a pure function of T and the capacity, which never changes for
        // a given buffer) and has not been released yet.
        unsafe {
            alloc::dealloc(self.ptr.as_ptr().cast(), layout);
        }
    }
}

impl<T> fmt::Debug for RawMemory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawMemory")
            .field("item_type", &format_args!("{}", type_name::<T>()))
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}

// SAFETY: RawMemory owns its buffer exclusively and hands out slot pointers only. Moving it
// to another thread moves the (potential) values in the buffer with it, which is sound
// whenever the values themselves may be sent.
unsafe impl<T: Send> Send for RawMemory<T> {}

// SAFETY: Shared references to RawMemory only expose pointers and the capacity. Any access
// to the values behind the pointers is the caller's responsibility and requires `unsafe`.
unsafe impl<T: Sync> Sync for RawMemory<T> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    reason = "test code doesn't need the same safety rigor as production code"
)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};
    use testing::LiveTracker;

    use super::*;

    assert_impl_all!(RawMemory<u32>: Send, Sync, Default);
    assert_impl_all!(RawMemory<Cell<u32>>: Send);
    assert_not_impl_any!(RawMemory<u32>: Clone, Copy);
    assert_not_impl_any!(RawMemory<Cell<u32>>: Sync);
    assert_not_impl_any!(RawMemory<Rc<u32>>: Send, Sync);

    #[test]
    fn default_is_empty() {
        let memory = RawMemory::<u64>::default();

        assert_eq!(memory.capacity(), 0);
        assert_eq!(memory.as_non_null(), NonNull::dangling());
    }

    #[test]
    fn zero_capacity_does_not_allocate() {
        let memory = RawMemory::<u64>::with_capacity(0);

        assert_eq!(memory.capacity(), 0);
        assert_eq!(memory.as_non_null(), NonNull::dangling());
    }

    #[test]
    fn slots_are_independent() {
        let memory = RawMemory::<u64>::with_capacity(3);
        assert_eq!(memory.capacity(), 3);

        unsafe {
            memory.slot(0).write(10);
            memory.slot(1).write(20);
            memory.slot(2).write(30);

            assert_eq!(memory.slot(0).read(), 10);
            assert_eq!(memory.slot(1).read(), 20);
            assert_eq!(memory.slot(2).read(), 30);
        }
    }

    #[test]
    fn one_past_the_end_slot_is_addressable() {
        let memory = RawMemory::<u32>::with_capacity(4);

        let end = unsafe { memory.slot(4) };
        let start = memory.as_non_null();

        assert_eq!(unsafe { end.offset_from(start) }, 4);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn slot_beyond_end_panics_in_debug() {
        let memory = RawMemory::<u32>::with_capacity(4);

        _ = unsafe { memory.slot(5) };
    }

    #[test]
    fn does_not_drop_values_in_slots() {
        let tracker = LiveTracker::new();

        {
            let memory = RawMemory::with_capacity(2);

            unsafe {
                memory.slot(0).write(tracker.track(1));
            }

            assert_eq!(tracker.live(), 1);
        }

        // The buffer is gone but the value was never dropped - it leaked, as expected
        // from a storage layer that does not know which slots are initialized.
        assert_eq!(tracker.live(), 1);
    }

    #[test]
    fn take_transfers_ownership() {
        let mut source = RawMemory::<u64>::with_capacity(8);
        let source_ptr = source.as_non_null();

        let target = mem::take(&mut source);

        assert_eq!(target.capacity(), 8);
        assert_eq!(target.as_non_null(), source_ptr);
        assert_eq!(source.capacity(), 0);
        assert_eq!(source.as_non_null(), NonNull::dangling());
    }

    #[test]
    fn move_assign_replaces_buffer() {
        let mut source = RawMemory::<u64>::with_capacity(8);
        let source_ptr = source.as_non_null();

        let mut target = RawMemory::<u64>::with_capacity(2);
        assert_eq!(target.capacity(), 2);

        // The previous buffer of the target is released by the assignment.
        target = mem::take(&mut source);

        assert_eq!(target.capacity(), 8);
        assert_eq!(target.as_non_null(), source_ptr);
        assert_eq!(source.capacity(), 0);
    }

    #[test]
    fn swap_with_exchanges_buffers() {
        let mut a = RawMemory::<u16>::with_capacity(2);
        let mut b = RawMemory::<u16>::with_capacity(5);

        let a_ptr = a.as_non_null();
        let b_ptr = b.as_non_null();

        unsafe {
            a.slot(0).write(111);
            b.slot(0).write(222);
        }

        a.swap_with(&mut b);

        assert_eq!(a.capacity(), 5);
        assert_eq!(b.capacity(), 2);
        assert_eq!(a.as_non_null(), b_ptr);
        assert_eq!(b.as_non_null(), a_ptr);

        unsafe {
            assert_eq!(a.slot(0).read(), 222);
            assert_eq!(b.slot(0).read(), 111);
        }
    }

    #[test]
    fn zero_sized_type_tracks_capacity_without_allocating() {
        let memory = RawMemory::<()>::with_capacity(1000);

        assert_eq!(memory.capacity(), 1000);
        assert_eq!(memory.as_non_null(), NonNull::dangling());

        unsafe {
            memory.slot(999).write(());
        }
    }

    #[test]
    fn try_with_capacity_reports_overflow() {
        let result = RawMemory::<u64>::try_with_capacity(usize::MAX / 4);

        assert_eq!(
            result.unwrap_err(),
            Error::CapacityOverflow {
                requested: usize::MAX / 4
            }
        );
    }

    #[test]
    #[should_panic]
    fn with_capacity_panics_on_overflow() {
        drop(RawMemory::<u64>::with_capacity(usize::MAX));
    }

    #[test]
    fn debug_output_names_item_type() {
        let memory = RawMemory::<u32>::with_capacity(3);

        let output = format!("{memory:?}");

        assert!(output.contains("RawMemory"));
        assert!(output.contains("u32"));
        assert!(output.contains("capacity: 3"));
    }
}

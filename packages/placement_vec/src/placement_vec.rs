use std::borrow::{Borrow, BorrowMut};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice::{self, SliceIndex};
use std::{fmt, iter, mem, ptr};

use scopeguard::ScopeGuard;

use crate::{IntoIter, RawMemory, Result, metrics};

/// A contiguous growable array that constructs its values directly into raw memory.
///
/// The container owns a [`RawMemory<T>`] buffer and a count of live values. The first `len`
/// slots of the buffer hold live values; the remaining slots up to the capacity are
/// uninitialized.
///
/// # Growth
///
/// Appending or inserting into a full container allocates a new buffer with room for
/// `max(1, 2 * len)` values, so capacities grow as 1, 2, 4, 8 and so on. The new value is
/// constructed in the new buffer before the existing values are relocated into it, after
/// which the old buffer is released. [`reserve()`][Self::reserve] instead grows the buffer to
/// exactly the requested capacity.
///
/// # Panic safety
///
/// Values are created by user code: constructor closures, `Default::default()` and
/// `Clone::clone()`. If such a call panics, the operation drops every value it had already
/// created and the container is left exactly as it was before the operation (apart from
/// possibly having a larger capacity in the case of [`resize()`][Self::resize]). Relocation of
/// existing values is a bitwise move and never runs user code.
///
/// # Contract violations
///
/// Out-of-range positions and popping from an empty container are caller bugs and panic.
/// The unchecked accessors [`get_unchecked()`][Self::get_unchecked] and
/// [`get_unchecked_mut()`][Self::get_unchecked_mut] only verify the index in debug builds.
///
/// # Examples
///
/// ```
/// use placement_vec::PlacementVec;
///
/// let mut items = PlacementVec::from([10, 20, 30]);
///
/// items.insert(1, 15);
/// assert_eq!(items, [10, 15, 20, 30]);
///
/// items.erase(1);
/// assert_eq!(items, [10, 20, 30]);
///
/// items.resize(5);
/// assert_eq!(items, [10, 20, 30, 0, 0]);
/// ```
pub struct PlacementVec<T> {
    memory: RawMemory<T>,

    // Slots in `0..len` hold live values.
    len: usize,
}

impl<T> PlacementVec<T> {
    /// Creates an empty container.
    ///
    /// Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            memory: RawMemory::new(),
            len: 0,
        }
    }

    /// Creates an empty container with room for exactly `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size in bytes would exceed `isize::MAX`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            memory: RawMemory::with_capacity(capacity),
            len: 0,
        }
    }

    /// Creates an empty container with room for exactly `capacity` values, reporting
    /// allocation failure as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer size would overflow or the allocator fails.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            memory: RawMemory::try_with_capacity(capacity)?,
            len: 0,
        })
    }

    /// Creates a container of `len` values, each produced by calling `f`.
    ///
    /// The capacity is exactly `len`.
    ///
    /// # Panics
    ///
    /// If `f` panics, the values created so far are dropped and the buffer is released
    /// before the panic continues.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let mut next = 0;
    /// let squares = PlacementVec::with_len_with(4, || {
    ///     next += 1;
    ///     next * next
    /// });
    ///
    /// assert_eq!(squares, [1, 4, 9, 16]);
    /// ```
    #[must_use]
    pub fn with_len_with<F>(len: usize, f: F) -> Self
    where
        F: FnMut() -> T,
    {
        let memory = RawMemory::with_capacity(len);

        // SAFETY: The buffer is fresh, so all `len` slots are uninitialized and in bounds.
        unsafe {
            construct_into(&memory, 0, iter::repeat_with(f).take(len));
        }

        Self { memory, len }
    }

    /// The number of live values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the container holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of values the container can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.memory.capacity()
    }

    /// Ensures the capacity is at least `capacity`.
    ///
    /// If the current capacity is already sufficient, this does nothing. Otherwise a buffer
    /// with room for exactly `capacity` values is allocated, the values are relocated into it
    /// and the old buffer is released.
    ///
    /// Note that unlike [`Vec::reserve()`], the argument is the new total capacity, not the
    /// number of additional values.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size in bytes would exceed `isize::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let mut items = PlacementVec::from([1, 2]);
    ///
    /// items.reserve(10);
    /// assert_eq!(items.capacity(), 10);
    ///
    /// items.reserve(5);
    /// assert_eq!(items.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, capacity: usize) {
        if capacity <= self.capacity() {
            return;
        }

        self.relocate_into(RawMemory::with_capacity(capacity), self.len);
    }

    /// Ensures the capacity is at least `capacity`, reporting allocation failure as an error.
    ///
    /// The container is unchanged if an error is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer size would overflow or the allocator fails.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.capacity() {
            return Ok(());
        }

        self.relocate_into(RawMemory::try_with_capacity(capacity)?, self.len);

        Ok(())
    }

    /// Reduces the capacity to exactly the number of live values.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() == self.len {
            return;
        }

        self.relocate_into(RawMemory::with_capacity(self.len), self.len);
    }

    /// Changes the number of values to `len`, calling `f` to produce any new values.
    ///
    /// Shrinking drops the trailing values and keeps the capacity. Growing first reserves
    /// exactly `len` slots, then appends the new values.
    ///
    /// # Panics
    ///
    /// If `f` panics, the new values created so far are dropped and the length is unchanged.
    /// The capacity may already have grown.
    pub fn resize_with<F>(&mut self, len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        match len.cmp(&self.len) {
            Ordering::Less => self.truncate(len),
            Ordering::Equal => {}
            Ordering::Greater => {
                self.reserve(len);

                let added = len.wrapping_sub(self.len);

                // SAFETY: We just reserved `len` slots, so the `added` slots after the live
                // values are in bounds and uninitialized.
                unsafe {
                    construct_into(&self.memory, self.len, iter::repeat_with(f).take(added));
                }

                self.len = len;
            }
        }
    }

    /// Drops all values beyond the first `len`. Does nothing if there are not more than
    /// `len` values. The capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let tail_len = self.len.wrapping_sub(len);

        // SAFETY: len < self.len <= capacity.
        let tail_start = unsafe { self.memory.slot(len) };
        let tail = ptr::slice_from_raw_parts_mut(tail_start.as_ptr(), tail_len);

        // The container is consistent before any value's drop logic runs.
        self.len = len;

        // SAFETY: The tail values were live and are no longer reachable through the container.
        unsafe {
            ptr::drop_in_place(tail);
        }
    }

    /// Drops all values. The capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Constructs a new value at the end of the container by calling `f` and returns a
    /// reference to it.
    ///
    /// If the container is full, a buffer with room for `max(1, 2 * len)` values is
    /// allocated. The new value is constructed into the new buffer before the existing values
    /// are relocated next to it.
    ///
    /// # Panics
    ///
    /// If `f` panics, the container is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let mut lines = PlacementVec::new();
    ///
    /// let line = lines.emplace_back_with(|| String::with_capacity(80));
    /// line.push_str("hello");
    ///
    /// assert_eq!(lines, ["hello"]);
    /// ```
    pub fn emplace_back_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let index = self.len;

        if self.len == self.capacity() {
            let new_memory = RawMemory::with_capacity(self.grown_capacity());

            // SAFETY: The new buffer has room for more than `len` values and is uninitialized.
            let slot = unsafe { new_memory.slot(index) };

            // SAFETY: See above.
            unsafe {
                slot.write(f());
            }

            self.relocate_into(new_memory, index);
        } else {
            // SAFETY: len < capacity and the slot at `len` is uninitialized.
            let slot = unsafe { self.memory.slot(index) };

            // SAFETY: See above.
            unsafe {
                slot.write(f());
            }
        }

        self.len = self.len.wrapping_add(1);

        // SAFETY: We just initialized this slot and the returned reference borrows `self`.
        unsafe { self.memory.slot(index).as_mut() }
    }

    /// Appends `value` to the end of the container and returns a reference to it.
    ///
    /// See [`emplace_back_with()`][Self::emplace_back_with] for the growth behavior.
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    pub fn push(&mut self, value: T) -> &mut T {
        self.emplace_back_with(|| value)
    }

    /// Drops the last value.
    ///
    /// # Panics
    ///
    /// Panics if the container is empty.
    pub fn pop_back(&mut self) {
        assert!(!self.is_empty(), "pop_back() called on an empty PlacementVec");

        self.len = self.len.wrapping_sub(1);

        // SAFETY: The slot at the old `len - 1` was live and is now excluded from the container.
        let slot = unsafe { self.memory.slot(self.len) };

        // SAFETY: See above.
        unsafe {
            slot.drop_in_place();
        }
    }

    /// Removes the last value and returns it, or `None` if the container is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        self.len = self.len.wrapping_sub(1);

        // SAFETY: The slot at the old `len - 1` was live and is now excluded from the container.
        let slot = unsafe { self.memory.slot(self.len) };

        // SAFETY: See above.
        Some(unsafe { slot.read() })
    }

    /// Constructs a new value at `index` by calling `f`, shifting all values after it one
    /// position towards the end, and returns a reference to the new value.
    ///
    /// If the container is full, a buffer with room for `max(1, 2 * len)` values is
    /// allocated and the new value is constructed at its final position in the new buffer
    /// before the existing values are relocated around it.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// If `f` panics, the container is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let mut letters = PlacementVec::from(['a', 'c']);
    ///
    /// let b = letters.emplace_with(1, || 'b');
    /// assert_eq!(*b, 'b');
    ///
    /// assert_eq!(letters, ['a', 'b', 'c']);
    /// ```
    pub fn emplace_with<F>(&mut self, index: usize, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        assert!(
            index <= self.len,
            "insertion index {index} is out of bounds in PlacementVec of length {}",
            self.len
        );

        if self.len == self.capacity() {
            let new_memory = RawMemory::with_capacity(self.grown_capacity());

            // SAFETY: index <= len < new capacity and the new buffer is uninitialized.
            let slot = unsafe { new_memory.slot(index) };

            // SAFETY: See above.
            unsafe {
                slot.write(f());
            }

            self.relocate_into(new_memory, index);
        } else if self.is_empty() {
            // SAFETY: The capacity is nonzero, so slot 0 is in bounds. It is uninitialized.
            let slot = unsafe { self.memory.slot(0) };

            // SAFETY: See above.
            unsafe {
                slot.write(f());
            }
        } else {
            // Construct first, so a panic leaves the existing values where they are.
            let value = f();

            // SAFETY: index <= len <= capacity.
            let slot = unsafe { self.memory.slot(index) };

            // SAFETY: index + 1 <= len + 1 <= capacity.
            let next = unsafe { slot.add(1) };

            // SAFETY: Moves the live values in `index..len` one slot up, which stays in bounds
            // because len < capacity. The regions may overlap, which `copy` permits.
            unsafe {
                ptr::copy(slot.as_ptr(), next.as_ptr(), self.len.wrapping_sub(index));
            }

            // SAFETY: The value previously at `index` has been moved out bitwise, so the slot is
            // logically uninitialized.
            unsafe {
                slot.write(value);
            }
        }

        self.len = self.len.wrapping_add(1);

        // SAFETY: We just initialized this slot and the returned reference borrows `self`.
        unsafe { self.memory.slot(index).as_mut() }
    }

    /// Inserts `value` at `index`, shifting all values after it one position towards the end,
    /// and returns a reference to it.
    ///
    /// See [`emplace_with()`][Self::emplace_with] for the growth behavior.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        self.emplace_with(index, || value)
    }

    /// Removes and returns the value at `index`, shifting all values after it one position
    /// towards the start.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "removal index {index} is out of bounds in PlacementVec of length {}",
            self.len
        );

        // SAFETY: index < len <= capacity.
        let slot = unsafe { self.memory.slot(index) };

        // SAFETY: The slot holds a live value. Ownership moves out here and the slot is
        // overwritten by the shift below.
        let value = unsafe { slot.read() };

        // SAFETY: index + 1 <= len <= capacity.
        let next = unsafe { slot.add(1) };

        // SAFETY: Moves the live values in `index + 1..len` one slot down. The regions may
        // overlap, which `copy` permits.
        unsafe {
            ptr::copy(
                next.as_ptr(),
                slot.as_ptr(),
                self.len.wrapping_sub(index).wrapping_sub(1),
            );
        }

        self.len = self.len.wrapping_sub(1);

        value
    }

    /// Drops the value at `index`, shifting all values after it one position towards the
    /// start.
    ///
    /// Returns the position of the value that followed the erased one, which is `index`
    /// itself. This equals the new length if the last value was erased.
    ///
    /// The container is already in its final state when the erased value is dropped.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));

        index
    }

    /// Exchanges the contents of two containers in O(1), including their buffers.
    pub fn swap_with(&mut self, other: &mut Self) {
        self.memory.swap_with(&mut other.memory);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Returns a reference to the value at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index < len`. This is checked in debug builds only.
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(
            index < self.len,
            "index {index} is out of bounds in PlacementVec of length {}",
            self.len
        );

        // SAFETY: The caller guarantees that the index is within the live values.
        unsafe { self.memory.slot(index).as_ref() }
    }

    /// Returns an exclusive reference to the value at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `index < len`. This is checked in debug builds only.
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(
            index < self.len,
            "index {index} is out of bounds in PlacementVec of length {}",
            self.len
        );

        // SAFETY: The caller guarantees that the index is within the live values and we hold
        // an exclusive reference to the container.
        unsafe { self.memory.slot(index).as_mut() }
    }

    /// Returns the live values as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: The first `len` slots are initialized. The pointer is non-null and aligned
        // even if nothing is allocated.
        unsafe { slice::from_raw_parts(self.memory.as_ptr(), self.len) }
    }

    /// Returns the live values as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len;

        // SAFETY: The first `len` slots are initialized and we hold an exclusive reference.
        unsafe { slice::from_raw_parts_mut(self.memory.as_mut_ptr(), len) }
    }

    /// Returns an iterator over the live values, from first to last.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator over exclusive references to the live values, from first to last.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    fn grown_capacity(&self) -> usize {
        if self.len == 0 {
            1
        } else {
            self.len
                .checked_mul(2)
                .expect("capacity overflow: PlacementVec length cannot be doubled")
        }
    }

    /// Moves all live values into `new_memory`, leaving slot `gap` free if `gap < len`, then
    /// releases the old buffer and adopts the new one.
    ///
    /// Values in `0..gap` keep their index and values in `gap..len` move up by one. The length
    /// is unchanged; if a gap is left, the caller must have initialized it (or must do so
    /// before the container is used again) and update the length.
    #[cfg_attr(test, mutants::skip)] // Critical - mutation can cause UB, timeouts and hailstorms.
    fn relocate_into(&mut self, mut new_memory: RawMemory<T>, gap: usize) {
        debug_assert!(gap <= self.len);
        debug_assert!(
            new_memory.capacity() >= self.len,
            "new buffer cannot fit the existing values"
        );

        // SAFETY: The old buffer holds `len` live values, `gap <= len` and the new buffer has
        // room for at least `gap` values. Distinct buffers never overlap.
        unsafe {
            ptr::copy_nonoverlapping(self.memory.as_ptr(), new_memory.as_mut_ptr(), gap);
        }

        if gap < self.len {
            debug_assert!(new_memory.capacity() > self.len);

            // SAFETY: gap < len <= capacity of both buffers.
            let source = unsafe { self.memory.slot(gap) };

            // SAFETY: gap + 1 <= len < new capacity.
            let destination = unsafe { new_memory.slot(gap.wrapping_add(1)) };

            // SAFETY: The source holds `len - gap` live values and the destination has room
            // for them. Distinct buffers never overlap.
            unsafe {
                ptr::copy_nonoverlapping(
                    source.as_ptr(),
                    destination.as_ptr(),
                    self.len.wrapping_sub(gap),
                );
            }
        }

        metrics::RELOCATED_ELEMENTS.with(|e| e.observe(self.len));

        // The old buffer now only holds bitwise copies that must not be dropped. Dropping
        // `new_memory` after the swap releases the old buffer without touching its contents.
        self.memory.swap_with(&mut new_memory);
    }
}

impl<T: Default> PlacementVec<T> {
    /// Creates a container of `len` default values.
    ///
    /// The capacity is exactly `len`.
    ///
    /// # Panics
    ///
    /// If `T::default()` panics, the values created so far are dropped and the buffer is
    /// released before the panic continues.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self::with_len_with(len, T::default)
    }

    /// Changes the number of values to `len`, filling any new slots with default values.
    ///
    /// Shrinking drops the trailing values and keeps the capacity. Growing first reserves
    /// exactly `len` slots, then appends the new values.
    ///
    /// # Panics
    ///
    /// If `T::default()` panics, the new values created so far are dropped and the length is
    /// unchanged. The capacity may already have grown.
    ///
    /// # Examples
    ///
    /// ```
    /// use placement_vec::PlacementVec;
    ///
    /// let mut items = PlacementVec::from([1, 2, 3]);
    ///
    /// items.resize(5);
    /// assert_eq!(items, [1, 2, 3, 0, 0]);
    /// assert_eq!(items.capacity(), 5);
    ///
    /// items.resize(2);
    /// assert_eq!(items, [1, 2]);
    /// assert_eq!(items.capacity(), 5);
    /// ```
    pub fn resize(&mut self, len: usize) {
        self.resize_with(len, T::default);
    }
}

/// Moves the values from `values` into consecutive slots of `memory`, starting at `start`.
///
/// If producing a value panics, the values already moved into the buffer by this call are
/// dropped before the panic continues.
///
/// # Safety
///
/// The caller must ensure that `values` yields at most `capacity - start` values and that the
/// slots they are moved into are uninitialized.
#[cfg_attr(test, mutants::skip)] // Critical - mutation can cause UB, timeouts and hailstorms.
unsafe fn construct_into<T, I>(memory: &RawMemory<T>, start: usize, values: I)
where
    I: IntoIterator<Item = T>,
{
    let mut constructed = scopeguard::guard(0_usize, |constructed| {
        // SAFETY: start <= capacity per the caller's guarantee.
        let first = unsafe { memory.slot(start) };
        let built = ptr::slice_from_raw_parts_mut(first.as_ptr(), constructed);

        // SAFETY: Exactly `constructed` slots starting at `start` were initialized below and
        // nothing else owns them yet.
        unsafe {
            ptr::drop_in_place(built);
        }
    });

    for value in values {
        let index = start.wrapping_add(*constructed);

        // SAFETY: The caller guarantees that the iterator does not run past the capacity.
        let slot = unsafe { memory.slot(index) };

        // SAFETY: See above. The slot is uninitialized.
        unsafe {
            slot.write(value);
        }

        *constructed = constructed.wrapping_add(1);
    }

    // Every value was constructed, so ownership passes to the caller.
    ScopeGuard::into_inner(constructed);
}

impl<T> Default for PlacementVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for PlacementVec<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for PlacementVec<T> {
    /// Creates a container with capacity equal to the source length, holding clones of
    /// every value.
    ///
    /// If cloning a value panics, the clones created so far are dropped and the source is
    /// untouched.
    fn clone(&self) -> Self {
        let memory = RawMemory::with_capacity(self.len);

        // SAFETY: The buffer is fresh with exactly `len` uninitialized slots and the source
        // yields exactly `len` values.
        unsafe {
            construct_into(&memory, 0, self.iter().cloned());
        }

        Self {
            memory,
            len: self.len,
        }
    }

    /// Makes `self` a copy of `source`, reusing the existing buffer and values if possible.
    ///
    /// If `source` has more values than `self` has capacity, a full copy is made first and
    /// then swapped in, so `self` is unchanged if cloning panics. Otherwise existing values
    /// are overwritten via `clone_from()`, after which surplus values are dropped or missing
    /// values are cloned into the spare capacity.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut copy = source.clone();
            self.swap_with(&mut copy);
            return;
        }

        for (target, value) in self.iter_mut().zip(source.iter()) {
            target.clone_from(value);
        }

        if source.len <= self.len {
            self.truncate(source.len);
            return;
        }

        // SAFETY: source.len <= capacity, so the source values beyond our length fit into our
        // uninitialized spare slots.
        unsafe {
            construct_into(
                &self.memory,
                self.len,
                source.iter().skip(self.len).cloned(),
            );
        }

        self.len = source.len;
    }
}

impl<T> Deref for PlacementVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for PlacementVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for PlacementVec<T> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for PlacementVec<T> {
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T> IntoIterator for PlacementVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let memory = mem::take(&mut self.memory);
        let len = mem::replace(&mut self.len, 0);

        // SAFETY: The first `len` slots are initialized and, as we have emptied `self`, the
        // iterator is the only owner of the values.
        unsafe { IntoIter::new(memory, len) }
    }
}

impl<'a, T> IntoIterator for &'a PlacementVec<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut PlacementVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for PlacementVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut result = Self::new();
        result.extend(iter);
        result
    }
}

impl<T> Extend<T> for PlacementVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for PlacementVec<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> From<Vec<T>> for PlacementVec<T> {
    fn from(value: Vec<T>) -> Self {
        let mut result = Self::with_capacity(value.len());
        result.extend(value);
        result
    }
}

impl<T, const N: usize> From<[T; N]> for PlacementVec<T> {
    fn from(value: [T; N]) -> Self {
        let mut result = Self::with_capacity(N);
        result.extend(value);
        result
    }
}

impl<T: Clone> From<&[T]> for PlacementVec<T> {
    fn from(value: &[T]) -> Self {
        let mut result = Self::with_capacity(value.len());
        result.extend(value.iter().cloned());
        result
    }
}

impl<T: fmt::Debug> fmt::Debug for PlacementVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq<PlacementVec<U>> for PlacementVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &PlacementVec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for PlacementVec<T> {}

impl<T, U> PartialEq<[U]> for PlacementVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<&[U]> for PlacementVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for PlacementVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U> PartialEq<Vec<U>> for PlacementVec<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Hash> Hash for PlacementVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> AsRef<[T]> for PlacementVec<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for PlacementVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for PlacementVec<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for PlacementVec<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::undocumented_unsafe_blocks,
    clippy::cast_possible_truncation,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::cell::Cell;
    use std::hash::DefaultHasher;
    use std::num::NonZero;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};
    use testing::{Fuse, LiveTracker, Volatile};

    use super::*;

    assert_impl_all!(PlacementVec<u32>: Send, Sync, Default, Clone, fmt::Debug);
    assert_impl_all!(PlacementVec<Cell<u32>>: Send);
    assert_not_impl_any!(PlacementVec<Cell<u32>>: Sync);
    assert_not_impl_any!(PlacementVec<Rc<u32>>: Send, Sync);
    assert_not_impl_any!(PlacementVec<u32>: Copy);

    #[test]
    fn new_is_empty_without_capacity() {
        let items = PlacementVec::<String>::new();

        assert_eq!(items.len(), 0);
        assert_eq!(items.capacity(), 0);
        assert!(items.is_empty());
        assert!(items.iter().next().is_none());
    }

    #[test]
    fn with_capacity_does_not_construct() {
        let items = PlacementVec::<String>::with_capacity(8);

        assert_eq!(items.len(), 0);
        assert_eq!(items.capacity(), 8);
    }

    #[test]
    fn try_with_capacity_reports_overflow() {
        let result = PlacementVec::<u64>::try_with_capacity(usize::MAX);

        assert!(matches!(
            result,
            Err(crate::Error::CapacityOverflow {
                requested: usize::MAX
            })
        ));
    }

    #[test]
    fn with_len_default_constructs() {
        let items = PlacementVec::<String>::with_len(3);

        assert_eq!(items.len(), 3);
        assert_eq!(items.capacity(), 3);
        assert!(items.iter().all(String::is_empty));
    }

    #[test]
    fn with_len_zero_is_empty() {
        let items = PlacementVec::<String>::with_len(0);

        assert!(items.is_empty());
        assert_eq!(items.capacity(), 0);
    }

    #[test]
    fn with_len_rolls_back_on_panic() {
        let tracker = LiveTracker::new();
        let fuse = Fuse::new(NonZero::new(3).unwrap());

        Volatile::arm_defaults(&fuse, &tracker);
        let result = catch_unwind(|| PlacementVec::<Volatile>::with_len(5));
        Volatile::disarm_defaults();

        assert!(result.is_err());
        assert_eq!(tracker.created(), 2);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn push_grows_by_doubling() {
        let mut items = PlacementVec::new();
        let mut capacities = Vec::new();

        for i in 0..9 {
            items.push(i);
            capacities.push(items.capacity());
        }

        assert_eq!(capacities, vec![1, 2, 4, 4, 8, 8, 8, 8, 16]);
        assert_eq!(items, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn push_returns_new_element() {
        let mut items = PlacementVec::new();

        let value = items.push(5);
        *value += 1;

        assert_eq!(items, [6]);
    }

    #[test]
    fn emplace_back_with_panic_leaves_container_unchanged() {
        let mut items = PlacementVec::from([1, 2]);
        let old_ptr = items.as_ptr();

        let result = catch_unwind(AssertUnwindSafe(|| {
            items.emplace_back_with(|| panic!("constructor failed"));
        }));

        assert!(result.is_err());
        assert_eq!(items, [1, 2]);
        assert_eq!(items.capacity(), 2);
        assert_eq!(items.as_ptr(), old_ptr);
    }

    #[test]
    fn emplace_back_with_panic_without_growth_leaves_container_unchanged() {
        let mut items = PlacementVec::with_capacity(4);
        items.push(1);

        let result = catch_unwind(AssertUnwindSafe(|| {
            items.emplace_back_with(|| panic!("constructor failed"));
        }));

        assert!(result.is_err());
        assert_eq!(items, [1]);
        assert_eq!(items.capacity(), 4);
    }

    #[test]
    fn pop_back_drops_last() {
        let tracker = LiveTracker::new();
        let mut items = PlacementVec::new();
        items.push(tracker.track(1));
        items.push(tracker.track(2));

        items.pop_back();

        assert_eq!(items.len(), 1);
        assert_eq!(*items[0], 1);
        assert_eq!(tracker.live(), 1);
        assert_eq!(items.capacity(), 2);
    }

    #[test]
    #[should_panic]
    fn pop_back_on_empty_panics() {
        let mut items = PlacementVec::<u32>::new();
        items.pop_back();
    }

    #[test]
    fn pop_returns_last() {
        let mut items = PlacementVec::from([1, 2]);

        assert_eq!(items.pop(), Some(2));
        assert_eq!(items.pop(), Some(1));
        assert_eq!(items.pop(), None);
    }

    #[test]
    fn emplace_with_in_middle_with_spare_capacity() {
        let mut items = PlacementVec::with_capacity(4);
        items.extend([1, 3]);

        let value = items.emplace_with(1, || 2);
        assert_eq!(*value, 2);

        assert_eq!(items, [1, 2, 3]);
        assert_eq!(items.capacity(), 4);
    }

    #[test]
    fn emplace_with_into_empty_with_capacity() {
        let mut items = PlacementVec::with_capacity(2);

        items.emplace_with(0, || 7);

        assert_eq!(items, [7]);
        assert_eq!(items.capacity(), 2);
    }

    #[test]
    fn emplace_with_into_empty_without_capacity() {
        let mut items = PlacementVec::new();

        items.emplace_with(0, || 7);

        assert_eq!(items, [7]);
        assert_eq!(items.capacity(), 1);
    }

    #[test]
    fn emplace_with_full_relocates_around_new_value() {
        let mut items = PlacementVec::from([1, 2, 4, 5]);
        assert_eq!(items.capacity(), 4);

        items.emplace_with(2, || 3);

        assert_eq!(items, [1, 2, 3, 4, 5]);
        assert_eq!(items.capacity(), 8);
    }

    #[test]
    fn emplace_with_full_at_front_and_end() {
        let mut items = PlacementVec::from([2]);
        items.emplace_with(0, || 1);
        assert_eq!(items, [1, 2]);

        items.emplace_with(2, || 3);
        assert_eq!(items, [1, 2, 3]);
        assert_eq!(items.capacity(), 4);
    }

    #[test]
    fn emplace_with_panic_leaves_container_unchanged() {
        let tracker = LiveTracker::new();
        let mut items = PlacementVec::with_capacity(4);
        items.push(tracker.track(1));
        items.push(tracker.track(2));

        let result = catch_unwind(AssertUnwindSafe(|| {
            items.emplace_with(1, || panic!("constructor failed"));
        }));
        assert!(result.is_err());
        assert_eq!(items.len(), 2);
        assert_eq!(*items[0], 1);
        assert_eq!(*items[1], 2);

        // Same again but with a full container.
        items.push(tracker.track(3));
        items.push(tracker.track(4));

        let result = catch_unwind(AssertUnwindSafe(|| {
            items.emplace_with(0, || panic!("constructor failed"));
        }));
        assert!(result.is_err());
        assert_eq!(items.len(), 4);
        assert_eq!(items.capacity(), 4);
        assert_eq!(tracker.live(), 4);

        drop(items);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    #[should_panic]
    fn emplace_with_out_of_bounds_panics() {
        let mut items = PlacementVec::from([1]);
        items.emplace_with(2, || 2);
    }

    #[test]
    fn erase_returns_following_position() {
        let mut items = PlacementVec::from([1, 2, 3]);

        let next = items.erase(1);
        assert_eq!(next, 1);
        assert_eq!(items[next], 3);

        let next = items.erase(1);
        assert_eq!(next, items.len());
        assert_eq!(items, [1]);
    }

    #[test]
    fn erase_drops_exactly_one() {
        let tracker = LiveTracker::new();
        let mut items = (0..4).map(|i| tracker.track(i)).collect::<PlacementVec<_>>();

        items.erase(0);

        assert_eq!(tracker.live(), 3);
        assert_eq!(items.iter().map(|v| **v).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn erase_is_complete_before_value_is_dropped() {
        struct PanicOnDrop(bool);

        impl Drop for PanicOnDrop {
            fn drop(&mut self) {
                assert!(!self.0, "drop failed");
            }
        }

        let mut items = PlacementVec::from([PanicOnDrop(false), PanicOnDrop(true), PanicOnDrop(false)]);

        let result = catch_unwind(AssertUnwindSafe(|| items.erase(1)));

        assert!(result.is_err());
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| !item.0));
    }

    #[test]
    #[should_panic]
    fn erase_out_of_bounds_panics() {
        let mut items = PlacementVec::from([1]);
        items.erase(1);
    }

    #[test]
    fn remove_returns_value() {
        let mut items = PlacementVec::from(["a".to_string(), "b".to_string()]);

        assert_eq!(items.remove(0), "a");
        assert_eq!(items, ["b"]);
    }

    #[test]
    fn insert_then_erase_is_identity() {
        let mut items = PlacementVec::from([1, 2, 3, 4]);

        for index in 0..=4 {
            items.insert(index, 99);
            assert_eq!(items[index], 99);
            items.erase(index);
            assert_eq!(items, [1, 2, 3, 4]);
        }
    }

    #[test]
    fn reserve_is_exact_and_preserves_values() {
        let mut items = PlacementVec::from(["a".to_string(), "b".to_string()]);

        items.reserve(7);
        assert_eq!(items.capacity(), 7);
        assert_eq!(items, ["a", "b"]);

        items.reserve(3);
        assert_eq!(items.capacity(), 7);
    }

    #[test]
    fn reserve_does_not_clone_or_drop() {
        let tracker = LiveTracker::new();
        let mut items = (0..3).map(|i| tracker.track(i)).collect::<PlacementVec<_>>();
        let created = tracker.created();

        items.reserve(100);

        assert_eq!(tracker.created(), created);
        assert_eq!(tracker.live(), 3);
    }

    #[test]
    fn try_reserve_leaves_container_unchanged_on_error() {
        let mut items = PlacementVec::<u64>::from([1, 2]);

        let result = items.try_reserve(usize::MAX);

        assert!(matches!(result, Err(crate::Error::CapacityOverflow { .. })));
        assert_eq!(items, [1, 2]);
        assert_eq!(items.capacity(), 2);

        items.try_reserve(10).unwrap();
        assert_eq!(items.capacity(), 10);
    }

    #[test]
    fn shrink_to_fit_matches_length() {
        let mut items = PlacementVec::with_capacity(10);
        items.extend([1, 2, 3]);

        items.shrink_to_fit();
        assert_eq!(items.capacity(), 3);
        assert_eq!(items, [1, 2, 3]);

        items.clear();
        items.shrink_to_fit();
        assert_eq!(items.capacity(), 0);
    }

    #[test]
    fn resize_grows_and_shrinks() {
        let mut items = PlacementVec::from([1, 2, 3]);

        items.resize(5);
        assert_eq!(items, [1, 2, 3, 0, 0]);
        assert_eq!(items.capacity(), 5);

        items.resize(5);
        assert_eq!(items.capacity(), 5);

        items.resize(2);
        assert_eq!(items, [1, 2]);
        assert_eq!(items.capacity(), 5);
    }

    #[test]
    fn resize_with_rolls_back_new_values_on_panic() {
        let tracker = LiveTracker::new();
        let fuse = Fuse::disarmed();

        let mut items = PlacementVec::new();
        items.push(Volatile::new(1, &fuse, &tracker));

        let mut remaining = 2;
        let result = catch_unwind(AssertUnwindSafe(|| {
            items.resize_with(5, || {
                assert!(remaining > 0, "constructor failed");
                remaining -= 1;
                Volatile::new(2, &fuse, &tracker)
            });
        }));

        assert!(result.is_err());
        assert_eq!(items.len(), 1);
        assert_eq!(items.capacity(), 5);
        assert_eq!(tracker.live(), 1);
    }

    #[test]
    fn truncate_and_clear_keep_capacity() {
        let tracker = LiveTracker::new();
        let mut items = (0..4).map(|i| tracker.track(i)).collect::<PlacementVec<_>>();

        items.truncate(10);
        assert_eq!(items.len(), 4);

        items.truncate(1);
        assert_eq!(items.len(), 1);
        assert_eq!(tracker.live(), 1);

        items.clear();
        assert!(items.is_empty());
        assert_eq!(items.capacity(), 4);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn drop_drops_every_value_once() {
        let tracker = LiveTracker::new();

        let items = (0..10).map(|i| tracker.track(i)).collect::<PlacementVec<_>>();
        assert_eq!(tracker.live(), 10);

        drop(items);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn clone_has_capacity_of_source_length() {
        let mut items = PlacementVec::with_capacity(10);
        items.extend(["a".to_string(), "b".to_string()]);

        let copy = items.clone();

        assert_eq!(copy, items);
        assert_eq!(copy.capacity(), 2);
    }

    #[test]
    fn clone_is_independent() {
        let items = PlacementVec::from([1, 2, 3]);
        let mut copy = items.clone();

        copy[0] = 100;
        copy.push(4);

        assert_eq!(items, [1, 2, 3]);
        assert_eq!(copy, [100, 2, 3, 4]);
    }

    #[test]
    fn clone_rolls_back_on_panic() {
        let tracker = LiveTracker::new();
        let fuse = Fuse::new(NonZero::new(3).unwrap());

        let items = (0..5)
            .map(|i| Volatile::new(i, &fuse, &tracker))
            .collect::<PlacementVec<_>>();

        let result = catch_unwind(AssertUnwindSafe(|| items.clone()));

        assert!(result.is_err());
        assert_eq!(tracker.live(), 5);
        assert_eq!(items.len(), 5);
        assert!(items.iter().enumerate().all(|(i, v)| v.value() == i as u32));
    }

    #[test]
    fn clone_from_larger_source_reallocates() {
        let mut target = PlacementVec::from([1]);
        let source = PlacementVec::from([5, 6, 7]);

        target.clone_from(&source);

        assert_eq!(target, [5, 6, 7]);
        assert_eq!(target.capacity(), 3);
    }

    #[test]
    fn clone_from_shorter_source_truncates() {
        let mut target = PlacementVec::from(["a".to_string(), "b".to_string(), "c".to_string()]);
        let source = PlacementVec::from(["x".to_string()]);

        target.clone_from(&source);

        assert_eq!(target, ["x"]);
        assert_eq!(target.capacity(), 3);
    }

    #[test]
    fn clone_from_fills_spare_capacity() {
        let mut target = PlacementVec::with_capacity(5);
        target.push("a".to_string());
        let source = PlacementVec::from(["x".to_string(), "y".to_string(), "z".to_string()]);

        target.clone_from(&source);

        assert_eq!(target, ["x", "y", "z"]);
        assert_eq!(target.capacity(), 5);
    }

    #[test]
    fn clone_from_reallocation_panic_leaves_target_unchanged() {
        let tracker = LiveTracker::new();
        let fuse = Fuse::new(NonZero::new(2).unwrap());

        let source = (0..3)
            .map(|i| Volatile::new(i, &fuse, &tracker))
            .collect::<PlacementVec<_>>();
        let mut target = PlacementVec::from([Volatile::new(9, &Fuse::disarmed(), &tracker)]);

        let result = catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));

        assert!(result.is_err());
        assert_eq!(target.len(), 1);
        assert_eq!(target[0].value(), 9);
        assert_eq!(tracker.live(), 4);
    }

    #[test]
    fn clone_from_tail_panic_drops_partial_tail() {
        let tracker = LiveTracker::new();
        let fuse = Fuse::new(NonZero::new(3).unwrap());

        let source = (0..4)
            .map(|i| Volatile::new(i, &fuse, &tracker))
            .collect::<PlacementVec<_>>();

        let mut target = PlacementVec::with_capacity(4);
        target.push(Volatile::new(9, &Fuse::disarmed(), &tracker));

        // Tick 1 is the prefix clone_from (the default implementation clones), ticks 2 and 3
        // are the tail clones.
        let result = catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));

        assert!(result.is_err());
        assert_eq!(target.len(), 1);
        assert_eq!(tracker.live(), 5);

        drop(target);
        drop(source);
        assert_eq!(tracker.live(), 0);
    }

    #[test]
    fn take_moves_contents() {
        let mut source = PlacementVec::from([1, 2, 3]);

        let target = mem::take(&mut source);

        assert_eq!(target, [1, 2, 3]);
        assert_eq!(target.capacity(), 3);
        assert!(source.is_empty());
        assert_eq!(source.capacity(), 0);
    }

    #[test]
    fn swap_with_exchanges_everything() {
        let mut a = PlacementVec::from([1, 2]);
        let mut b = PlacementVec::with_capacity(10);
        b.push(3);

        a.swap_with(&mut b);

        assert_eq!(a, [3]);
        assert_eq!(a.capacity(), 10);
        assert_eq!(b, [1, 2]);
        assert_eq!(b.capacity(), 2);
    }

    #[test]
    fn unchecked_access() {
        let mut items = PlacementVec::from([1, 2, 3]);

        unsafe {
            *items.get_unchecked_mut(1) = 20;
            assert_eq!(*items.get_unchecked(1), 20);
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn unchecked_access_out_of_bounds_panics_in_debug() {
        let items = PlacementVec::from([1, 2, 3]);

        _ = unsafe { items.get_unchecked(3) };
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds_panics() {
        let items = PlacementVec::from([1, 2, 3]);

        _ = items[3];
    }

    #[test]
    fn index_by_range() {
        let items = PlacementVec::from([1, 2, 3, 4]);

        assert_eq!(&items[1..3], &[2, 3]);
    }

    #[test]
    fn iteration_by_reference() {
        let mut items = PlacementVec::from([1, 2, 3]);

        for value in &mut items {
            *value *= 2;
        }

        let mut sum = 0;
        for value in &items {
            sum += value;
        }

        assert_eq!(sum, 12);
    }

    #[test]
    fn equality_and_hash() {
        let a = PlacementVec::from([1, 2, 3]);
        let b = PlacementVec::from(vec![1, 2, 3]);

        assert_eq!(a, b);
        assert_eq!(a, vec![1, 2, 3]);
        assert_eq!(a, [1, 2, 3][..]);
        assert_eq!(a, &[1, 2, 3][..]);
        assert_ne!(a, [1, 2]);

        let hash = |items: &PlacementVec<i32>| {
            let mut hasher = DefaultHasher::new();
            items.hash(&mut hasher);
            hasher.finish()
        };

        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn debug_output_is_list() {
        let items = PlacementVec::from([1, 2]);

        assert_eq!(format!("{items:?}"), "[1, 2]");
    }

    #[test]
    fn from_slice_clones() {
        let source = ["a".to_string(), "b".to_string()];

        let items = PlacementVec::from(&source[..]);

        assert_eq!(items, source);
        assert_eq!(items.capacity(), 2);
    }

    #[test]
    fn extend_by_reference_copies() {
        let mut items = PlacementVec::<i32>::new();

        items.extend(&[1, 2]);

        assert_eq!(items, [1, 2]);
    }

    #[test]
    fn zero_sized_values() {
        let mut items = PlacementVec::new();

        for _ in 0..5 {
            items.push(());
        }

        assert_eq!(items.len(), 5);
        assert_eq!(items.capacity(), 8);

        items.insert(2, ());
        items.erase(0);
        assert_eq!(items.len(), 5);

        items.resize(0);
        assert!(items.is_empty());
    }

    #[test]
    fn relocation_is_reported() {
        let mut items = PlacementVec::from([1, 2, 3, 4]);

        items.push(5);

        let report = nm::Report::collect();
        assert!(
            report
                .events()
                .any(|event| event.name() == "placement_vec_relocated_elements")
        );
    }
}

//! Dynamic array over one contiguous heap allocation.
//!
//! Owns a buffer of `capacity` slots of which the first `len` hold live
//! elements; the rest are raw memory. Growth is amortized doubling, clamped
//! to what the allocator can address. Every slot is individually constructed
//! and destroyed through the allocator strategy.
//!
//! Guarantee tiers: `reserve` and growth relocate bitwise, so a failed
//! allocation leaves the vector untouched (strong). `assign`/`resize`/
//! `insert` may stop half way through a failing element operation but always
//! leave the vector valid and destructible (basic).

use crate::algo;
use crate::core::{Error, Global, RawAlloc};
use crate::cursor::{self, ForwardCursor, InputCursor, Rev, SliceCursor, SliceCursorMut};
use getset::CopyGetters;
use log::trace;
use std::alloc::Layout;
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut, Index, IndexMut, Range};
use std::ptr::{self, NonNull};

/// Contiguous growable array routing all storage through a [`RawAlloc`].
///
/// Any operation that reallocates invalidates all cursors into the vector;
/// the cursor lifetimes enforce that at compile time.
#[derive(CopyGetters)]
pub struct Vector<T, A: RawAlloc = Global> {
    ptr: NonNull<T>,
    /// Number of live elements.
    #[getset(get_copy = "pub")]
    len: usize,
    /// Number of slots in the backing buffer.
    #[getset(get_copy = "pub")]
    capacity: usize,
    alloc: A,
}

impl<T> Vector<T> {
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// Allocates exactly `capacity` slots up front.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_in(capacity, Global)
    }

    /// `n` copies of `value`. Strong guarantee: a failing clone destroys the
    /// already-built prefix and releases the buffer.
    pub fn from_elem(n: usize, value: T) -> Result<Self, Error>
    where
        T: Clone,
    {
        Self::from_elem_in(n, value, Global)
    }

    /// Copies of the elements in `[first, last)`.
    pub fn from_range<'c, C>(first: C, last: &C) -> Result<Self, Error>
    where
        C: InputCursor<'c, Item = T>,
        T: Clone + 'c,
    {
        Self::from_range_in(first, last, Global)
    }
}

impl<T, A: RawAlloc> Vector<T, A> {
    pub fn new_in(alloc: A) -> Self {
        Vector {
            ptr: NonNull::dangling(),
            len: 0,
            // Zero-sized elements never need storage.
            capacity: if mem::size_of::<T>() == 0 {
                usize::MAX
            } else {
                0
            },
            alloc,
        }
    }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Result<Self, Error> {
        let mut vec = Self::new_in(alloc);
        if mem::size_of::<T>() > 0 && capacity > 0 {
            vec.ptr = Self::allocate_buffer(&vec.alloc, capacity)?;
            vec.capacity = capacity;
        }
        Ok(vec)
    }

    pub fn from_elem_in(n: usize, value: T, alloc: A) -> Result<Self, Error>
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity_in(n, alloc)?;
        vec.resize(n, &value)?;
        Ok(vec)
    }

    pub fn from_range_in<'c, C>(first: C, last: &C, alloc: A) -> Result<Self, Error>
    where
        C: InputCursor<'c, Item = T>,
        T: Clone + 'c,
    {
        let mut vec = Self::new_in(alloc);
        vec.assign_range(first, last)?;
        Ok(vec)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Upper bound on element count reportable by the allocator.
    pub fn max_len(&self) -> usize {
        if mem::size_of::<T>() == 0 {
            usize::MAX
        } else {
            self.alloc.max_size() / mem::size_of::<T>()
        }
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Checked access.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        self.get(index)
            .ok_or_else(|| Error::out_of_range(index, self.len))
    }

    /// Checked mutable access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len;
        self.get_mut(index)
            .ok_or_else(|| Error::out_of_range(index, len))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            // SAFETY: slot is within the constructed range.
            Some(unsafe { &*self.ptr.as_ptr().add(index) })
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            // SAFETY: slot is within the constructed range.
            Some(unsafe { &mut *self.ptr.as_ptr().add(index) })
        } else {
            None
        }
    }

    /// # Safety
    /// `index` must be less than `len`.
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        &*self.ptr.as_ptr().add(index)
    }

    /// # Safety
    /// `index` must be less than `len`.
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        &mut *self.ptr.as_ptr().add(index)
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are live.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first `len` slots are live and borrowed exclusively.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Appends an element, growing first if the buffer is full. Amortized O(1).
    pub fn push(&mut self, value: T) -> Result<(), Error> {
        if self.len == self.capacity {
            self.grow_for(self.len + 1)?;
        }
        // SAFETY: capacity now exceeds len.
        unsafe {
            self.alloc.construct(self.ptr.as_ptr().add(self.len), value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the last live slot; reading it out ends its lifetime here.
        Some(unsafe { ptr::read(self.ptr.as_ptr().add(self.len)) })
    }

    /// Inserts at `index`, shifting the tail one slot back.
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        assert!(index <= self.len, "insert past the end");
        if self.len == self.capacity {
            self.grow_for(self.len + 1)?;
        }
        // SAFETY: tail shift stays within capacity, gap slot is raw after it.
        unsafe {
            let base = self.ptr.as_ptr();
            ptr::copy(base.add(index), base.add(index + 1), self.len - index);
            self.alloc.construct(base.add(index), value);
        }
        self.len += 1;
        Ok(())
    }

    /// Inserts `n` copies of `value` at `index`.
    /// Panics if `index > len`.
    pub fn insert_n(&mut self, index: usize, n: usize, value: &T) -> Result<(), Error>
    where
        T: Clone,
    {
        let mut gap = self.open_gap(index, n)?;
        while gap.filled < n {
            gap.construct(value.clone());
        }
        Ok(())
    }

    /// Inserts copies of `[first, last)` at `index`.
    /// Panics if `index > len`.
    pub fn insert_range<'c, C>(&mut self, index: usize, first: C, last: &C) -> Result<(), Error>
    where
        C: ForwardCursor<'c, Item = T>,
        T: Clone + 'c,
    {
        let n = cursor::distance(&first, last);
        let mut gap = self.open_gap(index, n)?;
        let mut walk = first;
        while gap.filled < n {
            gap.construct(walk.read().clone());
            walk.advance();
        }
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the tail forward.
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "remove past the end");
        // SAFETY: slot is live; the shift closes over it.
        unsafe {
            let base = self.ptr.as_ptr();
            let value = ptr::read(base.add(index));
            ptr::copy(base.add(index + 1), base.add(index), self.len - index - 1);
            self.len -= 1;
            value
        }
    }

    /// Destroys `range` and shifts the tail forward over it.
    /// Returns the number of elements removed; the element after the erased
    /// range now lives at `range.start`. Panics on an out-of-bounds range.
    pub fn erase(&mut self, range: Range<usize>) -> usize {
        let Range { start, end } = range;
        assert!(start <= end && end <= self.len, "erase range out of bounds");
        let count = end - start;
        if count == 0 {
            return 0;
        }
        // Claim only the prefix while the range is being destroyed; a
        // panicking Drop then leaks the rest of the range and the tail
        // instead of counting destroyed slots as live.
        let old_len = self.len;
        self.len = start;
        // SAFETY: slots in the range are live; the shift stays in bounds.
        unsafe {
            let base = self.ptr.as_ptr();
            for i in start..end {
                self.alloc.destroy(base.add(i));
            }
            ptr::copy(base.add(end), base.add(start), old_len - end);
        }
        self.len = old_len - count;
        count
    }

    /// Reallocates to exactly `capacity` slots if that grows the buffer.
    /// Strong guarantee: on failure the vector is unchanged.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), Error> {
        if capacity <= self.capacity {
            return Ok(());
        }
        let max = self.max_len();
        if capacity > max {
            return Err(Error::length_exceeded(capacity, max));
        }
        self.relocate(capacity)
    }

    /// Reallocates down to `len` slots. Explicit request; the vector never
    /// shrinks on its own.
    pub fn shrink_to_fit(&mut self) -> Result<(), Error> {
        if self.capacity > self.len && mem::size_of::<T>() > 0 {
            self.relocate(self.len)?;
        }
        Ok(())
    }

    /// Grows to `new_len` copies of `value`, or shrinks by destroying the tail.
    pub fn resize(&mut self, new_len: usize, value: &T) -> Result<(), Error>
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        if new_len > self.capacity {
            self.grow_for(new_len)?;
        }
        while self.len < new_len {
            // SAFETY: capacity reserved above; len tracks every construction
            // so an unwinding clone leaves a valid prefix.
            unsafe {
                self.alloc
                    .construct(self.ptr.as_ptr().add(self.len), value.clone());
            }
            self.len += 1;
        }
        Ok(())
    }

    /// Replaces the contents with `n` copies of `value`, reusing the buffer
    /// when it is large enough.
    pub fn assign(&mut self, n: usize, value: &T) -> Result<(), Error>
    where
        T: Clone,
    {
        self.clear();
        self.resize(n, value)
    }

    /// Replaces the contents with copies of `[first, last)`.
    pub fn assign_range<'c, C>(&mut self, mut first: C, last: &C) -> Result<(), Error>
    where
        C: InputCursor<'c, Item = T>,
        T: Clone + 'c,
    {
        self.clear();
        while !first.same(last) {
            self.push(first.read().clone())?;
            first.advance();
        }
        Ok(())
    }

    /// Exchanges buffers and allocators in O(1). Never fails.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Destroys all elements, retains capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Destroys elements past `new_len`.
    pub fn truncate(&mut self, new_len: usize) {
        while self.len > new_len {
            self.len -= 1;
            // SAFETY: the slot was the last live element.
            unsafe { self.alloc.destroy(self.ptr.as_ptr().add(self.len)) };
        }
    }

    pub fn try_extend<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), Error> {
        for value in iter {
            self.push(value)?;
        }
        Ok(())
    }

    /// Deep copy with the same allocator, reporting allocation failure.
    pub fn try_clone(&self) -> Result<Self, Error>
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity_in(self.len, self.alloc.clone())?;
        for value in self.as_slice() {
            vec.push(value.clone())?;
        }
        Ok(vec)
    }

    /// Cursor at the first element.
    pub fn begin(&self) -> SliceCursor<'_, T> {
        // SAFETY: buffer start, live for the borrow.
        unsafe { SliceCursor::new(self.ptr) }
    }

    /// Cursor one past the last element.
    pub fn end(&self) -> SliceCursor<'_, T> {
        // SAFETY: one past the constructed range is a valid position.
        unsafe { SliceCursor::new(NonNull::new_unchecked(self.ptr.as_ptr().add(self.len))) }
    }

    /// Reversed cursor over the elements, last first.
    pub fn rbegin(&self) -> Rev<SliceCursor<'_, T>> {
        Rev::new(self.end())
    }

    pub fn rend(&self) -> Rev<SliceCursor<'_, T>> {
        Rev::new(self.begin())
    }

    /// Mutable begin and end cursors out of one exclusive borrow.
    pub fn cursors_mut(&mut self) -> (SliceCursorMut<'_, T>, SliceCursorMut<'_, T>) {
        // SAFETY: both ends of the exclusively borrowed buffer.
        unsafe {
            (
                SliceCursorMut::new(self.ptr),
                SliceCursorMut::new(NonNull::new_unchecked(self.ptr.as_ptr().add(self.len))),
            )
        }
    }

    /// Grows capacity to satisfy `needed` elements: doubles, but never past
    /// the allocator bound and never below the request.
    fn grow_for(&mut self, needed: usize) -> Result<(), Error> {
        let max = self.max_len();
        if needed > max {
            return Err(Error::length_exceeded(needed, max));
        }
        // With no doubling headroom left, go straight to the bound.
        let target = if self.capacity > max / 2 {
            max
        } else {
            algo::max(self.capacity * 2, needed)
        };
        self.relocate(target)
    }

    /// Moves the buffer into a fresh allocation of `new_capacity` slots.
    /// The old buffer stays intact until the relocation cannot fail anymore.
    fn relocate(&mut self, new_capacity: usize) -> Result<(), Error> {
        debug_assert!(new_capacity >= self.len);
        if mem::size_of::<T>() == 0 || new_capacity == self.capacity {
            return Ok(());
        }
        trace!(
            "relocating {} elements from {} into {} slots",
            self.len,
            self.capacity,
            new_capacity
        );
        let new_ptr = Self::allocate_buffer(&self.alloc, new_capacity)?;
        // SAFETY: both buffers are distinct and sized for `len` elements.
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
            Self::release_buffer(&self.alloc, self.ptr, self.capacity);
        }
        self.ptr = new_ptr;
        self.capacity = new_capacity;
        Ok(())
    }

    /// Shifts the tail at `index` back by `n` slots and returns a guard over
    /// the raw gap. The guard closes whatever part of the gap was not filled.
    fn open_gap(&mut self, index: usize, n: usize) -> Result<Gap<'_, T, A>, Error> {
        assert!(index <= self.len, "insert past the end");
        let new_len = self
            .len
            .checked_add(n)
            .ok_or_else(|| Error::length_exceeded(usize::MAX, self.max_len()))?;
        if new_len > self.capacity {
            self.grow_for(new_len)?;
        }
        let tail = self.len - index;
        // SAFETY: the shifted range stays within capacity.
        unsafe {
            let base = self.ptr.as_ptr();
            ptr::copy(base.add(index), base.add(index + n), tail);
        }
        // Until the gap is closed only the prefix counts as constructed.
        self.len = index;
        Ok(Gap {
            vec: self,
            start: index,
            width: n,
            filled: 0,
            tail,
        })
    }

    fn allocate_buffer(alloc: &A, n: usize) -> Result<NonNull<T>, Error> {
        if n == 0 || mem::size_of::<T>() == 0 {
            return Ok(NonNull::dangling());
        }
        let layout = Layout::array::<T>(n)
            .map_err(|_| Error::length_exceeded(n, isize::MAX as usize / mem::size_of::<T>()))?;
        if layout.size() > alloc.max_size() {
            return Err(Error::length_exceeded(
                n,
                alloc.max_size() / mem::size_of::<T>(),
            ));
        }
        Ok(alloc.allocate(layout)?.cast())
    }

    /// # Safety
    /// `ptr` must be a buffer of `n` slots obtained from `allocate_buffer`
    /// on the same allocator, with no live elements left in it.
    unsafe fn release_buffer(alloc: &A, ptr: NonNull<T>, n: usize) {
        if n == 0 || mem::size_of::<T>() == 0 {
            return;
        }
        let layout = Layout::array::<T>(n).expect("Layout of a live buffer");
        alloc.deallocate(ptr.cast(), layout);
    }
}

/// Raw gap opened inside a vector during a multi-element insert.
///
/// Dropping it moves the shifted tail back over the unfilled part of the gap
/// and restores `len`, so an unwinding clone leaves the vector valid.
struct Gap<'a, T, A: RawAlloc> {
    vec: &'a mut Vector<T, A>,
    start: usize,
    width: usize,
    filled: usize,
    tail: usize,
}

impl<T, A: RawAlloc> Gap<'_, T, A> {
    fn construct(&mut self, value: T) {
        debug_assert!(self.filled < self.width);
        // SAFETY: the slot is raw gap memory within capacity.
        unsafe {
            let slot = self.vec.ptr.as_ptr().add(self.start + self.filled);
            self.vec.alloc.construct(slot, value);
        }
        self.filled += 1;
    }
}

impl<T, A: RawAlloc> Drop for Gap<'_, T, A> {
    fn drop(&mut self) {
        // SAFETY: moves the tail from after the gap onto the first raw slot;
        // a fully filled gap makes this a no-op copy in place.
        unsafe {
            let base = self.vec.ptr.as_ptr();
            ptr::copy(
                base.add(self.start + self.width),
                base.add(self.start + self.filled),
                self.tail,
            );
        }
        self.vec.len = self.start + self.filled + self.tail;
    }
}

impl<T, A: RawAlloc> Drop for Vector<T, A> {
    fn drop(&mut self) {
        self.clear();
        // SAFETY: all elements destroyed above; buffer came from this allocator.
        unsafe { Self::release_buffer(&self.alloc, self.ptr, self.capacity) };
    }
}

// SAFETY: the vector uniquely owns its buffer; sharing follows the elements.
unsafe impl<T: Send, A: RawAlloc + Send> Send for Vector<T, A> {}
unsafe impl<T: Sync, A: RawAlloc + Sync> Sync for Vector<T, A> {}

impl<T, A: RawAlloc + Default> Default for Vector<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: Clone, A: RawAlloc> Clone for Vector<T, A> {
    fn clone(&self) -> Self {
        self.try_clone().expect("Allocation failed while cloning")
    }
}

impl<T, A: RawAlloc> Deref for Vector<T, A> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: RawAlloc> DerefMut for Vector<T, A> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, A: RawAlloc> Index<usize> for Vector<T, A> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("Index {} out of range for length {}", index, self.len),
        }
    }
}

impl<T, A: RawAlloc> IndexMut<usize> for Vector<T, A> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("Index {} out of range for length {}", index, len),
        }
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a Vector<T, A> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a mut Vector<T, A> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: PartialEq, A: RawAlloc, B: RawAlloc> PartialEq<Vector<T, B>> for Vector<T, A> {
    fn eq(&self, other: &Vector<T, B>) -> bool {
        self.len == other.len() && algo::equal(self.begin(), &self.end(), other.begin())
    }
}

impl<T: Eq, A: RawAlloc> Eq for Vector<T, A> {}

impl<T: PartialOrd, A: RawAlloc, B: RawAlloc> PartialOrd<Vector<T, B>> for Vector<T, A> {
    fn partial_cmp(&self, other: &Vector<T, B>) -> Option<Ordering> {
        if algo::lexicographical_compare(self.begin(), &self.end(), other.begin(), &other.end()) {
            Some(Ordering::Less)
        } else if algo::lexicographical_compare(
            other.begin(),
            &other.end(),
            self.begin(),
            &self.end(),
        ) {
            Some(Ordering::Greater)
        } else if self.len == other.len()
            && algo::equal_by(self.begin(), &self.end(), other.begin(), |a, b| a == b)
        {
            Some(Ordering::Equal)
        } else {
            // Incomparable elements in a common prefix.
            None
        }
    }
}

impl<T: Ord, A: RawAlloc> Ord for Vector<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for Vector<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    fn filled(values: &[i32]) -> Vector<i32> {
        let mut vec = Vector::new();
        vec.try_extend(values.iter().copied()).unwrap();
        vec
    }

    /// Counts how many clones of the family are dropped.
    #[derive(Clone)]
    struct Tracked(Rc<Cell<usize>>);

    impl Tracked {
        fn new() -> (Self, Rc<Cell<usize>>) {
            let drops = Rc::new(Cell::new(0));
            (Tracked(drops.clone()), drops)
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    /// Clone panics once the shared fuse reaches zero.
    struct Fused {
        fuse: Rc<Cell<usize>>,
        tracked: Tracked,
    }

    impl Clone for Fused {
        fn clone(&self) -> Self {
            if self.fuse.get() == 0 {
                panic!("fuse burned");
            }
            self.fuse.set(self.fuse.get() - 1);
            Fused {
                fuse: self.fuse.clone(),
                tracked: self.tracked.clone(),
            }
        }
    }

    #[test]
    fn push_and_back() {
        let mut vec = Vector::new();
        for i in 0..100 {
            let before = vec.len();
            vec.push(i).unwrap();
            assert_eq!(vec.len(), before + 1);
            assert_eq!(vec.back(), Some(&i));
        }
        assert_eq!(vec.front(), Some(&0));
    }

    #[test]
    fn growth_doubles_up_from_request() {
        let mut vec = Vector::new();
        let mut caps = Vec::new();
        for i in 0..5 {
            vec.push(i).unwrap();
            caps.push(vec.capacity());
        }
        assert_eq!(caps, [1, 2, 4, 4, 8]);
    }

    #[test]
    fn growth_relocates_intact() {
        let mut vec = Vector::with_capacity(4).unwrap();
        vec.try_extend([10, 20, 30, 40]).unwrap();
        assert_eq!(vec.capacity(), 4);

        vec.push(50).unwrap();
        assert!(vec.capacity() >= 5);
        assert_eq!(vec.as_slice(), [10, 20, 30, 40, 50]);
    }

    #[test]
    fn reserve_is_exact_and_keeps_size() {
        let mut vec = filled(&[1, 2, 3]);
        vec.reserve(100).unwrap();
        assert_eq!(vec.capacity(), 100);
        assert_eq!(vec.len(), 3);

        // Smaller requests are no-ops.
        vec.reserve(10).unwrap();
        assert_eq!(vec.capacity(), 100);
    }

    #[test]
    fn reserve_past_the_bound_fails_unchanged() {
        let mut vec = filled(&[1, 2, 3]);
        let err = vec.reserve(usize::MAX).unwrap_err();
        assert!(matches!(err, Error::LengthExceeded { .. }));
        assert_eq!(vec.as_slice(), [1, 2, 3]);
        assert_eq!(vec.capacity(), 4);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut vec: Vector<u8> = Vector::new();
        vec.clear();
        assert_eq!(vec.len(), 0);

        vec.push(1).unwrap();
        let cap = vec.capacity();
        vec.clear();
        vec.clear();
        assert_eq!(vec.len(), 0);
        assert_eq!(vec.capacity(), cap);
    }

    #[test]
    fn round_trip_through_cursors() {
        let a = filled(&[1, 2, 3, 4]);
        let b = Vector::from_range(a.begin(), &a.end()).unwrap();
        assert_eq!(b.len(), a.len());
        assert!(algo::equal(a.begin(), &a.end(), b.begin()));
        assert_eq!(a, b);
    }

    #[test]
    fn lexicographic_ordering_law() {
        assert!(filled(&[1, 2, 3]) < filled(&[1, 3, 0]));
        assert!(filled(&[1, 2]) < filled(&[1, 2, 0]));
        assert!(filled(&[2]) > filled(&[1, 9, 9]));
        assert_eq!(filled(&[1, 2]), filled(&[1, 2]));
    }

    #[test]
    fn insert_variants() {
        let mut vec = filled(&[1, 5]);
        vec.insert(1, 3).unwrap();
        assert_eq!(vec.as_slice(), [1, 3, 5]);

        vec.insert_n(1, 2, &2).unwrap();
        assert_eq!(vec.as_slice(), [1, 2, 2, 3, 5]);

        let extra = filled(&[8, 9]);
        vec.insert_range(5, extra.begin(), &extra.end()).unwrap();
        assert_eq!(vec.as_slice(), [1, 2, 2, 3, 5, 8, 9]);

        vec.insert(0, 0).unwrap();
        assert_eq!(vec.as_slice(), [0, 1, 2, 2, 3, 5, 8, 9]);
    }

    #[test]
    fn erase_range_shifts_forward() {
        let mut vec = filled(&[1, 2, 3, 4, 5]);
        assert_eq!(vec.erase(1..3), 2);
        assert_eq!(vec.as_slice(), [1, 4, 5]);
        assert_eq!(vec.len(), 3);

        assert_eq!(vec.erase(1..1), 0);
        assert_eq!(vec.as_slice(), [1, 4, 5]);
    }

    #[test]
    fn erase_panicking_drop_keeps_prefix_only() {
        struct Grenade {
            armed: bool,
            drops: Rc<Cell<usize>>,
        }

        impl Drop for Grenade {
            fn drop(&mut self) {
                self.drops.set(self.drops.get() + 1);
                if self.armed && !std::thread::panicking() {
                    panic!("armed");
                }
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut vec = Vector::new();
        for armed in [false, true, false, false, false] {
            vec.push(Grenade {
                armed,
                drops: drops.clone(),
            })
            .unwrap();
        }

        let result = catch_unwind(AssertUnwindSafe(|| {
            vec.erase(1..3);
        }));
        assert!(result.is_err());
        // Only the prefix before the erased range is still claimed.
        assert_eq!(vec.len(), 1);
        drop(vec);
        // The armed slot plus the surviving prefix dropped exactly once; the
        // rest of the range and the tail leak rather than double-drop.
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn mutable_cursors_feed_algorithms() {
        let mut vec = filled(&[1, 2, 3, 4, 5]);
        let (first, last) = vec.cursors_mut();
        algo::fill(first, &last, &9);
        assert_eq!(vec.as_slice(), [9, 9, 9, 9, 9]);

        let src = filled(&[7, 8]);
        let (out, _) = vec.cursors_mut();
        algo::copy(src.begin(), &src.end(), out);
        assert_eq!(vec.as_slice(), [7, 8, 9, 9, 9]);
    }

    #[test]
    fn remove_returns_element() {
        let mut vec = filled(&[1, 2, 3]);
        assert_eq!(vec.remove(1), 2);
        assert_eq!(vec.as_slice(), [1, 3]);
    }

    #[test]
    fn pop_in_reverse() {
        let mut vec = filled(&[1, 2]);
        assert_eq!(vec.pop(), Some(2));
        assert_eq!(vec.pop(), Some(1));
        assert_eq!(vec.pop(), None);
    }

    #[test]
    fn resize_and_assign_reuse_capacity() {
        let mut vec = filled(&[1, 2, 3]);
        vec.resize(5, &9).unwrap();
        assert_eq!(vec.as_slice(), [1, 2, 3, 9, 9]);
        vec.resize(2, &0).unwrap();
        assert_eq!(vec.as_slice(), [1, 2]);

        let cap = vec.capacity();
        vec.assign(cap, &7).unwrap();
        assert_eq!(vec.len(), cap);
        assert_eq!(vec.capacity(), cap);

        let other = filled(&[4, 5]);
        vec.assign_range(other.begin(), &other.end()).unwrap();
        assert_eq!(vec.as_slice(), [4, 5]);
        assert_eq!(vec.capacity(), cap);
    }

    #[test]
    fn swap_exchanges_buffers() {
        let mut a = filled(&[1, 2, 3]);
        let mut b = filled(&[9]);
        let (cap_a, cap_b) = (a.capacity(), b.capacity());
        a.swap(&mut b);
        assert_eq!(a.as_slice(), [9]);
        assert_eq!(b.as_slice(), [1, 2, 3]);
        assert_eq!((a.capacity(), b.capacity()), (cap_b, cap_a));
    }

    #[test]
    fn checked_access() {
        let mut vec = filled(&[0; 10]);
        assert!(vec.at(9).is_ok());
        let err = vec.at(100).unwrap_err();
        assert_eq!(err, Error::out_of_range(100, 10));
        assert!(vec.at_mut(10).is_err());
        assert_eq!(vec.get(100), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn index_panics_past_the_end() {
        let vec = filled(&[1]);
        let _ = vec[1];
    }

    #[test]
    fn reversed_cursors() {
        let vec = filled(&[1, 2, 3]);
        let mut rev = vec.rbegin();
        let mut seen = Vec::new();
        while !rev.same(&vec.rend()) {
            seen.push(*rev.read());
            rev.advance();
        }
        assert_eq!(seen, [3, 2, 1]);
    }

    #[test]
    fn slice_view_and_iteration() {
        let mut vec = filled(&[3, 1, 2]);
        vec.as_mut_slice().sort();
        assert_eq!(vec.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(vec[1], 2);
    }

    #[test]
    fn drop_destroys_every_element() {
        let (value, drops) = Tracked::new();
        let mut vec = Vector::from_elem(10, value).unwrap();
        // The seed itself was consumed by from_elem.
        assert_eq!(drops.get(), 1);
        vec.truncate(7);
        assert_eq!(drops.get(), 4);
        vec.erase(0..2);
        assert_eq!(drops.get(), 6);
        drop(vec);
        assert_eq!(drops.get(), 11);
    }

    #[test]
    fn failed_construction_destroys_prefix() {
        let (tracked, drops) = Tracked::new();
        let fuse = Rc::new(Cell::new(3));
        let value = Fused {
            fuse: fuse.clone(),
            tracked,
        };

        let result = catch_unwind(AssertUnwindSafe(|| Vector::from_elem(10, value)));
        assert!(result.is_err());
        // 3 clones built then destroyed, plus the seed value itself.
        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn interrupted_gap_insert_leaves_valid_state() {
        let (tracked, drops) = Tracked::new();
        let fuse = Rc::new(Cell::new(7));
        let value = Fused {
            fuse: fuse.clone(),
            tracked,
        };
        let mut vec = Vector::from_elem(5, value).unwrap();
        assert_eq!(fuse.get(), 2);

        let seed = vec.pop().unwrap();
        let result = catch_unwind(AssertUnwindSafe(|| vec.insert_n(1, 10, &seed)));
        assert!(result.is_err());

        // Two clones made it into the gap before the fuse burned.
        assert_eq!(vec.len(), 6);
        drop(seed);
        drop(vec);
        // Everything constructed was destroyed exactly once.
        assert_eq!(drops.get(), 8);
    }

    #[test]
    fn zero_sized_elements() {
        let mut vec = Vector::new();
        for _ in 0..1000 {
            vec.push(()).unwrap();
        }
        assert_eq!(vec.len(), 1000);
        assert_eq!(vec.capacity(), usize::MAX);
        assert_eq!(vec.pop(), Some(()));
        assert_eq!(vec.len(), 999);
    }

    #[test]
    fn equality_over_cursors() {
        let a = filled(&[1, 2, 3]);
        let mut b = a.clone();
        assert_eq!(a, b);
        b.push(4).unwrap();
        assert_ne!(a, b);
    }
}

use super::{BidiCursor, InputCursor, OutputCursor, RandomAccess, RandomCursor};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Shared cursor over contiguous storage.
///
/// Wraps exactly one element pointer. The lifetime brands it with the borrow
/// of the owning container, so it cannot outlive the container or survive a
/// mutation. Raw pointers report random-access capability.
pub struct SliceCursor<'a, T> {
    ptr: NonNull<T>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> SliceCursor<'a, T> {
    /// # Safety
    /// `ptr` must point into (or one past) a live contiguous allocation
    /// borrowed for `'a`.
    pub(crate) unsafe fn new(ptr: NonNull<T>) -> Self {
        SliceCursor {
            ptr,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Clone for SliceCursor<'a, T> {
    fn clone(&self) -> Self {
        SliceCursor {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Copy for SliceCursor<'a, T> {}

impl<'a, T> PartialEq for SliceCursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<'a, T> Eq for SliceCursor<'a, T> {}

impl<'a, T> InputCursor<'a> for SliceCursor<'a, T> {
    type Item = T;
    type Category = RandomAccess;

    fn read(&self) -> &'a T {
        // SAFETY: positions handed out by a container stay within its
        // constructed range; keeping reads inside it is the caller contract.
        unsafe { self.ptr.as_ref() }
    }

    fn advance(&mut self) {
        // SAFETY: one past the constructed range is still a valid position.
        self.ptr = unsafe { NonNull::new_unchecked(self.ptr.as_ptr().add(1)) };
    }

    fn same(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<'a, T> BidiCursor<'a> for SliceCursor<'a, T> {
    fn retreat(&mut self) {
        // SAFETY: caller keeps positions within [begin, end].
        self.ptr = unsafe { NonNull::new_unchecked(self.ptr.as_ptr().sub(1)) };
    }
}

impl<'a, T> RandomCursor<'a> for SliceCursor<'a, T> {
    fn offset(&self, n: isize) -> Self {
        // SAFETY: caller keeps positions within [begin, end].
        let ptr = unsafe { NonNull::new_unchecked(self.ptr.as_ptr().offset(n)) };
        SliceCursor {
            ptr,
            _marker: PhantomData,
        }
    }

    fn distance_to(&self, other: &Self) -> isize {
        debug_assert!(std::mem::size_of::<T>() > 0);
        // SAFETY: both positions come from the same allocation.
        unsafe { other.ptr.as_ptr().offset_from(self.ptr.as_ptr()) }
    }
}

/// Mutable cursor over contiguous storage.
///
/// Same position semantics as [`SliceCursor`], writable in addition. Clones
/// are plain position markers; writes go through the raw pointer, so holding
/// several clones is fine as long as produced references do not overlap a
/// write. Converts to the shared cursor, never the reverse.
pub struct SliceCursorMut<'a, T> {
    ptr: NonNull<T>,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> SliceCursorMut<'a, T> {
    /// # Safety
    /// `ptr` must point into (or one past) a live contiguous allocation
    /// borrowed exclusively for `'a`.
    pub(crate) unsafe fn new(ptr: NonNull<T>) -> Self {
        SliceCursorMut {
            ptr,
            _marker: PhantomData,
        }
    }

    /// Demotes to the shared cursor at the same position.
    pub fn as_shared(&self) -> SliceCursor<'a, T> {
        SliceCursor {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Clone for SliceCursorMut<'a, T> {
    fn clone(&self) -> Self {
        SliceCursorMut {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> PartialEq for SliceCursorMut<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<'a, T> Eq for SliceCursorMut<'a, T> {}

impl<'a, T> InputCursor<'a> for SliceCursorMut<'a, T> {
    type Item = T;
    type Category = RandomAccess;

    fn read(&self) -> &'a T {
        // SAFETY: as for SliceCursor; the produced reference must not
        // overlap a later write through a clone.
        unsafe { self.ptr.as_ref() }
    }

    fn advance(&mut self) {
        // SAFETY: one past the constructed range is still a valid position.
        self.ptr = unsafe { NonNull::new_unchecked(self.ptr.as_ptr().add(1)) };
    }

    fn same(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<'a, T> OutputCursor for SliceCursorMut<'a, T> {
    type Item = T;

    fn write(&mut self, value: T) {
        // SAFETY: the position holds a live element; plain assignment drops it.
        unsafe { *self.ptr.as_ptr() = value };
    }

    fn advance(&mut self) {
        InputCursor::advance(self);
    }
}

impl<'a, T> BidiCursor<'a> for SliceCursorMut<'a, T> {
    fn retreat(&mut self) {
        // SAFETY: caller keeps positions within [begin, end].
        self.ptr = unsafe { NonNull::new_unchecked(self.ptr.as_ptr().sub(1)) };
    }
}

impl<'a, T> RandomCursor<'a> for SliceCursorMut<'a, T> {
    fn offset(&self, n: isize) -> Self {
        // SAFETY: caller keeps positions within [begin, end].
        let ptr = unsafe { NonNull::new_unchecked(self.ptr.as_ptr().offset(n)) };
        SliceCursorMut {
            ptr,
            _marker: PhantomData,
        }
    }

    fn distance_to(&self, other: &Self) -> isize {
        debug_assert!(std::mem::size_of::<T>() > 0);
        // SAFETY: both positions come from the same allocation.
        unsafe { other.ptr.as_ptr().offset_from(self.ptr.as_ptr()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::distance;

    fn cursors_of(slice: &[i32]) -> (SliceCursor<'_, i32>, SliceCursor<'_, i32>) {
        let range = slice.as_ptr_range();
        // SAFETY: both ends of a live slice.
        unsafe {
            (
                SliceCursor::new(NonNull::new(range.start as *mut i32).unwrap()),
                SliceCursor::new(NonNull::new(range.end as *mut i32).unwrap()),
            )
        }
    }

    #[test]
    fn walk_and_jump() {
        let data = [1, 2, 3, 4, 5];
        let (begin, end) = cursors_of(&data);

        let mut walk = begin;
        assert_eq!(*walk.read(), 1);
        walk.advance();
        assert_eq!(*walk.read(), 2);
        walk.retreat();
        assert!(walk.same(&begin));

        assert_eq!(*begin.offset(4).read(), 5);
        assert_eq!(begin.distance_to(&end), 5);
        assert_eq!(end.distance_to(&begin), -5);
        assert!(begin.precedes(&end));
        assert!(!end.precedes(&begin));
        assert_eq!(distance(&begin, &end), 5);
    }

    #[test]
    fn mutable_writes() {
        let mut data = [10, 20, 30];
        let begin = {
            let ptr = NonNull::new(data.as_mut_ptr()).unwrap();
            // SAFETY: exclusive borrow of the array.
            unsafe { SliceCursorMut::new(ptr) }
        };

        let mut walk = begin.clone();
        walk.write(11);
        OutputCursor::advance(&mut walk);
        walk.write(21);
        assert_eq!(data, [11, 21, 30]);
    }
}

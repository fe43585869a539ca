use super::Error;
use std::alloc::Layout;
use std::ptr::{self, NonNull};

/// Raw storage strategy consumed by containers.
///
/// Containers hold a strategy by value and route every acquisition and
/// release of backing memory through it. Element lifetime is also managed
/// here so that a strategy can customize placement if it needs to.
pub trait RawAlloc: Clone {
    /// Acquires storage for the given layout.
    /// Failure is reported, never panics. Zero-size layouts are not valid requests.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, Error>;

    /// Releases storage previously obtained from `allocate`.
    ///
    /// # Safety
    /// `ptr` must come from `allocate` on this same strategy with this same layout.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Upper bound in bytes on a single allocation.
    fn max_size(&self) -> usize {
        isize::MAX as usize
    }

    /// Places a value into a raw slot.
    ///
    /// # Safety
    /// `slot` must be valid for writes of `T` and hold no live value.
    unsafe fn construct<T>(&self, slot: *mut T, value: T) {
        ptr::write(slot, value);
    }

    /// Ends the lifetime of the value in a slot, leaving the slot raw.
    ///
    /// # Safety
    /// `slot` must hold a live value of `T` not referenced by anyone.
    unsafe fn destroy<T>(&self, slot: *mut T) {
        ptr::drop_in_place(slot);
    }
}

/// Default strategy delegating to the process heap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Global;

impl RawAlloc for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, Error> {
        debug_assert!(layout.size() > 0);
        // SAFETY: layout is non zero sized.
        let ptr = unsafe { std::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or_else(|| Error::alloc_failed(layout))
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        std::alloc::dealloc(ptr.as_ptr(), layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_round_trip() {
        let alloc = Global;
        let layout = Layout::array::<u64>(16).unwrap();
        let ptr = alloc.allocate(layout).unwrap();

        let slots = ptr.cast::<u64>().as_ptr();
        for i in 0..16 {
            // SAFETY: 16 slots were just allocated.
            unsafe { alloc.construct(slots.add(i), i as u64 * 3) };
        }
        for i in 0..16 {
            unsafe {
                assert_eq!(*slots.add(i), i as u64 * 3);
                alloc.destroy(slots.add(i));
            }
        }

        unsafe { alloc.deallocate(ptr, layout) };
    }

    #[test]
    fn max_size_is_addressable() {
        assert_eq!(Global.max_size(), isize::MAX as usize);
    }
}

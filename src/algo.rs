//! Generic algorithms written once against the cursor abstraction and
//! reused by every container.

use crate::cursor::{BidiCursor, ForwardCursor, InputCursor, OutputCursor};

/// Lock-step equality over `last1 - first1` positions.
///
/// The second range is assumed to be at least as long; there is no second
/// end to check against.
pub fn equal<'a, 'b, A, B>(first1: A, last1: &A, first2: B) -> bool
where
    A: InputCursor<'a>,
    B: InputCursor<'b, Item = A::Item>,
    A::Item: PartialEq,
{
    equal_by(first1, last1, first2, |a, b| a == b)
}

/// As [`equal`], with the match decided by `pred`.
pub fn equal_by<'a, 'b, A, B, F>(mut first1: A, last1: &A, mut first2: B, mut pred: F) -> bool
where
    A: InputCursor<'a>,
    B: InputCursor<'b>,
    F: FnMut(&A::Item, &B::Item) -> bool,
{
    while !first1.same(last1) {
        if !pred(first1.read(), first2.read()) {
            return false;
        }
        first1.advance();
        first2.advance();
    }
    true
}

/// True if range one is lexicographically less than range two.
///
/// The first mismatching position decides; a full common prefix falls back
/// to length, the shorter range being less.
pub fn lexicographical_compare<'a, 'b, A, B>(first1: A, last1: &A, first2: B, last2: &B) -> bool
where
    A: InputCursor<'a>,
    B: InputCursor<'b, Item = A::Item>,
    A::Item: PartialOrd + 'b,
{
    lexicographical_compare_by(first1, last1, first2, last2, |a, b| a < b)
}

/// As [`lexicographical_compare`], with `less` deciding element order.
pub fn lexicographical_compare_by<'a, 'b, A, B, F>(
    mut first1: A,
    last1: &A,
    mut first2: B,
    last2: &B,
    mut less: F,
) -> bool
where
    A: InputCursor<'a>,
    B: InputCursor<'b, Item = A::Item>,
    A::Item: 'b,
    F: FnMut(&A::Item, &A::Item) -> bool,
{
    while !first1.same(last1) && !first2.same(last2) {
        if less(first1.read(), first2.read()) {
            return true;
        }
        // Negating `less` is not enough, that would fire on equal elements.
        if less(first2.read(), first1.read()) {
            return false;
        }
        first1.advance();
        first2.advance();
    }
    first1.same(last1) && !first2.same(last2)
}

/// Element-wise assignment of `[first, last)` through `out`, in order.
/// Returns the output position one past the last write.
pub fn copy<'a, I, O>(mut first: I, last: &I, mut out: O) -> O
where
    I: InputCursor<'a>,
    I::Item: Clone,
    O: OutputCursor<Item = I::Item>,
{
    while !first.same(last) {
        out.write(first.read().clone());
        out.advance();
        first.advance();
    }
    out
}

/// Element-wise assignment in reverse order, writing backward from
/// `out_last`. Required when the ranges overlap with the destination after
/// the source. Returns the output position of the first write.
pub fn copy_backward<'a, 'b, I, O>(first: &I, mut last: I, mut out_last: O) -> O
where
    I: BidiCursor<'a>,
    I::Item: Clone,
    O: BidiCursor<'b, Item = I::Item> + OutputCursor<Item = I::Item>,
{
    while !last.same(first) {
        last.retreat();
        out_last.retreat();
        out_last.write(last.read().clone());
    }
    out_last
}

/// Assigns `value` to every position in `[first, last)`.
pub fn fill<'s, O, T>(mut first: O, last: &O, value: &T)
where
    T: Clone + 's,
    O: ForwardCursor<'s, Item = T> + OutputCursor<Item = T>,
{
    while !first.same(last) {
        first.write(value.clone());
        InputCursor::advance(&mut first);
    }
}

/// Assigns `value` to the first `n` positions from `out`.
/// Returns the output position one past the last write.
pub fn fill_n<O>(mut out: O, n: usize, value: &O::Item) -> O
where
    O: OutputCursor,
    O::Item: Clone,
{
    for _ in 0..n {
        out.write(value.clone());
        out.advance();
    }
    out
}

/// The lesser of two values, the first on ties.
pub fn min<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

/// The greater of two values, the first on ties.
pub fn max<T: PartialOrd>(a: T, b: T) -> T {
    if a < b {
        b
    } else {
        a
    }
}

/// Exchanges two values in place.
pub fn swap<T>(a: &mut T, b: &mut T) {
    std::mem::swap(a, b);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{RandomCursor, SliceCursor};
    use std::ptr::NonNull;

    fn cursors_of<T>(slice: &[T]) -> (SliceCursor<'_, T>, SliceCursor<'_, T>) {
        let range = slice.as_ptr_range();
        // SAFETY: both ends of a live slice.
        unsafe {
            (
                SliceCursor::new(NonNull::new(range.start as *mut T).unwrap()),
                SliceCursor::new(NonNull::new(range.end as *mut T).unwrap()),
            )
        }
    }

    #[test]
    fn equal_stops_at_first_mismatch() {
        let a = [1, 2, 3];
        let b = [1, 2, 4, 9];
        let (fa, la) = cursors_of(&a);
        let (fb, _) = cursors_of(&b);
        assert!(!equal(fa, &la, fb));

        let c = [1, 2, 3, 7];
        let (fc, _) = cursors_of(&c);
        // Only the first range's length matters.
        assert!(equal(fa, &la, fc));
    }

    #[test]
    fn equal_by_predicate() {
        let a = [1, 2, 3];
        let b = [2, 4, 6];
        let (fa, la) = cursors_of(&a);
        let (fb, _) = cursors_of(&b);
        assert!(equal_by(fa, &la, fb, |x, y| x * 2 == *y));
    }

    #[test]
    fn mismatch_dominates_length() {
        let short = [1, 9];
        let long = [1, 2, 3, 4];
        let (fs, ls) = cursors_of(&short);
        let (fl, ll) = cursors_of(&long);
        // Position 1 decides, even though `short` is shorter.
        assert!(!lexicographical_compare(fs, &ls, fl, &ll));
        assert!(lexicographical_compare(fl, &ll, fs, &ls));
    }

    #[test]
    fn prefix_falls_back_to_length() {
        let short = [1, 2];
        let long = [1, 2, 3];
        let (fs, ls) = cursors_of(&short);
        let (fl, ll) = cursors_of(&long);
        assert!(lexicographical_compare(fs, &ls, fl, &ll));
        assert!(!lexicographical_compare(fl, &ll, fs, &ls));
        // A range is never less than itself.
        assert!(!lexicographical_compare(fs, &ls, fs, &ls));
    }

    #[test]
    fn copy_and_fill() {
        use crate::cursor::SliceCursorMut;

        let src = [1, 2, 3];
        let mut dst = [0; 5];
        let (fs, ls) = cursors_of(&src);
        // SAFETY: exclusive borrow of `dst`.
        let out = unsafe { SliceCursorMut::new(NonNull::new(dst.as_mut_ptr()).unwrap()) };

        let end = copy(fs, &ls, out.clone());
        assert_eq!(out.distance_to(&end), 3);
        fill(end.clone(), &out.offset(5), &9);
        assert_eq!(dst, [1, 2, 3, 9, 9]);

        fill_n(out, 2, &7);
        assert_eq!(dst, [7, 7, 3, 9, 9]);
    }

    #[test]
    fn copy_backward_overlapping_shift() {
        use crate::cursor::SliceCursorMut;

        let mut data = [1, 2, 3, 4, 0, 0];
        let begin =
            // SAFETY: exclusive borrow of `data`.
            unsafe { SliceCursorMut::new(NonNull::new(data.as_mut_ptr()).unwrap()) };

        // Shift [1,2,3,4] two slots to the right in place.
        let first = begin.clone();
        let last = begin.offset(4);
        let out_last = begin.offset(6);
        let out_first = copy_backward(&first, last, out_last);
        assert_eq!(begin.distance_to(&out_first), 2);
        assert_eq!(&data[2..], [1, 2, 3, 4]);
    }

    #[test]
    fn min_max_ties_prefer_first() {
        assert_eq!(min(1, 2), 1);
        assert_eq!(max(1, 2), 2);
        assert_eq!(min(2.0, 2.0), 2.0);
        assert_eq!(max(5, 5), 5);
    }

    #[test]
    fn swap_exchanges() {
        let mut a = 1;
        let mut b = 2;
        swap(&mut a, &mut b);
        assert_eq!((a, b), (2, 1));
    }
}

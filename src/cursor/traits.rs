//! Capability levels for positions into a sequence.
//!
//! A cursor is a pure position marker: it never owns what it points to and
//! must not outlive the container it indexes into. Capabilities form a
//! ladder (input ⊂ forward ⊂ bidirectional ⊂ random-access) with output
//! orthogonal to it. An algorithm states the weakest level it needs as a
//! generic bound; a container hands out the strongest level its storage
//! supports.
//!
//! The lifetime parameter `'s` is the borrow of the underlying sequence.
//! Reads resolve to that lifetime, not to the cursor's own, so a cursor can
//! be advanced or dropped while the references it produced stay alive.

/// Single-pass readable position. Category tag [`Input`].
pub struct Input;
/// Write-only position. Category tag [`Output`].
pub struct Output;
/// Multi-pass readable position. Category tag [`Forward`].
pub struct Forward;
/// Position that can also step backward. Category tag [`Bidirectional`].
pub struct Bidirectional;
/// Position with constant-time jumps and ordering. Category tag [`RandomAccess`].
pub struct RandomAccess;

/// Readable single-pass position.
///
/// Associated types are the trait lookup for a cursor: the element type, and
/// the capability tag it reports. Distances are always `isize`.
pub trait InputCursor<'s>: Sized {
    type Item: 's + ?Sized;
    type Category;

    /// Reads the element at the current position.
    ///
    /// Reading a past-the-end or invalidated position is a caller error:
    /// node cursors panic, raw cursors are undefined.
    fn read(&self) -> &'s Self::Item;

    /// Steps to the next position. Stepping past the end is a caller error.
    fn advance(&mut self);

    /// Same position within the same sequence.
    /// Comparing cursors of different containers is a caller error.
    fn same(&self, other: &Self) -> bool;
}

/// Writable position.
///
/// Orthogonal to the readable ladder; a mutable container cursor implements
/// both sides.
pub trait OutputCursor {
    type Item;

    /// Replaces the element at the current position. Does not move.
    fn write(&mut self, value: Self::Item);

    /// Steps to the next position.
    fn advance(&mut self);
}

/// Multi-pass position: can be saved and re-walked.
pub trait ForwardCursor<'s>: InputCursor<'s> + Clone {}

impl<'s, C: InputCursor<'s> + Clone> ForwardCursor<'s> for C {}

/// Position that can also step backward.
pub trait BidiCursor<'s>: ForwardCursor<'s> {
    /// Steps to the previous position. Stepping before the first is a caller error.
    fn retreat(&mut self);
}

/// Position supporting constant-time jumps and positional ordering.
pub trait RandomCursor<'s>: BidiCursor<'s> {
    /// The position `n` steps away, negative for backward.
    fn offset(&self, n: isize) -> Self;

    /// Number of advances from `self` to `other`. Negative if `other` is behind.
    fn distance_to(&self, other: &Self) -> isize;

    /// Positional ordering within one sequence.
    fn precedes(&self, other: &Self) -> bool {
        self.distance_to(other) > 0
    }
}

/// Steps a cursor forward `n` times.
pub fn advance_by<'s, C: InputCursor<'s>>(cursor: &mut C, n: usize) {
    for _ in 0..n {
        cursor.advance();
    }
}

/// Number of advances from `first` to `last` by walking.
///
/// Random-access cursors answer this in O(1) through
/// [`RandomCursor::distance_to`] instead.
pub fn distance<'s, C: ForwardCursor<'s>>(first: &C, last: &C) -> usize {
    let mut walk = first.clone();
    let mut n = 0;
    while !walk.same(last) {
        walk.advance();
        n += 1;
    }
    n
}

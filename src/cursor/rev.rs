use super::{BidiCursor, InputCursor, RandomCursor};

/// Reverse adaptor: inverts the direction of a bidirectional-or-better cursor.
///
/// Represents the logical position one before its base, so the reverse of
/// `end` reads the last element and the reverse of `begin` is the reversed
/// end. Ordering delegates to the base with operands swapped. All adapted
/// arithmetic returns by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rev<C> {
    base: C,
}

impl<C> Rev<C> {
    pub fn new(base: C) -> Self {
        Rev { base }
    }

    /// The underlying cursor, one past the logical position.
    pub fn base(&self) -> &C {
        &self.base
    }

    pub fn into_base(self) -> C {
        self.base
    }
}

impl<'s, C: BidiCursor<'s>> InputCursor<'s> for Rev<C> {
    type Item = C::Item;
    type Category = C::Category;

    fn read(&self) -> &'s C::Item {
        let mut before = self.base.clone();
        before.retreat();
        before.read()
    }

    fn advance(&mut self) {
        self.base.retreat();
    }

    fn same(&self, other: &Self) -> bool {
        self.base.same(&other.base)
    }
}

impl<'s, C: BidiCursor<'s>> BidiCursor<'s> for Rev<C> {
    fn retreat(&mut self) {
        self.base.advance();
    }
}

impl<'s, C: RandomCursor<'s>> RandomCursor<'s> for Rev<C> {
    fn offset(&self, n: isize) -> Self {
        Rev {
            base: self.base.offset(-n),
        }
    }

    fn distance_to(&self, other: &Self) -> isize {
        other.base.distance_to(&self.base)
    }
}

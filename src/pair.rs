//! Two-field value holder with structural, first-then-second ordering.

/// Ordered pair. Equality and ordering are field-wise and lexicographic:
/// `first` is compared first, `second` breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pair<A, B> {
    pub first: A,
    pub second: B,
}

/// Shorthand constructor.
pub fn pair<A, B>(first: A, second: B) -> Pair<A, B> {
    Pair { first, second }
}

impl<A, B> Pair<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Pair { first, second }
    }

    pub fn into_tuple(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> From<(A, B)> for Pair<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Pair { first, second }
    }
}

impl<A, B> From<Pair<A, B>> for (A, B) {
    fn from(pair: Pair<A, B>) -> Self {
        (pair.first, pair.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_lexicographic() {
        assert!(pair(1, 9) < pair(2, 0));
        assert!(pair(1, 1) < pair(1, 2));
        assert_eq!(pair(3, "x"), pair(3, "x"));
        assert!(pair(3, "a") < pair(3, "b"));
    }

    #[test]
    fn tuple_conversions() {
        let p: Pair<_, _> = (1, "one").into();
        assert_eq!(p.first, 1);
        assert_eq!(p.second, "one");
        assert_eq!(p.into_tuple(), (1, "one"));
    }
}

use std::cmp::Ordering;
use std::marker::PhantomData;

/// Ordering strategy over keys.
///
/// Must be a strict weak order: irreflexive, transitive, and with transitive
/// incomparability. Containers hold the strategy by value and never assume
/// more than these axioms.
pub trait Comparator<T: ?Sized> {
    fn cmp(&self, a: &T, b: &T) -> Ordering;

    fn lt(&self, a: &T, b: &T) -> bool {
        self.cmp(a, b) == Ordering::Less
    }
}

/// Natural order of `T: Ord`.
pub struct Natural<T: ?Sized>(PhantomData<fn(&T)>);

impl<T: ?Sized> Natural<T> {
    pub fn new() -> Self {
        Natural(PhantomData)
    }
}

pub fn natural<T: ?Sized>() -> Natural<T> {
    Natural::new()
}

impl<T: Ord + ?Sized> Comparator<T> for Natural<T> {
    fn cmp(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized> Clone for Natural<T> {
    fn clone(&self) -> Self {
        Natural(PhantomData)
    }
}

impl<T: ?Sized> Copy for Natural<T> {}

impl<T: ?Sized> Default for Natural<T> {
    fn default() -> Self {
        Natural(PhantomData)
    }
}

impl<T: ?Sized> std::fmt::Debug for Natural<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Natural")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ByLen;

    impl Comparator<&str> for ByLen {
        fn cmp(&self, a: &&str, b: &&str) -> Ordering {
            a.len().cmp(&b.len())
        }
    }

    #[test]
    fn natural_follows_ord() {
        let cmp = natural::<u32>();
        assert_eq!(cmp.cmp(&1, &2), Ordering::Less);
        assert_eq!(cmp.cmp(&2, &2), Ordering::Equal);
        assert!(cmp.lt(&1, &2));
        assert!(!cmp.lt(&2, &2));
    }

    #[test]
    fn custom_strategy() {
        let cmp = ByLen;
        assert!(cmp.lt(&"ab", &"abcd"));
        assert_eq!(cmp.cmp(&"xy", &"ab"), Ordering::Equal);
    }
}

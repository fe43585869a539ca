//! Ordered key-value map backed by the red-black [`Tree`].
//!
//! Entries are [`Pair`]s stored in key order under a pluggable
//! [`Comparator`], [`Natural`] by default. Lookups and removals are
//! O(log n); iteration and cursors walk in key order. Keys are unique and
//! immutable once stored.

use crate::algo;
use crate::core::{Comparator, Error, Global, Natural, RawAlloc};
use crate::cursor::Rev;
use crate::pair::Pair;
use crate::tree::{self, KeyOf, Tree, TreeCursor};
use std::cmp::Ordering;
use std::fmt;

/// Projection used by the map: the key is the first field of the pair.
pub struct PairKey;

impl<K, V> KeyOf<Pair<K, V>> for PairKey {
    type Key = K;

    fn key(entry: &Pair<K, V>) -> &K {
        &entry.first
    }
}

/// Cursor over map entries, in key order.
pub type MapCursor<'a, K, V, C = Natural<K>, A = Global> =
    TreeCursor<'a, Pair<K, V>, PairKey, C, A>;

/// Sorted associative container with unique keys.
pub struct OrdMap<K, V, C = Natural<K>, A: RawAlloc = Global> {
    tree: Tree<Pair<K, V>, PairKey, C, A>,
}

impl<K, V> OrdMap<K, V>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(Natural::default())
    }
}

impl<K, V, C> OrdMap<K, V, C>
where
    C: Comparator<K>,
{
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_comparator_in(cmp, Global)
    }
}

impl<K, V, C, A> OrdMap<K, V, C, A>
where
    C: Comparator<K>,
    A: RawAlloc,
{
    pub fn with_comparator_in(cmp: C, alloc: A) -> Self {
        OrdMap {
            tree: Tree::new_in(cmp, alloc),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.tree.max_len()
    }

    pub fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    pub fn allocator(&self) -> &A {
        self.tree.allocator()
    }

    /// Inserts `key` with `value`. Returns whether the key was new; an
    /// existing entry is left untouched and the arguments are dropped.
    pub fn insert(&mut self, key: K, value: V) -> Result<bool, Error> {
        let (_, inserted) = self.tree.insert(Pair::new(key, value))?;
        Ok(inserted)
    }

    /// The value under `key`, inserting `V::default()` first if absent.
    pub fn get_or_insert_default(&mut self, key: K) -> Result<&mut V, Error>
    where
        V: Default,
    {
        let (id, _) = self.tree.insert(Pair::new(key, V::default()))?;
        Ok(&mut self.tree.value_mut(id).second)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.find(key).map(|id| &self.tree.value(id).second)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.tree.find(key)?;
        Some(&mut self.tree.value_mut(id).second)
    }

    /// Checked lookup.
    pub fn at(&self, key: &K) -> Result<&V, Error> {
        self.get(key).ok_or_else(Error::missing_key)
    }

    /// Checked mutable lookup.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, Error> {
        self.get_mut(key).ok_or_else(Error::missing_key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    /// Number of entries under `key`: 0 or 1, keys being unique.
    pub fn count(&self, key: &K) -> usize {
        self.contains_key(key) as usize
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.tree.remove(key).map(|entry| entry.second)
    }

    /// Removes every key in `[from, to)`. Returns how many entries went.
    pub fn remove_range(&mut self, from: &K, to: &K) -> usize {
        let mut removed = 0;
        while let Some(id) = self.tree.lower_bound(from) {
            if !self.comparator().lt(&self.tree.value(id).first, to) {
                break;
            }
            self.tree.remove_id(id);
            removed += 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges contents, comparators and allocators in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    pub fn try_clone(&self) -> Result<Self, Error>
    where
        K: Clone,
        V: Clone,
        C: Clone,
    {
        Ok(OrdMap {
            tree: self.tree.try_clone()?,
        })
    }

    /// Cursor at the entry with exactly `key`, or the end position.
    pub fn find(&self, key: &K) -> MapCursor<'_, K, V, C, A> {
        self.tree.cursor(self.tree.find(key))
    }

    /// Cursor at the first entry whose key is not less than `key`.
    pub fn lower_bound(&self, key: &K) -> MapCursor<'_, K, V, C, A> {
        self.tree.cursor(self.tree.lower_bound(key))
    }

    /// Cursor at the first entry whose key is greater than `key`.
    pub fn upper_bound(&self, key: &K) -> MapCursor<'_, K, V, C, A> {
        self.tree.cursor(self.tree.upper_bound(key))
    }

    /// The half-open cursor range of entries matching `key`: empty when
    /// absent, one entry wide when present.
    pub fn equal_range(&self, key: &K) -> (MapCursor<'_, K, V, C, A>, MapCursor<'_, K, V, C, A>) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Cursor at the first entry in key order.
    pub fn begin(&self) -> MapCursor<'_, K, V, C, A> {
        self.tree.begin()
    }

    /// Cursor one past the last entry.
    pub fn end(&self) -> MapCursor<'_, K, V, C, A> {
        self.tree.end()
    }

    /// Reversed cursor over the entries, last key first.
    pub fn rbegin(&self) -> Rev<MapCursor<'_, K, V, C, A>> {
        Rev::new(self.end())
    }

    pub fn rend(&self) -> Rev<MapCursor<'_, K, V, C, A>> {
        Rev::new(self.begin())
    }

    pub fn iter(&self) -> Iter<'_, K, V, C, A> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V, C, A> {
        IterMut {
            inner: self.tree.iter_mut(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.iter_mut().map(|(_, value)| value)
    }

    pub fn try_extend<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) -> Result<(), Error> {
        for (key, value) in entries {
            self.insert(key, value)?;
        }
        Ok(())
    }
}

impl<K: Ord, V> Default for OrdMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C, A> Clone for OrdMap<K, V, C, A>
where
    K: Clone,
    V: Clone,
    C: Comparator<K> + Clone,
    A: RawAlloc,
{
    fn clone(&self) -> Self {
        self.try_clone().expect("Allocation failed while cloning")
    }
}

impl<K, V, C, A> PartialEq for OrdMap<K, V, C, A>
where
    K: PartialEq,
    V: PartialEq,
    C: Comparator<K>,
    A: RawAlloc,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && algo::equal(self.begin(), &self.end(), other.begin())
    }
}

impl<K, V, C, A> Eq for OrdMap<K, V, C, A>
where
    K: Eq,
    V: Eq,
    C: Comparator<K>,
    A: RawAlloc,
{
}

impl<K, V, C, A> PartialOrd for OrdMap<K, V, C, A>
where
    K: PartialOrd + PartialEq,
    V: PartialOrd + PartialEq,
    C: Comparator<K>,
    A: RawAlloc,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if algo::lexicographical_compare(self.begin(), &self.end(), other.begin(), &other.end()) {
            Some(Ordering::Less)
        } else if algo::lexicographical_compare(
            other.begin(),
            &other.end(),
            self.begin(),
            &self.end(),
        ) {
            Some(Ordering::Greater)
        } else if self == other {
            Some(Ordering::Equal)
        } else {
            None
        }
    }
}

impl<K, V, C, A> fmt::Debug for OrdMap<K, V, C, A>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Comparator<K>,
    A: RawAlloc,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C, A> IntoIterator for &'a OrdMap<K, V, C, A>
where
    C: Comparator<K>,
    A: RawAlloc,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Shared entry iterator, in key order.
pub struct Iter<'a, K, V, C, A: RawAlloc> {
    inner: tree::Iter<'a, Pair<K, V>, PairKey, C, A>,
}

impl<'a, K, V, C, A> Iterator for Iter<'a, K, V, C, A>
where
    C: Comparator<K>,
    A: RawAlloc,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|entry| (&entry.first, &entry.second))
    }
}

/// Exclusive entry iterator. Keys stay shared, only values are mutable.
pub struct IterMut<'a, K, V, C, A: RawAlloc> {
    inner: tree::IterMut<'a, Pair<K, V>, PairKey, C, A>,
}

impl<'a, K, V, C, A> Iterator for IterMut<'a, K, V, C, A>
where
    C: Comparator<K>,
    A: RawAlloc,
{
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<(&'a K, &'a mut V)> {
        self.inner.next().map(|entry| {
            let Pair { first, second } = entry;
            (&*first, second)
        })
    }
}

//! Red-black tree over an arena of slots.
//!
//! Nodes live in a [`Vector`] of slots addressed by [`NodeId`] handles, with
//! vacated slots threaded into an intrusive free list for reuse. Absent
//! children are `None` and count as black, so there is no sentinel node.
//! Handles stay valid across inserts and removals of other nodes; only
//! removing a node invalidates its own handle.
//!
//! The ordering key is projected out of the stored value by a [`KeyOf`]
//! strategy and compared by a [`Comparator`], so one tree type backs both
//! map-like (key in a pair) and set-like (value is the key) containers.
//! Keys are unique; an insert that collides leaves the tree unchanged.

use crate::core::{Comparator, Error, Global, RawAlloc};
use crate::cursor::{BidiCursor, Bidirectional, InputCursor};
use crate::vector::Vector;
use getset::CopyGetters;
use log::debug;
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr;

/// Projects the ordering key out of a stored value.
pub trait KeyOf<T> {
    type Key: ?Sized;

    fn key(value: &T) -> &Self::Key;
}

/// Set-like projection: the value is its own key.
pub struct Identity;

impl<T> KeyOf<T> for Identity {
    type Key = T;

    fn key(value: &T) -> &T {
        value
    }
}

/// Handle to a node slot. Stable until that node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    color: Color,
}

/// Arena slot: a live node, or a link in the free list.
#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant(Option<NodeId>),
}

/// The tree itself. `P` projects keys out of `T`, `C` orders them.
#[derive(CopyGetters)]
pub struct Tree<T, P, C, A: RawAlloc = Global> {
    slots: Vector<Slot<T>, A>,
    root: Option<NodeId>,
    // In-order first node, kept current so `begin` is O(1).
    leftmost: Option<NodeId>,
    first_free: Option<NodeId>,
    /// Number of live nodes.
    #[getset(get_copy = "pub")]
    len: usize,
    cmp: C,
    _project: PhantomData<P>,
}

impl<T, P, C> Tree<T, P, C>
where
    P: KeyOf<T>,
    C: Comparator<P::Key>,
{
    pub fn new(cmp: C) -> Self {
        Self::new_in(cmp, Global)
    }
}

impl<T, P, C, A> Tree<T, P, C, A>
where
    P: KeyOf<T>,
    C: Comparator<P::Key>,
    A: RawAlloc,
{
    pub fn new_in(cmp: C, alloc: A) -> Self {
        Tree {
            slots: Vector::new_in(alloc),
            root: None,
            leftmost: None,
            first_free: None,
            len: 0,
            cmp,
            _project: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Upper bound on node count: handle width or allocator, whichever is
    /// tighter.
    pub fn max_len(&self) -> usize {
        crate::algo::min(u32::MAX as usize, self.slots.max_len())
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    pub fn allocator(&self) -> &A {
        self.slots.allocator()
    }

    pub fn value(&self, id: NodeId) -> &T {
        &self.node(id).value
    }

    /// Exclusive access to a stored value. Mutating the projected key is a
    /// caller error, it breaks the ordering invariant.
    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.node_mut(id).value
    }

    /// Inserts `value` under its projected key. Returns the node holding the
    /// key and whether it was newly inserted; on a collision the existing
    /// node wins and `value` is dropped.
    pub fn insert(&mut self, value: T) -> Result<(NodeId, bool), Error> {
        let mut parent = None;
        let mut go_left = true;
        let mut walk = self.root;
        while let Some(id) = walk {
            match self.cmp.cmp(P::key(&value), P::key(&self.node(id).value)) {
                Ordering::Less => {
                    parent = Some(id);
                    go_left = true;
                    walk = self.node(id).left;
                }
                Ordering::Greater => {
                    parent = Some(id);
                    go_left = false;
                    walk = self.node(id).right;
                }
                Ordering::Equal => return Ok((id, false)),
            }
        }

        let id = self.allocate_node(Node {
            value,
            parent,
            left: None,
            right: None,
            color: Color::Red,
        })?;
        match parent {
            None => self.root = Some(id),
            Some(p) if go_left => self.node_mut(p).left = Some(id),
            Some(p) => self.node_mut(p).right = Some(id),
        }
        // A new minimum lands as the left child of the old one.
        if parent.is_none() || (go_left && parent == self.leftmost) {
            self.leftmost = Some(id);
        }
        self.len += 1;
        self.insert_fixup(id);
        Ok((id, true))
    }

    /// Removes the node holding `key`, returning its value.
    pub fn remove(&mut self, key: &P::Key) -> Option<T> {
        let id = self.find(key)?;
        Some(self.remove_id(id))
    }

    /// Removes a node by handle, returning its value. The handle is dead
    /// afterwards; all other handles stay valid.
    pub fn remove_id(&mut self, target: NodeId) -> T {
        if self.leftmost == Some(target) {
            self.leftmost = self.successor(target);
        }
        let mut removed_color = self.node(target).color;
        let fix_slot;
        let fix_parent;

        if self.node(target).left.is_none() {
            fix_slot = self.node(target).right;
            fix_parent = self.node(target).parent;
            self.transplant(target, fix_slot);
        } else if self.node(target).right.is_none() {
            fix_slot = self.node(target).left;
            fix_parent = self.node(target).parent;
            self.transplant(target, fix_slot);
        } else {
            // Two children: splice the in-order successor into target's place.
            let right = self.node(target).right.expect("right child checked above");
            let heir = self.min_node(right);
            removed_color = self.node(heir).color;
            fix_slot = self.node(heir).right;
            if self.node(heir).parent == Some(target) {
                fix_parent = Some(heir);
            } else {
                fix_parent = self.node(heir).parent;
                self.transplant(heir, fix_slot);
                let target_right = self.node(target).right;
                self.node_mut(heir).right = target_right;
                if let Some(r) = target_right {
                    self.node_mut(r).parent = Some(heir);
                }
            }
            self.transplant(target, Some(heir));
            let target_left = self.node(target).left;
            self.node_mut(heir).left = target_left;
            if let Some(l) = target_left {
                self.node_mut(l).parent = Some(heir);
            }
            self.node_mut(heir).color = self.node(target).color;
        }

        if removed_color == Color::Black {
            self.remove_fixup(fix_slot, fix_parent);
        }
        self.free_node(target)
    }

    /// The node holding exactly `key`.
    pub fn find(&self, key: &P::Key) -> Option<NodeId> {
        let mut walk = self.root;
        while let Some(id) = walk {
            walk = match self.cmp.cmp(key, P::key(&self.node(id).value)) {
                Ordering::Less => self.node(id).left,
                Ordering::Greater => self.node(id).right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// First node whose key is not less than `key`; `None` when every key is.
    pub fn lower_bound(&self, key: &P::Key) -> Option<NodeId> {
        let mut found = None;
        let mut walk = self.root;
        while let Some(id) = walk {
            if self.cmp.cmp(P::key(&self.node(id).value), key) == Ordering::Less {
                walk = self.node(id).right;
            } else {
                found = Some(id);
                walk = self.node(id).left;
            }
        }
        found
    }

    /// First node whose key is greater than `key`; `None` when none is.
    pub fn upper_bound(&self, key: &P::Key) -> Option<NodeId> {
        let mut found = None;
        let mut walk = self.root;
        while let Some(id) = walk {
            if self.cmp.cmp(P::key(&self.node(id).value), key) == Ordering::Greater {
                found = Some(id);
                walk = self.node(id).left;
            } else {
                walk = self.node(id).right;
            }
        }
        found
    }

    /// In-order first node, O(1).
    pub fn first(&self) -> Option<NodeId> {
        self.leftmost
    }

    /// In-order last node.
    pub fn last(&self) -> Option<NodeId> {
        self.root.map(|root| self.max_node(root))
    }

    /// In-order next node.
    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.min_node(right));
        }
        let mut child = id;
        let mut up = self.node(id).parent;
        while let Some(p) = up {
            if self.node(p).left == Some(child) {
                return Some(p);
            }
            child = p;
            up = self.node(p).parent;
        }
        None
    }

    /// In-order previous node.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.node(id).left {
            return Some(self.max_node(left));
        }
        let mut child = id;
        let mut up = self.node(id).parent;
        while let Some(p) = up {
            if self.node(p).right == Some(child) {
                return Some(p);
            }
            child = p;
            up = self.node(p).parent;
        }
        None
    }

    /// Drops every node and resets the arena. Capacity is released with it.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.root = None;
        self.leftmost = None;
        self.first_free = None;
        self.len = 0;
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Structure-preserving deep copy; handles into `self` index the same
    /// nodes in the copy.
    pub fn try_clone(&self) -> Result<Self, Error>
    where
        T: Clone,
        C: Clone,
    {
        Ok(Tree {
            slots: self.slots.try_clone()?,
            root: self.root,
            leftmost: self.leftmost,
            first_free: self.first_free,
            len: self.len,
            cmp: self.cmp.clone(),
            _project: PhantomData,
        })
    }

    /// Cursor at the in-order first node.
    pub fn begin(&self) -> TreeCursor<'_, T, P, C, A> {
        TreeCursor {
            tree: self,
            at: self.first(),
        }
    }

    /// Cursor one past the in-order last node.
    pub fn end(&self) -> TreeCursor<'_, T, P, C, A> {
        TreeCursor {
            tree: self,
            at: None,
        }
    }

    /// Cursor at a specific node.
    pub fn cursor(&self, at: Option<NodeId>) -> TreeCursor<'_, T, P, C, A> {
        TreeCursor { tree: self, at }
    }

    pub fn iter(&self) -> Iter<'_, T, P, C, A> {
        Iter {
            next: self.first(),
            tree: self,
        }
    }

    pub(crate) fn iter_mut(&mut self) -> IterMut<'_, T, P, C, A> {
        IterMut {
            next: self.first(),
            tree: self,
        }
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        match &self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => unreachable!("link to a vacant slot"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match &mut self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => unreachable!("link to a vacant slot"),
        }
    }

    fn allocate_node(&mut self, node: Node<T>) -> Result<NodeId, Error> {
        match self.first_free {
            Some(id) => {
                self.first_free = match &self.slots[id.index()] {
                    Slot::Vacant(next) => *next,
                    Slot::Occupied(_) => unreachable!("occupied slot on the free list"),
                };
                self.slots[id.index()] = Slot::Occupied(node);
                Ok(id)
            }
            None => {
                let index = self.slots.len();
                if index >= u32::MAX as usize {
                    return Err(Error::length_exceeded(self.len + 1, u32::MAX as usize));
                }
                if index == self.slots.capacity() {
                    debug!("node arena growing past {} slots", index);
                }
                self.slots.push(Slot::Occupied(node))?;
                Ok(NodeId(index as u32))
            }
        }
    }

    fn free_node(&mut self, id: NodeId) -> T {
        let slot = mem::replace(&mut self.slots[id.index()], Slot::Vacant(self.first_free));
        self.first_free = Some(id);
        self.len -= 1;
        match slot {
            Slot::Occupied(node) => node.value,
            Slot::Vacant(_) => unreachable!("freeing a vacant slot"),
        }
    }

    fn color(&self, id: Option<NodeId>) -> Color {
        // Absent children are black.
        id.map_or(Color::Black, |id| self.node(id).color)
    }

    fn min_node(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    fn max_node(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    fn rotate_left(&mut self, x: NodeId) {
        let y = self.node(x).right.expect("rotation pivot has a right child");
        let inner = self.node(y).left;
        self.node_mut(x).right = inner;
        if let Some(c) = inner {
            self.node_mut(c).parent = Some(x);
        }
        let up = self.node(x).parent;
        self.node_mut(y).parent = up;
        match up {
            None => self.root = Some(y),
            Some(p) if self.node(p).left == Some(x) => self.node_mut(p).left = Some(y),
            Some(p) => self.node_mut(p).right = Some(y),
        }
        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);
    }

    fn rotate_right(&mut self, x: NodeId) {
        let y = self.node(x).left.expect("rotation pivot has a left child");
        let inner = self.node(y).right;
        self.node_mut(x).left = inner;
        if let Some(c) = inner {
            self.node_mut(c).parent = Some(x);
        }
        let up = self.node(x).parent;
        self.node_mut(y).parent = up;
        match up {
            None => self.root = Some(y),
            Some(p) if self.node(p).left == Some(x) => self.node_mut(p).left = Some(y),
            Some(p) => self.node_mut(p).right = Some(y),
        }
        self.node_mut(y).right = Some(x);
        self.node_mut(x).parent = Some(y);
    }

    /// Replaces the subtree rooted at `from` with the one rooted at `to` in
    /// `from`'s parent. `from`'s own links are left untouched.
    fn transplant(&mut self, from: NodeId, to: Option<NodeId>) {
        let up = self.node(from).parent;
        match up {
            None => self.root = to,
            Some(p) if self.node(p).left == Some(from) => self.node_mut(p).left = to,
            Some(p) => self.node_mut(p).right = to,
        }
        if let Some(to) = to {
            self.node_mut(to).parent = up;
        }
    }

    /// Restores the red-red invariant after inserting `z` as a red leaf.
    fn insert_fixup(&mut self, mut z: NodeId) {
        while let Some(p) = self.node(z).parent {
            if self.node(p).color == Color::Black {
                break;
            }
            let g = self.node(p).parent.expect("red node has a parent");
            if self.node(g).left == Some(p) {
                let uncle = self.node(g).right;
                if self.color(uncle) == Color::Red {
                    self.node_mut(p).color = Color::Black;
                    let u = uncle.expect("red uncle exists");
                    self.node_mut(u).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    z = g;
                } else {
                    if self.node(p).right == Some(z) {
                        z = p;
                        self.rotate_left(z);
                    }
                    let p = self.node(z).parent.expect("rotated under a parent");
                    let g = self.node(p).parent.expect("red node has a parent");
                    self.node_mut(p).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.node(g).left;
                if self.color(uncle) == Color::Red {
                    self.node_mut(p).color = Color::Black;
                    let u = uncle.expect("red uncle exists");
                    self.node_mut(u).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    z = g;
                } else {
                    if self.node(p).left == Some(z) {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p = self.node(z).parent.expect("rotated under a parent");
                    let g = self.node(p).parent.expect("red node has a parent");
                    self.node_mut(p).color = Color::Black;
                    self.node_mut(g).color = Color::Red;
                    self.rotate_left(g);
                }
            }
        }
        let root = self.root.expect("fixup runs on a non-empty tree");
        self.node_mut(root).color = Color::Black;
    }

    /// Restores equal black heights after unlinking a black node. `x` is the
    /// slot carrying the extra black, tracked with its parent because it may
    /// be absent.
    fn remove_fixup(&mut self, mut x: Option<NodeId>, mut parent: Option<NodeId>) {
        while x != self.root && self.color(x) == Color::Black {
            let p = parent.expect("non-root slot has a parent");
            if self.node(p).left == x {
                // The sibling side carries at least one black node, so it
                // cannot be absent while x is short one.
                let mut w = self.node(p).right.expect("sibling of a short slot");
                if self.node(w).color == Color::Red {
                    self.node_mut(w).color = Color::Black;
                    self.node_mut(p).color = Color::Red;
                    self.rotate_left(p);
                    w = self.node(p).right.expect("sibling of a short slot");
                }
                if self.color(self.node(w).left) == Color::Black
                    && self.color(self.node(w).right) == Color::Black
                {
                    self.node_mut(w).color = Color::Red;
                    x = Some(p);
                    parent = self.node(p).parent;
                } else {
                    if self.color(self.node(w).right) == Color::Black {
                        let wl = self.node(w).left.expect("red near nephew");
                        self.node_mut(wl).color = Color::Black;
                        self.node_mut(w).color = Color::Red;
                        self.rotate_right(w);
                        w = self.node(p).right.expect("sibling of a short slot");
                    }
                    self.node_mut(w).color = self.node(p).color;
                    self.node_mut(p).color = Color::Black;
                    let wr = self.node(w).right.expect("red far nephew");
                    self.node_mut(wr).color = Color::Black;
                    self.rotate_left(p);
                    x = self.root;
                    parent = None;
                }
            } else {
                let mut w = self.node(p).left.expect("sibling of a short slot");
                if self.node(w).color == Color::Red {
                    self.node_mut(w).color = Color::Black;
                    self.node_mut(p).color = Color::Red;
                    self.rotate_right(p);
                    w = self.node(p).left.expect("sibling of a short slot");
                }
                if self.color(self.node(w).left) == Color::Black
                    && self.color(self.node(w).right) == Color::Black
                {
                    self.node_mut(w).color = Color::Red;
                    x = Some(p);
                    parent = self.node(p).parent;
                } else {
                    if self.color(self.node(w).left) == Color::Black {
                        let wr = self.node(w).right.expect("red near nephew");
                        self.node_mut(wr).color = Color::Black;
                        self.node_mut(w).color = Color::Red;
                        self.rotate_left(w);
                        w = self.node(p).left.expect("sibling of a short slot");
                    }
                    self.node_mut(w).color = self.node(p).color;
                    self.node_mut(p).color = Color::Black;
                    let wl = self.node(w).left.expect("red far nephew");
                    self.node_mut(wl).color = Color::Black;
                    self.rotate_right(p);
                    x = self.root;
                    parent = None;
                }
            }
        }
        if let Some(x) = x {
            self.node_mut(x).color = Color::Black;
        }
    }
}

impl<T, P, C, A> fmt::Debug for Tree<T, P, C, A>
where
    T: fmt::Debug,
    P: KeyOf<T>,
    C: Comparator<P::Key>,
    A: RawAlloc,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Bidirectional cursor over a tree, in key order. The end position is one
/// past the last node; reading or advancing it panics.
pub struct TreeCursor<'a, T, P, C, A: RawAlloc> {
    tree: &'a Tree<T, P, C, A>,
    at: Option<NodeId>,
}

impl<'a, T, P, C, A: RawAlloc> TreeCursor<'a, T, P, C, A> {
    /// The node under the cursor, `None` at the end position.
    pub fn node_id(&self) -> Option<NodeId> {
        self.at
    }
}

impl<'a, T, P, C, A: RawAlloc> Clone for TreeCursor<'a, T, P, C, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, P, C, A: RawAlloc> Copy for TreeCursor<'a, T, P, C, A> {}

impl<'a, T, P, C, A> InputCursor<'a> for TreeCursor<'a, T, P, C, A>
where
    P: KeyOf<T>,
    C: Comparator<P::Key>,
    A: RawAlloc,
{
    type Item = T;
    type Category = Bidirectional;

    fn read(&self) -> &'a T {
        let id = self.at.expect("read at the end position");
        self.tree.value(id)
    }

    fn advance(&mut self) {
        let id = self.at.expect("advance past the end position");
        self.at = self.tree.successor(id);
    }

    fn same(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.at == other.at
    }
}

impl<'a, T, P, C, A> BidiCursor<'a> for TreeCursor<'a, T, P, C, A>
where
    P: KeyOf<T>,
    C: Comparator<P::Key>,
    A: RawAlloc,
{
    fn retreat(&mut self) {
        self.at = Some(match self.at {
            None => {
                let root = self.tree.root.expect("retreat in an empty tree");
                self.tree.max_node(root)
            }
            Some(id) => self
                .tree
                .predecessor(id)
                .expect("retreat before the first position"),
        });
    }
}

/// Shared in-order iterator.
pub struct Iter<'a, T, P, C, A: RawAlloc> {
    tree: &'a Tree<T, P, C, A>,
    next: Option<NodeId>,
}

impl<'a, T, P, C, A> Iterator for Iter<'a, T, P, C, A>
where
    P: KeyOf<T>,
    C: Comparator<P::Key>,
    A: RawAlloc,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.next?;
        self.next = self.tree.successor(id);
        Some(self.tree.value(id))
    }
}

/// Exclusive in-order iterator.
pub(crate) struct IterMut<'a, T, P, C, A: RawAlloc> {
    tree: &'a mut Tree<T, P, C, A>,
    next: Option<NodeId>,
}

impl<'a, T, P, C, A> Iterator for IterMut<'a, T, P, C, A>
where
    P: KeyOf<T>,
    C: Comparator<P::Key>,
    A: RawAlloc,
{
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        let id = self.next?;
        self.next = self.tree.successor(id);
        let value = self.tree.value_mut(id);
        // SAFETY: in-order traversal visits each node once, so no value is
        // handed out twice for the iterator's lifetime.
        Some(unsafe { &mut *(value as *mut T) })
    }
}

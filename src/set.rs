//! An ordered set of unique keys stored in a plain (unbalanced) binary search tree whose nodes
//! know their parents.
//!
//! # Examples
//!
//! ```
//! use bst_set::OrderedSet;
//!
//! let mut set = OrderedSet::new();
//!
//! // Nothing in here yet.
//! assert!(set.find(&1).is_end());
//!
//! let (cursor, inserted) = set.insert(1);
//! assert!(inserted);
//! assert_eq!(cursor.get(), Some(&1));
//!
//! // Keys are unique, so inserting again is a no-op.
//! let (_, inserted) = set.insert(1);
//! assert!(!inserted);
//! assert_eq!(set.len(), 1);
//!
//! // Erasing reports how many keys went away.
//! assert_eq!(set.erase(&1), 1);
//! assert_eq!(set.erase(&1), 0);
//! assert!(set.is_empty());
//! ```
//!
//! # Balance
//!
//! The tree is never rebalanced. Inserting keys in sorted order produces a tree shaped like a
//! linked list, and every operation on it is then linear in the number of keys. None of the
//! algorithms here recurse, so such trees are slow but never overflow the stack.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::{Bound, RangeBounds};

use tracing::{debug, trace};

use crate::cursor::{Cursor, CursorMut, RawCursor};
use crate::node::{free_subtree, Link, Node};

/// An ordered set of unique keys backed by a binary search tree.
pub struct OrderedSet<K> {
    // A `Link` rather than an `Option<Box<Node>>` so the tree can move around with the set
    // without the root's children losing their parent.
    root: Link<K>,
    marker: PhantomData<Box<Node<K>>>,
}

// SAFETY: The set owns every node exactly like a `Box` would, and it's only mutated through
// `&mut self` (or a `CursorMut` holding that borrow). Thread-safety follows that of `K`.
unsafe impl<K: Send> Send for OrderedSet<K> {}
unsafe impl<K: Sync> Sync for OrderedSet<K> {}

impl<K> Default for OrderedSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for OrderedSet<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K> OrderedSet<K> {
    /// Generate a new, empty `OrderedSet`.
    pub fn new() -> Self {
        Self {
            root: Link::none(),
            marker: PhantomData,
        }
    }

    fn root_cursor(&self) -> RawCursor<K> {
        RawCursor::new(self.root)
    }

    fn first_raw(&self) -> RawCursor<K> {
        RawCursor::new(self.root.leftmost())
    }

    pub(crate) fn last_raw(&self) -> RawCursor<K> {
        RawCursor::new(self.root.rightmost())
    }

    /// A cursor at the smallest key, or the end position if the set is empty.
    pub fn begin(&self) -> Cursor<'_, K> {
        Cursor::from_raw(self.first_raw())
    }

    /// The end position, one past the largest key.
    pub fn end(&self) -> Cursor<'_, K> {
        Cursor::from_raw(RawCursor::end())
    }

    /// A mutable cursor at the smallest key.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K> {
        let first = self.first_raw();
        CursorMut::new(self, first)
    }

    /// A mutable cursor at the end position. Inserting through it appends cheaply.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_set::OrderedSet;
    ///
    /// let mut set = OrderedSet::new();
    /// let mut cursor = set.end_mut();
    /// for key in 0..5 {
    ///     cursor.insert(key);
    /// }
    ///
    /// assert_eq!(set.to_string(), "0 1 2 3 4");
    /// ```
    pub fn end_mut(&mut self) -> CursorMut<'_, K> {
        CursorMut::new(self, RawCursor::end())
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }

    /// The number of keys in the set.
    ///
    /// The size isn't cached, so this walks every node: `O(n)`.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether the set holds no keys. Unlike [`len`](Self::len) this is `O(1)`.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// An upper bound on how many keys a set could ever hold.
    pub fn max_size(&self) -> usize {
        usize::MAX / std::mem::size_of::<Node<K>>()
    }

    /// The smallest key.
    pub fn first(&self) -> Option<&K> {
        self.begin().get()
    }

    /// The largest key.
    pub fn last(&self) -> Option<&K> {
        Cursor::from_raw(self.last_raw()).get()
    }

    /// Removes and returns the smallest key.
    pub fn pop_first(&mut self) -> Option<K> {
        self.begin_mut().remove_current().ok()
    }

    /// Removes and returns the largest key.
    pub fn pop_last(&mut self) -> Option<K> {
        let last = self.last_raw();
        CursorMut::new(self, last).remove_current().ok()
    }

    /// Removes every key, freeing children before their parents.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take().0 {
            // SAFETY: We just detached the root, so the set no longer references any node. Cursors
            // borrow the set, so none can be alive while we hold `&mut self`.
            let freed = unsafe { free_subtree(root) };
            debug!(freed, "cleared set");
        }
    }

    /// Exchanges the contents of two sets without touching any node.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.root, &mut other.root);
    }

    /// Renders the keys in ascending order with `separator` between them. The plain
    /// [`Display`](fmt::Display) implementation uses a single space.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_set::OrderedSet;
    ///
    /// let set: OrderedSet<_> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(set.display_with(", ").to_string(), "1, 2, 3");
    /// assert_eq!(set.to_string(), "1 2 3");
    /// ```
    pub fn display_with<'a>(&'a self, separator: &'a str) -> DisplayWith<'a, K> {
        DisplayWith {
            set: self,
            separator,
        }
    }

    /// Removes the node under `target`, returning its key and the position that now follows it.
    ///
    /// A node with two children swaps keys with its in-order successor (the leftmost node of its
    /// right subtree), and that successor node is freed instead. The freed node always has at most
    /// one child, which simply takes its place. No rebalancing happens.
    ///
    /// # Safety
    ///
    /// `target` must point at a node of this set and the caller must hold the only cursor into it.
    pub(crate) unsafe fn unlink(&mut self, target: RawCursor<K>) -> (K, RawCursor<K>) {
        let (doomed, next) = if !target.left().is_end() && !target.right().is_end() {
            let successor = RawCursor::new(target.right().link().leftmost());
            target.swap_keys(successor);
            trace!("erasing a node with two children via its successor");
            // `target` now holds the successor's key, so it's also the position after the
            // removed key.
            (successor, target)
        } else {
            (target, target.successor())
        };

        let child = if doomed.left().is_end() {
            doomed.right()
        } else {
            doomed.left()
        };
        debug_assert!(doomed.left().is_end() || doomed.right().is_end());

        let parent = doomed.parent();
        let was_left_child = doomed.is_left_child();
        if !child.is_end() {
            child.relink_parent(parent);
        }
        if parent.is_end() {
            self.root = child.link();
        } else if was_left_child {
            parent.relink_left(child);
        } else {
            parent.relink_right(child);
        }
        trace!(
            replaced_by_child = !child.is_end(),
            at_root = parent.is_end(),
            "unlinked node"
        );

        if cfg!(debug_assertions) {
            assert_links_agree(parent);
            assert_links_agree(child);
        }

        let doomed = doomed.link().0.expect("Unlinking implies a node");
        // SAFETY: `doomed` was allocated by `Node::new_leaked` and the relinking above removed
        // the only two pointers to it (its parent's child link and its child's parent link).
        (Node::into_key(doomed), next)
    }
}

impl<K> OrderedSet<K>
where
    K: Ord,
{
    /// A cursor at `key`, or the end position if the set doesn't contain it.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_set::OrderedSet;
    ///
    /// let set: OrderedSet<_> = [1, 2].into_iter().collect();
    ///
    /// assert_eq!(set.find(&1).get(), Some(&1));
    /// assert_eq!(set.find(&42), set.end());
    /// ```
    pub fn find(&self, key: &K) -> Cursor<'_, K> {
        Cursor::from_raw(self.find_raw(key))
    }

    /// A mutable cursor at `key`, or at the end position if the set doesn't contain it.
    pub fn find_mut(&mut self, key: &K) -> CursorMut<'_, K> {
        let found = self.find_raw(key);
        CursorMut::new(self, found)
    }

    fn find_raw(&self, key: &K) -> RawCursor<K> {
        let mut current = self.root_cursor();
        while let Some(current_key) = current.key() {
            current = match key.cmp(current_key) {
                Ordering::Less => current.left(),
                Ordering::Equal => return current,
                Ordering::Greater => current.right(),
            };
        }
        current
    }

    /// Whether the set contains `key`.
    pub fn contains(&self, key: &K) -> bool {
        !self.find_raw(key).is_end()
    }

    /// How many times `key` is in the set: `1` or `0`.
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains(key))
    }

    /// A cursor at the smallest key that is `>= key`, or the end position if there is none.
    pub fn lower_bound(&self, key: &K) -> Cursor<'_, K> {
        Cursor::from_raw(self.lower_bound_raw(key))
    }

    /// A mutable cursor at the smallest key that is `>= key`. A good hint for inserting `key`.
    pub fn lower_bound_mut(&mut self, key: &K) -> CursorMut<'_, K> {
        let found = self.lower_bound_raw(key);
        CursorMut::new(self, found)
    }

    fn lower_bound_raw(&self, key: &K) -> RawCursor<K> {
        let mut current = self.root_cursor();
        let mut found = RawCursor::end();
        while let Some(current_key) = current.key() {
            if current_key >= key {
                found = current;
                current = current.left();
            } else {
                current = current.right();
            }
        }
        found
    }

    /// A cursor at the smallest key that is `> key`, or the end position if there is none.
    pub fn upper_bound(&self, key: &K) -> Cursor<'_, K> {
        Cursor::from_raw(self.upper_bound_raw(key))
    }

    fn upper_bound_raw(&self, key: &K) -> RawCursor<K> {
        let mut current = self.root_cursor();
        let mut found = RawCursor::end();
        while let Some(current_key) = current.key() {
            if key < current_key {
                found = current;
                current = current.left();
            } else {
                current = current.right();
            }
        }
        found
    }

    /// The span of keys equal to `key`: `(lower_bound(key), upper_bound(key))`. Since keys are
    /// unique it holds one key or none.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_set::OrderedSet;
    ///
    /// let set: OrderedSet<_> = [10, 20].into_iter().collect();
    ///
    /// let (first, last) = set.equal_range(&10);
    /// assert_eq!(first.get(), Some(&10));
    /// assert_eq!(last.get(), Some(&20));
    ///
    /// let (first, last) = set.equal_range(&15);
    /// assert_eq!(first, last);
    /// ```
    pub fn equal_range(&self, key: &K) -> (Cursor<'_, K>, Cursor<'_, K>) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Inserts `key`, searching from the root. Returns a cursor at the node holding `key` and
    /// whether that node is new. Inserting a key that is already present changes nothing.
    ///
    /// To start the search from a known position instead, use [`CursorMut::insert`].
    pub fn insert(&mut self, key: K) -> (Cursor<'_, K>, bool) {
        let root = self.root_cursor();
        let (found, inserted) = self.insert_from(root, key, false);
        (Cursor::from_raw(found), inserted)
    }

    /// Inserts every key, one at a time from the root.
    pub fn insert_range<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        for key in keys {
            self.insert(key);
        }
    }

    /// The insertion walk behind every insert: re-validate `hint` on the way up, then descend
    /// from it and attach `key` where the search falls off the tree.
    ///
    /// `hint_is_last` promises that `hint` is the largest node. A greater key then becomes its
    /// right child straight away, since no ancestor of the largest node can be greater.
    pub(crate) fn insert_from(
        &mut self,
        hint: RawCursor<K>,
        key: K,
        hint_is_last: bool,
    ) -> (RawCursor<K>, bool) {
        if self.root.is_none() {
            let root = Node::new_leaked(key, Link::none());
            self.root = Link(Some(root));
            trace!("inserted root");
            return (RawCursor::at(root), true);
        }

        let (hint, hint_is_last) = if hint.is_end() {
            (self.last_raw(), true)
        } else {
            (hint, hint_is_last)
        };
        if hint_is_last && hint.key().is_some_and(|last| &key > last) {
            // SAFETY: `&mut self` means nothing else is looking at the tree, and the largest node
            // has no right child.
            let found = unsafe { hint.attach_right(key) };
            trace!("appended after the largest key");
            return (found, true);
        }
        let start = Self::revalidate_hint(hint, &key);

        // SAFETY: `&mut self` means nothing else is looking at the tree.
        let (found, inserted) = unsafe { Self::descend_and_attach(start, key) };
        if inserted && cfg!(debug_assertions) {
            assert_links_agree(found.parent());
        }
        (found, inserted)
    }

    /// Climbs from `hint` until it is a node whose subtree (or whose empty child link) is where
    /// `key` belongs.
    ///
    /// Every ancestor on the side of `hint` away from `key` is already on the correct side of
    /// `key`, so only the nearest ancestor on the side towards `key` has to be checked. If it
    /// doesn't bracket `key` we climb to it and check again.
    fn revalidate_hint(mut hint: RawCursor<K>, key: &K) -> RawCursor<K> {
        let mut climbed = 0_usize;
        loop {
            let Some(order) = hint.key().map(|hint_key| key.cmp(hint_key)) else {
                break;
            };
            let ancestor = match order {
                Ordering::Equal => break,
                Ordering::Less => hint.first_left_ancestor(),
                Ordering::Greater => hint.first_right_ancestor(),
            };
            let brackets = match ancestor.key() {
                None => true,
                Some(bound) if order == Ordering::Less => bound < key,
                Some(bound) => bound > key,
            };
            if brackets {
                break;
            }
            hint = ancestor;
            climbed += 1;
        }
        if climbed > 0 {
            trace!(climbed, "moved insertion hint up");
        }
        hint
    }

    /// # Safety
    ///
    /// The caller must have unique access to the tree and `start` must point at one of its nodes.
    unsafe fn descend_and_attach(start: RawCursor<K>, key: K) -> (RawCursor<K>, bool) {
        let mut current = start;
        loop {
            let order = current
                .key()
                .map(|current_key| key.cmp(current_key))
                .expect("The insertion walk only visits nodes");
            match order {
                Ordering::Less => {
                    let left = current.left();
                    if left.is_end() {
                        trace!("attached a left child");
                        return (current.attach_left(key), true);
                    }
                    current = left;
                }
                Ordering::Equal => return (current, false),
                Ordering::Greater => {
                    let right = current.right();
                    if right.is_end() {
                        trace!("attached a right child");
                        return (current.attach_right(key), true);
                    }
                    current = right;
                }
            }
        }
    }

    /// Removes `key` and returns how many keys were removed: `1` or `0`.
    pub fn erase(&mut self, key: &K) -> usize {
        usize::from(self.take(key).is_some())
    }

    /// Removes `key` and hands it back, if it was in the set.
    pub fn take(&mut self, key: &K) -> Option<K> {
        self.find_mut(key).remove_current().ok()
    }

    /// Removes every key in `range` and returns how many were removed.
    ///
    /// One cursor walks the range and removes as it goes. Removal leaves the cursor on the next
    /// key, so no position is ever read after its node is freed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_set::OrderedSet;
    ///
    /// let mut set: OrderedSet<_> = (0..10).collect();
    ///
    /// assert_eq!(set.erase_range(3..7), 4);
    /// assert_eq!(set.to_string(), "0 1 2 7 8 9");
    ///
    /// assert_eq!(set.erase_range(..=1), 2);
    /// assert_eq!(set.to_string(), "2 7 8 9");
    /// ```
    pub fn erase_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<K>,
    {
        let start = match range.start_bound() {
            Bound::Included(key) => self.lower_bound_raw(key),
            Bound::Excluded(key) => self.upper_bound_raw(key),
            Bound::Unbounded => self.first_raw(),
        };

        let mut cursor = CursorMut::new(self, start);
        let mut erased = 0;
        while let Some(key) = cursor.get() {
            let in_range = match range.end_bound() {
                Bound::Included(end) => key <= end,
                Bound::Excluded(end) => key < end,
                Bound::Unbounded => true,
            };
            if !in_range || cursor.remove_current().is_err() {
                break;
            }
            erased += 1;
        }
        debug!(erased, "erased range");
        erased
    }
}

/// Checks that `cursor`'s children point back at it. A no-op at the end position.
fn assert_links_agree<K>(cursor: RawCursor<K>) {
    if cursor.is_end() {
        return;
    }
    for child in [cursor.left(), cursor.right()] {
        assert!(child.is_end() || child.parent() == cursor);
    }
}

impl<K> Clone for OrderedSet<K>
where
    K: Clone + Ord,
{
    /// Builds an independent set with the same keys by inserting them in order. Each key is
    /// inserted with the previous one as its hint, so the copy is built in linear time (and is
    /// shaped like a list, since nothing rebalances it).
    fn clone(&self) -> Self {
        let mut copy = Self::new();
        copy.clone_from(self);
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        let mut cursor = self.end_mut();
        for key in source {
            cursor.insert(key.clone());
        }
    }
}

impl<K> PartialEq for OrderedSet<K>
where
    K: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.iter().eq(other.iter())
    }
}

impl<K> Eq for OrderedSet<K> where K: Eq {}

impl<K> PartialOrd for OrderedSet<K>
where
    K: PartialOrd,
{
    /// Lexicographic order over the sorted keys. A set that is a prefix of another is smaller.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K> Ord for OrderedSet<K>
where
    K: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K> Hash for OrderedSet<K>
where
    K: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for key in self {
            key.hash(state);
            len += 1;
        }
        len.hash(state);
    }
}

impl<K> fmt::Debug for OrderedSet<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> fmt::Display for OrderedSet<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display_with(" "), f)
    }
}

/// The keys of a set joined by a separator. See [`OrderedSet::display_with`].
pub struct DisplayWith<'a, K> {
    set: &'a OrderedSet<K>,
    separator: &'a str,
}

impl<K> fmt::Display for DisplayWith<'_, K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.set.iter().enumerate() {
            if i > 0 {
                f.write_str(self.separator)?;
            }
            fmt::Display::fmt(key, f)?;
        }
        Ok(())
    }
}

impl<K> FromIterator<K> for OrderedSet<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.insert_range(iter);
        set
    }
}

impl<K, const N: usize> From<[K; N]> for OrderedSet<K>
where
    K: Ord,
{
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<K> Extend<K> for OrderedSet<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.insert_range(iter);
    }
}

impl<'a, K> Extend<&'a K> for OrderedSet<K>
where
    K: Ord + Copy + 'a,
{
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.insert_range(iter.into_iter().copied());
    }
}

/// An iterator over the keys of an [`OrderedSet`] in ascending order. Created by
/// [`OrderedSet::iter`].
pub struct Iter<'a, K> {
    front: RawCursor<K>,
    back: RawCursor<K>,
    marker: PhantomData<&'a K>,
}

// SAFETY: Same as `Cursor`, an `Iter` only hands out shared references to keys.
unsafe impl<K: Sync> Send for Iter<'_, K> {}
unsafe impl<K: Sync> Sync for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            front: self.front,
            back: self.back,
            marker: PhantomData,
        }
    }
}

impl<'a, K> Iter<'a, K> {
    fn new(set: &'a OrderedSet<K>) -> Self {
        Self {
            front: set.first_raw(),
            back: set.last_raw(),
            marker: PhantomData,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.front;
        if position.is_end() {
            return None;
        }
        if position == self.back {
            // The two ends just met.
            self.front = RawCursor::end();
            self.back = RawCursor::end();
        } else {
            self.front = position.successor();
        }
        Cursor::from_raw(position).get()
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let position = self.back;
        if position.is_end() {
            return None;
        }
        if position == self.front {
            self.front = RawCursor::end();
            self.back = RawCursor::end();
        } else {
            self.back = position.predecessor();
        }
        Cursor::from_raw(position).get()
    }
}

impl<K> FusedIterator for Iter<'_, K> {}

impl<'a, K> IntoIterator for &'a OrderedSet<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator over the keys of an [`OrderedSet`] in ascending order.
pub struct IntoIter<K> {
    set: OrderedSet<K>,
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        self.set.pop_first()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.set.pop_last()
    }
}

impl<K> FusedIterator for IntoIter<K> {}

impl<K> IntoIterator for OrderedSet<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { set: self }
    }
}

#[cfg(test)]
impl<K> OrderedSet<K>
where
    K: Ord + fmt::Debug,
{
    /// Panics unless every child points back at its parent, the root has no parent, and an
    /// in-order walk yields strictly ascending keys.
    fn assert_invariants(&self) {
        assert!(self.root_cursor().parent().is_end());

        let mut cursor = self.first_raw();
        while !cursor.is_end() {
            assert_links_agree(cursor);
            cursor = cursor.successor();
        }

        let keys: Vec<_> = self.iter().collect();
        assert!(
            keys.windows(2).all(|pair| pair[0] < pair[1]),
            "keys out of order: {:?}",
            keys
        );
    }

    /// How many levels the tree has. An empty tree has a height of 0.
    fn height(&self) -> usize {
        let mut height = 0;
        let mut cursor = self.first_raw();
        while !cursor.is_end() {
            let mut depth = 1;
            let mut ancestor = cursor.parent();
            while !ancestor.is_end() {
                depth += 1;
                ancestor = ancestor.parent();
            }
            height = height.max(depth);
            cursor = cursor.successor();
        }
        height
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to an `OrderedSet` and a `BTreeSet`.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same keys in both.
    fn do_ops<K>(ops: &[Op<K>], bst: &mut OrderedSet<K>, set: &mut BTreeSet<K>)
    where
        K: Clone + Ord + fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    assert_eq!(bst.insert(k.clone()).1, set.insert(k.clone()));
                }
                Op::InsertHinted(hint, k) => {
                    assert_eq!(
                        bst.lower_bound_mut(hint).insert(k.clone()),
                        set.insert(k.clone())
                    );
                }
                Op::Remove(k) => {
                    assert_eq!(bst.take(k), set.take(k));
                }
                Op::Iter => {
                    assert!(bst.iter().eq(set.iter()));
                }
            }
            bst.assert_invariants();
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut bst = OrderedSet::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut bst, &mut set);
            bst.iter().eq(set.iter()) && set.iter().all(|key| bst.contains(key))
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let bst: OrderedSet<_> = xs.iter().copied().collect();
            xs.iter().all(|x| bst.find(x).get() == Some(x))
        }
    }

    quickcheck::quickcheck! {
        fn clone_matches_original(xs: Vec<i16>) -> bool {
            let bst: OrderedSet<_> = xs.into_iter().collect();
            let copy = bst.clone();
            copy.assert_invariants();
            copy == bst
        }
    }
}

//! Positions inside an [`OrderedSet`] that can walk it in sorted order.
//!
//! A cursor is nothing more than "the current node" (or the end position, one past the largest
//! key). Every step is found by chasing `left`, `right` and `parent` links, so a cursor needs no
//! stack of visited nodes and iteration shares its representation with structural edits.
//!
//! There are two levels of capability:
//!
//! * [`Cursor`] borrows the set immutably. It is `Copy` and any number of them can coexist.
//! * [`CursorMut`] borrows the set uniquely. On top of navigation it can insert using its own
//!   position as a hint and remove the key it points at.
//!
//! Both wrap the same crate-private `RawCursor`, which holds all of the link chasing and the
//! structural edits the set is built from.
//!
//! # Examples
//!
//! ```
//! use bst_set::OrderedSet;
//!
//! let set: OrderedSet<_> = [5, 3, 8].into_iter().collect();
//!
//! let mut cursor = set.begin();
//! assert_eq!(cursor.get(), Some(&3));
//!
//! cursor.advance().unwrap();
//! assert_eq!(cursor.get(), Some(&5));
//!
//! cursor.advance().unwrap();
//! cursor.advance().unwrap();
//! assert_eq!(cursor, set.end());
//! assert!(cursor.advance().is_err());
//! ```
//!
//! [`OrderedSet`]: crate::OrderedSet

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::CursorError;
use crate::node::{Link, Node};
use crate::OrderedSet;

/// The shared engine behind [`Cursor`] and [`CursorMut`].
///
/// A `RawCursor` is only ever created from a link of a live tree and only used while that tree is
/// borrowed, immutably for navigation and uniquely for the `unsafe` structural edits. That is the
/// whole safety argument for the link dereferences in here, and it's upheld by the set and the
/// two public wrappers, none of which let a `RawCursor` escape.
pub(crate) struct RawCursor<K> {
    link: Link<K>,
}

impl<K> Clone for RawCursor<K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for RawCursor<K> {}

impl<K> PartialEq for RawCursor<K> {
    fn eq(&self, other: &Self) -> bool {
        self.link == other.link
    }
}
impl<K> Eq for RawCursor<K> {}

impl<K> fmt::Debug for RawCursor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawCursor").field(&self.link).finish()
    }
}

impl<K> RawCursor<K> {
    pub(crate) fn new(link: Link<K>) -> Self {
        Self { link }
    }

    pub(crate) fn end() -> Self {
        Self::new(Link::none())
    }

    pub(crate) fn at(node: NonNull<Node<K>>) -> Self {
        Self::new(Link(Some(node)))
    }

    pub(crate) fn link(self) -> Link<K> {
        self.link
    }

    pub(crate) fn is_end(self) -> bool {
        self.link.is_none()
    }

    pub(crate) fn key(&self) -> Option<&K> {
        self.link.node().map(|n| &n.key)
    }

    /// The node under the cursor. Used by the structural edits, which can't work at the end.
    fn ptr(self) -> NonNull<Node<K>> {
        self.link
            .0
            .expect("Structural edits need a cursor that points at a node")
    }

    pub(crate) fn left(self) -> Self {
        Self::new(self.link.node().map_or(Link::none(), |n| n.left))
    }

    pub(crate) fn right(self) -> Self {
        Self::new(self.link.node().map_or(Link::none(), |n| n.right))
    }

    pub(crate) fn parent(self) -> Self {
        Self::new(self.link.node().map_or(Link::none(), |n| n.parent))
    }

    pub(crate) fn is_left_child(self) -> bool {
        let parent = self.parent();
        !parent.is_end() && parent.left() == self
    }

    pub(crate) fn is_right_child(self) -> bool {
        let parent = self.parent();
        !parent.is_end() && parent.right() == self
    }

    /// The nearest ancestor whose right subtree holds this node, i.e. the closest ancestor with a
    /// smaller key.
    pub(crate) fn first_left_ancestor(self) -> Self {
        let mut child = self;
        loop {
            let parent = child.parent();
            if parent.is_end() || parent.right() == child {
                return parent;
            }
            child = parent;
        }
    }

    /// The nearest ancestor whose left subtree holds this node, i.e. the closest ancestor with a
    /// greater key.
    pub(crate) fn first_right_ancestor(self) -> Self {
        let mut child = self;
        loop {
            let parent = child.parent();
            if parent.is_end() || parent.left() == child {
                return parent;
            }
            child = parent;
        }
    }

    /// The in-order successor. From the largest key this is the end position.
    pub(crate) fn successor(self) -> Self {
        let right = self.right();
        if !right.is_end() {
            return Self::new(right.link.leftmost());
        }
        let mut current = self;
        while current.is_right_child() {
            current = current.parent();
        }
        current.parent()
    }

    /// The in-order predecessor. From the smallest key this is the end position.
    pub(crate) fn predecessor(self) -> Self {
        let left = self.left();
        if !left.is_end() {
            return Self::new(left.link.rightmost());
        }
        let mut current = self;
        while current.is_left_child() {
            current = current.parent();
        }
        current.parent()
    }

    pub(crate) fn advance(&mut self) -> Result<(), CursorError> {
        if self.is_end() {
            return Err(CursorError::OutOfRange);
        }
        *self = self.successor();
        Ok(())
    }

    pub(crate) fn retreat(&mut self) -> Result<(), CursorError> {
        if self.is_end() {
            return Err(CursorError::OutOfRange);
        }
        let previous = self.predecessor();
        if previous.is_end() {
            return Err(CursorError::OutOfRange);
        }
        *self = previous;
        Ok(())
    }

    /// Creates a left child holding `key` and returns a cursor at it.
    ///
    /// # Safety
    ///
    /// The caller must have unique access to the tree and the left link must be empty.
    pub(crate) unsafe fn attach_left(self, key: K) -> Self {
        let parent = self.ptr();
        debug_assert!((*parent.as_ptr()).left.is_none());
        let child = Node::new_leaked(key, self.link);
        (*parent.as_ptr()).left = Link(Some(child));
        Self::at(child)
    }

    /// Creates a right child holding `key` and returns a cursor at it.
    ///
    /// # Safety
    ///
    /// The caller must have unique access to the tree and the right link must be empty.
    pub(crate) unsafe fn attach_right(self, key: K) -> Self {
        let parent = self.ptr();
        debug_assert!((*parent.as_ptr()).right.is_none());
        let child = Node::new_leaked(key, self.link);
        (*parent.as_ptr()).right = Link(Some(child));
        Self::at(child)
    }

    /// Points this node's left link at `child` without touching `child`'s parent link.
    ///
    /// # Safety
    ///
    /// The caller must have unique access to the tree and must leave every link consistent before
    /// the tree is read again.
    pub(crate) unsafe fn relink_left(self, child: Self) {
        (*self.ptr().as_ptr()).left = child.link;
    }

    /// Points this node's right link at `child` without touching `child`'s parent link.
    ///
    /// # Safety
    ///
    /// See [`RawCursor::relink_left`].
    pub(crate) unsafe fn relink_right(self, child: Self) {
        (*self.ptr().as_ptr()).right = child.link;
    }

    /// Points this node's parent link at `parent`, which may be the end position for a new root.
    ///
    /// # Safety
    ///
    /// See [`RawCursor::relink_left`].
    pub(crate) unsafe fn relink_parent(self, parent: Self) {
        (*self.ptr().as_ptr()).parent = parent.link;
    }

    /// Exchanges the keys of two distinct nodes, leaving every link as it was.
    ///
    /// # Safety
    ///
    /// The caller must have unique access to the tree and must restore the ordering invariant
    /// before the tree is searched again.
    pub(crate) unsafe fn swap_keys(self, other: Self) {
        let (a, b) = (self.ptr(), other.ptr());
        debug_assert_ne!(a, b);
        std::ptr::swap(
            std::ptr::addr_of_mut!((*a.as_ptr()).key),
            std::ptr::addr_of_mut!((*b.as_ptr()).key),
        );
    }
}

/// The identity of a node in a set.
///
/// Two cursors point at the same node exactly when their `NodeId`s are equal. Unlike a cursor, a
/// `NodeId` doesn't borrow the set, so it can be used to check that a node survived a mutation.
/// Once the node is removed its id may be handed out again to a new node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    fn of<K>(raw: RawCursor<K>) -> Option<Self> {
        raw.link.0.map(|ptr| NodeId(ptr.as_ptr() as usize))
    }
}

/// A read-only position in an [`OrderedSet`](crate::OrderedSet).
///
/// Cursors compare equal when they point at the same node, not when their keys are equal. All
/// end cursors are equal.
pub struct Cursor<'a, K> {
    raw: RawCursor<K>,
    marker: PhantomData<&'a Node<K>>,
}

// SAFETY: A `Cursor` is a shared borrow of the set's nodes, so it can cross threads whenever
// `&K` can.
unsafe impl<K: Sync> Send for Cursor<'_, K> {}
unsafe impl<K: Sync> Sync for Cursor<'_, K> {}

impl<K> Clone for Cursor<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for Cursor<'_, K> {}

impl<K> PartialEq for Cursor<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}
impl<K> Eq for Cursor<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for Cursor<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

impl<'a, K> Cursor<'a, K> {
    pub(crate) fn from_raw(raw: RawCursor<K>) -> Self {
        Self {
            raw,
            marker: PhantomData,
        }
    }

    #[cfg(test)]
    pub(crate) fn raw(&self) -> RawCursor<K> {
        self.raw
    }

    /// Whether this is the end position, one past the largest key.
    pub fn is_end(&self) -> bool {
        self.raw.is_end()
    }

    /// The key under the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<&'a K> {
        // SAFETY: The set is immutably borrowed for `'a`, so the node outlives the returned
        // reference and nothing can mutate it in the meantime.
        unsafe { self.raw.link.0.map(|ptr| &(*ptr.as_ptr()).key) }
    }

    /// The key under the cursor.
    ///
    /// # Errors
    ///
    /// [`CursorError::InvalidCursor`] at the end position.
    pub fn key(&self) -> Result<&'a K, CursorError> {
        self.get().ok_or(CursorError::InvalidCursor)
    }

    /// The identity of the node under the cursor.
    pub fn node_id(&self) -> Option<NodeId> {
        NodeId::of(self.raw)
    }

    /// A cursor at this node's left child, or the end position if there is none.
    pub fn left(&self) -> Self {
        Self::from_raw(self.raw.left())
    }

    /// A cursor at this node's right child, or the end position if there is none.
    pub fn right(&self) -> Self {
        Self::from_raw(self.raw.right())
    }

    /// A cursor at this node's parent, or the end position for the root.
    pub fn parent(&self) -> Self {
        Self::from_raw(self.raw.parent())
    }

    /// Whether this node is its parent's left child.
    pub fn is_left_child(&self) -> bool {
        self.raw.is_left_child()
    }

    /// Whether this node is its parent's right child.
    pub fn is_right_child(&self) -> bool {
        self.raw.is_right_child()
    }

    /// Walks up to the first ancestor whose right subtree contains this node: the nearest
    /// ancestor with a smaller key. Returns the end position if every ancestor is greater.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_set::OrderedSet;
    ///
    /// let set: OrderedSet<_> = [5, 3, 4].into_iter().collect();
    ///
    /// let four = set.find(&4);
    /// assert_eq!(four.first_left_ancestor().get(), Some(&3));
    /// assert_eq!(four.first_right_ancestor().get(), Some(&5));
    /// assert!(set.find(&3).first_left_ancestor().is_end());
    /// ```
    pub fn first_left_ancestor(&self) -> Self {
        Self::from_raw(self.raw.first_left_ancestor())
    }

    /// Walks up to the first ancestor whose left subtree contains this node: the nearest ancestor
    /// with a greater key. Returns the end position if every ancestor is smaller.
    pub fn first_right_ancestor(&self) -> Self {
        Self::from_raw(self.raw.first_right_ancestor())
    }

    /// Moves to the next key in sorted order. From the largest key this moves to the end
    /// position.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] if the cursor is already at the end. The cursor doesn't move.
    pub fn advance(&mut self) -> Result<(), CursorError> {
        self.raw.advance()
    }

    /// Moves to the previous key in sorted order.
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] if the cursor is at the smallest key or at the end. The
    /// cursor doesn't move.
    pub fn retreat(&mut self) -> Result<(), CursorError> {
        self.raw.retreat()
    }
}

/// A position in an [`OrderedSet`](crate::OrderedSet) that can also modify it.
///
/// While a `CursorMut` exists it is the only way to reach the set, so the node it points at can
/// never be freed behind its back.
///
/// # Examples
///
/// ```
/// use bst_set::OrderedSet;
///
/// let mut set: OrderedSet<_> = [10, 20, 30].into_iter().collect();
///
/// // Use the position of 20 as the starting point for inserting its neighbour.
/// let mut cursor = set.find_mut(&20);
/// assert!(cursor.insert(21));
/// assert_eq!(cursor.get(), Some(&21));
///
/// // Removing moves the cursor on to the next key.
/// assert_eq!(cursor.remove_current(), Ok(21));
/// assert_eq!(cursor.get(), Some(&30));
///
/// assert_eq!(set.to_string(), "10 20 30");
/// ```
pub struct CursorMut<'a, K> {
    raw: RawCursor<K>,
    set: &'a mut OrderedSet<K>,
    // Set only while `raw` is known to be the largest node, so appends skip the hint climb.
    at_last: bool,
}

impl<K: fmt::Debug> fmt::Debug for CursorMut<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.get()).finish()
    }
}

impl<'a, K> CursorMut<'a, K> {
    pub(crate) fn new(set: &'a mut OrderedSet<K>, raw: RawCursor<K>) -> Self {
        Self {
            raw,
            set,
            at_last: false,
        }
    }

    /// A read-only view of this position. The view borrows the `CursorMut`, so no edit can happen
    /// while it is alive.
    pub fn as_cursor(&self) -> Cursor<'_, K> {
        Cursor::from_raw(self.raw)
    }

    /// Whether this is the end position, one past the largest key.
    pub fn is_end(&self) -> bool {
        self.raw.is_end()
    }

    /// The key under the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<&K> {
        self.raw.key()
    }

    /// The key under the cursor.
    ///
    /// # Errors
    ///
    /// [`CursorError::InvalidCursor`] at the end position.
    pub fn key(&self) -> Result<&K, CursorError> {
        self.get().ok_or(CursorError::InvalidCursor)
    }

    /// The identity of the node under the cursor.
    pub fn node_id(&self) -> Option<NodeId> {
        NodeId::of(self.raw)
    }

    /// Moves to the next key in sorted order. See [`Cursor::advance`].
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] if the cursor is already at the end.
    pub fn advance(&mut self) -> Result<(), CursorError> {
        self.at_last = false;
        self.raw.advance()
    }

    /// Moves to the previous key in sorted order. See [`Cursor::retreat`].
    ///
    /// # Errors
    ///
    /// [`CursorError::OutOfRange`] if the cursor is at the smallest key or at the end.
    pub fn retreat(&mut self) -> Result<(), CursorError> {
        self.at_last = false;
        self.raw.retreat()
    }

    /// Inserts `key` using the current position as a hint and moves the cursor to the node that
    /// holds `key` afterwards. Returns whether a new node was created; `false` means the key was
    /// already present.
    ///
    /// The hint only affects where the search starts, never the result. A hint next to `key` in
    /// sorted order makes the insert constant time; a bad hint costs at most a climb back to an
    /// ancestor that brackets `key`. At the end position the largest key is used as the hint.
    /// Ascending keys inserted one after another through a cursor that started at the end are
    /// each appended in constant time.
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let appending = self.at_last || self.raw.is_end();
        let hint = if self.raw.is_end() {
            self.set.last_raw()
        } else {
            self.raw
        };
        let (raw, inserted) = self.set.insert_from(hint, key, appending);
        // Appending keeps the largest node where it was or hangs a new one off its right.
        self.at_last = appending
            && (hint.is_end() || raw == hint || (raw.parent() == hint && raw.is_right_child()));
        self.raw = raw;
        inserted
    }

    /// Removes the key under the cursor and moves the cursor to the next key (or the end).
    ///
    /// # Errors
    ///
    /// [`CursorError::InvalidCursor`] at the end position. Nothing is removed.
    pub fn remove_current(&mut self) -> Result<K, CursorError> {
        if self.raw.is_end() {
            return Err(CursorError::InvalidCursor);
        }
        // SAFETY: We hold the only borrow of the set and the cursor points at one of its nodes.
        let (key, next) = unsafe { self.set.unlink(self.raw) };
        self.raw = next;
        self.at_last = false;
        Ok(key)
    }
}

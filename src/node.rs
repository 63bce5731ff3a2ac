//! The tree vertex and the raw links between vertices.
//!
//! A [`Node`] owns its children through its `left` and `right` links and only refers back to its
//! parent. Every node is allocated with `Box::new` (in [`Node::new_leaked`]) and freed exactly
//! once, either by [`Node::into_key`] when it is erased or by [`free_subtree`] when a whole tree
//! is torn down.

use std::ptr::NonNull;

/// A nullable pointer to a heap allocated [`Node`]. Whether a `Link` owns its target depends on
/// where it is stored: `left`, `right` and the set's root own, `parent` never does.
pub(crate) struct Link<K>(pub(crate) Option<NonNull<Node<K>>>);

impl<K> Clone for Link<K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for Link<K> {}

impl<K> PartialEq for Link<K> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<K> Eq for Link<K> {}

impl<K> std::fmt::Debug for Link<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(ptr) => write!(f, "Link({:p})", ptr),
            None => f.write_str("Link(None)"),
        }
    }
}

impl<K> Link<K> {
    pub(crate) fn none() -> Self {
        Link(None)
    }

    pub(crate) fn is_none(self) -> bool {
        self.0.is_none()
    }

    pub(crate) fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    pub(crate) fn node(&self) -> Option<&Node<K>> {
        // SAFETY: A non-`None` link always points at a live node of the tree it was read from.
        // Links are only read while that tree is borrowed (see the notes on `RawCursor`), so no
        // `&mut` to the same node can exist at the same time.
        //
        // This isn't the sexiest guarantee but it feels similar to `ManuallyDrop::drop`. It's
        // unsafe to drop it because _later_ it could be dereferenced.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    /// The node with the smallest key in the subtree rooted here.
    pub(crate) fn leftmost(self) -> Self {
        let mut link = self;
        while let Some(left) = link.node().map(|n| n.left).filter(|l| !l.is_none()) {
            link = left;
        }
        link
    }

    /// The node with the largest key in the subtree rooted here.
    pub(crate) fn rightmost(self) -> Self {
        let mut link = self;
        while let Some(right) = link.node().map(|n| n.right).filter(|r| !r.is_none()) {
            link = right;
        }
        link
    }
}

pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) parent: Link<K>,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> Node<K> {
    /// Allocates a childless node hanging off `parent`. The returned pointer owns the allocation
    /// until it is stored in an owning link.
    pub(crate) fn new_leaked(key: K, parent: Link<K>) -> NonNull<Self> {
        NonNull::from(Box::leak(Box::new(Node {
            key,
            parent,
            left: Link::none(),
            right: Link::none(),
        })))
    }

    /// Frees a single node and hands back its key. The node's links are discarded without being
    /// followed.
    ///
    /// # Safety
    ///
    /// `node` must have come from [`Node::new_leaked`], must already be unlinked from its tree
    /// and must never be dereferenced again.
    pub(crate) unsafe fn into_key(node: NonNull<Self>) -> K {
        let node = Box::from_raw(node.as_ptr());
        node.key
    }
}

/// Frees `root` and every node below it, children before parents, returning how many nodes were
/// freed. The walk follows parent links back up so it needs neither recursion nor a stack, which
/// keeps list-shaped trees from overflowing the call stack.
///
/// # Safety
///
/// The caller must own the subtree: nothing outside of it may point into it, and none of its
/// nodes may be dereferenced afterwards.
pub(crate) unsafe fn free_subtree<K>(root: NonNull<Node<K>>) -> usize {
    let mut freed = 0;
    let mut current = root;
    loop {
        let node = current.as_ptr();
        if let Some(left) = (*node).left.take().0 {
            current = left;
            continue;
        }
        if let Some(right) = (*node).right.take().0 {
            current = right;
            continue;
        }

        // Both children are gone, so this is the next node in post-order.
        let parent = (*node).parent.0;
        drop(Box::from_raw(node));
        freed += 1;

        if current == root {
            return freed;
        }
        match parent {
            Some(parent) => current = parent,
            None => unreachable!("Only the subtree root can be missing a parent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds `2 <- 1 -> 3` by hand, returning the root.
    fn three_nodes() -> NonNull<Node<i32>> {
        let root = Node::new_leaked(2, Link::none());
        let left = Node::new_leaked(1, Link(Some(root)));
        let right = Node::new_leaked(3, Link(Some(root)));
        unsafe {
            (*root.as_ptr()).left = Link(Some(left));
            (*root.as_ptr()).right = Link(Some(right));
        }
        root
    }

    #[test]
    fn leftmost_and_rightmost() {
        let root = three_nodes();
        let link = Link(Some(root));

        assert_eq!(link.leftmost().node().map(|n| n.key), Some(1));
        assert_eq!(link.rightmost().node().map(|n| n.key), Some(3));
        assert!(Link::<i32>::none().leftmost().is_none());

        assert_eq!(unsafe { free_subtree(root) }, 3);
    }

    #[test]
    fn free_subtree_of_a_long_chain() {
        // Deep enough that a recursive teardown would be a risk.
        let root = Node::new_leaked(0, Link::none());
        let mut tail = root;
        for key in 1..200_000 {
            let next = Node::new_leaked(key, Link(Some(tail)));
            unsafe { (*tail.as_ptr()).right = Link(Some(next)) };
            tail = next;
        }

        assert_eq!(unsafe { free_subtree(root) }, 200_000);
    }

    #[test]
    fn free_subtree_stops_at_its_root() {
        let root = three_nodes();
        let left = unsafe { (*root.as_ptr()).left.take().0.unwrap() };

        assert_eq!(unsafe { free_subtree(left) }, 1);
        assert_eq!(unsafe { free_subtree(root) }, 2);
    }

    #[test]
    fn into_key_returns_the_key() {
        let node = Node::new_leaked(String::from("key"), Link::none());
        assert_eq!(unsafe { Node::into_key(node) }, "key");
    }
}

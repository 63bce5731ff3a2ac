//! This crate exposes an ordered set built directly on a Binary Search Tree (BST) whose nodes
//! remember their parents.
//!
//! ## Binary Search Tree
//!
//! Every node's left subtree holds only smaller keys and its right subtree only greater ones, so
//! a search follows a single path from the root and costs `O(height)`. Visiting left subtree,
//! node, then right subtree yields the keys in sorted order.
//!
//! ## Parent links and cursors
//!
//! Every `Node` here also points back at its parent. That is enough to find the next or previous
//! key from any node without remembering the path from the root, so a [`Cursor`] is just "the
//! current node". The same cursors drive iteration, lookups and edits: [`CursorMut::insert`]
//! starts its search from wherever the cursor is, which makes inserting next to a known key cheap.
//!
//! The tree is deliberately **not** self-balancing. Keys inserted in sorted order produce a tree
//! of height `N`, and operations on it take `O(N)`.
//!
//! ```
//! use bst_set::OrderedSet;
//!
//! let mut set: OrderedSet<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
//! assert_eq!(set.to_string(), "1 3 4 5 7 8 9");
//!
//! set.erase(&5);
//! assert!(set.find(&5).is_end());
//! assert_eq!(set.to_string(), "1 3 4 7 8 9");
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod cursor;
pub mod error;
mod node;
pub mod set;

pub use cursor::{Cursor, CursorMut, NodeId};
pub use error::CursorError;
pub use set::OrderedSet;

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}

//! This crate exposes an AVL tree: a self-balancing Binary Search Tree storing a set of
//! ordered values.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the
//! longest path from the root `Node` to a leaf `Node`). BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the right subtree.
//!
//! ## AVL
//!
//! An AVL tree caches the height of every `Node` and, after each insert or delete, rotates
//! nodes on the path back to the root so that the heights of any `Node`'s two subtrees differ
//! by at most one. That keeps the height at `O(lg N)` no matter what order values arrive in.
//!
//! ```
//! use avl_tree::Tree;
//!
//! let mut tree = Tree::new();
//! for x in 1..=7 {
//!     tree.insert(x);
//! }
//!
//! // A plain BST would be a 7-level linked list here.
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 7]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod iter;
mod render;

pub use avl::Tree;

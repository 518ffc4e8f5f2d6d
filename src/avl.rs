//! An owned AVL tree. Every `Node` exclusively owns its children through a `Link` and
//! rotations move those boxes around rather than aliasing them.
//!
//! # Examples
//!
//! ```
//! use avl_tree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.search(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.search(&1));
//!
//! // Inserting an equal value does nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Deleting reports whether the value was there.
//! assert!(tree.delete(&1));
//! assert!(!tree.delete(&1));
//! assert!(!tree.search(&1));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::iter::{Edges, Iter, NodeRef};

/// A self-balancing Binary Search Tree (specifically, an AVL tree) holding a set of values.
/// This can be used for inserting, searching for, and deleting values. Equal values are never
/// stored twice.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root.root())
            .finish()
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: Link(None),
            len: 0,
        }
    }

    /// The number of values stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels in the tree. An empty tree has a height of 0 and a tree with a
    /// single value has a height of 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.insert(1);
    /// assert_eq!(tree.height(), 1);
    ///
    /// // Still balanced after three ascending inserts.
    /// tree.insert(2);
    /// tree.insert(3);
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Whether the tree contains a value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let tree: Tree<_> = [10, 5, 15].into_iter().collect();
    ///
    /// assert!(tree.search(&5));
    /// assert!(!tree.search(&100));
    /// ```
    pub fn search(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.root.root().map_or(false, |n| n.search(value))
    }

    /// Inserts `value` into the tree, rebalancing on the way back up. Returns `false`, leaving
    /// the tree untouched, when an equal value is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&1]);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let inserted = self.root.insert(value) != Descent::Duplicate;
        if inserted {
            self.len += 1;
        }

        inserted
    }

    /// Deletes the value equal to `value` from the tree, rebalancing every node on the way back
    /// up. Returns `false` when the tree does not contain the value, in which case nothing
    /// happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut tree: Tree<_> = [10, 5, 15, 2, 7, 20].into_iter().collect();
    ///
    /// assert!(tree.delete(&5));
    /// assert!(!tree.delete(&5));
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![2, 7, 10, 15, 20]);
    /// ```
    pub fn delete(&mut self, value: &T) -> bool
    where
        T: Ord,
    {
        let deleted = self.root.delete(value);
        if deleted {
            self.len -= 1;
        }

        deleted
    }

    /// The smallest value in the tree, if there is one.
    pub fn min(&self) -> Option<&T> {
        self.root.root().map(Node::smallest)
    }

    /// Iterates over the values in ascending order. The iterator is lazy and borrows the tree,
    /// so calling this again starts a fresh traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 2].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// assert_eq!(tree.iter().next(), Some(&1));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.root())
    }

    /// A read-only view of the root node, for walking the shape of the tree. `None` if the tree
    /// is empty.
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.root().map(NodeRef::new)
    }

    /// Every parent to child edge in the tree, parents before their children. Meant for
    /// exporting the tree to a graph renderer.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::iter::Side;
    /// use avl_tree::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// let edges = tree
    ///     .edges()
    ///     .map(|e| (*e.parent, *e.child, e.side))
    ///     .collect::<Vec<_>>();
    ///
    /// assert_eq!(edges, vec![(2, 1, Side::Left), (2, 3, Side::Right)]);
    /// ```
    pub fn edges(&self) -> Edges<'_, T> {
        Edges::new(self.root.root())
    }
}

/// Which way a value went at the node that handled it during an insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Descent {
    /// An equal value was already present so nothing was inserted.
    Duplicate,
    /// The value became a new node right here.
    Here,
    /// The value was inserted into the left subtree.
    Left,
    /// The value was inserted into the right subtree.
    Right,
}

/// An owning, possibly empty, pointer to a subtree.
pub(crate) struct Link<T>(Option<Box<Node<T>>>);

impl<T> Clone for Link<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Link<T> {
    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.0.as_deref()
    }

    fn root_mut(&mut self) -> Option<&mut Node<T>> {
        self.0.as_deref_mut()
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    pub(crate) fn height(&self) -> usize {
        self.root().map_or(0, |n| n.height)
    }

    fn balance_factor(&self) -> isize {
        self.root().map_or(0, Node::balance_factor)
    }

    fn insert(&mut self, value: T) -> Descent
    where
        T: Ord,
    {
        let Some(node) = self.root_mut() else {
            self.0 = Some(Node::new_boxed(value));
            return Descent::Here;
        };

        let (descent, below) = match value.cmp(&node.value) {
            Ordering::Less => (Descent::Left, node.left.insert(value)),
            Ordering::Equal => return Descent::Duplicate,
            Ordering::Greater => (Descent::Right, node.right.insert(value)),
        };
        if below == Descent::Duplicate {
            return Descent::Duplicate;
        }

        self.rebalance_after_insert(below);
        descent
    }

    /// Restores the AVL invariant at this node after an insert into one of its children. `below`
    /// is the direction the value took inside that child, which tells us whether the heavy side
    /// grew on its outside (one rotation) or its inside (two rotations).
    ///
    /// A single insert only ever grows a subtree by one level, so at most one of these cases
    /// can apply.
    fn rebalance_after_insert(&mut self, below: Descent)
    where
        T: Ord,
    {
        let Some(node) = self.root_mut() else {
            return;
        };
        node.fix_height();
        let balance = node.balance_factor();

        match below {
            Descent::Left if balance > 1 => self.rotate_right(),
            Descent::Right if balance > 1 => self.rotate_left_right(),
            Descent::Right if balance < -1 => self.rotate_left(),
            Descent::Left if balance < -1 => self.rotate_right_left(),
            _ => {}
        }

        self.debug_check();
    }

    /// Deletes the value equal to `value` from this subtree. Returns whether anything was
    /// removed.
    fn delete(&mut self, value: &T) -> bool
    where
        T: Ord,
    {
        let Some(node) = self.root_mut() else {
            return false;
        };

        let deleted = match value.cmp(&node.value) {
            Ordering::Less => node.left.delete(value),
            Ordering::Greater => node.right.delete(value),
            Ordering::Equal if node.left.0.is_some() && node.right.0.is_some() => {
                // Move the successor up into this node. Taking it out of the right subtree
                // means the node that actually disappears has at most one child.
                node.value = node
                    .right
                    .delete_smallest()
                    .expect("Right child => smallest value in right subtree");
                true
            }
            Ordering::Equal => {
                let Node { left, right, .. } =
                    *self.0.take().expect("Matched node => non-empty link");
                // At most one of these is non-empty and it's already balanced.
                *self = if left.0.is_some() { left } else { right };
                return true;
            }
        };

        if deleted {
            self.rebalance_after_delete();
        }

        deleted
    }

    /// Removes the smallest node in this subtree and returns its value, rebalancing each node on
    /// the way back up.
    fn delete_smallest(&mut self) -> Option<T>
    where
        T: Ord,
    {
        let node = self.root_mut()?;
        if node.left.0.is_some() {
            let smallest = node.left.delete_smallest();
            self.rebalance_after_delete();
            return smallest;
        }

        let Node { value, right, .. } = *self.0.take()?;
        *self = right;
        Some(value)
    }

    /// Restores the AVL invariant at this node after a delete from one of its children.
    ///
    /// Unlike inserting, we can't tell from the deleted value which side is heavy on the inside
    /// so we look at the taller child's balance factor instead. A delete can shorten every
    /// ancestor, so every node on the path back up goes through here.
    fn rebalance_after_delete(&mut self)
    where
        T: Ord,
    {
        let Some(node) = self.root_mut() else {
            return;
        };
        node.fix_height();
        let balance = node.balance_factor();

        if balance > 1 {
            if node.left.balance_factor() >= 0 {
                self.rotate_right();
            } else {
                self.rotate_left_right();
            }
        } else if balance < -1 {
            if node.right.balance_factor() <= 0 {
                self.rotate_left();
            } else {
                self.rotate_right_left();
            }
        }

        self.debug_check();
    }

    /// In debug builds, check the cached height, the balance factor, and the ordering against
    /// the direct children of this node.
    fn debug_check(&self)
    where
        T: Ord,
    {
        if cfg!(debug_assertions) {
            let Some(root) = self.root() else {
                return;
            };
            let left_height = root.left.height();
            let right_height = root.right.height();
            assert_eq!(root.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);

            if let Some(left) = root.left.root() {
                assert!(left.value < root.value);
            }
            if let Some(right) = root.right.root() {
                assert!(right.value > root.value);
            }
        }
    }

    /// Rotate self to the right. This moves the left child up vertically and self down
    /// vertically. Used to rebalance the tree when the left child is too tall. As such, it must
    /// only be called when there _is_ a left child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///   old_root (i.e. "self")    new_root
    ///    /     \                  /     \
    /// new_root  z     rotate ->  x    old_root
    ///  / \                               /  \
    /// x   y                             y    z
    /// ```
    fn rotate_right(&mut self) {
        let mut old_root = self.0.take().expect("Cannot rotate empty tree/node.");
        let mut new_root = old_root.left.0.take().expect("Rotate right => left child");

        old_root.left = new_root.right.take();
        // The old root is now below the new root so its height has to be right first.
        old_root.fix_height();

        new_root.right = Link(Some(old_root));
        new_root.fix_height();
        self.0 = Some(new_root);
    }

    /// The mirror image of [`Link::rotate_right`].
    fn rotate_left(&mut self) {
        let mut old_root = self.0.take().expect("Cannot rotate empty tree/node.");
        let mut new_root = old_root.right.0.take().expect("Rotate left => right child");

        old_root.right = new_root.left.take();
        old_root.fix_height();

        new_root.left = Link(Some(old_root));
        new_root.fix_height();
        self.0 = Some(new_root);
    }

    fn rotate_right_left(&mut self) {
        self.root_mut()
            .expect("Rotating a tree requires a root")
            .right
            .rotate_right();
        self.rotate_left();
    }

    fn rotate_left_right(&mut self) {
        self.root_mut()
            .expect("Rotating a tree requires a root")
            .left
            .rotate_left();
        self.rotate_right();
    }
}

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    pub(crate) height: usize,
}

impl<T> Clone for Node<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            height: self.height,
            value: self.value.clone(),
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("height", &self.height)
            .field("left", &self.left.root())
            .field("right", &self.right.root())
            .finish()
    }
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Node {
            height: 1,
            value,
            left: Link(None),
            right: Link(None),
        })
    }

    fn search(&self, value: &T) -> bool
    where
        T: Ord,
    {
        match value.cmp(&self.value) {
            Ordering::Less => self.left.root().map_or(false, |n| n.search(value)),
            Ordering::Equal => true,
            Ordering::Greater => self.right.root().map_or(false, |n| n.search(value)),
        }
    }

    /// The smallest value in this subtree, found by following left children to the end.
    fn smallest(&self) -> &T {
        let mut node = self;
        while let Some(left) = node.left.root() {
            node = left;
        }

        &node.value
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = self.left.height().max(self.right.height()) + 1;
    }

    /// The height of the left subtree minus the height of the right subtree. Positive means
    /// left-heavy.
    pub(crate) fn balance_factor(&self) -> isize {
        self.left.height() as isize - self.right.height() as isize
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a set.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same values in both.
    fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, set: &mut BTreeSet<T>)
    where
        T: Ord + Clone,
    {
        for op in ops {
            match op {
                Op::Insert(x) => {
                    assert_eq!(bst.insert(x.clone()), set.insert(x.clone()));
                }
                Op::Remove(x) => {
                    assert_eq!(bst.delete(x), set.remove(x));
                }
                Op::Iter => {
                    assert!(bst.iter().eq(set.iter()));
                }
            }
        }
    }

    /// Checks every node's cached height and balance factor, returning the subtree height.
    fn balanced_height<T>(link: &Link<T>) -> Option<usize> {
        let Some(n) = link.root() else {
            return Some(0);
        };
        let left = balanced_height(&n.left)?;
        let right = balanced_height(&n.right)?;

        let height = left.max(right) + 1;
        (n.height == height && left.abs_diff(right) <= 1).then_some(height)
    }

    /// The worst case height of an AVL tree holding `n` values.
    fn height_bound(n: usize) -> usize {
        (1.44 * ((n + 2) as f64).log2()).ceil() as usize
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            tree.len() == set.len()
                && tree.iter().eq(set.iter())
                && set.iter().all(|x| tree.search(x))
        }
    }

    quickcheck::quickcheck! {
        fn stays_balanced(ops: Vec<Op<i16>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            balanced_height(&tree.root) == Some(tree.height())
                && tree.height() <= height_bound(tree.len())
        }
    }

    quickcheck::quickcheck! {
        fn in_order_is_strictly_ascending(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
            let mut tree: Tree<_> = xs.into_iter().collect();
            for x in &deletes {
                tree.delete(x);
            }

            let values = tree.iter().collect::<Vec<_>>();
            values.windows(2).all(|w| w[0] < w[1])
        }
    }

    quickcheck::quickcheck! {
        fn insert_twice_matches_insert_once(xs: Vec<i8>) -> bool {
            let once: Tree<_> = xs.iter().copied().collect();
            let twice: Tree<_> = xs.iter().chain(xs.iter()).copied().collect();

            once.iter().eq(twice.iter()) && once.len() == twice.len()
        }
    }
}

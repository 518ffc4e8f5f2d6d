//! Read-only ways of walking a [`Tree`][crate::Tree]: ascending iteration over its values, and
//! a structural view of its nodes for anything that wants to draw the tree.

use std::iter::FusedIterator;

use crate::avl::Node;

/// Iterator over the values of a tree in ascending order. Created by
/// [`Tree::iter`][crate::Tree::iter].
pub struct Iter<'a, T> {
    // Nodes whose left subtree has been visited but who haven't been yielded yet. The top of
    // the stack is always the next value.
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.root();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.root());
        Some(&node.value)
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// A borrowed view of one node in a tree. This only exposes what is needed to draw the tree and
/// can't be used to change it.
pub struct NodeRef<'a, T> {
    node: &'a Node<T>,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(node: &'a Node<T>) -> Self {
        Self { node }
    }

    pub(crate) fn node(&self) -> &'a Node<T> {
        self.node
    }

    /// The value stored in this node.
    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    /// The left child, holding smaller values.
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.node.left.root().map(Self::new)
    }

    /// The right child, holding larger values.
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.node.right.root().map(Self::new)
    }

    /// How many levels are in the subtree rooted at this node. A node with no children has a
    /// height of 1.
    pub fn height(&self) -> usize {
        self.node.height
    }

    /// The height of the left subtree minus the height of the right subtree. Always in
    /// `-1..=1`.
    pub fn balance_factor(&self) -> isize {
        self.node.balance_factor()
    }
}

/// Which child of its parent a node is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The child holding smaller values.
    Left,
    /// The child holding larger values.
    Right,
}

/// A parent to child link in a tree.
#[derive(Debug, PartialEq, Eq)]
pub struct Edge<'a, T> {
    /// The value of the parent node.
    pub parent: &'a T,
    /// The value of the child node.
    pub child: &'a T,
    /// Which of the parent's children `child` is.
    pub side: Side,
}

impl<'a, T> Clone for Edge<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for Edge<'a, T> {}

/// Iterator over every edge of a tree, depth first, with the edges to a node's left child
/// before those to its right. Created by [`Tree::edges`][crate::Tree::edges].
pub struct Edges<'a, T> {
    // Paired with the child node so we don't have to look it up again when descending.
    stack: Vec<(Edge<'a, T>, &'a Node<T>)>,
}

impl<'a, T> Edges<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        let mut edges = Self { stack: Vec::new() };
        if let Some(root) = root {
            edges.push_children(root);
        }
        edges
    }

    fn push_children(&mut self, parent: &'a Node<T>) {
        // Right goes on first so that left comes off first.
        let children = [(Side::Right, parent.right.root()), (Side::Left, parent.left.root())];
        for (side, child) in children {
            if let Some(child) = child {
                let edge = Edge {
                    parent: &parent.value,
                    child: &child.value,
                    side,
                };
                self.stack.push((edge, child));
            }
        }
    }
}

impl<'a, T> Iterator for Edges<'a, T> {
    type Item = Edge<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let (edge, child) = self.stack.pop()?;
        self.push_children(child);
        Some(edge)
    }
}

impl<'a, T> FusedIterator for Edges<'a, T> {}

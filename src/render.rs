use std::fmt;

use crate::avl::Node;
use crate::Tree;

const INDENT: &str = "    ";

/// Draws the tree on its side: the root in the first column, right subtrees above their parent,
/// left subtrees below, and one level of indentation per level of depth. An empty tree draws
/// nothing.
///
/// ```
/// use avl_tree::Tree;
///
/// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
///
/// assert_eq!(tree.to_string(), "    3\n2\n    1\n");
/// ```
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => write_sideways(f, root.node(), 0),
            None => Ok(()),
        }
    }
}

fn write_sideways<T>(f: &mut fmt::Formatter<'_>, node: &Node<T>, depth: usize) -> fmt::Result
where
    T: fmt::Display,
{
    if let Some(right) = node.right.root() {
        write_sideways(f, right, depth + 1)?;
    }
    writeln!(f, "{}{}", INDENT.repeat(depth), node.value)?;
    if let Some(left) = node.left.root() {
        write_sideways(f, left, depth + 1)?;
    }

    Ok(())
}

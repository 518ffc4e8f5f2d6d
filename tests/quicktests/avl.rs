use avl_tree::Tree;

use std::collections::{BTreeSet, HashSet};

use quickcheck_macros::quickcheck;

use crate::Op;

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
                bst.insert(x.clone());
                set.insert(x.clone());
            }
            Op::Remove(x) => {
                bst.delete(x);
                set.remove(x);
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.iter().eq(set.iter()) && tree.len() == set.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.search(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.search(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| !tree.search(x)) && still_present.iter().all(|x| tree.search(x))
}

#[quickcheck]
fn deleting_k_of_n_leaves_n_minus_k(xs: HashSet<i16>, k: usize) -> bool {
    let xs = xs.into_iter().collect::<Vec<_>>();
    let k = if xs.is_empty() { 0 } else { k % (xs.len() + 1) };
    let mut tree: Tree<_> = xs.iter().copied().collect();

    for x in &xs[..k] {
        tree.delete(x);
    }

    tree.iter().count() == xs.len() - k && tree.len() == xs.len() - k
}

#[quickcheck]
fn round_trip(xs: Vec<i8>, x: i8) -> bool {
    let mut tree: Tree<_> = xs.into_iter().collect();

    tree.insert(x);
    let found = tree.search(&x);
    tree.delete(&x);

    found && !tree.search(&x)
}

#[quickcheck]
fn every_node_is_balanced(xs: Vec<i16>, deletes: Vec<i16>) -> bool {
    let mut tree: Tree<_> = xs.into_iter().collect();
    for x in &deletes {
        tree.delete(x);
    }

    let mut stack = tree.root().into_iter().collect::<Vec<_>>();
    while let Some(node) = stack.pop() {
        if node.balance_factor().abs() > 1 {
            return false;
        }
        stack.extend(node.left());
        stack.extend(node.right());
    }

    true
}

#[quickcheck]
fn edges_link_every_node_once(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    let children = tree.edges().map(|e| *e.child).collect::<HashSet<_>>();

    // Every node but the root is some node's child, exactly once.
    tree.edges().count() == tree.len().saturating_sub(1)
        && children.len() == tree.edges().count()
        && tree.root().map_or(true, |root| !children.contains(root.value()))
}

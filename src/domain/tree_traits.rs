//! Box-drawing rendering of trees via `termtree`.

use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::domain::ordered_tree::{OrderedTree, TreeNode};

/// Placeholder for the missing child of a node with exactly one child.
pub const EMPTY_CHILD: &str = "∅";

/// Box-drawing conversion.
///
/// The result nests one `Tree` per level, and termtree's own `Display` and
/// `Drop` recurse over that nesting. Callers rendering arbitrary input should
/// bound [`OrderedTree::depth`] first.
pub trait TreeDisplay {
    fn to_termtree(&self) -> Tree<String>;
}

impl<T: Display> TreeDisplay for OrderedTree<T> {
    #[instrument(level = "debug", skip(self))]
    fn to_termtree(&self) -> Tree<String> {
        match self.root_node() {
            Some(root) => build_tree(root),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

// Post-order with an explicit stack: children are finished before their
// parent pops them off `built`. Children are listed left then right; leaves
// get no placeholder rows.
fn build_tree<T: Display>(root: &TreeNode<T>) -> Tree<String> {
    let mut pending: Vec<(&TreeNode<T>, bool)> = vec![(root, false)];
    let mut built: Vec<Tree<String>> = Vec::new();

    while let Some((node, expanded)) = pending.pop() {
        if !expanded {
            pending.push((node, true));
            // left is pushed last so it is finished first
            pending.extend(node.right().map(|child| (child, false)));
            pending.extend(node.left().map(|child| (child, false)));
            continue;
        }

        let tree = Tree::new(node.value().to_string());
        if node.is_leaf() {
            built.push(tree);
            continue;
        }

        let mut take_child = |child: Option<&TreeNode<T>>| match child {
            Some(_) => built.pop(),
            None => Some(Tree::new(EMPTY_CHILD.to_string())),
        };
        let right = take_child(node.right());
        let left = take_child(node.left());
        built.push(tree.with_leaves(left.into_iter().chain(right)));
    }

    built
        .pop()
        .unwrap_or_else(|| Tree::new(root.value().to_string()))
}

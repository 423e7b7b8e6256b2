//! Unbalanced binary search tree with an explicit-stack in-order iterator.
//!
//! Values smaller than a node go left, everything else (ties included) goes
//! right, so duplicates are kept as distinct nodes in insertion order.
//! Nothing is ever removed or rebalanced.

use std::cmp::Ordering;
use std::fmt;
use std::iter::{self, FusedIterator};

use tracing::instrument;

use crate::domain::error::{ContainerError, ContainerResult};

/// Node exclusively owning its two subtrees.
#[derive(Debug)]
pub struct TreeNode<T> {
    value: T,
    left: Option<Box<TreeNode<T>>>,
    right: Option<Box<TreeNode<T>>>,
}

impl<T> TreeNode<T> {
    fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Subtree of values strictly less than this node's value.
    pub fn left(&self) -> Option<&TreeNode<T>> {
        self.left.as_deref()
    }

    /// Subtree of values greater than or equal to this node's value.
    pub fn right(&self) -> Option<&TreeNode<T>> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Binary search tree over a totally ordered `T`.
///
/// No internal locking: sharing a tree between threads needs external
/// mutual exclusion.
#[derive(Debug)]
pub struct OrderedTree<T> {
    root: Option<Box<TreeNode<T>>>,
    len: usize,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedTree<T> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&T> {
        self.root.as_deref().map(TreeNode::value)
    }

    pub fn root_node(&self) -> Option<&TreeNode<T>> {
        self.root.as_deref()
    }

    /// Fresh in-order traversal, primed with the root and its left spine.
    ///
    /// The iterator borrows the tree, so the tree cannot be modified while
    /// a traversal is alive:
    ///
    /// ```compile_fail
    /// use gencoll::domain::OrderedTree;
    ///
    /// let mut tree: OrderedTree<i32> = [2, 1, 3].into_iter().collect();
    /// let mut iter = tree.iter();
    /// tree.insert(4);
    /// iter.next();
    /// ```
    #[instrument(level = "trace", skip(self), fields(len = self.len))]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Number of levels; 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&TreeNode<T>, usize)> =
            self.root.as_deref().map(|root| (root, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in [node.left(), node.right()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }

        max_depth
    }

    /// Values of childless nodes, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self) -> Vec<&T> {
        let mut leaves = Vec::new();
        let mut stack: Vec<&TreeNode<T>> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                leaves.push(&node.value);
            } else {
                // right first so the left subtree is visited first
                stack.extend(node.right());
                stack.extend(node.left());
            }
        }

        leaves
    }
}

impl<T: Ord> OrderedTree<T> {
    #[instrument(level = "trace", skip(self, value), fields(len = self.len))]
    pub fn insert(&mut self, value: T) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if value < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Box::new(TreeNode::leaf(value)));
        self.len += 1;
    }

    pub fn contains(&self, value: &T) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right(),
            };
        }
        false
    }
}

impl<T: fmt::Display> OrderedTree<T> {
    /// Sideways rendering with the default indent width of 4.
    pub fn pretty_print(&self) -> String {
        self.pretty_print_with(4)
    }

    /// Right subtree above its parent, left subtree below, one node per line
    /// indented by `indent * depth` spaces and prefixed with `-> `.
    ///
    /// Walks with an explicit stack, so degenerate trees render without
    /// recursion. Output size grows with `indent * depth` per line.
    #[instrument(level = "debug", skip(self))]
    pub fn pretty_print_with(&self, indent: usize) -> String {
        let mut out = String::new();
        // (node, level, expanded): an expanded node is emitted when popped
        let mut stack: Vec<(&TreeNode<T>, usize, bool)> = self
            .root
            .as_deref()
            .map(|root| (root, 0, false))
            .into_iter()
            .collect();

        while let Some((node, level, expanded)) = stack.pop() {
            if expanded {
                out.extend(iter::repeat(' ').take(level.saturating_mul(indent)));
                out.push_str("-> ");
                out.push_str(&node.value.to_string());
                out.push('\n');
                continue;
            }
            // pushed in reverse: right subtree, node, left subtree
            if let Some(left) = node.left() {
                stack.push((left, level + 1, false));
            }
            stack.push((node, level, true));
            if let Some(right) = node.right() {
                stack.push((right, level + 1, false));
            }
        }

        out
    }
}

impl<T> Drop for OrderedTree<T> {
    // Unlinks nodes one by one so skewed trees do not recurse per level.
    fn drop(&mut self) {
        let mut stack: Vec<Box<TreeNode<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T: Ord> Extend<T> for OrderedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Traversal state of an [`Iter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterState {
    /// The stack top is the next value to emit.
    Primed,
    /// Terminal: the stack is empty.
    Exhausted,
}

/// Single-pass in-order traversal over a borrowed [`OrderedTree`].
///
/// The stack holds the ancestors still to be visited; its top is always the
/// next value in order.
#[derive(Debug)]
pub struct Iter<'a, T> {
    stack: Vec<&'a TreeNode<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a TreeNode<T>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.lean_left(root);
        iter
    }

    /// Push `node` and all of its left descendants.
    fn lean_left(&mut self, mut node: Option<&'a TreeNode<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }

    pub fn has_next(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn state(&self) -> IterState {
        if self.has_next() {
            IterState::Primed
        } else {
            IterState::Exhausted
        }
    }

    /// Next value in order, or `EndOfIteration` once exhausted.
    pub fn try_next(&mut self) -> ContainerResult<&'a T> {
        self.next().ok_or(ContainerError::EndOfIteration)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.lean_left(node.right());
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrderedTree<i32> {
        [5, 3, 7, 2, 4, 6, 8].into_iter().collect()
    }

    #[test]
    fn given_sample_values_when_iterating_then_ascending_order() {
        let tree = sample();
        let values: Vec<_> = tree.iter().copied().collect();
        assert_eq!(values, vec![2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn given_duplicates_when_inserting_then_ties_go_right() {
        let tree: OrderedTree<i32> = [5, 5, 3].into_iter().collect();

        let root = tree.root_node().expect("root");
        assert_eq!(*root.value(), 5);
        assert_eq!(root.right().map(TreeNode::value), Some(&5));
        assert_eq!(root.left().map(TreeNode::value), Some(&3));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![3, 5, 5]);
    }

    #[test]
    fn given_empty_tree_when_iterating_then_exhausted_immediately() {
        let tree: OrderedTree<i32> = OrderedTree::new();
        let mut iter = tree.iter();

        assert!(!iter.has_next());
        assert_eq!(iter.state(), IterState::Exhausted);
        assert_eq!(iter.try_next(), Err(ContainerError::EndOfIteration));
    }

    #[test]
    fn given_primed_iterator_when_stepping_then_stack_top_is_next_value() {
        let tree = sample();
        let mut iter = tree.iter();

        // root and its left spine: 5, 3, 2
        assert_eq!(iter.stack.len(), 3);
        assert_eq!(iter.state(), IterState::Primed);
        assert_eq!(iter.try_next(), Ok(&2));
        assert_eq!(iter.try_next(), Ok(&3));
        // popping 3 re-primes from 4
        assert_eq!(iter.stack.last().map(|n| n.value), Some(4));
    }

    #[test]
    fn given_last_value_when_stepping_then_transitions_to_exhausted() {
        let tree: OrderedTree<i32> = [1].into_iter().collect();
        let mut iter = tree.iter();
        assert_eq!(iter.state(), IterState::Primed);
        assert_eq!(iter.try_next(), Ok(&1));
        assert_eq!(iter.state(), IterState::Exhausted);
        assert_eq!(iter.try_next(), Err(ContainerError::EndOfIteration));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn given_sample_tree_when_pretty_printing_then_right_above_left() {
        let tree: OrderedTree<i32> = [5, 3, 7].into_iter().collect();
        assert_eq!(tree.pretty_print(), "    -> 7\n-> 5\n    -> 3\n");
        assert_eq!(tree.pretty_print_with(2), "  -> 7\n-> 5\n  -> 3\n");
    }

    #[test]
    fn given_degenerate_tree_when_pretty_printing_then_no_recursion() {
        // deeper than the old u16 width limit at indent 4
        let tree: OrderedTree<u32> = (0..30_000).collect();

        // indent 0 keeps output linear in the node count
        let rendered = tree.pretty_print_with(0);

        assert_eq!(rendered.lines().count(), 30_000);
        assert_eq!(rendered.lines().next(), Some("-> 29999"));
        assert_eq!(rendered.lines().last(), Some("-> 0"));
    }

    #[test]
    fn given_indent_wider_than_u16_when_pretty_printing_then_exact_padding() {
        let tree: OrderedTree<u32> = [1, 2, 3].into_iter().collect();

        let rendered = tree.pretty_print_with(40_000);

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 80_000 + "-> 3".len());
        assert!(lines[0].ends_with(" -> 3"));
        assert_eq!(lines[1].len(), 40_000 + "-> 2".len());
        assert_eq!(lines[2], "-> 1");
    }

    #[test]
    fn given_empty_tree_when_pretty_printing_then_empty_string() {
        let tree: OrderedTree<i32> = OrderedTree::new();
        assert_eq!(tree.pretty_print(), "");
        assert_eq!(tree.depth(), 0);
        assert!(tree.leaves().is_empty());
    }

    #[test]
    fn given_sample_tree_when_measuring_then_depth_and_leaves_match() {
        let tree = sample();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaves(), vec![&2, &4, &6, &8]);
        assert!(tree.contains(&6));
        assert!(!tree.contains(&9));
    }

    #[test]
    fn given_skewed_tree_when_dropping_then_no_stack_overflow() {
        let tree: OrderedTree<u32> = (0..30_000).collect();
        assert_eq!(tree.len(), 30_000);
        assert_eq!(tree.depth(), 30_000);
        drop(tree);
    }
}

//! Bound queries for the tree engine.
//!
//! Each query is an iterative descent that remembers the best candidate seen so
//! far and falls back to the end position when nothing qualifies.

use crate::comparator::Comparator;
use crate::iteration::Cursor;
use crate::types::{NodeId, RbTree, END_NODE, NULL_NODE};
use std::cmp::Ordering;

// ============================================================================
// BOUND QUERY OPERATIONS
// ============================================================================

impl<K, V, C: Comparator<K>> RbTree<K, V, C> {
    /// Leftmost node whose key is `>= key`.
    pub(crate) fn lower_bound_node(&self, key: &K) -> NodeId {
        let mut current = self.header.root;
        let mut best = END_NODE;
        while current != NULL_NODE {
            match self.cmp.compare(&self.node(current).key, key) {
                Ordering::Less => current = self.right(current),
                Ordering::Greater => {
                    best = current;
                    current = self.left(current);
                }
                Ordering::Equal => return current,
            }
        }
        best
    }

    /// Leftmost node whose key is `> key`.
    pub(crate) fn upper_bound_node(&self, key: &K) -> NodeId {
        let mut current = self.header.root;
        let mut best = END_NODE;
        while current != NULL_NODE {
            if self.cmp.compare(&self.node(current).key, key) == Ordering::Greater {
                best = current;
                current = self.left(current);
            } else {
                current = self.right(current);
            }
        }
        best
    }

    /// Rightmost node whose key is `<= key`.
    pub(crate) fn reverse_lower_bound_node(&self, key: &K) -> NodeId {
        let mut current = self.header.root;
        let mut best = END_NODE;
        while current != NULL_NODE {
            match self.cmp.compare(&self.node(current).key, key) {
                Ordering::Less => {
                    best = current;
                    current = self.right(current);
                }
                Ordering::Greater => current = self.left(current),
                Ordering::Equal => return current,
            }
        }
        best
    }

    /// Rightmost node whose key is `< key`.
    pub(crate) fn reverse_upper_bound_node(&self, key: &K) -> NodeId {
        let mut current = self.header.root;
        let mut best = END_NODE;
        while current != NULL_NODE {
            if self.cmp.compare(&self.node(current).key, key) == Ordering::Less {
                best = current;
                current = self.right(current);
            } else {
                current = self.left(current);
            }
        }
        best
    }

    /// Cursor at the first element not less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treeify::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// for (k, v) in [(1, 'a'), (3, 'b'), (5, 'c')] {
    ///     tree.set(k, v, None);
    /// }
    /// let cursor = tree.lower_bound(&4);
    /// assert_eq!(tree.key_at(&cursor), Ok(&5));
    /// assert!(tree.lower_bound(&6).is_end());
    /// ```
    pub fn lower_bound(&self, key: &K) -> Cursor {
        self.cursor_at(self.lower_bound_node(key))
    }

    /// Cursor at the first element greater than `key`.
    pub fn upper_bound(&self, key: &K) -> Cursor {
        self.cursor_at(self.upper_bound_node(key))
    }

    /// Cursor at the last element not greater than `key`.
    pub fn reverse_lower_bound(&self, key: &K) -> Cursor {
        self.cursor_at(self.reverse_lower_bound_node(key))
    }

    /// Cursor at the last element less than `key`.
    pub fn reverse_upper_bound(&self, key: &K) -> Cursor {
        self.cursor_at(self.reverse_upper_bound_node(key))
    }
}

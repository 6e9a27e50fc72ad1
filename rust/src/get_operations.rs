//! GET operations for the tree engine.
//!
//! Key lookup, positional access, extremes, and in-place key updates through a
//! cursor.

use crate::comparator::Comparator;
use crate::error::{ContainerError, ContainerResult, PositionResult};
use crate::iteration::Cursor;
use crate::types::{NodeId, RbTree, END_NODE, NULL_NODE};
use std::cmp::Ordering;

impl<K, V, C: Comparator<K>> RbTree<K, V, C> {
    // ============================================================================
    // KEY LOOKUP
    // ============================================================================

    /// Node holding `key`, or `NULL_NODE`.
    pub(crate) fn find_node(&self, key: &K) -> NodeId {
        let mut current = self.header.root;
        while current != NULL_NODE {
            match self.cmp.compare(&self.node(current).key, key) {
                Ordering::Less => current = self.right(current),
                Ordering::Greater => current = self.left(current),
                Ordering::Equal => return current,
            }
        }
        NULL_NODE
    }

    /// Get a reference to the value associated with a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use treeify::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.set(1, "one", None);
    /// assert_eq!(tree.get(&1), Some(&"one"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let id = self.find_node(key);
        (id != NULL_NODE).then(|| &self.node(id).value)
    }

    /// Get a mutable reference to the value for a key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find_node(key);
        if id == NULL_NODE {
            return None;
        }
        Some(&mut self.node_mut(id).value)
    }

    /// Check if key exists in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find_node(key) != NULL_NODE
    }

    /// Cursor at `key`, or the end cursor when absent.
    pub fn find(&self, key: &K) -> Cursor {
        let id = self.find_node(key);
        self.cursor_at(if id == NULL_NODE { END_NODE } else { id })
    }

    /// Change the key under `cursor` without restructuring.
    ///
    /// The new key must sort strictly between the element's neighbours; otherwise
    /// nothing changes and `Ok(false)` is returned.
    ///
    /// # Errors
    ///
    /// `InvalidIterator` for an end, stale or foreign cursor.
    pub fn update_key_by_cursor(&mut self, cursor: &Cursor, key: K) -> ContainerResult<bool> {
        self.validate_cursor(cursor)?;
        let id = cursor.node;
        if id == END_NODE {
            return Err(ContainerError::end_cursor("update key"));
        }

        let pre = self.predecessor(id);
        if pre != END_NODE && self.cmp.compare(&self.node(pre).key, &key) != Ordering::Less {
            return Ok(false);
        }
        let next = self.successor(id);
        if next != END_NODE && self.cmp.compare(&self.node(next).key, &key) != Ordering::Greater {
            return Ok(false);
        }
        self.node_mut(id).key = key;
        Ok(true)
    }
}

impl<K, V, C> RbTree<K, V, C> {
    // ============================================================================
    // POSITIONAL ACCESS
    // ============================================================================

    /// Node at in-order position `pos`. Walks from the minimum: O(n).
    pub(crate) fn node_at_pos(&self, pos: usize) -> PositionResult<NodeId> {
        if pos >= self.len {
            return Err(ContainerError::position_out_of_range(pos, self.len));
        }
        let mut id = self.header.leftmost;
        for _ in 0..pos {
            id = self.successor(id);
        }
        Ok(id)
    }

    /// Element at in-order position `pos`. O(n).
    pub fn get_by_pos(&self, pos: usize) -> PositionResult<(&K, &V)> {
        let id = self.node_at_pos(pos)?;
        let node = self.node(id);
        Ok((&node.key, &node.value))
    }

    // ============================================================================
    // EXTREMES
    // ============================================================================

    /// Smallest element.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.arena
            .get(self.header.leftmost)
            .map(|node| (&node.key, &node.value))
    }

    /// Largest element.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.arena
            .get(self.header.rightmost)
            .map(|node| (&node.key, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use crate::comparator::NaturalOrder;
    use crate::types::RbTree;

    fn sample() -> RbTree<i32, &'static str> {
        RbTree::from_pairs(vec![(1, "a"), (3, "b"), (5, "c")], NaturalOrder)
    }

    #[test]
    fn test_get_and_contains() {
        let mut tree = sample();
        assert_eq!(tree.get(&3), Some(&"b"));
        assert!(tree.contains_key(&5));
        assert!(!tree.contains_key(&4));
        *tree.get_mut(&5).unwrap() = "z";
        assert_eq!(tree.get(&5), Some(&"z"));
    }

    #[test]
    fn test_find_missing_is_end() {
        let tree = sample();
        assert!(tree.find(&2).is_end());
        assert_eq!(tree.key_at(&tree.find(&1)), Ok(&1));
    }

    #[test]
    fn test_positional_access() {
        let tree = sample();
        assert_eq!(tree.get_by_pos(0), Ok((&1, &"a")));
        assert_eq!(tree.get_by_pos(2), Ok((&5, &"c")));
        assert!(tree.get_by_pos(3).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_update_key_respects_neighbours() {
        let mut tree = sample();
        let cursor = tree.find(&3);
        assert_eq!(tree.update_key_by_cursor(&cursor, 4), Ok(true));
        assert_eq!(tree.get(&4), Some(&"b"));
        assert_eq!(tree.update_key_by_cursor(&cursor, 5), Ok(false));
        assert_eq!(tree.update_key_by_cursor(&cursor, 0), Ok(false));

        let first = tree.begin();
        assert_eq!(tree.update_key_by_cursor(&first, -10), Ok(true));
        assert_eq!(tree.front(), Some((&-10, &"a")));
        assert!(tree.check_invariants());

        let end = tree.end();
        assert!(tree.update_key_by_cursor(&end, 9).unwrap_err().is_invalid_iterator());
    }
}

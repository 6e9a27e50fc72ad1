//! DELETE operations for the tree engine.
//!
//! Erase moves the doomed payload down to a childless node by swapping key and
//! value with a neighbour, rebalances around that node, then unlinks it. Node
//! identity stays put while payloads move, so a node id that held the successor
//! may afterwards hold a different element.

use crate::comparator::Comparator;
use crate::error::{ContainerError, ContainerResult, PositionResult};
use crate::iteration::{Cursor, Direction};
use crate::types::{Color, NodeId, RbTree, END_NODE, NULL_NODE};

impl<K, V, C> RbTree<K, V, C> {
    /// Remove the element held by `id` and hand back its key and value.
    ///
    /// `follow` names a node whose payload the caller wants to keep track of; the
    /// returned id is the node holding that payload after the erase (`END_NODE`
    /// stays `END_NODE`).
    pub(crate) fn erase_node(&mut self, id: NodeId, follow: NodeId) -> (NodeId, K, V) {
        if self.len == 1 {
            let removed = self.arena.deallocate(id);
            self.clear();
            return match removed {
                Some(node) => (END_NODE, node.key, node.value),
                None => panic!("erase of vacant node {}", id),
            };
        }

        let mut follow = follow;
        let mut current = id;
        loop {
            let right = self.right(current);
            let left = self.left(current);
            let swap = if right != NULL_NODE {
                self.minimum(right)
            } else if left != NULL_NODE {
                left
            } else {
                break;
            };
            self.swap_payload(current, swap);
            if follow == swap {
                follow = current;
            }
            current = swap;
        }

        if self.header.leftmost == current {
            self.header.leftmost = self.parent(current);
        } else if self.header.rightmost == current {
            self.header.rightmost = self.parent(current);
        }

        self.erase_fixup(current);
        self.unlink(current);
        let removed = self.arena.deallocate(current);
        self.len -= 1;
        self.stamp += 1;
        let root = self.header.root;
        self.set_color(root, Color::Black);
        match removed {
            Some(node) => (follow, node.key, node.value),
            None => panic!("erase of vacant node {}", current),
        }
    }

    fn swap_payload(&mut self, a: NodeId, b: NodeId) {
        if let Some((x, y)) = self.arena.get_pair_mut(a, b) {
            std::mem::swap(&mut x.key, &mut y.key);
            std::mem::swap(&mut x.value, &mut y.value);
        }
    }

    /// Resolve the black deficit left by removing the childless node `node`.
    pub(crate) fn erase_fixup(&mut self, mut node: NodeId) {
        loop {
            let parent = self.parent(node);
            if parent == NULL_NODE {
                return;
            }
            if self.is_red(node) {
                self.set_color(node, Color::Black);
                return;
            }

            let node_is_left = self.left(parent) == node;
            let sibling = if node_is_left {
                self.right(parent)
            } else {
                self.left(parent)
            };

            if self.is_red(sibling) {
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                if node_is_left {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                continue;
            }

            let (far, near) = if node_is_left {
                (self.right(sibling), self.left(sibling))
            } else {
                (self.left(sibling), self.right(sibling))
            };

            if self.is_red(far) {
                let parent_color = self.node(parent).color;
                self.set_color(sibling, parent_color);
                self.set_color(parent, Color::Black);
                self.set_color(far, Color::Black);
                if node_is_left {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                return;
            }

            if self.is_red(near) {
                self.set_color(sibling, Color::Red);
                self.set_color(near, Color::Black);
                if node_is_left {
                    self.rotate_right(sibling);
                } else {
                    self.rotate_left(sibling);
                }
                continue;
            }

            self.set_color(sibling, Color::Red);
            node = parent;
        }
    }

    /// Erase the element at in-order position `pos`. O(n).
    pub fn erase_by_pos(&mut self, pos: usize) -> PositionResult<(K, V)> {
        let id = self.node_at_pos(pos)?;
        let (_, key, value) = self.erase_node(id, END_NODE);
        Ok((key, value))
    }

    /// Erase the element under `cursor` and return a cursor to the element that
    /// followed it in the cursor's direction.
    ///
    /// # Errors
    ///
    /// `InvalidIterator` if the cursor is at the end, stale, or from another tree.
    pub fn erase_by_cursor(&mut self, cursor: &Cursor) -> ContainerResult<Cursor> {
        self.validate_cursor(cursor)?;
        if cursor.node == END_NODE {
            return Err(ContainerError::end_cursor("erase"));
        }
        let following = match cursor.direction {
            Direction::Forward => self.successor(cursor.node),
            Direction::Reverse => self.predecessor(cursor.node),
        };
        let (node, _, _) = self.erase_node(cursor.node, following);
        Ok(self.make_cursor(node, cursor.direction))
    }
}

impl<K, V, C: Comparator<K>> RbTree<K, V, C> {
    /// Remove `key` and return its value. Absent keys leave the tree untouched.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove `key` and return the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let id = self.find_node(key);
        if id == NULL_NODE {
            return None;
        }
        let (_, key, value) = self.erase_node(id, END_NODE);
        Some((key, value))
    }

    /// Remove `key`; returns whether it was present.
    pub fn erase_key(&mut self, key: &K) -> bool {
        let id = self.find_node(key);
        if id == NULL_NODE {
            return false;
        }
        self.erase_node(id, END_NODE);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::comparator::NaturalOrder;
    use crate::types::RbTree;

    fn tree_of(keys: impl IntoIterator<Item = i32>) -> RbTree<i32, i32> {
        RbTree::from_pairs(keys.into_iter().map(|k| (k, k * 10)), NaturalOrder)
    }

    #[test]
    fn test_erase_every_key_in_insertion_order() {
        let mut tree = tree_of(0..200);
        for k in 0..200 {
            assert!(tree.erase_key(&k));
            assert!(tree.check_invariants_detailed().is_ok(), "after erasing {}", k);
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn test_erase_interleaved_keeps_invariants() {
        let mut tree = tree_of(0..300);
        for k in (0..300).filter(|k| k % 3 == 1) {
            assert_eq!(tree.remove(&k), Some(k * 10));
            assert!(tree.check_invariants_detailed().is_ok());
        }
        assert_eq!(tree.len(), 200);
        assert_eq!(tree.front(), Some((&0, &0)));
        assert_eq!(tree.back(), Some((&299, &2990)));
    }

    #[test]
    fn test_erase_missing_key_is_noop() {
        let mut tree = tree_of([1, 2, 3]);
        assert!(!tree.erase_key(&9));
        assert_eq!(tree.remove(&0), None);
        assert_eq!(tree.len(), 3);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_erase_extremes_updates_cache() {
        let mut tree = tree_of([5, 3, 8, 1, 4, 9]);
        tree.erase_key(&1);
        assert_eq!(tree.front(), Some((&3, &30)));
        tree.erase_key(&9);
        assert_eq!(tree.back(), Some((&8, &80)));
        tree.erase_key(&3);
        tree.erase_key(&8);
        assert_eq!(tree.front(), Some((&4, &40)));
        assert_eq!(tree.back(), Some((&5, &50)));
    }

    #[test]
    fn test_erase_last_element_clears() {
        let mut tree = tree_of([7]);
        assert!(tree.erase_key(&7));
        assert!(tree.is_empty());
        assert_eq!(tree.front(), None);
        assert!(tree.begin().is_end());
    }

    #[test]
    fn test_erase_by_cursor_returns_following_element() {
        let mut tree = tree_of([10, 20, 30, 40, 50]);
        let cursor = tree.find(&30);
        let next = tree.erase_by_cursor(&cursor).unwrap();
        assert_eq!(tree.key_at(&next), Ok(&40));

        let mut rcursor = tree.rbegin();
        tree.move_next(&mut rcursor).unwrap();
        assert_eq!(tree.key_at(&rcursor), Ok(&40));
        let rnext = tree.erase_by_cursor(&rcursor).unwrap();
        assert_eq!(tree.key_at(&rnext), Ok(&20));

        let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![10, 20, 50]);
    }

    #[test]
    fn test_erase_by_cursor_rejects_end_and_stale() {
        let mut tree = tree_of([1, 2, 3]);
        let end = tree.end();
        assert!(tree.erase_by_cursor(&end).unwrap_err().is_invalid_iterator());

        let stale = tree.find(&2);
        tree.set(4, 40, None);
        assert!(tree.erase_by_cursor(&stale).unwrap_err().is_invalid_iterator());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_erase_by_pos() {
        let mut tree = tree_of([5, 1, 3]);
        assert_eq!(tree.erase_by_pos(1), Ok((3, 30)));
        assert!(tree.erase_by_pos(2).unwrap_err().is_out_of_range());
        assert_eq!(tree.len(), 2);
    }
}

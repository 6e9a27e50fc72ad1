//! Validation and debugging utilities for the tree engine.
//!
//! Invariant checks used by the tests and available to callers that want to
//! audit a tree after heavy mutation.

use crate::comparator::Comparator;
use crate::types::{Color, NodeId, RbTree, NULL_NODE};
use std::cmp::Ordering;

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K, V, C: Comparator<K>> RbTree<K, V, C> {
    /// Check if the tree maintains the red-black invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    ///
    /// Verifies: black root, no red node with a red child, equal black height on
    /// every path, strictly increasing in-order keys, consistent parent links,
    /// the cached extremes, and that the element count matches the arena.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        let root = self.header.root;
        if root == NULL_NODE {
            if self.len != 0 {
                return Err(format!("empty root but len is {}", self.len));
            }
            if self.header.leftmost != NULL_NODE || self.header.rightmost != NULL_NODE {
                return Err("empty tree with cached extremes".to_string());
            }
            return Ok(());
        }

        if self.node(root).color != Color::Black {
            return Err("root is red".to_string());
        }
        if self.parent(root) != NULL_NODE {
            return Err(format!("root {} has a parent", root));
        }

        let mut count = 0;
        self.check_subtree(root, &mut count)?;

        if count != self.len {
            return Err(format!("reachable nodes {} but len is {}", count, self.len));
        }
        let allocated = self.arena.stats().allocated_count;
        if allocated != self.len {
            return Err(format!("{} nodes in arena vs {} in tree", allocated, self.len));
        }

        self.check_order()?;

        if self.header.leftmost != self.minimum(root) {
            return Err("leftmost cache does not hold the minimum".to_string());
        }
        if self.header.rightmost != self.maximum(root) {
            return Err("rightmost cache does not hold the maximum".to_string());
        }
        Ok(())
    }

    /// Returns the black height of the subtree, counting the absent leaves.
    fn check_subtree(&self, id: NodeId, count: &mut usize) -> Result<usize, String> {
        if id == NULL_NODE {
            return Ok(1);
        }
        *count += 1;
        let left = self.left(id);
        let right = self.right(id);

        for child in [left, right] {
            if child == NULL_NODE {
                continue;
            }
            if self.parent(child) != id {
                return Err(format!("node {} has a broken parent link", child));
            }
            if self.is_red(id) && self.is_red(child) {
                return Err(format!("red node {} has a red child {}", id, child));
            }
        }

        let left_height = self.check_subtree(left, count)?;
        let right_height = self.check_subtree(right, count)?;
        if left_height != right_height {
            return Err(format!(
                "black height mismatch at node {}: {} vs {}",
                id, left_height, right_height
            ));
        }
        Ok(left_height + usize::from(!self.is_red(id)))
    }

    fn check_order(&self) -> Result<(), String> {
        let mut previous: Option<&K> = None;
        for (index, (key, _)) in self.iter().enumerate() {
            if let Some(prev) = previous {
                if self.cmp.compare(prev, key) != Ordering::Less {
                    return Err(format!("keys out of order at index {}", index));
                }
            }
            previous = Some(key);
        }
        Ok(())
    }
}

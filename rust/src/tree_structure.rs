//! Tree structure management operations for the tree engine.
//!
//! Size queries, clearing, height and arena statistics.

use crate::arena::ArenaStats;
use crate::macros::trace_event;
use crate::types::{Header, NodeId, RbTree, NULL_NODE};

// ============================================================================
// TREE STRUCTURE OPERATIONS
// ============================================================================

impl<K, V, C> RbTree<K, V, C> {
    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clear all items from the tree. Every outstanding cursor becomes stale.
    pub fn clear(&mut self) {
        trace_event!(len = self.len, "clearing tree");
        self.arena.clear();
        self.header = Header::empty();
        self.len = 0;
        self.stamp += 1;
    }

    /// Number of nodes on the longest root-to-leaf path; 0 for an empty tree.
    pub fn height(&self) -> usize {
        self.subtree_height(self.header.root)
    }

    fn subtree_height(&self, id: NodeId) -> usize {
        if id == NULL_NODE {
            return 0;
        }
        1 + self
            .subtree_height(self.left(id))
            .max(self.subtree_height(self.right(id)))
    }

    /// Get arena statistics for the node storage.
    pub fn arena_stats(&self) -> ArenaStats {
        self.arena.stats()
    }
}

//! Core types and data structures for the red-black tree engine.
//!
//! This module contains the node layout, the tree header and the engine struct
//! shared by the ordered map and ordered set.

use crate::arena::NodeArena;
use crate::comparator::NaturalOrder;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Node ID type for arena-based allocation
pub(crate) type NodeId = u32;

/// Special node ID constants
pub(crate) const NULL_NODE: NodeId = u32::MAX;

/// Logical end position of a tree. Successor of the maximum, predecessor target
/// of nothing; the predecessor of `END_NODE` is the maximum.
pub(crate) const END_NODE: NodeId = NULL_NODE;

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a process-unique container identity used to tag cursors.
pub(crate) fn next_container_id() -> u64 {
    NEXT_CONTAINER_ID.fetch_add(1, AtomicOrdering::Relaxed)
}

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Node color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A red-black tree node stored in the arena.
///
/// `parent` is a non-owning back-link; the root's parent is `NULL_NODE`.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) parent: NodeId,
}

/// Header record of a tree: the root plus cached extremes.
///
/// `leftmost`/`rightmost` give O(1) front/back access and are the fallbacks for
/// insert fast paths. All three are `NULL_NODE` for an empty tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header {
    pub(crate) root: NodeId,
    pub(crate) leftmost: NodeId,
    pub(crate) rightmost: NodeId,
}

impl Header {
    pub(crate) const fn empty() -> Self {
        Self {
            root: NULL_NODE,
            leftmost: NULL_NODE,
            rightmost: NULL_NODE,
        }
    }
}

/// Red-black tree engine.
///
/// The engine is generic over key `K`, value `V` and comparator `C`. The ordered
/// set instantiates it with `V = ()`.
///
/// # Performance Characteristics
///
/// - **Insertion**: O(log n), O(1) at either extreme
/// - **Lookup**: O(log n)
/// - **Deletion**: O(log n)
/// - **Bound queries**: O(log n)
/// - **Positional access**: O(n) in-order walk
/// - **Iteration**: O(1) amortized per step
#[derive(Debug)]
pub struct RbTree<K, V, C = NaturalOrder> {
    /// Arena storage for every node the tree owns.
    pub(crate) arena: NodeArena<TreeNode<K, V>>,
    /// Root and cached min/max.
    pub(crate) header: Header,
    /// Number of stored elements.
    pub(crate) len: usize,
    /// Ordering used for every key comparison.
    pub(crate) cmp: C,
    /// Identity stamped into every cursor this tree produces.
    pub(crate) id: u64,
    /// Bumped on every structural mutation; cursors carrying an older stamp are stale.
    pub(crate) stamp: u64,
}

impl<K, V> TreeNode<K, V> {
    /// A fresh red leaf with no links.
    pub(crate) fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            left: NULL_NODE,
            right: NULL_NODE,
            parent: NULL_NODE,
        }
    }

    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left == NULL_NODE && self.right == NULL_NODE
    }
}

//! Structural node primitives for the red-black tree engine.
//!
//! Link accessors, predecessor/successor by parent-link climbing, rotations and
//! unlinking. Absent children (`NULL_NODE`) count as black.

use crate::types::{Color, NodeId, RbTree, TreeNode, END_NODE, NULL_NODE};

impl<K, V, C> RbTree<K, V, C> {
    // ============================================================================
    // LINK ACCESS
    // ============================================================================

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &TreeNode<K, V> {
        &self.arena[id]
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TreeNode<K, V> {
        &mut self.arena[id]
    }

    #[inline]
    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        self.arena[id].left
    }

    #[inline]
    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        self.arena[id].right
    }

    #[inline]
    pub(crate) fn parent(&self, id: NodeId) -> NodeId {
        self.arena[id].parent
    }

    #[inline]
    pub(crate) fn is_red(&self, id: NodeId) -> bool {
        id != NULL_NODE && self.arena[id].color == Color::Red
    }

    #[inline]
    pub(crate) fn set_color(&mut self, id: NodeId, color: Color) {
        self.arena[id].color = color;
    }

    /// Leftmost node of the subtree rooted at `id`.
    pub(crate) fn minimum(&self, mut id: NodeId) -> NodeId {
        while self.left(id) != NULL_NODE {
            id = self.left(id);
        }
        id
    }

    /// Rightmost node of the subtree rooted at `id`.
    pub(crate) fn maximum(&self, mut id: NodeId) -> NodeId {
        while self.right(id) != NULL_NODE {
            id = self.right(id);
        }
        id
    }

    // ============================================================================
    // IN-ORDER NEIGHBOURS
    // ============================================================================

    /// In-order successor; the maximum's successor is `END_NODE`.
    pub(crate) fn successor(&self, id: NodeId) -> NodeId {
        if id == END_NODE {
            return END_NODE;
        }
        let right = self.right(id);
        if right != NULL_NODE {
            return self.minimum(right);
        }
        let mut child = id;
        let mut parent = self.parent(id);
        while parent != NULL_NODE && self.right(parent) == child {
            child = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// In-order predecessor; the predecessor of `END_NODE` is the maximum and the
    /// minimum's predecessor is `END_NODE`.
    pub(crate) fn predecessor(&self, id: NodeId) -> NodeId {
        if id == END_NODE {
            return self.header.rightmost;
        }
        let left = self.left(id);
        if left != NULL_NODE {
            return self.maximum(left);
        }
        let mut child = id;
        let mut parent = self.parent(id);
        while parent != NULL_NODE && self.left(parent) == child {
            child = parent;
            parent = self.parent(parent);
        }
        parent
    }

    // ============================================================================
    // ROTATIONS
    // ============================================================================

    /// Point whatever referenced `old` (parent link or root) at `new`.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent == NULL_NODE {
            self.header.root = new;
        } else if self.left(parent) == old {
            self.node_mut(parent).left = new;
        } else {
            self.node_mut(parent).right = new;
        }
    }

    /// Rotate left around `x`; returns the node now occupying `x`'s position.
    pub(crate) fn rotate_left(&mut self, x: NodeId) -> NodeId {
        let parent = self.parent(x);
        let y = self.right(x);
        let inner = self.left(y);

        self.replace_child(parent, x, y);
        self.node_mut(y).parent = parent;
        self.node_mut(y).left = x;
        self.node_mut(x).parent = y;
        self.node_mut(x).right = inner;
        if inner != NULL_NODE {
            self.node_mut(inner).parent = x;
        }
        y
    }

    /// Rotate right around `x`; returns the node now occupying `x`'s position.
    pub(crate) fn rotate_right(&mut self, x: NodeId) -> NodeId {
        let parent = self.parent(x);
        let y = self.left(x);
        let inner = self.right(y);

        self.replace_child(parent, x, y);
        self.node_mut(y).parent = parent;
        self.node_mut(y).right = x;
        self.node_mut(x).parent = y;
        self.node_mut(x).left = inner;
        if inner != NULL_NODE {
            self.node_mut(inner).parent = x;
        }
        y
    }

    /// Detach a childless node from its parent.
    pub(crate) fn unlink(&mut self, id: NodeId) {
        debug_assert!(self.node(id).is_leaf());
        let parent = self.parent(id);
        self.replace_child(parent, id, NULL_NODE);
        self.node_mut(id).parent = NULL_NODE;
    }

    /// Hang a fresh leaf under `parent` on the requested side.
    pub(crate) fn attach_leaf(&mut self, parent: NodeId, node: TreeNode<K, V>, as_left: bool) -> NodeId {
        let id = self.arena.allocate(node);
        self.node_mut(id).parent = parent;
        if as_left {
            self.node_mut(parent).left = id;
        } else {
            self.node_mut(parent).right = id;
        }
        id
    }
}

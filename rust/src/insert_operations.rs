//! INSERT operations for the tree engine.
//!
//! Insert-or-update with the min/max fast paths, the optional cursor hint, full
//! descent, and the post-insert rebalancing.

use crate::comparator::Comparator;
use crate::iteration::Cursor;
use crate::types::{Color, NodeId, RbTree, TreeNode, END_NODE, NULL_NODE};
use std::cmp::Ordering;

/// Where a new key goes, or which node already holds it.
enum Placement {
    Existing(NodeId),
    Leaf { parent: NodeId, as_left: bool },
}

impl<K, V, C: Comparator<K>> RbTree<K, V, C> {
    /// Insert a key-value pair, or overwrite the value of an existing key.
    ///
    /// Returns the previous value when the key was already present. Overwrites do
    /// not change the tree shape and leave outstanding cursors valid.
    ///
    /// `hint` is a cursor believed to sit next to the insertion point. A usable
    /// hint skips the descent from the root; a stale, foreign or unhelpful hint is
    /// ignored. The resulting tree content is the same either way.
    ///
    /// # Examples
    ///
    /// ```
    /// use treeify::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// assert_eq!(tree.set("a", 1, None), None);
    /// assert_eq!(tree.set("a", 2, None), Some(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn set(&mut self, key: K, value: V, hint: Option<&Cursor>) -> Option<V> {
        if self.header.root == NULL_NODE {
            let id = self.arena.allocate(TreeNode::leaf(key, value));
            self.node_mut(id).color = Color::Black;
            self.header.root = id;
            self.header.leftmost = id;
            self.header.rightmost = id;
            self.len += 1;
            self.stamp += 1;
            return None;
        }

        let placement = self.locate(&key, hint);
        match placement {
            Placement::Existing(id) => Some(std::mem::replace(&mut self.node_mut(id).value, value)),
            Placement::Leaf { parent, as_left } => {
                let id = self.attach_leaf(parent, TreeNode::leaf(key, value), as_left);
                if as_left && parent == self.header.leftmost {
                    self.header.leftmost = id;
                } else if !as_left && parent == self.header.rightmost {
                    self.header.rightmost = id;
                }
                self.len += 1;
                self.stamp += 1;
                self.insert_fixup(id);
                let root = self.header.root;
                self.set_color(root, Color::Black);
                None
            }
        }
    }

    /// Resolve where `key` belongs in a non-empty tree.
    fn locate(&self, key: &K, hint: Option<&Cursor>) -> Placement {
        let min = self.header.leftmost;
        match self.cmp.compare(&self.node(min).key, key) {
            Ordering::Equal => return Placement::Existing(min),
            Ordering::Greater => {
                return Placement::Leaf {
                    parent: min,
                    as_left: true,
                }
            }
            Ordering::Less => {}
        }

        let max = self.header.rightmost;
        match self.cmp.compare(&self.node(max).key, key) {
            Ordering::Equal => return Placement::Existing(max),
            Ordering::Less => {
                return Placement::Leaf {
                    parent: max,
                    as_left: false,
                }
            }
            Ordering::Greater => {}
        }

        if let Some(placement) = hint.and_then(|cursor| self.locate_near(key, cursor)) {
            return placement;
        }
        self.locate_by_descent(key)
    }

    /// Try to place `key` right before the hinted node.
    fn locate_near(&self, key: &K, hint: &Cursor) -> Option<Placement> {
        if self.validate_cursor(hint).is_err() || hint.node == END_NODE {
            return None;
        }
        let at = hint.node;
        match self.cmp.compare(&self.node(at).key, key) {
            Ordering::Equal => Some(Placement::Existing(at)),
            Ordering::Greater => {
                // key < hint and key > min, so a predecessor exists
                let pre = self.predecessor(at);
                if pre == END_NODE {
                    return None;
                }
                match self.cmp.compare(&self.node(pre).key, key) {
                    Ordering::Equal => Some(Placement::Existing(pre)),
                    Ordering::Less => {
                        if self.right(pre) == NULL_NODE {
                            Some(Placement::Leaf {
                                parent: pre,
                                as_left: false,
                            })
                        } else {
                            Some(Placement::Leaf {
                                parent: at,
                                as_left: true,
                            })
                        }
                    }
                    Ordering::Greater => None,
                }
            }
            Ordering::Less => None,
        }
    }

    /// Full descent from the root.
    fn locate_by_descent(&self, key: &K) -> Placement {
        let mut current = self.header.root;
        loop {
            match self.cmp.compare(&self.node(current).key, key) {
                Ordering::Greater => {
                    let left = self.left(current);
                    if left == NULL_NODE {
                        return Placement::Leaf {
                            parent: current,
                            as_left: true,
                        };
                    }
                    current = left;
                }
                Ordering::Less => {
                    let right = self.right(current);
                    if right == NULL_NODE {
                        return Placement::Leaf {
                            parent: current,
                            as_left: false,
                        };
                    }
                    current = right;
                }
                Ordering::Equal => return Placement::Existing(current),
            }
        }
    }
}

impl<K, V, C> RbTree<K, V, C> {
    // ============================================================================
    // REBALANCING
    // ============================================================================

    /// Restore the red-black properties after attaching the red leaf `node`.
    pub(crate) fn insert_fixup(&mut self, mut node: NodeId) {
        loop {
            let parent = self.parent(node);
            if parent == NULL_NODE || !self.is_red(parent) {
                return;
            }
            // A red parent is never the root, so the grandparent exists.
            let grandparent = self.parent(parent);
            let parent_is_left = self.left(grandparent) == parent;
            let uncle = if parent_is_left {
                self.right(grandparent)
            } else {
                self.left(grandparent)
            };

            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                if grandparent == self.header.root {
                    return;
                }
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            let mut top = parent;
            if parent_is_left {
                if self.right(parent) == node {
                    self.rotate_left(parent);
                    top = node;
                }
                self.set_color(top, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_right(grandparent);
            } else {
                if self.left(parent) == node {
                    self.rotate_right(parent);
                    top = node;
                }
                self.set_color(top, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_left(grandparent);
            }
            return;
        }
    }
}

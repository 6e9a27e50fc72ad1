//! Cursor and iterator implementations for the tree engine.
//!
//! Two ways to walk a tree:
//!
//! - [`Cursor`] is a detached, `Copy` position handle (the container-iterator of
//!   classic STL-style APIs). It can be moved forward and backward through the
//!   tree that produced it, dereferenced, used as an insertion hint, or passed to
//!   `erase_by_cursor`. A cursor records the tree's structural stamp; once the
//!   tree is structurally modified every older cursor is rejected.
//! - [`Iter`], [`Keys`] and [`Values`] are ordinary borrowed Rust iterators.

use crate::error::{ContainerError, CursorResult};
use crate::types::{NodeId, RbTree, END_NODE};

// ============================================================================
// CURSOR
// ============================================================================

/// Walking direction of a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Position in a tree; see the module docs.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    pub(crate) node: NodeId,
    pub(crate) direction: Direction,
    pub(crate) owner: u64,
    pub(crate) stamp: u64,
}

impl Cursor {
    /// True if the cursor sits on the end position.
    pub fn is_end(&self) -> bool {
        self.node == END_NODE
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl PartialEq for Cursor {
    /// Two cursors are equal when they denote the same position of the same tree.
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.owner == other.owner
    }
}

impl Eq for Cursor {}

// ============================================================================
// TREE CURSOR METHODS
// ============================================================================

impl<K, V, C> RbTree<K, V, C> {
    pub(crate) fn make_cursor(&self, node: NodeId, direction: Direction) -> Cursor {
        Cursor {
            node,
            direction,
            owner: self.id,
            stamp: self.stamp,
        }
    }

    pub(crate) fn cursor_at(&self, node: NodeId) -> Cursor {
        self.make_cursor(node, Direction::Forward)
    }

    /// Reject cursors from other trees or from before the last structural change.
    pub(crate) fn validate_cursor(&self, cursor: &Cursor) -> CursorResult<()> {
        if cursor.owner != self.id {
            return Err(ContainerError::foreign_cursor(cursor.owner, self.id));
        }
        if cursor.stamp != self.stamp {
            return Err(ContainerError::stale_cursor(cursor.node, cursor.stamp, self.stamp));
        }
        Ok(())
    }

    /// Forward cursor at the smallest element (the end cursor when empty).
    pub fn begin(&self) -> Cursor {
        self.cursor_at(self.header.leftmost)
    }

    /// Forward end cursor.
    pub fn end(&self) -> Cursor {
        self.cursor_at(END_NODE)
    }

    /// Reverse cursor at the largest element (the reverse end when empty).
    pub fn rbegin(&self) -> Cursor {
        self.make_cursor(self.header.rightmost, Direction::Reverse)
    }

    /// Reverse end cursor.
    pub fn rend(&self) -> Cursor {
        self.make_cursor(END_NODE, Direction::Reverse)
    }

    /// Step the cursor one element in its direction.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when the cursor is already at the end; `InvalidIterator` for
    /// stale or foreign cursors.
    pub fn move_next(&self, cursor: &mut Cursor) -> CursorResult<()> {
        self.validate_cursor(cursor)?;
        if cursor.node == END_NODE {
            return Err(ContainerError::cursor_exhausted("advance"));
        }
        cursor.node = match cursor.direction {
            Direction::Forward => self.successor(cursor.node),
            Direction::Reverse => self.predecessor(cursor.node),
        };
        Ok(())
    }

    /// Step the cursor one element against its direction.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when the cursor is already at its first element.
    pub fn move_prev(&self, cursor: &mut Cursor) -> CursorResult<()> {
        self.validate_cursor(cursor)?;
        match cursor.direction {
            Direction::Forward => {
                if cursor.node == self.header.leftmost {
                    return Err(ContainerError::cursor_exhausted("retreat"));
                }
                cursor.node = self.predecessor(cursor.node);
            }
            Direction::Reverse => {
                if cursor.node == self.header.rightmost {
                    return Err(ContainerError::cursor_exhausted("retreat"));
                }
                cursor.node = if cursor.node == END_NODE {
                    self.header.leftmost
                } else {
                    self.successor(cursor.node)
                };
            }
        }
        Ok(())
    }

    /// Key and value under the cursor.
    ///
    /// # Errors
    ///
    /// `OutOfRange` at the end position; `InvalidIterator` for stale or foreign
    /// cursors.
    pub fn entry_at(&self, cursor: &Cursor) -> CursorResult<(&K, &V)> {
        self.validate_cursor(cursor)?;
        match self.arena.get(cursor.node) {
            Some(node) => Ok((&node.key, &node.value)),
            None => Err(ContainerError::end_dereference()),
        }
    }

    /// Key under the cursor.
    pub fn key_at(&self, cursor: &Cursor) -> CursorResult<&K> {
        self.entry_at(cursor).map(|(key, _)| key)
    }

    /// Value under the cursor.
    pub fn value_at(&self, cursor: &Cursor) -> CursorResult<&V> {
        self.entry_at(cursor).map(|(_, value)| value)
    }

    /// Mutable value under the cursor. Writing a value is not a structural change.
    pub fn value_at_mut(&mut self, cursor: &Cursor) -> CursorResult<&mut V> {
        self.validate_cursor(cursor)?;
        match self.arena.get_mut(cursor.node) {
            Some(node) => Ok(&mut node.value),
            None => Err(ContainerError::end_dereference()),
        }
    }

    // ============================================================================
    // BORROWED ITERATORS
    // ============================================================================

    /// Returns an iterator over all key-value pairs in order.
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter::new(self)
    }

    /// Returns an iterator over all keys in order.
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys { items: self.iter() }
    }

    /// Returns an iterator over all values in key order.
    pub fn values(&self) -> Values<'_, K, V, C> {
        Values { items: self.iter() }
    }

    /// Call `f(key, value, index)` for every element in order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V, usize),
    {
        for (index, (key, value)) in self.iter().enumerate() {
            f(key, value, index);
        }
    }
}

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over key-value pairs in tree order.
pub struct Iter<'a, K, V, C> {
    tree: &'a RbTree<K, V, C>,
    front: NodeId,
    back: NodeId,
    remaining: usize,
}

/// Iterator over keys in tree order.
pub struct Keys<'a, K, V, C> {
    items: Iter<'a, K, V, C>,
}

/// Iterator over values in key order.
pub struct Values<'a, K, V, C> {
    items: Iter<'a, K, V, C>,
}

impl<'a, K, V, C> Iter<'a, K, V, C> {
    pub fn new(tree: &'a RbTree<K, V, C>) -> Self {
        Self {
            tree,
            front: tree.header.leftmost,
            back: tree.header.rightmost,
            remaining: tree.len,
        }
    }
}

impl<K, V, C> Clone for Iter<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.tree.node(self.front);
        self.remaining -= 1;
        self.front = self.tree.successor(self.front);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, C> DoubleEndedIterator for Iter<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.tree.node(self.back);
        self.remaining -= 1;
        self.back = self.tree.predecessor(self.back);
        Some((&node.key, &node.value))
    }
}

impl<K, V, C> ExactSizeIterator for Iter<'_, K, V, C> {}

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Keys<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(k, _)| k)
    }
}

impl<'a, K, V, C> Iterator for Values<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<K, V, C> DoubleEndedIterator for Values<'_, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.items.next_back().map(|(_, v)| v)
    }
}

impl<'a, K, V, C> IntoIterator for &'a RbTree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over key-value pairs in tree order.
pub struct IntoIter<K, V> {
    entries: std::vec::IntoIter<(K, V)>,
}

impl<K, V, C> IntoIterator for RbTree<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut order = Vec::with_capacity(self.len);
        let mut id = self.header.leftmost;
        while id != END_NODE {
            order.push(id);
            id = self.successor(id);
        }
        let entries: Vec<(K, V)> = order
            .into_iter()
            .filter_map(|id| self.arena.deallocate(id))
            .map(|node| (node.key, node.value))
            .collect();
        IntoIter {
            entries: entries.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

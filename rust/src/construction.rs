//! Construction and initialization logic for the tree engine.

use crate::arena::NodeArena;
use crate::comparator::{Comparator, NaturalOrder};
use crate::types::{next_container_id, Header, RbTree};

impl<K, V> RbTree<K, V, NaturalOrder> {
    /// Create an empty tree ordered by `K: Ord`.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> RbTree<K, V, C> {
    /// Create an empty tree ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treeify::RbTree;
    ///
    /// let mut tree = RbTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// tree.set(1, "one", None);
    /// tree.set(2, "two", None);
    /// let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, vec![2, 1]);
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            arena: NodeArena::new(),
            header: Header::empty(),
            len: 0,
            cmp,
            id: next_container_id(),
            stamp: 0,
        }
    }

    /// Create an empty tree ordered by `cmp`, reserving room for `capacity` nodes.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            arena: NodeArena::with_capacity(capacity),
            ..Self::with_comparator(cmp)
        }
    }

    /// Access the comparator.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }
}

impl<K, V, C: Comparator<K>> RbTree<K, V, C> {
    /// Build a tree from key/value pairs; later duplicates overwrite earlier ones.
    pub fn from_pairs<I>(pairs: I, cmp: C) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut tree = Self::with_comparator(cmp);
        for (key, value) in pairs {
            tree.set(key, value, None);
        }
        tree
    }
}

// Default implementations
impl<K, V, C: Default> Default for RbTree<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RbTree<K, V, C> {
    /// Clones content and shape; the clone is a distinct container, so cursors of
    /// the original are rejected by it.
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            header: self.header,
            len: self.len,
            cmp: self.cmp.clone(),
            id: next_container_id(),
            stamp: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_is_empty() {
        let tree = RbTree::<i32, String>::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_default_uses_natural_order() {
        let mut tree: RbTree<&str, u8> = RbTree::default();
        tree.set("b", 2, None);
        tree.set("a", 1, None);
        assert_eq!(tree.front(), Some((&"a", &1)));
    }

    #[test]
    fn test_from_pairs_overwrites_duplicates() {
        let tree = RbTree::from_pairs(vec![(1, 'a'), (2, 'b'), (1, 'c')], NaturalOrder);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(&1), Some(&'c'));
    }

    #[test]
    fn test_clone_gets_fresh_identity() {
        let tree = RbTree::from_pairs((0..10).map(|i| (i, i)), NaturalOrder);
        let copy = tree.clone();
        assert_ne!(tree.id, copy.id);
        assert_eq!(copy.len(), 10);
        assert!(copy.check_invariants());

        let cursor = tree.begin();
        assert!(copy.key_at(&cursor).is_err());
    }
}

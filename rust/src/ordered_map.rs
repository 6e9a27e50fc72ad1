//! Ordered map over the red-black tree engine.
//!
//! `OrderedMap` keeps its entries sorted by a [`Comparator`]. Lookups, inserts,
//! erases and bound queries are O(log n); positional access walks the tree in
//! order and is O(n).

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::{ContainerResult, ContainerResultExt, CursorResult, PositionResult};
use crate::iteration::{Cursor, IntoIter, Iter, Keys, Values};
use crate::macros::bound_queries;
use crate::types::RbTree;
use std::fmt;

/// A map whose entries are kept in comparator order.
///
/// # Examples
///
/// ```
/// use treeify::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.set_element(3, "c");
/// map.set_element(1, "a");
/// map.set_element(2, "b");
///
/// assert_eq!(map.front(), Some((&1, &"a")));
/// let cursor = map.lower_bound(&2);
/// assert_eq!(map.entry_at(&cursor), Ok((&2, &"b")));
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V, C = NaturalOrder> {
    pub(crate) tree: RbTree<K, V, C>,
}

impl<K, V> OrderedMap<K, V, NaturalOrder> {
    /// Create an empty map ordered by `K: Ord`.
    pub fn new() -> Self {
        Self { tree: RbTree::new() }
    }

    /// Create an empty map with node storage reserved for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Create an empty map ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            tree: RbTree::with_comparator(cmp),
        }
    }

    /// Create an empty map ordered by `cmp` with room for `capacity` entries.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            tree: RbTree::with_capacity_and_comparator(capacity, cmp),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Remove every entry. Outstanding cursors become stale.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    /// Entry with the smallest key.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.tree.front()
    }

    /// Entry with the largest key.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.tree.back()
    }

    // ============================================================================
    // POSITIONAL ACCESS
    // ============================================================================

    /// Entry at in-order position `pos`. O(n).
    ///
    /// # Errors
    ///
    /// `OutOfRange` unless `pos < len()`.
    pub fn get_element_by_pos(&self, pos: usize) -> PositionResult<(&K, &V)> {
        self.tree
            .get_by_pos(pos)
            .with_context("OrderedMap::get_element_by_pos")
    }

    /// Remove and return the entry at in-order position `pos`. O(n).
    pub fn erase_element_by_pos(&mut self, pos: usize) -> PositionResult<(K, V)> {
        self.tree
            .erase_by_pos(pos)
            .with_context("OrderedMap::erase_element_by_pos")
    }

    // ============================================================================
    // CURSORS
    // ============================================================================

    pub fn begin(&self) -> Cursor {
        self.tree.begin()
    }

    pub fn end(&self) -> Cursor {
        self.tree.end()
    }

    pub fn rbegin(&self) -> Cursor {
        self.tree.rbegin()
    }

    pub fn rend(&self) -> Cursor {
        self.tree.rend()
    }

    pub fn move_next(&self, cursor: &mut Cursor) -> CursorResult<()> {
        self.tree.move_next(cursor)
    }

    pub fn move_prev(&self, cursor: &mut Cursor) -> CursorResult<()> {
        self.tree.move_prev(cursor)
    }

    /// Key and value under `cursor`; the end position is `OutOfRange`.
    pub fn entry_at(&self, cursor: &Cursor) -> CursorResult<(&K, &V)> {
        self.tree.entry_at(cursor)
    }

    pub fn key_at(&self, cursor: &Cursor) -> CursorResult<&K> {
        self.tree.key_at(cursor)
    }

    pub fn value_at(&self, cursor: &Cursor) -> CursorResult<&V> {
        self.tree.value_at(cursor)
    }

    pub fn value_at_mut(&mut self, cursor: &Cursor) -> CursorResult<&mut V> {
        self.tree.value_at_mut(cursor)
    }

    /// Erase the entry under `cursor`; returns a cursor to the entry that
    /// followed it in the cursor's direction.
    pub fn erase_element_by_cursor(&mut self, cursor: &Cursor) -> ContainerResult<Cursor> {
        self.tree.erase_by_cursor(cursor)
    }

    // ============================================================================
    // ITERATION
    // ============================================================================

    pub fn iter(&self) -> Iter<'_, K, V, C> {
        self.tree.iter()
    }

    pub fn keys(&self) -> Keys<'_, K, V, C> {
        self.tree.keys()
    }

    pub fn values(&self) -> Values<'_, K, V, C> {
        self.tree.values()
    }

    /// Call `f(key, value, index)` for every entry in key order.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K, &V, usize),
    {
        self.tree.for_each(f);
    }
}

impl<K, V, C: Comparator<K>> OrderedMap<K, V, C> {
    /// Build a map from pairs; later duplicates overwrite earlier ones.
    pub fn from_pairs<I>(pairs: I, cmp: C) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            tree: RbTree::from_pairs(pairs, cmp),
        }
    }

    /// Insert `key` or overwrite its value; returns the previous value.
    pub fn set_element(&mut self, key: K, value: V) -> Option<V> {
        self.tree.set(key, value, None)
    }

    /// Like [`set_element`](Self::set_element), starting the search next to `hint`.
    pub fn set_element_with_hint(&mut self, key: K, value: V, hint: &Cursor) -> Option<V> {
        self.tree.set(key, value, Some(hint))
    }

    pub fn get_element_by_key(&self, key: &K) -> Option<&V> {
        self.tree.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.tree.get_mut(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Remove `key`; returns its value, or `None` (and no change) when absent.
    pub fn erase_element_by_key(&mut self, key: &K) -> Option<V> {
        self.tree.remove(key)
    }

    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.tree.remove_entry(key)
    }

    /// Cursor at `key`, or the end cursor.
    pub fn find(&self, key: &K) -> Cursor {
        self.tree.find(key)
    }

    bound_queries! {
        lower: "Cursor at the first entry whose key is not less than `key`.",
               "Cursor at the last entry whose key is not greater than `key`.";
        upper: "Cursor at the first entry whose key is greater than `key`.",
               "Cursor at the last entry whose key is less than `key`.";
    }

    /// Replace the key under `cursor` if it still sorts between its neighbours.
    pub fn update_key_by_cursor(&mut self, cursor: &Cursor, key: K) -> ContainerResult<bool> {
        self.tree.update_key_by_cursor(cursor, key)
    }

    /// Insert every entry of `other`, overwriting values of shared keys.
    pub fn union<C2>(&mut self, other: &OrderedMap<K, V, C2>)
    where
        K: Clone,
        V: Clone,
    {
        for (key, value) in other.iter() {
            self.tree.set(key.clone(), value.clone(), None);
        }
    }

    pub fn check_invariants(&self) -> bool {
        self.tree.check_invariants()
    }

    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        self.tree.check_invariants_detailed()
    }
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

impl<K, V, C: Default> Default for OrderedMap<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OrderedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for OrderedMap<K, V, C> {}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for OrderedMap<K, V, C> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter, C::default())
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for OrderedMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.tree.set(key, value, None);
        }
    }
}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for OrderedMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

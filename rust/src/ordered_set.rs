//! Ordered set over the red-black tree engine.

use crate::comparator::{Comparator, NaturalOrder};
use crate::error::{ContainerResult, ContainerResultExt, CursorResult, PositionResult};
use crate::iteration::{Cursor, IntoIter, Keys};
use crate::macros::bound_queries;
use crate::types::RbTree;
use std::fmt;

/// Borrowed iterator over the keys of an [`OrderedSet`].
pub type SetIter<'a, K, C> = Keys<'a, K, (), C>;

/// A set whose keys are kept in comparator order.
///
/// # Examples
///
/// ```
/// use treeify::OrderedSet;
///
/// let set: OrderedSet<i32> = [5, 1, 4, 1].into_iter().collect();
/// let keys: Vec<_> = set.iter().copied().collect();
/// assert_eq!(keys, vec![1, 4, 5]);
/// ```
#[derive(Clone)]
pub struct OrderedSet<K, C = NaturalOrder> {
    pub(crate) tree: RbTree<K, (), C>,
}

impl<K> OrderedSet<K, NaturalOrder> {
    pub fn new() -> Self {
        Self { tree: RbTree::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<K, C> OrderedSet<K, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            tree: RbTree::with_comparator(cmp),
        }
    }

    /// Create an empty set ordered by `cmp`, reserving room for `capacity` keys.
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

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn front(&self) -> Option<&K> {
        self.tree.front().map(|(key, _)| key)
    }

    pub fn back(&self) -> Option<&K> {
        self.tree.back().map(|(key, _)| key)
    }

    /// Key at in-order position `pos`. O(n).
    pub fn get_element_by_pos(&self, pos: usize) -> PositionResult<&K> {
        self.tree
            .get_by_pos(pos)
            .map(|(key, _)| key)
            .with_context("OrderedSet::get_element_by_pos")
    }

    /// Remove and return the key at in-order position `pos`. O(n).
    pub fn erase_element_by_pos(&mut self, pos: usize) -> PositionResult<K> {
        self.tree
            .erase_by_pos(pos)
            .map(|(key, _)| key)
            .with_context("OrderedSet::erase_element_by_pos")
    }

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

    /// Key under `cursor`; the end position is `OutOfRange`.
    pub fn key_at(&self, cursor: &Cursor) -> CursorResult<&K> {
        self.tree.key_at(cursor)
    }

    pub fn erase_element_by_cursor(&mut self, cursor: &Cursor) -> ContainerResult<Cursor> {
        self.tree.erase_by_cursor(cursor)
    }

    pub fn iter(&self) -> SetIter<'_, K, C> {
        self.tree.keys()
    }

    /// Call `f(key, index)` for every key in order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, usize),
    {
        self.tree.for_each(|key, _, index| f(key, index));
    }
}

impl<K, C: Comparator<K>> OrderedSet<K, C> {
    /// Build a set from keys; duplicates collapse.
    pub fn from_keys<I>(keys: I, cmp: C) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        Self {
            tree: RbTree::from_pairs(keys.into_iter().map(|key| (key, ())), cmp),
        }
    }

    /// Insert `key`; returns true if it was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.tree.set(key, (), None).is_none()
    }

    /// Like [`insert`](Self::insert), starting the search next to `hint`.
    pub fn insert_with_hint(&mut self, key: K, hint: &Cursor) -> bool {
        self.tree.set(key, (), Some(hint)).is_none()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// Remove `key`; returns whether it was present.
    pub fn erase_element_by_key(&mut self, key: &K) -> bool {
        self.tree.erase_key(key)
    }

    pub fn find(&self, key: &K) -> Cursor {
        self.tree.find(key)
    }

    bound_queries! {
        lower: "Cursor at the first key not less than `key`.",
               "Cursor at the last key not greater than `key`.";
        upper: "Cursor at the first key greater than `key`.",
               "Cursor at the last key less than `key`.";
    }

    pub fn update_key_by_cursor(&mut self, cursor: &Cursor, key: K) -> ContainerResult<bool> {
        self.tree.update_key_by_cursor(cursor, key)
    }

    /// Insert every key of `other`.
    pub fn union<C2>(&mut self, other: &OrderedSet<K, C2>)
    where
        K: Clone,
    {
        for key in other.iter() {
            self.tree.set(key.clone(), (), None);
        }
    }

    pub fn check_invariants(&self) -> bool {
        self.tree.check_invariants()
    }

    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        self.tree.check_invariants_detailed()
    }
}

impl<K, C: Default> Default for OrderedSet<K, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K: fmt::Debug, C> fmt::Debug for OrderedSet<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, C> PartialEq for OrderedSet<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, C> Eq for OrderedSet<K, C> {}

impl<K, C: Comparator<K> + Default> FromIterator<K> for OrderedSet<K, C> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_keys(iter, C::default())
    }
}

impl<K, C: Comparator<K>> Extend<K> for OrderedSet<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.tree.set(key, (), None);
        }
    }
}

impl<'a, K, C> IntoIterator for &'a OrderedSet<K, C> {
    type Item = &'a K;
    type IntoIter = SetIter<'a, K, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator over the keys of an [`OrderedSet`].
pub struct SetIntoIter<K> {
    inner: IntoIter<K, ()>,
}

impl<K> Iterator for SetIntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for SetIntoIter<K> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, C> IntoIterator for OrderedSet<K, C> {
    type Item = K;
    type IntoIter = SetIntoIter<K>;

    fn into_iter(self) -> Self::IntoIter {
        SetIntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_novelty() {
        let mut set = OrderedSet::new();
        assert!(set.insert(2));
        assert!(set.insert(1));
        assert!(!set.insert(2));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&1));
        assert_eq!(set.front(), Some(&1));
        assert_eq!(set.back(), Some(&2));
    }

    #[test]
    fn test_with_capacity_and_comparator_keeps_custom_order() {
        let mut set = OrderedSet::with_capacity_and_comparator(8, |a: &i32, b: &i32| b.cmp(a));
        for k in [3, 9, 1, 7] {
            set.insert(k);
        }
        assert!(set.tree.arena_stats().total_capacity >= 8);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![9, 7, 3, 1]);

        let plain: OrderedSet<u8> = OrderedSet::with_capacity(4);
        assert!(plain.is_empty());
    }

    #[test]
    fn test_hinted_insert() {
        let mut set: OrderedSet<i32> = (0..20).map(|i| i * 2).collect();
        let hint = set.lower_bound(&9);
        assert!(set.insert_with_hint(9, &hint));
        let hint = set.find(&10);
        assert!(!set.insert_with_hint(10, &hint));
        assert!(set.check_invariants());
        assert_eq!(set.get_element_by_pos(5), Ok(&9));
    }

    #[test]
    fn test_positional_erase() {
        let mut set: OrderedSet<char> = "hello".chars().collect();
        assert_eq!(set.len(), 4);
        assert_eq!(set.erase_element_by_pos(0), Ok('e'));
        assert!(set.erase_element_by_pos(3).unwrap_err().is_out_of_range());
        let remaining: Vec<_> = set.into_iter().collect();
        assert_eq!(remaining, vec!['h', 'l', 'o']);
    }

    #[test]
    fn test_union_and_for_each() {
        let mut a: OrderedSet<i32> = [1, 3].into_iter().collect();
        let b: OrderedSet<i32> = [2, 3, 4].into_iter().collect();
        a.union(&b);
        let mut seen = Vec::new();
        a.for_each(|k, i| seen.push((i, *k)));
        assert_eq!(seen, vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
        assert_eq!(format!("{:?}", a), "{1, 2, 3, 4}");
    }

    #[test]
    fn test_erase_by_key_and_cursor() {
        let mut set: OrderedSet<i32> = (1..=5).collect();
        assert!(!set.erase_element_by_key(&9));
        assert!(set.erase_element_by_key(&2));
        let cursor = set.find(&3);
        let next = set.erase_element_by_cursor(&cursor).unwrap();
        assert_eq!(set.key_at(&next), Ok(&4));
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 4, 5]);
    }
}

//! Hash set whose crowded buckets become red-black trees.

use crate::error::{CursorResult, InitResult};
use crate::hash_iteration::{HashCursor, Iter};
use crate::hash_table::{BucketInfo, DefaultHashBuilder, HashTable};
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// A hash set with treeified overflow buckets. See [`HashMap`](crate::HashMap).
pub struct HashSet<K, S = DefaultHashBuilder> {
    table: HashTable<K, (), S>,
}

/// Iterator over the keys of a [`HashSet`] in bucket order.
pub struct SetIter<'a, K> {
    inner: Iter<'a, K, ()>,
}

impl<'a, K> Iterator for SetIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for SetIter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K> ExactSizeIterator for SetIter<'_, K> {}

impl<K> HashSet<K, DefaultHashBuilder> {
    /// Create an empty set with the default bucket count.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Create an empty set with `count` initial buckets.
    ///
    /// # Errors
    ///
    /// `OutOfRange` unless `count` is a power of two in `[16, 2^30]`.
    pub fn with_bucket_count(count: usize) -> InitResult<Self> {
        Self::with_bucket_count_and_hasher(count, DefaultHashBuilder::default())
    }
}

impl<K, S> HashSet<K, S> {
    /// Create an empty set with the default bucket count and `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: HashTable::with_hasher(hasher),
        }
    }

    /// Create an empty set with `count` initial buckets and `hasher`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` unless `count` is a power of two in `[16, 2^30]`.
    pub fn with_bucket_count_and_hasher(count: usize, hasher: S) -> InitResult<Self> {
        Ok(Self {
            table: HashTable::with_bucket_count_and_hasher(count, hasher)?,
        })
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.table.len
    }

    /// Whether the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.table.len == 0
    }

    /// Remove every key and restore the initial bucket count.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Current number of buckets. Doubles under load, never shrinks except on `clear`.
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    /// Occupied buckets with their representation and size.
    pub fn bucket_kinds(&self) -> Vec<BucketInfo> {
        self.table.bucket_kinds()
    }

    /// Cursor at the first key in bucket order, or `end()` when empty.
    pub fn begin(&self) -> HashCursor {
        self.table.begin()
    }

    /// Past-the-end position of forward iteration.
    pub fn end(&self) -> HashCursor {
        self.table.end()
    }

    /// Cursor at the last key in bucket order; moving it forward walks backwards.
    pub fn rbegin(&self) -> HashCursor {
        self.table.rbegin()
    }

    /// Past-the-end position of reverse iteration.
    pub fn rend(&self) -> HashCursor {
        self.table.rend()
    }

    /// Advance `cursor` in its own direction.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when the cursor is already at its end position;
    /// `InvalidIterator` for a stale or foreign cursor.
    pub fn move_next(&self, cursor: &mut HashCursor) -> CursorResult<()> {
        self.table.move_next(cursor)
    }

    /// Step `cursor` back against its direction.
    ///
    /// # Errors
    ///
    /// `OutOfRange` when the cursor is at its first position;
    /// `InvalidIterator` for a stale or foreign cursor.
    pub fn move_prev(&self, cursor: &mut HashCursor) -> CursorResult<()> {
        self.table.move_prev(cursor)
    }

    /// Key under `cursor`; the end position is `OutOfRange`.
    pub fn key_at(&self, cursor: &HashCursor) -> CursorResult<&K> {
        self.table.entry_at(cursor).map(|(k, _)| k)
    }

    /// Iterate keys in bucket order.
    pub fn iter(&self) -> SetIter<'_, K> {
        SetIter {
            inner: self.table.iter(),
        }
    }

    /// Call `f(key, index)` for every key in bucket order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, usize),
    {
        self.table.for_each(|key, _, index| f(key, index));
    }
}

impl<K: Hash + Ord, S: BuildHasher> HashSet<K, S> {
    /// Build a set with an explicit bucket count and hasher.
    pub fn from_keys<I>(keys: I, count: usize, hasher: S) -> InitResult<Self>
    where
        I: IntoIterator<Item = K>,
    {
        let mut set = Self::with_bucket_count_and_hasher(count, hasher)?;
        set.extend(keys);
        Ok(set)
    }

    /// Insert `key`; returns true if it was not already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.table.insert(key, ()).is_none()
    }

    /// Remove `key`; returns whether it was present.
    pub fn erase_element_by_key(&mut self, key: &K) -> bool {
        self.table.remove_entry(key).is_some()
    }

    /// Whether `key` is present.
    pub fn find(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }

    /// Alias of [`find`](Self::find).
    pub fn contains(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }
}

impl<K, S: Default> Default for HashSet<K, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Clone, S: Clone> Clone for HashSet<K, S> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<K: fmt::Debug, S> fmt::Debug for HashSet<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Hash + Ord, S: BuildHasher> PartialEq for HashSet<K, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|key| other.contains(key))
    }
}

impl<K: Hash + Ord, S: BuildHasher + Default> FromIterator<K> for HashSet<K, S> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<K: Hash + Ord, S: BuildHasher> Extend<K> for HashSet<K, S> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.table.insert(key, ());
        }
    }
}

impl<'a, K, S> IntoIterator for &'a HashSet<K, S> {
    type Item = &'a K;
    type IntoIter = SetIter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_erase() {
        let mut set = HashSet::new();
        assert!(set.insert("a"));
        assert!(!set.insert("a"));
        assert!(set.find(&"a"));
        assert!(!set.erase_element_by_key(&"b"));
        assert!(set.erase_element_by_key(&"a"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_growth_and_clear_restore_initial_count() {
        let mut set = HashSet::with_bucket_count(32).unwrap();
        set.extend(0..200u32);
        assert!(set.bucket_count() > 32);
        assert_eq!(set.len(), 200);
        assert!((0..200).all(|k| set.contains(&k)));
        set.clear();
        assert_eq!(set.bucket_count(), 32);
        assert!(set.iter().next().is_none());
    }

    #[test]
    fn test_for_each_and_cursor_agree() {
        let set: HashSet<i64> = (-10..10).collect();
        let mut via_for_each = Vec::new();
        set.for_each(|k, _| via_for_each.push(*k));
        let mut via_cursor = Vec::new();
        let mut cursor = set.begin();
        while !cursor.is_end() {
            via_cursor.push(*set.key_at(&cursor).unwrap());
            set.move_next(&mut cursor).unwrap();
        }
        assert_eq!(via_for_each, via_cursor);
        assert_eq!(via_cursor.len(), 20);
    }
}

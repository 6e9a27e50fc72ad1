//! Hash map whose crowded buckets become red-black trees.

use crate::error::{CursorResult, InitResult};
use crate::hash_iteration::{HashCursor, Iter};
use crate::hash_table::{BucketInfo, DefaultHashBuilder, HashTable};
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// A hash map with treeified overflow buckets.
///
/// Keys must be `Hash + Ord`: the ordering is used once a bucket holds enough
/// colliding keys to be stored as a tree, which bounds the cost of lookups
/// under heavy collision.
///
/// # Examples
///
/// ```
/// use treeify::HashMap;
///
/// let mut map = HashMap::new();
/// map.set_element("a", 1);
/// map.set_element("b", 2);
/// assert_eq!(map.get_element_by_key(&"a"), Some(&1));
/// assert!(map.find(&"b"));
/// assert_eq!(map.erase_element_by_key(&"a"), Some(1));
/// assert_eq!(map.len(), 1);
/// ```
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    table: HashTable<K, V, S>,
}

impl<K, V> HashMap<K, V, DefaultHashBuilder> {
    /// Create an empty map with the default bucket count.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Create an empty map with `count` initial buckets.
    ///
    /// # Errors
    ///
    /// `OutOfRange` unless `count` is a power of two in `[16, 2^30]`.
    pub fn with_bucket_count(count: usize) -> InitResult<Self> {
        Self::with_bucket_count_and_hasher(count, DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Create an empty map with the default bucket count and `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: HashTable::with_hasher(hasher),
        }
    }

    /// Create an empty map with `count` initial buckets and `hasher`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` unless `count` is a power of two in `[16, 2^30]`.
    pub fn with_bucket_count_and_hasher(count: usize, hasher: S) -> InitResult<Self> {
        Ok(Self {
            table: HashTable::with_bucket_count_and_hasher(count, hasher)?,
        })
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.len
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.len == 0
    }

    /// Remove every entry and restore the initial bucket count.
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

    /// The hasher builder used to place keys.
    pub fn hasher(&self) -> &S {
        &self.table.hasher
    }

    /// Cursor at the first entry in bucket order, or `end()` when empty.
    pub fn begin(&self) -> HashCursor {
        self.table.begin()
    }

    /// Past-the-end position of forward iteration.
    pub fn end(&self) -> HashCursor {
        self.table.end()
    }

    /// Cursor at the last entry in bucket order; moving it forward walks backwards.
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

    /// Key and value under `cursor`; the end position is `OutOfRange`.
    pub fn entry_at(&self, cursor: &HashCursor) -> CursorResult<(&K, &V)> {
        self.table.entry_at(cursor)
    }

    /// Iterate entries in bucket order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }

    /// Iterate keys in bucket order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Iterate values in bucket order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Call `f(key, value, index)` for every entry in bucket order.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K, &V, usize),
    {
        self.table.for_each(f);
    }
}

impl<K: Hash + Ord, V, S: BuildHasher> HashMap<K, V, S> {
    /// Build a map from pairs with an explicit bucket count and hasher.
    pub fn from_pairs<I>(pairs: I, count: usize, hasher: S) -> InitResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::with_bucket_count_and_hasher(count, hasher)?;
        map.extend(pairs);
        Ok(map)
    }

    /// Insert `key` or overwrite its value; returns the previous value.
    pub fn set_element(&mut self, key: K, value: V) -> Option<V> {
        self.table.insert(key, value)
    }

    /// Value stored under `key`.
    pub fn get_element_by_key(&self, key: &K) -> Option<&V> {
        self.table.get(key)
    }

    /// Mutable access to the value under `key`. Does not invalidate cursors.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.table.get_mut(key)
    }

    /// Remove `key`; returns its value, or `None` when absent.
    pub fn erase_element_by_key(&mut self, key: &K) -> Option<V> {
        self.table.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove `key` and return the stored pair.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        self.table.remove_entry(key)
    }

    /// Whether `key` is present.
    pub fn find(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }

    /// Alias of [`find`](Self::find).
    pub fn contains_key(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

impl<K, V, S: Default> Default for HashMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for HashMap<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Ord, V: PartialEq, S: BuildHasher> PartialEq for HashMap<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get_element_by_key(key) == Some(value))
    }
}

impl<K: Hash + Ord, V, S: BuildHasher + Default> FromIterator<(K, V)> for HashMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Ord, V, S: BuildHasher> Extend<(K, V)> for HashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.table.insert(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_count_validation() {
        assert!(HashMap::<u8, u8>::with_bucket_count(16).is_ok());
        assert!(HashMap::<u8, u8>::with_bucket_count(15)
            .unwrap_err()
            .is_out_of_range());
        assert!(HashMap::<u8, u8>::with_bucket_count(48).is_err());
        assert_eq!(HashMap::<u8, u8>::new().bucket_count(), 16);
    }

    #[test]
    fn test_overwrite_and_erase() {
        let mut map = HashMap::new();
        assert_eq!(map.set_element(7, "x"), None);
        assert_eq!(map.set_element(7, "y"), Some("x"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.erase_element_by_key(&8), None);
        assert_eq!(map.len(), 1);
        *map.get_mut(&7).unwrap() = "z";
        assert_eq!(map.remove_entry(&7), Some((7, "z")));
        assert!(map.is_empty());
    }

    #[test]
    fn test_equality_ignores_bucket_layout() {
        let a: HashMap<i32, i32> = (0..100).map(|i| (i, i)).collect();
        let b = HashMap::from_pairs((0..100).rev().map(|i| (i, i)), 1024, DefaultHashBuilder::default())
            .unwrap();
        assert_ne!(a.bucket_count(), b.bucket_count());
        assert_eq!(a, b);
        let mut c = b.clone();
        c.set_element(5, -5);
        assert_ne!(a, c);
    }

    #[test]
    fn test_for_each_counts_every_entry() {
        let map: HashMap<u32, u32> = (0..40).map(|i| (i, i * i)).collect();
        let mut indices = Vec::new();
        let mut sum = 0;
        map.for_each(|_, v, i| {
            indices.push(i);
            sum += v;
        });
        assert_eq!(indices, (0..40).collect::<Vec<_>>());
        assert_eq!(sum, (0..40).map(|i| i * i).sum::<u32>());
        assert_eq!(map.keys().count(), 40);
    }
}

//! Bucket table shared by the hash map and hash set.
//!
//! Keys are spread over a power-of-two number of buckets by
//! `hash(key) & (bucket_count - 1)`. A bucket starts as a short list searched
//! linearly; once a list reaches [`TREEIFY_THRESHOLD`] entries in a table of at
//! least [`MIN_TREEIFY_SIZE`] buckets it is promoted to an ordered map, and a
//! tree bucket that shrinks to [`UNTREEIFY_THRESHOLD`] entries is demoted back
//! to a list. Smaller tables grow instead of promoting.
//!
//! The table doubles when `len > bucket_count * LOAD_FACTOR` and never shrinks
//! on its own; `clear()` restores the initial bucket count.

use crate::comparator::NaturalOrder;
use crate::error::{ContainerError, InitResult};
use crate::macros::trace_event;
use crate::ordered_map::OrderedMap;
use crate::types::next_container_id;
use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, BuildHasherDefault, Hash};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Bucket count used by `new()`.
pub const DEFAULT_BUCKET_COUNT: usize = 16;
/// Smallest accepted initial bucket count.
pub const MIN_BUCKET_COUNT: usize = 16;
/// The table stops growing at this many buckets.
pub const MAX_BUCKET_COUNT: usize = 1 << 30;
/// Growth trigger: `len > bucket_count * LOAD_FACTOR`.
pub const LOAD_FACTOR: f64 = 0.75;
/// List length at which a bucket is promoted to a tree.
pub const TREEIFY_THRESHOLD: usize = 8;
/// Tree length at or below which a bucket is demoted to a list.
pub const UNTREEIFY_THRESHOLD: usize = 6;
/// Tables with fewer buckets grow instead of promoting a long list.
pub const MIN_TREEIFY_SIZE: usize = 64;

/// Deterministic default hasher builder.
pub type DefaultHashBuilder = BuildHasherDefault<DefaultHasher>;

/// Check that `count` is a power of two within
/// `[MIN_BUCKET_COUNT, MAX_BUCKET_COUNT]`.
pub fn validate_bucket_count(count: usize) -> InitResult<()> {
    if count < MIN_BUCKET_COUNT || count > MAX_BUCKET_COUNT || !count.is_power_of_two() {
        return Err(ContainerError::invalid_bucket_count(
            count,
            MIN_BUCKET_COUNT,
            MAX_BUCKET_COUNT,
        ));
    }
    Ok(())
}

// ============================================================================
// BUCKETS
// ============================================================================

/// Storage of one occupied bucket.
#[derive(Debug, Clone)]
pub(crate) enum Bucket<K, V> {
    /// Entries in insertion order.
    List(Vec<(K, V)>),
    /// Entries in key order.
    Tree(OrderedMap<K, V, NaturalOrder>),
}

/// Representation of an occupied bucket, reported by `bucket_kinds()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketKind {
    List,
    Tree,
}

/// Diagnostic view of one occupied bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketInfo {
    pub index: usize,
    pub kind: BucketKind,
    pub len: usize,
}

impl<K, V> Bucket<K, V> {
    pub(crate) fn len(&self) -> usize {
        match self {
            Bucket::List(entries) => entries.len(),
            Bucket::Tree(tree) => tree.len(),
        }
    }

    pub(crate) fn kind(&self) -> BucketKind {
        match self {
            Bucket::List(_) => BucketKind::List,
            Bucket::Tree(_) => BucketKind::Tree,
        }
    }

    /// Entries in bucket order: insertion order for lists, key order for trees.
    fn into_entries(self) -> Vec<(K, V)> {
        match self {
            Bucket::List(entries) => entries,
            Bucket::Tree(tree) => tree.into_iter().collect(),
        }
    }
}

impl<K: Ord, V> Bucket<K, V> {
    fn tree_of(entries: Vec<(K, V)>) -> Self {
        Bucket::Tree(OrderedMap::from_pairs(entries, NaturalOrder))
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// Hash table with list buckets that turn into trees under collision pressure.
#[derive(Debug)]
pub(crate) struct HashTable<K, V, S = DefaultHashBuilder> {
    pub(crate) buckets: Vec<Option<Bucket<K, V>>>,
    pub(crate) initial_bucket_count: usize,
    pub(crate) len: usize,
    pub(crate) hasher: S,
    pub(crate) id: u64,
    pub(crate) stamp: u64,
}

impl<K, V, S> HashTable<K, V, S> {
    /// Table with `DEFAULT_BUCKET_COUNT` buckets.
    pub(crate) fn with_hasher(hasher: S) -> Self {
        Self {
            buckets: empty_buckets(DEFAULT_BUCKET_COUNT),
            initial_bucket_count: DEFAULT_BUCKET_COUNT,
            len: 0,
            hasher,
            id: next_container_id(),
            stamp: 0,
        }
    }

    pub(crate) fn with_bucket_count_and_hasher(count: usize, hasher: S) -> InitResult<Self> {
        validate_bucket_count(count)?;
        Ok(Self {
            buckets: empty_buckets(count),
            initial_bucket_count: count,
            ..Self::with_hasher(hasher)
        })
    }

    #[inline]
    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Drop every entry and restore the initial bucket count.
    pub(crate) fn clear(&mut self) {
        trace_event!(len = self.len, buckets = self.bucket_count(), "clearing hash table");
        self.buckets = empty_buckets(self.initial_bucket_count);
        self.len = 0;
        self.stamp += 1;
    }

    pub(crate) fn bucket_kinds(&self) -> Vec<BucketInfo> {
        self.buckets
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.as_ref().map(|bucket| BucketInfo {
                    index,
                    kind: bucket.kind(),
                    len: bucket.len(),
                })
            })
            .collect()
    }
}

impl<K: Hash + Ord, V, S: BuildHasher> HashTable<K, V, S> {
    #[inline]
    fn hash(&self, key: &K) -> usize {
        self.hasher.hash_one(key) as usize
    }

    #[inline]
    fn index_of(&self, key: &K) -> usize {
        self.hash(key) & (self.bucket_count() - 1)
    }

    /// Insert or overwrite; returns the previous value on overwrite.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.index_of(&key);
        let slot = &mut self.buckets[index];
        let bucket = match slot {
            None => {
                *slot = Some(Bucket::List(vec![(key, value)]));
                self.len += 1;
                self.stamp += 1;
                self.grow_if_loaded();
                return None;
            }
            Some(bucket) => bucket,
        };

        match bucket {
            Bucket::List(entries) => {
                if let Some(entry) = entries.iter_mut().find(|(k, _)| *k == key) {
                    return Some(std::mem::replace(&mut entry.1, value));
                }
                entries.push((key, value));
                let size = entries.len();
                self.len += 1;
                self.stamp += 1;
                if size >= TREEIFY_THRESHOLD {
                    if self.bucket_count() < MIN_TREEIFY_SIZE {
                        self.reallocate();
                        return None;
                    }
                    self.treeify(index);
                }
            }
            Bucket::Tree(tree) => {
                let previous = tree.set_element(key, value);
                if previous.is_some() {
                    return previous;
                }
                self.len += 1;
                self.stamp += 1;
            }
        }
        self.grow_if_loaded();
        None
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        match self.buckets[self.index_of(key)].as_ref()? {
            Bucket::List(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            Bucket::Tree(tree) => tree.get_element_by_key(key),
        }
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.index_of(key);
        match self.buckets[index].as_mut()? {
            Bucket::List(entries) => entries
                .iter_mut()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            Bucket::Tree(tree) => tree.get_mut(key),
        }
    }

    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove `key`; absent keys leave the table untouched.
    pub(crate) fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let index = self.index_of(key);
        let bucket = self.buckets[index].as_mut()?;
        let (removed, remaining, was_tree) = match bucket {
            Bucket::List(entries) => {
                let pos = entries.iter().position(|(k, _)| k == key)?;
                let removed = entries.remove(pos);
                (removed, entries.len(), false)
            }
            Bucket::Tree(tree) => {
                let removed = tree.remove_entry(key)?;
                (removed, tree.len(), true)
            }
        };
        self.len -= 1;
        self.stamp += 1;

        if remaining == 0 {
            self.buckets[index] = None;
        } else if was_tree && remaining <= UNTREEIFY_THRESHOLD {
            self.untreeify(index);
        }
        Some(removed)
    }

    // ============================================================================
    // REPRESENTATION CHANGES
    // ============================================================================

    fn treeify(&mut self, index: usize) {
        if let Some(Bucket::List(entries)) = self.buckets[index].take() {
            trace_event!(index, size = entries.len(), "treeify bucket");
            self.buckets[index] = Some(Bucket::tree_of(entries));
        }
    }

    fn untreeify(&mut self, index: usize) {
        if let Some(bucket) = self.buckets[index].take() {
            trace_event!(index, size = bucket.len(), "untreeify bucket");
            self.buckets[index] = Some(Bucket::List(bucket.into_entries()));
        }
    }

    fn grow_if_loaded(&mut self) {
        if self.len as f64 > self.bucket_count() as f64 * LOAD_FACTOR {
            self.reallocate();
        }
    }

    /// Double the bucket count, splitting every bucket on the new hash bit.
    ///
    /// Entries whose hash has the `original_count` bit clear stay at their
    /// index; the others move to `index + original_count`. Relative order is
    /// kept. A half split from a tree stays a tree when it holds more than
    /// `UNTREEIFY_THRESHOLD` entries; a half split from a list becomes a tree
    /// once it holds `TREEIFY_THRESHOLD` entries.
    fn reallocate(&mut self) {
        let original_count = self.bucket_count();
        if original_count >= MAX_BUCKET_COUNT {
            return;
        }
        trace_event!(
            from = original_count,
            to = original_count << 1,
            len = self.len,
            "growing hash table"
        );

        let old = std::mem::replace(&mut self.buckets, empty_buckets(original_count << 1));
        for (index, slot) in old.into_iter().enumerate() {
            let Some(bucket) = slot else {
                continue;
            };
            let from_tree = bucket.kind() == BucketKind::Tree;
            let (low, high): (Vec<_>, Vec<_>) = bucket
                .into_entries()
                .into_iter()
                .partition(|(key, _)| self.hash(key) & original_count == 0);
            self.buckets[index] = rebuild_bucket(low, from_tree);
            self.buckets[index + original_count] = rebuild_bucket(high, from_tree);
        }
        self.stamp += 1;
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for HashTable<K, V, S> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            initial_bucket_count: self.initial_bucket_count,
            len: self.len,
            hasher: self.hasher.clone(),
            id: next_container_id(),
            stamp: 0,
        }
    }
}

fn empty_buckets<K, V>(count: usize) -> Vec<Option<Bucket<K, V>>> {
    std::iter::repeat_with(|| None).take(count).collect()
}

fn rebuild_bucket<K: Ord, V>(entries: Vec<(K, V)>, from_tree: bool) -> Option<Bucket<K, V>> {
    if entries.is_empty() {
        return None;
    }
    let promote = if from_tree {
        entries.len() > UNTREEIFY_THRESHOLD
    } else {
        entries.len() >= TREEIFY_THRESHOLD
    };
    Some(if promote {
        Bucket::tree_of(entries)
    } else {
        Bucket::List(entries)
    })
}

//! Cursors and iterators over the bucket table.
//!
//! Traversal visits buckets in index order and, inside a bucket, list entries
//! in insertion order or tree entries in key order. The order is stable only
//! until the next structural change.

use crate::comparator::NaturalOrder;
use crate::error::{ContainerError, CursorResult};
use crate::hash_table::{Bucket, HashTable};
use crate::iteration::{Direction, Iter as TreeIter};
use crate::types::{NodeId, END_NODE};

/// Bucket index of the end position.
const END_BUCKET: usize = usize::MAX;

/// Position in a hash container.
///
/// `slot` is the entry's index inside a list bucket, or the node id inside a
/// tree bucket. Cursors are invalidated by any structural change, including
/// growth and bucket promotion or demotion.
#[derive(Debug, Clone, Copy)]
pub struct HashCursor {
    pub(crate) bucket: usize,
    pub(crate) slot: usize,
    pub(crate) direction: Direction,
    pub(crate) owner: u64,
    pub(crate) stamp: u64,
}

impl HashCursor {
    pub fn is_end(&self) -> bool {
        self.bucket == END_BUCKET
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl PartialEq for HashCursor {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.bucket == other.bucket && self.slot == other.slot
    }
}

impl Eq for HashCursor {}

type Position = (usize, usize);

const END_POSITION: Position = (END_BUCKET, 0);

impl<K, V> Bucket<K, V> {
    fn first_slot(&self) -> usize {
        match self {
            Bucket::List(_) => 0,
            Bucket::Tree(tree) => tree.tree.header.leftmost as usize,
        }
    }

    fn last_slot(&self) -> usize {
        match self {
            Bucket::List(entries) => entries.len() - 1,
            Bucket::Tree(tree) => tree.tree.header.rightmost as usize,
        }
    }

    fn slot_after(&self, slot: usize) -> Option<usize> {
        match self {
            Bucket::List(entries) => (slot + 1 < entries.len()).then_some(slot + 1),
            Bucket::Tree(tree) => {
                let next = tree.tree.successor(slot as NodeId);
                (next != END_NODE).then_some(next as usize)
            }
        }
    }

    fn slot_before(&self, slot: usize) -> Option<usize> {
        match self {
            Bucket::List(_) => slot.checked_sub(1),
            Bucket::Tree(tree) => {
                let prev = tree.tree.predecessor(slot as NodeId);
                (prev != END_NODE).then_some(prev as usize)
            }
        }
    }

    fn entry(&self, slot: usize) -> Option<(&K, &V)> {
        match self {
            Bucket::List(entries) => entries.get(slot).map(|(k, v)| (k, v)),
            Bucket::Tree(tree) => tree
                .tree
                .arena
                .get(slot as NodeId)
                .map(|node| (node.key(), node.value())),
        }
    }
}

impl<K, V, S> HashTable<K, V, S> {
    fn make_cursor(&self, (bucket, slot): Position, direction: Direction) -> HashCursor {
        HashCursor {
            bucket,
            slot,
            direction,
            owner: self.id,
            stamp: self.stamp,
        }
    }

    fn validate_cursor(&self, cursor: &HashCursor) -> CursorResult<()> {
        if cursor.owner != self.id {
            return Err(ContainerError::foreign_cursor(cursor.owner, self.id));
        }
        if cursor.stamp != self.stamp {
            return Err(ContainerError::stale_cursor(
                cursor.slot as NodeId,
                cursor.stamp,
                self.stamp,
            ));
        }
        Ok(())
    }

    fn occupied(&self, index: usize) -> Option<&Bucket<K, V>> {
        self.buckets.get(index).and_then(Option::as_ref)
    }

    fn first_position_from(&self, start: usize) -> Position {
        (start..self.buckets.len())
            .find_map(|i| self.occupied(i).map(|b| (i, b.first_slot())))
            .unwrap_or(END_POSITION)
    }

    fn last_position_before(&self, stop: usize) -> Position {
        (0..stop.min(self.buckets.len()))
            .rev()
            .find_map(|i| self.occupied(i).map(|b| (i, b.last_slot())))
            .unwrap_or(END_POSITION)
    }

    fn position_after(&self, (bucket, slot): Position) -> Position {
        match self.occupied(bucket).and_then(|b| b.slot_after(slot)) {
            Some(next) => (bucket, next),
            None => self.first_position_from(bucket + 1),
        }
    }

    fn position_before(&self, (bucket, slot): Position) -> Position {
        match self.occupied(bucket).and_then(|b| b.slot_before(slot)) {
            Some(prev) => (bucket, prev),
            None => self.last_position_before(bucket),
        }
    }

    pub(crate) fn begin(&self) -> HashCursor {
        self.make_cursor(self.first_position_from(0), Direction::Forward)
    }

    pub(crate) fn end(&self) -> HashCursor {
        self.make_cursor(END_POSITION, Direction::Forward)
    }

    pub(crate) fn rbegin(&self) -> HashCursor {
        self.make_cursor(self.last_position_before(usize::MAX), Direction::Reverse)
    }

    pub(crate) fn rend(&self) -> HashCursor {
        self.make_cursor(END_POSITION, Direction::Reverse)
    }

    pub(crate) fn move_next(&self, cursor: &mut HashCursor) -> CursorResult<()> {
        self.validate_cursor(cursor)?;
        if cursor.is_end() {
            return Err(ContainerError::cursor_exhausted("advance"));
        }
        let here = (cursor.bucket, cursor.slot);
        (cursor.bucket, cursor.slot) = match cursor.direction {
            Direction::Forward => self.position_after(here),
            Direction::Reverse => self.position_before(here),
        };
        Ok(())
    }

    pub(crate) fn move_prev(&self, cursor: &mut HashCursor) -> CursorResult<()> {
        self.validate_cursor(cursor)?;
        let here = (cursor.bucket, cursor.slot);
        let (first, step): (Position, Position) = match cursor.direction {
            Direction::Forward => {
                let first = self.first_position_from(0);
                let step = if cursor.is_end() {
                    self.last_position_before(usize::MAX)
                } else {
                    self.position_before(here)
                };
                (first, step)
            }
            Direction::Reverse => {
                let first = self.last_position_before(usize::MAX);
                let step = if cursor.is_end() {
                    self.first_position_from(0)
                } else {
                    self.position_after(here)
                };
                (first, step)
            }
        };
        if here == first {
            return Err(ContainerError::cursor_exhausted("retreat"));
        }
        (cursor.bucket, cursor.slot) = step;
        Ok(())
    }

    pub(crate) fn entry_at(&self, cursor: &HashCursor) -> CursorResult<(&K, &V)> {
        self.validate_cursor(cursor)?;
        self.occupied(cursor.bucket)
            .and_then(|b| b.entry(cursor.slot))
            .ok_or_else(ContainerError::end_dereference)
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            front: None,
            back: None,
            remaining: self.len,
        }
    }

    pub(crate) fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V, usize),
    {
        for (index, (key, value)) in self.iter().enumerate() {
            f(key, value, index);
        }
    }
}

// ============================================================================
// BORROWED ITERATOR
// ============================================================================

enum BucketIter<'a, K, V> {
    List(std::slice::Iter<'a, (K, V)>),
    Tree(TreeIter<'a, K, V, NaturalOrder>),
}

impl<'a, K, V> BucketIter<'a, K, V> {
    fn new(bucket: &'a Bucket<K, V>) -> Self {
        match bucket {
            Bucket::List(entries) => BucketIter::List(entries.iter()),
            Bucket::Tree(tree) => BucketIter::Tree(tree.iter()),
        }
    }

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        match self {
            BucketIter::List(iter) => iter.next().map(|(k, v)| (k, v)),
            BucketIter::Tree(iter) => iter.next(),
        }
    }

    fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        match self {
            BucketIter::List(iter) => iter.next_back().map(|(k, v)| (k, v)),
            BucketIter::Tree(iter) => iter.next_back(),
        }
    }
}

/// Iterator over the entries of a hash container in bucket order.
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, Option<Bucket<K, V>>>,
    front: Option<BucketIter<'a, K, V>>,
    back: Option<BucketIter<'a, K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.front.as_mut().and_then(BucketIter::next) {
                self.remaining -= 1;
                return Some(item);
            }
            match self.buckets.by_ref().flatten().next() {
                Some(bucket) => self.front = Some(BucketIter::new(bucket)),
                None => {
                    let item = self.back.as_mut().and_then(BucketIter::next);
                    if item.is_some() {
                        self.remaining -= 1;
                    }
                    return item;
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.back.as_mut().and_then(BucketIter::next_back) {
                self.remaining -= 1;
                return Some(item);
            }
            match self.buckets.by_ref().flatten().next_back() {
                Some(bucket) => self.back = Some(BucketIter::new(bucket)),
                None => {
                    let item = self.front.as_mut().and_then(BucketIter::next_back);
                    if item.is_some() {
                        self.remaining -= 1;
                    }
                    return item;
                }
            }
        }
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

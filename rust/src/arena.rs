//! Index-based node arena with slot reuse.
//!
//! Tree nodes live in a `Vec` and refer to each other by `NodeId`. Freed slots
//! go on a free list and are handed out again by the next allocation, so a tree
//! that sees steady insert/erase traffic does not grow its storage.

use crate::types::{NodeId, NULL_NODE};
use std::ops::{Index, IndexMut};

/// Statistics for a node arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaStats {
    pub total_capacity: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    pub utilization: f64,
    pub fragmentation: f64,
}

/// Arena allocator for tree nodes.
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<T> {
    /// Slot storage; `None` marks a slot on the free list
    storage: Vec<Option<T>>,
    /// Free slot indices for reuse
    free_list: Vec<usize>,
    /// Number of occupied slots
    allocated: usize,
}

impl<T> NodeArena<T> {
    /// Create a new empty arena
    pub(crate) fn new() -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            allocated: 0,
        }
    }

    /// Create a new arena with pre-allocated capacity
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            allocated: 0,
        }
    }

    /// Allocate a new item in the arena and return its ID
    #[inline]
    pub(crate) fn allocate(&mut self, item: T) -> NodeId {
        let index = if let Some(free_index) = self.free_list.pop() {
            self.storage[free_index] = Some(item);
            free_index
        } else {
            let index = self.storage.len();
            self.storage.push(Some(item));
            index
        };
        self.allocated += 1;

        debug_assert!(index < NULL_NODE as usize, "arena exhausted the NodeId space");
        index as NodeId
    }

    /// Deallocate an item from the arena and return it
    #[inline]
    pub(crate) fn deallocate(&mut self, id: NodeId) -> Option<T> {
        if id == NULL_NODE {
            return None;
        }
        let index = id as usize;
        let item = self.storage.get_mut(index)?.take()?;
        self.free_list.push(index);
        self.allocated -= 1;
        Some(item)
    }

    /// Get a reference to an item in the arena
    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        if id == NULL_NODE {
            return None;
        }
        self.storage.get(id as usize)?.as_ref()
    }

    /// Get a mutable reference to an item in the arena
    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if id == NULL_NODE {
            return None;
        }
        self.storage.get_mut(id as usize)?.as_mut()
    }

    /// Get mutable references to two distinct items at once.
    pub(crate) fn get_pair_mut(&mut self, a: NodeId, b: NodeId) -> Option<(&mut T, &mut T)> {
        if a == b || a == NULL_NODE || b == NULL_NODE {
            return None;
        }
        let (lo, hi, swapped) = if a < b { (a, b, false) } else { (b, a, true) };
        let (head, tail) = self.storage.split_at_mut(hi as usize);
        let first = head.get_mut(lo as usize)?.as_mut()?;
        let second = tail.get_mut(0)?.as_mut()?;
        if swapped {
            Some((second, first))
        } else {
            Some((first, second))
        }
    }

    /// Get arena statistics
    pub(crate) fn stats(&self) -> ArenaStats {
        let total_capacity = self.storage.capacity();
        let allocated_count = self.allocated;
        let free_count = self.free_list.len();
        let utilization = if total_capacity > 0 {
            allocated_count as f64 / total_capacity as f64
        } else {
            0.0
        };
        let fragmentation = if allocated_count > 0 {
            free_count as f64 / (allocated_count + free_count) as f64
        } else {
            0.0
        };

        ArenaStats {
            total_capacity,
            allocated_count,
            free_count,
            utilization,
            fragmentation,
        }
    }

    /// Clear all items from the arena
    pub(crate) fn clear(&mut self) {
        self.storage.clear();
        self.free_list.clear();
        self.allocated = 0;
    }
}

impl<T> Index<NodeId> for NodeArena<T> {
    type Output = T;

    #[inline]
    fn index(&self, id: NodeId) -> &T {
        match self.get(id) {
            Some(item) => item,
            None => panic!("arena access to vacant node {}", id),
        }
    }
}

impl<T> IndexMut<NodeId> for NodeArena<T> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut T {
        match self.get_mut(id) {
            Some(item) => item,
            None => panic!("arena access to vacant node {}", id),
        }
    }
}

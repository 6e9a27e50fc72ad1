//! Red-black tree containers and hash containers with treeified buckets.
//!
//! The crate is built around one arena-backed red-black tree engine,
//! [`RbTree`], which backs:
//!
//! - [`OrderedMap`] and [`OrderedSet`]: sorted containers with bound queries,
//!   hinted insertion, positional access and detached [`Cursor`]s.
//! - [`HashMap`] and [`HashSet`]: bucket tables whose buckets start as short
//!   lists and are promoted to ordered maps once collisions pile up, bounding
//!   the lookup cost of a crowded bucket by O(log n).
//!
//! Cursors are plain `Copy` values. They remember which container produced
//! them and the container's structural stamp, so a cursor used after an
//! insert of a new key, an erase, a clear or a table resize is rejected with
//! [`ContainerError::InvalidIterator`] instead of reading moved data.
//!
//! ```
//! use treeify::{HashMap, OrderedMap};
//!
//! let mut scores = OrderedMap::new();
//! scores.set_element("carol", 7);
//! scores.set_element("alice", 9);
//! let first = scores.begin();
//! assert_eq!(scores.key_at(&first), Ok(&"alice"));
//!
//! let mut index: HashMap<&str, usize> = HashMap::new();
//! index.set_element("alice", 0);
//! assert!(index.find(&"alice"));
//! ```
//!
//! Enable the `tracing` feature to get debug events for table growth, bucket
//! promotion and demotion, and container clears.

mod arena;
mod comparator;
mod construction;
mod delete_operations;
mod error;
mod get_operations;
mod hash_iteration;
mod hash_map;
mod hash_set;
mod hash_table;
mod insert_operations;
mod iteration;
mod macros;
mod node;
mod ordered_map;
mod ordered_set;
mod range_queries;
mod tree_structure;
mod types;
mod validation;

pub use arena::ArenaStats;
pub use comparator::{Comparator, NaturalOrder};
pub use error::{
    ContainerError, ContainerResult, ContainerResultExt, CursorResult, InitResult, PositionResult,
};
pub use hash_iteration::{HashCursor, Iter as HashIter};
pub use hash_map::HashMap;
pub use hash_set::{HashSet, SetIter as HashSetIter};
pub use hash_table::{
    validate_bucket_count, BucketInfo, BucketKind, DefaultHashBuilder, DEFAULT_BUCKET_COUNT,
    LOAD_FACTOR, MAX_BUCKET_COUNT, MIN_BUCKET_COUNT, MIN_TREEIFY_SIZE, TREEIFY_THRESHOLD,
    UNTREEIFY_THRESHOLD,
};
pub use iteration::{Cursor, Direction, IntoIter, Iter, Keys, Values};
pub use ordered_map::OrderedMap;
pub use ordered_set::{OrderedSet, SetIntoIter, SetIter};
pub use types::RbTree;

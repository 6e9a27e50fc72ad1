use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{BuildHasherDefault, Hasher};
use treeify::{HashMap, OrderedMap, OrderedSet};

#[derive(Debug, Clone)]
enum Operation {
    Insert(u8, u16),
    Remove(u8),
    Get(u8),
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    proptest::collection::vec(
        prop_oneof![
            3 => (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Operation::Insert(k, v)),
            2 => any::<u8>().prop_map(Operation::Remove),
            1 => any::<u8>().prop_map(Operation::Get),
        ],
        1..300,
    )
}

/// Folds keys onto 4 hash values to force tree buckets.
#[derive(Default)]
struct FoldingHasher(u64);

impl Hasher for FoldingHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.wrapping_add(u64::from(b));
        }
    }

    fn finish(&self) -> u64 {
        self.0 & 3
    }
}

proptest! {
    #[test]
    fn test_ordered_map_matches_std_map(ops in operations()) {
        let mut std_map = BTreeMap::new();
        let mut map = OrderedMap::new();

        for op in ops {
            match op {
                Operation::Insert(k, v) => {
                    prop_assert_eq!(map.set_element(k, v), std_map.insert(k, v), "insert {}", k);
                }
                Operation::Remove(k) => {
                    prop_assert_eq!(map.erase_element_by_key(&k), std_map.remove(&k), "remove {}", k);
                }
                Operation::Get(k) => {
                    prop_assert_eq!(map.get_element_by_key(&k), std_map.get(&k), "get {}", k);
                }
            }
        }

        prop_assert_eq!(map.len(), std_map.len());
        prop_assert!(map.check_invariants_detailed().is_ok());
        prop_assert!(map.iter().eq(std_map.iter()));
    }

    #[test]
    fn test_hash_map_matches_std_map(ops in operations()) {
        let mut std_map = BTreeMap::new();
        let mut map: HashMap<u8, u16, BuildHasherDefault<FoldingHasher>> = HashMap::default();

        for op in ops {
            match op {
                Operation::Insert(k, v) => {
                    prop_assert_eq!(map.set_element(k, v), std_map.insert(k, v), "insert {}", k);
                }
                Operation::Remove(k) => {
                    prop_assert_eq!(map.erase_element_by_key(&k), std_map.remove(&k), "remove {}", k);
                }
                Operation::Get(k) => {
                    prop_assert_eq!(map.get_element_by_key(&k), std_map.get(&k), "get {}", k);
                }
            }
        }

        prop_assert_eq!(map.len(), std_map.len());
        let mut entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_unstable();
        let expected: Vec<_> = std_map.into_iter().collect();
        prop_assert_eq!(entries, expected);
    }

    #[test]
    fn test_bounds_match_btreeset(keys in proptest::collection::vec(any::<i16>(), 0..200), probe in any::<i16>()) {
        let set: OrderedSet<i16> = keys.iter().copied().collect();
        let model: BTreeSet<i16> = keys.into_iter().collect();

        prop_assert_eq!(set.key_at(&set.lower_bound(&probe)).ok(), model.range(probe..).next());
        prop_assert_eq!(
            set.key_at(&set.upper_bound(&probe)).ok(),
            model.range((std::ops::Bound::Excluded(probe), std::ops::Bound::Unbounded)).next()
        );
        prop_assert_eq!(set.key_at(&set.reverse_lower_bound(&probe)).ok(), model.range(..=probe).next_back());
        prop_assert_eq!(set.key_at(&set.reverse_upper_bound(&probe)).ok(), model.range(..probe).next_back());
    }

    #[test]
    fn test_hinted_insert_is_pure_optimization(keys in proptest::collection::vec(any::<u16>(), 1..150), hint_key in any::<u16>()) {
        let mut plain = OrderedSet::new();
        let mut hinted = OrderedSet::new();
        for &k in &keys {
            plain.insert(k);
            let hint = hinted.lower_bound(&hint_key);
            hinted.insert_with_hint(k, &hint);
        }
        prop_assert!(plain == hinted);
        prop_assert!(hinted.check_invariants());
    }
}

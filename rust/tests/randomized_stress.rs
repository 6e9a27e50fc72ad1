use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashMap as StdHashMap};
use std::hash::{BuildHasherDefault, Hasher};
use treeify::{assert_tree_valid, HashMap, OrderedMap};

/// Keeps only the low bits so a handful of buckets take every key.
#[derive(Default)]
struct CoarseHasher(u64);

impl Hasher for CoarseHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.wrapping_mul(31).wrapping_add(u64::from(b));
        }
    }

    fn finish(&self) -> u64 {
        self.0 % 3
    }
}

#[test]
fn test_ordered_map_against_btreemap() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut map = OrderedMap::new();
    let mut model = BTreeMap::new();

    for step in 0..20_000 {
        let key: u16 = rng.gen_range(0..2_000);
        match rng.gen_range(0..10) {
            0..=5 => {
                let value: u32 = rng.gen();
                assert_eq!(map.set_element(key, value), model.insert(key, value));
            }
            6..=8 => {
                assert_eq!(map.erase_element_by_key(&key), model.remove(&key));
            }
            _ => {
                let ours = map.key_at(&map.lower_bound(&key)).ok().copied();
                let theirs = model.range(key..).next().map(|(k, _)| *k);
                assert_eq!(ours, theirs, "lower_bound({})", key);
            }
        }
        if step % 1_000 == 0 {
            assert_tree_valid!(map, "step {}", step);
        }
    }

    assert_eq!(map.len(), model.len());
    assert!(map.iter().eq(model.iter()));
    assert_tree_valid!(map);
}

#[test]
fn test_positional_erase_against_vec() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut map: OrderedMap<u32, ()> = (0..500).map(|i| (i, ())).collect();
    let mut model: Vec<u32> = (0..500).collect();
    while !model.is_empty() {
        let pos = rng.gen_range(0..model.len());
        let expected = model.remove(pos);
        assert_eq!(map.erase_element_by_pos(pos).map(|(k, _)| k), Ok(expected));
    }
    assert!(map.is_empty());
}

#[test]
fn test_hash_map_against_std_with_collisions() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut map: HashMap<u32, u64, BuildHasherDefault<CoarseHasher>> = HashMap::default();
    let mut model = StdHashMap::new();

    for _ in 0..10_000 {
        let key: u32 = rng.gen_range(0..400);
        if rng.gen_bool(0.6) {
            let value: u64 = rng.gen();
            assert_eq!(map.set_element(key, value), model.insert(key, value));
        } else {
            assert_eq!(map.erase_element_by_key(&key), model.remove(&key));
        }
        assert_eq!(map.len(), model.len());
    }

    for (k, v) in &model {
        assert_eq!(map.get_element_by_key(k), Some(v));
    }
    assert_eq!(map.iter().count(), model.len());
}

#[test]
fn test_hash_map_against_std_default_hasher() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut map = HashMap::new();
    let mut model = StdHashMap::new();

    for _ in 0..50_000 {
        let key: u64 = rng.gen_range(0..20_000);
        if rng.gen_bool(0.7) {
            assert_eq!(map.set_element(key, key), model.insert(key, key));
        } else {
            assert_eq!(map.erase_element_by_key(&key), model.remove(&key));
        }
    }

    assert_eq!(map.len(), model.len());
    for key in 0..20_000u64 {
        assert_eq!(map.find(&key), model.contains_key(&key));
    }
}

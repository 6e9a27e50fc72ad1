use treeify::{assert_tree_valid, Direction, NaturalOrder, OrderedMap, OrderedSet, RbTree};

fn abc() -> OrderedMap<i32, char> {
    OrderedMap::from_pairs(vec![(1, 'a'), (3, 'b'), (5, 'c')], NaturalOrder)
}

#[test]
fn test_bound_queries_on_small_map() {
    let map = abc();
    assert_eq!(map.entry_at(&map.lower_bound(&4)), Ok((&5, &'c')));
    assert!(map.upper_bound(&5).is_end());
    assert_eq!(map.entry_at(&map.reverse_lower_bound(&3)), Ok((&3, &'b')));
    assert!(map.reverse_upper_bound(&1).is_end());
}

#[test]
fn test_set_iterates_sorted_unique() {
    let set: OrderedSet<i32> = [5, 1, 4, 1, 5, 9, 2, 6].into_iter().collect();
    let keys: Vec<_> = set.iter().copied().collect();
    assert_eq!(keys, vec![1, 2, 4, 5, 6, 9]);
    assert_eq!(set.len(), 6);
}

#[test]
fn test_overwrite_keeps_size() {
    let mut map = OrderedMap::new();
    map.set_element("k", 1);
    map.set_element("k", 2);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get_element_by_key(&"k"), Some(&2));
}

#[test]
fn test_end_dereference_is_out_of_range() {
    let map = abc();
    let err = map.entry_at(&map.end()).unwrap_err();
    assert!(err.is_out_of_range());
    assert!(err.to_string().starts_with("Out of range"));
}

#[test]
fn test_no_op_delete() {
    let mut map = abc();
    assert_eq!(map.erase_element_by_key(&42), None);
    assert_eq!(map.len(), 3);
    assert_tree_valid!(map);
}

#[test]
fn test_cursor_moves_past_bounds_fail() {
    let map = abc();
    let mut cursor = map.end();
    assert!(map.move_next(&mut cursor).unwrap_err().is_out_of_range());
    let mut cursor = map.begin();
    assert!(map.move_prev(&mut cursor).unwrap_err().is_out_of_range());
    let mut cursor = map.rend();
    assert!(map.move_next(&mut cursor).unwrap_err().is_out_of_range());
}

#[test]
fn test_cursor_from_other_container_rejected() {
    let a = abc();
    let b = abc();
    let err = b.entry_at(&a.begin()).unwrap_err();
    assert!(err.is_invalid_iterator());
}

#[test]
fn test_erase_while_walking_forward() {
    let mut map: OrderedMap<i32, i32> = (0..100).map(|i| (i, i)).collect();
    let mut cursor = map.begin();
    while !cursor.is_end() {
        let (&k, _) = map.entry_at(&cursor).unwrap();
        if k % 2 == 0 {
            cursor = map.erase_element_by_cursor(&cursor).unwrap();
        } else {
            map.move_next(&mut cursor).unwrap();
        }
    }
    let keys: Vec<_> = map.keys().copied().collect();
    assert_eq!(keys, (0..100).filter(|k| k % 2 == 1).collect::<Vec<_>>());
    assert_tree_valid!(map);
}

#[test]
fn test_erase_while_walking_backward() {
    let mut set: OrderedSet<i32> = (0..50).collect();
    let mut cursor = set.rbegin();
    assert_eq!(cursor.direction(), Direction::Reverse);
    while !cursor.is_end() {
        let k = *set.key_at(&cursor).unwrap();
        if k % 5 != 0 {
            cursor = set.erase_element_by_cursor(&cursor).unwrap();
        } else {
            set.move_next(&mut cursor).unwrap();
        }
    }
    let keys: Vec<_> = set.iter().copied().collect();
    assert_eq!(keys, vec![0, 5, 10, 15, 20, 25, 30, 35, 40, 45]);
    assert_tree_valid!(set);
}

#[test]
fn test_hinted_inserts_build_the_same_tree_content() {
    let mut plain = OrderedMap::new();
    let mut hinted = OrderedMap::new();
    let mut hint = hinted.end();
    for k in (0..500).map(|i| (i * 7919) % 1000) {
        plain.set_element(k, k);
        hinted.set_element_with_hint(k, k, &hint);
        hint = hinted.lower_bound(&(k + 1));
    }
    assert_eq!(plain, hinted);
    assert_tree_valid!(hinted);
}

#[test]
fn test_positional_access_round_trip() {
    let map: OrderedMap<u32, u32> = (0..64).map(|i| (i * 2, i)).collect();
    for pos in 0..64 {
        assert_eq!(map.get_element_by_pos(pos), Ok((&(pos as u32 * 2), &(pos as u32))));
    }
    assert!(map.get_element_by_pos(64).unwrap_err().is_out_of_range());
}

#[test]
fn test_engine_height_bound() {
    let mut tree = RbTree::new();
    for i in 0..10_000u32 {
        tree.set(i, (), None);
    }
    // 2 * log2(n + 1)
    assert!(tree.height() <= 27, "height {}", tree.height());
    assert_tree_valid!(tree);
}

#[test]
fn test_clone_is_independent() {
    let original = abc();
    let mut copy = original.clone();
    copy.set_element(2, 'z');
    assert_eq!(original.len(), 3);
    assert_eq!(copy.len(), 4);
    assert!(copy.entry_at(&original.begin()).unwrap_err().is_invalid_iterator());
}

use std::collections::BTreeMap;

use proptest::prelude::*;

use super::*;
use crate::{config::TreeConfig, tree::{IntPointerIterator, IntRbMap}};

#[derive(Debug, Clone)]
enum Op {
    Insert(i32),
    InsertDuplicate(i32),
    Remove(i32),
    Find(i32),
    Flush
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // a narrow key range keeps collisions and duplicates frequent
    let key = -64i32..64;
    let op = prop_oneof![
        35 => key.clone().prop_map(Op::Insert),
        25 => key.clone().prop_map(Op::InsertDuplicate),
        30 => key.clone().prop_map(Op::Remove),
        9 => key.clone().prop_map(Op::Find),
        1 => Just(Op::Flush),
    ];
    prop::collection::vec(op, 0..=600)
}

#[derive(Debug, Clone)]
enum MapOp {
    Put(i32, i32),
    Remove(i32),
    Get(i32),
    GetClose(i32),
    Clear
}

fn map_ops_strategy() -> impl Strategy<Value = Vec<MapOp>> {
    let key = -100i32..100;
    let op = prop_oneof![
        40 => (key.clone(), any::<i32>()).prop_map( |(k, v)| MapOp::Put(k, v) ),
        25 => key.clone().prop_map(MapOp::Remove),
        15 => key.clone().prop_map(MapOp::Get),
        19 => key.clone().prop_map(MapOp::GetClose),
        1 => Just(MapOp::Clear),
    ];
    prop::collection::vec(op, 0..=600)
}

fn expand(model: &BTreeMap<i32, usize>) -> Vec<i32> {
    model.iter().flat_map( |(&key, &count)| std::iter::repeat(key).take(count) ).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(seed in any::<u64>(), ops in ops_strategy()) {
        let mut tree = IntRbTree::with_config(TreeConfig::default().with_capacity(4).with_seed(seed));
        let mut model: BTreeMap<i32, usize> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    let created = tree.insert_reporting(key).is_created();
                    prop_assert_eq!(created, !model.contains_key(&key));
                    model.entry(key).or_insert(1);
                }
                Op::InsertDuplicate(key) => {
                    let ptr = tree.insert_allowing_duplicates(key);
                    prop_assert_eq!(tree.key(ptr), Some(key));
                    *model.entry(key).or_insert(0) += 1;
                }
                Op::Remove(key) => {
                    let removed = tree.remove(key);
                    let expected = match model.get_mut(&key) {
                        Some(count) => {
                            *count -= 1;
                            if *count == 0 {
                                model.remove(&key);
                            }
                            true
                        }
                        None => false
                    };
                    prop_assert_eq!(removed, expected);
                }
                Op::Find(key) => {
                    let found = tree.find(key);
                    prop_assert_eq!(found.is_some(), model.contains_key(&key));
                    if let Some(ptr) = found {
                        prop_assert_eq!(tree.key(ptr), Some(key));
                    }
                }
                Op::Flush => {
                    tree.flush();
                    model.clear();
                }
            }

            prop_assert_eq!(tree.size(), model.values().sum::<usize>());
            prop_assert!(tree.is_valid_red_black_tree());
        }

        validate_rb_tree(&tree);
        prop_assert_eq!(tree.keys().collect::<Vec<_>>(), expand(&model));
        prop_assert_eq!(tree.min_key(), model.keys().next().copied());
        prop_assert_eq!(tree.max_key(), model.keys().next_back().copied());
        prop_assert!(tree.max_depth() <= depth_bound(tree.len()));
    }

    #[test]
    fn prop_lower_bound(seed in any::<u64>(), keys in prop::collection::vec(-32i32..32, 0..=200), query in -40i32..40) {
        let mut tree = IntRbTree::with_config(TreeConfig::default().with_seed(seed));
        for key in keys.iter().copied() {
            tree.insert_allowing_duplicates(key);
        }
        let ptr = tree.lower_bound(query);
        match keys.iter().copied().filter( |&key| key >= query ).min() {
            None => prop_assert_eq!(ptr, Handle::NIL),
            Some(expected) => {
                prop_assert_eq!(tree.key(ptr), Some(expected));
                // leftmost of an equal run
                let before = tree.predecessor(ptr);
                prop_assert!(before.is_nil() || tree.key(before) < Some(query));
            }
        }
        let any_equal = tree.lower_bound_no_dup_skip(query);
        if keys.contains(&query) {
            prop_assert_eq!(tree.key(any_equal), Some(query));
        } else {
            prop_assert_eq!(any_equal, ptr);
        }
    }

    #[test]
    fn prop_cursor_matches_keys(keys in prop::collection::btree_set(any::<i32>(), 0..=100)) {
        let mut tree = IntRbTree::new();
        for key in keys.iter().rev().copied() {
            tree.insert(key);
        }
        validate_rb_tree(&tree);
        let mut cursor = tree.pointer_iter();
        let mut walked = Vec::new();
        while cursor.is_valid() {
            walked.push(cursor.get().unwrap());
            cursor.inc();
        }
        prop_assert_eq!(walked, keys.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn prop_map_equivalence(ops in map_ops_strategy()) {
        let mut map = IntRbMap::with_capacity(4);
        let mut model: BTreeMap<i32, i32> = BTreeMap::new();

        for op in ops {
            match op {
                MapOp::Put(key, value) => prop_assert_eq!(map.put(key, value), model.insert(key, value)),
                MapOp::Remove(key) => prop_assert_eq!(map.remove(key), model.remove(&key)),
                MapOp::Get(key) => prop_assert_eq!(map.get(key), model.get(&key).copied()),
                MapOp::GetClose(key) => prop_assert_eq!(map.get_mostly_close(key), model.get(&key).copied()),
                MapOp::Clear => {
                    map.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(map.len(), model.len());
        }

        validate_rb_tree(map.tree());
        prop_assert_eq!(map.iter().collect::<Vec<_>>(), model.into_iter().collect::<Vec<_>>());
    }
}

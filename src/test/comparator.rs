use super::*;
use crate::tree::{Comparator, IntPointerIterator, Natural};

#[test]
fn descending_order() {
    let mut tree = IntRbTree::with_comparator( |a: i32, b: i32| b.cmp(&a) );
    for x in [1, 2, 3] {
        tree.insert(x);
    }
    validate_rb_tree(&tree);
    assert_eq!(tree.keys().collect::<Vec<_>>(), vec![3, 2, 1]);
    assert_eq!(tree.min_key(), Some(3));
    assert_eq!(tree.max_key(), Some(1));
    // "not less" under the descending order
    assert_eq!(tree.key(tree.lower_bound(2)), Some(2));
    assert_eq!(tree.key(tree.lower_bound(4)), Some(3));
    assert_eq!(tree.lower_bound(0), Handle::NIL);
    assert!(tree.remove(3));
    assert_eq!(tree.keys().collect::<Vec<_>>(), vec![2, 1]);
}
#[test]
fn keys_as_identities() {
    let names = ["pear", "apple", "fig", "kiwi"];
    let mut tree = IntRbTree::with_comparator(move |a: i32, b: i32| names[a as usize].cmp(names[b as usize]) );
    for id in 0..names.len() as i32 {
        tree.insert(id);
    }
    validate_rb_tree(&tree);
    let sorted = tree.keys().map( |id| names[id as usize] ).collect::<Vec<_>>();
    assert_eq!(sorted, vec!["apple", "fig", "kiwi", "pear"]);
    assert_eq!(tree.find(2).and_then( |ptr| tree.key(ptr) ), Some(2));
}
#[test]
fn equality_is_defined_by_comparator() {
    // keys equal modulo 10 collapse into one
    let mut tree = IntRbTree::with_comparator( |a: i32, b: i32| (a % 10).cmp(&(b % 10)) );
    let first = tree.insert(13);
    assert_eq!(tree.insert(23), first);
    assert_eq!(tree.key(first), Some(13));
    assert!(tree.contains(33));
    assert_eq!(tree.size(), 1);
    tree.insert_allowing_duplicates(43);
    assert_eq!(tree.size(), 2);
    validate_rb_tree(&tree);
}
#[test]
fn explicit_order_object() {
    let descending = Comparator::new( |a: i32, b: i32| b.cmp(&a) );
    let mut tree = IntRbTree::with_order(descending);
    for x in 0..100 {
        tree.insert(x);
    }
    validate_rb_tree(&tree);
    assert_eq!(tree.keys().collect::<Vec<_>>(), (0..100).rev().collect::<Vec<_>>());
    let mut natural = IntRbTree::with_order(Natural);
    natural.insert(1);
    let mut cursor = natural.pointer_iter();
    assert_eq!(cursor.get(), Ok(1));
    cursor.inc();
    assert!(!cursor.is_valid());
}

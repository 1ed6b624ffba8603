mod comparator;
mod proptests;

use std::cmp::Ordering;

use crate::{
    arena::{Color, Handle, LEFT, RIGHT},
    tree::{IntRbTree, KeyOrder}
};

fn validate_rb_node<O: KeyOrder>(ptr: Handle, tree: &IntRbTree<O>) -> (usize, usize) {
    if ptr.is_nil() {
        return (0, 0);
    }
    let key = tree.key_at(ptr);
    let [left, right] = tree.nodes.children[ptr.index()];
    for (side, child) in [(LEFT, left), (RIGHT, right)] {
        if child.is_nil() { continue }
        assert_eq!(tree.parent(child), ptr, "child has to point back to its parent");
        assert!(tree.color(ptr) == Color::Black || tree.color(child) == Color::Black, "cannot have two red nodes in a row");
        let expected = if side == LEFT { Ordering::Greater } else { Ordering::Less };
        assert_ne!(tree.order.compare(tree.key_at(child), key), expected, "child on the wrong side");
    }
    let (left_count, left_height) = validate_rb_node(left, tree);
    let (right_count, right_height) = validate_rb_node(right, tree);
    assert_eq!(left_height, right_height, "black height of all paths has to be equal");
    (left_count + right_count + 1, left_height + (tree.color(ptr) as usize))
}
pub(crate) fn validate_rb_tree<O: KeyOrder>(tree: &IntRbTree<O>) {
    assert_eq!(tree.color(Handle::NIL), Color::Black, "sentinel has to be black");
    assert_eq!(tree.parent(Handle::NIL), Handle::NIL, "sentinel has to be its own parent");
    assert_eq!(tree.nodes.children[0], [Handle::NIL; 2], "sentinel cannot have children");
    if tree.root.is_nil() {
        assert_eq!(tree.greatest, Handle::NIL, "empty tree implies no greatest node");
        assert_eq!(tree.len(), 0, "empty tree has no nodes");
        return;
    }
    assert_eq!(tree.parent(tree.root), Handle::NIL, "root cannot have a parent");
    assert_eq!(tree.color(tree.root), Color::Black, "root has too be black");
    let (count, _) = validate_rb_node(tree.root, tree);
    assert_eq!(count, tree.len(), "tracked size and reachable nodes mismatch");
    assert_eq!(tree.greatest, tree.limit(tree.root, RIGHT), "greatest node has to be the rightmost");
    let keys = tree.keys().collect::<Vec<_>>();
    for pair in keys.windows(2) {
        assert_ne!(tree.order.compare(pair[0], pair[1]), Ordering::Greater, "in-order keys out of order");
    }
    assert!(tree.is_valid_red_black_tree(), "checker disagrees with structural validation");
}
fn print_subtree<O: KeyOrder>(ptr: Handle, depth: u8, markers: u32, tree: &IntRbTree<O>) {
    for i in 0..depth {
        if markers & (1 << i) == 0 {
            print!("| ");
        } else {
            print!("  ");
        }
    }
    if ptr.is_nil() {
        println!("[B] NIL");
        return;
    }
    println!("[{}] {} @{}", if tree.color(ptr) == Color::Red { "R" } else { "B" }, tree.key_at(ptr), ptr.index());
    let [left, right] = tree.nodes.children[ptr.index()];
    print_subtree(left, depth + 1, markers, tree);
    print_subtree(right, depth + 1, markers | (1 << (depth + 1)), tree);
}
pub(crate) fn print_tree<O: KeyOrder>(tree: &IntRbTree<O>) {
    print_subtree(tree.root, 0, 1, tree);
}
/// Height bound of a red-black tree with `len` nodes.
pub(crate) fn depth_bound(len: usize) -> usize {
    2 * ((len + 1) as f64).log2().ceil() as usize + 2
}

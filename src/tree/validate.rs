use std::{cmp::Ordering, fmt};

use crate::{
    arena::{Color, Handle, LEFT, RIGHT},
    tree::{IntRbTree, KeyOrder}
};

impl<O: KeyOrder> IntRbTree<O> {
    /// Checks the colour rules: NIL and root are black, no red node has a red child,
    /// every path to NIL crosses the same number of black nodes.
    pub fn is_valid_red_black_tree(&self) -> bool {
        if self.color(Handle::NIL) != Color::Black || self.color(self.root) != Color::Black {
            return false;
        }
        let mut black_height = 0;
        let mut ptr = self.root;
        while !ptr.is_nil() {
            if self.color(ptr) == Color::Black {
                black_height += 1;
            }
            ptr = self.child(ptr, LEFT);
        }
        self.satisfies_colors(self.root, black_height, 0)
    }
    fn satisfies_colors(&self, ptr: Handle, black_height: usize, mut blacks: usize) -> bool {
        if ptr.is_nil() {
            return blacks == black_height;
        }
        let [left, right] = self.nodes.children[ptr.index()];
        match self.color(ptr) {
            Color::Red => if self.color(left) == Color::Red || self.color(right) == Color::Red {
                return false;
            },
            Color::Black => blacks += 1
        }
        self.satisfies_colors(left, black_height, blacks)
            && self.satisfies_colors(right, black_height, blacks)
    }

    /// Number of nodes on the longest root to leaf path.
    #[inline]
    pub fn max_depth(&self) -> usize {
        self.depth_by(self.root, 0, usize::max)
    }
    /// Number of nodes on the shortest path from the root to a NIL child.
    #[inline]
    pub fn min_depth(&self) -> usize {
        self.depth_by(self.root, 0, usize::min)
    }
    fn depth_by(&self, ptr: Handle, depth: usize, pick: fn(usize, usize) -> usize) -> usize {
        if ptr.is_nil() {
            return depth;
        }
        pick(
            self.depth_by(self.child(ptr, LEFT), depth + 1, pick),
            self.depth_by(self.child(ptr, RIGHT), depth + 1, pick)
        )
    }
    /// Pre-order dump of the keys, two spaces of indent per level, black nodes marked `BLACK`.
    #[inline]
    pub fn dump(&self) -> TreeDump<'_, O> {
        TreeDump(self)
    }
    /// Depth of the first node holding `key` met from the root, which has depth 1.
    pub fn depth_of(&self, key: i32) -> Option<usize> {
        let mut ptr = self.root;
        let mut depth = 1;
        while !ptr.is_nil() {
            match self.order.compare(key, self.key_at(ptr)) {
                Ordering::Less => ptr = self.child(ptr, LEFT),
                Ordering::Equal => return Some(depth),
                Ordering::Greater => ptr = self.child(ptr, RIGHT)
            }
            depth += 1;
        }
        None
    }
}

pub struct TreeDump<'a, O: KeyOrder>(&'a IntRbTree<O>);
impl<'a, O: KeyOrder> TreeDump<'a, O> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, ptr: Handle, offset: usize) -> fmt::Result {
        if ptr.is_nil() {
            return Ok(());
        }
        let tree = self.0;
        let marker = if tree.color(ptr) == Color::Black { " BLACK" } else { "" };
        writeln!(f, "{:offset$}{}{}", "", tree.key_at(ptr), marker, offset = offset)?;
        self.write_node(f, tree.child(ptr, LEFT), offset + 2)?;
        self.write_node(f, tree.child(ptr, RIGHT), offset + 2)
    }
}
impl<'a, O: KeyOrder> fmt::Display for TreeDump<'a, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.root.is_nil() {
            return writeln!(f, "tree is empty");
        }
        self.write_node(f, self.0.root, 0)
    }
}

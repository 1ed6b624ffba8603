mod order;
pub use order::*;
mod tiebreak;
pub use tiebreak::*;
mod interface;
pub use interface::*;
mod iter;
pub use iter::*;
mod cursor;
pub use cursor::*;
mod map;
pub use map::*;
mod validate;
pub use validate::TreeDump;

use std::{cmp::Ordering, fmt};

use log::{debug, trace};
use thiserror::Error;

use crate::{
    arena::{Color, Handle, NodeArena, LEFT, RIGHT},
    config::TreeConfig
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("no such element")]
    NoSuchElement,
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchResult {
    Empty,
    LeftOf(Handle),
    Here(Handle),
    RightOf(Handle)
}

/// Red-black tree of `i32` keys stored in parallel arrays and addressed by [`Handle`].
pub struct IntRbTree<O: KeyOrder = Natural> {
    pub(crate) nodes: NodeArena,
    pub(crate) root: Handle,
    pub(crate) greatest: Handle,
    pub(crate) order: O,
    tie_break: Box<dyn TieBreak>
}

impl IntRbTree {
    #[inline]
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(TreeConfig::default().with_capacity(capacity))
    }
    #[inline]
    pub fn with_config(config: TreeConfig) -> Self {
        Self::with_config_and_order(config, Natural)
    }
}
impl Default for IntRbTree {
    #[inline(always)]
    fn default() -> Self { Self::new() }
}

impl<F: Fn(i32, i32) -> Ordering> IntRbTree<Comparator<F>> {
    #[inline]
    pub fn with_comparator(compare: F) -> Self {
        Self::with_order(Comparator::new(compare))
    }
}

impl<O: KeyOrder> IntRbTree<O> {
    #[inline]
    pub fn with_order(order: O) -> Self {
        Self::with_config_and_order(TreeConfig::default(), order)
    }
    pub fn with_config_and_order(config: TreeConfig, order: O) -> Self {
        Self {
            nodes: NodeArena::with_capacity(config.capacity, config.growth),
            root: Handle::NIL,
            greatest: Handle::NIL,
            order,
            tie_break: Box::new(config.tie_break())
        }
    }
    /// Replaces the source of coin flips used by duplicate insertion.
    #[inline]
    pub fn set_tie_break(&mut self, tie_break: impl TieBreak + 'static) {
        self.tie_break = Box::new(tie_break);
    }
    #[inline(always)]
    pub fn order(&self) -> &O {
        &self.order
    }
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 0
    }
    /// Number of node slots currently allocated, the sentinel included.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }
    /// Empties the tree in O(1). Storage is kept and slots are handed out again from the start,
    /// so every handle obtained before the flush is invalidated.
    pub fn flush(&mut self) {
        debug!("flushing tree of {} nodes, keeping {} slots", self.nodes.len(), self.nodes.capacity());
        self.nodes.reset();
        self.root = Handle::NIL;
        self.greatest = Handle::NIL;
    }

    #[inline(always)]
    pub(crate) fn key_at(&self, ptr: Handle) -> i32 {
        self.nodes.key[ptr.index()]
    }
    #[inline(always)]
    pub(crate) fn child(&self, ptr: Handle, side: usize) -> Handle {
        self.nodes.children[ptr.index()][side]
    }
    #[inline(always)]
    pub(crate) fn parent(&self, ptr: Handle) -> Handle {
        self.nodes.parent[ptr.index()]
    }
    #[inline(always)]
    pub(crate) fn color(&self, ptr: Handle) -> Color {
        self.nodes.color[ptr.index()]
    }
    #[inline(always)]
    fn set_color(&mut self, ptr: Handle, color: Color) {
        self.nodes.color[ptr.index()] = color;
    }
    #[inline(always)]
    fn set_child(&mut self, ptr: Handle, side: usize, child: Handle) {
        self.nodes.children[ptr.index()][side] = child;
    }
    #[inline(always)]
    fn set_parent(&mut self, ptr: Handle, parent: Handle) {
        self.nodes.parent[ptr.index()] = parent;
    }
    #[inline(always)]
    fn side_of(&self, ptr: Handle, parent: Handle) -> usize {
        if self.child(parent, LEFT) == ptr { LEFT } else { RIGHT }
    }

    /// Outermost node of the sub-tree at `ptr` towards `side`.
    #[inline]
    pub(crate) fn limit(&self, mut ptr: Handle, side: usize) -> Handle {
        if ptr.is_nil() {
            return ptr;
        }
        loop {
            let child = self.child(ptr, side);
            if child.is_nil() { return ptr }
            ptr = child;
        }
    }
    /// In-order neighbour of `ptr` towards `side`, NIL past either end.
    #[inline]
    pub(crate) fn neighbour(&self, mut ptr: Handle, side: usize) -> Handle {
        if ptr.is_nil() {
            return ptr;
        }
        let child = self.child(ptr, side);
        if !child.is_nil() {
            return self.limit(child, 1 - side);
        }
        let mut parent = self.parent(ptr);
        while !parent.is_nil() && self.child(parent, side) == ptr {
            ptr = parent;
            parent = self.parent(parent);
        }
        parent
    }
    pub(crate) fn search(&self, key: i32) -> SearchResult {
        let (mut parent, mut side) = (Handle::NIL, LEFT);
        let mut ptr = self.root;
        while !ptr.is_nil() {
            parent = ptr;
            match self.order.compare(key, self.key_at(ptr)) {
                Ordering::Less => side = LEFT,
                Ordering::Equal => return SearchResult::Here(ptr),
                Ordering::Greater => side = RIGHT
            }
            ptr = self.child(ptr, side);
        }
        if parent.is_nil() {
            SearchResult::Empty
        } else if side == LEFT {
            SearchResult::LeftOf(parent)
        } else {
            SearchResult::RightOf(parent)
        }
    }
    /// Coin flip for an equal key met during duplicate insertion.
    #[inline]
    pub(crate) fn flip(&mut self) -> usize {
        if self.tie_break.go_left() { LEFT } else { RIGHT }
    }

    pub(crate) fn attach_root(&mut self, key: i32) -> Handle {
        let ptr = self.nodes.alloc(key);
        self.set_color(ptr, Color::Black);
        self.root = ptr;
        self.greatest = ptr;
        ptr
    }
    /// Links a new red node below `parent` without rebalancing.
    /// `parent.children[side]` has to be NIL.
    pub(crate) fn attach(&mut self, key: i32, parent: Handle, side: usize) -> Handle {
        let ptr = self.nodes.alloc(key);
        self.set_parent(ptr, parent);
        self.set_child(parent, side, ptr);
        if side == RIGHT && parent == self.greatest {
            self.greatest = ptr;
        }
        ptr
    }
    /// Moves `ptr` down towards `side`, its child on the other side takes its place.
    /// That child cannot be NIL.
    fn rotate(&mut self, ptr: Handle, side: usize) {
        let other = 1 - side;
        let pivot = self.child(ptr, other);
        let inner = self.child(pivot, side);
        self.set_child(ptr, other, inner);
        if !inner.is_nil() {
            self.set_parent(inner, ptr);
        }
        let parent = self.parent(ptr);
        self.set_parent(pivot, parent);
        if ptr == self.root {
            self.root = pivot;
        } else {
            let side_in_parent = self.side_of(ptr, parent);
            self.set_child(parent, side_in_parent, pivot);
        }
        self.set_child(pivot, side, ptr);
        self.set_parent(ptr, pivot);
    }
    pub(crate) fn fix_insert(&mut self, mut ptr: Handle) {
        while ptr != self.root && self.color(self.parent(ptr)) == Color::Red {
            let parent = self.parent(ptr);
            // a red parent is never the root, so the grandparent exists
            let grandparent = self.parent(parent);
            let side = self.side_of(parent, grandparent);
            let uncle = self.child(grandparent, 1 - side);
            if self.color(uncle) == Color::Red {
                // Case 1
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                ptr = grandparent;
            } else {
                if ptr == self.child(parent, 1 - side) {
                    // Case 2
                    ptr = parent;
                    self.rotate(ptr, side);
                }
                // Case 3
                let parent = self.parent(ptr);
                let grandparent = self.parent(parent);
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate(grandparent, 1 - side);
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }
    /// Splices out the node at `ptr`. A node with two children takes over the key of its
    /// successor and the successor's slot is the one that leaves the tree.
    /// Returns the slot that left the tree.
    pub(crate) fn remove_at(&mut self, ptr: Handle) -> Handle {
        let spliced = if self.child(ptr, LEFT).is_nil() || self.child(ptr, RIGHT).is_nil() {
            ptr
        } else {
            self.neighbour(ptr, RIGHT)
        };
        let child = match self.child(spliced, LEFT) {
            left if !left.is_nil() => left,
            _ => self.child(spliced, RIGHT)
        };
        let parent = self.parent(spliced);
        // NOTE: this may point the sentinel at a real parent until the fixup is done
        self.set_parent(child, parent);
        if parent.is_nil() {
            self.root = child;
        } else {
            let side = self.side_of(spliced, parent);
            self.set_child(parent, side, child);
        }
        if spliced != ptr {
            self.nodes.key[ptr.index()] = self.key_at(spliced);
        }
        if self.color(spliced) == Color::Black {
            self.fix_remove(child);
        }
        self.set_parent(Handle::NIL, Handle::NIL);
        self.nodes.release();
        self.greatest = self.limit(self.root, RIGHT);
        trace!("greatest node after removal is {:?}", self.greatest);
        spliced
    }
    fn fix_remove(&mut self, mut ptr: Handle) {
        while ptr != self.root && self.color(ptr) == Color::Black {
            let parent = self.parent(ptr);
            let side = self.side_of(ptr, parent);
            let other = 1 - side;
            // the extra black on `ptr` guarantees a sibling
            let mut sibling = self.child(parent, other);
            if self.color(sibling) == Color::Red {
                // Case 1
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.child(self.parent(ptr), other);
            }
            let near = self.child(sibling, side);
            let far = self.child(sibling, other);
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                // Case 2
                self.set_color(sibling, Color::Red);
                ptr = self.parent(ptr);
            } else {
                if self.color(far) == Color::Black {
                    // Case 3
                    self.set_color(near, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.rotate(sibling, other);
                    sibling = self.child(self.parent(ptr), other);
                }
                // Case 4
                let parent = self.parent(ptr);
                self.set_color(sibling, self.color(parent));
                self.set_color(parent, Color::Black);
                let far = self.child(sibling, other);
                self.set_color(far, Color::Black);
                self.rotate(parent, side);
                ptr = self.root;
            }
        }
        self.set_color(ptr, Color::Black);
    }
}

impl<O: KeyOrder + Clone> Clone for IntRbTree<O> {
    /// Copies the storage as is, so handles of the original address the same keys in the copy.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            greatest: self.greatest,
            order: self.order.clone(),
            tie_break: self.tie_break.boxed_clone()
        }
    }
}

impl<O: KeyOrder + fmt::Debug> fmt::Debug for IntRbTree<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntRbTree")
            .field("order", &self.order)
            .field("len", &self.nodes.len())
            .field("capacity", &self.nodes.capacity())
            .field("next", &self.nodes.next_free())
            .field("root", &self.root)
            .field("greatest", &self.greatest)
            .finish()
    }
}

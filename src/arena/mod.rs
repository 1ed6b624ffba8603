mod growth;
pub use growth::*;

use std::ops::Not;

use log::trace;

/// Index of a node slot. Slot 0 is the permanent NIL sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Handle(usize);
impl Handle {
    pub const NIL: Handle = Handle(0);

    #[inline(always)]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red = 0,
    Black = 1,
}
impl Not for Color {
    type Output = Color;
    #[inline]
    fn not(self) -> Self::Output {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red
        }
    }
}

pub(crate) const LEFT: usize = 0;
pub(crate) const RIGHT: usize = 1;

// ASSERT: slots below `next` are either live or abandoned, abandoned slots are never handed out again
#[derive(Debug, Clone)]
pub(crate) struct NodeArena {
    pub key: Vec<i32>,
    pub children: Vec<[Handle; 2]>,
    pub parent: Vec<Handle>,
    pub color: Vec<Color>,
    next: usize,
    len: usize,
    growth: GrowthPolicy
}
impl NodeArena {
    pub fn with_capacity(capacity: usize, growth: GrowthPolicy) -> Self {
        // one extra slot for the sentinel
        let slots = capacity.max(1) + 1;
        let mut arena = Self {
            key: vec![0; slots],
            children: vec![[Handle::NIL; 2]; slots],
            parent: vec![Handle::NIL; slots],
            color: vec![Color::Black; slots],
            next: 1,
            len: 0,
            growth
        };
        arena.reset_sentinel();
        arena
    }
    #[inline]
    fn reset_sentinel(&mut self) {
        self.children[0] = [Handle::NIL; 2];
        self.parent[0] = Handle::NIL;
        self.color[0] = Color::Black;
    }
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.key.len()
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }
    #[inline(always)]
    pub fn next_free(&self) -> usize {
        self.next
    }
    #[inline(always)]
    pub fn contains(&self, index: Handle) -> bool {
        !index.is_nil() && index.0 < self.next
    }
    fn grow_to(&mut self, required: usize) {
        let old = self.capacity();
        let new = self.growth.grow(old, required);
        trace!("growing node arena from {} to {} slots", old, new);
        self.key.resize(new, 0);
        self.children.resize(new, [Handle::NIL; 2]);
        self.parent.resize(new, Handle::NIL);
        self.color.resize(new, Color::Black);
    }
    /// Creates a fresh red node with both children set to NIL.
    /// The parent link is left for the caller to set.
    pub fn alloc(&mut self, key: i32) -> Handle {
        if self.next >= self.capacity() {
            self.grow_to(self.next + 1);
        }
        let index = Handle(self.next);
        self.next += 1;
        self.len += 1;
        self.key[index.0] = key;
        self.children[index.0] = [Handle::NIL; 2];
        self.parent[index.0] = Handle::NIL;
        self.color[index.0] = Color::Red;
        index
    }
    /// Bookkeeping for a node that was spliced out of the tree; its slot is abandoned.
    #[inline]
    pub fn release(&mut self) {
        self.len -= 1;
    }
    /// Forgets every node without touching the storage.
    #[inline]
    pub fn reset(&mut self) {
        self.next = 1;
        self.len = 0;
        self.reset_sentinel();
    }
}

use std::cmp::Ordering;

use crate::{
    arena::{Handle, LEFT, RIGHT},
    tree::{IntRbTree, KeyOrder, SearchResult}
};

/// Outcome of a rejecting insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The key was already present at this node, the tree is unchanged.
    Found(Handle),
    /// A new node was created for the key.
    Created(Handle)
}
impl Insertion {
    #[inline(always)]
    pub const fn handle(self) -> Handle {
        match self {
            Self::Found(ptr) | Self::Created(ptr) => ptr
        }
    }
    #[inline(always)]
    pub const fn is_created(self) -> bool {
        matches!(self, Self::Created(_))
    }
}

impl<O: KeyOrder> IntRbTree<O> {
    /// Inserts `key` unless an equal key is present, in which case that node is returned.
    #[inline]
    pub fn insert(&mut self, key: i32) -> Handle {
        self.insert_reporting(key).handle()
    }
    /// Like [`IntRbTree::insert`], returns `true` if the key was not present before.
    #[inline]
    pub fn add(&mut self, key: i32) -> bool {
        self.insert_reporting(key).is_created()
    }
    pub fn insert_reporting(&mut self, key: i32) -> Insertion {
        let greatest = self.greatest;
        let (parent, side) = if !greatest.is_nil() && self.order.compare(key, self.key_at(greatest)) == Ordering::Greater {
            (greatest, RIGHT)
        } else {
            match self.search(key) {
                SearchResult::Empty => return Insertion::Created(self.attach_root(key)),
                SearchResult::Here(ptr) => return Insertion::Found(ptr),
                SearchResult::LeftOf(parent) => (parent, LEFT),
                SearchResult::RightOf(parent) => (parent, RIGHT)
            }
        };
        let ptr = self.attach(key, parent, side);
        self.fix_insert(ptr);
        Insertion::Created(ptr)
    }
    /// Always creates a new node. Equal keys met on the way down are passed on a coin flip,
    /// the last flip also decides the side the new node hangs from.
    pub fn insert_allowing_duplicates(&mut self, key: i32) -> Handle {
        let greatest = self.greatest;
        if greatest.is_nil() {
            return self.attach_root(key);
        }
        let (parent, side) = if self.order.compare(key, self.key_at(greatest)) != Ordering::Less {
            (greatest, RIGHT)
        } else {
            let (mut parent, mut side) = (Handle::NIL, LEFT);
            let mut ptr = self.root;
            while !ptr.is_nil() {
                parent = ptr;
                side = match self.order.compare(key, self.key_at(ptr)) {
                    Ordering::Less => LEFT,
                    Ordering::Greater => RIGHT,
                    Ordering::Equal => self.flip()
                };
                ptr = self.child(ptr, side);
            }
            (parent, side)
        };
        let ptr = self.attach(key, parent, side);
        self.fix_insert(ptr);
        ptr
    }
    #[inline]
    pub fn find(&self, key: i32) -> Option<Handle> {
        match self.search(key) {
            SearchResult::Here(ptr) => Some(ptr),
            _ => None
        }
    }
    #[inline]
    pub fn contains(&self, key: i32) -> bool {
        matches!(self.search(key), SearchResult::Here(_))
    }
    /// First node whose key is not less than `key`, NIL if every key is less.
    /// Among equal keys the leftmost one is returned.
    #[inline]
    pub fn lower_bound(&self, key: i32) -> Handle {
        self.lower_bound_by(key, false)
    }
    /// Like [`IntRbTree::lower_bound`] but stops at the first equal key met.
    #[inline]
    pub fn lower_bound_no_dup_skip(&self, key: i32) -> Handle {
        self.lower_bound_by(key, true)
    }
    fn lower_bound_by(&self, key: i32, stop_at_equal: bool) -> Handle {
        let mut ptr = self.root;
        let mut found = Handle::NIL;
        while !ptr.is_nil() {
            match self.order.compare(key, self.key_at(ptr)) {
                Ordering::Greater => ptr = self.child(ptr, RIGHT),
                Ordering::Equal if stop_at_equal => return ptr,
                _ => {
                    found = ptr;
                    ptr = self.child(ptr, LEFT);
                }
            }
        }
        found
    }
    /// Removes one node holding `key`.
    ///
    /// A node with two children keeps its slot and takes over its successor's key,
    /// so the handle that held the successor's key stops being valid.
    pub fn remove(&mut self, key: i32) -> bool {
        let Some(ptr) = self.find(key) else { return false };
        self.remove_at(ptr);
        true
    }
    /// Key stored at `ptr`. Slots abandoned by removal keep reporting their last key.
    #[inline]
    pub fn key(&self, ptr: Handle) -> Option<i32> {
        self.nodes.contains(ptr).then( || self.key_at(ptr) )
    }
    #[inline]
    pub fn first(&self) -> Handle {
        self.limit(self.root, LEFT)
    }
    #[inline(always)]
    pub fn last(&self) -> Handle {
        self.greatest
    }
    #[inline]
    pub fn min_key(&self) -> Option<i32> {
        self.key(self.first())
    }
    #[inline]
    pub fn max_key(&self) -> Option<i32> {
        self.key(self.greatest)
    }
    /// In-order successor of `ptr`, NIL past the end or for a handle this tree never handed out.
    #[inline]
    pub fn successor(&self, ptr: Handle) -> Handle {
        if !self.nodes.contains(ptr) { return Handle::NIL }
        self.neighbour(ptr, RIGHT)
    }
    #[inline]
    pub fn predecessor(&self, ptr: Handle) -> Handle {
        if !self.nodes.contains(ptr) { return Handle::NIL }
        self.neighbour(ptr, LEFT)
    }
}

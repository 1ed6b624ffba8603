use std::{
    cmp::Ordering,
    fmt,
    ops::{Deref, DerefMut}
};

use crate::{
    arena::{Handle, LEFT, RIGHT},
    counters::GenerationSource,
    tree::{Error, IntRbTree, KeyOrder}
};

/// Movable position over the nodes of a tree in key order.
pub trait IntPointerIterator {
    fn is_valid(&self) -> bool;
    /// Key at the current position, [`Error::NoSuchElement`] if the cursor is invalid.
    fn get(&self) -> Result<i32, Error>;
    fn inc(&mut self);
    fn dec(&mut self);
    fn move_to_first(&mut self);
    fn move_to_last(&mut self);
    /// Moves to the first node whose key is not less than `key`.
    fn move_to(&mut self, key: i32);
}

#[derive(Clone, Copy)]
struct Watch<'a> {
    counters: &'a dyn GenerationSource,
    slot: usize,
    snapshot: u32
}
impl<'a> Watch<'a> {
    #[inline]
    fn is_stale(&self) -> bool {
        self.counters.generation(self.slot) != self.snapshot
    }
    #[inline]
    fn reset(&mut self) {
        self.snapshot = self.counters.generation(self.slot);
    }
}
impl<'a> fmt::Debug for Watch<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watch")
            .field("slot", &self.slot)
            .field("snapshot", &self.snapshot)
            .finish()
    }
}

pub struct PointerIter<'a, O: KeyOrder> {
    tree: &'a IntRbTree<O>,
    current: Handle,
    watch: Option<Watch<'a>>
}
impl<'a, O: KeyOrder> Clone for PointerIter<'a, O> {
    #[inline]
    fn clone(&self) -> Self {
        Self { tree: self.tree, current: self.current, watch: self.watch }
    }
}

impl<'a, O: KeyOrder> PointerIter<'a, O> {
    #[inline]
    pub(crate) fn new(tree: &'a IntRbTree<O>, current: Handle) -> Self {
        Self { tree, current, watch: None }
    }
    #[inline(always)]
    pub fn handle(&self) -> Handle {
        self.current
    }
    /// Binds the cursor to `counters[slot]`, remembering its present value.
    #[inline]
    pub fn watch(mut self, counters: &'a dyn GenerationSource, slot: usize) -> Self {
        let snapshot = counters.generation(slot);
        self.watch = Some(Watch { counters, slot, snapshot });
        self
    }
    /// `true` once the watched counter moved away from the snapshot. Never true for an unwatched cursor.
    #[inline]
    pub fn is_stale(&self) -> bool {
        self.watch.as_ref().is_some_and( |watch| watch.is_stale() )
    }
    /// Takes a new snapshot of the watched counter.
    #[inline]
    pub fn reset_stale(&mut self) {
        if let Some(watch) = self.watch.as_mut() {
            watch.reset();
        }
    }
}

impl<'a, O: KeyOrder> IntPointerIterator for PointerIter<'a, O> {
    #[inline(always)]
    fn is_valid(&self) -> bool {
        !self.current.is_nil()
    }
    #[inline]
    fn get(&self) -> Result<i32, Error> {
        self.tree.key(self.current).ok_or(Error::NoSuchElement)
    }
    #[inline]
    fn inc(&mut self) {
        self.current = self.tree.neighbour(self.current, RIGHT);
    }
    #[inline]
    fn dec(&mut self) {
        self.current = self.tree.neighbour(self.current, LEFT);
    }
    #[inline]
    fn move_to_first(&mut self) {
        self.current = self.tree.first();
    }
    #[inline]
    fn move_to_last(&mut self) {
        self.current = self.tree.last();
    }
    #[inline]
    fn move_to(&mut self, key: i32) {
        self.current = self.tree.lower_bound(key);
    }
}

impl<'a, O: KeyOrder> fmt::Debug for PointerIter<'a, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerIter")
            .field("current", &self.current)
            .field("watch", &self.watch)
            .finish()
    }
}

/// Pointer iterator that can be ordered against cursors of other trees, e.g. for k-way merges.
#[derive(Debug)]
pub struct ComparablePointerIter<'a, O: KeyOrder, C: KeyOrder> {
    inner: PointerIter<'a, O>,
    comparator: C
}
impl<'a, O: KeyOrder, C: KeyOrder + Clone> Clone for ComparablePointerIter<'a, O, C> {
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), comparator: self.comparator.clone() }
    }
}
impl<'a, O: KeyOrder, C: KeyOrder> ComparablePointerIter<'a, O, C> {
    #[inline]
    pub fn new(inner: PointerIter<'a, O>, comparator: C) -> Self {
        Self { inner, comparator }
    }
    /// Orders the current keys of two cursors with this cursor's comparator.
    #[inline]
    pub fn compare_to(&self, other: &impl IntPointerIterator) -> Result<Ordering, Error> {
        Ok(self.comparator.compare(self.inner.get()?, other.get()?))
    }
    #[inline]
    pub fn into_inner(self) -> PointerIter<'a, O> {
        self.inner
    }
}
impl<'a, O: KeyOrder, C: KeyOrder> Deref for ComparablePointerIter<'a, O, C> {
    type Target = PointerIter<'a, O>;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
impl<'a, O: KeyOrder, C: KeyOrder> DerefMut for ComparablePointerIter<'a, O, C> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<'a, O: KeyOrder, C: KeyOrder> IntPointerIterator for ComparablePointerIter<'a, O, C> {
    #[inline(always)]
    fn is_valid(&self) -> bool { self.inner.is_valid() }
    #[inline(always)]
    fn get(&self) -> Result<i32, Error> { self.inner.get() }
    #[inline(always)]
    fn inc(&mut self) { self.inner.inc() }
    #[inline(always)]
    fn dec(&mut self) { self.inner.dec() }
    #[inline(always)]
    fn move_to_first(&mut self) { self.inner.move_to_first() }
    #[inline(always)]
    fn move_to_last(&mut self) { self.inner.move_to_last() }
    #[inline(always)]
    fn move_to(&mut self, key: i32) { self.inner.move_to(key) }
}

impl<O: KeyOrder> IntRbTree<O> {
    /// Cursor at the smallest key.
    #[inline]
    pub fn pointer_iter(&self) -> PointerIter<'_, O> {
        PointerIter::new(self, self.first())
    }
    /// Cursor at a node holding `key`, invalid if there is none.
    #[inline]
    pub fn pointer_iter_at(&self, key: i32) -> PointerIter<'_, O> {
        PointerIter::new(self, self.find(key).unwrap_or(Handle::NIL))
    }
    /// Comparable cursor at the smallest key, watching `counters[slot]` for modifications.
    #[inline]
    pub fn comparable_pointer_iter<'a, C: KeyOrder>(&'a self, comparator: C,
        counters: &'a dyn GenerationSource, slot: usize
    ) -> ComparablePointerIter<'a, O, C> {
        ComparablePointerIter::new(self.pointer_iter().watch(counters, slot), comparator)
    }
}

use std::{cmp::Ordering, fmt, iter::FusedIterator, mem};

use log::debug;

use crate::{
    arena::{Handle, LEFT, RIGHT},
    config::TreeConfig,
    tree::{
        Comparator, Error, Insertion, IntPointerIterator, IntRbTree, Keys, KeyOrder, ListIter,
        Natural, PointerIter
    }
};

/// Map from `i32` keys to `i32` values, balanced by the same engine as [`IntRbTree`].
///
/// Values live in a lane parallel to the node arena and are addressed by the node's handle.
#[derive(Clone)]
pub struct IntRbMap<O: KeyOrder = Natural> {
    tree: IntRbTree<O>,
    // ASSERT: at least as long as the arena
    values: Vec<i32>,
    // node of the last successful close lookup, NIL after any removal
    last: Handle
}

impl IntRbMap {
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
    /// Like [`IntRbMap::get`], but starts the search from the node found last when the key is
    /// numerically closer to it than to the root. Pays off for lookups with locality.
    pub fn get_mostly_close(&mut self, key: i32) -> Option<i32> {
        let last = self.last;
        let found = if last.is_nil() {
            self.tree.find(key)
        } else {
            let distance = |other: i32| (i64::from(key) - i64::from(other)).abs();
            if distance(self.tree.key_at(self.tree.root)) < distance(self.tree.key_at(last)) {
                self.tree.find(key)
            } else {
                self.find_near(key, last)
            }
        };
        let ptr = found?;
        self.last = ptr;
        Some(self.values[ptr.index()])
    }
}
impl Default for IntRbMap {
    #[inline(always)]
    fn default() -> Self { Self::new() }
}

impl<F: Fn(i32, i32) -> Ordering> IntRbMap<Comparator<F>> {
    #[inline]
    pub fn with_comparator(compare: F) -> Self {
        Self::with_config_and_order(TreeConfig::default(), Comparator::new(compare))
    }
}

impl<O: KeyOrder> IntRbMap<O> {
    pub fn with_config_and_order(config: TreeConfig, order: O) -> Self {
        let tree = IntRbTree::with_config_and_order(config, order);
        let values = vec![0; tree.capacity()];
        Self { tree, values, last: Handle::NIL }
    }
    /// Key structure of the map, for queries and diagnostics.
    #[inline(always)]
    pub fn tree(&self) -> &IntRbTree<O> {
        &self.tree
    }
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.tree.size()
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tree.len()
    }
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Associates `value` with `key`, returning the value it replaced.
    pub fn put(&mut self, key: i32, value: i32) -> Option<i32> {
        match self.tree.insert_reporting(key) {
            Insertion::Found(ptr) => Some(mem::replace(&mut self.values[ptr.index()], value)),
            Insertion::Created(ptr) => {
                if self.values.len() < self.tree.capacity() {
                    self.values.resize(self.tree.capacity(), 0);
                }
                self.values[ptr.index()] = value;
                None
            }
        }
    }
    #[inline]
    pub fn get(&self, key: i32) -> Option<i32> {
        self.tree.find(key).map( |ptr| self.values[ptr.index()] )
    }
    #[inline]
    pub fn contains_key(&self, key: i32) -> bool {
        self.tree.contains(key)
    }
    /// Value stored at `ptr`, `None` for NIL or a handle this map never handed out.
    #[inline]
    pub fn value(&self, ptr: Handle) -> Option<i32> {
        self.tree.nodes.contains(ptr).then( || self.values[ptr.index()] )
    }
    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: i32) -> Option<i32> {
        let ptr = self.tree.find(key)?;
        let value = self.values[ptr.index()];
        let spliced = self.tree.remove_at(ptr);
        if spliced != ptr {
            // the node took over its successor's key, so it takes the value as well
            self.values[ptr.index()] = self.values[spliced.index()];
        }
        self.last = Handle::NIL;
        Some(value)
    }
    /// Empties the map in O(1), keeping its storage.
    pub fn clear(&mut self) {
        debug!("clearing map of {} entries", self.tree.len());
        self.tree.flush();
        self.last = Handle::NIL;
    }

    /// List iterator over the keys, positioned before the first key.
    #[inline]
    pub fn key_iterator(&self) -> ListIter<'_, O> {
        self.tree.iterator()
    }
    /// List iterator whose current element is `key`; `next` continues after it.
    /// Positioned before the first key if `key` is absent.
    #[inline]
    pub fn key_iterator_at(&self, key: i32) -> ListIter<'_, O> {
        ListIter::at(&self.tree, self.tree.find(key).unwrap_or(Handle::NIL))
    }
    /// Cursor over key/value pairs at the smallest key.
    #[inline]
    pub fn key_value_iter(&self) -> KeyValueIter<'_, O> {
        KeyValueIter { cursor: self.tree.pointer_iter(), values: &self.values }
    }
    /// Cursor over key/value pairs at `key`, invalid if there is none.
    #[inline]
    pub fn key_value_iter_at(&self, key: i32) -> KeyValueIter<'_, O> {
        KeyValueIter { cursor: self.tree.pointer_iter_at(key), values: &self.values }
    }
    /// Entries in key order.
    #[inline]
    pub fn iter(&self) -> Entries<'_, O> {
        Entries { keys: self.tree.keys(), values: &self.values }
    }

    // climbs from `start` while `key` stays on the same side of the ancestors, the key is then
    // either at the ancestor reached or below the last node climbed
    fn find_near(&self, key: i32, start: Handle) -> Option<Handle> {
        let tree = &self.tree;
        let direction = tree.order.compare(key, tree.key_at(start));
        if direction == Ordering::Equal {
            return Some(start);
        }
        let (mut ptr, mut below) = (start, start);
        let mut order = direction;
        while !ptr.is_nil() {
            order = tree.order.compare(key, tree.key_at(ptr));
            if order != direction { break }
            below = ptr;
            ptr = tree.parent(ptr);
        }
        if !ptr.is_nil() && order == Ordering::Equal {
            return Some(ptr);
        }
        let mut ptr = below;
        while !ptr.is_nil() {
            match tree.order.compare(key, tree.key_at(ptr)) {
                Ordering::Less => ptr = tree.child(ptr, LEFT),
                Ordering::Equal => return Some(ptr),
                Ordering::Greater => ptr = tree.child(ptr, RIGHT)
            }
        }
        None
    }
}

impl<O: KeyOrder + fmt::Debug> fmt::Debug for IntRbMap<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Pointer iterator that also reads the value at the current key.
pub struct KeyValueIter<'a, O: KeyOrder> {
    cursor: PointerIter<'a, O>,
    values: &'a [i32]
}
impl<'a, O: KeyOrder> KeyValueIter<'a, O> {
    /// Value at the current position, [`Error::NoSuchElement`] if the cursor is invalid.
    #[inline]
    pub fn value(&self) -> Result<i32, Error> {
        if !self.cursor.is_valid() {
            return Err(Error::NoSuchElement);
        }
        Ok(self.values[self.cursor.handle().index()])
    }
    #[inline(always)]
    pub fn handle(&self) -> Handle {
        self.cursor.handle()
    }
}
impl<'a, O: KeyOrder> Clone for KeyValueIter<'a, O> {
    #[inline]
    fn clone(&self) -> Self {
        Self { cursor: self.cursor.clone(), values: self.values }
    }
}
impl<'a, O: KeyOrder> fmt::Debug for KeyValueIter<'a, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyValueIter")
            .field("current", &self.cursor.handle())
            .finish()
    }
}
impl<'a, O: KeyOrder> IntPointerIterator for KeyValueIter<'a, O> {
    #[inline(always)]
    fn is_valid(&self) -> bool { self.cursor.is_valid() }
    #[inline(always)]
    fn get(&self) -> Result<i32, Error> { self.cursor.get() }
    #[inline(always)]
    fn inc(&mut self) { self.cursor.inc() }
    #[inline(always)]
    fn dec(&mut self) { self.cursor.dec() }
    #[inline(always)]
    fn move_to_first(&mut self) { self.cursor.move_to_first() }
    #[inline(always)]
    fn move_to_last(&mut self) { self.cursor.move_to_last() }
    #[inline(always)]
    fn move_to(&mut self, key: i32) { self.cursor.move_to(key) }
}

pub struct Entries<'a, O: KeyOrder> {
    keys: Keys<'a, O>,
    values: &'a [i32]
}
impl<'a, O: KeyOrder> Clone for Entries<'a, O> {
    #[inline]
    fn clone(&self) -> Self {
        Self { keys: self.keys.clone(), values: self.values }
    }
}
impl<'a, O: KeyOrder> Iterator for Entries<'a, O> {
    type Item = (i32, i32);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let ptr = self.keys.next_handle()?;
        Some((self.keys.key_of(ptr), self.values[ptr.index()]))
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}
impl<'a, O: KeyOrder> DoubleEndedIterator for Entries<'a, O> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let ptr = self.keys.next_back_handle()?;
        Some((self.keys.key_of(ptr), self.values[ptr.index()]))
    }
}
impl<'a, O: KeyOrder> ExactSizeIterator for Entries<'a, O> {}
impl<'a, O: KeyOrder> FusedIterator for Entries<'a, O> {}

impl<'a, O: KeyOrder> IntoIterator for &'a IntRbMap<O> {
    type Item = (i32, i32);
    type IntoIter = Entries<'a, O>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

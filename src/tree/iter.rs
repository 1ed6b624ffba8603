use std::{cmp::Ordering, fmt, iter::FusedIterator};

use crate::{
    arena::{Handle, LEFT, RIGHT},
    tree::{Error, IntRbTree, KeyOrder}
};

/// Bidirectional key iterator in the style of a list iterator.
///
/// The iterator sits between elements: `next` returns the key after the gap and `previous`
/// the key before it. The current element is the one returned last.
pub trait IntListIterator {
    fn has_next(&self) -> bool;
    fn next(&mut self) -> Result<i32, Error>;
    fn has_previous(&self) -> bool;
    fn previous(&mut self) -> Result<i32, Error>;
    /// Current key, [`Error::NoSuchElement`] before the first element.
    fn current(&self) -> Result<i32, Error>;
    fn move_to_start(&mut self);
    fn move_to_end(&mut self);
    fn remove(&mut self) -> Result<(), Error> {
        Err(Error::Unsupported("remove"))
    }
}

pub struct ListIter<'a, O: KeyOrder> {
    tree: &'a IntRbTree<O>,
    // NIL before the first element
    current: Handle
}
impl<'a, O: KeyOrder> ListIter<'a, O> {
    #[inline]
    pub(crate) fn new(tree: &'a IntRbTree<O>) -> Self {
        Self::at(tree, Handle::NIL)
    }
    /// Iterator whose current element is `current`, the next one returned is its successor.
    #[inline]
    pub(crate) fn at(tree: &'a IntRbTree<O>, current: Handle) -> Self {
        Self { tree, current }
    }
}
impl<'a, O: KeyOrder> Clone for ListIter<'a, O> {
    #[inline]
    fn clone(&self) -> Self {
        Self { tree: self.tree, current: self.current }
    }
}
impl<'a, O: KeyOrder> fmt::Debug for ListIter<'a, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListIter")
            .field("current", &self.current)
            .finish()
    }
}

impl<'a, O: KeyOrder> IntListIterator for ListIter<'a, O> {
    #[inline]
    fn has_next(&self) -> bool {
        self.current != self.tree.greatest
    }
    #[inline]
    fn next(&mut self) -> Result<i32, Error> {
        if !self.has_next() {
            return Err(Error::NoSuchElement);
        }
        self.current = if self.current.is_nil() {
            self.tree.first()
        } else {
            self.tree.neighbour(self.current, RIGHT)
        };
        Ok(self.tree.key_at(self.current))
    }
    #[inline(always)]
    fn has_previous(&self) -> bool {
        !self.current.is_nil()
    }
    #[inline]
    fn previous(&mut self) -> Result<i32, Error> {
        if !self.has_previous() {
            return Err(Error::NoSuchElement);
        }
        let key = self.tree.key_at(self.current);
        // the predecessor of the first node is NIL, which is the position before it
        self.current = self.tree.neighbour(self.current, LEFT);
        Ok(key)
    }
    #[inline]
    fn current(&self) -> Result<i32, Error> {
        self.tree.key(self.current).ok_or(Error::NoSuchElement)
    }
    #[inline(always)]
    fn move_to_start(&mut self) {
        self.current = Handle::NIL;
    }
    #[inline(always)]
    fn move_to_end(&mut self) {
        self.current = self.tree.greatest;
    }
}

/// List iterator that can be ordered against iterators of other trees.
#[derive(Debug)]
pub struct ComparableIter<'a, O: KeyOrder, C: KeyOrder> {
    inner: ListIter<'a, O>,
    comparator: C
}
impl<'a, O: KeyOrder, C: KeyOrder> ComparableIter<'a, O, C> {
    #[inline]
    pub fn new(inner: ListIter<'a, O>, comparator: C) -> Self {
        Self { inner, comparator }
    }
    /// Orders the current keys of two iterators with this iterator's comparator.
    #[inline]
    pub fn compare_to(&self, other: &impl IntListIterator) -> Result<Ordering, Error> {
        Ok(self.comparator.compare(self.inner.current()?, other.current()?))
    }
}
impl<'a, O: KeyOrder, C: KeyOrder + Clone> Clone for ComparableIter<'a, O, C> {
    #[inline]
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), comparator: self.comparator.clone() }
    }
}
impl<'a, O: KeyOrder, C: KeyOrder> IntListIterator for ComparableIter<'a, O, C> {
    #[inline(always)]
    fn has_next(&self) -> bool { self.inner.has_next() }
    #[inline(always)]
    fn next(&mut self) -> Result<i32, Error> { self.inner.next() }
    #[inline(always)]
    fn has_previous(&self) -> bool { self.inner.has_previous() }
    #[inline(always)]
    fn previous(&mut self) -> Result<i32, Error> { self.inner.previous() }
    #[inline(always)]
    fn current(&self) -> Result<i32, Error> { self.inner.current() }
    #[inline(always)]
    fn move_to_start(&mut self) { self.inner.move_to_start() }
    #[inline(always)]
    fn move_to_end(&mut self) { self.inner.move_to_end() }
}

pub struct Keys<'a, O: KeyOrder> {
    tree: &'a IntRbTree<O>,
    front: Handle,
    back: Handle,
    remaining: usize
}
impl<'a, O: KeyOrder> Clone for Keys<'a, O> {
    #[inline]
    fn clone(&self) -> Self {
        Self { tree: self.tree, front: self.front, back: self.back, remaining: self.remaining }
    }
}
impl<'a, O: KeyOrder> Keys<'a, O> {
    #[inline]
    pub(crate) fn next_handle(&mut self) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.front;
        self.remaining -= 1;
        self.front = self.tree.neighbour(current, RIGHT);
        Some(current)
    }
    #[inline]
    pub(crate) fn next_back_handle(&mut self) -> Option<Handle> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.back;
        self.remaining -= 1;
        self.back = self.tree.neighbour(current, LEFT);
        Some(current)
    }
    #[inline(always)]
    pub(crate) fn key_of(&self, ptr: Handle) -> i32 {
        self.tree.key_at(ptr)
    }
}
impl<'a, O: KeyOrder> Iterator for Keys<'a, O> {
    type Item = i32;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_handle().map( |ptr| self.key_of(ptr) )
    }
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
impl<'a, O: KeyOrder> DoubleEndedIterator for Keys<'a, O> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.next_back_handle().map( |ptr| self.key_of(ptr) )
    }
}
impl<'a, O: KeyOrder> ExactSizeIterator for Keys<'a, O> {}
impl<'a, O: KeyOrder> FusedIterator for Keys<'a, O> {}

impl<O: KeyOrder> IntRbTree<O> {
    /// List iterator positioned before the first key.
    #[inline]
    pub fn iterator(&self) -> ListIter<'_, O> {
        ListIter::new(self)
    }
    #[inline]
    pub fn comparable_iterator<C: KeyOrder>(&self, comparator: C) -> ComparableIter<'_, O, C> {
        ComparableIter::new(self.iterator(), comparator)
    }
    /// Keys in order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, O> {
        Keys { tree: self, front: self.first(), back: self.greatest, remaining: self.len() }
    }
}

impl<'a, O: KeyOrder> IntoIterator for &'a IntRbTree<O> {
    type Item = i32;
    type IntoIter = Keys<'a, O>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.keys()
    }
}

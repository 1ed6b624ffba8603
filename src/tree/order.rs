use std::{cmp::Ordering, fmt};

/// Total order over stored keys.
pub trait KeyOrder {
    fn compare(&self, a: i32, b: i32) -> Ordering;
}

/// Raw integer order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;
impl KeyOrder for Natural {
    #[inline(always)]
    fn compare(&self, a: i32, b: i32) -> Ordering {
        a.cmp(&b)
    }
}

/// Order given by a caller supplied function, keys are then opaque identities.
#[derive(Clone, Copy)]
pub struct Comparator<F>(F);
impl<F: Fn(i32, i32) -> Ordering> Comparator<F> {
    #[inline]
    pub const fn new(compare: F) -> Self {
        Self(compare)
    }
}
impl<F: Fn(i32, i32) -> Ordering> KeyOrder for Comparator<F> {
    #[inline(always)]
    fn compare(&self, a: i32, b: i32) -> Ordering {
        (self.0)(a, b)
    }
}
impl<F> fmt::Debug for Comparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Comparator(..)")
    }
}

impl<O: KeyOrder + ?Sized> KeyOrder for &O {
    #[inline(always)]
    fn compare(&self, a: i32, b: i32) -> Ordering {
        (**self).compare(a, b)
    }
}

use std::{
    cell::Cell,
    sync::{atomic::{AtomicU32, Ordering}, Arc}
};

use parking_lot::RwLock;

/// Readable array of modification counters, one slot per watched index.
pub trait GenerationSource {
    /// Current value of `slot`. Array backed sources panic if `slot` is out of range.
    fn generation(&self, slot: usize) -> u32;
}

macro_rules! impl_GenerationSource {
    ( $( [ $( $generics:tt )* ] $type:ty => | $this:ident, $slot:ident | $read:expr ; )* ) => {
        $(
            impl< $( $generics )* > GenerationSource for $type {
                #[inline]
                fn generation(&self, $slot: usize) -> u32 {
                    let $this = self;
                    $read
                }
            }
        )*
    };
}
impl_GenerationSource! {
    [] Vec<u32> => |this, slot| this[slot];
    [const N: usize] [u32; N] => |this, slot| this[slot];
    [] Vec<Cell<u32>> => |this, slot| this[slot].get();
    [const N: usize] [Cell<u32>; N] => |this, slot| this[slot].get();
    [] Vec<AtomicU32> => |this, slot| this[slot].load(Ordering::Acquire);
    [const N: usize] [AtomicU32; N] => |this, slot| this[slot].load(Ordering::Acquire);
}

/// Counter array shared between the owner of several indices and their iterators.
/// Clones refer to the same counters.
#[derive(Debug, Clone, Default)]
pub struct SharedCounters(Arc<RwLock<Vec<u32>>>);
impl SharedCounters {
    #[inline]
    pub fn new(slots: usize) -> Self {
        Self(Arc::new(RwLock::new(vec![0; slots])))
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.0.read().len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
    #[inline]
    pub fn get(&self, slot: usize) -> Option<u32> {
        self.0.read().get(slot).copied()
    }
    /// Records a modification of `slot` and returns the new value. Slots past the end are added.
    pub fn bump(&self, slot: usize) -> u32 {
        let mut counters = self.0.write();
        if slot >= counters.len() {
            counters.resize(slot + 1, 0);
        }
        let counter = &mut counters[slot];
        *counter = counter.wrapping_add(1);
        *counter
    }
}
impl GenerationSource for SharedCounters {
    #[inline]
    fn generation(&self, slot: usize) -> u32 {
        // slots never bumped are still at their initial value
        self.0.read().get(slot).copied().unwrap_or(0)
    }
}

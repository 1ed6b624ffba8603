//! Ordered index of `i32` keys: a red-black tree over parallel arrays, nodes addressed by
//! integer [`Handle`](arena::Handle)s with slot 0 as the NIL sentinel.
//!
//! Keys are either unique ([`IntRbTree::insert`](tree::IntRbTree::insert)) or kept as
//! duplicates ([`IntRbTree::insert_allowing_duplicates`](tree::IntRbTree::insert_allowing_duplicates)),
//! ordered naturally or by an injected comparator. [`IntRbMap`](tree::IntRbMap) carries an
//! `i32` value per key on the same engine.

pub mod arena;
pub mod config;
pub mod counters;
pub mod tree;

pub mod prelude {
    pub use crate::{
        arena::{GrowthPolicy, Handle},
        config::TreeConfig,
        counters::{GenerationSource, SharedCounters},
        tree::{
            IntRbTree, Insertion, Error,
            KeyOrder, Natural, Comparator,
            TieBreak, RandomTieBreak, ScriptedTieBreak,
            IntPointerIterator, PointerIter, ComparablePointerIter,
            IntListIterator, ListIter, ComparableIter, Keys,
            IntRbMap, KeyValueIter, Entries, TreeDump
        }
    };
}

#[cfg(test)]
mod test;

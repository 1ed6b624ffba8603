use crate::{
    arena::GrowthPolicy,
    tree::RandomTieBreak
};

pub const DEFAULT_CAPACITY: usize = 1024;

/// Construction parameters of an [`IntRbTree`](crate::tree::IntRbTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Node slots reserved up front, not counting the sentinel. Values below 1 are treated as 1.
    pub capacity: usize,
    pub growth: GrowthPolicy,
    /// Seed for duplicate tie-breaking, `None` draws one from the OS.
    pub seed: Option<u64>
}
impl TreeConfig {
    #[inline]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
    #[inline]
    pub const fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }
    #[inline]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    #[inline]
    pub(crate) fn tie_break(&self) -> RandomTieBreak {
        match self.seed {
            Some(seed) => RandomTieBreak::seeded(seed),
            None => RandomTieBreak::from_entropy()
        }
    }
}
impl Default for TreeConfig {
    #[inline]
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            growth: GrowthPolicy::default(),
            seed: None
        }
    }
}

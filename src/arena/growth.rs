pub const DEFAULT_GROWTH_FACTOR: usize = 2;
pub const DEFAULT_GROWTH_CAP: usize = 16 * 1024 * 1024;

/// Storage growth: multiplicative below `cap`, additive by `cap` above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    factor: usize,
    cap: usize
}
impl GrowthPolicy {
    /// `factor` is clamped to at least 2 and `cap` to at least 1.
    #[inline]
    pub const fn new(factor: usize, cap: usize) -> Self {
        let factor = if factor < 2 { 2 } else { factor };
        let cap = if cap < 1 { 1 } else { cap };
        Self { factor, cap }
    }
    #[inline(always)]
    pub const fn factor(&self) -> usize {
        self.factor
    }
    #[inline(always)]
    pub const fn cap(&self) -> usize {
        self.cap
    }
    /// Smallest capacity reachable from `capacity` by repeated growth steps
    /// that holds at least `required` slots. Returns `capacity` unchanged if it already does.
    pub fn grow(&self, capacity: usize, required: usize) -> usize {
        let mut capacity = capacity.max(1);
        while capacity < required {
            capacity = if capacity < self.cap {
                capacity.saturating_mul(self.factor)
            } else {
                capacity.saturating_add(self.cap)
            };
        }
        capacity
    }
}
impl Default for GrowthPolicy {
    #[inline]
    fn default() -> Self {
        Self::new(DEFAULT_GROWTH_FACTOR, DEFAULT_GROWTH_CAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_below_cap() {
        let policy = GrowthPolicy::new(2, 1024);
        assert_eq!(policy.grow(8, 9), 16);
        assert_eq!(policy.grow(8, 33), 64);
        assert_eq!(policy.grow(64, 64), 64);
    }

    #[test]
    fn additive_above_cap() {
        let policy = GrowthPolicy::new(2, 100);
        // 64 -> 128 crosses the cap, then +100 per step
        assert_eq!(policy.grow(64, 129), 228);
        assert_eq!(policy.grow(128, 400), 428);
    }

    #[test]
    fn degenerate_parameters_are_clamped() {
        let policy = GrowthPolicy::new(0, 0);
        assert_eq!(policy.factor(), 2);
        assert_eq!(policy.cap(), 1);
        assert_eq!(policy.grow(0, 3), 3);
    }

    #[test]
    fn grows_from_empty() {
        assert_eq!(GrowthPolicy::default().grow(0, 5), 8);
    }
}

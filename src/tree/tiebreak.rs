use std::fmt;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of the coin flips that place equal keys during duplicate insertion.
pub trait TieBreak: Send {
    /// `true` continues (or attaches) to the left of an equal key.
    fn go_left(&mut self) -> bool;
    /// Independent copy that continues with the same sequence of flips.
    fn boxed_clone(&self) -> Box<dyn TieBreak>;
}

#[derive(Clone)]
pub struct RandomTieBreak(StdRng);
impl RandomTieBreak {
    #[inline]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
    #[inline]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}
impl TieBreak for RandomTieBreak {
    #[inline]
    fn go_left(&mut self) -> bool {
        self.0.gen()
    }
    #[inline]
    fn boxed_clone(&self) -> Box<dyn TieBreak> {
        Box::new(self.clone())
    }
}
impl fmt::Debug for RandomTieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RandomTieBreak")
    }
}

/// Replays a fixed sequence of flips, starting over when exhausted.
/// An empty script always goes right.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTieBreak {
    script: Vec<bool>,
    position: usize
}
impl ScriptedTieBreak {
    #[inline]
    pub fn new(script: impl Into<Vec<bool>>) -> Self {
        Self { script: script.into(), position: 0 }
    }
}
impl TieBreak for ScriptedTieBreak {
    #[inline]
    fn go_left(&mut self) -> bool {
        let Some(&flip) = self.script.get(self.position) else { return false };
        self.position = (self.position + 1) % self.script.len();
        flip
    }
    #[inline]
    fn boxed_clone(&self) -> Box<dyn TieBreak> {
        Box::new(self.clone())
    }
}

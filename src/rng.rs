//! WASM-compatible random number generator.
//!
//! Uses the `rand` crate with `SmallRng` which is fast and works with WASM.
//! Entropy is sourced from `getrandom` (browser crypto API). Shuffles seed
//! from here so tests can replay them deterministically.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A seedable RNG for shuffle generation.
pub struct PuzzleRng {
    inner: SmallRng,
}

impl PuzzleRng {
    /// Create from system entropy (browser crypto.getRandomValues or OS).
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    /// Create with a specific seed for deterministic behavior.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generate a random usize in [0, max).
    #[inline(always)]
    pub fn gen_range(&mut self, max: usize) -> usize {
        self.inner.random_range(0..max)
    }

    /// Remove and return a uniformly random element from `pool`.
    pub fn draw(&mut self, pool: &mut Vec<u8>) -> Option<u8> {
        if pool.is_empty() {
            return None;
        }
        let i = self.gen_range(pool.len());
        Some(pool.swap_remove(i))
    }
}

impl Default for PuzzleRng {
    fn default() -> Self {
        Self::new()
    }
}

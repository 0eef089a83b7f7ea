//! RNG module - uniform tile generation
//!
//! Every tile that enters the board, whether from the initial fill or from a
//! refill after a clear, is drawn through [`TileRng::next_kind`]. Each draw is
//! an independent uniform choice over the configured kinds.
//!
//! The generator is seeded, so the same seed reproduces the same board and the
//! same refills. Tests rely on this.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::TileKind;

/// Seeded generator for tile kinds.
#[derive(Debug, Clone)]
pub struct TileRng {
    inner: ChaCha8Rng,
    seed: u64,
    draws: u64,
}

impl TileRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            draws: 0,
        }
    }

    /// Draw a kind uniformly from `0..kinds`.
    ///
    /// `kinds` must be non-zero; the board guarantees at least three.
    pub fn next_kind(&mut self, kinds: u8) -> TileKind {
        debug_assert!(kinds > 0, "tile kind count must be non-zero");
        self.draws = self.draws.wrapping_add(1);
        TileKind::new(self.inner.gen_range(0..kinds))
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of kinds drawn so far
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl Default for TileRng {
    fn default() -> Self {
        Self::new(1)
    }
}

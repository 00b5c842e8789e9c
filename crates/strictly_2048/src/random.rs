//! Seedable random stream used for spawns and value draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Seedable uniform integer generator.
///
/// The same seed replays the same sequence, so a session built with a fixed
/// seed and fed the same directions spawns the same tiles.
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    random_seed: bool,
    rng: StdRng,
}

impl GameRng {
    /// Creates a generator from `seed`, or from a fresh random seed if `None`.
    #[instrument]
    pub fn new(seed: Option<u64>) -> Self {
        let random_seed = seed.is_none();
        let seed = seed.unwrap_or_else(rand::random);
        debug!(seed, random_seed, "Seeded random stream");
        Self {
            seed,
            random_seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator with a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// The seed in use, including one drawn at random.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// True if no seed was supplied and one was drawn at random.
    pub fn is_using_random_seed(&self) -> bool {
        self.random_seed
    }

    /// Uniform integer in `[0, max]`.
    pub fn next(&mut self, max: u32) -> u32 {
        self.rng.random_range(0..=max)
    }

    /// Uniform integer in `[min, max]`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn next_in(&mut self, min: u32, max: u32) -> u32 {
        self.rng.random_range(min..=max)
    }

    /// Uniform index in `[0, len)`.
    ///
    /// # Panics
    ///
    /// Panics if `len` is zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }

    /// True with probability `p`.
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside `[0, 1]`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

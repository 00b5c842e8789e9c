//! The classic 2-or-4 value source.

use super::ValueSource;
use crate::error::GameError;
use crate::random::GameRng;
use tracing::instrument;

/// Spawns a 2, or a 4 with probability `four_chance`.
///
/// Ignores the max-value hint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardValues {
    four_chance: f64,
}

impl StandardValues {
    /// Chance of a 4 in the classic game.
    pub const DEFAULT_FOUR_CHANCE: f64 = 0.1;

    /// Creates a source spawning a 4 with probability `four_chance`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfiguration` unless `0 <= four_chance <= 1`.
    #[instrument]
    pub fn new(four_chance: f64) -> Result<Self, GameError> {
        if !(0.0..=1.0).contains(&four_chance) {
            return Err(GameError::InvalidConfiguration(format!(
                "four_chance({four_chance}) must be within [0, 1]"
            )));
        }
        Ok(Self { four_chance })
    }

    /// Probability of spawning a 4.
    pub fn four_chance(&self) -> f64 {
        self.four_chance
    }
}

impl Default for StandardValues {
    fn default() -> Self {
        Self {
            four_chance: Self::DEFAULT_FOUR_CHANCE,
        }
    }
}

impl ValueSource for StandardValues {
    fn generate_value(&mut self, rng: &mut GameRng) -> u32 {
        if rng.chance(self.four_chance) { 4 } else { 2 }
    }

    fn set_max_value(&mut self, _value: u32) {}
}

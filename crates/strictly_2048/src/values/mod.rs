//! Value sources: where new tile values come from.
//!
//! The session asks its [`ValueSource`] for a value on every spawn and tells
//! it the board's current maximum after every move, so a source can scale
//! its output with the game's progress.

mod preset;
mod standard;

pub use preset::{PresetChoice, PresetRow, PresetValues};
pub use standard::StandardValues;

use crate::random::GameRng;

/// Supplies values for newly spawned tiles.
pub trait ValueSource: std::fmt::Debug {
    /// Draws the value of the next tile. Must be at least 2.
    fn generate_value(&mut self, rng: &mut GameRng) -> u32;

    /// Hint: the largest value on the board, at least 2.
    fn set_max_value(&mut self, value: u32);
}

impl<V: ValueSource + ?Sized> ValueSource for Box<V> {
    fn generate_value(&mut self, rng: &mut GameRng) -> u32 {
        (**self).generate_value(rng)
    }

    fn set_max_value(&mut self, value: u32) {
        (**self).set_max_value(value)
    }
}

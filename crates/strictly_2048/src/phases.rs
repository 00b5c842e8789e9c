//! Session status.

use serde::{Deserialize, Serialize};

/// Status of a game session.
///
/// `Victory` and `Defeat` are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum GameStatus {
    /// Moves are still possible and the winning value has not been reached.
    #[default]
    Continue,
    /// A tile reached the winning value.
    Victory,
    /// No direction can change the board.
    Defeat,
}

impl GameStatus {
    /// True for `Victory` and `Defeat`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Continue)
    }
}

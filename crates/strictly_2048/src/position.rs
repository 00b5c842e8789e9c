//! Grid coordinates and move directions.

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tracing::instrument;

/// A cell coordinate on the board, row-major.
///
/// Rows grow downwards and columns grow to the right, so `(0, 0)` is the
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row index (0 is the top row).
    pub row: usize,
    /// Column index (0 is the leftmost column).
    pub col: usize,
}

impl Position {
    /// Creates a position from a row and a column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring position one step towards `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// The upper bounds are the board's business, not the position's.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Self { row, col })
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction of travel for a move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, strum::Display,
)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Unit step `(row, col)` for this direction.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// True for Left and Right.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when tiles travel towards higher indices (Right and Down).
    ///
    /// Scans along a line then run from the last index back to the first, so
    /// the tile nearest the destination wall is handled first.
    pub const fn is_forward(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    /// Parses a single-letter or full direction name, case-insensitive.
    #[instrument]
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "u" | "k" => Some(Direction::Up),
            "d" | "j" => Some(Direction::Down),
            "l" | "h" => Some(Direction::Left),
            "r" => Some(Direction::Right),
            _ => Direction::iter().find(|dir| dir.to_string().to_lowercase() == s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stays_in_quadrant() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Down), Some(Position::new(1, 0)));
        assert_eq!(origin.step(Direction::Right), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_from_label() {
        assert_eq!(Direction::from_label("L"), Some(Direction::Left));
        assert_eq!(Direction::from_label("down"), Some(Direction::Down));
        assert_eq!(Direction::from_label(" Right "), Some(Direction::Right));
        assert_eq!(Direction::from_label("x"), None);
    }

    #[test]
    fn test_forward_directions() {
        assert!(Direction::Right.is_forward());
        assert!(Direction::Down.is_forward());
        assert!(!Direction::Left.is_forward());
        assert!(!Direction::Up.is_forward());
    }
}

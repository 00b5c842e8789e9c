//! Grid/tile consistency: a tile's stored position is its cell.

use super::Invariant;
use crate::board::Board;
use std::collections::HashSet;

/// Invariant: every occupied cell holds a tile whose position is that cell.
pub struct PositionsConsistentInvariant;

impl Invariant<Board> for PositionsConsistentInvariant {
    fn holds(board: &Board) -> bool {
        board.positions().all(|pos| match board[pos] {
            None => true,
            Some(id) => board.tile(id).is_some_and(|tile| tile.position() == pos),
        })
    }

    fn description() -> &'static str {
        "Tile positions match their grid cells"
    }
}

/// Invariant: no tile occupies two cells.
pub struct UniqueTilesInvariant;

impl Invariant<Board> for UniqueTilesInvariant {
    fn holds(board: &Board) -> bool {
        let mut seen = HashSet::new();
        board.positions().filter_map(|pos| board[pos]).all(|id| seen.insert(id))
    }

    fn description() -> &'static str {
        "Each tile occupies at most one cell"
    }
}

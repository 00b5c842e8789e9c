//! Tile value invariant.

use super::Invariant;
use crate::board::Board;
use crate::tile::MIN_TILE_VALUE;

/// Invariant: every tile on the board is worth at least 2.
pub struct TileValuesInvariant;

impl Invariant<Board> for TileValuesInvariant {
    fn holds(board: &Board) -> bool {
        board.tiles().all(|tile| tile.value() >= MIN_TILE_VALUE)
    }

    fn description() -> &'static str {
        "Tile values are at least 2"
    }
}

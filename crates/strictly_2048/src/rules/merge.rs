//! Merge detection and execution.

use crate::action::MoveResult;
use crate::board::Board;
use crate::position::{Direction, Position};
use crate::tile::TileId;
use tracing::debug;

/// Finds the tile the tile at `from` would merge into when moving `direction`.
///
/// Walks one cell at a time towards `direction`, stepping over empty cells.
/// The first tile met decides: same value means a merge target, a different
/// value blocks the search. Reaching the wall means no target.
///
/// Returns `None` if `from` is empty, or if its value cannot double within a
/// `u32`. This does not consider whether either tile already merged this
/// move.
pub fn find_merge_target(
    board: &Board,
    from: Position,
    direction: Direction,
) -> Option<TileId> {
    let value = board.value_at(from)?;
    // Past u32::MAX / 2 a tile cannot double.
    value.checked_mul(2)?;
    let mut cursor = from;

    loop {
        cursor = cursor.step(direction).filter(|&p| board.is_valid_position(p))?;
        if let Some(id) = board[cursor] {
            return (board.value_at(cursor) == Some(value)).then_some(id);
        }
    }
}

/// True if any tile on `line` has a merge target.
pub fn can_merge_line(board: &Board, line: &[Position], direction: Direction) -> bool {
    line.iter()
        .any(|&pos| find_merge_target(board, pos, direction).is_some())
}

/// Runs the merge pass over `line`, recording merges in `result`.
///
/// A tile merges at most once per move, as source or as target. The source
/// leaves the board and the target doubles in place.
pub(crate) fn merge_line(
    board: &mut Board,
    line: &[Position],
    direction: Direction,
    result: &mut MoveResult,
) {
    for &pos in line {
        let Some(source) = board[pos] else {
            continue;
        };
        if result.has_merged(source) {
            continue;
        }

        let Some(target) = find_merge_target(board, pos, direction) else {
            continue;
        };
        if result.has_merged(target) {
            continue;
        }

        board.clear(pos);
        let value = board.double(target);
        debug!(%source, %target, value, "Merged tiles");

        result.merged.push(target);
        result.removed.push(source);
    }
}

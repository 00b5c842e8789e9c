//! Victory and defeat detection.

use crate::board::Board;
use crate::phases::GameStatus;
use crate::position::Direction;
use crate::rules::{can_merge_line, can_slide_line, scan_lines};
use tracing::instrument;

/// True if moving `direction` would merge or slide at least one tile.
///
/// Dry run of the same searches the move itself performs; the board is not
/// touched.
pub fn is_valid_move(board: &Board, direction: Direction) -> bool {
    scan_lines(board, direction).any(|line| {
        can_slide_line(board, &line, direction) || can_merge_line(board, &line, direction)
    })
}

/// True if at least one direction is a valid move.
pub fn has_valid_moves(board: &Board) -> bool {
    Direction::ALL.iter().any(|&dir| is_valid_move(board, dir))
}

/// Classifies the board.
///
/// Victory wins over defeat: a board holding the winning value is a victory
/// even if it is also stuck.
#[instrument(skip(board))]
pub fn evaluate_status(board: &Board, max_value: u32, winning_value: u32) -> GameStatus {
    if max_value >= winning_value {
        GameStatus::Victory
    } else if has_valid_moves(board) {
        GameStatus::Continue
    } else {
        GameStatus::Defeat
    }
}

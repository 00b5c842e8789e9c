//! The move engine: applies a direction to a board.

use crate::action::MoveResult;
use crate::board::Board;
use crate::position::Direction;
use crate::rules::{self, merge, scan_lines, slide};
use tracing::{debug, instrument};

/// Applies moves to a [`Board`].
///
/// Each line parallel to the move axis is handled on its own: a merge pass
/// first, then a slide pass, both scanning from the destination wall
/// backwards. Lines never interact, so their order does not matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveEngine;

impl MoveEngine {
    /// Merges and slides every line towards `direction`.
    ///
    /// The board is mutated in place. The result is valid if anything
    /// changed; applying a direction that [`is_valid_move`](Self::is_valid_move)
    /// rejects leaves the board as it was.
    #[instrument(skip(board), fields(height = board.height(), width = board.width()))]
    pub fn apply(board: &mut Board, direction: Direction) -> MoveResult {
        let mut result = MoveResult::default();
        board.settle();

        let lines: Vec<_> = scan_lines(board, direction).collect();
        for line in &lines {
            merge::merge_line(board, line, direction, &mut result);
            slide::slide_line(board, line, direction, &mut result);
        }

        result.valid = !result.moved.is_empty() || !result.merged.is_empty();
        debug!(
            moved = result.moved.len(),
            merged = result.merged.len(),
            valid = result.valid,
            "Applied move"
        );
        result
    }

    /// True if moving `direction` would merge or slide at least one tile.
    pub fn is_valid_move(board: &Board, direction: Direction) -> bool {
        rules::is_valid_move(board, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;
    use crate::tile::MAX_TILE_VALUE;

    #[test]
    fn test_merge_then_slide() {
        let mut board = Board::from_rows(&[[2, 2, 0, 0]]).unwrap();
        let result = MoveEngine::apply(&mut board, Direction::Left);

        assert!(result.is_valid());
        assert_eq!(board.values(), vec![vec![4, 0, 0, 0]]);
        assert_eq!(result.merged().len(), 1);
        assert_eq!(result.removed().len(), 1);
        assert!(result.moved().is_empty());
    }

    #[test]
    fn test_four_in_a_row_makes_two_pairs() {
        let mut board = Board::from_rows(&[[2, 2, 2, 2]]).unwrap();
        MoveEngine::apply(&mut board, Direction::Right);
        assert_eq!(board.values(), vec![vec![0, 0, 4, 4]]);
    }

    #[test]
    fn test_lines_are_independent() {
        let mut board = Board::from_rows(&[[2, 0, 2], [4, 2, 0], [0, 0, 8]]).unwrap();
        MoveEngine::apply(&mut board, Direction::Left);
        assert_eq!(
            board.values(),
            vec![vec![4, 0, 0], vec![4, 2, 0], vec![8, 0, 0]]
        );
    }

    #[test]
    fn test_merged_tile_slides_but_is_not_listed_as_moved() {
        let mut board = Board::from_rows(&[[0, 2, 0, 2]]).unwrap();
        let survivor = board[Position::new(0, 1)].unwrap();

        let result = MoveEngine::apply(&mut board, Direction::Left);

        assert_eq!(board.values(), vec![vec![4, 0, 0, 0]]);
        assert_eq!(result.merged(), &[survivor]);
        assert!(result.moved().is_empty());
        let tile = board.tile(survivor).unwrap();
        assert_eq!(tile.position(), Position::new(0, 0));
        assert_eq!(tile.previous_position(), Position::new(0, 1));
        assert_eq!(tile.previous_value(), 2);
    }

    #[test]
    fn test_invalid_direction_changes_nothing() {
        let mut board = Board::from_rows(&[[2, 4, 2, 0]]).unwrap();
        let before = board.values();

        assert!(!MoveEngine::is_valid_move(&board, Direction::Left));
        let result = MoveEngine::apply(&mut board, Direction::Left);

        assert!(!result.is_valid());
        assert_eq!(board.values(), before);
    }

    #[test]
    fn test_tiles_at_value_ceiling_do_not_merge() {
        let ceiling = MAX_TILE_VALUE;
        let mut board = Board::from_rows(&[[ceiling, ceiling, 0]]).unwrap();
        assert!(!MoveEngine::is_valid_move(&board, Direction::Left));

        let result = MoveEngine::apply(&mut board, Direction::Left);

        assert!(!result.is_valid());
        assert_eq!(board.values(), vec![vec![ceiling, ceiling, 0]]);
    }

    #[test]
    fn test_merge_up_to_value_ceiling() {
        let half = MAX_TILE_VALUE / 2;
        let mut board = Board::from_rows(&[[half, half, 0]]).unwrap();

        let result = MoveEngine::apply(&mut board, Direction::Right);

        assert_eq!(result.merged().len(), 1);
        assert_eq!(board.values(), vec![vec![0, 0, MAX_TILE_VALUE]]);
    }
}

//! Slide detection and execution.

use crate::action::MoveResult;
use crate::board::Board;
use crate::position::{Direction, Position};
use tracing::debug;

/// Farthest empty cell reachable from `from` when moving `direction`.
///
/// Returns `from` itself when the adjacent cell is occupied or past the wall.
pub fn find_destination(board: &Board, from: Position, direction: Direction) -> Position {
    let mut destination = from;
    while let Some(next) = destination
        .step(direction)
        .filter(|&p| board.is_valid_position(p) && board[p].is_none())
    {
        destination = next;
    }
    destination
}

/// True if any tile on `line` can slide at least one cell.
pub fn can_slide_line(board: &Board, line: &[Position], direction: Direction) -> bool {
    line.iter()
        .any(|&pos| board[pos].is_some() && find_destination(board, pos, direction) != pos)
}

/// Runs the slide pass over `line`, recording slides in `result`.
///
/// Tiles that merged earlier in the move still slide, but stay listed only
/// under `merged`.
pub(crate) fn slide_line(
    board: &mut Board,
    line: &[Position],
    direction: Direction,
    result: &mut MoveResult,
) {
    for &pos in line {
        let Some(id) = board[pos] else {
            continue;
        };

        let destination = find_destination(board, pos, direction);
        if destination == pos {
            continue;
        }

        board.clear(pos);
        board.place(destination, id);
        debug!(tile = %id, from = %pos, to = %destination, "Slid tile");

        if !result.has_merged(id) {
            result.moved.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::scan_line;

    #[test]
    fn test_destination_against_wall_is_own_position() {
        let board = Board::from_rows(&[[2, 0, 0]]).unwrap();
        let from = Position::new(0, 0);
        assert_eq!(find_destination(&board, from, Direction::Left), from);
        assert_eq!(find_destination(&board, from, Direction::Up), from);
        assert_eq!(
            find_destination(&board, from, Direction::Right),
            Position::new(0, 2)
        );
    }

    #[test]
    fn test_destination_stops_before_tile() {
        let board = Board::from_rows(&[[4, 0, 0, 2]]).unwrap();
        assert_eq!(
            find_destination(&board, Position::new(0, 3), Direction::Left),
            Position::new(0, 1)
        );
    }

    #[test]
    fn test_slide_packs_line_in_order() {
        let mut board = Board::from_rows(&[[0, 2, 0, 4]]).unwrap();
        let line = scan_line(&board, Direction::Right, 0);
        let mut result = MoveResult::default();

        slide_line(&mut board, &line, Direction::Right, &mut result);

        assert_eq!(board.values(), vec![vec![0, 0, 2, 4]]);
        assert_eq!(result.moved().len(), 1);
    }

    #[test]
    fn test_packed_line_cannot_slide() {
        let board = Board::from_rows(&[[2, 4, 2, 0]]).unwrap();
        let line = scan_line(&board, Direction::Left, 0);
        assert!(!can_slide_line(&board, &line, Direction::Left));
        assert!(can_slide_line(
            &board,
            &scan_line(&board, Direction::Right, 0),
            Direction::Right
        ));
    }
}

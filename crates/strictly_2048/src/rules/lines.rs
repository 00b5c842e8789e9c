//! Lines and scan order.

use crate::board::Board;
use crate::position::{Direction, Position};

/// Positions of line `index` parallel to `direction`, in scan order.
///
/// Horizontal moves scan rows and vertical moves scan columns. The first
/// position is the one nearest the wall tiles travel towards.
///
/// # Panics
///
/// Panics if `index` is not a row (horizontal) or column (vertical) of the board.
pub fn scan_line(board: &Board, direction: Direction, index: usize) -> Vec<Position> {
    let (count, len) = line_shape(board, direction);
    assert!(
        index < count,
        "Line {index} does not exist for {direction} moves"
    );

    let mut line: Vec<Position> = (0..len)
        .map(|i| {
            if direction.is_horizontal() {
                Position::new(index, i)
            } else {
                Position::new(i, index)
            }
        })
        .collect();

    if direction.is_forward() {
        line.reverse();
    }
    line
}

/// Every line parallel to `direction`, each in scan order.
pub fn scan_lines(board: &Board, direction: Direction) -> impl Iterator<Item = Vec<Position>> + '_ {
    let (count, _) = line_shape(board, direction);
    (0..count).map(move |index| scan_line(board, direction, index))
}

/// `(number of lines, cells per line)` for moves in `direction`.
fn line_shape(board: &Board, direction: Direction) -> (usize, usize) {
    if direction.is_horizontal() {
        (board.height(), board.width())
    } else {
        (board.width(), board.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::new(2, 3).unwrap()
    }

    #[test]
    fn test_left_scans_row_from_column_zero() {
        let line = scan_line(&board(), Direction::Left, 1);
        assert_eq!(
            line,
            vec![Position::new(1, 0), Position::new(1, 1), Position::new(1, 2)]
        );
    }

    #[test]
    fn test_right_scans_row_from_last_column() {
        let line = scan_line(&board(), Direction::Right, 0);
        assert_eq!(
            line,
            vec![Position::new(0, 2), Position::new(0, 1), Position::new(0, 0)]
        );
    }

    #[test]
    fn test_vertical_lines_are_columns() {
        let board = board();
        assert_eq!(scan_lines(&board, Direction::Up).count(), 3);
        assert_eq!(
            scan_line(&board, Direction::Down, 2),
            vec![Position::new(1, 2), Position::new(0, 2)]
        );
        assert_eq!(
            scan_line(&board, Direction::Up, 2),
            vec![Position::new(0, 2), Position::new(1, 2)]
        );
    }
}

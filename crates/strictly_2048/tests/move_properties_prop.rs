//! Property tests for the move engine over generated boards.
//!
//! Properties covered:
//! - The on-board total is unchanged by any move.
//! - Every merge pairs one doubled tile with one removed tile, and no tile
//!   takes part in two merges.
//! - Tiles stay on the grid and end packed against the destination wall.
//! - A direction reported invalid leaves the board untouched.
//! - Validity prediction agrees with the applied result.

use proptest::prelude::*;
use std::collections::HashSet;
use strictly_2048::rules::{can_slide_line, scan_lines};
use strictly_2048::{Board, Direction, MoveEngine};

fn board_rows() -> impl Strategy<Value = Vec<Vec<u32>>> {
    (1usize..6, 1usize..6).prop_flat_map(|(height, width)| {
        prop::collection::vec(
            prop::collection::vec(prop::sample::select(vec![0u32, 0, 2, 4, 8, 16]), width),
            height,
        )
    })
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn total(board: &Board) -> u64 {
    board.tiles().map(|t| u64::from(t.value())).sum()
}

proptest! {
    #[test]
    fn move_keeps_board_total(rows in board_rows(), direction in direction()) {
        let mut board = Board::from_rows(&rows).unwrap();
        let before = total(&board);

        let result = MoveEngine::apply(&mut board, direction);

        prop_assert_eq!(total(&board), before);
        let absorbed: u64 = result
            .removed()
            .iter()
            .map(|&id| u64::from(board.tile(id).unwrap().value()))
            .sum();
        let gained: u64 = result
            .merged()
            .iter()
            .map(|&id| {
                let tile = board.tile(id).unwrap();
                u64::from(tile.value() - tile.previous_value())
            })
            .sum();
        prop_assert_eq!(absorbed, gained);
    }

    #[test]
    fn tiles_merge_at_most_once(rows in board_rows(), direction in direction()) {
        let mut board = Board::from_rows(&rows).unwrap();
        let count = board.tiles().count();

        let result = MoveEngine::apply(&mut board, direction);

        prop_assert_eq!(result.merged().len(), result.removed().len());
        let mut seen = HashSet::new();
        for &id in result.merged().iter().chain(result.removed()) {
            prop_assert!(seen.insert(id), "tile {} listed twice", id);
        }
        for &id in result.merged() {
            let tile = board.tile(id).unwrap();
            prop_assert_eq!(tile.value(), tile.previous_value() * 2);
        }
        for &id in result.removed() {
            let tile = board.tile(id).unwrap();
            prop_assert_ne!(board[tile.position()], Some(id));
        }
        prop_assert_eq!(board.tiles().count(), count - result.removed().len());
    }

    #[test]
    fn tiles_end_packed_on_grid(rows in board_rows(), direction in direction()) {
        let mut board = Board::from_rows(&rows).unwrap();

        MoveEngine::apply(&mut board, direction);

        for tile in board.tiles() {
            prop_assert!(board.is_valid_position(tile.position()));
            prop_assert_eq!(board[tile.position()], Some(tile.id()));
        }
        for line in scan_lines(&board, direction) {
            prop_assert!(!can_slide_line(&board, &line, direction));
        }
    }

    #[test]
    fn invalid_direction_changes_nothing(rows in board_rows(), direction in direction()) {
        let mut board = Board::from_rows(&rows).unwrap();
        let predicted = MoveEngine::is_valid_move(&board, direction);
        let before = board.values();

        let result = MoveEngine::apply(&mut board, direction);

        prop_assert_eq!(result.is_valid(), predicted);
        if !predicted {
            prop_assert_eq!(board.values(), before);
            prop_assert!(result.moved().is_empty());
        }
    }
}

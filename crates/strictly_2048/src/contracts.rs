//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::action::{MoveError, MoveResult};
use crate::board::Board;
use crate::invariants::{BoardInvariants, InvariantSet, InvariantViolation, MoveResultInvariants};
use crate::position::Direction;
use crate::rules;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after, outcome)} - must hold after applying action
pub trait Contract<S, A> {
    /// What applying the action reports.
    type Outcome;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S, outcome: &Self::Outcome) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the direction must slide or merge something.
pub struct ChangesBoard;

impl ChangesBoard {
    /// Validates that `direction` is a valid move on `board`.
    #[instrument(skip(board))]
    pub fn check(direction: Direction, board: &Board) -> Result<(), MoveError> {
        if rules::is_valid_move(board, direction) {
            Ok(())
        } else {
            Err(MoveError::NoEffect(direction))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: the board total is unchanged by a move.
///
/// Each merge doubles a tile of value `v` and removes another tile of value
/// `v`, so merges only regroup value. Removed tiles must be off the board
/// and merged tiles must hold exactly twice their previous value.
pub struct ValueConserved;

impl ValueConserved {
    /// Checks the before/after totals against the move result.
    pub fn holds(before: &Board, after: &Board, result: &MoveResult) -> bool {
        let total = |board: &Board| board.tiles().map(|t| u64::from(t.value())).sum::<u64>();

        let doubled = result.merged().iter().all(|&id| {
            after
                .tile(id)
                .is_some_and(|t| t.value() == t.previous_value() * 2)
        });
        let gone = result.removed().iter().all(|&id| {
            after
                .tile(id)
                .is_some_and(|t| after[t.position()] != Some(id))
        });

        doubled && gone && total(after) == total(before)
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for applying a direction to a board.
///
/// Preconditions:
/// - The move changes the board
///
/// Postconditions:
/// - Board invariants hold
/// - Move result invariants hold
/// - The board total is unchanged
pub struct MoveContract;

impl Contract<Board, Direction> for MoveContract {
    type Outcome = MoveResult;

    fn pre(board: &Board, direction: &Direction) -> Result<(), MoveError> {
        ChangesBoard::check(*direction, board)
    }

    fn post(before: &Board, after: &Board, result: &MoveResult) -> Result<(), MoveError> {
        let mut violations = Vec::new();
        if let Err(v) = BoardInvariants::check_all(after) {
            violations.extend(v);
        }
        if let Err(v) = MoveResultInvariants::check_all(result) {
            violations.extend(v);
        }
        if !ValueConserved::holds(before, after, result) {
            violations.push(InvariantViolation::new(
                "Board total is unchanged by the move",
            ));
        }

        if violations.is_empty() {
            return Ok(());
        }

        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Move postcondition failed");
        Err(MoveError::InvariantViolation(format!(
            "Postcondition failed: {}",
            descriptions
        )))
    }
}

//! Per-move outcomes and move errors.
//!
//! A move is a domain event: the result records which tiles slid, which
//! absorbed a neighbour and which were absorbed, so callers can animate or
//! audit a turn without diffing boards.

use crate::phases::GameStatus;
use crate::position::Direction;
use crate::tile::TileId;
use serde::{Deserialize, Serialize};

/// What a single move did to the board.
///
/// The three id lists are disjoint and `merged` and `removed` always have
/// the same length: every merge absorbs exactly one tile into another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub(crate) moved: Vec<TileId>,
    pub(crate) merged: Vec<TileId>,
    pub(crate) removed: Vec<TileId>,
    pub(crate) valid: bool,
}

impl MoveResult {
    /// An empty result for a move that was not performed.
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Tiles that slid without merging.
    pub fn moved(&self) -> &[TileId] {
        &self.moved
    }

    /// Tiles that absorbed a neighbour and doubled. They remain on the board.
    pub fn merged(&self) -> &[TileId] {
        &self.merged
    }

    /// Tiles absorbed by a merge. They are no longer on the board.
    pub fn removed(&self) -> &[TileId] {
        &self.removed
    }

    /// True if the move changed the board.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// True if `id` already took part in a merge during this move.
    pub(crate) fn has_merged(&self, id: TileId) -> bool {
        self.merged.contains(&id) || self.removed.contains(&id)
    }
}

/// Reason a move was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Nothing can slide or merge in that direction.
    #[display("Moving {_0} changes nothing")]
    NoEffect(Direction),

    /// The game has already ended.
    #[display("Game is already over ({_0})")]
    GameOver(GameStatus),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

//! Numbered tiles and their arena ids.

use crate::position::Position;
use serde::{Deserialize, Serialize};

/// Smallest value a tile can hold.
pub const MIN_TILE_VALUE: u32 = 2;

/// Largest value a tile can be created with.
///
/// Tiles whose double does not fit in a `u32` never merge.
pub const MAX_TILE_VALUE: u32 = 1 << 31;

/// Stable handle to a tile in the board's arena.
///
/// Ids are never reused within a board, so an id taken from a
/// [`MoveResult`](crate::MoveResult) keeps resolving to the same tile even
/// after the tile has been merged away.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("#{_0}")]
pub struct TileId(pub(crate) usize);

impl TileId {
    /// Arena index of the tile.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A numbered piece with one step of history.
///
/// Position and value are read-only outside the crate. Only the board
/// moves a tile, so its stored position always matches its grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    position: Position,
    value: u32,
    previous_position: Position,
    previous_value: u32,
}

impl Tile {
    pub(crate) fn new(id: TileId, position: Position, value: u32) -> Self {
        debug_assert!(
            value >= MIN_TILE_VALUE,
            "tile value {value} must be >= {MIN_TILE_VALUE}"
        );
        Self {
            id,
            position,
            value,
            previous_position: position,
            previous_value: value,
        }
    }

    pub(crate) fn move_to(&mut self, position: Position) {
        self.previous_position = self.position;
        self.position = position;
    }

    pub(crate) fn set_value(&mut self, value: u32) {
        self.previous_value = self.value;
        self.value = value;
    }

    /// Arena id.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Where the tile sits now.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current value, always at least 2.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Where the tile sat before its last slide (same as `position` if never moved).
    pub fn previous_position(&self) -> Position {
        self.previous_position
    }

    /// Value before its last merge (same as `value` if never merged).
    pub fn previous_value(&self) -> u32 {
        self.previous_value
    }

    /// Forgets the previous step so history describes only the coming move.
    pub(crate) fn settle(&mut self) {
        self.previous_position = self.position;
        self.previous_value = self.value;
    }

    /// True if the last move slid this tile to a new cell.
    pub fn has_moved(&self) -> bool {
        self.previous_position != self.position
    }
}

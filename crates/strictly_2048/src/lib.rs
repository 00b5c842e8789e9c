//! Strictly 2048 - a checked engine for the sliding-tile game
//!
//! A rectangular board holds numbered tiles. A move pushes every tile towards
//! one wall; equal neighbours merge into one tile of double value, at most
//! once per move. After each valid move a new tile appears on an empty cell.
//!
//! # Architecture
//!
//! - **Board**: grid of tile ids over an arena of [`Tile`]s
//! - **Rules**: pure line scanning, merge and slide searches, status checks
//! - **Engine**: [`MoveEngine`] applies a direction in place
//! - **Contracts**: pre/postconditions and invariants checked in debug builds
//! - **Values**: pluggable [`ValueSource`]s for spawned tiles
//! - **Session**: [`GameSession`] sequences moves, spawns and status
//!
//! # Example
//!
//! ```
//! use strictly_2048::{Board, Direction, GameConfig, GameSession, GameStatus, StandardValues};
//!
//! # fn example() -> Result<(), strictly_2048::GameError> {
//! let board = Board::from_rows(&[[2, 2, 0, 0], [0, 0, 0, 0]])?;
//! let config = GameConfig::default();
//! let mut session = GameSession::from_board(board, &config, StandardValues::default())?;
//!
//! let result = session.make_move(Direction::Left);
//! assert!(result.is_valid());
//! assert_eq!(session.board().values()[0], vec![4, 0, 0, 0]);
//! assert_eq!(session.status(), GameStatus::Continue);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod config;
mod engine;
mod error;
mod phases;
mod position;
mod random;
mod session;
mod tile;

// Public module declarations
pub mod contracts;
pub mod invariants;
pub mod rules;
pub mod values;

// Crate-level exports - Board and tiles
pub use board::Board;
pub use position::{Direction, Position};
pub use tile::{MAX_TILE_VALUE, MIN_TILE_VALUE, Tile, TileId};

// Crate-level exports - Moves
pub use action::{MoveError, MoveResult};
pub use engine::MoveEngine;
pub use phases::GameStatus;

// Crate-level exports - Session
pub use config::{GameConfig, ValuesConfig};
pub use random::GameRng;
pub use session::{GameSession, Snapshot, Turn};
pub use values::{PresetValues, StandardValues, ValueSource};

// Crate-level exports - Errors
pub use error::{ConfigError, GameError};

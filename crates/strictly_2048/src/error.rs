//! Error types for the 2048 engine.

use crate::position::Position;
use derive_more::{Display, Error};
use tracing::instrument;

/// Errors raised by board access, session construction and spawning.
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum GameError {
    /// A position lies outside the grid.
    #[display("Position {position} is outside the {height}x{width} board")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Board height.
        height: usize,
        /// Board width.
        width: usize,
    },

    /// Board dimensions or rule parameters are unusable.
    #[display("Invalid configuration: {_0}")]
    InvalidConfiguration(#[error(not(source))] String),

    /// A tile was requested but every cell is occupied.
    #[display("Cannot spawn a tile: the board has no empty cell")]
    NoEmptyCell,

    /// A configuration or preset file could not be loaded.
    #[display("{_0}")]
    Config(ConfigError),
}

impl From<ConfigError> for GameError {
    fn from(err: ConfigError) -> Self {
        GameError::Config(err)
    }
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, PartialEq, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

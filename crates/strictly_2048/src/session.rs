//! Game session: move sequencing, score and status bookkeeping.

use crate::action::{MoveError, MoveResult};
use crate::board::Board;
use crate::config::GameConfig;
use crate::contracts::{Contract, MoveContract};
use crate::engine::MoveEngine;
use crate::error::GameError;
use crate::phases::GameStatus;
use crate::position::{Direction, Position};
use crate::random::GameRng;
use crate::rules;
use crate::tile::{MAX_TILE_VALUE, MIN_TILE_VALUE, Tile, TileId};
use crate::values::ValueSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A running game: one board, one value source, one random stream.
///
/// Sessions share nothing, so a host serving many games can put each
/// session behind its own lock.
#[derive(Debug)]
pub struct GameSession<V = Box<dyn ValueSource + Send>> {
    board: Board,
    values: V,
    rng: GameRng,
    winning_value: u32,
    continue_after_victory: bool,
    moves_count: u32,
    score: u64,
    max_value: u32,
    status: GameStatus,
}

/// Outcome of [`GameSession::play`]: the move and the tile spawned after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// What the move did.
    pub result: MoveResult,
    /// Tile spawned after a valid move, if the game was still running.
    pub spawned: Option<TileId>,
}

/// Serializable view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board width.
    pub width: usize,
    /// Board height.
    pub height: usize,
    /// Values row by row, `0` for empty cells.
    pub cells: Vec<Vec<u32>>,
    /// Sum of all tile values.
    pub score: u64,
    /// Largest tile value (at least 2).
    pub max_value: u32,
    /// Valid moves made so far.
    pub moves_count: u32,
    /// Session status.
    pub status: GameStatus,
}

impl GameSession {
    /// Creates a session whose value source is built from the configuration.
    ///
    /// # Errors
    ///
    /// Returns `GameError` if the configuration is invalid or its preset
    /// file cannot be loaded.
    #[instrument(skip(config))]
    pub fn from_config(config: &GameConfig) -> Result<Self, GameError> {
        let values = config.values().build()?;
        Self::new(config, values)
    }
}

impl<V: ValueSource> GameSession<V> {
    /// Creates a session with an empty board and spawns the initial tiles.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfiguration` if the configuration is
    /// invalid.
    #[instrument(skip(config, values), fields(width = config.width(), height = config.height()))]
    pub fn new(config: &GameConfig, values: V) -> Result<Self, GameError> {
        config.validate()?;
        let board = Board::new(*config.height(), *config.width())?;

        let mut session = Self::assemble(board, config, values);
        session.recompute_totals();
        for _ in 0..*config.initial_tiles() {
            session.spawn_tile()?;
        }

        info!(seed = session.rng.seed(), "Session started");
        Ok(session)
    }

    /// Creates a session around an existing board, without spawning.
    ///
    /// The board's dimensions win over the configured ones. Status is
    /// evaluated immediately, so a board already holding the winning value
    /// starts as a victory.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfiguration` if the rule parameters are
    /// invalid.
    #[instrument(skip(board, config, values))]
    pub fn from_board(board: Board, config: &GameConfig, values: V) -> Result<Self, GameError> {
        config
            .clone()
            .with_width(board.width())
            .with_height(board.height())
            .with_initial_tiles(0)
            .validate()?;

        let mut session = Self::assemble(board, config, values);
        session.recompute_totals();
        session.update_status();
        Ok(session)
    }

    fn assemble(board: Board, config: &GameConfig, values: V) -> Self {
        Self {
            board,
            values,
            rng: GameRng::new(*config.seed()),
            winning_value: *config.winning_value(),
            continue_after_victory: *config.continue_after_victory(),
            moves_count: 0,
            score: 0,
            max_value: MIN_TILE_VALUE,
            status: GameStatus::Continue,
        }
    }

    /// Makes a move towards `direction`.
    ///
    /// If the game is over or the move would change nothing, returns an
    /// invalid result and leaves the session untouched. Otherwise merges and
    /// slides the board, counts the move, and recomputes score, maximum and
    /// status. No tile is spawned; see [`play`](Self::play).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the move breaks a board invariant.
    #[instrument(skip(self), fields(moves = self.moves_count))]
    pub fn make_move(&mut self, direction: Direction) -> MoveResult {
        match self.try_move(direction) {
            Ok(result) => result,
            Err(MoveError::InvariantViolation(message)) => panic!("{message}"),
            Err(err) => {
                warn!(%err, "Move rejected");
                MoveResult::invalid()
            }
        }
    }

    /// Like [`make_move`](Self::make_move), but says why a move was refused.
    ///
    /// # Errors
    ///
    /// - `MoveError::GameOver` if the session is over
    /// - `MoveError::NoEffect` if nothing can slide or merge
    /// - `MoveError::InvariantViolation` if a postcondition fails (debug builds)
    #[instrument(skip(self))]
    pub fn try_move(&mut self, direction: Direction) -> Result<MoveResult, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver(self.status));
        }
        MoveContract::pre(&self.board, &direction)?;

        #[cfg(debug_assertions)]
        let before = self.board.clone();

        let result = MoveEngine::apply(&mut self.board, direction);

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &self.board, &result)?;

        self.moves_count += 1;
        self.recompute_totals();
        self.update_status();

        debug!(
            score = self.score,
            max_value = self.max_value,
            status = %self.status,
            "Move complete"
        );
        Ok(result)
    }

    /// Spawns a tile on a random empty cell.
    ///
    /// The cell is drawn by sampling random coordinates until an empty one
    /// comes up; the value comes from the value source. Score, maximum and
    /// status are refreshed afterwards, so filling the last cell of a stuck
    /// board ends the game.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NoEmptyCell` if the board is full.
    ///
    /// # Panics
    ///
    /// Panics if the value source returns a value outside
    /// `[MIN_TILE_VALUE, MAX_TILE_VALUE]`.
    #[instrument(skip(self))]
    pub fn spawn_tile(&mut self) -> Result<TileId, GameError> {
        if self.board.is_full() {
            warn!("Spawn requested on a full board");
            return Err(GameError::NoEmptyCell);
        }

        let pos = loop {
            let pos = Position::new(
                self.rng.index(self.board.height()),
                self.rng.index(self.board.width()),
            );
            if self.board[pos].is_none() {
                break pos;
            }
        };

        let value = self.values.generate_value(&mut self.rng);
        assert!(
            (MIN_TILE_VALUE..=MAX_TILE_VALUE).contains(&value),
            "Value source produced {value}, expected [{MIN_TILE_VALUE}, {MAX_TILE_VALUE}]"
        );

        let id = self.board.spawn(pos, value);
        info!(tile = %id, %pos, value, "Spawned tile");

        self.recompute_totals();
        self.update_status();
        Ok(id)
    }

    /// Makes a move and, if it was valid and the game goes on, spawns a tile.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NoEmptyCell` if the spawn finds no room, which a
    /// valid move never leaves behind.
    #[instrument(skip(self))]
    pub fn play(&mut self, direction: Direction) -> Result<Turn, GameError> {
        let result = self.make_move(direction);
        let spawned = if result.is_valid() && !self.is_over() {
            Some(self.spawn_tile()?)
        } else {
            None
        };
        Ok(Turn { result, spawned })
    }

    /// True if moving `direction` would change the board.
    pub fn is_valid_move(&self, direction: Direction) -> bool {
        MoveEngine::is_valid_move(&self.board, direction)
    }

    /// True if any direction would change the board.
    pub fn has_valid_moves(&self) -> bool {
        rules::has_valid_moves(&self.board)
    }

    /// True once no further moves are accepted.
    ///
    /// Defeat always ends the game; victory does unless the session was
    /// configured to continue after it.
    pub fn is_over(&self) -> bool {
        match self.status {
            GameStatus::Continue => false,
            GameStatus::Victory => !self.continue_after_victory,
            GameStatus::Defeat => true,
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Looks up a tile by id, including tiles merged away.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.board.tile(id)
    }

    /// The value source.
    pub fn values(&self) -> &V {
        &self.values
    }

    /// Valid moves made so far.
    pub fn moves_count(&self) -> u32 {
        self.moves_count
    }

    /// Sum of all tile values.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Largest tile value, never below 2.
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Value that wins the game.
    pub fn winning_value(&self) -> u32 {
        self.winning_value
    }

    /// Seed of the random stream.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// True if the seed was drawn at random rather than configured.
    pub fn is_using_random_seed(&self) -> bool {
        self.rng.is_using_random_seed()
    }

    /// Serializable view of the session.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.board.width(),
            height: self.board.height(),
            cells: self.board.values(),
            score: self.score,
            max_value: self.max_value,
            moves_count: self.moves_count,
            status: self.status,
        }
    }

    fn recompute_totals(&mut self) {
        self.score = self.board.tiles().map(|t| u64::from(t.value())).sum();
        self.max_value = self
            .board
            .tiles()
            .map(Tile::value)
            .max()
            .unwrap_or(MIN_TILE_VALUE)
            .max(MIN_TILE_VALUE);
        self.values.set_max_value(self.max_value);
    }

    fn update_status(&mut self) {
        let status = rules::evaluate_status(&self.board, self.max_value, self.winning_value);
        if status != self.status {
            info!(from = %self.status, to = %status, "Status changed");
        }
        self.status = status;
    }
}

impl<V> std::fmt::Display for GameSession<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board)?;
        write!(
            f,
            "score: {}  max: {}  moves: {}  status: {}",
            self.score, self.max_value, self.moves_count, self.status
        )
    }
}

//! The board: a fixed grid of optional tile ids over a tile arena.

use crate::error::GameError;
use crate::position::Position;
use crate::tile::{MAX_TILE_VALUE, MIN_TILE_VALUE, Tile, TileId};
use tracing::{instrument, trace};

/// A `height x width` grid where each cell holds zero or one tile.
///
/// Tiles live in an arena owned by the board and are referenced by
/// [`TileId`]. Tiles removed by a merge stay in the arena, so ids handed out
/// in a [`MoveResult`](crate::MoveResult) can still be resolved; they are
/// simply no longer referenced by any cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Option<TileId>>,
    tiles: Vec<Tile>,
}

impl Board {
    /// Largest number of cells a board may have.
    pub const MAX_CELLS: usize = 1 << 16;

    /// Creates an empty board.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfiguration` if either dimension is zero
    /// or the board would exceed [`MAX_CELLS`](Self::MAX_CELLS) cells.
    #[instrument]
    pub fn new(height: usize, width: usize) -> Result<Self, GameError> {
        let cells = Self::cell_count(height, width)?;
        Ok(Self {
            height,
            width,
            cells: vec![None; cells],
            tiles: Vec::new(),
        })
    }

    /// Number of cells of a `height x width` board.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfiguration` if either dimension is zero
    /// or the product exceeds [`MAX_CELLS`](Self::MAX_CELLS).
    pub fn cell_count(height: usize, width: usize) -> Result<usize, GameError> {
        if height == 0 || width == 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "Width({width}) and Height({height}) must be positive"
            )));
        }
        height
            .checked_mul(width)
            .filter(|&cells| cells <= Self::MAX_CELLS)
            .ok_or_else(|| {
                GameError::InvalidConfiguration(format!(
                    "A {height}x{width} board exceeds {} cells",
                    Self::MAX_CELLS
                ))
            })
    }

    /// Builds a board from rows of values, `0` marking an empty cell.
    ///
    /// Tiles are spawned in row-major order, so the first non-zero value gets
    /// the smallest id.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfiguration` if the rows are empty or
    /// ragged, or if a non-zero value lies outside
    /// `[MIN_TILE_VALUE, MAX_TILE_VALUE]`.
    #[instrument(skip(rows))]
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, GameError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut board = Self::new(height, width)?;

        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(GameError::InvalidConfiguration(format!(
                    "Row {row} has {} cells, expected {width}",
                    values.len()
                )));
            }
            for (col, &value) in values.iter().enumerate() {
                match value {
                    0 => {}
                    MIN_TILE_VALUE..=MAX_TILE_VALUE => {
                        board.spawn(Position::new(row, col), value);
                    }
                    _ => {
                        return Err(GameError::InvalidConfiguration(format!(
                            "Tile value {value} at ({row}, {col}) must be within \
                             [{MIN_TILE_VALUE}, {MAX_TILE_VALUE}]"
                        )));
                    }
                }
            }
        }

        Ok(board)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Checks that `pos` lies inside the grid.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// Returns the id of the tile at `pos`, if any.
    ///
    /// # Errors
    ///
    /// Returns `GameError::OutOfBounds` if `pos` is outside the grid.
    pub fn get(&self, pos: Position) -> Result<Option<TileId>, GameError> {
        if !self.is_valid_position(pos) {
            return Err(self.out_of_bounds(pos));
        }
        Ok(self.cells[self.offset(pos)])
    }

    /// Looks up a tile by id, including tiles already merged away.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    /// Tile at `pos`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self[pos].map(|id| &self.tiles[id.0])
    }

    /// Value of the tile at `pos`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn value_at(&self, pos: Position) -> Option<u32> {
        self.tile_at(pos).map(Tile::value)
    }

    /// Tiles currently on the board, in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten().map(|id| &self.tiles[id.0])
    }

    /// Every position of the grid, in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height)
            .flat_map(move |row| (0..self.width).map(move |col| Position::new(row, col)))
    }

    /// Positions of all empty cells, in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.positions().filter(|&pos| self[pos].is_none()).collect()
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Grid of values, `0` for empty cells.
    pub fn values(&self) -> Vec<Vec<u32>> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| self.value_at(Position::new(row, col)).unwrap_or(0))
                    .collect()
            })
            .collect()
    }

    /// Moves `id` to `pos`, recording its prior position as previous.
    ///
    /// The source cell is left untouched; callers clear it first.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub(crate) fn place(&mut self, pos: Position, id: TileId) {
        let offset = self.offset(pos);
        trace!(tile = %id, %pos, "Placing tile");
        self.tiles[id.0].move_to(pos);
        self.cells[offset] = Some(id);
    }

    /// Empties the cell at `pos`. No-op if already empty.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub(crate) fn clear(&mut self, pos: Position) {
        let offset = self.offset(pos);
        self.cells[offset] = None;
    }

    /// Creates a new tile at the empty cell `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid or already occupied.
    pub(crate) fn spawn(&mut self, pos: Position, value: u32) -> TileId {
        let offset = self.offset(pos);
        assert!(
            self.cells[offset].is_none(),
            "Cell {pos} is already occupied"
        );

        let id = TileId(self.tiles.len());
        self.tiles.push(Tile::new(id, pos, value));
        self.cells[offset] = Some(id);
        id
    }

    /// Doubles the value of `id`.
    ///
    /// # Panics
    ///
    /// Panics if the doubled value does not fit in a `u32`. Merge search
    /// never offers such a tile as a target.
    pub(crate) fn double(&mut self, id: TileId) -> u32 {
        let tile = &mut self.tiles[id.0];
        let Some(value) = tile.value().checked_mul(2) else {
            panic!("Tile {id} worth {} cannot double", tile.value());
        };
        tile.set_value(value);
        value
    }

    /// Resets the one-step history of every tile on the board.
    pub(crate) fn settle(&mut self) {
        for id in self.cells.iter().flatten() {
            self.tiles[id.0].settle();
        }
    }

    fn offset(&self, pos: Position) -> usize {
        assert!(
            self.is_valid_position(pos),
            "Position {pos} is outside the {}x{} board",
            self.height,
            self.width
        );
        pos.row * self.width + pos.col
    }

    fn out_of_bounds(&self, pos: Position) -> GameError {
        GameError::OutOfBounds {
            position: pos,
            height: self.height,
            width: self.width,
        }
    }
}

impl std::ops::Index<Position> for Board {
    type Output = Option<TileId>;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[self.offset(pos)]
    }
}

/// ASCII projection, one `[value]` cell per column, one line per row.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cell_width = self
            .tiles()
            .map(|t| t.value().to_string().len())
            .max()
            .unwrap_or(0)
            .max(4);

        for row in 0..self.height {
            for col in 0..self.width {
                match self.value_at(Position::new(row, col)) {
                    Some(value) => write!(f, "[{value:>cell_width$}]")?,
                    None => write!(f, "[{:cell_width$}]", "")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(
            Board::new(0, 4),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Board::new(4, 0),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_new_rejects_oversized_dimensions() {
        assert!(matches!(
            Board::new(4, usize::MAX / 2),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert!(Board::new(257, 256).is_err());
        let largest = Board::new(256, 256).unwrap();
        assert_eq!(largest.empty_count(), Board::MAX_CELLS);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::new(2, 3).unwrap();
        assert_eq!(board.get(Position::new(1, 2)), Ok(None));
        assert_eq!(
            board.get(Position::new(2, 0)),
            Err(GameError::OutOfBounds {
                position: Position::new(2, 0),
                height: 2,
                width: 3,
            })
        );
    }

    #[test]
    fn test_is_valid_position() {
        let board = Board::new(1, 4).unwrap();
        assert!(board.is_valid_position(Position::new(0, 3)));
        assert!(!board.is_valid_position(Position::new(0, 4)));
        assert!(!board.is_valid_position(Position::new(1, 0)));
    }

    #[test]
    fn test_place_keeps_position_and_cell_in_sync() {
        let mut board = Board::from_rows(&[[2, 0, 0]]).unwrap();
        let id = board.get(Position::new(0, 0)).unwrap().unwrap();

        board.clear(Position::new(0, 0));
        board.place(Position::new(0, 2), id);

        let tile = board.tile(id).unwrap();
        assert_eq!(tile.position(), Position::new(0, 2));
        assert_eq!(tile.previous_position(), Position::new(0, 0));
        assert_eq!(board.get(Position::new(0, 2)), Ok(Some(id)));
        assert_eq!(board.get(Position::new(0, 0)), Ok(None));
    }

    #[test]
    fn test_clear_empty_cell_is_noop() {
        let mut board = Board::new(2, 2).unwrap();
        board.clear(Position::new(1, 1));
        assert_eq!(board.empty_count(), 4);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_index_out_of_bounds_panics() {
        let board = Board::new(2, 2).unwrap();
        let _ = board[Position::new(5, 0)];
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let rows: Vec<Vec<u32>> = vec![vec![2, 0], vec![4]];
        assert!(Board::from_rows(&rows).is_err());
    }

    #[test]
    fn test_from_rows_rejects_value_one() {
        assert!(Board::from_rows(&[[1, 0]]).is_err());
    }

    #[test]
    fn test_from_rows_value_ceiling() {
        assert!(Board::from_rows(&[[MAX_TILE_VALUE, 0]]).is_ok());
        assert!(matches!(
            Board::from_rows(&[[MAX_TILE_VALUE + 1, 0]]),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_empty_positions_row_major() {
        let board = Board::from_rows(&[[2, 0], [0, 4]]).unwrap();
        assert_eq!(
            board.empty_positions(),
            vec![Position::new(0, 1), Position::new(1, 0)]
        );
        assert!(!board.is_full());
    }

    #[test]
    fn test_display_ascii() {
        let board = Board::from_rows(&[[2, 0], [0, 1024]]).unwrap();
        assert_eq!(board.to_string(), "[   2][    ]\n[    ][1024]\n");
    }
}

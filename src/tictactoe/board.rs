//! Board state representation and basic operations

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Serialize};

/// Side length of the board
pub const GRID_SIZE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | 'b' | 'B' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// Decode a dataset feature field. Anything that is not an X or O mark is
    /// treated as an empty cell.
    pub fn from_feature(field: &str) -> Cell {
        match field.trim() {
            "x" | "X" => Cell::X,
            "o" | "O" => Cell::O,
            _ => Cell::Empty,
        }
    }

    /// The player owning this cell, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

impl std::str::FromStr for Player {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" => Ok(Player::X),
            "o" => Ok(Player::O),
            _ => Err(crate::Error::ParsePlayer {
                input: s.to_string(),
            }),
        }
    }
}

/// A (row, column) coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index (0-8), or `None` when out of bounds
    pub fn index(self) -> Option<usize> {
        (self.row < GRID_SIZE && self.col < GRID_SIZE).then_some(self.row * GRID_SIZE + self.col)
    }

    /// Position for a row-major index (0-8)
    pub fn from_index(index: usize) -> Self {
        Self {
            row: index / GRID_SIZE,
            col: index % GRID_SIZE,
        }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 3x3 grid of cells.
///
/// Placement goes through [`Board::set`] / [`Board::place`], which reject
/// out-of-range coordinates and occupied cells. Search code mutates the board
/// with [`Board::scoped_mark`], whose guard restores the cell when dropped.
///
/// This type implements `Copy` since it's only 9 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Create a board from row-major cells
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Board { cells }
    }

    /// Create a board from a string representation.
    ///
    /// The string should contain 9 cell characters; whitespace is ignored.
    /// `X`/`x` mark X, `O`/`o`/`0` mark O, and `.`, `_` or `b` mark an empty
    /// cell.
    ///
    /// # Errors
    ///
    /// Returns error if the board does not have exactly 9 cells or any
    /// character is not a valid cell representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use tictactoe_minimax::tictactoe::{Board, Cell};
    ///
    /// let board = Board::from_string("XX. OO. ...").unwrap();
    /// assert_eq!(board.get(1, 0).unwrap(), Cell::O);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    /// Create a board from nine dataset feature fields, decoding leniently.
    ///
    /// Missing trailing fields leave their cells empty.
    pub fn from_features<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (cell, field) in cells.iter_mut().zip(fields) {
            *cell = Cell::from_feature(field);
        }
        Board { cells }
    }

    /// Row-major view of the cells
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Read-only copy of the grid for rendering
    pub fn snapshot(&self) -> [[Cell; GRID_SIZE]; GRID_SIZE] {
        let mut grid = [[Cell::Empty; GRID_SIZE]; GRID_SIZE];
        for (index, &cell) in self.cells.iter().enumerate() {
            let pos = Position::from_index(index);
            grid[pos.row][pos.col] = cell;
        }
        grid
    }

    fn index_of(row: usize, col: usize) -> Result<usize, crate::Error> {
        Position::new(row, col)
            .index()
            .ok_or(crate::Error::InvalidPosition { row, col })
    }

    /// Get the cell at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, crate::Error> {
        Ok(self.cells[Self::index_of(row, col)?])
    }

    /// Place a mark on an empty cell.
    ///
    /// # Errors
    ///
    /// `InvalidPosition` if row or column is outside 0-2, `CellOccupied` if
    /// the cell already holds a mark.
    pub fn set(&mut self, row: usize, col: usize, mark: Player) -> Result<(), crate::Error> {
        let index = Self::index_of(row, col)?;
        if self.cells[index] != Cell::Empty {
            return Err(crate::Error::CellOccupied { row, col });
        }
        self.cells[index] = mark.to_cell();
        Ok(())
    }

    /// Place a mark for a live move; identical rules to [`Board::set`].
    pub fn place(&mut self, row: usize, col: usize, mark: Player) -> Result<(), crate::Error> {
        self.set(row, col, mark)
    }

    /// Reset a cell to empty. Only backtracking code should need this.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), crate::Error> {
        let index = Self::index_of(row, col)?;
        self.cells[index] = Cell::Empty;
        Ok(())
    }

    /// Temporarily place `mark` at `position`.
    ///
    /// The returned guard dereferences to the board and clears the cell again
    /// when it goes out of scope, on every exit path including unwinding.
    ///
    /// # Errors
    ///
    /// Same as [`Board::set`].
    pub fn scoped_mark(
        &mut self,
        position: Position,
        mark: Player,
    ) -> Result<MarkGuard<'_>, crate::Error> {
        let index = Self::index_of(position.row, position.col)?;
        if self.cells[index] != Cell::Empty {
            return Err(crate::Error::CellOccupied {
                row: position.row,
                col: position.col,
            });
        }
        self.cells[index] = mark.to_cell();
        Ok(MarkGuard { board: self, index })
    }

    /// Run `f` with `mark` temporarily placed at `position`.
    pub fn with_mark<R>(
        &mut self,
        position: Position,
        mark: Player,
        f: impl FnOnce(&mut Board) -> R,
    ) -> Result<R, crate::Error> {
        let mut guard = self.scoped_mark(position, mark)?;
        Ok(f(&mut *guard))
    }

    /// Check if a cell is empty; out-of-range positions are never empty
    pub fn is_empty_at(&self, position: Position) -> bool {
        position
            .index()
            .is_some_and(|index| self.cells[index] == Cell::Empty)
    }

    /// True iff no empty cell remains
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// All empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Position::from_index(i))
            .collect()
    }

    /// Count cells holding the given value
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        CELL_COUNT - self.count(Cell::Empty)
    }

    /// Compact one-line encoding, e.g. `XX.OO....`
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(GRID_SIZE) && i < CELL_COUNT - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// A mark placed by [`Board::scoped_mark`]; removed again on drop.
pub struct MarkGuard<'a> {
    board: &'a mut Board,
    index: usize,
}

impl Deref for MarkGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for MarkGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for MarkGuard<'_> {
    fn drop(&mut self) {
        self.board.cells[self.index] = Cell::Empty;
    }
}

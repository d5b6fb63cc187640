use std::fmt;

use serde::Serialize;

use crate::error::{ConfigError, MoveError};

pub const DEFAULT_HEIGHT: usize = 6;
pub const DEFAULT_WIDTH: usize = 7;

/// Smallest side length on which four-in-a-row is reachable in every direction.
pub const MIN_SIZE: usize = 4;

/// Largest side length accepted for either dimension.
pub const MAX_SIZE: usize = 64;

/// Number of same-player cells in a line needed to win.
pub const WIN_LENGTH: usize = 4;

/// Row/column steps for the four line directions: horizontal, vertical,
/// down-right diagonal and down-left diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    Empty,
    Player1,
    Player2,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player1 => 'X',
            Cell::Player2 => 'O',
        }
    }

    fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'X' | 'x' | '1' => Some(Cell::Player1),
            'O' | 'o' | '2' => Some(Cell::Player2),
            _ => None,
        }
    }
}

/// A `height` x `width` grid, row 0 at the top. Dimensions never change
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(height: usize, width: usize) -> Result<Self, ConfigError> {
        let in_range = |side: usize| (MIN_SIZE..=MAX_SIZE).contains(&side);
        if !in_range(height) || !in_range(width) {
            return Err(ConfigError::InvalidDimensions {
                height,
                width,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }
        Ok(Board {
            height,
            width,
            cells: vec![Cell::Empty; height * width],
        })
    }

    /// Parse a board from text rows, top row first.
    ///
    /// `.` is empty, `X`/`1` is player 1 and `O`/`2` is player 2. Whitespace
    /// inside a row is ignored. Rows must share one width and every column
    /// must be gravity-consistent (no piece above an empty cell).
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, ConfigError> {
        let mut parsed: Vec<Vec<Cell>> = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let cells = line
                .as_ref()
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| {
                    Cell::from_symbol(c).ok_or_else(|| {
                        ConfigError::InvalidBoard(format!("unknown symbol '{c}' in row {row}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            parsed.push(cells);
        }

        let height = parsed.len();
        let width = parsed.first().map_or(0, Vec::len);
        if let Some(row) = parsed.iter().position(|r| r.len() != width) {
            return Err(ConfigError::InvalidBoard(format!(
                "row {row} has {} cells, expected {width}",
                parsed[row].len()
            )));
        }

        let mut board = Board::new(height, width)?;
        board.cells = parsed.into_iter().flatten().collect();

        for col in 0..width {
            let first_piece = (0..height).find(|&row| board.cell(row, col) != Cell::Empty);
            if let Some(top) = first_piece {
                if let Some(row) = (top..height).find(|&row| board.cell(row, col) == Cell::Empty) {
                    return Err(ConfigError::InvalidBoard(format!(
                        "column {col} has a floating piece above empty row {row}"
                    )));
                }
            }
        }

        Ok(board)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the cell at a specific position, `None` when out of bounds.
    /// Row 0 is the top.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cell(row, col))
        } else {
            None
        }
    }

    fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    /// Signed lookup used by the line scans; out of bounds reads as `None`.
    fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    /// Check if a column is full. Columns outside the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.width {
            return true;
        }
        self.cell(0, col) != Cell::Empty
    }

    /// Row a piece dropped into `col` would land on, if any.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.width {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&row| self.cell(row, col) == Cell::Empty)
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= self.width {
            return Err(MoveError::InvalidColumn {
                column: col,
                width: self.width,
            });
        }

        let row = self
            .landing_row(col)
            .ok_or(MoveError::ColumnFull { column: col })?;
        self.cells[row * self.width + col] = cell;
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.width).all(|col| self.is_column_full(col))
    }

    /// Check whether the `cell` piece at (row, col) sits on a line of four or
    /// more. Only the four lines through that position are scanned.
    pub fn check_win(&self, row: usize, col: usize, cell: Cell) -> bool {
        if cell == Cell::Empty || self.get(row, col) != Some(cell) {
            return false;
        }

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let run = 1
                + self.count_run(row, col, dr, dc, cell)
                + self.count_run(row, col, -dr, -dc, cell);
            run >= WIN_LENGTH
        })
    }

    /// Count consecutive `cell` pieces stepping away from (row, col),
    /// excluding the start position.
    fn count_run(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        let mut count = 0;
        while self.cell_at(r, c) == Some(cell) {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    /// Scan every cell as the start of a four-long window in each direction.
    pub fn has_four_in_a_row(&self, cell: Cell) -> bool {
        if cell == Cell::Empty {
            return false;
        }

        (0..self.height).any(|row| {
            (0..self.width).any(|col| {
                DIRECTIONS.iter().any(|&(dr, dc)| {
                    (0..WIN_LENGTH as isize).all(|k| {
                        self.cell_at(row as isize + k * dr, col as isize + k * dc) == Some(cell)
                    })
                })
            })
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Board {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            cells: vec![Cell::Empty; DEFAULT_HEIGHT * DEFAULT_WIDTH],
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            let line: String = (0..self.width)
                .map(|col| self.cell(row, col).symbol())
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

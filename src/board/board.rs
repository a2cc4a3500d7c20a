//! Board structure with occupancy tracking

use std::fmt;

use super::{Cell, Pos, Symbol, DEFAULT_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::error::{GameError, Result};

/// Square SOS board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Row-major cells
    cells: Vec<Cell>,
    /// Number of non-empty cells
    filled: usize,
}

impl Board {
    /// Create an empty `size`x`size` board.
    pub fn new(size: usize) -> Result<Self> {
        if size < MIN_BOARD_SIZE {
            return Err(GameError::InvalidSize {
                size,
                min: MIN_BOARD_SIZE,
            });
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
            filled: 0,
        })
    }

    /// Build a board from text rows, one string per row. `S` and `O` place
    /// symbols, any other character leaves the cell empty.
    ///
    /// ```
    /// use sos::Board;
    ///
    /// let board = Board::from_rows(&["S.S", "...", ".O."]).unwrap();
    /// assert_eq!(board.filled_count(), 3);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let mut board = Board::new(rows.len())?;
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let symbol = match ch {
                    'S' | 's' => Symbol::S,
                    'O' | 'o' => Symbol::O,
                    _ => {
                        if c >= board.size {
                            return Err(GameError::InvalidCoordinate {
                                row: r,
                                col: c,
                                size: board.size,
                            });
                        }
                        continue;
                    }
                };
                board.set(Pos::new(r, c), symbol)?;
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    #[inline]
    fn check(&self, pos: Pos) -> Result<usize> {
        if self.contains(pos) {
            Ok(pos.to_index(self.size))
        } else {
            Err(GameError::InvalidCoordinate {
                row: pos.row,
                col: pos.col,
                size: self.size,
            })
        }
    }

    /// Get cell at position
    pub fn get(&self, pos: Pos) -> Result<Cell> {
        let idx = self.check(pos)?;
        Ok(self.cells[idx])
    }

    /// Cell lookup for positions already known to be on the board.
    /// Off-board positions read as `Empty`.
    #[inline]
    pub fn cell(&self, pos: Pos) -> Cell {
        if self.contains(pos) {
            self.cells[pos.to_index(self.size)]
        } else {
            Cell::Empty
        }
    }

    /// Place a symbol. Fails on off-board or occupied targets without
    /// touching the board.
    pub fn set(&mut self, pos: Pos, symbol: Symbol) -> Result<()> {
        let idx = self.check(pos)?;
        if !self.cells[idx].is_empty() {
            return Err(GameError::OccupiedCell {
                row: pos.row,
                col: pos.col,
            });
        }
        self.cells[idx] = symbol.into();
        self.filled += 1;
        Ok(())
    }

    /// Check if position is empty (off-board counts as not empty)
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.contains(pos) && self.cells[pos.to_index(self.size)].is_empty()
    }

    /// Total symbols on board
    #[inline]
    pub fn filled_count(&self) -> usize {
        self.filled
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled == self.size * self.size
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> Vec<Pos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| Pos::from_index(idx, self.size))
            .collect()
    }

    /// Positions holding `cell`, row-major
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == cell)
            .map(move |(idx, _)| Pos::from_index(idx, size))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            cells: vec![Cell::Empty; DEFAULT_BOARD_SIZE * DEFAULT_BOARD_SIZE],
            filled: 0,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                write!(f, "{}|", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

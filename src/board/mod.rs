//! Board representation for SOS

pub mod board;


// Re-exports
pub use board::Board;

/// Default board size (6x6)
pub const DEFAULT_BOARD_SIZE: usize = 6;
/// Smallest board on which an S-O-S line fits
pub const MIN_BOARD_SIZE: usize = 3;

/// Letter a side can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    S,
    O,
}

impl Symbol {
    /// Both symbols, S first (legal action order depends on this)
    pub const ALL: [Symbol; 2] = [Symbol::S, Symbol::O];

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Symbol::S => 'S',
            Symbol::O => 'O',
        }
    }
}

/// Cell contents. Write-once: a cell never returns to `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    S,
    O,
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[inline]
    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::S => 'S',
            Cell::O => 'O',
        }
    }
}

impl From<Symbol> for Cell {
    #[inline]
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::S => Cell::S,
            Symbol::O => Cell::O,
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: idx / size,
            col: idx % size,
        }
    }

    #[inline]
    pub fn is_valid(row: isize, col: isize, size: usize) -> bool {
        row >= 0 && (row as usize) < size && col >= 0 && (col as usize) < size
    }

    /// Step `k` times along `(dr, dc)`, or `None` if that leaves the board.
    #[inline]
    pub fn offset(self, dr: isize, dc: isize, k: isize, size: usize) -> Option<Pos> {
        let r = self.row as isize + dr * k;
        let c = self.col as isize + dc * k;
        if Pos::is_valid(r, c, size) {
            Some(Pos::new(r as usize, c as usize))
        } else {
            None
        }
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

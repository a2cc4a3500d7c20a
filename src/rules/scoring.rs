//! S-O-S line detection around a freshly placed cell
//!
//! Only the four lines through the placed cell are inspected, and only up to
//! two cells away from it. A triple is reported exactly when the placement
//! fills its last empty cell, so summing the per-move counts over a game
//! counts every triple on the final board once.

use crate::board::{Board, Cell, Pos};

/// Line directions, each scanned forwards from the triple's anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// (row, col) step from one cell of a triple to the next
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// A completed S-O-S triple.
///
/// The anchor is the first cell in scan order: leftmost for rows, topmost
/// for columns and both diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineMatch {
    pub anchor: Pos,
    pub direction: Direction,
}

impl LineMatch {
    /// The three cells of the triple, anchor first
    pub fn cells(&self) -> [Pos; 3] {
        let (dr, dc) = self.direction.delta();
        let step = |k: isize| {
            Pos::new(
                (self.anchor.row as isize + dr * k) as usize,
                (self.anchor.col as isize + dc * k) as usize,
            )
        };
        [step(0), step(1), step(2)]
    }
}

const PATTERN: [Cell; 3] = [Cell::S, Cell::O, Cell::S];

/// Every S-O-S triple that contains `pos`.
///
/// In each direction the placed cell is tried as the leading S, the middle O
/// and the trailing S; all three alignments are checked independently.
pub fn find_matches(board: &Board, pos: Pos) -> Vec<LineMatch> {
    let size = board.size();
    let mut matches = Vec::new();

    for direction in Direction::ALL {
        let (dr, dc) = direction.delta();
        for k in 0..3isize {
            let Some(anchor) = pos.offset(dr, dc, -k, size) else {
                continue;
            };
            // The far end must also be on the board
            if anchor.offset(dr, dc, 2, size).is_none() {
                continue;
            }
            let is_sos = (0..3).all(|i| {
                let cell = Pos::new(
                    (anchor.row as isize + dr * i as isize) as usize,
                    (anchor.col as isize + dc * i as isize) as usize,
                );
                board.cell(cell) == PATTERN[i]
            });
            if is_sos {
                matches.push(LineMatch { anchor, direction });
            }
        }
    }
    matches
}

/// Number of triples completed by the symbol at `pos` (0 to 12)
#[inline]
pub fn count_matches(board: &Board, pos: Pos) -> u32 {
    find_matches(board, pos).len() as u32
}

/// Every S-O-S triple on the board. Full O(N²) scan, used for verification
/// and for redrawing lines, never during search.
pub fn all_matches(board: &Board) -> Vec<LineMatch> {
    let size = board.size();
    let mut matches = Vec::new();
    for row in 0..size {
        for col in 0..size {
            let anchor = Pos::new(row, col);
            if board.cell(anchor) != Cell::S {
                continue;
            }
            for direction in Direction::ALL {
                let (dr, dc) = direction.delta();
                let (Some(mid), Some(end)) = (
                    anchor.offset(dr, dc, 1, size),
                    anchor.offset(dr, dc, 2, size),
                ) else {
                    continue;
                };
                if board.cell(mid) == Cell::O && board.cell(end) == Cell::S {
                    matches.push(LineMatch { anchor, direction });
                }
            }
        }
    }
    matches
}

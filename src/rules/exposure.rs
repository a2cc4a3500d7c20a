//! "Almost-SOS" detection
//!
//! An S is exposed when a single placement next turn would turn it into a
//! completed S-O-S: along one of the 8 neighbour directions the next two
//! cells read O-Empty (opponent adds the trailing S) or Empty-S (opponent
//! adds the middle O).

use crate::board::{Board, Cell, Pos};

/// The 8 neighbour offsets
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Check if the cell at `pos` leaves an S-O-S one move from completion.
pub fn is_almost_sos(board: &Board, pos: Pos) -> bool {
    let size = board.size();
    NEIGHBOURS.iter().any(|&(dr, dc)| {
        let (Some(o_pos), Some(s_pos)) = (pos.offset(dr, dc, 1, size), pos.offset(dr, dc, 2, size))
        else {
            return false;
        };
        let near = board.cell(o_pos);
        let far = board.cell(s_pos);
        (near == Cell::O && far == Cell::Empty) || (near == Cell::Empty && far == Cell::S)
    })
}

/// Number of S cells on the board that are exposed
pub fn count_exposed(board: &Board) -> usize {
    board
        .positions_of(Cell::S)
        .filter(|&pos| is_almost_sos(board, pos))
        .count()
}

/// True if no S on the board is exposed
#[inline]
pub fn is_safe(board: &Board) -> bool {
    count_exposed(board) == 0
}

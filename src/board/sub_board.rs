//! A single 3x3 sub-board.

use super::lines::{first_line, grid_index, GRID_CELLS};
use super::player::{Outcome, Player};

/// One of the nine small boards.
///
/// `moves` mirrors the number of occupied cells so a full board can be
/// recognised without rescanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SubBoard {
    cells: [Option<Player>; GRID_CELLS],
    moves: u8,
}

impl SubBoard {
    /// Creates an empty sub-board.
    pub const fn new() -> Self {
        SubBoard {
            cells: [None; GRID_CELLS],
            moves: 0,
        }
    }

    /// Returns the mark at (row, col).
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        self.cells[grid_index(row, col)]
    }

    /// All nine cells, row-major.
    #[inline]
    pub fn cells(&self) -> &[Option<Player>; GRID_CELLS] {
        &self.cells
    }

    /// Number of marks placed so far.
    #[inline]
    pub fn moves(&self) -> u8 {
        self.moves
    }

    /// Places a mark. Returns false if the cell is already occupied.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> bool {
        let idx = grid_index(row, col);
        if self.cells[idx].is_some() {
            return false;
        }
        self.cells[idx] = Some(player);
        self.moves += 1;
        true
    }

    /// Scans the sub-board for a result without touching any cache.
    ///
    /// Rows, then columns, then diagonals; the first complete line wins. A
    /// full board without a line is a tie.
    pub fn outcome(&self) -> Outcome {
        if let Some(Some(p)) = first_line(&self.cells, |c| c.is_some()) {
            return Outcome::Won(p);
        }
        if self.moves as usize == GRID_CELLS {
            Outcome::Tie
        } else {
            Outcome::Undetermined
        }
    }
}

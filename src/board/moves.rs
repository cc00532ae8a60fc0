//! Move representation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::grid_index;

/// A mark placed at (row, col) inside sub-board `sub_board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub sub_board: usize,
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(sub_board: usize, row: usize, col: usize) -> Self {
        Move { sub_board, row, col }
    }

    /// True if all three coordinates are on the board.
    pub const fn in_range(&self) -> bool {
        self.sub_board < 9 && self.row < 3 && self.col < 3
    }

    /// The sub-board the opponent is sent to by this move.
    #[inline]
    pub const fn target(&self) -> usize {
        grid_index(self.row, self.col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.sub_board, self.row, self.col)
    }
}

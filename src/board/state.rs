//! Full board state.
//!
//! Nine sub-boards plus the major grid of their outcomes. The major grid is
//! a write-once cache: a slot is filled the first time `sub_board_outcome`
//! sees that sub-board decided, and the game-level checks read only the
//! cache, never raw cells.

use super::lines::{first_line, GRID_CELLS};
use super::moves::Move;
use super::player::{Outcome, Player};
use super::sub_board::SubBoard;

/// Complete board state for one game.
///
/// Plain fixed-size arrays, so `clone()` is a full value copy and search
/// branches never share a sub-board with their parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    sub_boards: [SubBoard; GRID_CELLS],
    /// Terminal outcome per sub-board, filled at most once.
    major: [Option<Outcome>; GRID_CELLS],
    /// Number of filled `major` slots.
    decided: u8,
}

impl Board {
    /// Creates an empty board.
    pub const fn new() -> Self {
        Board {
            sub_boards: [SubBoard::new(); GRID_CELLS],
            major: [None; GRID_CELLS],
            decided: 0,
        }
    }

    /// Returns sub-board `index`.
    #[inline]
    pub fn sub_board(&self, index: usize) -> &SubBoard {
        &self.sub_boards[index]
    }

    /// Returns the mark at (row, col) of sub-board `index`.
    #[inline]
    pub fn cell(&self, index: usize, row: usize, col: usize) -> Option<Player> {
        self.sub_boards[index].cell(row, col)
    }

    /// Number of sub-boards whose outcome has been recorded.
    #[inline]
    pub fn decided_count(&self) -> u8 {
        self.decided
    }

    /// The major grid as seen by the game-level checks.
    pub fn major_grid(&self) -> [Outcome; GRID_CELLS] {
        self.major.map(|slot| slot.unwrap_or(Outcome::Undetermined))
    }

    /// Places `player`'s mark. Returns false, leaving the board untouched, if
    /// the cell is occupied or the coordinates are off the board.
    ///
    /// Whether the sub-board is already decided or is the one the mover is
    /// allowed to play in is the caller's concern; the search relies on
    /// probing arbitrary cells.
    pub fn attempt_move(&mut self, index: usize, row: usize, col: usize, player: Player) -> bool {
        if index >= GRID_CELLS || row >= 3 || col >= 3 {
            return false;
        }
        self.sub_boards[index].place(row, col, player)
    }

    /// Plays `mv` and refreshes the outcome of the sub-board it landed in.
    pub fn apply(&mut self, mv: Move, player: Player) -> bool {
        if !self.attempt_move(mv.sub_board, mv.row, mv.col, player) {
            return false;
        }
        self.sub_board_outcome(mv.sub_board);
        true
    }

    /// Returns the outcome of sub-board `index`, recording it in the major
    /// grid the first time it is decided.
    ///
    /// Once recorded the cached value is returned as-is, so repeated calls
    /// are stable and count the sub-board only once.
    pub fn sub_board_outcome(&mut self, index: usize) -> Outcome {
        if let Some(outcome) = self.major[index] {
            return outcome;
        }
        let outcome = self.sub_boards[index].outcome();
        if outcome.is_decided() {
            self.major[index] = Some(outcome);
            self.decided += 1;
        }
        outcome
    }

    /// Returns the game result from the major grid.
    ///
    /// Only won sub-boards can form a line; a row of ties is not a win. The
    /// game is a tie once all nine sub-boards are recorded without a line.
    pub fn overall_outcome(&self) -> Outcome {
        let grid = self.major_grid();
        if let Some(outcome) = first_line(&grid, |o| matches!(o, Outcome::Won(_))) {
            return outcome;
        }
        if self.decided as usize == GRID_CELLS {
            Outcome::Tie
        } else {
            Outcome::Undetermined
        }
    }

    /// True if sub-board `index` is decided, either recorded or by a fresh
    /// scan. Does not update the cache.
    pub fn is_decided(&self, index: usize) -> bool {
        self.major[index].is_some() || self.sub_boards[index].outcome().is_decided()
    }

    /// True if a mark may go at (row, col) of sub-board `index`: the
    /// sub-board is undecided and the cell is empty.
    pub fn is_playable(&self, index: usize, row: usize, col: usize) -> bool {
        if index >= GRID_CELLS || row >= 3 || col >= 3 {
            return false;
        }
        !self.is_decided(index) && self.cell(index, row, col).is_none()
    }

    /// Re-derives the cache for all nine sub-boards. Used after building a
    /// board cell by cell.
    pub fn refresh_outcomes(&mut self) {
        for i in 0..GRID_CELLS {
            self.sub_board_outcome(i);
        }
    }
}

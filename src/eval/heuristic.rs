//! Heuristic position evaluation.
//!
//! Single-sided and additive: a position earns points for `me`'s partial
//! and complete lines, on each sub-board and on the major grid. Nothing is
//! subtracted for the opponent's progress. The search scores every leaf
//! for the same fixed player and lets minimax alternate the objective, so
//! this must stay one-sided; a symmetric evaluator plays differently.

use crate::board::{grid_index, Board, Outcome, Player, GRID_CELLS};

/// Adjacent pair in a sub-board row or column.
const CELL_PAIR: i32 = 2;
/// Completed sub-board row, column or diagonal.
const CELL_LINE: i32 = 6;
/// Corner matching the center of a sub-board.
const CORNER_CENTER: i32 = 2;
/// Adjacent pair of won sub-boards in a major row or column.
const MAJOR_PAIR: i32 = 20;
/// Completed major row, column or diagonal.
const MAJOR_LINE: i32 = 60;

const CORNERS: [usize; 4] = [0, 2, 6, 8];
const CENTER: usize = 4;

/// Scores `board` for `me`. Higher is better for `me`.
pub fn evaluate(board: &Board, me: Player) -> i32 {
    let mut score = 0;
    for i in 0..GRID_CELLS {
        let mine = board.sub_board(i).cells().map(|c| c == Some(me));
        score += grid_score(&mine, CELL_PAIR, CELL_LINE);
        score += corner_center_score(&mine);
    }
    let major = board.major_grid().map(|o| o == Outcome::Won(me));
    score + grid_score(&major, MAJOR_PAIR, MAJOR_LINE)
}

/// Scores pairs and completed lines on one 3x3 grid of "is mine" flags.
///
/// Each adjacent pair in a row or column earns `pair`, each complete row or
/// column earns `line`, and the diagonals earn `line` once if either is
/// complete.
fn grid_score(mine: &[bool; GRID_CELLS], pair: i32, line: i32) -> i32 {
    let at = |r: usize, c: usize| mine[grid_index(r, c)];
    let mut score = 0;

    for i in 0..3 {
        for j in 0..2 {
            if at(i, j) && at(i, j + 1) {
                score += pair;
            }
            if at(j, i) && at(j + 1, i) {
                score += pair;
            }
        }
        if at(i, 0) && at(i, 1) && at(i, 2) {
            score += line;
        }
        if at(0, i) && at(1, i) && at(2, i) {
            score += line;
        }
    }

    let main_diagonal = at(0, 0) && at(1, 1) && at(2, 2);
    let anti_diagonal = at(0, 2) && at(1, 1) && at(2, 0);
    if main_diagonal || anti_diagonal {
        score += line;
    }

    score
}

/// Partial diagonal progress: each corner that matches an owned center.
fn corner_center_score(mine: &[bool; GRID_CELLS]) -> i32 {
    if !mine[CENTER] {
        return 0;
    }
    CORNERS.iter().filter(|&&c| mine[c]).count() as i32 * CORNER_CENTER
}

//! Legal move generation.
//!
//! A turn is either free (any undecided sub-board) or constrained to the
//! sub-board named by the previous move's (row, col). This module enumerates
//! the candidate cells for a scope and derives the scope for the next turn.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{grid_coords, Board, Move, GRID_CELLS};

/// Where the side to move may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Any cell of any undecided sub-board.
    #[default]
    Free,
    /// Only cells of the given sub-board.
    Within(usize),
}

impl Scope {
    /// True if a move into sub-board `index` is inside this scope.
    pub const fn allows(self, index: usize) -> bool {
        match self {
            Scope::Free => true,
            Scope::Within(i) => i == index,
        }
    }

    /// Notation character: `*` for free, the digit otherwise.
    pub fn notation_char(self) -> char {
        match self {
            Scope::Free => '*',
            Scope::Within(i) => char::from_digit(i as u32, 10).unwrap_or('*'),
        }
    }

    /// Parses a scope from its notation character.
    pub fn from_notation_char(c: char) -> Option<Scope> {
        match c {
            '*' => Some(Scope::Free),
            d => d
                .to_digit(10)
                .filter(|&i| (i as usize) < GRID_CELLS)
                .map(|i| Scope::Within(i as usize)),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation_char())
    }
}

/// Enumerates every playable cell reachable under `scope`.
///
/// Decided sub-boards contribute nothing, including a decided sub-board
/// named by `Scope::Within`. Moves come out in sub-board, row, col order.
pub fn legal_moves(board: &Board, scope: Scope) -> Vec<Move> {
    let mut moves = Vec::new();
    match scope {
        Scope::Free => {
            for index in 0..GRID_CELLS {
                push_sub_board_moves(board, index, &mut moves);
            }
        }
        Scope::Within(index) if index < GRID_CELLS => {
            push_sub_board_moves(board, index, &mut moves);
        }
        Scope::Within(_) => {}
    }
    moves
}

/// Appends the empty cells of sub-board `index` if it is still open.
fn push_sub_board_moves(board: &Board, index: usize, moves: &mut Vec<Move>) {
    if board.is_decided(index) {
        return;
    }
    for cell in 0..GRID_CELLS {
        let (row, col) = grid_coords(cell);
        if board.cell(index, row, col).is_none() {
            moves.push(Move::new(index, row, col));
        }
    }
}

/// Returns the scope the opponent faces after `mv` was played on `board`.
///
/// The move's (row, col) names the next sub-board; if that sub-board is
/// decided the opponent gets a free choice. Records the target's outcome in
/// the major grid as a side effect.
pub fn next_scope(board: &mut Board, mv: Move) -> Scope {
    let target = mv.target();
    if board.sub_board_outcome(target).is_decided() {
        Scope::Free
    } else {
        Scope::Within(target)
    }
}

/// Picks a uniformly random legal move, or `None` if there is none.
pub fn random_move(board: &Board, scope: Scope, rng: &mut impl Rng) -> Option<Move> {
    legal_moves(board, scope).choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn empty_board_free_has_81_moves() {
        let board = Board::new();
        assert_eq!(legal_moves(&board, Scope::Free).len(), 81);
    }

    #[test]
    fn constrained_scope_only_targets_one_sub_board() {
        let mut board = Board::new();
        board.attempt_move(4, 1, 1, Player::X);
        let moves = legal_moves(&board, Scope::Within(4));
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.sub_board == 4));
        assert!(!moves.contains(&Move::new(4, 1, 1)));
    }

    #[test]
    fn free_scope_skips_decided_sub_boards() {
        let mut board = Board::new();
        for col in 0..3 {
            board.attempt_move(0, 0, col, Player::X);
        }
        board.sub_board_outcome(0);
        let moves = legal_moves(&board, Scope::Free);
        assert_eq!(moves.len(), 72);
        assert!(moves.iter().all(|m| m.sub_board != 0));
    }

    #[test]
    fn decided_constrained_sub_board_yields_nothing() {
        let mut board = Board::new();
        for row in 0..3 {
            board.attempt_move(2, row, 0, Player::O);
        }
        assert!(legal_moves(&board, Scope::Within(2)).is_empty());
        assert!(legal_moves(&board, Scope::Within(11)).is_empty());
    }

    #[test]
    fn next_scope_follows_row_col() {
        let mut board = Board::new();
        let mv = Move::new(0, 2, 1);
        board.apply(mv, Player::X);
        assert_eq!(next_scope(&mut board, mv), Scope::Within(7));
    }

    #[test]
    fn next_scope_is_free_when_target_decided() {
        let mut board = Board::new();
        for col in 0..3 {
            board.attempt_move(7, 1, col, Player::O);
        }
        let mv = Move::new(0, 2, 1);
        board.apply(mv, Player::X);
        assert_eq!(next_scope(&mut board, mv), Scope::Free);
        // The target's outcome is now recorded.
        assert_eq!(board.decided_count(), 1);
    }

    #[test]
    fn scope_notation_roundtrip() {
        assert_eq!(Scope::from_notation_char('*'), Some(Scope::Free));
        for i in 0..GRID_CELLS {
            let s = Scope::Within(i);
            assert_eq!(Scope::from_notation_char(s.notation_char()), Some(s));
        }
        assert_eq!(Scope::from_notation_char('9'), None);
        assert_eq!(Scope::from_notation_char('x'), None);
    }

    #[test]
    fn scope_allows() {
        assert!(Scope::Free.allows(3));
        assert!(Scope::Within(3).allows(3));
        assert!(!Scope::Within(3).allows(4));
    }

    #[test]
    fn random_move_is_legal() {
        let mut board = Board::new();
        board.attempt_move(4, 0, 0, Player::X);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mv = random_move(&board, Scope::Within(4), &mut rng).unwrap();
            assert!(board.is_playable(mv.sub_board, mv.row, mv.col));
            assert_eq!(mv.sub_board, 4);
        }
    }

    #[test]
    fn random_move_none_without_moves() {
        let mut board = Board::new();
        for col in 0..3 {
            board.attempt_move(1, 0, col, Player::X);
        }
        assert_eq!(random_move(&board, Scope::Within(1), &mut seeded_rng()), None);
    }

    #[test]
    fn random_move_deterministic_with_same_seed() {
        let board = Board::new();
        let a = random_move(&board, Scope::Free, &mut StdRng::seed_from_u64(7));
        let b = random_move(&board, Scope::Free, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}

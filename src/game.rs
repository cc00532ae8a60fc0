//! Game session.
//!
//! Wraps a `Board` with the turn order and the scope rule, and rejects moves
//! the board itself accepts but the rules do not: wrong sub-board, decided
//! sub-board, or a finished game.

use rand::Rng;
use tracing::debug;

use crate::board::{Board, Move, Outcome, Player};
use crate::movegen::{legal_moves, next_scope, Scope};

/// Reasons a move is rejected by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("move {0} is off the board")]
    OutOfRange(Move),

    #[error("the game is already over")]
    GameOver,

    #[error("move {mv} is outside the current scope (must play in sub-board {required})")]
    OutsideScope { mv: Move, required: usize },

    #[error("sub-board {0} is already decided")]
    SubBoardDecided(usize),

    #[error("cell {0} is already occupied")]
    Occupied(Move),
}

/// A game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    to_move: Player,
    scope: Scope,
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Player::X)
    }
}

impl Game {
    /// Starts an empty game with `first` to move and a free choice.
    pub fn new(first: Player) -> Self {
        Game {
            board: Board::new(),
            to_move: first,
            scope: Scope::Free,
            history: Vec::new(),
        }
    }

    /// Starts an empty game with a coin flip for the first mover.
    pub fn with_random_first(rng: &mut impl Rng) -> Self {
        let first = if rng.gen_bool(0.5) { Player::X } else { Player::O };
        Game::new(first)
    }

    /// Rebuilds a session from a position. The board's outcome cache is
    /// refreshed and a scope naming a decided sub-board becomes a free
    /// choice; no history is known.
    pub fn from_position(mut board: Board, to_move: Player, scope: Scope) -> Self {
        board.refresh_outcomes();
        let scope = match scope {
            Scope::Within(index) if board.is_decided(index) => Scope::Free,
            scope => scope,
        };
        Game {
            board,
            to_move,
            scope,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Moves played through this session, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The overall result so far.
    pub fn outcome(&self) -> Outcome {
        self.board.overall_outcome()
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.outcome().is_decided() {
            return Vec::new();
        }
        legal_moves(&self.board, self.scope)
    }

    /// Checks `mv` against the rules without playing it.
    pub fn validate(&self, mv: Move) -> Result<(), MoveError> {
        if !mv.in_range() {
            return Err(MoveError::OutOfRange(mv));
        }
        if self.outcome().is_decided() {
            return Err(MoveError::GameOver);
        }
        if let Scope::Within(required) = self.scope {
            if !self.scope.allows(mv.sub_board) {
                return Err(MoveError::OutsideScope { mv, required });
            }
        }
        if self.board.is_decided(mv.sub_board) {
            return Err(MoveError::SubBoardDecided(mv.sub_board));
        }
        if self.board.cell(mv.sub_board, mv.row, mv.col).is_some() {
            return Err(MoveError::Occupied(mv));
        }
        Ok(())
    }

    /// Plays `mv` for the side to move and returns the overall outcome.
    pub fn play(&mut self, mv: Move) -> Result<Outcome, MoveError> {
        self.validate(mv)?;

        let player = self.to_move;
        self.board.apply(mv, player);
        self.scope = next_scope(&mut self.board, mv);
        self.to_move = player.other();
        self.history.push(mv);

        let outcome = self.board.overall_outcome();
        debug!(%mv, ?player, next = %self.scope, outcome = outcome.name(), "move played");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_game_starts_free() {
        let game = Game::new(Player::O);
        assert_eq!(game.to_move(), Player::O);
        assert_eq!(game.scope(), Scope::Free);
        assert_eq!(game.legal_moves().len(), 81);
        assert_eq!(game.outcome(), Outcome::Undetermined);
    }

    #[test]
    fn center_opening_sends_opponent_to_center() {
        let mut game = Game::new(Player::X);
        assert_eq!(game.play(Move::new(4, 1, 1)), Ok(Outcome::Undetermined));
        assert_eq!(game.scope(), Scope::Within(4));
        assert_eq!(game.to_move(), Player::O);
        assert!(game.board().is_playable(4, 0, 0));
        assert!(!game.board().is_playable(4, 1, 1));
        assert_eq!(game.legal_moves().len(), 8);
    }

    #[test]
    fn rejects_move_outside_scope() {
        let mut game = Game::new(Player::X);
        game.play(Move::new(0, 0, 2)).unwrap();
        let before = game.clone();
        let err = game.play(Move::new(5, 0, 0)).unwrap_err();
        assert_eq!(
            err,
            MoveError::OutsideScope {
                mv: Move::new(5, 0, 0),
                required: 2
            }
        );
        assert_eq!(game, before);
    }

    #[test]
    fn rejects_occupied_and_out_of_range() {
        let mut game = Game::new(Player::X);
        game.play(Move::new(4, 1, 1)).unwrap();
        assert_eq!(
            game.play(Move::new(4, 1, 1)),
            Err(MoveError::Occupied(Move::new(4, 1, 1)))
        );
        assert_eq!(
            game.play(Move::new(4, 3, 0)),
            Err(MoveError::OutOfRange(Move::new(4, 3, 0)))
        );
    }

    #[test]
    fn decided_target_gives_free_choice() {
        let mut game = Game::new(Player::X);
        let script = [
            (Move::new(0, 1, 1), Scope::Within(4)),
            (Move::new(4, 0, 0), Scope::Within(0)),
            (Move::new(0, 1, 0), Scope::Within(3)),
            (Move::new(3, 0, 0), Scope::Within(0)),
            // X completes the middle row of sub-board 0.
            (Move::new(0, 1, 2), Scope::Within(5)),
        ];
        for (mv, scope) in script {
            game.play(mv).unwrap();
            assert_eq!(game.scope(), scope, "after {}", mv);
        }
        assert_eq!(game.board().major_grid()[0], Outcome::Won(Player::X));
        assert!(matches!(
            game.play(Move::new(2, 0, 0)),
            Err(MoveError::OutsideScope { required: 5, .. })
        ));

        // O sends X into the decided sub-board 0.
        game.play(Move::new(5, 0, 0)).unwrap();
        assert_eq!(game.scope(), Scope::Free);
        assert_eq!(game.to_move(), Player::X);
        assert_eq!(
            game.play(Move::new(0, 2, 2)),
            Err(MoveError::SubBoardDecided(0))
        );
        assert!(game.legal_moves().iter().all(|m| m.sub_board != 0));
        assert_eq!(game.history().len(), 6);
    }

    #[test]
    fn finished_game_rejects_moves() {
        let mut board = Board::new();
        for sub in [2, 4, 6] {
            for col in 0..3 {
                board.attempt_move(sub, 0, col, Player::X);
            }
        }
        let mut game = Game::from_position(board, Player::O, Scope::Free);
        assert_eq!(game.outcome(), Outcome::Won(Player::X));
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.play(Move::new(0, 0, 0)), Err(MoveError::GameOver));
    }

    #[test]
    fn position_scope_into_decided_sub_board_is_free() {
        let mut board = Board::new();
        for col in 0..3 {
            board.attempt_move(7, 1, col, Player::O);
        }
        let game = Game::from_position(board, Player::X, Scope::Within(7));
        assert_eq!(game.scope(), Scope::Free);
        assert_eq!(game.legal_moves().len(), 72);
    }

    #[test]
    fn random_first_is_seeded() {
        let a = Game::with_random_first(&mut StdRng::seed_from_u64(3));
        let b = Game::with_random_first(&mut StdRng::seed_from_u64(3));
        assert_eq!(a.to_move(), b.to_move());

        let firsts: Vec<Player> = (0..64)
            .map(|s| Game::with_random_first(&mut StdRng::seed_from_u64(s)).to_move())
            .collect();
        assert!(firsts.contains(&Player::X));
        assert!(firsts.contains(&Player::O));
    }
}

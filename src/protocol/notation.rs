//! Position notation.
//!
//! A whole game position in one whitespace-free token, in the spirit of
//! chess FEN:
//!
//! `<sub0>/<sub1>/.../<sub8>/<to_move>/<scope>`
//!
//! Each sub-board group is nine cells row-major, `x`, `o` or `-` for empty.
//! `to_move` is `x` or `o`; `scope` is `*` for a free choice or the digit of
//! the sub-board the side to move is held to.

use crate::board::{grid_coords, Board, Player, GRID_CELLS};
use crate::game::Game;
use crate::movegen::Scope;

/// Notation of the empty starting position with X to move.
pub const START_POSITION: &str =
    "---------/---------/---------/---------/---------/---------/---------/---------/---------/x/*";

const SECTION_COUNT: usize = GRID_CELLS + 2;
const EMPTY_CELL: char = '-';

/// Errors that can occur while parsing a position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected 11 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("sub-board {index} has {len} cells, expected 9")]
    WrongCellCount { index: usize, len: usize },

    #[error("invalid cell character: '{0}'")]
    InvalidCell(char),

    #[error("invalid side to move: '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid scope: '{0}'")]
    InvalidScope(String),
}

/// Parses a position into a game session.
pub fn parse_position(s: &str) -> Result<Game, NotationError> {
    let sections: Vec<&str> = s.trim().split('/').collect();
    if sections.len() != SECTION_COUNT {
        return Err(NotationError::WrongSectionCount(sections.len()));
    }

    let mut board = Board::new();
    for (index, group) in sections[..GRID_CELLS].iter().enumerate() {
        let len = group.chars().count();
        if len != GRID_CELLS {
            return Err(NotationError::WrongCellCount { index, len });
        }
        for (cell, c) in group.chars().enumerate() {
            if c == EMPTY_CELL {
                continue;
            }
            let player = Player::from_notation_char(c).ok_or(NotationError::InvalidCell(c))?;
            let (row, col) = grid_coords(cell);
            board.attempt_move(index, row, col, player);
        }
    }

    let to_move = single_char(sections[GRID_CELLS])
        .and_then(Player::from_notation_char)
        .ok_or_else(|| NotationError::InvalidSideToMove(sections[GRID_CELLS].to_string()))?;
    let scope = single_char(sections[GRID_CELLS + 1])
        .and_then(Scope::from_notation_char)
        .ok_or_else(|| NotationError::InvalidScope(sections[GRID_CELLS + 1].to_string()))?;

    Ok(Game::from_position(board, to_move, scope))
}

/// Encodes a game session as a position string.
pub fn encode_position(game: &Game) -> String {
    let board = game.board();
    let mut out = String::with_capacity(START_POSITION.len());
    for index in 0..GRID_CELLS {
        for &cell in board.sub_board(index).cells() {
            out.push(cell.map_or(EMPTY_CELL, Player::notation_char));
        }
        out.push('/');
    }
    out.push(game.to_move().notation_char());
    out.push('/');
    out.push(game.scope().notation_char());
    out
}

/// Returns the only character of `s`, if it has exactly one.
fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

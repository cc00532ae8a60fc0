//! Termtactoe engine library.
//!
//! Exposes the Ultimate Tic-Tac-Toe board, move generation, evaluation,
//! search and protocol modules for use by integration tests and the binary
//! entry points.

pub mod board;
pub mod engine;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod selfplay;

//! Search and planning.
//!
//! Explores hypothetical continuations on cloned boards to pick a move for
//! the computer opponent.

pub mod minimax;

pub use minimax::{best_move, SearchParams, SearchResult, DEFAULT_DEPTH};

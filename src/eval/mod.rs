//! Position evaluation.
//!
//! Scores a board from one player's point of view. The score only counts
//! that player's progress; the search applies it from both the maximizing
//! and the minimizing side.

pub(crate) mod heuristic;

pub use heuristic::evaluate;

//! Fixed-depth minimax without pruning.
//!
//! Every candidate is played on a cloned board, scored recursively, and the
//! best-scoring moves are kept as a tie set. The final pick among ties is
//! uniform over the injected RNG, so play is not fully predictable at low
//! depth while staying reproducible under a fixed seed.

use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::board::{Board, Move, Outcome, Player};
use crate::eval::evaluate;
use crate::movegen::{legal_moves, next_scope, Scope};

/// Search depth used by the single-player opponent.
pub const DEFAULT_DEPTH: u32 = 3;

/// Inputs for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Player whose heuristic scores the leaves. Plies where this player
    /// moves maximize, the others minimize.
    pub perspective: Player,
    /// Player to move at the root.
    pub to_move: Player,
    /// Where the root mover may play.
    pub scope: Scope,
    /// Remaining plies.
    pub depth: u32,
    /// Score root candidates on the rayon pool.
    pub parallel: bool,
}

impl SearchParams {
    /// Searches for `player`'s own best move.
    pub fn for_player(player: Player, scope: Scope, depth: u32) -> Self {
        SearchParams {
            perspective: player,
            to_move: player,
            scope,
            depth,
            parallel: false,
        }
    }
}

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Minimax score of the root position.
    pub score: i32,
    /// Chosen move; `None` at depth 0, in finished games, or with no
    /// legal moves.
    pub best: Option<Move>,
    /// All root moves sharing the best score, in generation order.
    pub ties: Vec<Move>,
    /// Positions visited, root included.
    pub nodes: u64,
}

/// Finds a move for `params.to_move`.
///
/// Never touches `board`; each candidate is explored on its own copy.
pub fn best_move<R: Rng + ?Sized>(board: &Board, params: &SearchParams, rng: &mut R) -> SearchResult {
    let maximizing = params.to_move == params.perspective;
    let candidates = if is_terminal(board, params.depth) {
        Vec::new()
    } else {
        legal_moves(board, params.scope)
    };

    if candidates.is_empty() {
        return SearchResult {
            score: evaluate(board, params.perspective),
            best: None,
            ties: Vec::new(),
            nodes: 1,
        };
    }

    let explore = |&mv: &Move| {
        let mut nodes = 0;
        let score = score_child(board, mv, params.to_move, params.perspective, params.depth, &mut nodes);
        (mv, score, nodes)
    };
    let scored: Vec<(Move, i32, u64)> = if params.parallel {
        candidates.par_iter().map(explore).collect()
    } else {
        candidates.iter().map(explore).collect()
    };

    let mut best_score: Option<i32> = None;
    let mut ties = Vec::new();
    let mut nodes = 1;
    for (mv, score, child_nodes) in scored {
        nodes += child_nodes;
        match best_score {
            Some(best) if score == best => ties.push(mv),
            Some(best) if !improves(score, best, maximizing) => {}
            _ => {
                best_score = Some(score);
                ties.clear();
                ties.push(mv);
            }
        }
    }

    let best = ties.choose(rng).copied();
    let score = best_score.unwrap_or_else(|| evaluate(board, params.perspective));
    debug!(
        depth = params.depth,
        nodes,
        score,
        ties = ties.len(),
        ?best,
        "search finished"
    );
    SearchResult {
        score,
        best,
        ties,
        nodes,
    }
}

/// True when the search stops at this node.
#[inline]
fn is_terminal(board: &Board, depth: u32) -> bool {
    depth == 0 || board.overall_outcome() != Outcome::Undetermined
}

/// True if `score` is strictly better than `best` for the active objective.
#[inline]
fn improves(score: i32, best: i32, maximizing: bool) -> bool {
    if maximizing {
        score > best
    } else {
        score < best
    }
}

/// Plays `mv` for `mover` on a copy of `board` and returns the copy's
/// minimax score.
fn score_child(
    board: &Board,
    mv: Move,
    mover: Player,
    perspective: Player,
    depth: u32,
    nodes: &mut u64,
) -> i32 {
    let mut child = board.clone();
    child.apply(mv, mover);
    let scope = next_scope(&mut child, mv);
    minimax(&child, mover.other(), perspective, scope, depth - 1, nodes)
}

/// Minimax value of `board` with `to_move` about to play inside `scope`.
///
/// Only the score propagates upward, so inner nodes skip the random
/// tie-break.
fn minimax(
    board: &Board,
    to_move: Player,
    perspective: Player,
    scope: Scope,
    depth: u32,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;
    if is_terminal(board, depth) {
        return evaluate(board, perspective);
    }

    let moves = legal_moves(board, scope);
    if moves.is_empty() {
        return evaluate(board, perspective);
    }

    let maximizing = to_move == perspective;
    let mut best: Option<i32> = None;
    for mv in moves {
        let score = score_child(board, mv, to_move, perspective, depth, nodes);
        best = match best {
            Some(b) if !improves(score, b, maximizing) => Some(b),
            _ => Some(score),
        };
    }
    best.unwrap_or_else(|| evaluate(board, perspective))
}

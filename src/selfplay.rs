//! Self-play game generation.
//!
//! Plays full games with the search on both sides and records every move,
//! the scope it was played under and the search score, as JSONL.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use crate::board::{Move, Outcome, Player};
use crate::game::Game;
use crate::movegen::random_move;
use crate::protocol::notation::encode_position;
use crate::search::{best_move, SearchParams, DEFAULT_DEPTH};

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Search depth for X.
    pub depth_x: u32,
    /// Search depth for O.
    pub depth_o: u32,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Flip a coin for the first mover instead of always starting with X.
    pub random_first: bool,
    /// Suppress per-game progress logging.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            depth_x: DEFAULT_DEPTH,
            depth_o: DEFAULT_DEPTH,
            threads: 4,
            seed: 0,
            random_first: true,
            quiet: false,
        }
    }
}

impl SelfPlayConfig {
    fn depth_for(&self, player: Player) -> u32 {
        match player {
            Player::X => self.depth_x,
            Player::O => self.depth_o,
        }
    }
}

/// A single recorded move.
#[derive(Debug, Clone, Serialize)]
pub struct MoveRecord {
    pub player: Player,
    /// Scope notation the move was played under (`*` or a digit).
    pub scope: char,
    #[serde(flatten)]
    pub mv: Move,
    /// Search score from the mover's perspective.
    pub score: i32,
    pub nodes: u64,
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub first: Player,
    pub moves: Vec<MoveRecord>,
    pub outcome: Outcome,
    pub final_position: String,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        self.outcome.winner()
    }
}

/// Plays a single self-play game and returns the game record.
///
/// The search normally finds a move whenever the session has one; the
/// random fallback only covers depth-0 configurations.
pub fn play_game(config: &SelfPlayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut game = if config.random_first {
        Game::with_random_first(rng)
    } else {
        Game::new(Player::X)
    };
    let first = game.to_move();
    let mut moves = Vec::new();

    while !game.outcome().is_decided() {
        let player = game.to_move();
        let scope = game.scope();
        let params = SearchParams::for_player(player, scope, config.depth_for(player));
        let result = best_move(game.board(), &params, rng);

        let mv = match result.best.or_else(|| random_move(game.board(), scope, rng)) {
            Some(mv) => mv,
            None => break,
        };
        if game.play(mv).is_err() {
            break;
        }
        moves.push(MoveRecord {
            player,
            scope: scope.notation_char(),
            mv,
            score: result.score,
            nodes: result.nodes,
        });
    }

    GameRecord {
        game_id,
        first,
        moves,
        outcome: game.outcome(),
        final_position: encode_position(&game),
    }
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = if config.threads > 1 {
        run_self_play_parallel(config)
    } else {
        run_self_play_sequential(config)
    };
    games.sort_by_key(|g| g.game_id);
    games
}

/// Sequential self-play: plays games one at a time from one RNG.
fn run_self_play_sequential(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut rng = if config.seed != 0 {
        SmallRng::seed_from_u64(config.seed)
    } else {
        SmallRng::from_entropy()
    };

    (0..config.num_games)
        .map(|i| {
            let game_start = Instant::now();
            let game = play_game(config, i, &mut rng);
            if !config.quiet {
                log_game(&game, i + 1, config.num_games, game_start);
            }
            game
        })
        .collect()
}

/// Parallel self-play: each game gets its own RNG seeded from `seed + id`.
fn run_self_play_parallel(config: &SelfPlayConfig) -> Vec<GameRecord> {
    use rayon::prelude::*;

    let completed = AtomicUsize::new(0);
    let play = || {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| {
                let mut rng = if config.seed != 0 {
                    SmallRng::seed_from_u64(config.seed.wrapping_add(i as u64))
                } else {
                    SmallRng::from_entropy()
                };
                let game_start = Instant::now();
                let game = play_game(config, i, &mut rng);
                if !config.quiet {
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    log_game(&game, n, config.num_games, game_start);
                }
                game
            })
            .collect()
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool.install(play),
        Err(e) => {
            tracing::warn!(error = %e, "failed to build thread pool, using the global one");
            play()
        }
    }
}

fn log_game(game: &GameRecord, n: usize, total: usize, started: Instant) {
    info!(
        game = n,
        total,
        outcome = game.outcome.name(),
        moves = game.moves.len(),
        secs = started.elapsed().as_secs_f64(),
        "game finished"
    );
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Win/draw tally over a batch of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
    pub first_mover_wins: usize,
    pub total_moves: usize,
}

impl Summary {
    pub fn from_games(games: &[GameRecord]) -> Self {
        let mut summary = Summary {
            games: games.len(),
            ..Default::default()
        };
        for game in games {
            summary.total_moves += game.moves.len();
            match game.outcome {
                Outcome::Won(Player::X) => summary.x_wins += 1,
                Outcome::Won(Player::O) => summary.o_wins += 1,
                _ => summary.ties += 1,
            }
            if game.winner() == Some(game.first) {
                summary.first_mover_wins += 1;
            }
        }
        summary
    }
}

/// Prints a summary of self-play results to stderr.
pub fn print_summary(games: &[GameRecord]) {
    let s = Summary::from_games(games);
    let pct = |n: usize| 100.0 * n as f64 / s.games.max(1) as f64;

    eprintln!("=== Self-Play Summary ===");
    eprintln!("Games: {}", s.games);
    eprintln!(
        "Avg moves/game: {:.1}",
        s.total_moves as f64 / s.games.max(1) as f64
    );
    eprintln!("X wins: {} ({:.1}%)", s.x_wins, pct(s.x_wins));
    eprintln!("O wins: {} ({:.1}%)", s.o_wins, pct(s.o_wins));
    eprintln!("Ties/unfinished: {} ({:.1}%)", s.ties, pct(s.ties));
    eprintln!(
        "First mover wins: {} ({:.1}%)",
        s.first_mover_wins,
        pct(s.first_mover_wins)
    );
}

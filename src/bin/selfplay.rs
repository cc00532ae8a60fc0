//! Self-play game generation CLI.
//!
//! Plays engine-vs-engine games and writes one JSON record per game.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use termtactoe::search::DEFAULT_DEPTH;
use termtactoe::selfplay::{self, SelfPlayConfig};

#[derive(Parser)]
#[command(name = "selfplay")]
#[command(about = "Play Ultimate Tic-Tac-Toe games engine against engine and record them as JSONL")]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 10)]
    games: usize,

    /// Search depth for both sides (overridden per side below)
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u32,

    /// Search depth for X
    #[arg(long)]
    depth_x: Option<u32>,

    /// Search depth for O
    #[arg(long)]
    depth_o: Option<u32>,

    /// Number of parallel threads
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Random seed, 0 for entropy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Always let X move first instead of flipping a coin
    #[arg(long)]
    x_first: bool,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Suppress progress and summary output
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn config(&self) -> SelfPlayConfig {
        SelfPlayConfig {
            num_games: self.games,
            depth_x: self.depth_x.unwrap_or(self.depth),
            depth_o: self.depth_o.unwrap_or(self.depth),
            threads: self.threads,
            seed: self.seed,
            random_first: !self.x_first,
            quiet: self.quiet,
        }
    }
}

fn main() {
    let args = Args::parse();
    let default_level = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = args.config();
    info!(
        games = config.num_games,
        depth_x = config.depth_x,
        depth_o = config.depth_o,
        threads = config.threads,
        "starting self-play"
    );

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed().as_secs_f64();

    if !args.quiet {
        eprintln!(
            "Completed {} games in {:.1}s ({:.1} games/hour)",
            games.len(),
            elapsed,
            games.len() as f64 / elapsed.max(f64::EPSILON) * 3600.0
        );
        selfplay::print_summary(&games);
    }

    let written = match &args.output {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)
        }
    };

    match (written, &args.output) {
        (Err(e), _) => {
            error!(error = %e, "failed to write games");
            std::process::exit(1);
        }
        (Ok(()), Some(path)) => info!(path = %path.display(), games = games.len(), "wrote games"),
        (Ok(()), None) => {}
    }
}

//! Engine state management.
//!
//! Holds the current game session, engine options and the RNG, and answers
//! protocol commands. Searches run synchronously on `go`.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::board::{Move, Player};
use crate::game::Game;
use crate::protocol::notation::{encode_position, parse_position, NotationError};
use crate::protocol::parser::GoParams;
use crate::search::{best_move, SearchParams, DEFAULT_DEPTH};

/// Deepest search accepted from options or `go depth`.
const MAX_DEPTH: u32 = 8;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: Game,
    pub options: HashMap<String, String>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates an engine with an empty board and X to move.
    pub fn new() -> Self {
        Engine {
            game: Game::new(Player::X),
            options: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Resets the game to an empty board with X to move.
    pub fn new_game(&mut self) {
        self.game = Game::new(Player::X);
    }

    /// Replaces the game with a position in notation.
    pub fn set_position(&mut self, notation: &str) -> Result<(), NotationError> {
        self.game = parse_position(notation)?;
        Ok(())
    }

    /// Sets an engine option. A `Seed` option reseeds the RNG immediately.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        if name == "Seed" {
            let seed = value.as_deref().and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);
            self.rng = if seed != 0 {
                SmallRng::seed_from_u64(seed)
            } else {
                SmallRng::from_entropy()
            };
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Returns the configured search depth from options, or the default.
    fn depth(&self) -> u32 {
        self.options
            .get("Depth")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_DEPTH)
            .clamp(1, MAX_DEPTH)
    }

    /// Returns whether root moves are searched in parallel.
    fn parallel(&self) -> bool {
        self.options
            .get("Parallel")
            .map(|v| v.is_empty() || v == "true")
            .unwrap_or(false)
    }

    /// Handles the handshake: writes id, options, protocol_version and utiok.
    pub fn handle_uti<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name termtactoe")?;
        writeln!(out, "id author termtactoe")?;
        writeln!(
            out,
            "option name Depth type spin default {} min 1 max {}",
            DEFAULT_DEPTH, MAX_DEPTH
        )?;
        writeln!(out, "option name Seed type spin default 0 min 0")?;
        writeln!(out, "option name Parallel type check default false")?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "utiok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Plays a move for the side to move, reporting `illegal <reason>` if
    /// the session rejects it.
    pub fn handle_play<W: Write>(&mut self, mv: Move, out: &mut W) -> io::Result<()> {
        if let Err(e) = self.game.play(mv) {
            warn!(%mv, error = %e, "rejected move");
            writeln!(out, "illegal {}", e)?;
            out.flush()?;
        }
        Ok(())
    }

    /// Handles the `status` command.
    pub fn handle_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "status {} tomove {} scope {} position {}",
            self.game.outcome().name(),
            self.game.to_move().notation_char(),
            self.game.scope(),
            encode_position(&self.game)
        )?;
        out.flush()
    }

    /// Handles the `go` command: searches for the side to move and writes an
    /// `info` line followed by `bestmove`.
    pub fn handle_go<W: Write>(&mut self, go: &GoParams, out: &mut W) -> io::Result<()> {
        let depth = go.depth.map_or_else(|| self.depth(), |d| d.clamp(1, MAX_DEPTH));
        let mut params = SearchParams::for_player(self.game.to_move(), self.game.scope(), depth);
        params.parallel = self.parallel();

        let start = Instant::now();
        let result = best_move(self.game.board(), &params, &mut self.rng);
        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(depth, nodes = result.nodes, score = result.score, elapsed_ms, "search complete");

        writeln!(
            out,
            "info depth {} nodes {} score {} time {}",
            depth, result.nodes, result.score, elapsed_ms
        )?;
        match result.best {
            Some(mv) => writeln!(out, "bestmove {}", mv)?,
            None => writeln!(out, "bestmove none")?,
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::Scope;
    use crate::protocol::notation::START_POSITION;

    fn output_of(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn bestmove(output: &str) -> &str {
        output
            .lines()
            .find_map(|l| l.strip_prefix("bestmove "))
            .expect("no bestmove line")
    }

    #[test]
    fn new_engine_starts_empty() {
        let engine = Engine::new();
        assert_eq!(engine.game, Game::new(Player::X));
        assert!(engine.options.is_empty());
    }

    #[test]
    fn new_game_resets_state() {
        let mut engine = Engine::new();
        engine.game.play(Move::new(4, 1, 1)).unwrap();
        engine.new_game();
        assert!(engine.game.history().is_empty());
        assert_eq!(engine.game.to_move(), Player::X);
    }

    #[test]
    fn set_position_valid_and_invalid() {
        let mut engine = Engine::new();
        assert!(engine.set_position(START_POSITION).is_ok());
        engine.game.play(Move::new(0, 0, 0)).unwrap();
        let before = engine.game.clone();
        assert!(engine.set_position("garbage").is_err());
        assert_eq!(engine.game, before);
    }

    #[test]
    fn set_option_stores_value() {
        let mut engine = Engine::new();
        engine.set_option("Depth".to_string(), Some("5".to_string()));
        assert_eq!(engine.options.get("Depth"), Some(&"5".to_string()));
        assert_eq!(engine.depth(), 5);
        engine.set_option("Depth".to_string(), Some("99".to_string()));
        assert_eq!(engine.depth(), MAX_DEPTH);
        engine.set_option("Parallel".to_string(), None);
        assert!(engine.parallel());
    }

    #[test]
    fn handle_uti_outputs_handshake() {
        let engine = Engine::new();
        let output = output_of(|out| engine.handle_uti(out));
        assert!(output.contains("id name termtactoe"));
        assert!(output.contains("option name Depth"));
        assert!(output.contains("protocol_version 1"));
        assert_eq!(output.lines().last(), Some("utiok"));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        assert_eq!(output_of(|out| engine.handle_isready(out)).trim(), "readyok");
    }

    #[test]
    fn handle_go_outputs_legal_bestmove() {
        let mut engine = Engine::new();
        engine.set_option("Seed".to_string(), Some("7".to_string()));
        engine.game.play(Move::new(4, 1, 1)).unwrap();

        let output = output_of(|out| engine.handle_go(&GoParams { depth: Some(2) }, out));
        assert!(output.starts_with("info depth 2 nodes "), "{}", output);
        let coords: Vec<usize> = bestmove(&output)
            .split_whitespace()
            .map(|t| t.parse().unwrap())
            .collect();
        assert_eq!(coords.len(), 3);
        assert_eq!(coords[0], 4);
        assert!(engine.game.board().is_playable(coords[0], coords[1], coords[2]));
    }

    #[test]
    fn handle_go_is_reproducible_with_seed() {
        let run = || {
            let mut engine = Engine::new();
            engine.set_option("Seed".to_string(), Some("99".to_string()));
            let output = output_of(|out| engine.handle_go(&GoParams { depth: Some(1) }, out));
            bestmove(&output).to_string()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn handle_go_finished_game_has_no_move() {
        let mut engine = Engine::new();
        engine
            .set_position("xxx------/---------/---------/---------/xxx------/---------/---------/---------/xxx------/o/*")
            .unwrap();
        let output = output_of(|out| engine.handle_go(&GoParams::default(), out));
        assert_eq!(bestmove(&output), "none");
    }

    #[test]
    fn handle_play_reports_illegal() {
        let mut engine = Engine::new();
        let output = output_of(|out| engine.handle_play(Move::new(4, 1, 1), out));
        assert!(output.is_empty());
        assert_eq!(engine.game.scope(), Scope::Within(4));

        let output = output_of(|out| engine.handle_play(Move::new(0, 0, 0), out));
        assert!(output.starts_with("illegal "), "{}", output);
        assert_eq!(engine.game.history().len(), 1);
    }

    #[test]
    fn handle_status_reports_position() {
        let mut engine = Engine::new();
        engine.game.play(Move::new(4, 1, 1)).unwrap();
        let output = output_of(|out| engine.handle_status(out));
        assert!(output.starts_with("status undetermined tomove o scope 4 position "));
        assert!(output.trim_end().ends_with("/o/4"));
    }
}

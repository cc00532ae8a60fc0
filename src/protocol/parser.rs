//! Command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the engine main loop can dispatch on.

use tracing::warn;

use crate::board::Move;

/// Search constraints passed with the `go` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u32>,
}

/// A parsed controller-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Protocol handshake.
    Uti,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset to an empty board.
    NewGame,

    /// Replace the game with a position in notation.
    Position { notation: String },

    /// Play a move for the side to move: `play <sub> <row> <col>`.
    Play(Move),

    /// Search for the side to move.
    Go(GoParams),

    /// Report outcome, side to move, scope and position.
    Status,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, _) = tokens.split_first()?;

    match head {
        "uti" => Some(Command::Uti),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "status" => Some(Command::Status),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens),
        "play" => parse_play(&tokens),
        "go" => parse_go(&tokens),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position <notation>`; `position startpos` is accepted as the
/// empty board with X to move.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    match tokens.get(1) {
        Some(&"startpos") => Some(Command::Position {
            notation: super::notation::START_POSITION.to_string(),
        }),
        Some(notation) => Some(Command::Position {
            notation: notation.to_string(),
        }),
        None => {
            warn!("malformed position: expected 'position <notation>'");
            None
        }
    }
}

/// Parses `play <sub> <row> <col>`.
fn parse_play(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 4 {
        warn!("malformed play: expected 'play <sub> <row> <col>'");
        return None;
    }
    let mut coords = [0usize; 3];
    for (slot, token) in coords.iter_mut().zip(&tokens[1..]) {
        match token.parse::<usize>() {
            Ok(v) => *slot = v,
            Err(_) => {
                warn!(value = token, "invalid play coordinate");
                return None;
            }
        }
    }
    Some(Command::Play(Move::new(coords[0], coords[1], coords[2])))
}

/// Parses `go [depth <n>]`.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    let mut params = GoParams::default();
    let mut i = 1;

    while i < tokens.len() {
        match tokens[i] {
            "depth" => {
                i += 1;
                if let Some(token) = tokens.get(i) {
                    match token.parse::<u32>() {
                        Ok(v) => params.depth = Some(v),
                        Err(_) => warn!(value = token, "invalid depth value"),
                    }
                }
            }
            other => {
                warn!(token = other, "unknown go parameter");
            }
        }
        i += 1;
    }

    Some(Command::Go(params))
}

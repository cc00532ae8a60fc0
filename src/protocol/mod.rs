//! Text protocol handling.
//!
//! Position notation and the command parser used by the engine's main loop.

pub mod notation;
pub mod parser;

pub use notation::{encode_position, parse_position, NotationError, START_POSITION};
pub use parser::{parse_command, Command, GoParams};

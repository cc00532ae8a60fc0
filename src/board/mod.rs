//! Board representation and game-state types.
//!
//! Contains the nine sub-boards, the cached major grid of their outcomes,
//! moves, and the win-line tables shared by both levels.

pub mod lines;
pub mod moves;
pub mod player;
pub mod state;
pub mod sub_board;

pub use lines::{grid_coords, grid_index, GRID_CELLS, WIN_LINES};
pub use moves::Move;
pub use player::{Outcome, Player, ALL_PLAYERS};
pub use state::Board;
pub use sub_board::SubBoard;

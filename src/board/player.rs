//! Players and outcomes.
//!
//! A cell holds `Option<Player>`; a sub-board or the whole game resolves to
//! an `Outcome`.

use serde::{Deserialize, Serialize};

/// One of the two sides. X is conventionally the first player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    X,
    O,
}

/// Both players in move order.
pub const ALL_PLAYERS: [Player; 2] = [Player::X, Player::O];

impl Player {
    /// Returns the opposing side.
    pub const fn other(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the lowercase character used in position notation.
    pub const fn notation_char(self) -> char {
        match self {
            Player::X => 'x',
            Player::O => 'o',
        }
    }

    /// Parses a player from its notation character (case-insensitive).
    pub fn from_notation_char(c: char) -> Option<Player> {
        match c {
            'x' | 'X' => Some(Player::X),
            'o' | 'O' => Some(Player::O),
            _ => None,
        }
    }
}

/// Result of a sub-board or of the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Undetermined,
    Won(Player),
    Tie,
}

impl Outcome {
    /// True once the outcome can no longer change.
    pub const fn is_decided(self) -> bool {
        !matches!(self, Outcome::Undetermined)
    }

    /// Returns the winner, if any.
    pub const fn winner(self) -> Option<Player> {
        match self {
            Outcome::Won(p) => Some(p),
            _ => None,
        }
    }

    /// Short protocol name: `undetermined`, `x`, `o` or `tie`.
    pub const fn name(self) -> &'static str {
        match self {
            Outcome::Undetermined => "undetermined",
            Outcome::Won(Player::X) => "x",
            Outcome::Won(Player::O) => "o",
            Outcome::Tie => "tie",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_flips_sides() {
        assert_eq!(Player::X.other(), Player::O);
        assert_eq!(Player::O.other(), Player::X);
    }

    #[test]
    fn notation_char_roundtrip() {
        for p in ALL_PLAYERS {
            assert_eq!(Player::from_notation_char(p.notation_char()), Some(p));
        }
        assert_eq!(Player::from_notation_char('X'), Some(Player::X));
        assert_eq!(Player::from_notation_char('-'), None);
    }

    #[test]
    fn outcome_helpers() {
        assert!(!Outcome::Undetermined.is_decided());
        assert!(Outcome::Tie.is_decided());
        assert!(Outcome::Won(Player::O).is_decided());
        assert_eq!(Outcome::Won(Player::X).winner(), Some(Player::X));
        assert_eq!(Outcome::Tie.winner(), None);
        assert_eq!(Outcome::default(), Outcome::Undetermined);
        assert_eq!(Outcome::Won(Player::O).name(), "o");
    }
}

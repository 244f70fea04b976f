//! Player marks.
//!
//! The two marks double as player identities: the player and the mark they
//! place are the same closed two-value enumeration, with X moving first.

/// One of the two players, identified by the mark they place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the single-character OFEN abbreviation.
    pub const fn ofen_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    /// Parses a mark from its single-character OFEN abbreviation.
    pub fn from_ofen_char(c: char) -> Option<Mark> {
        match c {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            _ => None,
        }
    }

    /// Returns the other player.
    pub const fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

//! Algebraic square notation.
//!
//! Moves travel the OXI protocol as two-character cell names: a file letter
//! `a`-`c` for the column (left to right) followed by a rank digit `1`-`3`
//! for the row (top to bottom). `a1` is the top-left corner, `c3` the
//! bottom-right.

use thiserror::Error;

use crate::board::Square;

/// Errors that can occur when parsing algebraic square names.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("empty input")]
    EmptyInput,

    #[error("expected a two-character square name, got '{0}'")]
    WrongLength(String),

    #[error("unknown file '{0}', expected a-c")]
    UnknownFile(char),

    #[error("unknown rank '{0}', expected 1-3")]
    UnknownRank(char),
}

/// Parses a square name like `b2` into a [`Square`].
pub fn parse_move(s: &str) -> Result<Square, MoveError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(MoveError::EmptyInput);
    }

    let mut chars = s.chars();
    let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
        (Some(f), Some(r), None) => (f, r),
        _ => return Err(MoveError::WrongLength(s.to_string())),
    };

    let col = match file {
        'a'..='c' => file as u8 - b'a',
        _ => return Err(MoveError::UnknownFile(file)),
    };
    let row = match rank {
        '1'..='3' => rank as u8 - b'1',
        _ => return Err(MoveError::UnknownRank(rank)),
    };

    Ok(Square::new(row, col))
}

/// Formats an on-board [`Square`] as its algebraic name.
pub fn format_move(sq: Square) -> String {
    debug_assert!(sq.in_bounds());
    format!("{}{}", (b'a' + sq.col) as char, (b'1' + sq.row) as char)
}

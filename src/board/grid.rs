//! The playing grid.
//!
//! Holds one tic-tac-toe position as an immutable value. Applying a move
//! returns a new grid and leaves the input untouched, so recursive search
//! branches never observe each other's changes.

use std::fmt;

use super::mark::Mark;
use super::square::{Square, SQUARE_COUNT};

/// The eight winning lines as row-major cell indices, in scan order:
/// rows top to bottom, columns left to right, then the two diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2], // top row
    [3, 4, 5], // middle row
    [6, 7, 8], // bottom row
    [0, 3, 6], // left column
    [1, 4, 7], // middle column
    [2, 5, 8], // right column
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// Error returned by [`Grid::apply`] when a move targets a square that is
/// off the board or already occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal move ({row}, {col}): target square is off the board or occupied")]
pub struct InvalidMove {
    pub row: u8,
    pub col: u8,
}

/// One tic-tac-toe position.
///
/// Cells are stored row-major in a fixed array indexed by
/// [`Square::index`]; `None` is an empty cell. The whole grid is nine bytes
/// and `Copy`, so derived positions are plain value copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    pub cells: [Option<Mark>; SQUARE_COUNT],
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new()
    }
}

impl Grid {
    /// Creates the empty starting position.
    pub const fn new() -> Grid {
        Grid {
            cells: [None; SQUARE_COUNT],
        }
    }

    /// Returns the mark at a square, or `None` for an empty cell.
    pub fn get(&self, sq: Square) -> Option<Mark> {
        debug_assert!(sq.in_bounds());
        self.cells[sq.index()]
    }

    /// Number of cells holding the given mark.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| **c == Some(mark)).count()
    }

    /// The player to move: O when X has placed more marks, otherwise X.
    ///
    /// X opens the game, so equal counts mean it is X's turn.
    pub fn to_move(&self) -> Mark {
        if self.count(Mark::X) > self.count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        }
    }

    /// Applies a move for the side to move and returns the resulting grid.
    ///
    /// Fails with [`InvalidMove`] when the target square is off the board or
    /// already occupied. The input grid is never modified.
    #[must_use = "apply returns a new grid; the original is unchanged"]
    pub fn apply(&self, sq: Square) -> Result<Grid, InvalidMove> {
        if !sq.in_bounds() || self.cells[sq.index()].is_some() {
            return Err(InvalidMove {
                row: sq.row,
                col: sq.col,
            });
        }
        Ok(self.place(sq))
    }

    /// Unchecked apply for squares already known to be legal, used by the
    /// search on moves produced by generation.
    pub(crate) fn place(&self, sq: Square) -> Grid {
        debug_assert!(sq.in_bounds() && self.cells[sq.index()].is_none());
        let mut next = *self;
        next.cells[sq.index()] = Some(self.to_move());
        next
    }

    /// Returns the winner if any line of three identical marks is complete.
    ///
    /// Lines are scanned rows first, then columns, then the two diagonals;
    /// only one player can hold a line on a reachable grid, so the scan
    /// order is not observable through legal play.
    pub fn winner(&self) -> Option<Mark> {
        for line in LINES {
            if let Some(mark) = self.cells[line[0]] {
                if self.cells[line[1]] == Some(mark) && self.cells[line[2]] == Some(mark) {
                    return Some(mark);
                }
            }
        }
        None
    }

    /// True if the given player holds any completed line.
    pub fn has_line(&self, mark: Mark) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == Some(mark)))
    }

    /// True if every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// True if the game is over: a completed line, or a full grid.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Terminal value from X's perspective: 1 for an X win, -1 for an O
    /// win, 0 for a draw or an unfinished position.
    pub fn utility(&self) -> i32 {
        match self.winner() {
            Some(Mark::X) => 1,
            Some(Mark::O) => -1,
            None => 0,
        }
    }
}

impl fmt::Display for Grid {
    /// Renders the grid as three rows of `X`, `O`, and `.` characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                match self.cells[row * 3 + col] {
                    Some(mark) => write!(f, "{}", mark.ofen_char())?,
                    None => write!(f, ".")?,
                }
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

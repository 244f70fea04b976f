//! Board coordinates.
//!
//! A square is a (row, column) pair with both coordinates in 0..=2. Rows are
//! numbered from the top and columns from the left, so square (0, 0) is the
//! top-left corner and (2, 2) the bottom-right.

/// Number of squares on the grid.
pub const SQUARE_COUNT: usize = 9;

/// A single cell coordinate.
///
/// Construction is unchecked; [`crate::board::Grid::apply`] rejects
/// off-board squares when a move is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

/// All squares in row-major order. This is the canonical enumeration order
/// used by move generation and search tie-breaking.
pub const ALL_SQUARES: [Square; SQUARE_COUNT] = [
    Square { row: 0, col: 0 },
    Square { row: 0, col: 1 },
    Square { row: 0, col: 2 },
    Square { row: 1, col: 0 },
    Square { row: 1, col: 1 },
    Square { row: 1, col: 2 },
    Square { row: 2, col: 0 },
    Square { row: 2, col: 1 },
    Square { row: 2, col: 2 },
];

impl Square {
    /// Creates a square from raw coordinates.
    pub const fn new(row: u8, col: u8) -> Square {
        Square { row, col }
    }

    /// Row-major index into a nine-cell array.
    pub const fn index(self) -> usize {
        self.row as usize * 3 + self.col as usize
    }

    /// Inverse of [`Square::index`] for indices in 0..9.
    pub const fn from_index(index: usize) -> Square {
        Square {
            row: (index / 3) as u8,
            col: (index % 3) as u8,
        }
    }

    /// True if both coordinates lie on the grid.
    pub const fn in_bounds(self) -> bool {
        self.row < 3 && self.col < 3
    }
}
